// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weft Event State: gesture state machines for diagram editing.
//!
//! Both machines are generic over the key type of the objects they act on and
//! never own those objects. Callers feed them pointer positions and answer
//! their questions (is this rectangle a valid place? does this link exist?)
//! through closures, then apply the outcome to their own storage.
//!
//! - [`drag::DragState`]: moves an object along with the pointer while keeping
//!   it valid, falling back from direct placement to a catch-up move and
//!   finally to a revert.
//! - [`link::LinkGesture`]: tracks an in-progress link from its first endpoint
//!   to a finish gesture, deciding whether it is finalized or discarded.
//!
//! Events must be delivered in order. Out-of-sequence events (a move without a
//! preceding down, a finish without a start) are no-ops.
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod link;
