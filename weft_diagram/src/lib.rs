// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weft Diagram: the state behind a node-and-link diagram editor.
//!
//! A [`Diagram`] holds fixed-size rectangular nodes and straight links between
//! them, and turns raw pointer and key events into edits:
//!
//! - double-click with the left button places a node, refused if it would
//!   leave the canvas or touch another node;
//! - dragging with the left button moves a node, sliding it along obstacles
//!   instead of letting it overlap;
//! - dragging with the right button from one node to another links them;
//! - the middle button (or the Delete key) removes what is under the pointer.
//!
//! Overlap checks only look at nearby nodes, found through a
//! [`weft_index::BucketGrid`]. The drag and link gestures are the pure state
//! machines from [`weft_event_state`]; hit tests come from
//! [`weft_precise_hit`].
//!
//! The diagram draws nothing itself. [`Diagram::render`] describes figures to
//! a [`Surface`], and the canvas size and user-facing diagnostics come from a
//! [`Host`].
//!
//! # Example
//!
//! ```rust
//! use weft_diagram::{Button, Canvas, Diagram, InputEvent, PlacementError};
//! use weft_index::IVec2;
//!
//! let mut diagram = Diagram::new(Canvas::new(900, 600));
//! let a = diagram.place_node(IVec2::new(200, 200)).unwrap();
//! let b = diagram.place_node(IVec2::new(400, 200)).unwrap();
//!
//! // Nodes may not touch.
//! assert!(matches!(
//!     diagram.place_node(IVec2::new(230, 210)),
//!     Err(PlacementError::Overlaps(_))
//! ));
//!
//! // Draw a link with the right button.
//! diagram.process_input(&InputEvent::down(Button::Right, (200, 200)));
//! diagram.process_input(&InputEvent::up(Button::Right, (400, 200)));
//! assert!(diagram.link_exists(b, a));
//!
//! assert!(diagram.check_invariants().is_ok());
//! ```
//!
//! # Logging
//!
//! Edits and discarded gestures are reported through [`tracing`] at `debug`
//! level, per-move drag resolution at `trace`. Install a subscriber to see
//! them. The default [`Host::placement_rejected`] logs at `warn`.

mod arena;
mod config;
mod diagram;
mod error;
mod event;
mod host;
pub mod hover;
pub mod render;
mod types;
mod validator;

pub use config::DiagramConfig;
pub use diagram::Diagram;
pub use error::{InvariantViolation, PlacementError};
pub use event::{Button, Buttons, InputEvent, Key};
pub use host::{Canvas, Host};
pub use render::{FigureRef, Hint, Surface};
pub use types::{Color, FigureId, FigureKind, LINK_COLOR, Link, LinkId, Node, NodeId, PALETTE};

pub use weft_event_state::drag::{DragResolution, DragStep};
pub use weft_event_state::link::{DiscardReason, LinkOutcome, PendingLink};
