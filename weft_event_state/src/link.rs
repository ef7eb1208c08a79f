// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Link creation gesture.
//!
//! A link is drawn in three steps:
//!
//! - **Start** over an object: a [`PendingLink`] is anchored to it, with a
//!   floating endpoint at the anchor.
//! - **Track** on every pointer move: the floating endpoint follows the
//!   pointer. Nothing is validated while tracking.
//! - **Finish**: the object under the pointer, if any, becomes the second
//!   endpoint when it differs from the first and the pair is not linked yet.
//!   Otherwise the pending link is discarded. Either way the gesture is idle
//!   again afterwards.
//!
//! At most one link is in progress. Starting a new one replaces it.
//!
//! ```
//! use weft_event_state::link::{DiscardReason, LinkGesture, LinkOutcome};
//! use weft_index::IVec2;
//!
//! let mut gesture: LinkGesture<u32> = LinkGesture::new();
//! gesture.start(1, IVec2::new(30, 15));
//! gesture.track(IVec2::new(200, 40));
//!
//! let outcome = gesture.finish(Some(2), |_, _| false);
//! assert_eq!(outcome, LinkOutcome::Finalized { first: 1, second: 2 });
//!
//! gesture.start(2, IVec2::new(230, 15));
//! let outcome = gesture.finish(Some(1), |a, b| (a, b) == (2, 1));
//! assert_eq!(
//!     outcome,
//!     LinkOutcome::Discarded { first: 2, reason: DiscardReason::Duplicate }
//! );
//! ```

use weft_index::IVec2;

/// A link that has its first endpoint and a floating second endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingLink<K> {
    /// Object the link starts from.
    pub first: K,
    /// Floating endpoint, following the pointer.
    pub temp_point: IVec2,
}

/// Why a pending link was dropped instead of finalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscardReason {
    /// The gesture finished over empty space.
    NoTarget,
    /// The gesture finished over the object it started from.
    SameNode,
    /// The two objects are already linked.
    Duplicate,
}

/// Result of a finish gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOutcome<K> {
    /// No link was in progress.
    Idle,
    /// The link connects two distinct, previously unlinked objects.
    Finalized {
        /// Object the gesture started from.
        first: K,
        /// Object the gesture finished on.
        second: K,
    },
    /// The link was dropped.
    Discarded {
        /// Object the gesture started from.
        first: K,
        /// Why it was dropped.
        reason: DiscardReason,
    },
}

/// Whether `(a, b)` and `(c, d)` are the same unordered pair.
#[inline]
pub fn is_same_pair<K: PartialEq>(a: &K, b: &K, c: &K, d: &K) -> bool {
    (a == c && b == d) || (a == d && b == c)
}

/// Single-slot link creation state machine.
#[derive(Clone, Debug)]
pub struct LinkGesture<K> {
    pending: Option<PendingLink<K>>,
}

impl<K: Copy + PartialEq> LinkGesture<K> {
    /// Create an idle gesture.
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Start a link from `first`, with its floating endpoint at `anchor`.
    ///
    /// Returns the link that was in progress before, if any.
    pub fn start(&mut self, first: K, anchor: IVec2) -> Option<PendingLink<K>> {
        self.pending.replace(PendingLink {
            first,
            temp_point: anchor,
        })
    }

    /// Move the floating endpoint. Returns `false` when no link is in progress.
    pub fn track(&mut self, pointer: IVec2) -> bool {
        match self.pending.as_mut() {
            Some(link) => {
                link.temp_point = pointer;
                true
            }
            None => false,
        }
    }

    /// Finish the gesture over `target`.
    ///
    /// `exists(first, target)` reports whether the pair is already linked; it is
    /// only consulted for a distinct target. The slot is cleared in every case.
    pub fn finish<F>(&mut self, target: Option<K>, exists: F) -> LinkOutcome<K>
    where
        F: FnOnce(K, K) -> bool,
    {
        let Some(link) = self.pending.take() else {
            return LinkOutcome::Idle;
        };
        let first = link.first;
        let reason = match target {
            None => DiscardReason::NoTarget,
            Some(second) if second == first => DiscardReason::SameNode,
            Some(second) => {
                if !exists(first, second) {
                    return LinkOutcome::Finalized { first, second };
                }
                DiscardReason::Duplicate
            }
        };
        LinkOutcome::Discarded { first, reason }
    }

    /// Drop the link in progress, if any.
    pub fn cancel(&mut self) -> Option<PendingLink<K>> {
        self.pending.take()
    }

    /// The link in progress, if any.
    pub fn pending(&self) -> Option<&PendingLink<K>> {
        self.pending.as_ref()
    }

    /// Whether a link is in progress.
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }
}

impl<K: Copy + PartialEq> Default for LinkGesture<K> {
    fn default() -> Self {
        Self::new()
    }
}
