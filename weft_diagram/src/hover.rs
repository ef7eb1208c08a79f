// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking.
//!
//! A diagram has no nesting, so the hover path is at most one figure long.
//! [`HoverState`] remembers the figure under the pointer and reports the
//! leave/enter pair when it changes, which is when a hint appears, moves to
//! another figure, or disappears.

use smallvec::SmallVec;

/// Transitions from one update: at most a leave and an enter.
pub type HoverEvents<K> = SmallVec<[HoverEvent<K>; 2]>;

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer entered this figure.
    Enter(K),
    /// The pointer left this figure.
    Leave(K),
}

/// The figure currently under the pointer.
#[derive(Clone, Debug)]
pub struct HoverState<K> {
    current: Option<K>,
}

impl<K: Copy + Eq> HoverState<K> {
    /// Nothing hovered.
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Replace the hovered figure. Leave comes before enter; no events when
    /// nothing changed.
    pub fn update(&mut self, next: Option<K>) -> HoverEvents<K> {
        let mut out = HoverEvents::new();
        if self.current == next {
            return out;
        }
        if let Some(prev) = self.current {
            out.push(HoverEvent::Leave(prev));
        }
        if let Some(next) = next {
            out.push(HoverEvent::Enter(next));
        }
        self.current = next;
        out
    }

    /// Forget the hovered figure, emitting a leave if there was one.
    pub fn clear(&mut self) -> HoverEvents<K> {
        self.update(None)
    }

    /// The hovered figure.
    pub fn current(&self) -> Option<K> {
        self.current
    }
}

impl<K: Copy + Eq> Default for HoverState<K> {
    fn default() -> Self {
        Self::new()
    }
}
