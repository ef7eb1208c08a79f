// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag resolution for objects that must always rest in a valid position.
//!
//! A drag starts when the pointer goes down strictly inside the object's
//! rectangle. Every following pointer move is resolved in three stages:
//!
//! 1. **Direct**: center the object on the pointer plus the grab offset.
//! 2. **Catch-up**: if that is invalid, move the object from its last valid
//!    center by the pointer's delta since the previous move. This lets the
//!    object slide along an obstacle instead of freezing on contact.
//! 3. **Revert**: if that is invalid too, keep the rectangle the move started
//!    from.
//!
//! Pointer positions are clamped to `[0, canvas]` on both axes before use.
//!
//! ## Usage
//!
//! ```
//! use weft_event_state::drag::{DragResolution, DragState};
//! use weft_index::{IRect, IVec2};
//!
//! let canvas = IVec2::new(900, 600);
//! let wall = IRect::new(200, 0, 260, 600);
//! let mut rect = IRect::from_origin_size(IVec2::new(100, 100), IVec2::new(60, 30));
//!
//! let mut drag: DragState<u32> = DragState::new();
//! assert!(drag.on_down(7, rect, IVec2::new(130, 115), canvas));
//!
//! // Jumping into the wall is rejected; the catch-up delta is too large as well.
//! let step = drag
//!     .on_move(rect, IVec2::new(230, 115), canvas, |r| !r.overlaps(&wall))
//!     .unwrap();
//! assert_eq!(step.resolution, DragResolution::Reverted);
//! rect = step.rect;
//!
//! // Moving vertically after that is fine again.
//! let step = drag
//!     .on_move(rect, IVec2::new(130, 200), canvas, |r| !r.overlaps(&wall))
//!     .unwrap();
//! assert_eq!(step.resolution, DragResolution::Direct);
//!
//! let end = drag.on_up().unwrap();
//! assert_eq!(end.origin, IVec2::new(100, 100));
//! ```

use weft_index::{IRect, IVec2};

/// How a pointer move was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragResolution {
    /// Centered on the pointer plus the grab offset.
    Direct,
    /// Moved by the pointer delta from the last valid center.
    CatchUp,
    /// Left where the move started.
    Reverted,
}

/// Outcome of one pointer move during a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragStep<K> {
    /// Object being dragged.
    pub target: K,
    /// Rectangle the object settled on. Always valid if the starting one was.
    pub rect: IRect,
    /// Which stage produced `rect`.
    pub resolution: DragResolution,
}

/// Returned when a drag finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragEnd<K> {
    /// Object that was dragged.
    pub target: K,
    /// Top-left corner the object had when the drag started.
    pub origin: IVec2,
}

/// State for an active drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drag<K> {
    /// Object being dragged.
    pub target: K,
    /// Vector from the pointer to the object's center at drag start.
    pub offset: IVec2,
    /// Top-left corner at drag start.
    pub origin: IVec2,
    /// Clamped pointer position of the previous event.
    pub prev_pointer: IVec2,
}

/// Drag state machine for a single pointer.
#[derive(Clone, Debug)]
pub struct DragState<K> {
    active: Option<Drag<K>>,
}

impl<K: Copy> DragState<K> {
    /// Create an idle drag state.
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Start dragging `target` if the clamped pointer is strictly inside `rect`.
    ///
    /// Replaces any drag already in progress. Returns whether a drag started.
    pub fn on_down(&mut self, target: K, rect: IRect, pointer: IVec2, canvas: IVec2) -> bool {
        let pointer = pointer.clamp_to(canvas);
        if !rect.contains_point_open(pointer) {
            return false;
        }
        self.active = Some(Drag {
            target,
            offset: rect.center() - pointer,
            origin: rect.origin(),
            prev_pointer: pointer,
        });
        true
    }

    /// Resolve a pointer move for the dragged object currently at `rect`.
    ///
    /// `is_valid` is asked about each candidate in turn. Returns `None` when no
    /// drag is active.
    pub fn on_move<F>(
        &mut self,
        rect: IRect,
        pointer: IVec2,
        canvas: IVec2,
        mut is_valid: F,
    ) -> Option<DragStep<K>>
    where
        F: FnMut(&IRect) -> bool,
    {
        let drag = self.active.as_mut()?;
        let pointer = pointer.clamp_to(canvas);

        let direct = rect.with_center(pointer + drag.offset);
        let (settled, resolution) = if is_valid(&direct) {
            (direct, DragResolution::Direct)
        } else {
            let catch_up = rect.with_center(rect.center() + (pointer - drag.prev_pointer));
            if is_valid(&catch_up) {
                (catch_up, DragResolution::CatchUp)
            } else {
                (rect, DragResolution::Reverted)
            }
        };

        drag.prev_pointer = pointer;
        Some(DragStep {
            target: drag.target,
            rect: settled,
            resolution,
        })
    }

    /// Finish the drag, returning the target and its drag-start corner.
    pub fn on_up(&mut self) -> Option<DragEnd<K>> {
        self.active.take().map(|d| DragEnd {
            target: d.target,
            origin: d.origin,
        })
    }

    /// Abandon the drag without reporting an end.
    pub fn cancel(&mut self) -> Option<Drag<K>> {
        self.active.take()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Object being dragged, if any.
    pub fn target(&self) -> Option<K> {
        self.active.as_ref().map(|d| d.target)
    }

    /// The active drag, if any.
    pub fn drag(&self) -> Option<&Drag<K>> {
        self.active.as_ref()
    }
}

impl<K: Copy> Default for DragState<K> {
    fn default() -> Self {
        Self::new()
    }
}
