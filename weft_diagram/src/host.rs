// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window-side collaborator of a [`Diagram`](crate::Diagram).

use weft_index::IVec2;

use crate::error::PlacementError;

/// Supplies the canvas bounds and receives user-facing diagnostics.
pub trait Host {
    /// Current canvas size. Read on every validity check, so resizes take
    /// effect immediately.
    fn canvas_size(&self) -> IVec2;

    /// A node the user asked for could not be placed.
    fn placement_rejected(&mut self, error: &PlacementError) {
        tracing::warn!(%error, "node placement rejected");
    }
}

/// A plain resizable canvas that only logs diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// Width and height.
    pub size: IVec2,
}

impl Canvas {
    /// A `width` × `height` canvas.
    pub const fn new(width: i64, height: i64) -> Self {
        Self {
            size: IVec2::new(width, height),
        }
    }

    /// Change the size.
    pub fn resize(&mut self, width: i64, height: i64) {
        self.size = IVec2::new(width, height);
    }
}

impl Host for Canvas {
    fn canvas_size(&self) -> IVec2 {
        self.size
    }
}
