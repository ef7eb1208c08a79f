// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for a [`Diagram`](crate::Diagram).

use weft_index::IVec2;
use weft_precise_hit::HitParams;

/// Sizes and tolerances for a diagram.
///
/// Nodes are always twice as wide as they are tall. The grid bucket edge is
/// `bucket_factor` node widths; any factor of at least 1 keeps the 3×3
/// neighbor scan sufficient to find every possible overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagramConfig {
    /// Node height in canvas units. Width is twice this.
    pub node_height: i64,
    /// Grid bucket edge, in node widths.
    pub bucket_factor: i64,
    /// Pick radius for links.
    pub pick_tolerance: f64,
    /// Size of the hover hint frame.
    pub hint_size: IVec2,
    /// Offset of the hint frame from the pointer.
    pub hint_offset: IVec2,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            node_height: 30,
            bucket_factor: 2,
            pick_tolerance: 5.0,
            hint_size: IVec2::new(200, 50),
            hint_offset: IVec2::new(10, 10),
        }
    }
}

impl DiagramConfig {
    /// Set the node height.
    pub fn with_node_height(mut self, node_height: i64) -> Self {
        self.node_height = node_height;
        self
    }

    /// Set the bucket edge in node widths.
    pub fn with_bucket_factor(mut self, bucket_factor: i64) -> Self {
        self.bucket_factor = bucket_factor;
        self
    }

    /// Set the link pick radius.
    pub fn with_pick_tolerance(mut self, pick_tolerance: f64) -> Self {
        self.pick_tolerance = pick_tolerance;
        self
    }

    /// Set the hint frame size and pointer offset.
    pub fn with_hint_frame(mut self, size: IVec2, offset: IVec2) -> Self {
        self.hint_size = size;
        self.hint_offset = offset;
        self
    }

    /// Node height, at least 1.
    pub fn node_height(&self) -> i64 {
        self.node_height.max(1)
    }

    /// Node width: twice the height.
    pub fn node_width(&self) -> i64 {
        self.node_height() * 2
    }

    /// Node size as a vector.
    pub fn node_size(&self) -> IVec2 {
        IVec2::new(self.node_width(), self.node_height())
    }

    /// Grid bucket edge length.
    pub fn bucket_size(&self) -> i64 {
        self.bucket_factor.max(1) * self.node_width()
    }

    /// Hit parameters for standard picking.
    pub fn hit_params(&self) -> HitParams {
        HitParams::with_stroke_tolerance(self.pick_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_derive_width_and_bucket() {
        let cfg = DiagramConfig::default();
        assert_eq!(cfg.node_size(), IVec2::new(60, 30));
        assert_eq!(cfg.bucket_size(), 120);
        assert_eq!(cfg.hit_params().stroke_tolerance, 5.0);
    }

    #[test]
    fn degenerate_values_are_floored() {
        let cfg = DiagramConfig::default()
            .with_node_height(0)
            .with_bucket_factor(0);
        assert_eq!(cfg.node_width(), 2);
        assert_eq!(cfg.bucket_size(), 2);
    }
}
