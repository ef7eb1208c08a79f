// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap-free placement checks backed by the bucket grid.

use weft_index::{BucketGrid, IRect, IVec2};

use crate::arena::Arena;
use crate::error::PlacementError;
use crate::types::{Node, NodeId};

/// A borrowed view of everything a placement check reads.
///
/// Kept separate from the diagram so a drag can validate candidates while the
/// drag state itself is borrowed mutably.
#[derive(Clone, Copy)]
pub(crate) struct Validator<'a> {
    pub(crate) nodes: &'a Arena<NodeId, Node>,
    pub(crate) grid: &'a BucketGrid<NodeId>,
    pub(crate) canvas: IVec2,
    /// Node being dragged; its bucket may not match its live position.
    pub(crate) in_flight: Option<NodeId>,
}

impl Validator<'_> {
    /// Check `rect` against the canvas and nearby nodes, ignoring `exclude`.
    ///
    /// Only the 3×3 block of buckets around the bucket of `rect`'s top-left
    /// corner is scanned, plus the in-flight node, which is still filed under
    /// its drag-start bucket. `exclude` is skipped by key.
    pub(crate) fn check(
        &self,
        rect: &IRect,
        exclude: Option<NodeId>,
    ) -> Result<(), PlacementError> {
        let bounds = IRect::from_origin_size(IVec2::ZERO, self.canvas);
        if !bounds.contains_rect(rect) {
            return Err(PlacementError::OutOfBounds);
        }

        let center = self.grid.bucket_of(rect.origin());
        let max = self.grid.max_bucket(self.canvas);
        let mut hit = None;
        self.grid.visit_neighbors(center, max, |key| {
            if hit.is_some() || Some(key) == exclude {
                return;
            }
            if let Some(node) = self.nodes.get(key)
                && node.rect.overlaps(rect)
            {
                hit = Some(key);
            }
        });
        if hit.is_none()
            && let Some(key) = self.in_flight.filter(|&k| Some(k) != exclude)
            && self.nodes.get(key).is_some_and(|n| n.rect.overlaps(rect))
        {
            hit = Some(key);
        }
        match hit {
            Some(other) => Err(PlacementError::Overlaps(other)),
            None => Ok(()),
        }
    }
}
