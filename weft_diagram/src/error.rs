// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use weft_index::BucketCoord;

use crate::types::{LinkId, NodeId};

/// Why a node rectangle may not occupy a position.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PlacementError {
    /// Part of the rectangle lies outside the canvas.
    #[error("Node doesn't fit: it would leave the canvas")]
    OutOfBounds,
    /// The rectangle overlaps or touches another node.
    #[error("Node doesn't fit: it would overlap another node")]
    Overlaps(NodeId),
}

/// The first broken consistency rule found by
/// [`Diagram::check_invariants`](crate::Diagram::check_invariants).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    /// A node lies partly outside the canvas.
    #[error("node {0:?} lies outside the canvas")]
    OutOfBounds(NodeId),
    /// Two nodes overlap or touch.
    #[error("nodes {0:?} and {1:?} overlap")]
    Overlap(NodeId, NodeId),
    /// A node is not filed where its anchor says it should be.
    #[error("node {node:?} is missing from bucket {expected:?}")]
    StaleBucket {
        /// The misfiled node.
        node: NodeId,
        /// Bucket computed from its anchor.
        expected: BucketCoord,
    },
    /// The grid holds a different number of keys than there are nodes.
    #[error("grid holds {grid} keys for {nodes} nodes")]
    GridSize {
        /// Keys in the grid.
        grid: usize,
        /// Live nodes.
        nodes: usize,
    },
    /// A link references a node that no longer exists.
    #[error("link {0:?} references a removed node")]
    DanglingLink(LinkId),
    /// The figure order does not list every live figure exactly once with
    /// links ahead of nodes.
    #[error("figure order is out of sync with storage")]
    FigureOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_messages_are_user_facing() {
        assert_eq!(
            PlacementError::OutOfBounds.to_string(),
            "Node doesn't fit: it would leave the canvas"
        );
    }
}
