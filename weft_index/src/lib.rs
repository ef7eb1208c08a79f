// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weft Index: integer geometry and a bucket grid for neighbor overlap checks.
//!
//! - [`IVec2`]: integer point/vector with component-wise arithmetic.
//! - [`IRect`]: axis-aligned integer rectangle with a closed overlap test and
//!   an open point-containment test.
//! - [`BucketGrid`]: uniform grid that files each key under the bucket holding
//!   its anchor (top-left corner) and answers 3×3 neighborhood queries.
//!
//! The grid is a side structure. It stores keys, not geometry, so the owner of
//! the geometry decides when to refile a key after it moves.
//!
//! # Example
//!
//! ```rust
//! use weft_index::{BucketCoord, BucketGrid, IRect, IVec2};
//!
//! // Nodes are 60×30, buckets are twice the node width.
//! let mut grid: BucketGrid<u32> = BucketGrid::new(120);
//! let a = IRect::from_origin_size(IVec2::new(100, 100), IVec2::new(60, 30));
//! grid.insert(1, a.origin());
//!
//! // A candidate touching `a` on its right edge overlaps it.
//! let candidate = a.translate(IVec2::new(60, 0));
//! let max = grid.max_bucket(IVec2::new(900, 600));
//! let blocked = grid
//!     .neighbors(grid.bucket_of(candidate.origin()), max)
//!     .any(|_| a.overlaps(&candidate));
//! assert!(blocked);
//!
//! // Moving the node refiles it under its new bucket.
//! grid.relocate(1, a.origin(), IVec2::new(400, 100));
//! assert!(grid.contains(1, BucketCoord::new(3, 0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod grid;
mod types;

pub use grid::{BucketCoord, BucketGrid};
pub use types::{IRect, IVec2};
