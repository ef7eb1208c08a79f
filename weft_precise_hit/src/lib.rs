// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry-level hit testing for diagram figures.
//!
//! This crate answers "is this point on that shape?" for the two shapes a
//! diagram is made of: filled integer rectangles (nodes) and thin line
//! segments (links). It is decoupled from any registry or z-order; callers
//! scan their own figures and ask each one in turn.
//!
//! # Key types
//!
//! - [`HitParams`] – per-query tolerances. Segments use `stroke_tolerance` as
//!   the pick radius; rectangles always use the tight open-interval test.
//! - [`HitScore`] – `{ distance, kind }`, lower distance is a closer hit.
//! - [`PreciseHitTest`] – implemented by [`IRect`] and [`stroke::Segment`].
//!
//! Rectangles treat their boundary as outside: a point exactly on an edge
//! does not hit. Segments hit when the point is strictly closer than the
//! tolerance, so a zero tolerance never hits.
//!
//! ```
//! use weft_index::{IRect, IVec2};
//! use weft_precise_hit::{HitParams, PreciseHitTest};
//! use weft_precise_hit::stroke::Segment;
//!
//! let node = IRect::new(0, 0, 60, 30);
//! assert!(node.hit_test(IVec2::new(30, 15), &HitParams::default()).is_some());
//! assert!(node.hit_test(IVec2::new(60, 15), &HitParams::default()).is_none());
//!
//! let link = Segment::new(IVec2::new(0, 0), IVec2::new(100, 0));
//! let params = HitParams::with_stroke_tolerance(5.0);
//! assert!(link.hit_test(IVec2::new(50, 4), &params).is_some());
//! assert!(link.hit_test(IVec2::new(50, 5), &params).is_none());
//! ```

#![no_std]

use kurbo::Point;
use weft_index::{IRect, IVec2};

/// Stroke-oriented helpers and primitives.
pub mod stroke;

/// Kind of hit produced by a precise test.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HitKind {
    /// Hit the interior of a filled shape.
    Fill,
    /// Hit within the pick radius of a stroked line.
    Stroke,
}

/// Parameters controlling precise hit tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitParams {
    /// Pick radius in canvas units for hits against line segments.
    pub stroke_tolerance: f64,
}

impl HitParams {
    /// Parameters with the given stroke pick radius.
    pub const fn with_stroke_tolerance(stroke_tolerance: f64) -> Self {
        Self { stroke_tolerance }
    }
}

impl Default for HitParams {
    fn default() -> Self {
        Self::with_stroke_tolerance(0.0)
    }
}

/// Score returned from a precise hit.
///
/// Filled hits always report distance 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitScore {
    /// Geometric distance in canvas units.
    pub distance: f64,
    /// Classification of what was hit.
    pub kind: HitKind,
}

impl HitScore {
    /// Convenience constructor for a filled hit at distance 0.
    pub const fn filled() -> Self {
        Self {
            distance: 0.0,
            kind: HitKind::Fill,
        }
    }
}

/// Trait for precise 2D hit testing in canvas coordinates.
pub trait PreciseHitTest {
    /// Returns `Some(HitScore)` when `pt` is considered a hit.
    fn hit_test(&self, pt: IVec2, params: &HitParams) -> Option<HitScore>;
}

/// Convert an integer point to a kurbo point.
#[allow(
    clippy::cast_precision_loss,
    reason = "Canvas coordinates are far below 2^52."
)]
#[inline]
pub fn to_point(v: IVec2) -> Point {
    Point::new(v.x as f64, v.y as f64)
}

/// Open-interval rectangle test; the stroke tolerance does not apply.
impl PreciseHitTest for IRect {
    fn hit_test(&self, pt: IVec2, _params: &HitParams) -> Option<HitScore> {
        self.contains_point_open(pt).then(HitScore::filled)
    }
}
