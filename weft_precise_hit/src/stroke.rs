// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line segment hit testing.
//!
//! Links are drawn as hairlines, so clicking exactly on them is impractical.
//! [`Segment`] hits when the query point is strictly closer to the segment
//! than [`HitParams::stroke_tolerance`].

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, Point};
use weft_index::IVec2;

use crate::{HitKind, HitParams, HitScore, PreciseHitTest, to_point};

/// Euclidean distance from `pt` to the closed segment `line`.
///
/// The two endpoint projections decide the case: if the perpendicular foot
/// falls outside the segment the nearest endpoint is used, otherwise the
/// point-to-line distance. A degenerate segment measures to its single point.
pub fn segment_distance(pt: Point, line: Line) -> f64 {
    let ab = line.p1 - line.p0;
    let at = pt - line.p0;
    let bt = pt - line.p1;

    if ab.dot(at) < 0.0 || (-ab).dot(bt) < 0.0 {
        return pt.distance(line.p0).min(pt.distance(line.p1));
    }

    let length = ab.hypot();
    if length > 0.0 {
        ab.cross(at).abs() / length
    } else {
        pt.distance(line.p0)
    }
}

/// A straight segment between two integer points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Start point.
    pub p0: IVec2,
    /// End point.
    pub p1: IVec2,
}

impl Segment {
    /// Create a segment.
    pub const fn new(p0: IVec2, p1: IVec2) -> Self {
        Self { p0, p1 }
    }

    /// The segment as a kurbo line.
    pub fn to_line(&self) -> Line {
        Line::new(to_point(self.p0), to_point(self.p1))
    }

    /// Distance from `pt` to this segment.
    pub fn distance_to(&self, pt: IVec2) -> f64 {
        segment_distance(to_point(pt), self.to_line())
    }
}

impl PreciseHitTest for Segment {
    fn hit_test(&self, pt: IVec2, params: &HitParams) -> Option<HitScore> {
        let distance = self.distance_to(pt);
        (distance < params.stroke_tolerance).then_some(HitScore {
            distance,
            kind: HitKind::Stroke,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn perpendicular_foot_inside_uses_line_distance() {
        let s = Segment::new(IVec2::new(0, 0), IVec2::new(10, 0));
        assert!(approx(s.distance_to(IVec2::new(5, 3)), 3.0));
        assert!(approx(s.distance_to(IVec2::new(0, -4)), 4.0));

        let diag = Segment::new(IVec2::new(0, 0), IVec2::new(10, 10));
        assert!(approx(
            diag.distance_to(IVec2::new(10, 0)),
            50.0_f64.sqrt()
        ));
    }

    #[test]
    fn foot_outside_uses_nearest_endpoint() {
        let s = Segment::new(IVec2::new(0, 0), IVec2::new(10, 0));
        assert!(approx(s.distance_to(IVec2::new(-3, 4)), 5.0));
        assert!(approx(s.distance_to(IVec2::new(13, -4)), 5.0));
    }

    #[test]
    fn degenerate_segment_measures_to_point() {
        let s = Segment::new(IVec2::new(2, 2), IVec2::new(2, 2));
        assert!(approx(s.distance_to(IVec2::new(5, 6)), 5.0));
        assert!(approx(s.distance_to(IVec2::new(2, 2)), 0.0));
    }

    #[test]
    fn tolerance_is_strict() {
        let s = Segment::new(IVec2::new(0, 0), IVec2::new(100, 0));
        let params = HitParams::with_stroke_tolerance(5.0);
        let hit = s.hit_test(IVec2::new(40, 4), &params).expect("within radius");
        assert_eq!(hit.kind, HitKind::Stroke);
        assert!(approx(hit.distance, 4.0));
        assert!(s.hit_test(IVec2::new(40, 5), &params).is_none());
        assert!(s.hit_test(IVec2::new(40, 0), &HitParams::default()).is_none());
    }
}
