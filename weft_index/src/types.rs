// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive integer geometry types and helpers.

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Integer 2D point or vector.
///
/// Used both for positions (pointer locations, node corners) and for
/// displacements (drag offsets, pointer deltas).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IVec2 {
    /// Horizontal component.
    pub x: i64,
    /// Vertical component.
    pub y: i64,
}

impl IVec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new vector.
    #[inline(always)]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Clamp both components into `[0, extent]` on their own axis.
    ///
    /// A negative extent clamps to zero.
    #[inline]
    pub fn clamp_to(self, extent: Self) -> Self {
        Self {
            x: self.x.clamp(0, extent.x.max(0)),
            y: self.y.clamp(0, extent.y.max(0)),
        }
    }

    /// Component-wise addition, or `None` on overflow.
    #[inline]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match (self.x.checked_add(rhs.x), self.y.checked_add(rhs.y)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }

    /// Component-wise subtraction, or `None` on overflow.
    #[inline]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match (self.x.checked_sub(rhs.x), self.y.checked_sub(rhs.y)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }
}

impl From<(i64, i64)> for IVec2 {
    #[inline]
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for IVec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for IVec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for IVec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for IVec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for IVec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle with integer corners.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IRect {
    /// Minimum x (left)
    pub min_x: i64,
    /// Minimum y (top)
    pub min_y: i64,
    /// Maximum x (right)
    pub max_x: i64,
    /// Maximum y (bottom)
    pub max_y: i64,
}

impl IRect {
    /// Create a new rectangle from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub const fn from_origin_size(origin: IVec2, size: IVec2) -> Self {
        Self::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    /// Like [`from_origin_size`](Self::from_origin_size), but `None` when the
    /// far corner does not fit in `i64`.
    #[inline]
    pub const fn checked_from_origin_size(origin: IVec2, size: IVec2) -> Option<Self> {
        match origin.checked_add(size) {
            Some(max) => Some(Self::new(origin.x, origin.y, max.x, max.y)),
            None => None,
        }
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> IVec2 {
        IVec2::new(self.min_x, self.min_y)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> IVec2 {
        IVec2::new(self.max_x - self.min_x, self.max_y - self.min_y)
    }

    /// Width of the rectangle.
    #[inline]
    pub const fn width(&self) -> i64 {
        self.max_x - self.min_x
    }

    /// Height of the rectangle.
    #[inline]
    pub const fn height(&self) -> i64 {
        self.max_y - self.min_y
    }

    /// Center point, rounded toward the top-left corner.
    #[inline]
    pub fn center(&self) -> IVec2 {
        self.origin() + half(self.size())
    }

    /// The same-sized rectangle with its top-left corner at `origin`.
    #[inline]
    pub fn with_origin(&self, origin: IVec2) -> Self {
        Self::from_origin_size(origin, self.size())
    }

    /// The same-sized rectangle centered on `center`.
    ///
    /// `r.with_center(c).center() == c` holds for every rectangle.
    #[inline]
    pub fn with_center(&self, center: IVec2) -> Self {
        self.with_origin(center - half(self.size()))
    }

    /// Like [`with_center`](Self::with_center), but `None` when a corner
    /// does not fit in `i64`.
    #[inline]
    pub fn checked_with_center(&self, center: IVec2) -> Option<Self> {
        let origin = center.checked_sub(half(self.size()))?;
        Self::checked_from_origin_size(origin, self.size())
    }

    /// The rectangle moved by `delta`.
    #[inline]
    pub fn translate(&self, delta: IVec2) -> Self {
        self.with_origin(self.origin() + delta)
    }

    /// Determines whether this rectangle overlaps another in any way.
    ///
    /// The edge of a rectangle is part of itself, so two rectangles that share
    /// an edge overlap. A one unit gap is needed to separate them.
    ///
    /// # Examples
    ///
    /// ```
    /// use weft_index::IRect;
    ///
    /// let a = IRect::new(0, 0, 60, 30);
    /// assert!(a.overlaps(&IRect::new(30, 10, 90, 40)));
    /// assert!(a.overlaps(&IRect::new(60, 0, 120, 30)));
    /// assert!(!a.overlaps(&IRect::new(61, 0, 121, 30)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Whether the point lies strictly inside the rectangle.
    ///
    /// Points on the boundary are outside.
    #[inline]
    pub fn contains_point_open(&self, pt: IVec2) -> bool {
        self.min_x < pt.x && pt.x < self.max_x && self.min_y < pt.y && pt.y < self.max_y
    }

    /// Whether `other` lies entirely inside this rectangle, boundary included.
    #[inline]
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Return true if the rectangle is empty or inverted (no area).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }
}

#[inline]
const fn half(size: IVec2) -> IVec2 {
    IVec2::new(size.x / 2, size.y / 2)
}
