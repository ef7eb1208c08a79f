// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform bucket grid keyed by anchor points.
//!
//! Unlike a grid that registers a box in every cell it covers, this grid files
//! each key under exactly one bucket: the one holding the key's anchor point
//! (for diagram nodes, the top-left corner). An overlap query for a box then
//! only has to scan the 3×3 block of buckets around the box's own bucket,
//! which is complete as long as no registered box is wider or taller than one
//! bucket.
//!
//! The grid does not remember where a key was filed. Callers pass the anchor
//! the key was inserted with when removing or relocating it, which lets them
//! keep the grid deliberately stale while an object is in flight and reconcile
//! it once afterwards.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::types::IVec2;

/// Integer coordinate of a bucket.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketCoord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl BucketCoord {
    /// Create a new bucket coordinate.
    #[inline(always)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Map a coordinate to a bucket index along one axis.
///
/// Rounds toward -∞ and saturates values outside the `i32` range.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Bucket indices are intentionally i32; out-of-range values are saturated."
)]
#[inline]
fn cell_coord(value: i64, cell_size: i64) -> i32 {
    debug_assert!(cell_size > 0, "bucket size must be strictly positive");
    // Euclidean division rounds toward -∞, which matches floor for all
    // integer values.
    let coord = value.div_euclid(cell_size);
    if coord >= i64::from(i32::MAX) {
        i32::MAX
    } else if coord <= i64::from(i32::MIN) {
        i32::MIN
    } else {
        coord as i32
    }
}

#[derive(Clone)]
struct Bucket<K> {
    keys: SmallVec<[K; 8]>,
}

impl<K> Bucket<K> {
    fn new() -> Self {
        Self {
            keys: SmallVec::new(),
        }
    }
}

/// Uniform grid that files every key under the bucket holding its anchor.
#[derive(Clone)]
pub struct BucketGrid<K> {
    bucket_size: i64,
    buckets: HashMap<BucketCoord, Bucket<K>>,
    len: usize,
}

impl<K> Debug for BucketGrid<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BucketGrid")
            .field("bucket_size", &self.bucket_size)
            .field("keys", &self.len)
            .field("buckets", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq> BucketGrid<K> {
    /// Create an empty grid with square buckets of the given size.
    pub fn new(bucket_size: i64) -> Self {
        debug_assert!(bucket_size > 0, "bucket_size must be strictly positive");
        Self {
            bucket_size,
            buckets: HashMap::new(),
            len: 0,
        }
    }

    /// Side length of a bucket.
    pub fn bucket_size(&self) -> i64 {
        self.bucket_size
    }

    /// Bucket holding the given anchor point.
    #[inline]
    pub fn bucket_of(&self, anchor: IVec2) -> BucketCoord {
        BucketCoord::new(
            cell_coord(anchor.x, self.bucket_size),
            cell_coord(anchor.y, self.bucket_size),
        )
    }

    /// Last bucket coordinate on each axis that still intersects `[0, extent]`.
    pub fn max_bucket(&self, extent: IVec2) -> BucketCoord {
        self.bucket_of(extent)
    }

    /// File `key` under the bucket holding `anchor`, creating the bucket if needed.
    ///
    /// Returns the bucket the key was filed under.
    pub fn insert(&mut self, key: K, anchor: IVec2) -> BucketCoord {
        let coord = self.bucket_of(anchor);
        self.buckets
            .entry(coord)
            .or_insert_with(Bucket::new)
            .keys
            .push(key);
        self.len += 1;
        coord
    }

    /// Remove `key` from the bucket holding `known_anchor`.
    ///
    /// `known_anchor` must be the anchor the key was filed with, not wherever the
    /// object has moved since. Empty buckets are dropped. Returns `false` if the
    /// key was not found in that bucket.
    pub fn remove(&mut self, key: K, known_anchor: IVec2) -> bool {
        let coord = self.bucket_of(known_anchor);
        self.remove_from(key, coord)
    }

    /// Move `key` from the bucket of `old_anchor` to the bucket of `new_anchor`.
    ///
    /// Does nothing when both anchors fall into the same bucket. Returns `true`
    /// if the key changed buckets.
    pub fn relocate(&mut self, key: K, old_anchor: IVec2, new_anchor: IVec2) -> bool {
        let old = self.bucket_of(old_anchor);
        let new = self.bucket_of(new_anchor);
        if old == new {
            return false;
        }
        self.remove_from(key, old);
        self.buckets
            .entry(new)
            .or_insert_with(Bucket::new)
            .keys
            .push(key);
        self.len += 1;
        true
    }

    /// Whether `key` is filed under `coord`.
    pub fn contains(&self, key: K, coord: BucketCoord) -> bool {
        self.keys_in(coord).contains(&key)
    }

    /// Keys filed under `coord`.
    pub fn keys_in(&self, coord: BucketCoord) -> &[K] {
        self.buckets
            .get(&coord)
            .map(|b| b.keys.as_slice())
            .unwrap_or(&[])
    }

    /// Visit every key filed in the 3×3 block of buckets centered on `center`.
    ///
    /// Buckets with a negative coordinate on either axis, or a coordinate beyond
    /// `max` on either axis, are skipped. Each key is visited once.
    pub fn visit_neighbors<F: FnMut(K)>(&self, center: BucketCoord, max: BucketCoord, mut f: F) {
        for ix in center.x.saturating_sub(1)..=center.x.saturating_add(1) {
            if ix < 0 || ix > max.x {
                continue;
            }
            for iy in center.y.saturating_sub(1)..=center.y.saturating_add(1) {
                if iy < 0 || iy > max.y {
                    continue;
                }
                if let Some(bucket) = self.buckets.get(&BucketCoord::new(ix, iy)) {
                    for &key in &bucket.keys {
                        f(key);
                    }
                }
            }
        }
    }

    /// Collect the keys [`visit_neighbors`][Self::visit_neighbors] would visit.
    pub fn neighbors(&self, center: BucketCoord, max: BucketCoord) -> impl Iterator<Item = K> + '_ {
        let mut out = Vec::new();
        self.visit_neighbors(center, max, |k| out.push(k));
        out.into_iter()
    }

    /// Iterate over all non-empty buckets. Order is unspecified.
    pub fn buckets(&self) -> impl Iterator<Item = (BucketCoord, &[K])> + '_ {
        self.buckets.iter().map(|(c, b)| (*c, b.keys.as_slice()))
    }

    /// Number of filed keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the grid holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Offsets of bucket boundaries in `[0, extent)` along one axis.
    ///
    /// Useful for drawing a debug overlay of the grid.
    pub fn bucket_lines(&self, extent: i64) -> impl Iterator<Item = i64> + '_ {
        let step = self.bucket_size;
        (0..)
            .map(move |i: i64| i * step)
            .take_while(move |&offset| offset < extent)
    }

    fn remove_from(&mut self, key: K, coord: BucketCoord) -> bool {
        let Some(bucket) = self.buckets.get_mut(&coord) else {
            return false;
        };
        let Some(pos) = bucket.keys.iter().position(|&k| k == key) else {
            return false;
        };
        bucket.keys.swap_remove(pos);
        self.len -= 1;
        if bucket.keys.is_empty() {
            // Dropping empty buckets keeps neighbor scans cheap.
            self.buckets.remove(&coord);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sorted(it: impl Iterator<Item = u32>) -> Vec<u32> {
        let mut v: Vec<u32> = it.collect();
        v.sort_unstable();
        v
    }

    const NO_LIMIT: BucketCoord = BucketCoord::new(i32::MAX, i32::MAX);

    #[test]
    fn bucket_of_uses_floor_division() {
        let grid: BucketGrid<u32> = BucketGrid::new(120);
        assert_eq!(grid.bucket_of(IVec2::new(0, 0)), BucketCoord::new(0, 0));
        assert_eq!(grid.bucket_of(IVec2::new(119, 120)), BucketCoord::new(0, 1));
        assert_eq!(grid.bucket_of(IVec2::new(-1, -120)), BucketCoord::new(-1, -1));
        assert_eq!(grid.bucket_of(IVec2::new(-121, 0)), BucketCoord::new(-2, 0));
    }

    #[test]
    fn bucket_of_saturates() {
        let grid: BucketGrid<u32> = BucketGrid::new(1);
        assert_eq!(
            grid.bucket_of(IVec2::new(i64::MAX, i64::MIN)),
            BucketCoord::new(i32::MAX, i32::MIN)
        );
    }

    #[test]
    fn insert_and_remove_drop_empty_buckets() {
        let mut grid: BucketGrid<u32> = BucketGrid::new(100);
        let c = grid.insert(1, IVec2::new(10, 10));
        grid.insert(2, IVec2::new(20, 20));
        assert_eq!(c, BucketCoord::new(0, 0));
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.bucket_count(), 1);

        assert!(grid.remove(1, IVec2::new(99, 0)));
        assert_eq!(grid.bucket_count(), 1);
        assert!(grid.remove(2, IVec2::new(20, 20)));
        assert_eq!(grid.bucket_count(), 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn remove_with_wrong_anchor_is_a_miss() {
        let mut grid: BucketGrid<u32> = BucketGrid::new(100);
        grid.insert(1, IVec2::new(10, 10));
        assert!(!grid.remove(1, IVec2::new(150, 10)));
        assert!(grid.contains(1, BucketCoord::new(0, 0)));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn relocate_moves_only_across_buckets() {
        let mut grid: BucketGrid<u32> = BucketGrid::new(100);
        grid.insert(7, IVec2::new(10, 10));

        assert!(!grid.relocate(7, IVec2::new(10, 10), IVec2::new(90, 90)));
        assert!(grid.contains(7, BucketCoord::new(0, 0)));

        assert!(grid.relocate(7, IVec2::new(10, 10), IVec2::new(250, 10)));
        assert!(!grid.contains(7, BucketCoord::new(0, 0)));
        assert!(grid.contains(7, BucketCoord::new(2, 0)));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.bucket_count(), 1);
    }

    #[test]
    fn neighbors_cover_three_by_three_block() {
        let mut grid: BucketGrid<u32> = BucketGrid::new(10);
        let mut key = 0;
        for bx in 0..5 {
            for by in 0..5 {
                grid.insert(key, IVec2::new(bx * 10 + 1, by * 10 + 1));
                key += 1;
            }
        }
        // Bucket (2, 2) sees columns and rows 1..=3.
        let hits = sorted(grid.neighbors(BucketCoord::new(2, 2), NO_LIMIT));
        assert_eq!(hits, vec![6, 7, 8, 11, 12, 13, 16, 17, 18]);
    }

    #[test]
    fn neighbors_skip_negative_buckets() {
        let mut grid: BucketGrid<u32> = BucketGrid::new(10);
        grid.insert(1, IVec2::new(-5, 5));
        grid.insert(2, IVec2::new(5, -5));
        grid.insert(3, IVec2::new(5, 5));
        let hits = sorted(grid.neighbors(BucketCoord::new(0, 0), NO_LIMIT));
        assert_eq!(hits, vec![3]);
    }

    #[test]
    fn neighbors_skip_buckets_past_max() {
        let mut grid: BucketGrid<u32> = BucketGrid::new(10);
        grid.insert(1, IVec2::new(25, 5));
        grid.insert(2, IVec2::new(15, 5));
        let max = grid.max_bucket(IVec2::new(19, 19));
        assert_eq!(max, BucketCoord::new(1, 1));
        let hits = sorted(grid.neighbors(BucketCoord::new(1, 0), max));
        assert_eq!(hits, vec![2]);
    }

    #[test]
    fn bucket_lines_stop_before_extent() {
        let grid: BucketGrid<u32> = BucketGrid::new(120);
        let lines: Vec<i64> = grid.bucket_lines(600).collect();
        assert_eq!(lines, vec![0, 120, 240, 360, 480]);
        assert_eq!(grid.bucket_lines(0).count(), 0);
    }

    #[test]
    fn clear_resets_counts() {
        let mut grid: BucketGrid<u32> = BucketGrid::new(10);
        grid.insert(1, IVec2::new(1, 1));
        grid.insert(2, IVec2::new(100, 1));
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.bucket_count(), 0);
        assert_eq!(grid.buckets().count(), 0);
    }
}
