//! The point container the partitioner works over.
//!
//! A [`Dataset`] is an indexable, mutable, fixed-cardinality sequence of
//! points. During a build it is borrowed mutably and its entries are
//! reordered in place by axis-wise sorts over sub-ranges; it is never
//! resized. Range arguments on the public interface are inclusive
//! `[lo, hi]` index pairs, matching how the recursion carves the container.

use crate::types::{Axis, Coord, Point};
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

#[cfg(feature = "synthetic")]
use rand::distr::uniform::SampleUniform;
#[cfg(feature = "synthetic")]
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Ordered collection of 2-D points with the axis helpers the tree build
/// needs: spread inspection and in-place sorting over index ranges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset<T> {
    points: Vec<Point<T>>,
}

impl<T: Coord> Dataset<T> {
    pub fn from_points(points: Vec<Point<T>>) -> Self {
        Self { points }
    }

    /// Number of points held.
    pub fn cardinality(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point<T>> {
        self.points.get(index).copied()
    }

    /// Overwrite the point at `index`.
    pub fn set(&mut self, index: usize, point: Point<T>) {
        self.points[index] = point;
    }

    pub fn as_slice(&self) -> &[Point<T>] {
        &self.points
    }

    pub fn as_mut_slice(&mut self) -> &mut [Point<T>] {
        &mut self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point<T>> {
        self.points.iter()
    }

    pub fn into_points(self) -> Vec<Point<T>> {
        self.points
    }

    /// Axis with the greatest coordinate range over the inclusive index
    /// range `[lo, hi]`. Equal spreads resolve to X.
    pub fn most_spreaded(&self, lo: usize, hi: usize) -> Axis {
        spread_axis(&self.points[lo..=hi])
    }

    /// Sort the inclusive index range `[lo, hi]` in place by the given
    /// axis coordinate.
    pub fn sort(&mut self, axis: Axis, lo: usize, hi: usize) {
        sort_by_axis(&mut self.points[lo..=hi], axis);
    }
}

impl<T: Coord> Index<usize> for Dataset<T> {
    type Output = Point<T>;

    fn index(&self, index: usize) -> &Point<T> {
        &self.points[index]
    }
}

impl<T: Coord> IndexMut<usize> for Dataset<T> {
    fn index_mut(&mut self, index: usize) -> &mut Point<T> {
        &mut self.points[index]
    }
}

impl<T: Coord> From<Vec<Point<T>>> for Dataset<T> {
    fn from(points: Vec<Point<T>>) -> Self {
        Self::from_points(points)
    }
}

impl<T: Coord> FromIterator<Point<T>> for Dataset<T> {
    fn from_iter<I: IntoIterator<Item = Point<T>>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

impl<T: Coord> FromIterator<(T, T)> for Dataset<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        iter.into_iter().map(Point::from).collect()
    }
}

#[cfg(feature = "synthetic")]
impl<T: Coord + SampleUniform> Dataset<T> {
    /// Synthetic dataset: `n` points with both coordinates drawn uniformly
    /// from `range`, deterministic per `seed`.
    pub fn uniform(n: usize, range: std::ops::Range<T>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                Point::new(
                    rng.random_range(range.clone()),
                    rng.random_range(range.clone()),
                )
            })
            .collect()
    }
}

/// Axis with the greatest coordinate range over `points`. Ties go to X.
pub(crate) fn spread_axis<T: Coord>(points: &[Point<T>]) -> Axis {
    debug_assert!(!points.is_empty(), "spread of an empty range");
    let first = points[0];
    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_y, mut max_y) = (first.y, first.y);
    for p in &points[1..] {
        if p.x < min_x {
            min_x = p.x;
        } else if p.x > max_x {
            max_x = p.x;
        }
        if p.y < min_y {
            min_y = p.y;
        } else if p.y > max_y {
            max_y = p.y;
        }
    }
    if max_y - min_y > max_x - min_x {
        Axis::Y
    } else {
        Axis::X
    }
}

/// In-place sort of `points` by the coordinate on `axis`.
///
/// Entries equal on `axis` fall back to the other axis, so the order is a
/// deterministic total order; this keeps sequential, task-parallel, and
/// distributed builds byte-for-byte comparable. Non-comparable values
/// (NaN) are treated as equal, as elsewhere in the crate.
pub(crate) fn sort_by_axis<T: Coord>(points: &mut [Point<T>], axis: Axis) {
    points.sort_unstable_by(|a, b| {
        axis_cmp(a.coord(axis), b.coord(axis))
            .then_with(|| axis_cmp(a.coord(axis.other()), b.coord(axis.other())))
    });
}

fn axis_cmp<T: PartialOrd>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
