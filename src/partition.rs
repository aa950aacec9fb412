//! The partitioner: recursive median-split construction over a point range.
//!
//! Given a non-empty slice of a dataset, the partitioner picks the axis
//! with the greatest coordinate spread, sorts the slice by it when
//! necessary, takes the median as the node's own point, and recurses over
//! the two remaining sub-slices. Sub-ranges are exclusive `&mut` slices,
//! so disjointness of sibling ranges is enforced by the borrow checker
//! rather than by index bookkeeping.
//!
//! The single most important performance decision lives in step two: when
//! the chosen axis equals the axis an ancestor already sorted this range
//! by, the re-sort is skipped. Any sub-range of a sorted range is itself
//! sorted, and the median split performs no reordering, so the order is
//! still valid. Sorting unconditionally would not change the tree shape
//! but would push the build from O(n log n) toward O(n log^2 n).

use crate::dataset::{sort_by_axis, spread_axis};
use crate::tree::Node;
use crate::types::{Axis, Coord, Point};

/// Median position for a range of `len` elements.
///
/// Biased toward the lower half for `len == 2`, so both children always
/// cover a strictly smaller range and the recursion terminates.
pub(crate) fn median_index(len: usize) -> usize {
    debug_assert!(len >= 2, "median of a non-splittable range");
    len / 2 - usize::from(len < 3)
}

/// Build the subtree covering exactly `points`.
///
/// `inherited` is the axis an ancestor last sorted this range by, if any.
/// `force_resort` disables the redundant-sort skip (diagnostics only).
pub(crate) fn build_recursive<T: Coord>(
    points: &mut [Point<T>],
    inherited: Option<Axis>,
    force_resort: bool,
) -> Node<T> {
    debug_assert!(!points.is_empty(), "partitioner reached an empty range");

    if points.len() == 1 {
        return Node {
            axis: None,
            point: points[0],
            left: None,
            right: None,
            owner: None,
        };
    }

    let axis = spread_axis(points);
    if force_resort || Some(axis) != inherited {
        sort_by_axis(points, axis);
    }

    let len = points.len();
    let median = median_index(len);
    let point = points[median];

    // The median element stays with this node; everything below it goes
    // left, everything above it goes right.
    let (left_half, rest) = points.split_at_mut(median);
    let right_half = &mut rest[1..];

    let right = Box::new(build_recursive(right_half, Some(axis), force_resort));
    let left =
        (len > 2).then(|| Box::new(build_recursive(left_half, Some(axis), force_resort)));

    Node {
        axis: Some(axis),
        point,
        left,
        right: Some(right),
        owner: None,
    }
}
