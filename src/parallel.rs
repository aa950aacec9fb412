//! Task-tier coordinator: fans the partitioner recursion out onto a rayon
//! pool.
//!
//! Each recursive call, once it has placed its median, hands the two
//! disjoint sub-slices to `rayon::join`. The parent's node is complete
//! only when both children return (structured concurrency), but unrelated
//! branches of the tree keep making progress on other workers. No locks or
//! atomics are involved: `split_at_mut` gives each task exclusive
//! ownership of its range, so concurrent sorts over sibling ranges are
//! safe by construction.
//!
//! Below [`BuildConfig::cutoff`] elements the recursion drops back to the
//! sequential partitioner; spawning tasks for tiny ranges costs more than
//! it buys.

use crate::dataset::{sort_by_axis, spread_axis};
use crate::error::Result;
use crate::partition::{build_recursive, median_index};
use crate::tree::Node;
use crate::types::{Axis, BuildConfig, Coord, Parallelism, Point};

/// Run one build pass over `points` under the configured execution mode.
///
/// `inherited` is the axis the range is already sorted by, if any; the
/// group tier passes the coordinator's split axis here so the skip
/// optimization applies across the group boundary.
pub(crate) fn run<T: Coord>(
    points: &mut [Point<T>],
    inherited: Option<Axis>,
    config: &BuildConfig,
) -> Result<Node<T>> {
    debug_assert!(!points.is_empty(), "task tier reached an empty range");
    match config.parallelism {
        Parallelism::Sequential => {
            Ok(build_recursive(points, inherited, config.force_resort))
        }
        Parallelism::Tasks { workers: 0 } => Ok(build_tasks(points, inherited, config)),
        Parallelism::Tasks { workers } => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("parkd-worker-{i}"))
                .build()?;
            log::debug!("task tier running on a dedicated pool of {workers} workers");
            Ok(pool.install(|| build_tasks(points, inherited, config)))
        }
    }
}

fn build_tasks<T: Coord>(
    points: &mut [Point<T>],
    inherited: Option<Axis>,
    config: &BuildConfig,
) -> Node<T> {
    if points.len() <= config.cutoff.max(1) {
        return build_recursive(points, inherited, config.force_resort);
    }

    let axis = spread_axis(points);
    if config.force_resort || Some(axis) != inherited {
        sort_by_axis(points, axis);
    }

    let len = points.len();
    let median = median_index(len);
    let point = points[median];

    let (left_half, rest) = points.split_at_mut(median);
    let right_half = &mut rest[1..];

    let (left, right) = rayon::join(
        || (len > 2).then(|| Box::new(build_tasks(left_half, Some(axis), config))),
        || Box::new(build_tasks(right_half, Some(axis), config)),
    );

    Node {
        axis: Some(axis),
        point,
        left,
        right: Some(right),
        owner: None,
    }
}
