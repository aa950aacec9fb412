//! Group-tier coordinator: splits a build across cooperating participants.
//!
//! The coarse tier mirrors how the fine tier works, one level up: the
//! coordinating participant picks the split axis for the full range, sorts
//! it, keeps the median for the root, and ships each half to the sub-group
//! of ranks that owns it. Each participant builds its half with the task
//! tier (or halves again, while its sub-group has at least two ranks) and
//! hands the finished subtree back; the coordinator attaches it into the
//! matching child slot by plain ownership transfer. Halves never overlap,
//! so no synchronization beyond subtree delivery is needed.
//!
//! The transport is a collaborator behind the [`Distributor`] seam.
//! [`LocalGroup`] is the provided implementation: ranks are worker threads,
//! each receiving an owned copy of its half (replication by message
//! passing) and delivering its subtree over a channel. A different
//! transport can be substituted without touching the coordinator.

use crate::dataset::{Dataset, sort_by_axis, spread_axis};
use crate::error::{ParkdError, Result};
use crate::parallel;
use crate::partition::median_index;
use crate::tree::{KdTree, Node};
use crate::types::{Axis, BuildConfig, Coord, Point, Rank};
use std::ops::Range;
use std::sync::mpsc;
use std::thread;

/// Child slot a shipped half belongs to; the attachment token of the
/// distribution contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Left,
    Right,
}

/// What one side of a split receives from the distribution layer: the half
/// it must build, the axis that half is already sorted by, the slot its
/// finished subtree fills, and the sub-group of ranks sharing the work.
#[derive(Debug)]
pub struct Assignment<T> {
    pub slot: Slot,
    pub points: Vec<Point<T>>,
    pub sorted_by: Option<Axis>,
    pub ranks: Range<Rank>,
}

/// Boundary to the distribution layer.
///
/// `exchange` ships both halves of a split to the participant groups that
/// own them, runs `build` on each participant, and returns the completed
/// subtrees in `(left, right)` order. Transport failures are fatal for the
/// whole build; there is no partial-result path.
pub trait Distributor<T: Coord>: Sync {
    fn exchange(
        &self,
        left: Assignment<T>,
        right: Assignment<T>,
        build: &(dyn Fn(Assignment<T>) -> Result<Node<T>> + Sync),
    ) -> Result<(Node<T>, Node<T>)>;
}

/// Thread-backed participant group.
///
/// Each exchange keeps the left half on the calling participant and spawns
/// a worker thread for the right one, handing it an owned copy of its
/// points; the worker returns its subtree over an `mpsc` channel. Groups
/// of four or more ranks halve recursively through nested exchanges.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalGroup;

impl<T: Coord> Distributor<T> for LocalGroup {
    fn exchange(
        &self,
        left: Assignment<T>,
        right: Assignment<T>,
        build: &(dyn Fn(Assignment<T>) -> Result<Node<T>> + Sync),
    ) -> Result<(Node<T>, Node<T>)> {
        debug_assert_eq!(left.slot, Slot::Left);
        debug_assert_eq!(right.slot, Slot::Right);

        let worker_rank = right.ranks.start;
        let (tx, rx) = mpsc::channel();

        thread::scope(|scope| {
            let _worker = thread::Builder::new()
                .name(format!("parkd-rank-{worker_rank}"))
                .spawn_scoped(scope, move || {
                    // The receiver only disappears if the coordinator
                    // already failed; the result is then irrelevant.
                    let _ = tx.send(build(right));
                })?;

            let left_tree = build(left)?;
            let right_tree = rx
                .recv()
                .map_err(|_| {
                    ParkdError::Distribution(format!(
                        "rank {worker_rank} terminated before delivering its subtree"
                    ))
                })??;
            Ok((left_tree, right_tree))
        })
    }
}

/// Build a tree with the coarse tier active, splitting the dataset across
/// `processes` participants of `group`.
///
/// The dataset is read but not reordered by the caller's copy; each
/// participant works on the replicated half it receives. With fewer than
/// two participants the build degenerates to the task tier and no owner
/// tags are assigned.
pub fn build_distributed<T: Coord, D: Distributor<T>>(
    data: &Dataset<T>,
    group: &D,
    processes: usize,
    config: &BuildConfig,
) -> Result<KdTree<T>> {
    if data.is_empty() {
        return Err(ParkdError::EmptyDataset);
    }
    let mut points = data.as_slice().to_vec();
    if processes < 2 {
        let root = parallel::run(&mut points, None, config)?;
        return Ok(KdTree::new(root));
    }
    log::debug!(
        "group tier splitting {} points across {processes} ranks",
        points.len()
    );
    let root = subtree_build(group, config, points, None, 0..processes)?;
    Ok(KdTree::new(root))
}

fn subtree_build<T: Coord, D: Distributor<T>>(
    group: &D,
    config: &BuildConfig,
    mut points: Vec<Point<T>>,
    sorted_by: Option<Axis>,
    ranks: Range<Rank>,
) -> Result<Node<T>> {
    let nranks = ranks.len();

    // A lone rank, or a range too small to split usefully, builds its
    // whole assignment with the task tier.
    if nranks < 2 || points.len() < 4 {
        let mut node = parallel::run(&mut points, sorted_by, config)?;
        node.tag_owner(ranks.start);
        return Ok(node);
    }

    let axis = spread_axis(&points);
    if config.force_resort || Some(axis) != sorted_by {
        sort_by_axis(&mut points, axis);
    }

    let median = median_index(points.len());
    let point = points[median];
    let right_points = points.split_off(median + 1);
    points.truncate(median);

    // The coordinator's sub-group keeps the left half, including itself.
    let keep = nranks - nranks / 2;
    let left_ranks = ranks.start..ranks.start + keep;
    let right_ranks = ranks.start + keep..ranks.end;

    let left = Assignment {
        slot: Slot::Left,
        points,
        sorted_by: Some(axis),
        ranks: left_ranks,
    };
    let right = Assignment {
        slot: Slot::Right,
        points: right_points,
        sorted_by: Some(axis),
        ranks: right_ranks,
    };

    let (left_node, right_node) = group.exchange(left, right, &|a: Assignment<T>| {
        subtree_build(group, config, a.points, a.sorted_by, a.ranks)
    })?;

    Ok(Node {
        axis: Some(axis),
        point,
        left: Some(Box::new(left_node)),
        right: Some(Box::new(right_node)),
        owner: Some(ranks.start),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Parallelism;

    fn scrambled(n: usize) -> Dataset<f64> {
        (0..n)
            .map(|i| {
                let i = i as f64;
                (i * 19.0 % 103.0, i * 31.0 % 97.0)
            })
            .collect()
    }

    fn sequential_config() -> BuildConfig {
        BuildConfig {
            parallelism: Parallelism::Sequential,
            ..BuildConfig::default()
        }
    }

    #[test]
    fn two_ranks_match_sequential_shape() {
        let data = scrambled(200);
        let config = sequential_config();
        let reference = build_distributed(&data, &LocalGroup, 1, &config).unwrap();
        let grouped = build_distributed(&data, &LocalGroup, 2, &config).unwrap();
        assert!(reference.same_shape(&grouped));
        assert_eq!(grouped.cardinality(), 200);
    }

    #[test]
    fn four_ranks_match_sequential_shape() {
        let data = scrambled(333);
        let config = sequential_config();
        let reference = build_distributed(&data, &LocalGroup, 1, &config).unwrap();
        let grouped = build_distributed(&data, &LocalGroup, 4, &config).unwrap();
        assert!(reference.same_shape(&grouped));
    }

    #[test]
    fn ranks_are_stamped_on_their_subtrees() {
        let data = scrambled(64);
        let tree =
            build_distributed(&data, &LocalGroup, 4, &sequential_config()).unwrap();

        let mut owners = Vec::new();
        tree.root().for_each(&mut |node| {
            owners.push(node.owner().expect("every node owned"));
        });
        owners.sort_unstable();
        owners.dedup();
        assert_eq!(owners, vec![0, 1, 2, 3]);

        // Root belongs to the coordinating rank.
        assert_eq!(tree.root().owner(), Some(0));
    }

    #[test]
    fn single_rank_leaves_nodes_untagged() {
        let data = scrambled(32);
        let tree =
            build_distributed(&data, &LocalGroup, 1, &sequential_config()).unwrap();
        tree.root().for_each(&mut |node| {
            assert_eq!(node.owner(), None);
        });
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let data = Dataset::<f64>::from_points(Vec::new());
        let err = build_distributed(&data, &LocalGroup, 2, &sequential_config())
            .unwrap_err();
        assert!(matches!(err, ParkdError::EmptyDataset));
    }

    #[test]
    fn tiny_dataset_with_many_ranks_builds_locally() {
        let data = scrambled(3);
        let tree =
            build_distributed(&data, &LocalGroup, 8, &sequential_config()).unwrap();
        assert_eq!(tree.cardinality(), 3);
        assert_eq!(tree.root().owner(), Some(0));
    }
}
