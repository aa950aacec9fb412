//! Balanced 2-D kd-tree construction, parallel at two levels.
//!
//! The tree is built by a recursive median split: each node picks the axis
//! with the greatest coordinate spread over its range, sorts the range by
//! it (skipping the sort when an ancestor already ordered it that way),
//! keeps the median point for itself, and recurses over the disjoint
//! halves. Because sibling ranges never overlap, the recursion fans out
//! lock-free onto a rayon pool, and a coarser group tier can hand whole
//! halves to cooperating participants first.
//!
//! ```rust
//! use parkd::{Dataset, TreeBuilder};
//!
//! let mut data: Dataset<f64> = [(0.0, 5.0), (10.0, 1.0), (20.0, 9.0), (30.0, 2.0)]
//!     .into_iter()
//!     .collect();
//!
//! let tree = TreeBuilder::new().sequential().build(&mut data)?;
//! assert_eq!(tree.cardinality(), 4);
//! assert_eq!(tree.root().point(), parkd::Point::new(20.0, 9.0));
//! # Ok::<(), parkd::ParkdError>(())
//! ```

pub mod builder;
pub mod cluster;
pub mod dataset;
pub mod error;
pub mod report;
pub mod tree;
pub mod types;

mod parallel;
mod partition;

pub use builder::TreeBuilder;
pub use dataset::Dataset;
pub use error::{ParkdError, Result};
pub use tree::{KdTree, Node};
pub use types::{Axis, BuildConfig, Coord, Parallelism, Point, Rank};

pub use cluster::{Assignment, Distributor, LocalGroup, Slot, build_distributed};

pub use report::{BuildTiming, Command, report};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a tree over `data` with the default configuration: task-parallel
/// on the global rayon pool, no group tier.
pub fn build<T: Coord>(data: &mut Dataset<T>) -> Result<KdTree<T>> {
    TreeBuilder::new().build(data)
}

/// Common imports
pub mod prelude {

    pub use crate::{Dataset, KdTree, ParkdError, Result, TreeBuilder, build};

    pub use crate::{Axis, BuildConfig, Parallelism, Point};

    pub use crate::{Command, report};
}
