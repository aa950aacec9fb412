//! Fluent configuration for a build pass.
//!
//! `TreeBuilder` collects the knobs of both tiers and runs the build:
//! how many task workers, the sequential cutoff, how many group
//! participants, and the diagnostic resort switch.

use crate::cluster::{self, LocalGroup};
use crate::dataset::Dataset;
use crate::error::{ParkdError, Result};
use crate::parallel;
use crate::report::BuildTiming;
use crate::tree::KdTree;
use crate::types::{BuildConfig, Coord, Parallelism};
use std::time::{Duration, Instant};

/// Builder for kd-tree construction.
///
/// The default configuration runs task-parallel on the global rayon pool
/// with a single participant (no group tier).
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    config: BuildConfig,
    processes: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            config: BuildConfig::default(),
            processes: 1,
        }
    }

    /// Run the task tier on a dedicated pool of `n` workers; `0` uses the
    /// global pool.
    pub fn workers(mut self, n: usize) -> Self {
        self.config.parallelism = Parallelism::Tasks { workers: n };
        self
    }

    /// Disable the task tier entirely.
    pub fn sequential(mut self) -> Self {
        self.config.parallelism = Parallelism::Sequential;
        self
    }

    /// Range size below which the task tier recurses inline.
    pub fn cutoff(mut self, n: usize) -> Self {
        self.config.cutoff = n;
        self
    }

    /// Split the build across `n` group participants. Values below 2 keep
    /// the group tier inactive.
    pub fn processes(mut self, n: usize) -> Self {
        self.processes = n;
        self
    }

    /// Sort every range even when already ordered by the chosen axis.
    /// The tree shape must not change; only the build slows down.
    pub fn force_resort(mut self, yes: bool) -> Self {
        self.config.force_resort = yes;
        self
    }

    /// Replace the whole build configuration.
    pub fn config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the tree over `data`.
    pub fn build<T: Coord>(&self, data: &mut Dataset<T>) -> Result<KdTree<T>> {
        if self.processes >= 2 {
            return cluster::build_distributed(data, &LocalGroup, self.processes, &self.config);
        }
        if data.is_empty() {
            return Err(ParkdError::EmptyDataset);
        }
        let root = parallel::run(data.as_mut_slice(), None, &self.config)?;
        Ok(KdTree::new(root))
    }

    /// Build the tree and report how long each phase took.
    ///
    /// `distribution` covers replicating the dataset to the group (zero
    /// when the group tier is inactive); `construction` covers the build
    /// itself.
    pub fn build_timed<T: Coord>(
        &self,
        data: &mut Dataset<T>,
    ) -> Result<(KdTree<T>, BuildTiming)> {
        if self.processes >= 2 {
            if data.is_empty() {
                return Err(ParkdError::EmptyDataset);
            }
            let shipping = Instant::now();
            let replica = data.clone();
            let distribution = shipping.elapsed();

            let building = Instant::now();
            let tree = cluster::build_distributed(
                &replica,
                &LocalGroup,
                self.processes,
                &self.config,
            )?;
            let construction = building.elapsed();
            return Ok((
                tree,
                BuildTiming {
                    construction,
                    distribution,
                },
            ));
        }

        let building = Instant::now();
        let tree = self.build(data)?;
        Ok((
            tree,
            BuildTiming {
                construction: building.elapsed(),
                distribution: Duration::ZERO,
            },
        ))
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
