//! Shared value and configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar coordinate bound.
///
/// Satisfied by the usual numeric types (`f32`, `f64`, integers). `Send +
/// Sync` is required so point slices can cross task and group boundaries.
pub trait Coord:
    num_traits::Num + PartialOrd + Copy + Send + Sync + fmt::Debug + 'static
{
}

impl<T> Coord for T where
    T: num_traits::Num + PartialOrd + Copy + Send + Sync + fmt::Debug + 'static
{
}

/// Identifier of a cooperating participant in the group tier.
pub type Rank = usize;

/// One of the two coordinate axes of the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Numeric index of the axis (X = 0, Y = 1).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// A 2-D point. Immutable once placed in a dataset slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T: Coord> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Coordinate along the given axis.
    pub fn coord(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl<T: Coord> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

impl<T: Coord> From<[T; 2]> for Point<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self::new(x, y)
    }
}

impl<T: fmt::Display> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Task-tier execution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parallelism {
    /// Plain recursion on the calling thread, right child then left.
    Sequential,
    /// Recursive fan-out on a rayon pool. `workers == 0` uses the global
    /// pool; any other value builds a dedicated pool of that size.
    Tasks { workers: usize },
}

impl Default for Parallelism {
    fn default() -> Self {
        Parallelism::Tasks { workers: 0 }
    }
}

/// Range size below which the task tier stops spawning and recurses inline.
pub const DEFAULT_CUTOFF: usize = 1024;

/// Configuration for a single build pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub parallelism: Parallelism,
    /// Sequential cutoff for the task tier (clamped to at least 1).
    pub cutoff: usize,
    /// Re-sort every range even when it is already ordered by the chosen
    /// axis. Diagnostic switch: the resulting tree must be identical, only
    /// slower to build.
    pub force_resort: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            parallelism: Parallelism::default(),
            cutoff: DEFAULT_CUTOFF,
            force_resort: false,
        }
    }
}
