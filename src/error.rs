//! Error types for kd-tree construction.

use thiserror::Error;

/// Errors that can abort a build.
///
/// The taxonomy is deliberately narrow: the build is a pure, in-memory,
/// single-pass algorithm, so every failure is fatal for the whole tree.
/// Partial trees are never returned.
#[derive(Error, Debug)]
pub enum ParkdError {
    /// The dataset holds no points; there is no tree to build.
    #[error("cannot build a kd-tree from an empty dataset")]
    EmptyDataset,

    /// The dedicated worker pool could not be created.
    #[error("worker pool initialization failed: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// A group participant thread could not be spawned.
    #[error("failed to spawn group worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// The distribution layer failed to deliver a subtree.
    #[error("distribution failed: {0}")]
    Distribution(String),

    /// A reporting command string did not match any known command.
    #[error("unrecognized report command: {0}")]
    UnknownCommand(String),
}

pub type Result<T> = std::result::Result<T, ParkdError>;
