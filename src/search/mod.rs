//! Maze search
//!
//! - [`parallel`]: fork/join depth-first search over shared claim-based state
//! - [`path`]: path reconstruction from a predecessor forest
//! - [`observer`]: hooks for visualizing a running search

pub mod config;
pub mod observer;
pub mod parallel;
pub mod path;
pub mod result;

pub use config::{SchedulerKind, SearchConfig};
pub use observer::{NoopObserver, SearchObserver, TaskId};
pub use parallel::{ChannelObserver, SearchEvent, Solver, event_channel, search};
pub use result::{SearchOutcome, SearchStatistics};

use thiserror::Error;

/// Errors raised while setting up a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
