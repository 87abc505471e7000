//! Fork/join parallel depth-first search.
//!
//! # Architecture
//!
//! The parallel search system consists of:
//! - **Shared state** ([`SearchState`]): visited set, predecessor forest,
//!   goal flag and winning path, all mutated through atomic claim operations
//! - **Search tasks** ([`SearchTask`]): depth-first explorers with a private
//!   frontier that fork one sibling per extra branch and join them in spawn order
//! - A **scheduler** ([`Scheduler`]) providing fork/join scopes, backed by a
//!   rayon work-stealing pool or run inline
//! - A **coordinator** ([`Solver`]) that creates the state per search, runs
//!   the root task and gathers statistics
//!
//! # Example
//!
//! ```
//! use amazed::maze::AdjacencyMaze;
//! use amazed::search::{SearchConfig, Solver};
//!
//! let maze = AdjacencyMaze::from_edges(0, &[(0, 1), (0, 2), (1, 3)], &[3]);
//! let solver = Solver::new(&maze, SearchConfig::default().with_workers(2)).unwrap();
//!
//! assert_eq!(solver.search(0).unwrap(), Some(vec![0, 1, 3]));
//! ```

pub mod channel;
pub mod coordinator;
pub mod scheduler;
pub mod state;
pub mod task;

pub use channel::{ChannelObserver, EventSummary, SearchEvent, event_channel};
pub use coordinator::{Solver, search};
pub use scheduler::{InlineScheduler, PoolScheduler, Scheduler, TaskScope};
pub use state::SearchState;
pub use task::{SearchContext, SearchTask, TaskResult};
