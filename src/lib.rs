//! amazed - fork/join parallel maze search
//!
//! A search starts with one task on the start node. Whenever a task finds
//! more than one unexplored branch it keeps one and forks a sibling task for
//! each of the others; all tasks coordinate through a shared visited set and
//! predecessor forest, and the first task to reach a goal publishes the full
//! path from the start.

pub mod logging;
pub mod maze;
pub mod parser;
pub mod search;

pub use maze::{AdjacencyMaze, GridMaze, Maze, MazeError, NodeId};
pub use search::{SearchConfig, SearchError, SearchOutcome, Solver, search};
