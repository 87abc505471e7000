//! Maze collaborators consumed by the search core.
//!
//! The core only needs adjacency, a goal test and a designated start node.
//! Two representations are provided:
//! - [`AdjacencyMaze`]: an explicit directed graph built from an edge list
//! - [`GridMaze`]: a rectangular grid of walls and open cells, loadable from text

pub mod error;
pub mod generate;
pub mod graph;
pub mod grid;

pub use error::MazeError;
pub use generate::generate_maze;
pub use graph::AdjacencyMaze;
pub use grid::GridMaze;

/// Identifier of a maze node.
pub type NodeId = usize;

/// A graph that can be searched for a goal.
///
/// Implementations are shared by reference between every concurrent search
/// task, hence the `Sync` bound.
pub trait Maze: Sync {
    /// Error raised when the maze cannot answer an adjacency query.
    type Error: std::error::Error + Send + 'static;

    /// The designated start node.
    fn start(&self) -> NodeId;

    /// Nodes reachable in one step from `node`, in order of exploration preference.
    fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>, Self::Error>;

    /// Whether `node` is a goal.
    fn is_goal(&self, node: NodeId) -> bool;
}
