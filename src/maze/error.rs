//! Errors raised while loading or querying a maze.

use thiserror::Error;

use crate::maze::NodeId;
use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum MazeError {
    /// The maze file could not be read.
    #[error("failed to read maze file: {0}")]
    Io(#[from] std::io::Error),

    /// The maze text is malformed.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// A node outside the maze was queried.
    #[error("node {0} is not part of the maze")]
    UnknownNode(NodeId),

    /// Grid dimensions do not describe a usable maze.
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}
