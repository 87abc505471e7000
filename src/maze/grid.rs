//! Rectangular grid maze with 4-neighborhood movement.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::maze::{Maze, MazeError, NodeId};
use crate::parser::{ParsedGrid, parse_maze_string};

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
    Goal,
}

impl Cell {
    pub fn is_passable(self) -> bool {
        !matches!(self, Cell::Wall)
    }
}

/// A maze laid out on a grid. Node ids are `row * width + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMaze {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: NodeId,
}

impl GridMaze {
    /// Build a maze from row-major cells.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        start: NodeId,
    ) -> Result<Self, MazeError> {
        if width == 0 || height == 0 || cells.len() != width * height {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        if start >= cells.len() || !cells[start].is_passable() {
            return Err(MazeError::UnknownNode(start));
        }
        Ok(Self {
            width,
            height,
            cells,
            start,
        })
    }

    /// Parse a maze from text (see [`crate::parser`] for the format).
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let grid = parse_maze_string(text, "<input>".to_string())?;
        Self::from_parsed(grid)
    }

    /// Load a maze file.
    pub fn load(path: &Path) -> Result<Self, MazeError> {
        let text = std::fs::read_to_string(path)?;
        let grid = parse_maze_string(&text, path.display().to_string())?;
        Self::from_parsed(grid)
    }

    fn from_parsed(grid: ParsedGrid) -> Result<Self, MazeError> {
        Self::from_cells(grid.width, grid.height, grid.cells, grid.start)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn node_count(&self) -> usize {
        self.cells.len()
    }

    /// Node id of the cell at `(row, col)`, if inside the grid.
    pub fn node_at(&self, row: usize, col: usize) -> Option<NodeId> {
        (row < self.height && col < self.width).then_some(row * self.width + col)
    }

    /// `(row, col)` of a node.
    pub fn position(&self, node: NodeId) -> Option<(usize, usize)> {
        (node < self.cells.len()).then(|| (node / self.width, node % self.width))
    }

    pub fn cell(&self, node: NodeId) -> Option<Cell> {
        self.cells.get(node).copied()
    }

    /// Number of goal cells.
    pub fn goal_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Goal).count()
    }

    /// Whether `a` and `b` are orthogonally adjacent passable cells.
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).is_ok_and(|n| n.contains(&b))
    }

    /// Render the maze as text, overlaying `path` with `o`.
    ///
    /// The start is always drawn as `S` and goals as `G`.
    pub fn render(&self, path: Option<&[NodeId]>) -> String {
        let on_path: HashSet<NodeId> = path.unwrap_or_default().iter().copied().collect();
        let mut out = String::with_capacity((self.width + 1) * self.height);

        for row in 0..self.height {
            for col in 0..self.width {
                let node = row * self.width + col;
                let c = match self.cells[node] {
                    _ if node == self.start => 'S',
                    Cell::Goal => 'G',
                    Cell::Wall => '#',
                    Cell::Open if on_path.contains(&node) => 'o',
                    Cell::Open => '.',
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for GridMaze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

impl Maze for GridMaze {
    type Error = MazeError;

    fn start(&self) -> NodeId {
        self.start
    }

    /// Passable cells to the right, below, to the left and above, in that order.
    fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>, Self::Error> {
        let (row, col) = self.position(node).ok_or(MazeError::UnknownNode(node))?;

        let candidates = [
            self.node_at(row, col + 1),
            self.node_at(row + 1, col),
            col.checked_sub(1).and_then(|c| self.node_at(row, c)),
            row.checked_sub(1).and_then(|r| self.node_at(r, col)),
        ];

        Ok(candidates
            .into_iter()
            .flatten()
            .filter(|&n| self.cells[n].is_passable())
            .collect())
    }

    fn is_goal(&self, node: NodeId) -> bool {
        self.cells.get(node) == Some(&Cell::Goal)
    }
}
