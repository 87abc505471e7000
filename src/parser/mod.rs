//! Text parser for grid mazes
//!
//! One line per grid row, one character per cell:
//! - `#` or `*`: wall
//! - `.` or space: open cell
//! - `S` or `@`: the start cell (exactly one), itself open
//! - `G` or `$`: a goal cell (any number, including none)
//!
//! Lines whose first non-blank character is `;` are comments. Rows shorter
//! than the widest row are padded with walls; trailing blank lines are ignored.

use std::fmt;

use crate::maze::NodeId;
use crate::maze::grid::Cell;

/// Parse error with location information
#[derive(Debug, Clone)]
pub struct ParseError {
    pub line_number: usize,
    pub column: Option<usize>,
    pub message: String,
    pub line_content: String,
}

impl ParseError {
    pub fn new(
        line_number: usize,
        message: impl Into<String>,
        line_content: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            column: None,
            message: message.into(),
            line_content: line_content.into(),
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(col) = self.column {
            write!(
                f,
                "line {}, column {}: {}\n  | {}\n  | {}^",
                self.line_number,
                col,
                self.message,
                self.line_content,
                " ".repeat(col.saturating_sub(1))
            )
        } else {
            write!(
                f,
                "line {}: {}\n  | {}",
                self.line_number, self.message, self.line_content
            )
        }
    }
}

impl std::error::Error for ParseError {}

/// A grid maze as read from text, before validation into a `GridMaze`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGrid {
    pub width: usize,
    pub height: usize,
    /// Row-major cells, `width * height` long.
    pub cells: Vec<Cell>,
    pub start: NodeId,
}

/// Parse a single cell character.
pub fn parse_cell(c: char) -> Result<Cell, String> {
    match c {
        '#' | '*' => Ok(Cell::Wall),
        '.' | ' ' | 'S' | '@' => Ok(Cell::Open),
        'G' | '$' => Ok(Cell::Goal),
        _ => Err(format!("unknown maze cell '{}'", c)),
    }
}

fn is_start(c: char) -> bool {
    matches!(c, 'S' | '@')
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(';')
}

/// Parse maze text into a grid
pub fn parse_maze_string(content: &str, source_name: String) -> Result<ParsedGrid, ParseError> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut start: Option<(usize, usize)> = None;

    for (line_num, line) in content.lines().enumerate() {
        let line_number = line_num + 1; // 1-indexed

        if is_comment(line) {
            continue;
        }

        let mut row = Vec::with_capacity(line.len());
        for (col, c) in line.chars().enumerate() {
            let cell = parse_cell(c)
                .map_err(|msg| ParseError::new(line_number, msg, line).with_column(col + 1))?;

            if is_start(c) {
                if start.is_some() {
                    return Err(
                        ParseError::new(line_number, "maze has more than one start", line)
                            .with_column(col + 1),
                    );
                }
                start = Some((rows.len(), col));
            }
            row.push(cell);
        }
        rows.push(row);
    }

    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let height = rows.len();
    if width == 0 || height == 0 {
        return Err(ParseError::new(0, "maze is empty", source_name));
    }

    let (start_row, start_col) =
        start.ok_or_else(|| ParseError::new(0, "maze has no start cell", source_name))?;

    let mut cells = Vec::with_capacity(width * height);
    for mut row in rows {
        row.resize(width, Cell::Wall);
        cells.extend(row);
    }

    Ok(ParsedGrid {
        width,
        height,
        cells,
        start: start_row * width + start_col,
    })
}
