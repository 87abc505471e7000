//! Random maze generation.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::maze::grid::Cell;
use crate::maze::{GridMaze, MazeError};

/// Options for [`generate_maze`].
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Number of rooms per row.
    pub width: usize,
    /// Number of rooms per column.
    pub height: usize,
    /// Seed for the random number generator (None = random seed)
    pub seed: Option<u64>,
    /// Extra walls knocked down after carving, creating loops and therefore
    /// several routes to the goal.
    pub loops: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            width: 20,
            height: 10,
            seed: None,
            loops: 0,
        }
    }
}

impl GenerateOptions {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_loops(mut self, loops: usize) -> Self {
        self.loops = loops;
        self
    }
}

/// Generate a perfect maze of `width x height` rooms.
///
/// Rooms sit on odd grid coordinates, so the resulting grid is
/// `(2 * width + 1) x (2 * height + 1)` cells. The start is the top-left room
/// and the single goal the bottom-right room.
pub fn generate_maze(width: usize, height: usize, seed: Option<u64>) -> Result<GridMaze, MazeError> {
    generate_maze_with(
        &GenerateOptions::default()
            .with_size(width, height)
            .with_seed_option(seed),
    )
}

/// Generate a maze with full control over the options.
pub fn generate_maze_with(options: &GenerateOptions) -> Result<GridMaze, MazeError> {
    let (rooms_w, rooms_h) = (options.width, options.height);
    if rooms_w == 0 || rooms_h == 0 {
        return Err(MazeError::InvalidDimensions {
            width: rooms_w,
            height: rooms_h,
        });
    }

    let mut rng = match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::seed_from_u64(rand::random()),
    };

    let grid_w = 2 * rooms_w + 1;
    let grid_h = 2 * rooms_h + 1;
    let mut cells = vec![Cell::Wall; grid_w * grid_h];
    let cell_of = |room_x: usize, room_y: usize| (2 * room_y + 1) * grid_w + 2 * room_x + 1;

    // Recursive backtracker, iterative to keep large mazes off the call stack
    let mut seen = vec![false; rooms_w * rooms_h];
    let mut stack = vec![(0usize, 0usize)];
    seen[0] = true;
    cells[cell_of(0, 0)] = Cell::Open;

    while let Some(&(x, y)) = stack.last() {
        let mut unvisited: Vec<(usize, usize)> = room_neighbors(x, y, rooms_w, rooms_h)
            .filter(|&(nx, ny)| !seen[ny * rooms_w + nx])
            .collect();

        if unvisited.is_empty() {
            stack.pop();
            continue;
        }

        unvisited.shuffle(&mut rng);
        let (nx, ny) = unvisited[0];
        seen[ny * rooms_w + nx] = true;
        cells[cell_of(nx, ny)] = Cell::Open;
        // The wall between two rooms sits halfway between their grid cells
        cells[(cell_of(x, y) + cell_of(nx, ny)) / 2] = Cell::Open;
        stack.push((nx, ny));
    }

    knock_down_walls(&mut cells, grid_w, grid_h, options.loops, &mut rng);

    let start = cell_of(0, 0);
    let goal = cell_of(rooms_w - 1, rooms_h - 1);
    if goal != start {
        cells[goal] = Cell::Goal;
    }

    GridMaze::from_cells(grid_w, grid_h, cells, start)
}

fn room_neighbors(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, usize)> {
    [
        (x + 1 < width).then(|| (x + 1, y)),
        (y + 1 < height).then(|| (x, y + 1)),
        x.checked_sub(1).map(|nx| (nx, y)),
        y.checked_sub(1).map(|ny| (x, ny)),
    ]
    .into_iter()
    .flatten()
}

/// Open up to `count` interior walls that separate two open rooms.
fn knock_down_walls<R: Rng>(
    cells: &mut [Cell],
    grid_w: usize,
    grid_h: usize,
    count: usize,
    rng: &mut R,
) {
    if count == 0 {
        return;
    }

    let mut candidates: Vec<usize> = Vec::new();
    for row in 1..grid_h - 1 {
        for col in 1..grid_w - 1 {
            let node = row * grid_w + col;
            if cells[node] != Cell::Wall {
                continue;
            }
            let horizontal = row % 2 == 1 && col % 2 == 0;
            let vertical = row % 2 == 0 && col % 2 == 1;
            if horizontal || vertical {
                candidates.push(node);
            }
        }
    }

    candidates.shuffle(rng);
    for node in candidates.into_iter().take(count) {
        cells[node] = Cell::Open;
    }
}
