//! Pathfinding grid
//!
//! A fixed-size grid of cells with exactly one start and one end cell.
//! Walls are user-toggled obstacles; `is_visited`, `is_path`, `distance`,
//! and `previous` are per-run scratch state zeroed before every run.
//!
//! # Invariants
//!
//! - Exactly one cell has `is_start` and exactly one has `is_end`; neither
//!   is ever a wall.
//! - `previous` chains, followed from the end cell, never pass through a
//!   wall (relaxation only ever happens from a non-wall neighbor).

use serde::{Deserialize, Serialize};

/// Grid height used by the visualizer
pub const GRID_ROWS: usize = 20;

/// Grid width used by the visualizer
pub const GRID_COLS: usize = 35;

/// Sentinel distance for cells not yet reached
pub const UNREACHED: u32 = u32::MAX;

/// What a cell toggle should do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellToggle {
    /// Flip the wall flag
    Wall,
    /// Move the start marker here
    Start,
    /// Move the end marker here
    End,
}

/// One cell of the pathfinding grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub is_start: bool,
    pub is_end: bool,
    pub is_wall: bool,
    pub is_visited: bool,
    pub is_path: bool,
    /// Path cost from the start cell, [`UNREACHED`] until relaxed
    pub distance: u32,
    /// Cell this one was reached from
    pub previous: Option<(usize, usize)>,
}

impl GridCell {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            is_start: false,
            is_end: false,
            is_wall: false,
            is_visited: false,
            is_path: false,
            distance: UNREACHED,
            previous: None,
        }
    }
}

/// The pathfinding grid, stored row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<GridCell>,
    start: (usize, usize),
    end: (usize, usize),
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_ROWS, GRID_COLS, (10, 5), (10, 29))
    }
}

impl Grid {
    /// Create a cleared grid with the given start/end markers.
    ///
    /// Markers are clamped in-bounds; if they collide, the end marker is
    /// pushed to the opposite corner.
    pub fn new(rows: usize, cols: usize, start: (usize, usize), end: (usize, usize)) -> Self {
        let rows = rows.max(2);
        let cols = cols.max(2);
        let start = (start.0.min(rows - 1), start.1.min(cols - 1));
        let mut end = (end.0.min(rows - 1), end.1.min(cols - 1));
        if end == start {
            end = if start == (rows - 1, cols - 1) {
                (0, 0)
            } else {
                (rows - 1, cols - 1)
            };
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(GridCell::new(row, col));
            }
        }

        let mut grid = Self {
            rows,
            cols,
            cells,
            start,
            end,
        };
        grid.cell_mut(start.0, start.1).is_start = true;
        grid.cell_mut(end.0, end.1).is_end = true;
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn end(&self) -> (usize, usize) {
        self.end
    }

    pub fn cell(&self, row: usize, col: usize) -> &GridCell {
        &self.cells[row * self.cols + col]
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut GridCell {
        &mut self.cells[row * self.cols + col]
    }

    /// Bounds-checked cell access
    pub fn get(&self, row: usize, col: usize) -> Option<&GridCell> {
        (row < self.rows && col < self.cols).then(|| self.cell(row, col))
    }

    /// Iterate all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    /// Apply a toggle. Out-of-bounds and invariant-breaking toggles are
    /// ignored; returns whether the grid changed.
    pub fn toggle(&mut self, row: usize, col: usize, mode: CellToggle) -> bool {
        if self.get(row, col).is_none() {
            return false;
        }
        match mode {
            CellToggle::Wall => {
                let cell = self.cell_mut(row, col);
                if cell.is_start || cell.is_end {
                    return false;
                }
                cell.is_wall = !cell.is_wall;
                true
            }
            CellToggle::Start => {
                let cell = self.cell(row, col);
                if cell.is_wall || cell.is_end {
                    return false;
                }
                let (or, oc) = self.start;
                self.cell_mut(or, oc).is_start = false;
                self.cell_mut(row, col).is_start = true;
                self.start = (row, col);
                true
            }
            CellToggle::End => {
                let cell = self.cell(row, col);
                if cell.is_wall || cell.is_start {
                    return false;
                }
                let (or, oc) = self.end;
                self.cell_mut(or, oc).is_end = false;
                self.cell_mut(row, col).is_end = true;
                self.end = (row, col);
                true
            }
        }
    }

    /// Zero all per-run state, keeping walls and markers
    pub fn clear_run_state(&mut self) {
        for cell in &mut self.cells {
            cell.is_visited = false;
            cell.is_path = false;
            cell.distance = UNREACHED;
            cell.previous = None;
        }
    }

    /// Orthogonal neighbors that are in-bounds, not walls, and not yet
    /// visited
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push((row - 1, col));
        }
        if row + 1 < self.rows {
            out.push((row + 1, col));
        }
        if col > 0 {
            out.push((row, col - 1));
        }
        if col + 1 < self.cols {
            out.push((row, col + 1));
        }
        out.retain(|&(r, c)| {
            let cell = self.cell(r, c);
            !cell.is_wall && !cell.is_visited
        });
        out
    }

    /// Number of cells currently marked as part of the found path
    pub fn path_len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_path).count()
    }

    /// Number of cells visited by the last run
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_visited).count()
    }
}
