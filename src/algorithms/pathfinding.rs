//! Pathfinding family: four step-instrumented grid searches
//!
//! All four terminate either by visiting the end cell or exhausting their
//! frontier. On success the `previous` chain is replayed backward from the
//! end cell, marking `is_path`; on failure no cell is ever marked
//! `is_path`, which is how "unreachable" is represented; it is not an
//! error.
//!
//! Dijkstra and A* keep their frontier as a linear scan over the fixed
//! 20×35 grid rather than a heap. O(V²) is a documented design choice:
//! at this size the scan is instantaneous and the code stays legible.

use crate::model::grid::{Grid, UNREACHED};
use crate::step::{Cancelled, StepClass, StepContext, StepResult};
use crate::types::PathAlgorithm;
use std::collections::VecDeque;

/// Run one pathfinding algorithm over `grid` to completion or
/// cancellation. Clears per-run scratch state first.
pub fn run(algo: PathAlgorithm, grid: &mut Grid, ctx: &mut StepContext) -> StepResult {
    grid.clear_run_state();
    let found = match algo {
        PathAlgorithm::Dijkstra => dijkstra(grid, ctx)?,
        PathAlgorithm::AStar => a_star(grid, ctx)?,
        PathAlgorithm::Bfs => bfs(grid, ctx)?,
        PathAlgorithm::Dfs => dfs(grid, ctx)?,
    };
    if found {
        replay_path(grid, ctx)?;
    }
    Ok(())
}

/// Manhattan distance between two cells
pub fn manhattan(a: (usize, usize), b: (usize, usize)) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

/// Uniform-weight Dijkstra: each iteration linearly scans the unvisited
/// cells for the minimum distance.
fn dijkstra(grid: &mut Grid, ctx: &mut StepContext) -> Result<bool, Cancelled> {
    let (sr, sc) = grid.start();
    let end = grid.end();
    grid.cell_mut(sr, sc).distance = 0;

    loop {
        let mut best: Option<(usize, usize, u32)> = None;
        for cell in grid.cells() {
            if cell.is_wall || cell.is_visited {
                continue;
            }
            if best.map_or(true, |(_, _, d)| cell.distance < d) {
                best = Some((cell.row, cell.col, cell.distance));
            }
        }
        // a frontier of unreached cells means the rest is walled off
        let Some((r, c, d)) = best.filter(|&(_, _, d)| d < UNREACHED) else {
            return Ok(false);
        };

        grid.cell_mut(r, c).is_visited = true;
        ctx.yield_grid(grid, StepClass::Visit)?;
        if (r, c) == end {
            return Ok(true);
        }

        for (nr, nc) in grid.neighbors(r, c) {
            let cell = grid.cell_mut(nr, nc);
            if d + 1 < cell.distance {
                cell.distance = d + 1;
                cell.previous = Some((r, c));
            }
        }
    }
}

/// A*: open set scored by `distance + manhattan(cell, end)`; the visited
/// flag doubles as the closed set and prevents re-expansion. Relaxation is
/// otherwise identical to Dijkstra.
fn a_star(grid: &mut Grid, ctx: &mut StepContext) -> Result<bool, Cancelled> {
    let start = grid.start();
    let end = grid.end();
    grid.cell_mut(start.0, start.1).distance = 0;

    let mut open = vec![start];
    while !open.is_empty() {
        let mut best_idx = 0;
        let mut best_score = u32::MAX;
        for (idx, &(r, c)) in open.iter().enumerate() {
            let score = grid.cell(r, c).distance.saturating_add(manhattan((r, c), end));
            if score < best_score {
                best_score = score;
                best_idx = idx;
            }
        }
        let (r, c) = open.swap_remove(best_idx);
        if grid.cell(r, c).is_visited {
            continue;
        }

        grid.cell_mut(r, c).is_visited = true;
        ctx.yield_grid(grid, StepClass::Visit)?;
        if (r, c) == end {
            return Ok(true);
        }

        let d = grid.cell(r, c).distance;
        for (nr, nc) in grid.neighbors(r, c) {
            let cell = grid.cell_mut(nr, nc);
            if d + 1 < cell.distance {
                cell.distance = d + 1;
                cell.previous = Some((r, c));
                open.push((nr, nc));
            }
        }
    }
    Ok(false)
}

/// Breadth-first search: FIFO frontier, cells marked visited at enqueue
/// time so no cell is enqueued twice.
fn bfs(grid: &mut Grid, ctx: &mut StepContext) -> Result<bool, Cancelled> {
    let start = grid.start();
    let end = grid.end();
    {
        let cell = grid.cell_mut(start.0, start.1);
        cell.is_visited = true;
        cell.distance = 0;
    }

    let mut queue = VecDeque::from([start]);
    while let Some((r, c)) = queue.pop_front() {
        ctx.yield_grid(grid, StepClass::Visit)?;
        if (r, c) == end {
            return Ok(true);
        }

        let d = grid.cell(r, c).distance;
        for (nr, nc) in grid.neighbors(r, c) {
            let cell = grid.cell_mut(nr, nc);
            cell.is_visited = true;
            cell.distance = d + 1;
            cell.previous = Some((r, c));
            queue.push_back((nr, nc));
        }
    }
    Ok(false)
}

/// Depth-first search: LIFO frontier, cells marked visited at *pop* time.
/// A cell may sit on the stack multiple times; only the first unvisited
/// pop counts. The resulting path is valid but not shortest: plain DFS,
/// kept as the teaching rendition.
fn dfs(grid: &mut Grid, ctx: &mut StepContext) -> Result<bool, Cancelled> {
    let start = grid.start();
    let end = grid.end();
    grid.cell_mut(start.0, start.1).distance = 0;

    let mut stack = vec![start];
    while let Some((r, c)) = stack.pop() {
        if grid.cell(r, c).is_visited {
            continue;
        }
        grid.cell_mut(r, c).is_visited = true;
        ctx.yield_grid(grid, StepClass::Visit)?;
        if (r, c) == end {
            return Ok(true);
        }

        let d = grid.cell(r, c).distance;
        for (nr, nc) in grid.neighbors(r, c) {
            let cell = grid.cell_mut(nr, nc);
            cell.distance = d + 1;
            cell.previous = Some((r, c));
            stack.push((nr, nc));
        }
    }
    Ok(false)
}

/// Walk `previous` pointers backward from the end cell, marking each cell
/// on the chain. Replay pacing is the fixed [`StepClass::PathTrace`]
/// delay.
fn replay_path(grid: &mut Grid, ctx: &mut StepContext) -> StepResult {
    let mut cursor = Some(grid.end());
    while let Some((r, c)) = cursor {
        let cell = grid.cell_mut(r, c);
        cell.is_path = true;
        cursor = cell.previous;
        ctx.yield_grid(grid, StepClass::PathTrace)?;
    }
    Ok(())
}
