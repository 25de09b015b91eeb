//! Perfect maze carving with Wilson's algorithm
//!
//! Loop-erased random walks from unvisited cells are grafted onto the growing
//! tree until every reachable cell belongs to it. The result is a uniform
//! random spanning tree over the non-reserved cells, rooted at the entry.
//!
//! Reserved cells never appear as walk candidates, so they stay fully walled.

use bitvec::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use crate::algorithm::pool::CellPool;
use crate::io::error::Result;
use crate::spatial::direction::{Coord, Direction};
use crate::spatial::grid::{GridStage, MazeGrid};

/// Statistics gathered while carving
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarveReport {
    /// Random walks started
    pub walks: usize,
    /// Steps taken across all walks, including erased ones
    pub steps: usize,
    /// Loops erased during walks
    pub erased_loops: usize,
    /// Passages opened (tree edges)
    pub passages: usize,
    /// Non-reserved cells cut off from the entry by reserved cells
    pub stranded: usize,
}

/// A finished loop-erased walk: cells from start to the tree, and the moves between them
#[derive(Debug, Default)]
struct Walk {
    cells: Vec<Coord>,
    moves: Vec<Direction>,
}

/// Carve a perfect maze into a bordered grid
///
/// # Errors
///
/// Returns an error if:
/// - The grid is not in the `Bordered` stage
/// - A carving step touches a sealed or reserved wall (internal bug)
pub fn carve<R: Rng>(grid: &mut MazeGrid, rng: &mut R) -> Result<CarveReport> {
    grid.require_stage("carve", &[GridStage::Bordered])?;

    let mut report = CarveReport::default();
    let reachable = grid.entry_region();

    let mut unvisited = CellPool::new(grid.width(), grid.height());
    for coord in grid.coords() {
        if coord == grid.entry() || grid.is_reserved(coord) {
            continue;
        }
        if reachable.get(grid.index_of(coord)).as_deref() == Some(&true) {
            unvisited.insert(coord);
        } else {
            report.stranded += 1;
        }
    }
    if report.stranded > 0 {
        warn!(
            stranded = report.stranded,
            "reserved cells isolate part of the grid, those cells stay walled"
        );
    }

    let mut visited = bitvec![0; grid.cell_count()];
    visited.set(grid.index_of(grid.entry()), true);

    // Position of each cell in the walk being built, reset after every walk
    let mut walk_index: Vec<Option<usize>> = vec![None; grid.cell_count()];

    while let Some(start) = unvisited.choose(rng) {
        let walk = loop_erased_walk(grid, start, &visited, &mut walk_index, rng, &mut report);
        report.walks += 1;

        for &cell in &walk.cells {
            let index = grid.index_of(cell);
            visited.set(index, true);
            unvisited.remove(cell);
            if let Some(slot) = walk_index.get_mut(index) {
                *slot = None;
            }
        }

        for (&cell, &direction) in walk.cells.iter().zip(&walk.moves) {
            grid.open_wall(cell, direction)?;
            report.passages += 1;
        }
    }

    grid.advance("carve", &[GridStage::Bordered], GridStage::Carved)?;
    debug!(
        walks = report.walks,
        steps = report.steps,
        erased_loops = report.erased_loops,
        passages = report.passages,
        "carving finished"
    );
    Ok(report)
}

/// Random walk from `start` until it steps onto the tree, erasing loops on the way
fn loop_erased_walk<R: Rng>(
    grid: &MazeGrid,
    start: Coord,
    visited: &BitSlice,
    walk_index: &mut [Option<usize>],
    rng: &mut R,
    report: &mut CarveReport,
) -> Walk {
    let mut walk = Walk {
        cells: vec![start],
        moves: Vec::new(),
    };
    if let Some(slot) = walk_index.get_mut(grid.index_of(start)) {
        *slot = Some(0);
    }

    let mut current = start;
    loop {
        let candidates: Vec<(Direction, Coord)> = Direction::TRAVERSAL_ORDER
            .iter()
            .filter_map(|&direction| {
                grid.neighbor(current, direction)
                    .filter(|&next| !grid.is_reserved(next))
                    .map(|next| (direction, next))
            })
            .collect();

        // Isolated cell: it joins the tree on its own
        let Some(&(direction, next)) = candidates.choose(rng) else {
            return walk;
        };
        report.steps += 1;

        let next_index = grid.index_of(next);
        if visited.get(next_index).as_deref() == Some(&true) {
            walk.cells.push(next);
            walk.moves.push(direction);
            return walk;
        }

        if let Some(earlier) = walk_index.get(next_index).copied().flatten() {
            for erased in walk.cells.drain(earlier + 1..) {
                if let Some(slot) = walk_index.get_mut(grid.index_of(erased)) {
                    *slot = None;
                }
            }
            walk.moves.truncate(earlier);
            report.erased_loops += 1;
        } else {
            if let Some(slot) = walk_index.get_mut(next_index) {
                *slot = Some(walk.cells.len());
            }
            walk.cells.push(next);
            walk.moves.push(direction);
        }
        current = next;
    }
}
