//! Cycle introduction for non-perfect mazes
//!
//! Removes roughly one wall per hundred cells from a carved grid. Each
//! candidate cell gets a single chance: up to four directions are tried in
//! random order, and the cell leaves the pool whether or not a wall fell.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::algorithm::pool::CellPool;
use crate::io::configuration::LOOP_BREAK_DIVISOR;
use crate::io::error::Result;
use crate::spatial::direction::{Coord, Direction};
use crate::spatial::grid::{GridStage, MazeGrid};

/// Outcome of a loop-breaking pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopReport {
    /// Walls the pass aimed to remove
    pub target: usize,
    /// Walls actually removed
    pub broken: usize,
}

/// Number of walls a loop-breaking pass aims to remove
pub const fn walls_to_break(width: usize, height: usize) -> usize {
    let scaled = width * height / LOOP_BREAK_DIVISOR;
    if scaled > 1 { scaled } else { 1 }
}

/// Remove extra walls from a carved grid to create cycles
///
/// No-op (but still advances the stage) for single-row or single-column grids.
///
/// # Errors
///
/// Returns an error if:
/// - The grid is not in the `Carved` stage
/// - A wall removal touches a sealed or reserved wall (internal bug)
pub fn break_walls<R: Rng>(grid: &mut MazeGrid, rng: &mut R) -> Result<LoopReport> {
    grid.require_stage("break walls", &[GridStage::Carved])?;

    let mut report = LoopReport {
        target: walls_to_break(grid.width(), grid.height()),
        broken: 0,
    };

    if grid.width() > 1 && grid.height() > 1 {
        let mut candidates = CellPool::from_cells(
            grid.width(),
            grid.height(),
            grid.coords()
                .filter(|&coord| !grid.is_reserved(coord))
                .filter(|&coord| grid.mask(coord).is_ok_and(|mask| mask != 0))
                .collect::<Vec<_>>(),
        );

        while report.broken < report.target {
            let Some(cell) = candidates.choose(rng) else {
                break;
            };
            if try_break_one(grid, cell, rng)? {
                report.broken += 1;
            }
            candidates.remove(cell);
        }
    }

    grid.advance("break walls", &[GridStage::Carved], GridStage::LoopBroken)?;
    debug!(
        target = report.target,
        broken = report.broken,
        "loop breaking finished"
    );
    Ok(report)
}

// Returns whether a wall was removed around `cell`
fn try_break_one<R: Rng>(grid: &mut MazeGrid, cell: Coord, rng: &mut R) -> Result<bool> {
    let mut directions = Direction::TRAVERSAL_ORDER;
    directions.shuffle(rng);

    for direction in directions {
        let Some(next) = grid.neighbor(cell, direction) else {
            continue;
        };
        if grid.is_reserved(next) || !grid.wall_present(cell, direction)? {
            continue;
        }
        grid.open_wall(cell, direction)?;
        return Ok(true);
    }
    Ok(false)
}
