//! Centered "42" emblem carved out of the maze as reserved cells

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::io::configuration::{EMBLEM_MIN_HEIGHT, EMBLEM_MIN_WIDTH};
use crate::io::error::MazeError;
use crate::spatial::direction::Coord;
use crate::spatial::grid::MazeGrid;

/// Outcome of an emblem placement attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmblemPlacement {
    /// Emblem reserved, with the number of cells it covers
    Placed(usize),
    /// Grid smaller than the emblem footprint
    TooSmall,
    /// Emblem overlapped entry or exit and was discarded
    Conflict,
    /// Placement not requested
    Disabled,
}

impl EmblemPlacement {
    /// Whether reserved cells were actually added
    pub const fn is_placed(self) -> bool {
        matches!(self, Self::Placed(_))
    }
}

/// Cells covered by the emblem for a grid of the given size
///
/// Returns `None` when the grid is below the minimum footprint.
pub fn emblem_cells(width: usize, height: usize) -> Option<BTreeSet<Coord>> {
    if width < EMBLEM_MIN_WIDTH || height < EMBLEM_MIN_HEIGHT {
        return None;
    }

    let mid_row = height / 2;
    let mid_col = width / 2;
    let mut cells = BTreeSet::new();

    // 4: left stroke down from the top, crossbar, full right stroke
    cells.insert(Coord::new(mid_row, mid_col - 2));
    for i in 0..3 {
        cells.insert(Coord::new(mid_row - i, mid_col - 3));
        cells.insert(Coord::new(mid_row + i, mid_col - 1));
    }

    // 2: top bar, upper-right stroke, middle bar, lower-left stroke, bottom bar
    cells.insert(Coord::new(mid_row, mid_col + 2));
    for i in 0..3 {
        cells.insert(Coord::new(mid_row - i, mid_col + 3));
        cells.insert(Coord::new(mid_row + i, mid_col + 1));
        cells.insert(Coord::new(mid_row + 2, mid_col + 1 + i));
        cells.insert(Coord::new(mid_row - 2, mid_col + 1 + i));
    }

    Some(cells)
}

/// Reserve the emblem on a freshly bordered grid
///
/// Both failure modes are non-fatal: they are logged and the grid is left
/// without reserved cells.
///
/// # Errors
///
/// Returns an error only for conditions other than size and entry/exit
/// conflicts, such as a grid that is already carved
pub fn place_emblem(grid: &mut MazeGrid) -> crate::io::error::Result<EmblemPlacement> {
    let Some(cells) = emblem_cells(grid.width(), grid.height()) else {
        warn!(
            width = grid.width(),
            height = grid.height(),
            "maze too small for the emblem, skipping placement"
        );
        return Ok(EmblemPlacement::TooSmall);
    };

    let count = cells.len();
    match grid.reserve(cells) {
        Ok(()) => {
            debug!(cells = count, "emblem placed");
            Ok(EmblemPlacement::Placed(count))
        }
        Err(MazeError::ReservationConflict { coord }) => {
            warn!(%coord, "entry or exit lies on the emblem, placement discarded");
            Ok(EmblemPlacement::Conflict)
        }
        Err(other) => Err(other),
    }
}
