//! Text export: one hex digit per cell, then entry, exit and the solution string

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::algorithm::resolver::Solution;
use crate::io::error::{Result, file_system_error};
use crate::spatial::grid::MazeGrid;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Uppercase hex digit for a wall mask (`'?'` for values above 15)
pub fn mask_to_hex(mask: u8) -> char {
    HEX_DIGITS
        .get(usize::from(mask))
        .map_or('?', |&digit| char::from(digit))
}

/// Render the grid and solution in the export format
///
/// ```text
/// <hex row 0>
/// ...
/// <hex row height-1>
///
/// <entry row>,<entry col>
/// <exit row>,<exit col>
/// <direction labels>
/// ```
///
/// Nothing follows the direction labels, not even a newline.
pub fn render_maze_text(grid: &MazeGrid, solution: &Solution) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height() + solution.len() + 32);

    for row in grid.masks().rows() {
        out.extend(row.iter().map(|&mask| mask_to_hex(mask)));
        out.push('\n');
    }

    let (entry, exit) = (grid.entry(), grid.exit());
    // Writing to a String cannot fail
    let _ = write!(
        out,
        "\n{},{}\n{},{}\n{}",
        entry.row,
        entry.col,
        exit.row,
        exit.col,
        solution.path_string()
    );
    out
}

/// Write the export text to a file, creating parent directories as needed
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created or the file
/// cannot be written
pub fn write_maze_file(path: &Path, grid: &MazeGrid, solution: &Solution) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    std::fs::write(path, render_maze_text(grid, solution))
        .map_err(|e| file_system_error(path, "write maze", e))?;
    info!(path = %path.display(), "maze written");
    Ok(())
}
