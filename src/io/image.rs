//! PNG rendering of a finished maze with optional solution overlay
//!
//! Rendering reads only the public grid surface (masks, reserved cells,
//! entry/exit) and the solution's cell list. All drawing parameters travel
//! in a [`RenderContext`] passed to the render functions.

use std::path::Path;

use bitvec::prelude::*;
use image::{Rgba, RgbaImage};

use crate::algorithm::resolver::Solution;
use crate::io::configuration::{
    CELL_PIXELS, ENTRY_COLOR, EXIT_COLOR, FLOOR_COLOR, PATH_COLOR, RESERVED_COLOR, WALL_COLOR,
    WALL_PIXELS,
};
use crate::io::error::{MazeError, Result, file_system_error};
use crate::spatial::direction::{Coord, Direction};
use crate::spatial::grid::MazeGrid;

/// Drawing parameters for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Edge length of one cell in pixels, walls included
    pub cell_pixels: u32,
    /// Wall thickness in pixels
    pub wall_pixels: u32,
    /// Whether solution cells are highlighted
    pub show_path: bool,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            cell_pixels: CELL_PIXELS,
            wall_pixels: WALL_PIXELS,
            show_path: true,
        }
    }
}

impl RenderContext {
    /// Image dimensions (width, height) in pixels for a grid
    pub fn image_size(&self, grid: &MazeGrid) -> (u32, u32) {
        (
            grid.width() as u32 * self.cell_pixels + self.wall_pixels,
            grid.height() as u32 * self.cell_pixels + self.wall_pixels,
        )
    }
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: [u8; 4]) {
    let x_end = (x + width).min(img.width());
    let y_end = (y + height).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, Rgba(color));
        }
    }
}

fn cell_color(grid: &MazeGrid, on_path: bool, coord: Coord) -> [u8; 4] {
    if coord == grid.entry() {
        ENTRY_COLOR
    } else if coord == grid.exit() {
        EXIT_COLOR
    } else if grid.is_reserved(coord) {
        RESERVED_COLOR
    } else if on_path {
        PATH_COLOR
    } else {
        FLOOR_COLOR
    }
}

/// Draw the maze into a new image
///
/// Each cell occupies a `cell_pixels` square whose top and left edges hold
/// its north and west walls; the final row and column of walls are added
/// along the bottom and right.
pub fn render_maze(grid: &MazeGrid, solution: Option<&Solution>, ctx: &RenderContext) -> RgbaImage {
    let (width, height) = ctx.image_size(grid);
    let mut img = RgbaImage::from_pixel(width, height, Rgba(FLOOR_COLOR));

    let mut on_path = bitvec![0; grid.cell_count()];
    if let Some(solution) = solution.filter(|_| ctx.show_path) {
        for &cell in &solution.cells {
            if grid.bounds_check(cell) {
                on_path.set(grid.index_of(cell), true);
            }
        }
    }

    let cell = ctx.cell_pixels;
    let wall = ctx.wall_pixels;

    for coord in grid.coords() {
        let x = coord.col as u32 * cell;
        let y = coord.row as u32 * cell;
        let highlighted = on_path.get(grid.index_of(coord)).as_deref() == Some(&true);

        fill_rect(
            &mut img,
            x + wall,
            y + wall,
            cell.saturating_sub(wall),
            cell.saturating_sub(wall),
            cell_color(grid, highlighted, coord),
        );

        // Corner post
        fill_rect(&mut img, x, y, wall, wall, WALL_COLOR);

        let Ok(mask) = grid.mask(coord) else {
            continue;
        };
        if mask & Direction::North.bit() != 0 {
            fill_rect(&mut img, x, y, cell + wall, wall, WALL_COLOR);
        }
        if mask & Direction::West.bit() != 0 {
            fill_rect(&mut img, x, y, wall, cell + wall, WALL_COLOR);
        }
        if mask & Direction::South.bit() != 0 {
            fill_rect(&mut img, x, y + cell, cell + wall, wall, WALL_COLOR);
        }
        if mask & Direction::East.bit() != 0 {
            fill_rect(&mut img, x + cell, y, wall, cell + wall, WALL_COLOR);
        }
    }

    // Bottom-right corner post of every cell
    for coord in grid.coords() {
        let x = coord.col as u32 * cell;
        let y = coord.row as u32 * cell;
        fill_rect(&mut img, x + cell, y + cell, wall, wall, WALL_COLOR);
    }

    img
}

/// Render the maze and save it as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved to the specified path
pub fn export_maze_as_png(
    grid: &MazeGrid,
    solution: Option<&Solution>,
    ctx: &RenderContext,
    output_path: &Path,
) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    render_maze(grid, solution, ctx)
        .save(output_path)
        .map_err(|e| MazeError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
