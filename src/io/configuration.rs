//! Generation policy constants and runtime configuration defaults

/// Maximum accepted width or height
pub const MAX_DIMENSION: usize = 120;

/// Configuration file read when no path is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "default_config.txt";

// The emblem needs room for both digits plus a one-cell margin
/// Minimum grid width for emblem placement
pub const EMBLEM_MIN_WIDTH: usize = 9;
/// Minimum grid height for emblem placement
pub const EMBLEM_MIN_HEIGHT: usize = 7;

/// One extra wall is broken per this many cells in non-perfect mazes
pub const LOOP_BREAK_DIVISOR: usize = 100;

/// Generation attempts before giving up on an unsolvable maze
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

// Render geometry, in pixels
/// Edge length of one cell including its walls
pub const CELL_PIXELS: u32 = 16;
/// Thickness of a drawn wall
pub const WALL_PIXELS: u32 = 4;

// Fixed render palette (RGBA)
/// Floor of open cells
pub const FLOOR_COLOR: [u8; 4] = [250, 250, 250, 255];
/// Walls
pub const WALL_COLOR: [u8; 4] = [30, 30, 30, 255];
/// Reserved emblem cells
pub const RESERVED_COLOR: [u8; 4] = [120, 120, 120, 255];
/// Solution path cells
pub const PATH_COLOR: [u8; 4] = [90, 170, 250, 255];
/// Entry cell
pub const ENTRY_COLOR: [u8; 4] = [220, 60, 160, 255];
/// Exit cell
pub const EXIT_COLOR: [u8; 4] = [230, 60, 60, 255];
