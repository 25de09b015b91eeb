//! Spatial data structures for the maze grid
//!
//! This module contains:
//! - Coordinates and cardinal directions
//! - The wall-mask grid and its lifecycle
//! - Emblem placement as reserved cells

/// Cell coordinates and cardinal directions
pub mod direction;
/// Centered emblem reservation
pub mod emblem;
/// Wall-mask grid with reserved cells
pub mod grid;

pub use direction::{Coord, Direction};
pub use grid::{GridStage, MazeGrid};
