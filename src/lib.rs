//! Rectangular maze generation with Wilson's algorithm and shortest-path resolution
//!
//! A grid of per-cell wall bitmasks is carved into a uniform random spanning
//! tree, optionally perturbed with extra openings, then solved with a
//! breadth-first search and a deterministic route reconstruction.

#![forbid(unsafe_code)]

/// Carving, loop breaking, path resolution and the generation pipeline
pub mod algorithm;
/// Configuration, error handling, export and command-line interface
pub mod io;
/// Grid model, directions and reserved-region placement
pub mod spatial;

pub use algorithm::generator::{GeneratedMaze, MazeGenerator};
pub use algorithm::resolver::Solution;
pub use io::error::{MazeError, Result};
pub use spatial::{Coord, Direction, MazeGrid};
