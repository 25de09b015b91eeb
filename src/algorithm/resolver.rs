//! Shortest-path resolution: BFS distance map and deterministic reconstruction
//!
//! The reconstruction walks forward from the entry, always preferring the
//! first open neighbour in `Direction::TRAVERSAL_ORDER` whose distance is one
//! more than the current cell's, and backs out of branches that cannot reach
//! the exit. For a given grid the chosen route is always the same.

use std::collections::VecDeque;

use bitvec::prelude::*;
use ndarray::Array2;

use crate::io::error::{MazeError, Result};
use crate::spatial::direction::{Coord, Direction};
use crate::spatial::grid::MazeGrid;

/// Steps from the entry for every cell (`None` = never reached)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    distances: Array2<Option<u32>>,
}

impl DistanceMap {
    /// Distance of a cell, `None` if unreachable or out of bounds
    pub fn get(&self, coord: Coord) -> Option<u32> {
        self.distances.get([coord.row, coord.col]).copied().flatten()
    }

    /// Number of cells with a finite distance
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    /// Non-reserved cells that were never reached
    pub fn unreachable_cells(&self, grid: &MazeGrid) -> Vec<Coord> {
        grid.coords()
            .filter(|&coord| !grid.is_reserved(coord) && self.get(coord).is_none())
            .collect()
    }

    /// Largest finite distance in the map
    pub fn max_distance(&self) -> Option<u32> {
        self.distances.iter().flatten().copied().max()
    }
}

/// Shortest route from entry to exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Moves from entry to exit
    pub directions: Vec<Direction>,
    /// Cells visited from entry to exit, both inclusive
    pub cells: Vec<Coord>,
}

impl Solution {
    /// Direction labels concatenated, e.g. `"EESWN"`
    pub fn path_string(&self) -> String {
        self.directions.iter().map(|d| d.label()).collect()
    }

    /// Number of moves
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// Whether the route has no moves
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Re-derive the cell sequence by applying the moves from `start`
    ///
    /// Returns `None` if a move underflows the coordinate space.
    pub fn replay(&self, start: Coord) -> Option<Vec<Coord>> {
        let mut cells = Vec::with_capacity(self.directions.len() + 1);
        cells.push(start);
        let mut current = start;
        for &direction in &self.directions {
            current = current.step(direction)?;
            cells.push(current);
        }
        Some(cells)
    }
}

/// Breadth-first distances from the entry through open walls
///
/// Works on any stage; uncarved or walled-off cells simply stay `None`.
pub fn distance_map(grid: &MazeGrid) -> DistanceMap {
    let mut distances = Array2::from_elem((grid.height(), grid.width()), None);
    let entry = grid.entry();
    if let Some(slot) = distances.get_mut([entry.row, entry.col]) {
        *slot = Some(0);
    }

    let mut queue = VecDeque::from([entry]);
    while let Some(cell) = queue.pop_front() {
        let Some(current) = distances.get([cell.row, cell.col]).copied().flatten() else {
            continue;
        };
        let candidate = current + 1;

        for direction in Direction::TRAVERSAL_ORDER {
            if !grid.is_open(cell, direction) {
                continue;
            }
            let Some(next) = grid.neighbor(cell, direction) else {
                continue;
            };
            if let Some(slot) = distances.get_mut([next.row, next.col]) {
                // Relax only on a strictly shorter distance
                if slot.is_none_or(|known| known > candidate) {
                    *slot = Some(candidate);
                    queue.push_back(next);
                }
            }
        }
    }

    DistanceMap { distances }
}

// One level of the forward search: the cell, how we got here, and where to resume
struct Frame {
    cell: Coord,
    arrived_by: Option<Direction>,
    next_direction: usize,
}

/// Rebuild the route from entry to exit using a distance map
///
/// # Errors
///
/// Returns an error if:
/// - Reserved cells separate the exit from the entry (`ExitIsolated`)
/// - No chain of strictly increasing distances connects the entry to the
///   exit (`UnsolvableMaze`)
pub fn reconstruct(grid: &MazeGrid, distances: &DistanceMap) -> Result<Solution> {
    let (entry, exit) = (grid.entry(), grid.exit());
    let unsolvable = || MazeError::UnsolvableMaze { entry, exit };

    if distances.get(exit).is_none() {
        let exit_in_region = grid.entry_region().get(grid.index_of(exit)).as_deref() == Some(&true);
        if !exit_in_region {
            return Err(MazeError::ExitIsolated { entry, exit });
        }
        return Err(unsolvable());
    }

    // Cells already proven unable to reach the exit
    let mut dead = bitvec![0; grid.cell_count()];
    let mut stack = vec![Frame {
        cell: entry,
        arrived_by: None,
        next_direction: 0,
    }];

    loop {
        let Some(frame) = stack.last_mut() else {
            return Err(unsolvable());
        };
        if frame.cell == exit {
            break;
        }
        let Some(current) = distances.get(frame.cell) else {
            return Err(unsolvable());
        };

        let mut advance = None;
        while let Some(&direction) = Direction::TRAVERSAL_ORDER.get(frame.next_direction) {
            frame.next_direction += 1;
            if !grid.is_open(frame.cell, direction) {
                continue;
            }
            let Some(next) = grid.neighbor(frame.cell, direction) else {
                continue;
            };
            if dead.get(grid.index_of(next)).as_deref() == Some(&true) {
                continue;
            }
            if distances.get(next) == Some(current + 1) {
                advance = Some((direction, next));
                break;
            }
        }

        match advance {
            Some((direction, next)) => stack.push(Frame {
                cell: next,
                arrived_by: Some(direction),
                next_direction: 0,
            }),
            None => {
                let cell = frame.cell;
                dead.set(grid.index_of(cell), true);
                stack.pop();
            }
        }
    }

    let cells = stack.iter().map(|frame| frame.cell).collect();
    let directions = stack.iter().filter_map(|frame| frame.arrived_by).collect();
    Ok(Solution { directions, cells })
}

/// Distance map and route in one call
///
/// # Errors
///
/// Same conditions as [`reconstruct`]
pub fn solve(grid: &MazeGrid) -> Result<(DistanceMap, Solution)> {
    let distances = distance_map(grid);
    let solution = reconstruct(grid, &distances)?;
    Ok((distances, solution))
}
