//! Bounded wall-mask grid with reserved cells and lifecycle tracking
//!
//! Every cell stores a 4-bit wall mask (bit set = wall present). Walls between
//! two in-bounds cells are always mutated on both sides together, so the
//! mask of a cell and the opposite bit of its neighbour never disagree.
//! Outward-facing border bits are set at construction and can never be cleared.

use std::collections::VecDeque;

use bitvec::prelude::*;
use ndarray::Array2;
use tracing::debug;

use crate::io::config_loader::ConfigViolation;
use crate::io::error::{MazeError, Result};
use crate::spatial::direction::{Coord, Direction};

/// Mask of a cell with all four walls present
pub const FULLY_WALLED: u8 = 15;

/// Lifecycle stage of a grid instance
///
/// Stages only move forward. A resolved grid is never reused: regeneration
/// builds a new instance starting from `Bordered`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum GridStage {
    /// Allocated, border bits not yet applied
    Uninitialized,
    /// Border bits fixed, no passages carved
    Bordered,
    /// Spanning tree carved
    Carved,
    /// Extra walls removed to introduce cycles
    LoopBroken,
    /// Solution computed
    Resolved,
}

/// Maze grid state: wall masks, reserved cells, entry/exit and stage
#[derive(Debug, Clone)]
pub struct MazeGrid {
    walls: Array2<u8>,
    reserved: BitVec,
    entry: Coord,
    exit: Coord,
    stage: GridStage,
}

impl MazeGrid {
    /// Create a fully walled grid with border bits applied
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero (`ConfigurationInvalid`)
    /// - Entry or exit lies outside the grid (`InvalidCoordinate`)
    /// - Entry and exit are the same cell (`ConfigurationInvalid`)
    pub fn new(width: usize, height: usize, entry: Coord, exit: Coord) -> Result<Self> {
        let mut violations = Vec::new();
        if width == 0 {
            violations.push(ConfigViolation::NonPositiveDimension { key: "WIDTH" });
        }
        if height == 0 {
            violations.push(ConfigViolation::NonPositiveDimension { key: "HEIGHT" });
        }
        if !violations.is_empty() {
            return Err(MazeError::ConfigurationInvalid { violations });
        }

        let mut grid = Self {
            walls: Array2::from_elem((height, width), FULLY_WALLED),
            reserved: bitvec![0; width * height],
            entry,
            exit,
            stage: GridStage::Uninitialized,
        };

        grid.check_bounds(entry)?;
        grid.check_bounds(exit)?;
        if entry == exit {
            return Err(MazeError::ConfigurationInvalid {
                violations: vec![ConfigViolation::EntryEqualsExit],
            });
        }

        grid.apply_borders();
        Ok(grid)
    }

    // Masks start fully walled; border bits are still OR-ed in explicitly.
    fn apply_borders(&mut self) {
        let (height, width) = self.walls.dim();
        for ((row, col), mask) in self.walls.indexed_iter_mut() {
            if row == 0 {
                *mask |= Direction::North.bit();
            }
            if row == height - 1 {
                *mask |= Direction::South.bit();
            }
            if col == 0 {
                *mask |= Direction::West.bit();
            }
            if col == width - 1 {
                *mask |= Direction::East.bit();
            }
        }
        self.stage = GridStage::Bordered;
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.walls.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.walls.nrows()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.walls.len()
    }

    /// Entry point of the maze
    pub const fn entry(&self) -> Coord {
        self.entry
    }

    /// Exit point of the maze
    pub const fn exit(&self) -> Coord {
        self.exit
    }

    /// Current lifecycle stage
    pub const fn stage(&self) -> GridStage {
        self.stage
    }

    /// True iff the coordinate lies inside the grid
    pub fn bounds_check(&self, coord: Coord) -> bool {
        coord.row < self.height() && coord.col < self.width()
    }

    fn check_bounds(&self, coord: Coord) -> Result<()> {
        if self.bounds_check(coord) {
            Ok(())
        } else {
            Err(MazeError::InvalidCoordinate {
                coord,
                dimensions: (self.height(), self.width()),
            })
        }
    }

    /// Flat index used by per-cell bitsets
    pub fn index_of(&self, coord: Coord) -> usize {
        coord.row * self.width() + coord.col
    }

    /// Coordinate for a flat index produced by [`Self::index_of`]
    pub fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index / self.width(), index % self.width())
    }

    /// In-bounds neighbour one step away, if any
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        coord
            .step(direction)
            .filter(|&next| self.bounds_check(next))
    }

    /// Iterate over every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width();
        (0..self.height()).flat_map(move |row| (0..width).map(move |col| Coord::new(row, col)))
    }

    /// Wall mask of a cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the coordinate is outside the grid
    pub fn mask(&self, coord: Coord) -> Result<u8> {
        self.walls
            .get([coord.row, coord.col])
            .copied()
            .ok_or(MazeError::InvalidCoordinate {
                coord,
                dimensions: (self.height(), self.width()),
            })
    }

    /// Read-only view of all wall masks, indexed `[row, col]`
    pub const fn masks(&self) -> &Array2<u8> {
        &self.walls
    }

    /// Whether the wall in `direction` is present for this cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the coordinate is outside the grid
    pub fn wall_present(&self, coord: Coord, direction: Direction) -> Result<bool> {
        Ok(self.mask(coord)? & direction.bit() != 0)
    }

    /// Whether a move from `coord` in `direction` is possible
    ///
    /// Checked from the moving cell's side only. Out-of-bounds coordinates
    /// are never open.
    pub fn is_open(&self, coord: Coord, direction: Direction) -> bool {
        self.walls
            .get([coord.row, coord.col])
            .is_some_and(|&mask| mask & direction.bit() == 0)
            && self.neighbor(coord, direction).is_some()
    }

    /// Whether a cell is reserved (out-of-bounds cells are not)
    pub fn is_reserved(&self, coord: Coord) -> bool {
        self.bounds_check(coord)
            && self.reserved.get(self.index_of(coord)).as_deref() == Some(&true)
    }

    /// Number of reserved cells
    pub fn reserved_count(&self) -> usize {
        self.reserved.count_ones()
    }

    /// All reserved cells in row-major order
    pub fn reserved_cells(&self) -> Vec<Coord> {
        self.reserved
            .iter_ones()
            .map(|index| self.coord_of(index))
            .collect()
    }

    /// Cells connected to the entry through non-reserved neighbours, ignoring walls
    ///
    /// Indexed like the reserved set. Cells outside this region can never be
    /// carved into the maze, whatever the random choices.
    pub fn entry_region(&self) -> BitVec {
        let mut region = bitvec![0; self.cell_count()];
        region.set(self.index_of(self.entry), true);
        let mut queue = VecDeque::from([self.entry]);

        while let Some(cell) = queue.pop_front() {
            for direction in Direction::TRAVERSAL_ORDER {
                let Some(next) = self.neighbor(cell, direction) else {
                    continue;
                };
                let index = self.index_of(next);
                if self.is_reserved(next) || region.get(index).as_deref() == Some(&true) {
                    continue;
                }
                region.set(index, true);
                queue.push_back(next);
            }
        }
        region
    }

    /// Number of cells that take part in carving and path search
    pub fn open_cell_count(&self) -> usize {
        self.cell_count() - self.reserved_count()
    }

    /// Mark a set of cells as reserved obstacles
    ///
    /// The set is applied all-or-nothing and only before carving, while
    /// every cell is still fully walled. A set containing the entry or exit
    /// empties the reserved set entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid is past the `Bordered` stage (`InvalidStage`)
    /// - Any coordinate is outside the grid (`InvalidCoordinate`, nothing applied)
    /// - The set contains the entry or exit (`ReservationConflict`, reserved set cleared)
    pub fn reserve<I>(&mut self, coords: I) -> Result<()>
    where
        I: IntoIterator<Item = Coord>,
    {
        self.require_stage("reserve", &[GridStage::Bordered])?;
        let coords: Vec<Coord> = coords.into_iter().collect();
        for &coord in &coords {
            self.check_bounds(coord)?;
        }

        if let Some(&conflict) = coords
            .iter()
            .find(|&&coord| coord == self.entry || coord == self.exit)
        {
            self.reserved.fill(false);
            return Err(MazeError::ReservationConflict { coord: conflict });
        }

        for coord in coords {
            let index = self.index_of(coord);
            self.reserved.set(index, true);
        }
        debug!(reserved = self.reserved_count(), "reserved cells applied");
        Ok(())
    }

    // Resolves the far side of a shared wall, refusing border and reserved walls
    fn shared_wall(&self, coord: Coord, direction: Direction) -> Result<Coord> {
        self.check_bounds(coord)?;
        let next = self
            .neighbor(coord, direction)
            .ok_or(MazeError::SealedBorder { coord, direction })?;
        for cell in [coord, next] {
            if self.is_reserved(cell) {
                return Err(MazeError::ReservedCell { coord: cell });
            }
        }
        Ok(next)
    }

    /// Flip the wall shared by `coord` and its neighbour in `direction`
    ///
    /// Both sides change together.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The coordinate is outside the grid (`InvalidCoordinate`)
    /// - The wall faces out of the grid (`SealedBorder`)
    /// - Either side is reserved (`ReservedCell`)
    pub fn toggle_wall(&mut self, coord: Coord, direction: Direction) -> Result<()> {
        let next = self.shared_wall(coord, direction)?;
        if let Some(mask) = self.walls.get_mut([coord.row, coord.col]) {
            *mask ^= direction.bit();
        }
        if let Some(mask) = self.walls.get_mut([next.row, next.col]) {
            *mask ^= direction.opposite().bit();
        }
        Ok(())
    }

    /// Clear the wall shared by `coord` and its neighbour in `direction`
    ///
    /// Idempotent. Returns the neighbour on the far side.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::toggle_wall`]
    pub fn open_wall(&mut self, coord: Coord, direction: Direction) -> Result<Coord> {
        let next = self.shared_wall(coord, direction)?;
        if let Some(mask) = self.walls.get_mut([coord.row, coord.col]) {
            *mask &= !direction.bit();
        }
        if let Some(mask) = self.walls.get_mut([next.row, next.col]) {
            *mask &= !direction.opposite().bit();
        }
        Ok(next)
    }

    /// Count passages between in-bounds cell pairs (each shared wall once)
    pub fn passage_count(&self) -> usize {
        self.coords()
            .map(|coord| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&direction| self.is_open(coord, direction))
                    .count()
            })
            .sum()
    }

    /// Move the grid to a later lifecycle stage
    ///
    /// # Errors
    ///
    /// Returns `InvalidStage` if the current stage is not one of `allowed_from`
    pub fn advance(
        &mut self,
        operation: &'static str,
        allowed_from: &[GridStage],
        to: GridStage,
    ) -> Result<()> {
        if !allowed_from.contains(&self.stage) {
            return Err(MazeError::InvalidStage {
                operation,
                found: self.stage,
            });
        }
        self.stage = to;
        Ok(())
    }

    /// Fail unless the grid is in one of the given stages
    ///
    /// # Errors
    ///
    /// Returns `InvalidStage` if the current stage is not one of `allowed`
    pub fn require_stage(&self, operation: &'static str, allowed: &[GridStage]) -> Result<()> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(MazeError::InvalidStage {
                operation,
                found: self.stage,
            })
        }
    }
}
