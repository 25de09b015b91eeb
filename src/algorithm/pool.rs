//! Cell pool with uniform random selection and constant-time removal
//!
//! Backs both the carving engine's unvisited set and the loop breaker's
//! candidate list. Cells are stored densely in a vector and a per-cell
//! slot table tracks where each member currently lives, so removal is a
//! swap-remove plus one slot update.

use rand::Rng;

use crate::spatial::direction::Coord;

/// Set of grid cells supporting random draws
#[derive(Debug, Clone)]
pub struct CellPool {
    members: Vec<Coord>,
    // slot[row * width + col] = position in `members`
    slots: Vec<Option<usize>>,
    width: usize,
}

impl CellPool {
    /// Create an empty pool for a grid of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            members: Vec::new(),
            slots: vec![None; width * height],
            width,
        }
    }

    /// Create a pool from an iterator of cells
    ///
    /// Cells outside the declared grid and duplicates are ignored.
    pub fn from_cells<I>(width: usize, height: usize, cells: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut pool = Self::new(width, height);
        for cell in cells {
            pool.insert(cell);
        }
        pool
    }

    fn slot_index(&self, cell: Coord) -> Option<usize> {
        (cell.col < self.width)
            .then(|| cell.row * self.width + cell.col)
            .filter(|&index| index < self.slots.len())
    }

    /// Add a cell, returning false if it was already present or out of range
    pub fn insert(&mut self, cell: Coord) -> bool {
        let Some(index) = self.slot_index(cell) else {
            return false;
        };
        let position = self.members.len();
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_none() => {
                *slot = Some(position);
                self.members.push(cell);
                true
            }
            _ => false,
        }
    }

    /// Remove a cell, returning false if it was not present
    pub fn remove(&mut self, cell: Coord) -> bool {
        let Some(index) = self.slot_index(cell) else {
            return false;
        };
        let Some(position) = self.slots.get_mut(index).and_then(Option::take) else {
            return false;
        };

        self.members.swap_remove(position);
        if let Some(&moved) = self.members.get(position) {
            if let Some(moved_index) = self.slot_index(moved) {
                if let Some(slot) = self.slots.get_mut(moved_index) {
                    *slot = Some(position);
                }
            }
        }
        true
    }

    /// Whether a cell is currently in the pool
    pub fn contains(&self, cell: Coord) -> bool {
        self.slot_index(cell)
            .and_then(|index| self.slots.get(index))
            .is_some_and(Option::is_some)
    }

    /// Number of cells in the pool
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Draw a uniformly random member without removing it
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<Coord> {
        if self.members.is_empty() {
            return None;
        }
        let position = rng.random_range(0..self.members.len());
        self.members.get(position).copied()
    }

    /// Current members in internal order
    pub fn as_slice(&self) -> &[Coord] {
        &self.members
    }
}
