#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use std::collections::HashSet;

use crate::constants::GROUND_LAYER;

// ============================================================================
// Lattice Cells
// ============================================================================

/// Integer lattice coordinate. Equality is exact; there is no tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    // Cell on the ground layer, addressed by maze column (x) and row (z)
    #[must_use]
    pub const fn ground(x: i32, z: i32) -> Self {
        Self::new(x, GROUND_LAYER, z)
    }

    // True if the cell lies on the outer boundary of a size x size grid
    #[must_use]
    pub const fn is_on_edge(&self, size: usize) -> bool {
        let last = size as i32 - 1;
        self.x == 0 || self.z == 0 || self.x == last || self.z == last
    }
}

// Number of distinct cells on the boundary of a size x size grid
#[must_use]
pub const fn perimeter_len(size: usize) -> usize {
    match size {
        0 => 0,
        1 => 1,
        _ => 4 * (size - 1),
    }
}

// Map an index in 0..perimeter_len(size) to a boundary cell, walking
// clockwise from the (0, 0) corner. Every boundary cell has exactly one index.
#[must_use]
pub const fn edge_cell(size: usize, index: usize) -> Cell {
    if size <= 1 {
        return Cell::ground(0, 0);
    }
    let side = size - 1;
    let last = side as i32;
    let offset = (index % side) as i32;
    match (index / side) % 4 {
        0 => Cell::ground(offset, 0),
        1 => Cell::ground(last, offset),
        2 => Cell::ground(last - offset, last),
        _ => Cell::ground(0, last - offset),
    }
}

// ============================================================================
// Occupancy
// ============================================================================

/// Set of cells claimed by placed entities. One grid lives for exactly one
/// level build; cells are never released.
#[derive(Debug, Default, Clone)]
pub struct OccupancyGrid {
    claimed: HashSet<Cell>,
}

impl OccupancyGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.claimed.contains(&cell)
    }

    // Callers must check is_free first; claiming twice is a logic error
    pub fn claim(&mut self, cell: Cell) {
        let newly_claimed = self.claimed.insert(cell);
        debug_assert!(newly_claimed, "cell {cell:?} claimed twice");
    }

    // Check and claim in one step. Returns false if the cell was taken.
    pub fn try_claim(&mut self, cell: Cell) -> bool {
        if !self.is_free(cell) {
            return false;
        }
        self.claim(cell);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
