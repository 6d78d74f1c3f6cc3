use rand::Rng;
use tracing::{debug, warn};

use crate::{
    constants::*,
    error::PlacementError,
    grid::{Cell, OccupancyGrid, edge_cell, perimeter_len},
    maze::MazeGrid,
    protocol::{FeatureKind, PlacedFeature, Position},
};

// ============================================================================
// Coordinate Mapping
// ============================================================================

// World position of a lattice cell at the given height
#[must_use]
pub fn cell_to_world(cell: Cell, y: f32) -> Position {
    Position {
        x: cell.x as f32 * SPACING,
        y,
        z: cell.z as f32 * SPACING,
    }
}

// Attempt cap for rejection sampling in a size x size grid
#[must_use]
pub const fn max_attempts(size: usize) -> usize {
    size * size * PLACEMENT_ATTEMPTS_PER_CELL
}

// ============================================================================
// Grid-Driven Placement
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ObstacleLayout {
    pub rocks: Vec<PlacedFeature>,
    pub flora: Vec<PlacedFeature>,
}

// Turn every blocked maze cell into a rock or flora (fair coin flip), skipping
// cells that are already claimed
pub fn place_obstacles<R: Rng + ?Sized>(maze: &MazeGrid, occupied: &mut OccupancyGrid, rng: &mut R) -> ObstacleLayout {
    let mut layout = ObstacleLayout::default();

    for cell in maze.blocked_cells() {
        let is_rock = rng.random_bool(ROCK_PROBABILITY);
        if !occupied.try_claim(cell) {
            continue;
        }

        if is_rock {
            layout.rocks.push(PlacedFeature {
                cell,
                position: cell_to_world(cell, ROCK_Y),
                kind: FeatureKind::Rock,
            });
        } else {
            layout.flora.push(PlacedFeature {
                cell,
                position: cell_to_world(cell, FLORA_BASE_Y),
                kind: FeatureKind::Flora,
            });
        }
    }

    debug!("placed {} rocks and {} flora", layout.rocks.len(), layout.flora.len());
    layout
}

// ============================================================================
// Rejection Sampling
// ============================================================================

// Draw candidates until one is free, claim it and return it
fn sample_free_cell<R, F>(
    occupied: &mut OccupancyGrid,
    size: usize,
    rng: &mut R,
    mut draw: F,
) -> Result<Cell, PlacementError>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Cell,
{
    if size == 0 {
        return Err(PlacementError::EmptyGrid);
    }

    let attempts = max_attempts(size);
    for _ in 0..attempts {
        let cell = draw(rng);
        if occupied.try_claim(cell) {
            return Ok(cell);
        }
    }

    warn!("gave up placing into {size}x{size} grid after {attempts} attempts");
    Err(PlacementError::Exhausted { attempts, size })
}

/// Claim a uniformly random free cell anywhere in the grid.
pub fn find_free_spot<R: Rng + ?Sized>(
    occupied: &mut OccupancyGrid,
    size: usize,
    rng: &mut R,
) -> Result<Cell, PlacementError> {
    let side = size as i32;
    sample_free_cell(occupied, size, rng, |rng| {
        Cell::ground(rng.random_range(0..side), rng.random_range(0..side))
    })
}

/// Claim a uniformly random free cell on the grid boundary. Used for the
/// player spawn.
pub fn find_edge_spot<R: Rng + ?Sized>(
    occupied: &mut OccupancyGrid,
    size: usize,
    rng: &mut R,
) -> Result<Cell, PlacementError> {
    let perimeter = perimeter_len(size);
    sample_free_cell(occupied, size, rng, |rng| edge_cell(size, rng.random_range(0..perimeter)))
}
