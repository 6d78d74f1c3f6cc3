use rand::Rng;
use tracing::debug;

use crate::{
    error::PlacementError,
    grid::{Cell, edge_cell, perimeter_len},
};

// ============================================================================
// Maze Grid
// ============================================================================

/// Square blocked/free grid. `true` means blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGrid {
    size: usize,
    blocked: Vec<bool>,
    entry: Cell,
}

impl MazeGrid {
    fn fully_blocked(size: usize, entry: Cell) -> Self {
        Self {
            size,
            blocked: vec![true; size * size],
            entry,
        }
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    // The edge cell carving started from
    #[must_use]
    pub const fn entry(&self) -> Cell {
        self.entry
    }

    const fn index(&self, x: i32, z: i32) -> Option<usize> {
        let size = self.size as i32;
        if x < 0 || z < 0 || x >= size || z >= size {
            return None;
        }
        Some(z as usize * self.size + x as usize)
    }

    // Out-of-bounds cells read as not blocked
    #[must_use]
    pub fn is_blocked(&self, x: i32, z: i32) -> bool {
        self.index(x, z).is_some_and(|i| self.blocked[i])
    }

    fn open(&mut self, x: i32, z: i32) {
        if let Some(i) = self.index(x, z) {
            self.blocked[i] = false;
        }
    }

    // Blocked cells in row-major order (z outer, x inner)
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size as i32)
            .flat_map(move |z| (0..self.size as i32).map(move |x| Cell::ground(x, z)))
            .filter(|cell| self.is_blocked(cell.x, cell.z))
    }

    #[must_use]
    pub fn free_count(&self) -> usize {
        self.blocked.iter().filter(|b| !**b).count()
    }
}

impl std::fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for z in 0..self.size as i32 {
            for x in 0..self.size as i32 {
                f.write_str(if self.is_blocked(x, z) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// Carving
// ============================================================================

// Axis directions as (dx, dz), in the order they are shuffled from
const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

// One cell on the carving stack: its shuffled directions and how many of them
// have been tried. This mirrors a recursive call frame.
struct Frame {
    x: i32,
    z: i32,
    directions: [(i32, i32); 4],
    next: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(x: i32, z: i32, rng: &mut R) -> Self {
        let mut directions = DIRECTIONS;
        shuffle(&mut directions, rng);
        Self { x, z, directions, next: 0 }
    }
}

// Fisher-Yates: for i from the last index down to 1, swap with a uniform j <= i
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Carve a `size` x `size` maze with a depth-first backtracker.
///
/// The grid starts fully blocked. A uniformly random boundary cell is opened
/// as the entry, then corridors are cut two cells at a time (opening the
/// connector in between) until every cell reachable on the entry's stride has
/// been visited. Cells off that stride stay blocked unless they were used as
/// connectors, so the result is sparse and not every free region has to be
/// joined to the entry.
///
/// The walk uses an explicit stack, so large sizes cannot overflow the call
/// stack. Draws from `rng` happen in the same order a recursive carve would
/// make them, which keeps seeded output stable.
pub fn generate_maze<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<MazeGrid, PlacementError> {
    if size == 0 {
        return Err(PlacementError::EmptyGrid);
    }

    let entry = edge_cell(size, rng.random_range(0..perimeter_len(size)));
    let mut maze = MazeGrid::fully_blocked(size, entry);
    maze.open(entry.x, entry.z);

    let mut stack = vec![Frame::enter(entry.x, entry.z, rng)];
    let mut max_depth = 1;

    while let Some(frame) = stack.last_mut() {
        let Some(&(dx, dz)) = frame.directions.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;

        let (x, z) = (frame.x, frame.z);
        let (nx, nz) = (x + dx * 2, z + dz * 2);
        if !maze.is_blocked(nx, nz) {
            // Out of bounds or already carved
            continue;
        }

        maze.open(x + dx, z + dz);
        maze.open(nx, nz);
        stack.push(Frame::enter(nx, nz, rng));
        max_depth = max_depth.max(stack.len());
    }

    debug!(
        "carved {size}x{size} maze from {:?}: {} free cells, max depth {max_depth}",
        entry,
        maze.free_count()
    );

    Ok(maze)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng, rngs::StdRng};

    // Random source whose every draw is zero: ranges yield their lower bound
    // and coin flips come up true.
    pub(crate) struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn shuffle_with_zero_draws_rotates_deterministically() {
        let mut items = [0, 1, 2, 3];
        shuffle(&mut items, &mut ZeroRng);
        assert_eq!(items, [1, 2, 3, 0]);
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut rng);
        items.sort_unstable();
        assert_eq!(items, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn zero_draws_carve_a_known_maze() {
        let maze = generate_maze(6, &mut ZeroRng).unwrap();
        assert_eq!(maze.entry(), Cell::ground(0, 0));
        let expected = "\
.....#
####.#
...#.#
.###.#
.....#
######
";
        assert_eq!(maze.to_string(), expected);
    }

    #[test]
    fn mazes_have_requested_size_and_free_entry() {
        let mut rng = StdRng::seed_from_u64(42);
        for size in 1..=30 {
            let maze = generate_maze(size, &mut rng).unwrap();
            assert_eq!(maze.size(), size);
            assert_eq!(maze.to_string().lines().count(), size);
            let entry = maze.entry();
            assert!(entry.is_on_edge(size), "entry {entry:?} not on edge for size {size}");
            assert!(!maze.is_blocked(entry.x, entry.z));
        }
    }

    #[test]
    fn carving_terminates_for_all_tested_sizes() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for size in 4..=30 {
                let maze = generate_maze(size, &mut rng).unwrap();
                assert!(maze.free_count() >= 1);
            }
        }
    }

    #[test]
    fn every_cell_on_the_entry_stride_is_carved() {
        let mut rng = StdRng::seed_from_u64(3);
        let maze = generate_maze(15, &mut rng).unwrap();
        let entry = maze.entry();
        for z in 0..15 {
            for x in 0..15 {
                if (x - entry.x) % 2 == 0 && (z - entry.z) % 2 == 0 {
                    assert!(!maze.is_blocked(x, z), "({x}, {z}) left blocked");
                }
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate_maze(20, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate_maze(20, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_size_is_rejected() {
        assert_eq!(generate_maze(0, &mut ZeroRng), Err(PlacementError::EmptyGrid));
    }

    #[test]
    fn out_of_bounds_reads_as_open() {
        let maze = generate_maze(4, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(!maze.is_blocked(-1, 0));
        assert!(!maze.is_blocked(0, 4));
    }
}
