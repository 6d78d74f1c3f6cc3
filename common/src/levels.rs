#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use std::collections::BTreeMap;
use tracing::{error, info};

use crate::{
    constants::*,
    error::{LevelError, PlacementError},
    grid::{Cell, OccupancyGrid},
    maze::generate_maze,
    protocol::{Color, FeatureKind, PlacedFeature, Poi, Position},
    spawning::{cell_to_world, find_edge_spot, find_free_spot, place_obstacles},
};

// ============================================================================
// Level Description
// ============================================================================

/// Everything needed to instantiate a level. Built once and never mutated;
/// sessions copy the POIs into runtime `Poi` values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct LevelDescription {
    pub level: u32,
    pub size: usize,
    pub rocks: Vec<PlacedFeature>,
    pub flora: Vec<PlacedFeature>,
    pub pois: Vec<PlacedFeature>,
    pub spawn: Cell,
}

impl LevelDescription {
    // Player start position in world space
    #[must_use]
    pub fn spawn_position(&self) -> Position {
        cell_to_world(self.spawn, SPAWN_Y)
    }

    // Fresh runtime copies of the POIs, all incomplete
    #[must_use]
    pub fn runtime_pois(&self) -> Vec<Poi> {
        self.pois.iter().filter_map(|poi| Poi::try_from(poi).ok()).collect()
    }

    // Every placed feature, spawn excluded
    pub fn features(&self) -> impl Iterator<Item = &PlacedFeature> {
        self.rocks.iter().chain(&self.flora).chain(&self.pois)
    }
}

// Maze side length for a level
#[must_use]
pub const fn maze_size_for_level(level: u32) -> usize {
    BASE_MAZE_SIZE + MAZE_GROWTH_PER_LEVEL * level as usize
}

#[must_use]
pub const fn level_exists(level: u32) -> bool {
    level >= 1 && level <= MAX_LEVEL
}

fn pick_poi_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    POI_PALETTE[rng.random_range(0..POI_PALETTE.len())]
}

// ============================================================================
// Level Builder
// ============================================================================

/// Build level `level`: one maze, an obstacle on every blocked cell, `level`
/// POIs on free cells, then a player spawn on a free boundary cell. All
/// placements share one occupancy grid, so no two entities share a cell.
pub fn generate_level<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Result<LevelDescription, LevelError> {
    if !level_exists(level) {
        return Err(LevelError::NotFound(level));
    }

    let placement_error = |source: PlacementError| LevelError::Placement { level, source };
    let size = maze_size_for_level(level);

    let maze = generate_maze(size, rng).map_err(placement_error)?;
    let mut occupied = OccupancyGrid::new();
    let layout = place_obstacles(&maze, &mut occupied, rng);

    let mut pois = Vec::with_capacity(level as usize);
    for _ in 0..level {
        let cell = find_free_spot(&mut occupied, size, rng).map_err(placement_error)?;
        pois.push(PlacedFeature {
            cell,
            position: cell_to_world(cell, POI_Y),
            kind: FeatureKind::Poi {
                color: pick_poi_color(rng),
            },
        });
    }

    let spawn = find_edge_spot(&mut occupied, size, rng).map_err(placement_error)?;

    info!(
        "built level {level} ({size}x{size}): {} rocks, {} flora, {} pois, spawn at {:?}",
        layout.rocks.len(),
        layout.flora.len(),
        pois.len(),
        spawn
    );

    Ok(LevelDescription {
        level,
        size,
        rocks: layout.rocks,
        flora: layout.flora,
        pois,
        spawn,
    })
}

// ============================================================================
// Level Catalog
// ============================================================================

/// Session-wide cache of built levels. Levels are built on first request
/// (or all at once with `preload_all`) and then handed out read-only.
pub struct LevelCatalog<R> {
    rng: R,
    levels: BTreeMap<u32, LevelDescription>,
}

impl<R: Rng> LevelCatalog<R> {
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            levels: BTreeMap::new(),
        }
    }

    pub fn get(&mut self, level: u32) -> Result<&LevelDescription, LevelError> {
        if !self.levels.contains_key(&level) {
            let description = generate_level(level, &mut self.rng).inspect_err(|e| error!("{e}"))?;
            self.levels.insert(level, description);
        }
        self.levels.get(&level).ok_or(LevelError::NotFound(level))
    }

    // Build every level up front
    pub fn preload_all(&mut self) -> Result<(), LevelError> {
        for level in 1..=MAX_LEVEL {
            self.get(level)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn cached_levels(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::tests::ZeroRng;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn maze_size_grows_two_per_level() {
        assert_eq!(maze_size_for_level(1), 12);
        assert_eq!(maze_size_for_level(10), 30);
    }

    #[test]
    fn every_level_has_one_poi_per_index_on_free_cells() {
        let mut rng = StdRng::seed_from_u64(2024);
        for level in 1..=MAX_LEVEL {
            let desc = generate_level(level, &mut rng).unwrap();
            assert_eq!(desc.pois.len(), level as usize);
            assert_eq!(desc.size, maze_size_for_level(level));

            let obstacle_cells: HashSet<Cell> = desc.rocks.iter().chain(&desc.flora).map(|f| f.cell).collect();
            for poi in &desc.pois {
                assert!(!obstacle_cells.contains(&poi.cell), "level {level}: poi on obstacle");
                assert!(matches!(poi.kind, FeatureKind::Poi { color } if POI_PALETTE.contains(&color)));
                assert_ne!(poi.kind, FeatureKind::Poi { color: COMPLETED_COLOR });
            }
        }
    }

    #[test]
    fn no_two_entities_share_a_cell() {
        let mut rng = StdRng::seed_from_u64(77);
        for level in 1..=MAX_LEVEL {
            let desc = generate_level(level, &mut rng).unwrap();
            let mut cells: Vec<Cell> = desc.features().map(|f| f.cell).collect();
            cells.push(desc.spawn);
            let unique: HashSet<Cell> = cells.iter().copied().collect();
            assert_eq!(unique.len(), cells.len(), "level {level} has overlapping entities");
        }
    }

    #[test]
    fn spawn_is_on_the_boundary() {
        let mut rng = StdRng::seed_from_u64(8);
        for level in 1..=MAX_LEVEL {
            let desc = generate_level(level, &mut rng).unwrap();
            assert!(desc.spawn.is_on_edge(desc.size));
            assert_eq!(desc.spawn_position().y, SPAWN_Y);
        }
    }

    #[test]
    fn seeded_level_two_is_reproducible() {
        let a = generate_level(2, &mut StdRng::seed_from_u64(12345)).unwrap();
        let b = generate_level(2, &mut StdRng::seed_from_u64(12345)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.pois.len(), 2);
        for poi in &a.pois {
            let FeatureKind::Poi { color } = poi.kind else {
                panic!("non-poi feature in poi list");
            };
            assert!(POI_PALETTE.contains(&color));
        }
    }

    #[test]
    fn zero_draws_pin_the_level_two_layout() {
        let size = maze_size_for_level(2);
        let maze = generate_maze(size, &mut ZeroRng).unwrap();
        let expected = "\
.............#
############.#
...........#.#
.###########.#
...........#.#
##########.#.#
...........#.#
.###########.#
...........#.#
##########.#.#
...........#.#
.###########.#
.............#
##############
";
        assert_eq!(maze.to_string(), expected);

        // Every coin comes up rock
        let layout = place_obstacles(&maze, &mut OccupancyGrid::new(), &mut ZeroRng);
        assert_eq!(layout.rocks.len(), 99);
        assert!(layout.flora.is_empty());
        let rock_cells: Vec<Cell> = layout.rocks.iter().map(|r| r.cell).collect();
        assert_eq!(rock_cells, maze.blocked_cells().collect::<Vec<_>>());
        assert_eq!(layout.rocks[0].position, Position::new(26.0, ROCK_Y, 0.0));
    }

    #[test]
    fn zero_draws_exhaust_placement() {
        // Every draw lands on (0, 0): the first POI takes it, the spawn cannot
        let err = generate_level(1, &mut ZeroRng).unwrap_err();
        assert_eq!(
            err,
            LevelError::Placement {
                level: 1,
                source: PlacementError::Exhausted { attempts: 12 * 12 * 4, size: 12 },
            }
        );

        // Level 2 fails on its second POI
        let err = generate_level(2, &mut ZeroRng).unwrap_err();
        assert!(matches!(err, LevelError::Placement { level: 2, .. }));
    }

    #[test]
    fn unknown_levels_are_not_found() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_level(0, &mut rng), Err(LevelError::NotFound(0)));
        assert_eq!(generate_level(MAX_LEVEL + 1, &mut rng), Err(LevelError::NotFound(MAX_LEVEL + 1)));
    }

    #[test]
    fn runtime_pois_start_incomplete() {
        let desc = generate_level(3, &mut StdRng::seed_from_u64(4)).unwrap();
        let pois = desc.runtime_pois();
        assert_eq!(pois.len(), 3);
        assert!(pois.iter().all(|p| !p.completed && p.position.y == POI_Y));
    }

    #[test]
    fn catalog_builds_lazily_and_caches() {
        let mut catalog = LevelCatalog::new(StdRng::seed_from_u64(9));
        assert_eq!(catalog.cached_levels(), 0);
        let first = catalog.get(3).unwrap().clone();
        assert_eq!(catalog.cached_levels(), 1);
        assert_eq!(catalog.get(3).unwrap(), &first);
        assert_eq!(catalog.get(42).unwrap_err(), LevelError::NotFound(42));
        assert_eq!(catalog.cached_levels(), 1);
    }

    #[test]
    fn catalog_preloads_every_level() {
        let mut catalog = LevelCatalog::new(StdRng::seed_from_u64(10));
        catalog.preload_all().unwrap();
        assert_eq!(catalog.cached_levels(), MAX_LEVEL as usize);
    }
}
