use crate::protocol::Color;

// ============================================================================
// Grid & Levels
// ============================================================================

pub const SPACING: f32 = 2.0; // World units per lattice cell
pub const GROUND_LAYER: i32 = 0; // Lattice layer every ground feature sits on
pub const BASE_MAZE_SIZE: usize = 10; // Maze side length before the per-level growth
pub const MAZE_GROWTH_PER_LEVEL: usize = 2; // Extra cells per side for each level
pub const MAX_LEVEL: u32 = 10; // Highest level index in the catalog
pub const PLACEMENT_ATTEMPTS_PER_CELL: usize = 4; // Rejection sampling cap is size * size * this

// ============================================================================
// Features
// ============================================================================

// World heights
pub const ROCK_Y: f32 = 0.5;
pub const FLORA_BASE_Y: f32 = 0.0;
pub const FLORA_Y_OFFSET: f32 = 1.0; // Flora is lifted above its base when instantiated
pub const POI_Y: f32 = 0.5;
pub const SPAWN_Y: f32 = 0.5;

// Collision radii
pub const ROCK_COLLISION_RADIUS: f32 = 1.4;
pub const FLORA_COLLISION_RADIUS: f32 = 1.0;
pub const DEFAULT_COLLISION_RADIUS: f32 = 1.5; // Used when an obstacle has no radius of its own

// Probability that a blocked maze cell becomes a rock rather than flora
pub const ROCK_PROBABILITY: f64 = 0.5;

// ============================================================================
// Points of Interest
// ============================================================================

pub const COMPLETED_COLOR: Color = Color(0x00ff00);
pub const POI_PALETTE: [Color; 5] = [
    Color(0xff0000), // red
    Color(0x0000ff), // blue
    Color(0xffff00), // yellow
    Color(0xff00ff), // magenta
    Color(0xffa500), // orange
];
pub const INTERACTION_RADIUS: f32 = 1.0; // Player must be strictly closer than this

// ============================================================================
// Player Kinematics
// ============================================================================

// All values are per tick
pub const MOVE_STEP: f32 = 0.05;
pub const JUMP_IMPULSE: f32 = 0.2;
pub const FALL_STEP: f32 = 0.05;
pub const REST_HEIGHT: f32 = 1.0; // Grounded at or below this height
