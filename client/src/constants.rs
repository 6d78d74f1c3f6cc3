// ============================================================================
// Client Constants
// ============================================================================

// Orbit camera: fixed offset from the player
pub const ORBIT_CAMERA_HEIGHT: f32 = 5.0; // meters above the player
pub const ORBIT_CAMERA_DISTANCE: f32 = 10.0; // meters behind the player (+z)

// Pointer-lock camera: circles the player following mouse x movement
pub const POINTER_LOCK_CAMERA_DISTANCE: f32 = 10.0;
pub const POINTER_LOCK_CAMERA_HEIGHT: f32 = 5.0;

// Overhead camera: fixed height, trails the player along z
pub const OVERHEAD_CAMERA_HEIGHT: f32 = 10.0;
pub const OVERHEAD_CAMERA_Z_OFFSET: f32 = 10.0;

// Mouse sensitivity as radians per pixel
pub const MOUSE_SENSITIVITY: f32 = 0.002;

// Ticks a movement command runs for when no count is given
pub const DEFAULT_TICKS_PER_STEP: u32 = 20;

// Default tracing filter when RUST_LOG is unset
pub const LOG_FILTER: &str = "info";
