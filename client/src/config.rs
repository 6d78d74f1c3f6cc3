use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::{camera::CameraMode, constants::LOG_FILTER};

// ============================================================================
// Session Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ControlScheme {
    // Directions move along the world axes
    #[default]
    Arrows,
    // Directions are relative to where the camera looks
    Wasd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub controls: ControlScheme,
    pub camera: CameraMode,
}

// ============================================================================
// Logging
// ============================================================================

// Install the global tracing subscriber. RUST_LOG overrides the default
// filter. Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
