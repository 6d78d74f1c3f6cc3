use bevy_math::Vec3;
use clap::ValueEnum;

use crate::constants::*;
use common::protocol::Position;

// ============================================================================
// Camera Rig
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CameraMode {
    // Fixed offset above and behind the player
    #[default]
    Orbit,
    // Circles the player with mouse x movement while the pointer is locked
    PointerLock,
    // Fixed height, trails the player along z
    Overhead,
}

// Third-person follow camera. Owns its own state; one per session.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    mode: CameraMode,
    eye: Vec3,
    target: Vec3,
    mouse_x: f32, // accumulated horizontal mouse movement in pixels
    locked: bool,
}

impl CameraRig {
    #[must_use]
    pub const fn new(mode: CameraMode) -> Self {
        Self {
            mode,
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            mouse_x: 0.0,
            locked: false,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> CameraMode {
        self.mode
    }

    #[must_use]
    pub const fn eye(&self) -> Vec3 {
        self.eye
    }

    #[must_use]
    pub const fn target(&self) -> Vec3 {
        self.target
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub const fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn add_mouse_motion(&mut self, dx: f32) {
        self.mouse_x += dx;
    }

    // Unit vector the camera looks along. Until the camera has been placed
    // (pointer-lock before the first lock) it looks down -z.
    #[must_use]
    pub fn view_direction(&self) -> Vec3 {
        (self.target - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    // Move the camera for the player's current position
    pub fn follow(&mut self, player: &Position) {
        let player = Vec3::from(*player);
        match self.mode {
            CameraMode::Orbit => {
                self.eye = player + Vec3::new(0.0, ORBIT_CAMERA_HEIGHT, ORBIT_CAMERA_DISTANCE);
                self.target = player;
            }
            CameraMode::PointerLock => {
                if !self.locked {
                    return;
                }
                let angle = self.mouse_x * MOUSE_SENSITIVITY;
                self.eye = player
                    + Vec3::new(
                        angle.sin() * POINTER_LOCK_CAMERA_DISTANCE,
                        POINTER_LOCK_CAMERA_HEIGHT,
                        angle.cos() * POINTER_LOCK_CAMERA_DISTANCE,
                    );
                self.target = player;
            }
            CameraMode::Overhead => {
                self.eye = Vec3::new(player.x, OVERHEAD_CAMERA_HEIGHT, player.z + OVERHEAD_CAMERA_Z_OFFSET);
                self.target = player;
            }
        }
    }
}
