use bevy_math::Vec3;

use crate::{
    collision::resolve_move,
    constants::{FALL_STEP, JUMP_IMPULSE, MOVE_STEP, REST_HEIGHT},
    protocol::{Obstacle, Position},
};

// ============================================================================
// Input Snapshot
// ============================================================================

// Intents held during one tick. Built by whatever polls the input device and
// passed into the tick; nothing here reads global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub interact: bool,
}

// Planar offset for world-axis controls: forward is -z, right is +x
#[must_use]
pub fn axis_offset(input: &InputSnapshot) -> Vec3 {
    let mut offset = Vec3::ZERO;
    if input.forward {
        offset.z -= MOVE_STEP;
    }
    if input.back {
        offset.z += MOVE_STEP;
    }
    if input.left {
        offset.x -= MOVE_STEP;
    }
    if input.right {
        offset.x += MOVE_STEP;
    }
    offset
}

// Planar offset for camera-relative controls. The view direction is flattened
// onto the ground plane; strafing uses its cross product with up.
#[must_use]
pub fn camera_relative_offset(input: &InputSnapshot, view_direction: Vec3) -> Vec3 {
    let forward = Vec3::new(view_direction.x, 0.0, view_direction.z).normalize_or_zero();
    let strafe = forward.cross(Vec3::Y);

    let mut offset = Vec3::ZERO;
    if input.forward {
        offset += forward * MOVE_STEP;
    }
    if input.back {
        offset -= forward * MOVE_STEP;
    }
    if input.left {
        offset -= strafe * MOVE_STEP;
    }
    if input.right {
        offset += strafe * MOVE_STEP;
    }
    offset
}

// ============================================================================
// Player Kinematics
// ============================================================================

// Simplified kinematic body: one jump impulse per grounded state, constant
// descent while above rest height. No acceleration and no slopes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Position,
    pub can_jump: bool,
}

impl PlayerState {
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            can_jump: false,
        }
    }

    // Vertical change for this tick. Updates the grounded flag.
    fn vertical_step(&mut self, jump: bool) -> f32 {
        let mut y = self.position.y;
        if jump && self.can_jump {
            y += JUMP_IMPULSE;
            self.can_jump = false;
        }
        if y > REST_HEIGHT {
            y -= FALL_STEP;
        } else {
            self.can_jump = true;
        }
        y - self.position.y
    }

    /// Advance one tick with the given planar offset. The whole candidate
    /// (planar and vertical) is tested against the obstacles and either taken
    /// or discarded. Returns true if the position changed.
    pub fn step(&mut self, planar_offset: Vec3, jump: bool, obstacles: &[Obstacle]) -> bool {
        let dy = self.vertical_step(jump);
        let offset = Vec3::new(planar_offset.x, dy, planar_offset.z);
        let next = resolve_move(&self.position, offset, obstacles);
        let moved = next != self.position;
        self.position = next;
        moved
    }

    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.position.y <= REST_HEIGHT
    }
}
