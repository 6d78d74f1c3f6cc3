#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use bevy_math::Vec3;

use crate::{
    constants::{COMPLETED_COLOR, DEFAULT_COLLISION_RADIUS, FLORA_COLLISION_RADIUS, FLORA_Y_OFFSET, ROCK_COLLISION_RADIUS},
    grid::Cell,
};

// Macro to reduce boilerplate for plain level data structs
macro_rules! level_data {
    ($(#[$meta:meta])* struct $name:ident $body:tt) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
        pub struct $name $body
    };
}

// ============================================================================
// Common Data Types
// ============================================================================

// World-space position in meters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        Vec3::from(*self).distance(Vec3::from(*other))
    }
}

impl From<Vec3> for Position {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Position> for Vec3 {
    fn from(p: Position) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

// 24-bit RGB color, the same hex notation the renderer takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Color(pub u32);

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

// ============================================================================
// Level Features
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum FeatureKind {
    Rock,
    Flora,
    Poi { color: Color },
}

level_data! {
// A feature placed on a lattice cell. `position` is the base world position;
// see `render_position` for where the renderer should put the mesh.
struct PlacedFeature {
    pub cell: Cell,
    pub position: Position,
    pub kind: FeatureKind,
}
}

impl PlacedFeature {
    // Rocks and flora block movement, POIs do not
    #[must_use]
    pub const fn collision_radius(&self) -> Option<f32> {
        match self.kind {
            FeatureKind::Rock => Some(ROCK_COLLISION_RADIUS),
            FeatureKind::Flora => Some(FLORA_COLLISION_RADIUS),
            FeatureKind::Poi { .. } => None,
        }
    }

    #[must_use]
    pub const fn render_position(&self) -> Position {
        match self.kind {
            FeatureKind::Flora => Position::new(self.position.x, self.position.y + FLORA_Y_OFFSET, self.position.z),
            _ => self.position,
        }
    }
}

// Collision proxy handed to the resolver every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Position,
    pub collision_radius: Option<f32>,
}

impl Obstacle {
    #[must_use]
    pub const fn new(position: Position, collision_radius: Option<f32>) -> Self {
        Self {
            position,
            collision_radius,
        }
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.collision_radius.unwrap_or(DEFAULT_COLLISION_RADIUS)
    }
}

impl From<&PlacedFeature> for Obstacle {
    fn from(feature: &PlacedFeature) -> Self {
        Self::new(feature.render_position(), feature.collision_radius())
    }
}

level_data! {
// Runtime copy of a POI. Completion is the source of truth; the displayed
// color is derived from it.
struct Poi {
    pub position: Position,
    pub color: Color,
    pub completed: bool,
}
}

impl Poi {
    #[must_use]
    pub const fn display_color(&self) -> Color {
        if self.completed { COMPLETED_COLOR } else { self.color }
    }
}

impl TryFrom<&PlacedFeature> for Poi {
    type Error = FeatureKind;

    fn try_from(feature: &PlacedFeature) -> Result<Self, Self::Error> {
        match feature.kind {
            FeatureKind::Poi { color } => Ok(Self {
                position: feature.position,
                color,
                completed: false,
            }),
            other => Err(other),
        }
    }
}
