use rand::Rng;
use tracing::{debug, error, info};

use crate::{
    camera::CameraRig,
    config::{ControlScheme, SessionConfig},
    events::GameEvent,
};
use common::{
    LevelCatalog, LevelDescription, LevelError,
    players::{InputSnapshot, PlayerState, axis_offset, camera_relative_offset},
    pois::{any_in_range, complete_in_range, is_level_complete},
    protocol::{Obstacle, Poi, Position},
};

// ============================================================================
// Active Level
// ============================================================================

// Runtime state for the level being played. Rebuilt from the immutable
// description on every load.
#[derive(Debug, Clone)]
struct ActiveLevel {
    level: u32,
    obstacles: Vec<Obstacle>,
    pois: Vec<Poi>,
    player: PlayerState,
    prompt_visible: bool,
    passed: bool,
}

impl ActiveLevel {
    fn instantiate(description: &LevelDescription) -> Self {
        let obstacles = description
            .rocks
            .iter()
            .chain(&description.flora)
            .map(Obstacle::from)
            .collect();

        Self {
            level: description.level,
            obstacles,
            pois: description.runtime_pois(),
            player: PlayerState::new(description.spawn_position()),
            prompt_visible: false,
            passed: false,
        }
    }
}

// ============================================================================
// Game Session
// ============================================================================

/// One game instance: level catalog, the level being played, the player and
/// the follow camera. Sessions share no state, so several can run side by
/// side.
pub struct GameSession<R> {
    config: SessionConfig,
    catalog: LevelCatalog<R>,
    active: Option<ActiveLevel>,
    camera: CameraRig,
    ticks: u64,
}

impl<R: Rng> GameSession<R> {
    pub const fn new(config: SessionConfig, rng: R) -> Self {
        Self {
            config,
            catalog: LevelCatalog::new(rng),
            active: None,
            camera: CameraRig::new(config.camera),
            ticks: 0,
        }
    }

    // Build every level now instead of on first load
    pub fn preload_levels(&mut self) -> Result<(), LevelError> {
        self.catalog.preload_all()
    }

    /// Load `level`, replacing the current one. If the level cannot be built
    /// the error is logged and the current level keeps running.
    pub fn load_level(&mut self, level: u32) -> Result<Vec<GameEvent>, LevelError> {
        let description = match self.catalog.get(level) {
            Ok(description) => description,
            Err(e) => {
                error!("aborting load of level {level}: {e}");
                return Err(e);
            }
        };

        let active = ActiveLevel::instantiate(description);
        info!(
            "loaded level {} with {} obstacles, player at {:?}",
            active.level,
            active.obstacles.len(),
            active.player.position
        );

        let loaded = GameEvent::LevelLoaded {
            level: active.level,
            pois: active.pois.len(),
        };
        self.camera.follow(&active.player.position);
        self.active = Some(active);
        Ok(vec![loaded])
    }

    /// Advance one tick: move the player, refresh the interaction prompt,
    /// move the camera, then handle an interact intent if one is held.
    pub fn tick(&mut self, input: &InputSnapshot) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let view_direction = self.camera.view_direction();
        let controls = self.config.controls;
        let Some(active) = self.active.as_mut() else {
            return events;
        };
        self.ticks += 1;

        let planar = match controls {
            ControlScheme::Arrows => axis_offset(input),
            ControlScheme::Wasd => camera_relative_offset(input, view_direction),
        };
        if active.player.step(planar, input.jump, &active.obstacles) {
            debug!("player moved to {:?}", active.player.position);
        }

        let in_range = any_in_range(&active.player.position, &active.pois);
        if in_range != active.prompt_visible {
            active.prompt_visible = in_range;
            events.push(if in_range {
                GameEvent::PromptShown
            } else {
                GameEvent::PromptHidden
            });
        }

        self.camera.follow(&active.player.position);

        if input.interact {
            events.extend(self.interact());
        }
        events
    }

    /// Complete every POI in range of the player. Emits `LevelPassed` the
    /// first time all POIs of the level are complete.
    pub fn interact(&mut self) -> Vec<GameEvent> {
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };

        let mut events: Vec<GameEvent> = complete_in_range(&active.player.position, &mut active.pois)
            .into_iter()
            .map(|index| {
                info!("completed point of interest {index} on level {}", active.level);
                GameEvent::Interacted {
                    poi: index,
                    color: active.pois[index].color,
                }
            })
            .collect();

        if !active.passed && is_level_complete(&active.pois) {
            active.passed = true;
            info!("level {} passed", active.level);
            events.push(GameEvent::LevelPassed { level: active.level });
        }
        events
    }

    // Accessors for the presentation layer

    #[must_use]
    pub fn current_level(&self) -> Option<u32> {
        self.active.as_ref().map(|a| a.level)
    }

    #[must_use]
    pub fn player_position(&self) -> Option<Position> {
        self.active.as_ref().map(|a| a.player.position)
    }

    #[must_use]
    pub fn pois(&self) -> &[Poi] {
        self.active.as_ref().map_or(&[], |a| a.pois.as_slice())
    }

    #[must_use]
    pub fn is_player_grounded(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.player.is_grounded())
    }

    #[must_use]
    pub fn completed_pois(&self) -> usize {
        self.pois().iter().filter(|p| p.completed).count()
    }

    #[must_use]
    pub fn is_prompt_visible(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.prompt_visible)
    }

    #[must_use]
    pub const fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub const fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    // Description of the level being played, from the catalog cache
    pub fn description(&mut self) -> Option<&LevelDescription> {
        let level = self.current_level()?;
        self.catalog.get(level).ok()
    }

    // Test hook: put the player somewhere specific
    #[cfg(test)]
    pub(crate) fn teleport(&mut self, position: Position) {
        if let Some(active) = self.active.as_mut() {
            active.player.position = position;
        }
    }
}
