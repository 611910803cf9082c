//! Wave progression and the difficulty knobs it turns.

use crate::config::{DifficultyConfig, GameConfig};
use crate::entities::{spawn_grid, Direction, GameWorld};
use crate::events::GameEvent;

#[derive(Clone, Debug, PartialEq)]
pub struct WaveState {
    pub number: u32,
    pub enemy_speed: f32,
    pub fire_interval_ms: f32,
}

impl WaveState {
    pub fn new(difficulty: &DifficultyConfig) -> Self {
        Self {
            number: 1,
            enemy_speed: difficulty.base_enemy_speed,
            fire_interval_ms: difficulty.base_fire_interval_ms,
        }
    }

    /// Harden after the grid bounced off an edge.
    pub fn on_bounce(&mut self, difficulty: &DifficultyConfig) {
        self.harden(difficulty, difficulty.bounce_speed_step, difficulty.bounce_fire_step_ms);
    }

    /// Harden for the next wave and bump the counter.
    pub fn advance(&mut self, difficulty: &DifficultyConfig) {
        self.number = self.number.saturating_add(1);
        self.harden(difficulty, difficulty.wave_speed_step, difficulty.wave_fire_step_ms);
    }

    fn harden(&mut self, difficulty: &DifficultyConfig, speed_step: f32, fire_step_ms: f32) {
        self.enemy_speed = (self.enemy_speed + speed_step).min(difficulty.max_enemy_speed);
        self.fire_interval_ms =
            (self.fire_interval_ms - fire_step_ms).max(difficulty.min_fire_interval_ms);
    }
}

/// Start the next wave if the grid has been wiped out.
///
/// The caller only invokes this while playing; a non-empty grid makes it a
/// no-op, so repeated calls after the respawn never stack grids.
pub fn check_wave(
    world: &mut GameWorld,
    wave: &mut WaveState,
    config: &GameConfig,
) -> Option<GameEvent> {
    if !world.enemies.is_empty() {
        return None;
    }

    wave.advance(&config.difficulty);
    world.enemy_projectiles.clear();
    world.enemies = spawn_grid(config, wave.number);
    world.grid_direction = Direction::Right;

    tracing::info!(
        wave = wave.number,
        speed = wave.enemy_speed,
        fire_interval_ms = wave.fire_interval_ms,
        "wave advanced"
    );
    Some(GameEvent::WaveAdvanced { wave: wave.number })
}
