//! Tunable gameplay constants, loadable from a JSON file.
//!
//! Every section carries `#[serde(default)]`, so a config file only needs
//! the keys it wants to override.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub player: PlayerConfig,
    pub grid: GridConfig,
    pub special: SpecialConfig,
    pub shields: ShieldConfig,
    pub difficulty: DifficultyConfig,
    pub rules: RulesConfig,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Distance between the ship's top edge and the bottom of the arena.
    pub bottom_margin: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,
    /// Length of the cosmetic "hit" flash.
    pub hit_flash_ms: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 20.0,
            speed: 8.0,
            bottom_margin: 60.0,
            projectile_width: 5.0,
            projectile_height: 15.0,
            projectile_speed: 10.0,
            hit_flash_ms: 500,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub spacing: f32,
    /// Top of the first row on wave 1.
    pub top: f32,
    /// Points per row, top row first. Rows past the end reuse the last value.
    pub row_points: Vec<u32>,
    pub descent_step: f32,
    /// Extra start offset applied per wave after the first.
    pub wave_row_step: f32,
    pub max_row_offset: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 8,
            enemy_width: 30.0,
            enemy_height: 20.0,
            spacing: 10.0,
            top: 70.0,
            row_points: vec![40, 20, 20, 10],
            descent_step: 20.0,
            wave_row_step: 10.0,
            max_row_offset: 100.0,
        }
    }
}

impl GridConfig {
    pub fn points_for_row(&self, row: usize) -> u32 {
        self.row_points
            .get(row)
            .or_else(|| self.row_points.last())
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SpecialConfig {
    pub width: f32,
    pub height: f32,
    pub top: f32,
    pub speed: f32,
    pub spawn_interval_ms: u32,
    /// Candidate point values, one picked uniformly at spawn time.
    pub points: Vec<u32>,
}

impl Default for SpecialConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 20.0,
            top: 40.0,
            speed: 3.0,
            spawn_interval_ms: 15_000,
            points: vec![200],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ShieldConfig {
    pub count: usize,
    pub rows: usize,
    pub cols: usize,
    pub block_size: f32,
    pub health: u8,
    /// Gap between a shield's bottom edge and the ship's top edge.
    pub gap_above_player: f32,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            count: 4,
            rows: 3,
            cols: 5,
            block_size: 10.0,
            health: 3,
            gap_above_player: 40.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub base_enemy_speed: f32,
    pub max_enemy_speed: f32,
    pub bounce_speed_step: f32,
    pub wave_speed_step: f32,
    pub base_fire_interval_ms: f32,
    pub min_fire_interval_ms: f32,
    pub bounce_fire_step_ms: f32,
    pub wave_fire_step_ms: f32,
    pub enemy_projectile_speed: f32,
    pub enemy_projectile_width: f32,
    pub enemy_projectile_height: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            base_enemy_speed: 1.0,
            max_enemy_speed: 6.0,
            bounce_speed_step: 0.1,
            wave_speed_step: 0.5,
            base_fire_interval_ms: 1000.0,
            min_fire_interval_ms: 250.0,
            bounce_fire_step_ms: 20.0,
            wave_fire_step_ms: 100.0,
            enemy_projectile_speed: 5.0,
            enemy_projectile_width: 5.0,
            enemy_projectile_height: 15.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub initial_lives: u32,
    pub max_lives: u32,
    pub extra_life_every: u32,
    /// Score that wins the run; 0 disables victory.
    pub target_score: u32,
    pub tick_ms: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            max_lives: 6,
            extra_life_every: 1000,
            target_score: 0,
            tick_ms: 16,
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl GameConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(msg: &str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg.to_string()))
        }

        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return invalid("arena dimensions must be positive");
        }
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return invalid("grid must have at least one row and one column");
        }
        if self.grid.row_points.is_empty() {
            return invalid("grid.row_points must not be empty");
        }
        if self.special.points.is_empty() {
            return invalid("special.points must not be empty");
        }
        if !(1..=3).contains(&self.shields.health) {
            return invalid("shields.health must be between 1 and 3");
        }
        if self.rules.initial_lives == 0 {
            return invalid("rules.initial_lives must be at least 1");
        }
        if self.rules.max_lives < self.rules.initial_lives {
            return invalid("rules.max_lives must not be below rules.initial_lives");
        }
        if self.rules.extra_life_every == 0 {
            return invalid("rules.extra_life_every must be positive");
        }
        if self.rules.tick_ms == 0 {
            return invalid("rules.tick_ms must be positive");
        }
        if self.difficulty.min_fire_interval_ms <= 0.0
            || self.difficulty.base_fire_interval_ms < self.difficulty.min_fire_interval_ms
        {
            return invalid("fire interval must satisfy 0 < min <= base");
        }
        if self.difficulty.max_enemy_speed < self.difficulty.base_enemy_speed {
            return invalid("difficulty.max_enemy_speed must not be below the base speed");
        }
        Ok(())
    }
}
