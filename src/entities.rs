//! Game entity types and the registry that owns them.
//!
//! Every category is its own struct so each carries exactly the payload it
//! needs: enemies a point value, shield blocks a health counter. Generator
//! routines for grids, shields and projectiles live here too.

use crate::config::GameConfig;
use crate::geometry::{Bounds, Rect};

/// Horizontal heading shared by the whole enemy grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Row band of an enemy; only affects how it is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyTier {
    Top,
    Mid,
    Low,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    /// Remaining time of the cosmetic hit flash.
    pub hit_cooldown_ms: u32,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub rect: Rect,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub points: u32,
    pub tier: EnemyTier,
}

#[derive(Clone, Debug)]
pub struct SpecialEnemy {
    pub rect: Rect,
    pub points: u32,
}

#[derive(Clone, Debug)]
pub struct ShieldBlock {
    pub rect: Rect,
    pub health: u8,
}

impl ShieldBlock {
    /// Visual damage tier, 0 for an intact block.
    pub fn damage_tier(&self) -> u8 {
        3u8.saturating_sub(self.health)
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// All live entities of one run.
#[derive(Clone, Debug)]
pub struct GameWorld {
    pub bounds: Bounds,
    pub player: Player,
    /// At most one player shot may be in flight.
    pub player_projectile: Option<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub grid_direction: Direction,
    pub special: Option<SpecialEnemy>,
    pub shields: Vec<ShieldBlock>,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl GameWorld {
    /// A fresh world with the player centred at the bottom, a full grid at
    /// the wave-1 row and intact shields.
    pub fn new(config: &GameConfig) -> Self {
        let bounds = Bounds { width: config.arena.width, height: config.arena.height };
        let mut world = Self {
            bounds,
            player: spawn_player(config),
            player_projectile: None,
            enemy_projectiles: Vec::new(),
            enemies: Vec::new(),
            grid_direction: Direction::Right,
            special: None,
            shields: Vec::new(),
            moving_left: false,
            moving_right: false,
        };
        world.enemies = spawn_grid(config, 1);
        world.shields = spawn_shields(config, &world.player);
        world
    }
}

// ── Generators ────────────────────────────────────────────────────────────────

pub fn spawn_player(config: &GameConfig) -> Player {
    let p = &config.player;
    Player {
        rect: Rect::new(
            (config.arena.width - p.width) / 2.0,
            config.arena.height - p.bottom_margin,
            p.width,
            p.height,
        ),
        hit_cooldown_ms: 0,
    }
}

/// Top of the grid's first row for the given wave.
pub fn grid_top(config: &GameConfig, wave: u32) -> f32 {
    let g = &config.grid;
    let offset = (g.wave_row_step * wave.saturating_sub(1) as f32).min(g.max_row_offset);
    g.top + offset
}

/// A full, horizontally centred enemy grid, rows top to bottom.
pub fn spawn_grid(config: &GameConfig, wave: u32) -> Vec<Enemy> {
    let g = &config.grid;
    let grid_width = g.cols as f32 * g.enemy_width + (g.cols.saturating_sub(1)) as f32 * g.spacing;
    let start_x = (config.arena.width - grid_width) / 2.0;
    let top = grid_top(config, wave);

    let mut enemies = Vec::with_capacity(g.rows * g.cols);
    for row in 0..g.rows {
        let tier = if row == 0 {
            EnemyTier::Top
        } else if row + 1 < g.rows {
            EnemyTier::Mid
        } else {
            EnemyTier::Low
        };
        for col in 0..g.cols {
            enemies.push(Enemy {
                rect: Rect::new(
                    start_x + col as f32 * (g.enemy_width + g.spacing),
                    top + row as f32 * (g.enemy_height + g.spacing),
                    g.enemy_width,
                    g.enemy_height,
                ),
                points: g.points_for_row(row),
                tier,
            });
        }
    }
    enemies
}

/// Evenly spaced bunkers of full-health blocks just above the ship.
pub fn spawn_shields(config: &GameConfig, player: &Player) -> Vec<ShieldBlock> {
    let s = &config.shields;
    if s.count == 0 {
        return Vec::new();
    }
    let shield_width = s.cols as f32 * s.block_size;
    let slot = config.arena.width / s.count as f32;
    let top = player.rect.y - s.gap_above_player - s.rows as f32 * s.block_size;

    let mut blocks = Vec::with_capacity(s.count * s.rows * s.cols);
    for i in 0..s.count {
        let left = slot * i as f32 + (slot - shield_width) / 2.0;
        for row in 0..s.rows {
            for col in 0..s.cols {
                blocks.push(ShieldBlock {
                    rect: Rect::new(
                        left + col as f32 * s.block_size,
                        top + row as f32 * s.block_size,
                        s.block_size,
                        s.block_size,
                    ),
                    health: s.health,
                });
            }
        }
    }
    blocks
}

/// Player shot centred on the ship, sitting just above it.
pub fn spawn_player_projectile(config: &GameConfig, player: &Player) -> Projectile {
    let p = &config.player;
    Projectile {
        rect: Rect::new(
            player.rect.center_x() - p.projectile_width / 2.0,
            player.rect.y - p.projectile_height,
            p.projectile_width,
            p.projectile_height,
        ),
    }
}

/// Enemy shot centred under the shooter.
pub fn spawn_enemy_projectile(config: &GameConfig, shooter: &Enemy) -> Projectile {
    let d = &config.difficulty;
    Projectile {
        rect: Rect::new(
            shooter.rect.center_x() - d.enemy_projectile_width / 2.0,
            shooter.rect.bottom(),
            d.enemy_projectile_width,
            d.enemy_projectile_height,
        ),
    }
}

/// Special enemy entering from just past the left edge.
pub fn spawn_special(config: &GameConfig, points: u32) -> SpecialEnemy {
    let s = &config.special;
    SpecialEnemy { rect: Rect::new(-s.width, s.top, s.width, s.height), points }
}
