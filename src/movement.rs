//! Per-tick movement for every entity category.

use crate::config::GameConfig;
use crate::entities::{Direction, GameWorld};
use crate::wave::WaveState;

/// Advance every category by one tick. Returns `true` if the enemy grid
/// bounced off an edge this tick.
pub fn step(world: &mut GameWorld, wave: &mut WaveState, config: &GameConfig) -> bool {
    move_player(world, config.player.speed);
    move_player_projectile(world, config.player.projectile_speed);
    move_enemy_projectiles(world, config.difficulty.enemy_projectile_speed);
    let bounced = move_grid(world, wave, config);
    move_special(world, config.special.speed);

    let tick_ms = config.rules.tick_ms;
    world.player.hit_cooldown_ms = world.player.hit_cooldown_ms.saturating_sub(tick_ms);
    bounced
}

/// Both keys may be held at once; each applies independently.
pub fn move_player(world: &mut GameWorld, speed: f32) {
    let width = world.bounds.width;
    let rect = &mut world.player.rect;
    if world.moving_left && rect.x > 0.0 {
        rect.x = (rect.x - speed).max(0.0);
    }
    if world.moving_right && rect.right() < width {
        rect.x = (rect.x + speed).min(width - rect.w);
    }
}

pub fn move_player_projectile(world: &mut GameWorld, speed: f32) {
    if let Some(shot) = world.player_projectile.as_mut() {
        shot.rect.y -= speed;
        if shot.rect.y < 0.0 {
            world.player_projectile = None;
        }
    }
}

pub fn move_enemy_projectiles(world: &mut GameWorld, speed: f32) {
    let height = world.bounds.height;
    for shot in &mut world.enemy_projectiles {
        shot.rect.y += speed;
    }
    world.enemy_projectiles.retain(|p| p.rect.y <= height);
}

/// Shift the grid as one rigid body. If any member ends up past an edge the
/// shared direction flips, the wave hardens and every member descends.
pub fn move_grid(world: &mut GameWorld, wave: &mut WaveState, config: &GameConfig) -> bool {
    if world.enemies.is_empty() {
        return false;
    }

    let dx = wave.enemy_speed * world.grid_direction.sign();
    for enemy in &mut world.enemies {
        enemy.rect.translate(dx, 0.0);
    }

    let width = world.bounds.width;
    let hit_edge = match world.grid_direction {
        Direction::Left => world.enemies.iter().any(|e| e.rect.x < 0.0),
        Direction::Right => world.enemies.iter().any(|e| e.rect.right() > width),
    };
    if !hit_edge {
        return false;
    }

    world.grid_direction = world.grid_direction.flipped();
    wave.on_bounce(&config.difficulty);
    let dy = config.grid.descent_step;
    for enemy in &mut world.enemies {
        enemy.rect.translate(0.0, dy);
    }
    tracing::debug!(speed = wave.enemy_speed, direction = ?world.grid_direction, "grid bounced");
    true
}

/// Crosses left to right; leaving the arena removes it without a score.
pub fn move_special(world: &mut GameWorld, speed: f32) {
    let width = world.bounds.width;
    if let Some(special) = world.special.as_mut() {
        special.rect.x += speed;
        if special.rect.x > width {
            world.special = None;
        }
    }
}
