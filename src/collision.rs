//! Collision resolution, run once per tick after movement.
//!
//! Checks run in a fixed order and a projectile is consumed by the first
//! thing it hits:
//!
//! 1. player shot vs. enemies (registry order)
//! 2. player shot vs. special enemy
//! 3. any shot vs. shield blocks
//! 4. enemy shots vs. the ship
//! 5. enemies vs. the ship line
//!
//! The registry is mutated in place; score, lives and state changes are left
//! to whoever dispatches the returned intents.

use crate::entities::{GameWorld, Projectile, ShieldBlock};
use crate::events::GameEvent;

pub fn resolve(world: &mut GameWorld) -> Vec<GameEvent> {
    let mut events = Vec::new();

    player_shot_vs_enemies(world, &mut events);
    player_shot_vs_special(world, &mut events);
    shots_vs_shields(world, &mut events);
    enemy_shots_vs_player(world, &mut events);
    if enemies_reached_ship(world) {
        events.push(GameEvent::EnemiesLanded);
    }

    events
}

fn player_shot_vs_enemies(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    let Some(shot) = world.player_projectile.as_ref() else {
        return;
    };
    if let Some(i) = world.enemies.iter().position(|e| e.rect.overlaps(&shot.rect)) {
        let enemy = world.enemies.remove(i);
        world.player_projectile = None;
        tracing::debug!(points = enemy.points, x = enemy.rect.x, y = enemy.rect.y, "enemy destroyed");
        events.push(GameEvent::EnemyDestroyed { points: enemy.points });
    }
}

fn player_shot_vs_special(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    let (Some(shot), Some(special)) = (world.player_projectile.as_ref(), world.special.as_ref())
    else {
        return;
    };
    if shot.rect.overlaps(&special.rect) {
        let points = special.points;
        world.special = None;
        world.player_projectile = None;
        tracing::debug!(points, "special enemy destroyed");
        events.push(GameEvent::SpecialEnemyDestroyed { points });
    }
}

fn shots_vs_shields(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    if let Some(shot) = world.player_projectile.as_ref() {
        if let Some(destroyed) = hit_shield(&mut world.shields, shot) {
            world.player_projectile = None;
            events.push(GameEvent::ShieldHit { destroyed });
        }
    }

    let shields = &mut world.shields;
    world.enemy_projectiles.retain(|shot| match hit_shield(shields, shot) {
        Some(destroyed) => {
            events.push(GameEvent::ShieldHit { destroyed });
            false
        }
        None => true,
    });
}

/// Damage the first block `shot` overlaps. Returns whether that block was
/// destroyed, or `None` if the shot missed every block.
fn hit_shield(shields: &mut Vec<ShieldBlock>, shot: &Projectile) -> Option<bool> {
    let i = shields.iter().position(|b| b.rect.overlaps(&shot.rect))?;
    let block = &mut shields[i];
    debug_assert!(block.health > 0, "live shield block with zero health");
    block.health = block.health.saturating_sub(1);
    if block.health == 0 {
        shields.remove(i);
        Some(true)
    } else {
        Some(false)
    }
}

fn enemy_shots_vs_player(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    let ship = world.player.rect;
    world.enemy_projectiles.retain(|shot| {
        if shot.rect.overlaps(&ship) {
            events.push(GameEvent::PlayerHit);
            false
        } else {
            true
        }
    });
}

fn enemies_reached_ship(world: &GameWorld) -> bool {
    let ship_line = world.player.rect.y;
    world.enemies.iter().any(|e| e.rect.bottom() >= ship_line)
}
