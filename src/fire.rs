//! Enemy fire: only the front-line enemy of each column may shoot.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{spawn_enemy_projectile, Enemy, GameWorld};

/// Members of one column share an `x` up to this tolerance.
const COLUMN_TOLERANCE: f32 = 0.5;

/// Lowest surviving enemy of every column, columns in first-seen order.
pub fn front_line(enemies: &[Enemy]) -> Vec<&Enemy> {
    let mut shooters: Vec<&Enemy> = Vec::new();
    for enemy in enemies {
        match shooters
            .iter_mut()
            .find(|s| (s.rect.x - enemy.rect.x).abs() < COLUMN_TOLERANCE)
        {
            Some(front) if enemy.rect.y > front.rect.y => *front = enemy,
            Some(_) => {}
            None => shooters.push(enemy),
        }
    }
    shooters
}

/// Pick one front-line shooter at random and spawn its shot. Returns
/// `false` when there was nobody to fire.
pub fn fire(world: &mut GameWorld, config: &GameConfig, rng: &mut impl Rng) -> bool {
    let shooters = front_line(&world.enemies);
    if shooters.is_empty() {
        return false;
    }
    let shooter = shooters[rng.gen_range(0..shooters.len())];
    let shot = spawn_enemy_projectile(config, shooter);
    world.enemy_projectiles.push(shot);
    true
}
