#![allow(dead_code)]

use space_invaders::entities::{GameWorld, Projectile};
use space_invaders::geometry::Rect;
use space_invaders::{Command, Game, GameConfig};

pub fn config() -> GameConfig {
    GameConfig::default()
}

/// Default world with every collection emptied; the player stays put.
pub fn empty_world() -> GameWorld {
    let mut world = GameWorld::new(&config());
    world.enemies.clear();
    world.shields.clear();
    world.enemy_projectiles.clear();
    world.player_projectile = None;
    world.special = None;
    world
}

pub fn playing_game(config: GameConfig) -> Game {
    let mut game = Game::with_seed(config, 42).unwrap();
    assert!(game.apply(Command::Start));
    game
}

/// Put a player shot right under enemy `idx` and run one tick; the shot
/// moves up into it.
pub fn shoot_down(game: &mut Game, idx: usize) {
    let target = game.world().enemies[idx].rect;
    game.world_mut().player_projectile = Some(Projectile {
        rect: Rect::new(target.center_x() - 2.5, target.bottom(), 5.0, 15.0),
    });
    game.tick();
}

/// Put an enemy shot on top of the ship and run one tick.
pub fn hit_player(game: &mut Game) {
    let ship = game.world().player.rect;
    game.world_mut().enemy_projectiles.push(Projectile {
        rect: Rect::new(ship.x + 20.0, ship.y, 5.0, 15.0),
    });
    game.tick();
}
