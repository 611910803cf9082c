//! The running game: one owner for the world, the ledger, the wave state,
//! the timers and the state machine.
//!
//! Everything happens on the caller's thread. `tick` runs one fixed step:
//! timers, movement, collision, intent dispatch, wave check, victory check.
//! Hosts read a [`Snapshot`] to draw and drain [`Game::take_sounds`] to play
//! audio.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::collision;
use crate::config::GameConfig;
use crate::entities::{spawn_player_projectile, spawn_special, GameWorld};
use crate::error::ConfigError;
use crate::events::{GameEvent, Sound};
use crate::fire;
use crate::ledger::Ledger;
use crate::movement;
use crate::state::{transition, Command, GameState, LossReason, Outcome};
use crate::timing::IntervalTimer;
use crate::wave::{self, WaveState};

/// Gameplay keys delivered by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
}

/// Read-only view handed to the renderer each frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub score: u32,
    pub lives: u32,
    pub wave: u32,
    /// The ship is flashing after a hit.
    pub player_hit: bool,
    /// `None` outside `Playing`: gameplay entities are hidden.
    pub world: Option<&'a GameWorld>,
    pub frame: u64,
}

pub struct Game {
    config: GameConfig,
    state: GameState,
    world: GameWorld,
    ledger: Ledger,
    wave: WaveState,
    special_timer: IntervalTimer,
    fire_timer: IntervalTimer,
    rng: StdRng,
    sounds: Vec<Sound>,
    frame: u64,
}

impl Game {
    /// A game sitting in the menu. Uses `config.seed` when set.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let wave = WaveState::new(&config.difficulty);
        Ok(Self {
            state: GameState::Menu,
            world: GameWorld::new(&config),
            ledger: Ledger::new(&config.rules),
            special_timer: IntervalTimer::new(config.special.spawn_interval_ms as f32),
            fire_timer: IntervalTimer::new(wave.fire_interval_ms),
            wave,
            rng,
            sounds: Vec::new(),
            frame: 0,
            config,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    /// Direct registry access for hosts and test harnesses.
    pub fn world_mut(&mut self) -> &mut GameWorld {
        &mut self.world
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    pub fn special_timer(&self) -> &IntervalTimer {
        &self.special_timer
    }

    pub fn fire_timer(&self) -> &IntervalTimer {
        &self.fire_timer
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let playing = self.state.is_playing();
        Snapshot {
            state: self.state,
            score: self.ledger.score,
            lives: self.ledger.lives,
            wave: self.wave.number,
            player_hit: playing && self.world.player.hit_cooldown_ms > 0,
            world: playing.then_some(&self.world),
            frame: self.frame,
        }
    }

    /// Drain the sound requests queued since the last call.
    pub fn take_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.sounds)
    }

    // ── State machine ─────────────────────────────────────────────────────────

    /// Apply a menu/panel command. Returns `false` if the command means
    /// nothing in the current state.
    pub fn apply(&mut self, command: Command) -> bool {
        match transition(self.state, command) {
            Some(next) => {
                self.enter(next);
                true
            }
            None => {
                tracing::debug!(state = %self.state, ?command, "command ignored");
                false
            }
        }
    }

    fn enter(&mut self, next: GameState) {
        let previous = self.state;
        self.state = next;
        if next.is_playing() {
            self.reset_run();
            self.special_timer.start();
            self.fire_timer.set_period(self.wave.fire_interval_ms);
            self.fire_timer.start();
        } else {
            self.special_timer.stop();
            self.fire_timer.stop();
            self.world.moving_left = false;
            self.world.moving_right = false;
        }
        tracing::info!(from = %previous, to = %next, score = self.ledger.score, "state changed");
    }

    fn reset_run(&mut self) {
        self.ledger = Ledger::new(&self.config.rules);
        self.wave = WaveState::new(&self.config.difficulty);
        self.world = GameWorld::new(&self.config);
        self.frame = 0;
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn key_down(&mut self, key: Key) {
        if !self.state.is_playing() {
            return;
        }
        match key {
            Key::Left => self.world.moving_left = true,
            Key::Right => self.world.moving_right = true,
            Key::Fire => {
                self.fire();
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.world.moving_left = false,
            Key::Right => self.world.moving_right = false,
            Key::Fire => {}
        }
    }

    /// Launch a player shot. A no-op while one is still in flight.
    pub fn fire(&mut self) -> bool {
        if !self.state.is_playing() || self.world.player_projectile.is_some() {
            return false;
        }
        let shot = spawn_player_projectile(&self.config, &self.world.player);
        self.world.player_projectile = Some(shot);
        self.sounds.push(Sound::Shoot);
        true
    }

    // ── Simulation ────────────────────────────────────────────────────────────

    /// One fixed step. Does nothing outside `Playing`.
    pub fn tick(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.frame += 1;
        let dt = self.config.rules.tick_ms as f32;

        if self.special_timer.advance(dt) {
            self.spawn_special();
        }
        if self.fire_timer.advance(dt) {
            self.enemy_fire();
        }

        if movement::step(&mut self.world, &mut self.wave, &self.config) {
            self.fire_timer.set_period(self.wave.fire_interval_ms);
        }

        let events = collision::resolve(&mut self.world);
        self.dispatch(events);

        if self.state.is_playing() {
            if let Some(event) = wave::check_wave(&mut self.world, &mut self.wave, &self.config) {
                self.fire_timer.set_period(self.wave.fire_interval_ms);
                self.dispatch(vec![event]);
            }
        }

        let target = self.config.rules.target_score;
        if self.state.is_playing() && target > 0 && self.ledger.score >= target {
            self.enter(GameState::GameOver(Outcome::Won));
        }
    }

    /// Special-enemy timer callback.
    pub fn spawn_special(&mut self) -> bool {
        if !self.state.is_playing() || self.world.special.is_some() {
            return false;
        }
        let points = self
            .config
            .special
            .points
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default();
        self.world.special = Some(spawn_special(&self.config, points));
        self.sounds.push(Sound::UfoLow);
        tracing::debug!(points, "special enemy spawned");
        true
    }

    /// Enemy-fire timer callback.
    pub fn enemy_fire(&mut self) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        fire::fire(&mut self.world, &self.config, &mut self.rng)
    }

    /// Apply intents to the ledger and the state machine, in order. Intents
    /// left over once the run has ended are dropped.
    fn dispatch(&mut self, events: Vec<GameEvent>) {
        for event in events {
            if !self.state.is_playing() {
                break;
            }
            match event {
                GameEvent::EnemyDestroyed { points } => {
                    self.sounds.push(Sound::InvaderKilled);
                    self.award(points);
                }
                GameEvent::SpecialEnemyDestroyed { points } => {
                    self.sounds.push(Sound::Explosion);
                    self.award(points);
                }
                GameEvent::ShieldHit { .. } => {}
                GameEvent::PlayerHit => {
                    self.sounds.push(Sound::Explosion);
                    self.world.player.hit_cooldown_ms = self.config.player.hit_flash_ms;
                    let dead = self.ledger.lose_life();
                    tracing::info!(lives = self.ledger.lives, "player hit");
                    if dead {
                        self.enter(GameState::GameOver(Outcome::Lost(LossReason::OutOfLives)));
                    }
                }
                GameEvent::EnemiesLanded => {
                    self.enter(GameState::GameOver(Outcome::Lost(LossReason::Overrun)));
                }
                GameEvent::WaveAdvanced { .. } => {}
            }
        }
    }

    fn award(&mut self, points: u32) {
        if self.ledger.add_score(points) {
            self.sounds.push(Sound::ExtraLife);
            tracing::info!(score = self.ledger.score, lives = self.ledger.lives, "extra life");
        }
    }
}
