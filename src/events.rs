//! Intents emitted by the simulation systems and the sound requests they
//! turn into once dispatched.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    EnemyDestroyed { points: u32 },
    SpecialEnemyDestroyed { points: u32 },
    ShieldHit { destroyed: bool },
    /// One enemy projectile reached the ship.
    PlayerHit,
    /// An enemy's lower edge reached the ship line.
    EnemiesLanded,
    WaveAdvanced { wave: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Shoot,
    InvaderKilled,
    Explosion,
    ExtraLife,
    UfoLow,
}

impl Sound {
    pub fn name(&self) -> &'static str {
        match self {
            Sound::Shoot => "shoot",
            Sound::InvaderKilled => "invader_killed",
            Sound::Explosion => "explosion",
            Sound::ExtraLife => "extra_life",
            Sound::UfoLow => "ufo_low",
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
