//! Audio collaborator seam. The simulation only names sounds; playing them is
//! the host's business, and a failure there never reaches the game loop.

use crate::error::AudioError;
use crate::events::Sound;

pub trait SoundPlayer {
    fn play(&mut self, sound: Sound) -> Result<(), AudioError>;
}

/// Player that discards every request.
#[derive(Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _sound: Sound) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Hand every request to `player`, logging and dropping failures.
/// Returns how many sounds played.
pub fn play_all<P: SoundPlayer + ?Sized>(player: &mut P, sounds: &[Sound]) -> usize {
    let mut played = 0;
    for &sound in sounds {
        match player.play(sound) {
            Ok(()) => played += 1,
            Err(e) => tracing::warn!(sound = %sound, error = %e, "sound playback failed"),
        }
    }
    played
}
