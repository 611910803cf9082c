use std::io;

use space_invaders::audio::{play_all, Silent, SoundPlayer};
use space_invaders::error::AudioError;
use space_invaders::events::Sound;

/// Fails on explosions, records everything else.
#[derive(Default)]
struct Flaky {
    played: Vec<Sound>,
}

impl SoundPlayer for Flaky {
    fn play(&mut self, sound: Sound) -> Result<(), AudioError> {
        if sound == Sound::Explosion {
            return Err(AudioError::Output {
                sound,
                source: io::Error::new(io::ErrorKind::Other, "device gone"),
            });
        }
        self.played.push(sound);
        Ok(())
    }
}

#[test]
fn failures_are_swallowed_and_the_rest_still_play() {
    let mut player = Flaky::default();
    let sounds = [Sound::Shoot, Sound::Explosion, Sound::InvaderKilled];
    assert_eq!(play_all(&mut player, &sounds), 2);
    assert_eq!(player.played, vec![Sound::Shoot, Sound::InvaderKilled]);
}

#[test]
fn silent_player_accepts_everything() {
    let sounds = [Sound::Shoot, Sound::Explosion, Sound::ExtraLife, Sound::UfoLow];
    assert_eq!(play_all(&mut Silent, &sounds), 4);
}

#[test]
fn sound_names() {
    assert_eq!(Sound::Shoot.name(), "shoot");
    assert_eq!(Sound::InvaderKilled.name(), "invader_killed");
    assert_eq!(Sound::Explosion.name(), "explosion");
    assert_eq!(Sound::ExtraLife.name(), "extra_life");
    assert_eq!(Sound::UfoLow.to_string(), "ufo_low");
}
