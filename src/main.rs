mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::EnvFilter;

use space_invaders::audio::{self, SoundPlayer};
use space_invaders::error::AudioError;
use space_invaders::events::Sound;
use space_invaders::geometry::Bounds;
use space_invaders::scores::{HighScore, ScoreFile, MAX_NICKNAME_LEN, TOP_N};
use space_invaders::timing::FrameClock;
use space_invaders::{Command, Game, GameConfig, GameState, Key};

/// Most steps simulated in one frame after a stall.
const MAX_CATCH_UP: u32 = 5;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// at ~60 FPS a window of 8 frames (≈130 ms) outlasts the OS repeat interval.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "space_invaders", about = "Space Invaders in the terminal")]
struct Cli {
    /// JSON file overriding gameplay constants.
    #[arg(long)]
    config: Option<PathBuf>,
    /// High-score file (default: ~/.space_invaders_scores).
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Log file (default: space_invaders.log in the temp dir).
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Fixed RNG seed.
    #[arg(long)]
    seed: Option<u64>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Rings the terminal bell for the loud effects; the rest stay silent.
struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play(&mut self, sound: Sound) -> Result<(), AudioError> {
        if !matches!(sound, Sound::Explosion | Sound::ExtraLife) {
            return Ok(());
        }
        let mut err = std::io::stderr();
        err.write_all(b"\x07")
            .and_then(|()| err.flush())
            .map_err(|source| AudioError::Output { sound, source })
    }
}

// ── High-score persistence ────────────────────────────────────────────────────

fn default_scores_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".space_invaders_scores")
}

fn load_top(store: &ScoreFile) -> Vec<HighScore> {
    store.top(TOP_N).unwrap_or_else(|e| {
        tracing::warn!(path = %store.path().display(), error = %e, "could not read high scores");
        Vec::new()
    })
}

/// Append on a worker thread so the frame loop never waits on the disk.
fn save_in_background(store: ScoreFile, record: HighScore) {
    thread::spawn(move || {
        if let Err(e) = store.append(&record) {
            tracing::warn!(error = %e, "could not save high score");
        }
    });
}

// ── Host ──────────────────────────────────────────────────────────────────────

enum Flow {
    Continue,
    Quit,
}

/// Terminal-side state around the simulation: score store, nickname entry.
struct Host {
    game: Game,
    store: ScoreFile,
    top: Vec<HighScore>,
    best: u32,
    nickname: String,
    bell: TerminalBell,
}

impl Host {
    fn new(game: Game, store: ScoreFile) -> Self {
        let top = load_top(&store);
        let best = top.first().map(|r| r.score).unwrap_or(0);
        Self { game, store, top, best, nickname: String::new(), bell: TerminalBell }
    }

    /// Save the finished run once, as the game-over panel is left.
    fn record_score(&mut self) {
        let record = HighScore::new(&self.nickname, self.game.ledger().score);
        self.best = self.best.max(record.score);
        self.top.push(record.clone());
        self.top = space_invaders::scores::rank(std::mem::take(&mut self.top), TOP_N);
        save_in_background(self.store.clone(), record);
    }

    /// One-shot key presses: menus, panels, nickname entry.
    fn on_press(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Flow {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }

        match self.game.state() {
            GameState::Menu => match code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.game.apply(Command::Start);
                }
                KeyCode::Char('h') | KeyCode::Char('H') => {
                    self.top = load_top(&self.store);
                    self.game.apply(Command::ShowHighScores);
                }
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    self.game.apply(Command::ShowControls);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
                _ => {}
            },
            GameState::HighScores | GameState::Controls => {
                if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace) {
                    self.game.apply(Command::Back);
                }
            }
            GameState::Playing => {
                if code == KeyCode::Esc {
                    return Flow::Quit;
                }
            }
            GameState::GameOver(_) => match code {
                KeyCode::Enter => {
                    self.record_score();
                    self.game.apply(Command::Restart);
                }
                KeyCode::Esc => {
                    self.record_score();
                    self.game.apply(Command::ToMenu);
                }
                KeyCode::Backspace => {
                    self.nickname.pop();
                }
                KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
                    if self.nickname.chars().count() < MAX_NICKNAME_LEN {
                        self.nickname.push(c.to_ascii_uppercase());
                    }
                }
                _ => {}
            },
        }
        Flow::Continue
    }

    /// Record one key event in `key_frame` and act on presses. The press
    /// that starts a run is not kept as held, so it cannot also fire.
    fn on_key(&mut self, key_frame: &mut HashMap<KeyCode, u64>, key: KeyEvent, frame: u64) -> Flow {
        match key.kind {
            KeyEventKind::Press => {
                key_frame.insert(key.code, frame);
                let was_playing = self.game.state().is_playing();
                let flow = self.on_press(key.code, key.modifiers);
                if !was_playing && self.game.state().is_playing() {
                    key_frame.clear();
                }
                flow
            }
            KeyEventKind::Repeat => {
                key_frame.insert(key.code, frame);
                Flow::Continue
            }
            KeyEventKind::Release => {
                key_frame.remove(&key.code);
                Flow::Continue
            }
        }
    }

    /// Held movement and fire keys, applied every frame.
    fn apply_held(&mut self, key_frame: &HashMap<KeyCode, u64>, frame: u64) {
        let held = |codes: &[KeyCode]| codes.iter().any(|c| is_held(key_frame, c, frame));

        let left = held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]);
        let right = held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]);
        let shoot = held(&[KeyCode::Char(' ')]);

        for (down, key) in [(left, Key::Left), (right, Key::Right)] {
            if down {
                self.game.key_down(key);
            } else {
                self.game.key_up(key);
            }
        }
        // Single-shot discipline makes holding SPACE safe: extra presses
        // are ignored while a shot is in flight.
        if shoot {
            self.game.key_down(Key::Fire);
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and apply all their effects simultaneously.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, host: &mut Host) -> anyhow::Result<()> {
    let step = Duration::from_millis(u64::from(host.game.config().rules.tick_ms));
    let mut clock = FrameClock::new(step, MAX_CATCH_UP);
    let arena = Bounds {
        width: host.game.config().arena.width,
        height: host.game.config().arena.height,
    };

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else {
                continue;
            };
            if let Flow::Quit = host.on_key(&mut key_frame, key, frame) {
                return Ok(());
            }
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        host.apply_held(&key_frame, frame);

        let now = Instant::now();
        let steps = clock.advance(now - last);
        last = now;
        let before = host.game.state();
        for _ in 0..steps {
            host.game.tick();
        }
        if before.is_playing() && !host.game.state().is_playing() {
            host.nickname.clear();
            key_frame.clear();
        }

        let sounds = host.game.take_sounds();
        audio::play_all(&mut host.bell, &sounds);

        // ── Draw ──────────────────────────────────────────────────────────────
        let view = display::View {
            snapshot: host.game.snapshot(),
            arena,
            high_scores: &host.top,
            best: host.best,
            nickname: &host.nickname,
            extra_life_every: host.game.config().rules.extra_life_every,
        };
        display::render(out, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < step {
            thread::sleep(step - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: PathBuf) -> anyhow::Result<()> {
    let file = std::fs::File::create(&path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(
        cli.log_file
            .unwrap_or_else(|| std::env::temp_dir().join("space_invaders.log")),
    )?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let game = Game::new(config).context("invalid game configuration")?;
    let store = ScoreFile::new(cli.scores.unwrap_or_else(default_scores_path));
    let mut host = Host::new(game, store);
    tracing::info!("starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &mut host);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(best = host.best, "exiting");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(dir: &tempfile::TempDir) -> Host {
        let game = Game::with_seed(GameConfig::default(), 1).unwrap();
        Host::new(game, ScoreFile::new(dir.path().join("scores.txt")))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn space_that_starts_the_run_does_not_fire() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(&dir);
        let mut key_frame = HashMap::new();

        host.on_key(&mut key_frame, press(KeyCode::Char(' ')), 1);
        assert_eq!(host.game.state(), GameState::Playing);
        assert!(key_frame.is_empty());

        host.apply_held(&key_frame, 1);
        assert!(host.game.world().player_projectile.is_none());
    }

    #[test]
    fn held_space_fires_once_playing() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(&dir);
        let mut key_frame = HashMap::new();
        host.on_key(&mut key_frame, press(KeyCode::Enter), 1);

        host.on_key(&mut key_frame, press(KeyCode::Char(' ')), 2);
        host.apply_held(&key_frame, 2);
        assert!(host.game.world().player_projectile.is_some());
    }

    #[test]
    fn release_forgets_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(&dir);
        let mut key_frame = HashMap::new();
        host.on_key(&mut key_frame, press(KeyCode::Enter), 1);
        host.on_key(&mut key_frame, press(KeyCode::Left), 2);
        assert!(key_frame.contains_key(&KeyCode::Left));

        let mut release = press(KeyCode::Left);
        release.kind = KeyEventKind::Release;
        host.on_key(&mut key_frame, release, 3);
        assert!(key_frame.is_empty());
    }
}
