//! Space Invaders simulation core.
//!
//! The binary in `main.rs` is a terminal host; everything that decides what
//! happens each frame lives in this library.

pub mod audio;
pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod fire;
pub mod game;
pub mod geometry;
pub mod ledger;
pub mod movement;
pub mod scores;
pub mod state;
pub mod timing;
pub mod wave;

pub use config::GameConfig;
pub use game::{Game, Key, Snapshot};
pub use state::{Command, GameState, LossReason, Outcome};
