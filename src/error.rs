use thiserror::Error;

use crate::events::Sound;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high-score store I/O failed")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output failed for `{sound}`")]
    Output {
        sound: Sound,
        #[source]
        source: std::io::Error,
    },
}
