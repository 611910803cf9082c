//! Persisted high scores: an append-only text file of `NICKNAME:SCORE`
//! lines.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::ScoreError;

pub const MAX_NICKNAME_LEN: usize = 10;
pub const DEFAULT_NICKNAME: &str = "PLAYER";
/// Entries shown on the high-score panel.
pub const TOP_N: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScore {
    pub nickname: String,
    pub score: u32,
}

/// Upper-case, at most ten characters, blank becomes `PLAYER`. Control
/// characters and `:` are dropped so a record always stays on one line.
pub fn normalize_nickname(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !c.is_control() && *c != ':').collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return DEFAULT_NICKNAME.to_string();
    }
    trimmed.to_uppercase().chars().take(MAX_NICKNAME_LEN).collect()
}

impl HighScore {
    pub fn new(nickname: &str, score: u32) -> Self {
        Self { nickname: normalize_nickname(nickname), score }
    }

    pub fn to_line(&self) -> String {
        format!("{}:{}", self.nickname, self.score)
    }

    /// `None` for anything that is not `NAME:NUMBER`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (name, score) = line.trim().rsplit_once(':')?;
        let score = score.trim().parse().ok()?;
        if name.trim().is_empty() {
            return None;
        }
        Some(Self::new(name, score))
    }
}

/// Sort best first; equal scores keep file order.
pub fn rank(mut records: Vec<HighScore>, n: usize) -> Vec<HighScore> {
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(n);
    records
}

#[derive(Clone, Debug)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &HighScore) -> Result<(), ScoreError> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", record.to_line())?;
        tracing::info!(nickname = %record.nickname, score = record.score, "high score saved");
        Ok(())
    }

    /// Every parseable record; a missing file reads as empty. Lines that
    /// are not UTF-8 are skipped like any other malformed line.
    pub fn load(&self) -> Result<Vec<HighScore>, ScoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(bytes
            .split(|&b| b == b'\n')
            .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
            .filter_map(|line| {
                let parsed = std::str::from_utf8(line).ok().and_then(HighScore::parse_line);
                if parsed.is_none() {
                    tracing::debug!(line = %String::from_utf8_lossy(line), "skipping malformed score line");
                }
                parsed
            })
            .collect())
    }

    pub fn top(&self, n: usize) -> Result<Vec<HighScore>, ScoreError> {
        Ok(rank(self.load()?, n))
    }
}
