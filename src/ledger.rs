//! Score and lives bookkeeping for one run.

use crate::config::RulesConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    pub score: u32,
    pub lives: u32,
    pub max_lives: u32,
    pub extra_life_every: u32,
}

impl Ledger {
    pub fn new(rules: &RulesConfig) -> Self {
        debug_assert!(rules.initial_lives <= rules.max_lives);
        Self {
            score: 0,
            lives: rules.initial_lives.min(rules.max_lives),
            max_lives: rules.max_lives,
            extra_life_every: rules.extra_life_every.max(1),
        }
    }

    /// Add points; returns `true` when the addition crossed an extra-life
    /// threshold and a life was actually granted.
    pub fn add_score(&mut self, points: u32) -> bool {
        let old = self.score;
        self.score = self.score.saturating_add(points);
        let crossed = self.score / self.extra_life_every > old / self.extra_life_every;
        if crossed && self.lives < self.max_lives {
            self.lives += 1;
            true
        } else {
            false
        }
    }

    /// Take one life; returns `true` once no lives remain.
    pub fn lose_life(&mut self) -> bool {
        debug_assert!(self.lives > 0, "lose_life with no lives left");
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}
