use space_invaders::config::RulesConfig;
use space_invaders::ledger::Ledger;

fn ledger(score: u32, lives: u32) -> Ledger {
    Ledger { score, lives, max_lives: 6, extra_life_every: 1000 }
}

#[test]
fn new_ledger_uses_rules() {
    let l = Ledger::new(&RulesConfig::default());
    assert_eq!(l.score, 0);
    assert_eq!(l.lives, 3);
    assert_eq!(l.max_lives, 6);
}

// ── add_score ─────────────────────────────────────────────────────────────────

#[test]
fn crossing_a_thousand_grants_a_life() {
    let mut l = ledger(950, 3);
    assert!(l.add_score(60));
    assert_eq!(l.score, 1010);
    assert_eq!(l.lives, 4);
}

#[test]
fn no_life_without_crossing() {
    let mut l = ledger(100, 3);
    assert!(!l.add_score(50));
    assert_eq!(l.score, 150);
    assert_eq!(l.lives, 3);
}

#[test]
fn landing_exactly_on_threshold_counts() {
    let mut l = ledger(990, 3);
    assert!(l.add_score(10));
    assert_eq!(l.lives, 4);
}

#[test]
fn lives_never_exceed_max() {
    let mut l = ledger(950, 6);
    assert!(!l.add_score(100));
    assert_eq!(l.score, 1050);
    assert_eq!(l.lives, 6);
}

#[test]
fn one_life_per_update_even_across_several_thresholds() {
    let mut l = ledger(0, 3);
    assert!(l.add_score(2500));
    assert_eq!(l.lives, 4);
}

#[test]
fn score_is_monotonic_and_lives_never_drop() {
    let mut l = ledger(0, 3);
    let mut last_score = 0;
    let mut last_lives = l.lives;
    for points in [10, 20, 40, 200, 300, 990, 5, 1000, 1000, 1000, 1000] {
        l.add_score(points);
        assert!(l.score >= last_score);
        assert!(l.lives >= last_lives);
        assert!(l.lives <= l.max_lives);
        last_score = l.score;
        last_lives = l.lives;
    }
    assert_eq!(l.lives, 6);
}

// ── lose_life ─────────────────────────────────────────────────────────────────

#[test]
fn lose_life_reports_terminal_only_at_zero() {
    let mut l = ledger(0, 2);
    assert!(!l.lose_life());
    assert_eq!(l.lives, 1);
    assert!(l.lose_life());
    assert_eq!(l.lives, 0);
}
