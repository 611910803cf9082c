use space_invaders::error::ConfigError;
use space_invaders::{Game, GameConfig};

#[test]
fn defaults_are_valid() {
    let c = GameConfig::default();
    assert!(c.validate().is_ok());
    assert_eq!(c.rules.initial_lives, 3);
    assert_eq!(c.rules.extra_life_every, 1000);
    assert_eq!(c.rules.target_score, 0);
    assert_eq!(c.rules.tick_ms, 16);
    assert_eq!(c.special.points, vec![200]);
}

#[test]
fn row_points_reuse_last_value() {
    let c = GameConfig::default();
    assert_eq!(c.grid.points_for_row(0), 40);
    assert_eq!(c.grid.points_for_row(2), 20);
    assert_eq!(c.grid.points_for_row(3), 10);
    assert_eq!(c.grid.points_for_row(7), 10);
}

#[test]
fn partial_json_overrides_only_given_keys() {
    let c = GameConfig::from_json_str(r#"{ "rules": { "initial_lives": 5, "max_lives": 9 }, "seed": 7 }"#)
        .unwrap();
    assert_eq!(c.rules.initial_lives, 5);
    assert_eq!(c.rules.max_lives, 9);
    assert_eq!(c.rules.extra_life_every, 1000);
    assert_eq!(c.grid.rows, 4);
    assert_eq!(c.seed, Some(7));
}

#[test]
fn empty_grid_is_rejected() {
    let err = GameConfig::from_json_str(r#"{ "grid": { "rows": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn lives_above_cap_are_rejected() {
    let err = GameConfig::from_json_str(r#"{ "rules": { "initial_lives": 7 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn shield_health_out_of_range_is_rejected() {
    let err = GameConfig::from_json_str(r#"{ "shields": { "health": 4 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn empty_special_points_are_rejected() {
    let err = GameConfig::from_json_str(r#"{ "special": { "points": [] } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GameConfig::from_json_str("{ rules: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn game_refuses_invalid_config() {
    let mut c = GameConfig::default();
    c.grid.cols = 0;
    assert!(Game::new(c).is_err());
}
