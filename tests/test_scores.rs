use std::fs;

use space_invaders::scores::{normalize_nickname, rank, HighScore, ScoreFile};

// ── Nicknames ─────────────────────────────────────────────────────────────────

#[test]
fn nickname_is_upper_cased_and_trimmed() {
    assert_eq!(normalize_nickname("  ace "), "ACE");
}

#[test]
fn blank_nickname_becomes_player() {
    assert_eq!(normalize_nickname(""), "PLAYER");
    assert_eq!(normalize_nickname("   "), "PLAYER");
}

#[test]
fn nickname_drops_line_breaks_and_separators() {
    assert_eq!(normalize_nickname("ab\ncd"), "ABCD");
    assert_eq!(normalize_nickname("a:b\tc\r"), "ABC");
    assert_eq!(normalize_nickname("\n::\n"), "PLAYER");
}

#[test]
fn nickname_is_truncated_to_ten() {
    assert_eq!(normalize_nickname("abcdefghijklmno"), "ABCDEFGHIJ");
}

// ── Line format ───────────────────────────────────────────────────────────────

#[test]
fn record_line_format() {
    let r = HighScore::new("zed", 1200);
    assert_eq!(r.to_line(), "ZED:1200");
    assert_eq!(HighScore::parse_line("ZED:1200"), Some(r));
}

#[test]
fn malformed_lines_do_not_parse() {
    assert_eq!(HighScore::parse_line("garbage"), None);
    assert_eq!(HighScore::parse_line("AL:x"), None);
    assert_eq!(HighScore::parse_line(":50"), None);
    assert_eq!(HighScore::parse_line("BOB:-3"), None);
}

#[test]
fn rank_sorts_best_first_and_keeps_ties_in_order() {
    let records = vec![
        HighScore::new("a", 10),
        HighScore::new("b", 30),
        HighScore::new("c", 10),
        HighScore::new("d", 20),
    ];
    let names: Vec<String> = rank(records, 3).into_iter().map(|r| r.nickname).collect();
    assert_eq!(names, vec!["B", "D", "A"]);
}

// ── File store ────────────────────────────────────────────────────────────────

#[test]
fn missing_file_means_no_scores() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScoreFile::new(dir.path().join("scores.txt"));
    assert!(store.top(10).unwrap().is_empty());
}

#[test]
fn appended_records_come_back_ranked() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScoreFile::new(dir.path().join("scores.txt"));
    store.append(&HighScore::new("low", 100)).unwrap();
    store.append(&HighScore::new("high", 900)).unwrap();
    store.append(&HighScore::new("", 500)).unwrap();

    let top = store.top(10).unwrap();
    assert_eq!(
        top,
        vec![
            HighScore::new("HIGH", 900),
            HighScore::new("PLAYER", 500),
            HighScore::new("LOW", 100),
        ]
    );

    let text = fs::read_to_string(store.path()).unwrap();
    assert_eq!(text, "LOW:100\nHIGH:900\nPLAYER:500\n");
}

#[test]
fn malformed_lines_are_skipped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.txt");
    fs::write(&path, "garbage\nBOB:12\n\n:5\nAL:x\nZED:300\n").unwrap();

    let store = ScoreFile::new(&path);
    assert_eq!(store.load().unwrap().len(), 2);
    assert_eq!(store.top(1).unwrap(), vec![HighScore::new("ZED", 300)]);
}

#[test]
fn non_utf8_line_is_skipped_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.txt");
    fs::write(&path, b"ALICE:500\nB\xffB:10\nBOB:300\n").unwrap();

    let top = ScoreFile::new(&path).top(10).unwrap();
    assert_eq!(top, vec![HighScore::new("ALICE", 500), HighScore::new("BOB", 300)]);
}

#[test]
fn odd_nickname_survives_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScoreFile::new(dir.path().join("scores.txt"));
    store.append(&HighScore::new("ab\ncd", 100)).unwrap();
    store.append(&HighScore::new("x:y", 50)).unwrap();

    assert_eq!(
        store.load().unwrap(),
        vec![HighScore::new("ABCD", 100), HighScore::new("XY", 50)]
    );
}

#[test]
fn top_is_capped() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScoreFile::new(dir.path().join("scores.txt"));
    for i in 0..15 {
        store.append(&HighScore::new("p", i * 10)).unwrap();
    }
    let top = store.top(10).unwrap();
    assert_eq!(top.len(), 10);
    assert_eq!(top[0].score, 140);
    assert_eq!(top[9].score, 50);
}
