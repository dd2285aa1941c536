use std::io::{ErrorKind, Write};

use dino_runner::config::{load_or_default, Config, Params};

#[test]
fn defaults_are_valid() {
    let cfg = Config::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.max_jumps, Params::MAX_JUMPS);
    assert_eq!(cfg.invincibility_ticks, 50);
    assert_eq!(cfg.staircase_score, 100);
}

#[test]
fn partial_json_overrides_only_given_keys() {
    let cfg = Config::from_json(r#"{ "gravity": 1.0, "jump_strength": -18.0 }"#).unwrap();
    assert_eq!(cfg.gravity, 1.0);
    assert_eq!(cfg.jump_strength, -18.0);
    assert_eq!(cfg.min_separation, Params::MIN_SEPARATION);
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = Config::from_json("{ gravity: ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn bad_values_are_invalid_input() {
    for text in [
        r#"{ "gravity": 0.0 }"#,
        r#"{ "jump_strength": 2.0 }"#,
        r#"{ "base_speed": 0 }"#,
        r#"{ "bird_probability": 1.5 }"#,
        r#"{ "shield_every": 0 }"#,
        r#"{ "burst_chance": 0 }"#,
        r#"{ "stair_step_rate": 0 }"#,
    ] {
        let err = Config::from_json(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "{}", text);
    }
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "starting_lives": 5 }}"#).unwrap();
    let cfg = Config::load(file.path()).unwrap();
    assert_eq!(cfg.starting_lives, 5);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_or_default(&dir.path().join("nope.json"));
    assert_eq!(cfg, Config::default());
}

#[test]
fn broken_file_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let cfg = load_or_default(file.path());
    assert_eq!(cfg, Config::default());
}
