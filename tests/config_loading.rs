// tests/config_loading.rs
use duo_behavior_analyzer::config::calibration::{CalibrationTable, ENV_CALIBRATION_PATH};
use duo_behavior_analyzer::config::scoring::{ScoringConfig, ENV_SCORING_CONFIG_PATH};
use duo_behavior_analyzer::normalize::MetricKind;
use duo_behavior_analyzer::positioning::NullFramePolicy;
use std::path::Path;
use std::{env, fs};

#[test]
fn scoring_config_toml_and_json() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("scoring.toml");
    fs::write(
        &p_toml,
        r#"
neutral_zone = 1200.0
null_frames = "truncate"

[objective_values]
baron_nashor = 7.0

[[battlefront.shifts]]
from_minute = 25
intercept_offset = -400.0

[[battlefront.shifts]]
from_minute = 15
intercept_offset = -200.0
"#,
    )
    .unwrap();
    let t = ScoringConfig::load_from(&p_toml).unwrap();
    assert_eq!(t.neutral_zone, 1200.0);
    assert_eq!(t.null_frames, NullFramePolicy::Truncate);
    assert_eq!(t.objective_values.baron_nashor, 7.0);
    assert_eq!(t.objective_values.elder_dragon, 4.0);
    // shifts come back sorted
    let order: Vec<u32> = t.battlefront.shifts.iter().map(|s| s.from_minute).collect();
    assert_eq!(order, vec![15, 25]);

    let p_json = dir.path().join("scoring.json");
    fs::write(&p_json, r#"{"fight_radius": 1500.0}"#).unwrap();
    let j = ScoringConfig::load_from(&p_json).unwrap();
    assert_eq!(j.fight_radius, 1500.0);
    assert_eq!(j.neutral_zone, 1000.0);
}

#[test]
fn shipped_config_matches_builtin_defaults() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let shipped = ScoringConfig::load_from(&root.join("config/scoring.toml")).unwrap();
    let builtin = ScoringConfig::default();
    assert_eq!(shipped.phases, builtin.phases);
    assert_eq!(shipped.objective_values, builtin.objective_values);
    let (top, bottom) = (&shipped.battlefront.top, &shipped.battlefront.bottom);
    assert!((top.gradient - builtin.battlefront.top.gradient).abs() < 1e-12);
    assert!((bottom.gradient - builtin.battlefront.bottom.gradient).abs() < 1e-12);

    let calib = CalibrationTable::load_from(&root.join("config/calibration.toml")).unwrap();
    assert_eq!(calib.len(), 12);
}

#[test]
fn broken_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("scoring.toml");
    fs::write(&p, "neutral_zone = \"wide\"").unwrap();
    let err = ScoringConfig::load_from(&p).unwrap_err();
    assert!(format!("{err:#}").contains("scoring.toml"));
}

#[serial_test::serial]
#[test]
fn scoring_default_uses_env_then_fallbacks() {
    // isolate CWD so the repo's config/ is not picked up
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_SCORING_CONFIG_PATH);

    // 1) nothing → built-in defaults
    assert_eq!(ScoringConfig::load_default().unwrap(), ScoringConfig::default());

    // 2) fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("scoring.toml"), "fight_radius = 1300.0").unwrap();
    assert_eq!(ScoringConfig::load_default().unwrap().fight_radius, 1300.0);

    // 3) env wins
    let p_env = tmp.path().join("override.json");
    fs::write(&p_env, r#"{"fight_radius": 1100.0}"#).unwrap();
    env::set_var(ENV_SCORING_CONFIG_PATH, p_env.display().to_string());
    assert_eq!(ScoringConfig::load_default().unwrap().fight_radius, 1100.0);

    // 4) env pointing nowhere is an error, not a silent default
    env::set_var(ENV_SCORING_CONFIG_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(ScoringConfig::load_default().is_err());
    env::remove_var(ENV_SCORING_CONFIG_PATH);

    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn calibration_default_uses_env_then_fallbacks() {
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_CALIBRATION_PATH);

    assert!(CalibrationTable::load_default().unwrap().is_empty());

    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(
        cfg_dir.join("calibration.json"),
        r#"{"kda": {"mean": 3.0, "variance": 4.0}}"#,
    )
    .unwrap();
    let t = CalibrationTable::load_default().unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.get(MetricKind::Kda).map(|p| p.mean), Some(3.0));

    let p_env = tmp.path().join("calib.toml");
    fs::write(&p_env, "[win_rate]\nmean = 0.5\nvariance = 0.01\n").unwrap();
    env::set_var(ENV_CALIBRATION_PATH, p_env.display().to_string());
    let e = CalibrationTable::load_default().unwrap();
    assert!(e.get(MetricKind::Kda).is_none());
    assert!(e.get(MetricKind::WinRate).is_some());
    env::remove_var(ENV_CALIBRATION_PATH);

    env::set_current_dir(&old).unwrap();
}
