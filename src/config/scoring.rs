// src/config/scoring.rs
//! Scoring constants (geometry, windows, objective values, battlefront lines).
//!
//! Every field falls back to the built-in constant, so a config file only
//! needs the values it overrides:
//! ```toml
//! fight_radius = 1200.0
//!
//! [phases.mid]
//! start = 11
//! end = 22
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{load_with_fallbacks, read_config};
use crate::battlefront::{BattlefrontModel, HALF_DIAGONAL};
use crate::fight::objectives::ObjectiveValues;
use crate::phase::PhaseWindows;
use crate::positioning::NullFramePolicy;

pub const ENV_SCORING_CONFIG_PATH: &str = "SCORING_CONFIG_PATH";

pub const DEFAULT_NEUTRAL_ZONE: f64 = 1000.0;
pub const DEFAULT_FIGHT_RADIUS: f64 = 1000.0;
pub const DEFAULT_STITCH_WINDOW_MIN: f64 = 1.0;
pub const DEFAULT_OBJECTIVE_WINDOW_MIN: f64 = 2.0;
pub const DEFAULT_TOGETHER_RADIUS: f64 = 1000.0;

fn default_neutral_zone() -> f64 {
    DEFAULT_NEUTRAL_ZONE
}
fn default_fight_radius() -> f64 {
    DEFAULT_FIGHT_RADIUS
}
fn default_position_scale() -> f64 {
    HALF_DIAGONAL
}
fn default_stitch_window() -> f64 {
    DEFAULT_STITCH_WINDOW_MIN
}
fn default_objective_window() -> f64 {
    DEFAULT_OBJECTIVE_WINDOW_MIN
}
fn default_together_radius() -> f64 {
    DEFAULT_TOGETHER_RADIUS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Neutral band around a battlefront line (ε), also the gank gate threshold.
    #[serde(default = "default_neutral_zone")]
    pub neutral_zone: f64,
    /// Base fight radius; grows with the kill's offset from the sampling tick.
    #[serde(default = "default_fight_radius")]
    pub fight_radius: f64,
    /// Denominator for positional distances.
    #[serde(default = "default_position_scale")]
    pub position_scale: f64,
    /// Max gap (minutes) between an anchor kill and a stitched follow-up.
    #[serde(default = "default_stitch_window")]
    pub stitch_window_min: f64,
    /// Objective window after the last kill of a fight (minutes).
    #[serde(default = "default_objective_window")]
    pub objective_window_min: f64,
    /// Distance under which two duo partners count as together.
    #[serde(default = "default_together_radius")]
    pub together_radius: f64,
    #[serde(default)]
    pub phases: PhaseWindows,
    #[serde(default)]
    pub objective_values: ObjectiveValues,
    #[serde(default)]
    pub battlefront: BattlefrontModel,
    #[serde(default)]
    pub null_frames: NullFramePolicy,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            neutral_zone: DEFAULT_NEUTRAL_ZONE,
            fight_radius: DEFAULT_FIGHT_RADIUS,
            position_scale: HALF_DIAGONAL,
            stitch_window_min: DEFAULT_STITCH_WINDOW_MIN,
            objective_window_min: DEFAULT_OBJECTIVE_WINDOW_MIN,
            together_radius: DEFAULT_TOGETHER_RADIUS,
            phases: PhaseWindows::default(),
            objective_values: ObjectiveValues::default(),
            battlefront: BattlefrontModel::default(),
            null_frames: NullFramePolicy::default(),
        }
    }
}

impl ScoringConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut cfg: Self = read_config(path)?;
        cfg.sanitize();
        info!(target: "config", path = %path.display(), "scoring config loaded");
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $SCORING_CONFIG_PATH
    /// 2) config/scoring.toml
    /// 3) config/scoring.json
    ///
    /// Nothing found → built-in defaults.
    pub fn load_default() -> Result<Self> {
        let found = load_with_fallbacks::<Self>(
            ENV_SCORING_CONFIG_PATH,
            &[
                PathBuf::from("config/scoring.toml"),
                PathBuf::from("config/scoring.json"),
            ],
        )?;
        let mut cfg = found.unwrap_or_default();
        cfg.sanitize();
        Ok(cfg)
    }

    /// Reset non-positive geometry values to their defaults.
    fn sanitize(&mut self) {
        fn fix(name: &str, v: &mut f64, default: f64) {
            if !(v.is_finite() && *v > 0.0) {
                warn!(
                    target: "config",
                    field = name,
                    value = *v,
                    default,
                    "invalid value, using default"
                );
                *v = default;
            }
        }
        fix("neutral_zone", &mut self.neutral_zone, DEFAULT_NEUTRAL_ZONE);
        fix("fight_radius", &mut self.fight_radius, DEFAULT_FIGHT_RADIUS);
        fix("position_scale", &mut self.position_scale, HALF_DIAGONAL);
        fix("stitch_window_min", &mut self.stitch_window_min, DEFAULT_STITCH_WINDOW_MIN);
        fix(
            "objective_window_min",
            &mut self.objective_window_min,
            DEFAULT_OBJECTIVE_WINDOW_MIN,
        );
        fix("together_radius", &mut self.together_radius, DEFAULT_TOGETHER_RADIUS);
        self.battlefront.shifts.sort_by_key(|s| s.from_minute);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::MinuteRange;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg: ScoringConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, ScoringConfig::default());
    }

    #[test]
    fn partial_override() {
        let s = r#"
fight_radius = 1500.0
null_frames = "truncate"

[phases.mid]
start = 11
end = 22
"#;
        let cfg: ScoringConfig = toml::from_str(s).unwrap();
        assert_eq!(cfg.fight_radius, 1500.0);
        assert_eq!(cfg.neutral_zone, DEFAULT_NEUTRAL_ZONE);
        assert_eq!(cfg.phases.mid, MinuteRange::new(11, 22));
        assert_eq!(cfg.phases.early, MinuteRange::new(0, 10));
        assert_eq!(cfg.null_frames, NullFramePolicy::Truncate);
    }

    #[test]
    fn sanitize_restores_defaults() {
        let mut cfg = ScoringConfig {
            fight_radius: -3.0,
            position_scale: f64::NAN,
            ..ScoringConfig::default()
        };
        cfg.sanitize();
        assert_eq!(cfg.fight_radius, DEFAULT_FIGHT_RADIUS);
        assert_eq!(cfg.position_scale, HALF_DIAGONAL);
    }
}
