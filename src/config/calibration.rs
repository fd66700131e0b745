// src/config/calibration.rs
//! Calibration store: fitted `(mean, variance)` per metric.
//!
//! TOML shape (JSON mirrors it):
//! ```toml
//! [kill_participation]
//! mean = 0.52
//! variance = 0.021
//! ```
//! Metrics absent from the file stay uncalibrated; normalizing them yields `None`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{load_with_fallbacks, read_config};
use crate::normalize::{MetricKind, NormalizationParameters};

pub const ENV_CALIBRATION_PATH: &str = "CALIBRATION_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kill_participation: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_kills: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positioning: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ganking: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold_share: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold_diff: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creep_share: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creep_score_diff: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kda: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fight_worth: Option<NormalizationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fight_objectives: Option<NormalizationParameters>,
}

impl CalibrationTable {
    fn slot(&mut self, kind: MetricKind) -> &mut Option<NormalizationParameters> {
        match kind {
            MetricKind::KillParticipation => &mut self.kill_participation,
            MetricKind::ForwardKills => &mut self.forward_kills,
            MetricKind::Positioning => &mut self.positioning,
            MetricKind::Ganking => &mut self.ganking,
            MetricKind::GoldShare => &mut self.gold_share,
            MetricKind::GoldDiff => &mut self.gold_diff,
            MetricKind::CreepShare => &mut self.creep_share,
            MetricKind::CreepScoreDiff => &mut self.creep_score_diff,
            MetricKind::Kda => &mut self.kda,
            MetricKind::WinRate => &mut self.win_rate,
            MetricKind::FightWorth => &mut self.fight_worth,
            MetricKind::FightObjectives => &mut self.fight_objectives,
        }
    }

    pub fn get(&self, kind: MetricKind) -> Option<NormalizationParameters> {
        match kind {
            MetricKind::KillParticipation => self.kill_participation,
            MetricKind::ForwardKills => self.forward_kills,
            MetricKind::Positioning => self.positioning,
            MetricKind::Ganking => self.ganking,
            MetricKind::GoldShare => self.gold_share,
            MetricKind::GoldDiff => self.gold_diff,
            MetricKind::CreepShare => self.creep_share,
            MetricKind::CreepScoreDiff => self.creep_score_diff,
            MetricKind::Kda => self.kda,
            MetricKind::WinRate => self.win_rate,
            MetricKind::FightWorth => self.fight_worth,
            MetricKind::FightObjectives => self.fight_objectives,
        }
    }

    pub fn set(&mut self, kind: MetricKind, params: NormalizationParameters) {
        *self.slot(kind) = Some(params);
    }

    pub fn len(&self) -> usize {
        [
            self.kill_participation,
            self.forward_kills,
            self.positioning,
            self.ganking,
            self.gold_share,
            self.gold_diff,
            self.creep_share,
            self.creep_score_diff,
            self.kda,
            self.win_rate,
            self.fight_worth,
            self.fight_objectives,
        ]
        .iter()
        .filter(|p| p.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load from an explicit path (TOML or JSON by extension).
    pub fn load_from(path: &Path) -> Result<Self> {
        let table: Self = read_config(path)?;
        info!(
            target: "calibration",
            path = %path.display(),
            metrics = table.len(),
            "calibration loaded"
        );
        Ok(table)
    }

    /// Load using env var + fallbacks:
    /// 1) $CALIBRATION_PATH
    /// 2) config/calibration.toml
    /// 3) config/calibration.json
    ///
    /// Nothing found → empty table.
    pub fn load_default() -> Result<Self> {
        let found = load_with_fallbacks::<Self>(
            ENV_CALIBRATION_PATH,
            &[
                PathBuf::from("config/calibration.toml"),
                PathBuf::from("config/calibration.json"),
            ],
        )?;
        Ok(found.unwrap_or_default())
    }
}
