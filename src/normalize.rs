//! # Normalization
//!
//! Turns raw per-game metrics into standardized scores against externally
//! calibrated `(mean, variance)` pairs.
//!
//! The reference distribution of every metric is fixed here and must match
//! the calibration step that produced the parameters:
//!
//! | metric                | reference   |
//! |-----------------------|-------------|
//! | kill participation    | Gaussian    |
//! | forward-kill ratio    | exponential |
//! | positioning           | Gaussian    |
//! | ganking               | exponential |
//! | gold share / diff     | Gaussian    |
//! | creep share / diff    | Gaussian    |
//! | KDA                   | exponential |
//! | win rate              | Gaussian    |
//! | fight worth           | Gaussian    |
//! | fight objectives      | exponential |
//!
//! Exponential references use `scale = mean`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::calibration::CalibrationTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    KillParticipation,
    ForwardKills,
    Positioning,
    Ganking,
    GoldShare,
    GoldDiff,
    CreepShare,
    CreepScoreDiff,
    Kda,
    WinRate,
    FightWorth,
    FightObjectives,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    Gaussian,
    Exponential,
}

impl MetricKind {
    pub fn distribution(self) -> Distribution {
        match self {
            MetricKind::ForwardKills
            | MetricKind::Ganking
            | MetricKind::Kda
            | MetricKind::FightObjectives => Distribution::Exponential,
            _ => Distribution::Gaussian,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::KillParticipation => "kill_participation",
            MetricKind::ForwardKills => "forward_kills",
            MetricKind::Positioning => "positioning",
            MetricKind::Ganking => "ganking",
            MetricKind::GoldShare => "gold_share",
            MetricKind::GoldDiff => "gold_diff",
            MetricKind::CreepShare => "creep_share",
            MetricKind::CreepScoreDiff => "creep_score_diff",
            MetricKind::Kda => "kda",
            MetricKind::WinRate => "win_rate",
            MetricKind::FightWorth => "fight_worth",
            MetricKind::FightObjectives => "fight_objectives",
        }
    }
}

/// Fitted `(mean, variance)` of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParameters {
    pub mean: f64,
    pub variance: f64,
}

impl NormalizationParameters {
    pub fn new(mean: f64, variance: f64) -> Self {
        Self { mean, variance }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    fn usable(&self, dist: Distribution) -> bool {
        match dist {
            Distribution::Gaussian => self.mean.is_finite() && self.variance > 0.0,
            Distribution::Exponential => self.mean > 0.0 && self.mean.is_finite(),
        }
    }
}

/// Read-only normalizer built once from the calibration table.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    table: CalibrationTable,
}

impl Normalizer {
    pub fn new(table: CalibrationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    pub fn params(&self, kind: MetricKind) -> Option<NormalizationParameters> {
        let p = self.table.get(kind);
        match p {
            Some(p) if p.usable(kind.distribution()) => Some(p),
            Some(p) => {
                warn!(
                    target: "calibration",
                    metric = kind.name(),
                    mean = p.mean,
                    variance = p.variance,
                    "unusable calibration parameters"
                );
                None
            }
            None => {
                warn!(target: "calibration", metric = kind.name(), "no calibration parameters");
                None
            }
        }
    }

    /// Gaussian metrics: z-score `(x - mean) / sqrt(variance)`.
    /// Exponential metrics: CDF with `scale = mean`.
    pub fn standardize(&self, kind: MetricKind, raw: f64) -> Option<f64> {
        if !raw.is_finite() {
            return None;
        }
        let p = self.params(kind)?;
        Some(match kind.distribution() {
            Distribution::Gaussian => (raw - p.mean) / p.std_dev(),
            Distribution::Exponential => exponential_cdf(raw, p.mean),
        })
    }

    /// Cumulative probability of `raw` under the metric's reference distribution.
    pub fn cdf(&self, kind: MetricKind, raw: f64) -> Option<f64> {
        if !raw.is_finite() {
            return None;
        }
        let p = self.params(kind)?;
        Some(match kind.distribution() {
            Distribution::Gaussian => normal_cdf((raw - p.mean) / p.std_dev()),
            Distribution::Exponential => exponential_cdf(raw, p.mean),
        })
    }

    /// Density of `raw` under the metric's reference distribution.
    pub fn density(&self, kind: MetricKind, raw: f64) -> Option<f64> {
        if !raw.is_finite() {
            return None;
        }
        let p = self.params(kind)?;
        Some(match kind.distribution() {
            Distribution::Gaussian => {
                let sd = p.std_dev();
                normal_pdf((raw - p.mean) / sd) / sd
            }
            Distribution::Exponential => exponential_pdf(raw, p.mean),
        })
    }
}

pub fn exponential_cdf(x: f64, scale: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else {
        1.0 - (-x / scale).exp()
    }
}

pub fn exponential_pdf(x: f64, scale: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else {
        (-x / scale).exp() / scale
    }
}

/// Standard normal CDF.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Standard normal density.
pub fn normal_pdf(z: f64) -> f64 {
    (-0.5 * z * z).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Error function, Abramowitz & Stegun 7.1.26 (|error| < 1.5e-7).
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        let mut t = CalibrationTable::default();
        t.set(MetricKind::KillParticipation, NormalizationParameters::new(0.5, 0.04));
        t.set(MetricKind::Kda, NormalizationParameters::new(3.0, 4.0));
        Normalizer::new(t)
    }

    #[test]
    fn gaussian_at_mean_is_zero() {
        let n = normalizer();
        assert_eq!(n.standardize(MetricKind::KillParticipation, 0.5), Some(0.0));
        let z = n.standardize(MetricKind::KillParticipation, 0.7).unwrap();
        assert!((z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn exponential_at_mean_is_one_minus_inv_e() {
        let n = normalizer();
        let v = n.standardize(MetricKind::Kda, 3.0).unwrap();
        assert!((v - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn missing_parameters_are_missing() {
        let n = normalizer();
        assert_eq!(n.standardize(MetricKind::GoldShare, 0.2), None);
        assert_eq!(n.standardize(MetricKind::Kda, f64::NAN), None);
    }

    #[test]
    fn normal_cdf_reference_points() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
        assert!((normal_cdf(-1.0) - 0.158_655).abs() < 1e-5);
    }

    #[test]
    fn densities() {
        assert!((exponential_pdf(0.0, 2.0) - 0.5).abs() < 1e-12);
        assert_eq!(exponential_pdf(-1.0, 2.0), 0.0);
        assert!((normal_pdf(0.0) - 0.398_942_28).abs() < 1e-8);
    }
}
