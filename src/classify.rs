// src/classify.rs
//! # Duo classification
//! Feature vectors for the externally fitted cluster models, plus the two
//! rule-based labels that need no model: duo type (time spent together) and
//! match type (win rate against the calibrated spread).
//!
//! Clustering itself sits behind [`Classifier`]; nothing here fits or loads
//! a model.

use serde::{Deserialize, Serialize};

use crate::engine::ParticipantGameMetrics;
use crate::geometry::euclidean;
use crate::model::Frame;
use crate::normalize::{MetricKind, NormalizationParameters, Normalizer};
use crate::stats::{mean, Ratio};

/// Cluster models the report feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    /// [Φ(kill participation), exp-CDF(KDA)]
    MurderousDuo,
    /// [Φ(creep share), Φ(CS differential)]
    Farmer,
    /// [Φ(gold share), Φ(gold differential)]
    Millionaire,
    /// [Φ(fight worth), exp-PDF(objectives)]
    Tactician,
}

impl ClassKind {
    pub const ALL: [ClassKind; 4] = [
        ClassKind::MurderousDuo,
        ClassKind::Farmer,
        ClassKind::Millionaire,
        ClassKind::Tactician,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub cluster: usize,
    pub centroids: Vec<[f64; 2]>,
}

/// Externally fitted 2-D cluster model.
pub trait Classifier: Send + Sync {
    fn classify(&self, features: [f64; 2]) -> ClusterAssignment;
    /// Model name for diagnostics.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuoClassification {
    pub first: Option<ClusterAssignment>,
    pub second: Option<ClusterAssignment>,
}

/// Run both players' vectors through the model; a missing vector stays
/// unclassified.
pub fn classify_duo<C: Classifier + ?Sized>(
    classifier: &C,
    first: Option<[f64; 2]>,
    second: Option<[f64; 2]>,
) -> DuoClassification {
    DuoClassification {
        first: first.map(|f| classifier.classify(f)),
        second: second.map(|f| classifier.classify(f)),
    }
}

/// One game's feature vector for `kind`; `None` if any component is missing.
pub fn features(kind: ClassKind, m: &ParticipantGameMetrics, n: &Normalizer) -> Option<[f64; 2]> {
    let cdf = |k: MetricKind, v: Option<f64>| v.and_then(|v| n.cdf(k, v));
    let v = match kind {
        ClassKind::MurderousDuo => [
            cdf(MetricKind::KillParticipation, m.kill_participation)?,
            cdf(MetricKind::Kda, m.kda)?,
        ],
        ClassKind::Farmer => [
            cdf(MetricKind::CreepShare, m.cs_share)?,
            cdf(MetricKind::CreepScoreDiff, m.cs_diff.overall)?,
        ],
        ClassKind::Millionaire => [
            cdf(MetricKind::GoldShare, m.gold_share)?,
            cdf(MetricKind::GoldDiff, m.gold_diff.overall)?,
        ],
        ClassKind::Tactician => [
            cdf(MetricKind::FightWorth, m.tactician.worth)?,
            m.tactician
                .objectives
                .and_then(|o| n.density(MetricKind::FightObjectives, o))?,
        ],
    };
    Some(v)
}

/// Component-wise mean of the per-game vectors that are present.
pub fn mean_features<'a, I>(kind: ClassKind, games: I, n: &Normalizer) -> Option<[f64; 2]>
where
    I: IntoIterator<Item = &'a ParticipantGameMetrics>,
{
    let vectors: Vec<[f64; 2]> = games
        .into_iter()
        .filter_map(|m| features(kind, m, n))
        .collect();
    Some([
        mean(vectors.iter().map(|v| v[0]))?,
        mean(vectors.iter().map(|v| v[1]))?,
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuoType {
    /// Together at least two thirds of the time.
    Lovers,
    Friends,
    /// Together at most a third of the time.
    Singles,
}

impl DuoType {
    pub fn from_fraction(together: f64) -> Self {
        if together >= 2.0 / 3.0 {
            DuoType::Lovers
        } else if together <= 1.0 / 3.0 {
            DuoType::Singles
        } else {
            DuoType::Friends
        }
    }
}

/// Share of paired frames (by index) where both players stand within
/// `radius` of each other. Frames missing either position count as apart.
pub fn time_together(first: &[&Frame], second: &[&Frame], radius: f64) -> Option<f64> {
    let mut together = 0u32;
    let mut total = 0u32;
    for (a, b) in first.iter().zip(second.iter()) {
        total += 1;
        if let (Some(pa), Some(pb)) = (a.position, b.position) {
            if euclidean(pa, pb) <= radius {
                together += 1;
            }
        }
    }
    Ratio::new(together, total).value()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    PerfectMatch,
    AverageFit,
    Mismatch,
}

impl MatchType {
    /// One standard deviation above / below the calibrated mean win rate.
    pub fn from_win_rate(win_rate: f64, params: NormalizationParameters) -> Self {
        let sd = params.std_dev();
        if win_rate >= params.mean + sd {
            MatchType::PerfectMatch
        } else if win_rate <= params.mean - sd {
            MatchType::Mismatch
        } else {
            MatchType::AverageFit
        }
    }
}
