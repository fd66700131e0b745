//! # Scoring Engine
//! Runs every scorer over a match record and folds the per-game results of a
//! duo into one report. Pure and synchronous; games are independent, so a
//! batch is scored in parallel with rayon.
//!
//! Flow: `DuoGame` → [`score_games`] → `DuoGameMetrics` → [`DuoReport::build`].

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use crate::base_metrics::{self, PhaseDiff};
use crate::battlefront::Role;
use crate::classify::{
    classify_duo, mean_features, time_together, ClassKind, Classifier, DuoClassification, DuoType,
    MatchType,
};
use crate::combinations::{champion_combos, ChampionCombo, ChampionPair};
use crate::config::scoring::ScoringConfig;
use crate::fight::{tactician, TacticianScore};
use crate::gank::gank_ratio;
use crate::model::{MatchRecord, ParticipantId, TeamId};
use crate::normalize::{MetricKind, Normalizer};
use crate::phase::PerPhase;
use crate::positioning::{forward_kills, positioning, PositioningScores};
use crate::stats::{mean_present, Ratio};

/// Raw per-game metrics of one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantGameMetrics {
    pub game_id: u64,
    pub participant: ParticipantId,
    pub team_id: TeamId,
    pub role: Option<Role>,
    pub kill_participation: Option<f64>,
    pub kill_participation_phases: PerPhase<Option<f64>>,
    pub kda: Option<f64>,
    /// Lane minions from the stat line.
    pub minions_killed: Option<u32>,
    pub gold_share: Option<f64>,
    pub cs_share: Option<f64>,
    pub gold_diff: PhaseDiff,
    pub cs_diff: PhaseDiff,
    pub positioning: PositioningScores,
    pub forward_kills: Option<f64>,
    /// 0 when the participant was in no kill.
    pub ganking: f64,
    pub tactician: TacticianScore,
    pub win: Option<bool>,
}

/// All metrics of one participant in one game; `None` if not on the roster.
pub fn score_participant(
    record: &MatchRecord,
    participant: ParticipantId,
    cfg: &ScoringConfig,
) -> Option<ParticipantGameMetrics> {
    let p = record.participant(participant)?;
    let role = base_metrics::role_of(p);
    let stats = record.stats_of(participant);

    Some(ParticipantGameMetrics {
        game_id: record.game_id,
        participant,
        team_id: p.team_id,
        role,
        kill_participation: base_metrics::kill_participation(record, participant).value(),
        kill_participation_phases: base_metrics::kill_participation_by_phase(
            record,
            participant,
            &cfg.phases,
        )
        .map(Ratio::value),
        kda: stats.map(base_metrics::game_kda),
        minions_killed: stats.map(|s| s.total_minions_killed),
        gold_share: base_metrics::gold_share(record, participant),
        cs_share: base_metrics::cs_share(record, participant),
        gold_diff: base_metrics::gold_diff(record, participant, &cfg.phases),
        cs_diff: base_metrics::cs_diff(record, participant, &cfg.phases),
        positioning: positioning(p.team_id, record.frames_of(participant), cfg),
        forward_kills: forward_kills(participant, &record.kills, cfg).value(),
        ganking: gank_ratio(record, participant, role, cfg).or_zero(),
        tactician: tactician(record, participant, cfg),
        win: stats.map(|s| s.win),
    })
}

/// One game played together by the duo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuoGame {
    pub record: MatchRecord,
    pub first: ParticipantId,
    pub second: ParticipantId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuoGameMetrics {
    pub game_id: u64,
    pub first: Option<ParticipantGameMetrics>,
    pub second: Option<ParticipantGameMetrics>,
    /// Share of frames the two spent within the together radius.
    pub together: Option<f64>,
    /// Absent when either pick is unknown.
    #[serde(default)]
    pub champions: Option<ChampionPair>,
}

pub fn score_game(game: &DuoGame, cfg: &ScoringConfig) -> DuoGameMetrics {
    let rec = &game.record;
    let first = score_participant(rec, game.first, cfg);
    let second = score_participant(rec, game.second, cfg);
    if first.is_none() || second.is_none() {
        warn!(
            target: "engine",
            game_id = rec.game_id,
            first = game.first,
            second = game.second,
            "duo participant missing from roster"
        );
    }
    DuoGameMetrics {
        game_id: rec.game_id,
        first,
        second,
        together: time_together(
            &rec.frames_of(game.first),
            &rec.frames_of(game.second),
            cfg.together_radius,
        ),
        champions: rec
            .champion_of(game.first)
            .zip(rec.champion_of(game.second))
            .map(|(a, b)| ChampionPair {
                first: a.to_string(),
                second: b.to_string(),
            }),
    }
}

/// Read a JSON array of duo games.
pub fn load_games(path: &Path) -> Result<Vec<DuoGame>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading games from {}", path.display()))?;
    let games: Vec<DuoGame> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing games from {}", path.display()))?;
    info!(target: "engine", path = %path.display(), games = games.len(), "games loaded");
    Ok(games)
}

/// Score independent games in parallel. Output order follows input order.
pub fn score_games(games: &[DuoGame], cfg: &ScoringConfig) -> Vec<DuoGameMetrics> {
    let out: Vec<DuoGameMetrics> = games.par_iter().map(|g| score_game(g, cfg)).collect();
    info!(target: "engine", games = out.len(), "games scored");
    out
}

/// Means over the games a player was scored in (missing values skipped).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub games: usize,
    /// Most frequent canonical role.
    pub role: Option<Role>,
    pub kill_participation: Option<f64>,
    pub kill_participation_phases: PerPhase<Option<f64>>,
    pub kda: Option<f64>,
    /// Mean lane minions per role played.
    pub minions_by_role: BTreeMap<Role, f64>,
    pub gold_share: Option<f64>,
    pub cs_share: Option<f64>,
    pub gold_diff: PhaseDiff,
    pub cs_diff: PhaseDiff,
    pub positioning: PositioningScores,
    pub forward_kills: Option<f64>,
    pub ganking: Option<f64>,
    pub fight_worth: Option<f64>,
    pub fight_objectives: Option<f64>,
    /// Standardized scores of the averaged metrics, keyed by metric name.
    pub standardized: BTreeMap<String, f64>,
    /// Mean per-game feature vectors, keyed by cluster model.
    pub features: BTreeMap<String, [f64; 2]>,
}

fn mean_diff<'a>(diffs: impl Iterator<Item = &'a PhaseDiff> + Clone) -> PhaseDiff {
    PhaseDiff {
        overall: mean_present(diffs.clone().map(|d| d.overall)),
        phases: PerPhase {
            early: mean_present(diffs.clone().map(|d| d.phases.early)),
            mid: mean_present(diffs.clone().map(|d| d.phases.mid)),
            late: mean_present(diffs.map(|d| d.phases.late)),
        },
    }
}

fn class_key(kind: ClassKind) -> String {
    match kind {
        ClassKind::MurderousDuo => "murderous_duo",
        ClassKind::Farmer => "farmer",
        ClassKind::Millionaire => "millionaire",
        ClassKind::Tactician => "tactician",
    }
    .to_string()
}

impl PlayerSummary {
    pub fn build(games: &[&ParticipantGameMetrics], normalizer: &Normalizer) -> Self {
        let it = || games.iter().copied();
        let mut s = PlayerSummary {
            games: games.len(),
            role: base_metrics::most_frequent_role(it().filter_map(|m| m.role)),
            kill_participation: mean_present(it().map(|m| m.kill_participation)),
            kill_participation_phases: PerPhase {
                early: mean_present(it().map(|m| m.kill_participation_phases.early)),
                mid: mean_present(it().map(|m| m.kill_participation_phases.mid)),
                late: mean_present(it().map(|m| m.kill_participation_phases.late)),
            },
            kda: mean_present(it().map(|m| m.kda)),
            minions_by_role: base_metrics::minions_by_role(
                it().filter_map(|m| Some((m.role?, m.minions_killed?))),
            ),
            gold_share: mean_present(it().map(|m| m.gold_share)),
            cs_share: mean_present(it().map(|m| m.cs_share)),
            gold_diff: mean_diff(it().map(|m| &m.gold_diff)),
            cs_diff: mean_diff(it().map(|m| &m.cs_diff)),
            positioning: PositioningScores {
                phases: PerPhase {
                    early: mean_present(it().map(|m| m.positioning.phases.early)),
                    mid: mean_present(it().map(|m| m.positioning.phases.mid)),
                    late: mean_present(it().map(|m| m.positioning.phases.late)),
                },
                overall: mean_present(it().map(|m| m.positioning.overall)),
            },
            forward_kills: mean_present(it().map(|m| m.forward_kills)),
            ganking: mean_present(it().map(|m| Some(m.ganking))),
            fight_worth: mean_present(it().map(|m| m.tactician.worth)),
            fight_objectives: mean_present(it().map(|m| m.tactician.objectives)),
            standardized: BTreeMap::new(),
            features: BTreeMap::new(),
        };

        let raw = [
            (MetricKind::KillParticipation, s.kill_participation),
            (MetricKind::ForwardKills, s.forward_kills),
            (MetricKind::Positioning, s.positioning.overall),
            (MetricKind::Ganking, s.ganking),
            (MetricKind::GoldShare, s.gold_share),
            (MetricKind::GoldDiff, s.gold_diff.overall),
            (MetricKind::CreepShare, s.cs_share),
            (MetricKind::CreepScoreDiff, s.cs_diff.overall),
            (MetricKind::Kda, s.kda),
            (MetricKind::FightWorth, s.fight_worth),
            (MetricKind::FightObjectives, s.fight_objectives),
        ];
        for (kind, value) in raw {
            if let Some(z) = value.and_then(|v| normalizer.standardize(kind, v)) {
                s.standardized.insert(kind.name().to_string(), z);
            }
        }
        for kind in ClassKind::ALL {
            if let Some(v) = mean_features(kind, it(), normalizer) {
                s.features.insert(class_key(kind), v);
            }
        }
        s
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuoReport {
    pub games: usize,
    pub first: PlayerSummary,
    pub second: PlayerSummary,
    pub time_together: Option<f64>,
    pub duo_type: Option<DuoType>,
    pub win_rate: Option<f64>,
    pub match_type: Option<MatchType>,
    pub champion_combos: Vec<ChampionCombo>,
}

impl DuoReport {
    pub fn build(games: &[DuoGameMetrics], normalizer: &Normalizer) -> Self {
        let first: Vec<&ParticipantGameMetrics> =
            games.iter().filter_map(|g| g.first.as_ref()).collect();
        let second: Vec<&ParticipantGameMetrics> =
            games.iter().filter_map(|g| g.second.as_ref()).collect();

        let time_together = mean_present(games.iter().map(|g| g.together));
        let win_rate = base_metrics::win_rate(first.iter().filter_map(|m| m.win));
        let match_type = win_rate.and_then(|w| {
            normalizer
                .params(MetricKind::WinRate)
                .map(|p| MatchType::from_win_rate(w, p))
        });

        DuoReport {
            games: games.len(),
            first: PlayerSummary::build(&first, normalizer),
            second: PlayerSummary::build(&second, normalizer),
            time_together,
            duo_type: time_together.map(DuoType::from_fraction),
            win_rate,
            match_type,
            champion_combos: champion_combos(games.iter().filter_map(|g| {
                let won = g.first.as_ref()?.win?;
                Some((g.champions.as_ref()?, won))
            })),
        }
    }

    /// Feed both players' `kind` vectors to an external model.
    pub fn classify<C: Classifier + ?Sized>(
        &self,
        kind: ClassKind,
        classifier: &C,
    ) -> DuoClassification {
        let key = class_key(kind);
        let out = classify_duo(
            classifier,
            self.first.features.get(&key).copied(),
            self.second.features.get(&key).copied(),
        );
        info!(target: "engine", model = classifier.name(), kind = %key, "duo classified");
        out
    }
}
