//! # Base metrics
//! Per-game scalars straight from the stat lines and frames: kill
//! participation, KDA, gold/creep share, lane differentials and win rate.
//! Also the cross-game role summaries (usual role, minions per role).
//!
//! Missing denominators produce `None`, never `0.0`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::battlefront::{canonical_role, Role};
use crate::model::{minute_bucket, Frame, MatchRecord, Participant, ParticipantId, ParticipantStats};
use crate::phase::{PerPhase, Phase, PhaseWindows};
use crate::stats::{checked_div, mean, Ratio};

/// Team kills the participant took part in (killer or assistant).
pub fn kill_participation(record: &MatchRecord, participant: ParticipantId) -> Ratio {
    let Some(team) = record.team_of(participant) else {
        return Ratio::default();
    };
    let mut ratio = Ratio::default();
    for kill in record.team_kills(team) {
        ratio.record(kill.credited_to(participant));
    }
    ratio
}

/// Kill participation split by the phase of each team kill's minute bucket.
pub fn kill_participation_by_phase(
    record: &MatchRecord,
    participant: ParticipantId,
    phases: &PhaseWindows,
) -> PerPhase<Ratio> {
    let mut out = PerPhase::<Ratio>::default();
    let Some(team) = record.team_of(participant) else {
        return out;
    };
    for kill in record.team_kills(team) {
        if let Some(phase) = phases.phase_of(minute_bucket(kill.timestamp)) {
            out.get_mut(phase).record(kill.credited_to(participant));
        }
    }
    out
}

/// `(kills + assists) / deaths`; a deathless game reads as `kills + assists`.
pub fn game_kda(stats: &ParticipantStats) -> f64 {
    let ka = f64::from(stats.kills + stats.assists);
    if stats.deaths == 0 {
        ka
    } else {
        ka / f64::from(stats.deaths)
    }
}

fn team_stats<'a>(
    record: &'a MatchRecord,
    participant: ParticipantId,
) -> Option<(&'a ParticipantStats, Vec<&'a ParticipantStats>)> {
    let team = record.team_of(participant)?;
    let own = record.stats_of(participant)?;
    let mates = record
        .stats
        .iter()
        .filter(|s| record.team_of(s.participant_id) == Some(team))
        .collect();
    Some((own, mates))
}

pub fn gold_share(record: &MatchRecord, participant: ParticipantId) -> Option<f64> {
    let (own, team) = team_stats(record, participant)?;
    let total: u64 = team.iter().map(|s| u64::from(s.gold_earned)).sum();
    checked_div(f64::from(own.gold_earned), total as f64)
}

/// Lane minions plus both jungle variants over the team's total.
pub fn cs_share(record: &MatchRecord, participant: ParticipantId) -> Option<f64> {
    let (own, team) = team_stats(record, participant)?;
    let total: u64 = team.iter().map(|s| u64::from(s.creep_score())).sum();
    checked_div(f64::from(own.creep_score()), total as f64)
}

pub fn role_of(participant: &Participant) -> Option<Role> {
    canonical_role(&participant.lane, &participant.role)
}

/// Participant of the other team with the same canonical role.
pub fn lane_opponent(record: &MatchRecord, participant: ParticipantId) -> Option<&Participant> {
    let me = record.participant(participant)?;
    let role = role_of(me)?;
    record
        .participants
        .iter()
        .find(|p| p.team_id != me.team_id && role_of(p) == Some(role))
}

/// Role played most often. Ties go to the role listed first in [`Role::ALL`].
pub fn most_frequent_role<I>(roles: I) -> Option<Role>
where
    I: IntoIterator<Item = Role>,
{
    let mut counts: BTreeMap<Role, usize> = BTreeMap::new();
    for role in roles {
        *counts.entry(role).or_default() += 1;
    }
    let mut best: Option<(Role, usize)> = None;
    for (role, n) in counts {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((role, n));
        }
    }
    best.map(|(role, _)| role)
}

/// Mean lane minions per role played.
pub fn minions_by_role<I>(games: I) -> BTreeMap<Role, f64>
where
    I: IntoIterator<Item = (Role, u32)>,
{
    let mut sums: BTreeMap<Role, (f64, u32)> = BTreeMap::new();
    for (role, minions) in games {
        let e = sums.entry(role).or_default();
        e.0 += f64::from(minions);
        e.1 += 1;
    }
    sums.into_iter()
        .map(|(role, (sum, n))| (role, sum / f64::from(n)))
        .collect()
}

/// Mean differential overall and per phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseDiff {
    pub overall: Option<f64>,
    pub phases: PerPhase<Option<f64>>,
}

/// Frame-by-frame `value(own) − value(opponent)`, paired by index.
pub fn frame_diff<F>(
    own: &[&Frame],
    opponent: &[&Frame],
    phases: &PhaseWindows,
    value: F,
) -> PhaseDiff
where
    F: Fn(&Frame) -> u32,
{
    let pairs: Vec<(u32, f64)> = own
        .iter()
        .zip(opponent.iter())
        .map(|(a, b)| (a.minute(), f64::from(value(a)) - f64::from(value(b))))
        .collect();

    let in_phase = |phase: Phase| {
        let range = phases.range(phase);
        mean(
            pairs
                .iter()
                .filter(|(m, _)| range.contains(*m))
                .map(|(_, d)| *d),
        )
    };

    PhaseDiff {
        overall: mean(pairs.iter().map(|(_, d)| *d)),
        phases: PerPhase {
            early: in_phase(Phase::Early),
            mid: in_phase(Phase::Mid),
            late: in_phase(Phase::Late),
        },
    }
}

fn lane_diff<F>(
    record: &MatchRecord,
    participant: ParticipantId,
    phases: &PhaseWindows,
    value: F,
) -> PhaseDiff
where
    F: Fn(&Frame) -> u32,
{
    let Some(opp) = lane_opponent(record, participant) else {
        return PhaseDiff::default();
    };
    frame_diff(&record.frames_of(participant), &record.frames_of(opp.id), phases, value)
}

pub fn gold_diff(
    record: &MatchRecord,
    participant: ParticipantId,
    phases: &PhaseWindows,
) -> PhaseDiff {
    lane_diff(record, participant, phases, |f| f.total_gold)
}

pub fn cs_diff(
    record: &MatchRecord,
    participant: ParticipantId,
    phases: &PhaseWindows,
) -> PhaseDiff {
    lane_diff(record, participant, phases, Frame::creep_score)
}

/// Wins over games; `None` for an empty list.
pub fn win_rate<I>(results: I) -> Option<f64>
where
    I: IntoIterator<Item = bool>,
{
    let mut r = Ratio::default();
    for win in results {
        r.record(win);
    }
    r.value()
}
