// src/fight/detect.rs
//! Per-kill fight classification.
//!
//! Members of a kill are the killer, the victim and the assistants (always
//! present) plus every other rostered participant whose frame in the kill's
//! minute bucket lies strictly inside the fight radius around the kill.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::scoring::ScoringConfig;
use crate::geometry::circle_contains;
use crate::model::{minute_bucket, KillEvent, MatchRecord, ParticipantId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FightKind {
    Solo,
    Gank,
    TeamFight,
}

impl FightKind {
    /// ≤3 → solo, 4..=6 → gank, ≥7 → team fight.
    pub fn from_member_count(count: usize) -> Self {
        match count {
            0..=3 => FightKind::Solo,
            4..=6 => FightKind::Gank,
            _ => FightKind::TeamFight,
        }
    }
}

/// `base + base·|round(t) − t|`, `t` in fractional minutes.
///
/// Frames are sampled on whole minutes; the further the kill is from the
/// sampling tick, the more the participants may have moved since.
pub fn fight_radius(kill_minutes: f64, base: f64) -> f64 {
    base + base * (kill_minutes.round_ties_even() - kill_minutes).abs()
}

fn is_rostered(record: &MatchRecord, id: ParticipantId) -> bool {
    record.participant(id).is_some()
}

/// Distinct participants of a kill. `None` when the kill has no position.
pub fn members(
    kill: &KillEvent,
    record: &MatchRecord,
    cfg: &ScoringConfig,
) -> Option<BTreeSet<ParticipantId>> {
    let center = kill.position?;
    let radius = fight_radius(kill.minutes(), cfg.fight_radius);

    let mut set: BTreeSet<ParticipantId> = std::iter::once(kill.killer)
        .chain(std::iter::once(kill.victim))
        .chain(kill.assists.iter().copied())
        .filter(|id| is_rostered(record, *id))
        .collect();

    for frame in record.frames_at_minute(minute_bucket(kill.timestamp)) {
        if set.contains(&frame.participant_id) || !is_rostered(record, frame.participant_id) {
            continue;
        }
        if let Some(pos) = frame.position {
            if circle_contains(pos, center, radius) {
                set.insert(frame.participant_id);
            }
        }
    }
    Some(set)
}

pub fn count_members(kill: &KillEvent, record: &MatchRecord, cfg: &ScoringConfig) -> Option<usize> {
    members(kill, record, cfg).map(|s| s.len())
}

/// Kind of the encounter around one kill; `None` without a kill position.
pub fn classify_kill(
    kill: &KillEvent,
    record: &MatchRecord,
    cfg: &ScoringConfig,
) -> Option<FightKind> {
    count_members(kill, record, cfg).map(FightKind::from_member_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_grows_with_offset_from_tick() {
        assert_eq!(fight_radius(10.0, 1000.0), 1000.0);
        assert!((fight_radius(10.25, 1000.0) - 1250.0).abs() < 1e-9);
        assert!((fight_radius(10.75, 1000.0) - 1250.0).abs() < 1e-9);
        assert!((fight_radius(10.5, 1000.0) - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn kind_boundaries() {
        assert_eq!(FightKind::from_member_count(2), FightKind::Solo);
        assert_eq!(FightKind::from_member_count(3), FightKind::Solo);
        assert_eq!(FightKind::from_member_count(4), FightKind::Gank);
        assert_eq!(FightKind::from_member_count(6), FightKind::Gank);
        assert_eq!(FightKind::from_member_count(7), FightKind::TeamFight);
        assert_eq!(FightKind::from_member_count(10), FightKind::TeamFight);
    }
}
