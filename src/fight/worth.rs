// src/fight/worth.rs
//! Fight worth: per-team head counts around a fight and the five-point
//! worth scale (−2..=+2) seen from one team.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::scoring::ScoringConfig;
use crate::geometry::circle_contains;
use crate::model::{minute_bucket, KillEvent, MatchRecord, ParticipantId, TeamId};

use super::detect::fight_radius;
use super::stitch::Fight;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamCounts {
    pub overall: u32,
    pub alive: u32,
    pub dead: u32,
}

impl TeamCounts {
    pub fn new(overall: u32, alive: u32, dead: u32) -> Self {
        Self {
            overall,
            alive,
            dead,
        }
    }

    fn add_alive(&mut self) {
        self.overall += 1;
        self.alive += 1;
    }

    fn add_dead(&mut self) {
        self.overall += 1;
        self.dead += 1;
    }

    /// Field-wise maximum.
    fn max_with(&mut self, other: TeamCounts) {
        self.overall = self.overall.max(other.overall);
        self.alive = self.alive.max(other.alive);
        self.dead = self.dead.max(other.dead);
    }
}

/// Head counts per team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FightMembers {
    teams: BTreeMap<TeamId, TeamCounts>,
}

impl FightMembers {
    pub fn team(&self, team: TeamId) -> TeamCounts {
        self.teams.get(&team).copied().unwrap_or_default()
    }

    /// Counts of the strongest team other than `team`.
    pub fn opponents_of(&self, team: TeamId) -> TeamCounts {
        self.teams
            .iter()
            .filter(|(t, _)| **t != team)
            .map(|(_, c)| *c)
            .max_by_key(|c| c.overall)
            .unwrap_or_default()
    }

    pub fn set(&mut self, team: TeamId, counts: TeamCounts) {
        self.teams.insert(team, counts);
    }

    /// Running maximum; counts never decrease.
    pub fn absorb(&mut self, other: &FightMembers) {
        for (team, counts) in &other.teams {
            self.teams.entry(*team).or_default().max_with(*counts);
        }
    }

    fn entry(&mut self, team: TeamId) -> &mut TeamCounts {
        self.teams.entry(team).or_default()
    }
}

/// Head counts around one kill.
///
/// Killer and assistants count as alive, the victim as dead. Everyone else is
/// alive when their frame in the kill's minute bucket lies inside the fight
/// radius. A kill without position only counts its direct participants.
pub fn count_kill_members(
    kill: &KillEvent,
    record: &MatchRecord,
    cfg: &ScoringConfig,
) -> FightMembers {
    let mut members = FightMembers::default();
    let mut seen: BTreeSet<ParticipantId> = BTreeSet::new();

    for id in std::iter::once(kill.killer).chain(kill.assists.iter().copied()) {
        if let Some(team) = record.team_of(id) {
            if seen.insert(id) {
                members.entry(team).add_alive();
            }
        }
    }
    if let Some(team) = record.team_of(kill.victim) {
        if seen.insert(kill.victim) {
            members.entry(team).add_dead();
        }
    }

    let Some(center) = kill.position else {
        return members;
    };
    let radius = fight_radius(kill.minutes(), cfg.fight_radius);
    for frame in record.frames_at_minute(minute_bucket(kill.timestamp)) {
        let Some(pos) = frame.position else {
            continue;
        };
        if seen.contains(&frame.participant_id) || !circle_contains(pos, center, radius) {
            continue;
        }
        if let Some(team) = record.team_of(frame.participant_id) {
            seen.insert(frame.participant_id);
            members.entry(team).add_alive();
        }
    }
    members
}

/// Running maximum of the head counts over every kill of the fight.
pub fn count_fight_members(
    fight: &Fight,
    record: &MatchRecord,
    cfg: &ScoringConfig,
) -> FightMembers {
    let mut total = FightMembers::default();
    for kill in fight.events(record) {
        total.absorb(&count_kill_members(kill, record, cfg));
    }
    total
}

/// Worth of a fight from the point of view of `own`.
///
/// | numbers advantage | lost more | worth |
/// |-------------------|-----------|-------|
/// | yes               | yes       | −2    |
/// | yes               | no        | +1    |
/// | no                | yes       | −1    |
/// | no                | no        | +2    |
///
/// Equal head counts with equal deaths is neutral (0).
pub fn worth(own: TeamCounts, opp: TeamCounts) -> i8 {
    if own.overall == opp.overall && own.dead == opp.dead {
        return 0;
    }
    let advantage = own.overall > opp.overall;
    let lost = own.dead > opp.dead;
    match (advantage, lost) {
        (true, true) => -2,
        (true, false) => 1,
        (false, true) => -1,
        (false, false) => 2,
    }
}
