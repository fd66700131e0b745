// src/model.rs
//! Match record shapes handed over by the telemetry provider.
//!
//! Everything here is plain data: already parsed, time-ordered, immutable for
//! the duration of one scoring pass.

use serde::{Deserialize, Serialize};

use crate::geometry::Position;

pub type ParticipantId = u32;
pub type TeamId = u32;

/// Team id of the blue side (bottom-left base).
pub const BLUE_TEAM: TeamId = 100;
/// Team id of the red side (top-right base).
pub const RED_TEAM: TeamId = 200;

/// Milliseconds in one game-minute.
pub const MINUTE_MS: f64 = 60_000.0;

/// Exact game time in (fractional) minutes.
#[inline]
pub fn minutes(timestamp_ms: u64) -> f64 {
    timestamp_ms as f64 / MINUTE_MS
}

/// Game-minute bucket a timestamp belongs to: nearest whole minute, a
/// half-minute tie goes to the even minute.
#[inline]
pub fn minute_bucket(timestamp_ms: u64) -> u32 {
    minutes(timestamp_ms).round_ties_even() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub team_id: TeamId,
    /// Raw lane as reported by telemetry ("TOP", "MIDDLE", "BOTTOM", "JUNGLE", "NONE").
    #[serde(default)]
    pub lane: String,
    /// Raw role ("SOLO", "DUO", "DUO_CARRY", "DUO_SUPPORT", "NONE").
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub champion: Option<String>,
}

/// One participant snapshot at a fixed cadence (one per game-minute).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub participant_id: ParticipantId,
    pub timestamp: u64,
    /// `None` means no telemetry on this tick.
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub total_gold: u32,
    #[serde(default)]
    pub minions_killed: u32,
    #[serde(default)]
    pub jungle_minions_killed: u32,
}

impl Frame {
    pub fn minute(&self) -> u32 {
        minute_bucket(self.timestamp)
    }

    pub fn creep_score(&self) -> u32 {
        self.minions_killed + self.jungle_minions_killed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillEvent {
    pub timestamp: u64,
    pub killer: ParticipantId,
    pub victim: ParticipantId,
    #[serde(default)]
    pub assists: Vec<ParticipantId>,
    #[serde(default)]
    pub position: Option<Position>,
    /// Team of the killer.
    pub team_id: TeamId,
}

impl KillEvent {
    /// Killer, victim or assistant.
    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.killer == participant || self.victim == participant || self.assisted_by(participant)
    }

    /// Killer or assistant (credited side of the kill).
    pub fn credited_to(&self, participant: ParticipantId) -> bool {
        self.killer == participant || self.assisted_by(participant)
    }

    pub fn assisted_by(&self, participant: ParticipantId) -> bool {
        self.assists.contains(&participant)
    }

    pub fn minutes(&self) -> f64 {
        minutes(self.timestamp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Monster {
    ElementalDragon,
    ElderDragon,
    RiftHerald,
    BaronNashor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurretTier {
    OuterTurret,
    InnerTurret,
    BaseTurret,
    NexusTurret,
}

/// Typed (type, subtype) of a secured objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "subtype", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Objective {
    EliteMonsterKill(Monster),
    BuildingKill(TurretTier),
}

impl Objective {
    /// Map raw telemetry strings onto a typed objective.
    ///
    /// Any dragon that is not the elder counts as elemental. Unknown
    /// combinations (inhibitors, unknown monsters) yield `None`.
    pub fn from_raw(
        event_type: &str,
        monster_type: Option<&str>,
        monster_subtype: Option<&str>,
        tower_type: Option<&str>,
    ) -> Option<Self> {
        match event_type {
            "ELITE_MONSTER_KILL" => {
                let monster = match (monster_type?, monster_subtype) {
                    ("DRAGON", Some("ELDER_DRAGON")) => Monster::ElderDragon,
                    ("DRAGON", _) => Monster::ElementalDragon,
                    ("RIFTHERALD", _) => Monster::RiftHerald,
                    ("BARON_NASHOR", _) => Monster::BaronNashor,
                    _ => return None,
                };
                Some(Self::EliteMonsterKill(monster))
            }
            "BUILDING_KILL" => {
                let tier = match tower_type? {
                    "OUTER_TURRET" => TurretTier::OuterTurret,
                    "INNER_TURRET" => TurretTier::InnerTurret,
                    "BASE_TURRET" => TurretTier::BaseTurret,
                    "NEXUS_TURRET" => TurretTier::NexusTurret,
                    _ => return None,
                };
                Some(Self::BuildingKill(tier))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveEvent {
    pub timestamp: u64,
    pub objective: Objective,
    pub team_id: TeamId,
}

/// End-of-game stat line of one participant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub participant_id: ParticipantId,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gold_earned: u32,
    pub total_minions_killed: u32,
    #[serde(default)]
    pub neutral_minions_team_jungle: Option<u32>,
    #[serde(default)]
    pub neutral_minions_enemy_jungle: Option<u32>,
    pub win: bool,
}

impl ParticipantStats {
    /// Lane minions plus both jungle variants (absent jungle data counts as 0).
    pub fn creep_score(&self) -> u32 {
        self.total_minions_killed
            + self.neutral_minions_team_jungle.unwrap_or(0)
            + self.neutral_minions_enemy_jungle.unwrap_or(0)
    }
}

/// A fully materialized game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub game_id: u64,
    pub participants: Vec<Participant>,
    /// Frames of all participants, time-ordered.
    #[serde(default)]
    pub frames: Vec<Frame>,
    /// Kills of both teams, time-ordered.
    #[serde(default)]
    pub kills: Vec<KillEvent>,
    /// Objectives of both teams, time-ordered.
    #[serde(default)]
    pub objectives: Vec<ObjectiveEvent>,
    #[serde(default)]
    pub stats: Vec<ParticipantStats>,
}

impl MatchRecord {
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn team_of(&self, id: ParticipantId) -> Option<TeamId> {
        self.participant(id).map(|p| p.team_id)
    }

    pub fn champion_of(&self, id: ParticipantId) -> Option<&str> {
        self.participant(id).and_then(|p| p.champion.as_deref())
    }

    pub fn stats_of(&self, id: ParticipantId) -> Option<&ParticipantStats> {
        self.stats.iter().find(|s| s.participant_id == id)
    }

    /// Frames of one participant in time order.
    pub fn frames_of(&self, id: ParticipantId) -> Vec<&Frame> {
        self.frames.iter().filter(|f| f.participant_id == id).collect()
    }

    /// Frames of all participants sampled in the given game-minute.
    pub fn frames_at_minute(&self, minute: u32) -> impl Iterator<Item = &Frame> + '_ {
        self.frames.iter().filter(move |f| f.minute() == minute)
    }

    /// Kills credited to a team (killer on that team).
    pub fn team_kills(&self, team: TeamId) -> impl Iterator<Item = &KillEvent> + '_ {
        self.kills.iter().filter(move |k| k.team_id == team)
    }
}
