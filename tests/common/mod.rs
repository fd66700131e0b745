// tests/common/mod.rs
// Builders for synthetic 5v5 games shared by the integration tests.
#![allow(dead_code)]

use duo_behavior_analyzer::geometry::Position;
use duo_behavior_analyzer::model::{
    Frame, KillEvent, MatchRecord, Objective, ObjectiveEvent, Participant, ParticipantStats,
};

pub const MINUTE: u64 = 60_000;

/// Open ground near the river, far from both bases.
pub const SPOT: Position = Position {
    x: 7000.0,
    y: 7000.0,
};

const LANES: [(&str, &str); 5] = [
    ("TOP", "SOLO"),
    ("JUNGLE", "NONE"),
    ("MIDDLE", "SOLO"),
    ("BOTTOM", "DUO_CARRY"),
    ("BOTTOM", "DUO_SUPPORT"),
];

/// Participants 1..=5 are blue (100), 6..=10 red (200); lanes in
/// top/jungle/mid/carry/support order on both sides.
pub fn roster() -> Vec<Participant> {
    (1..=10u32)
        .map(|id| {
            let (lane, role) = LANES[((id - 1) % 5) as usize];
            Participant {
                id,
                team_id: team_of(id),
                lane: lane.to_string(),
                role: role.to_string(),
                champion: None,
            }
        })
        .collect()
}

pub fn team_of(id: u32) -> u32 {
    if id <= 5 {
        100
    } else {
        200
    }
}

/// Fountain of the participant's team, well outside any fight radius.
pub fn home(id: u32) -> Position {
    if team_of(id) == 100 {
        Position::new(400.0 + id as f64 * 10.0, 400.0)
    } else {
        Position::new(14400.0 + id as f64 * 10.0, 14500.0)
    }
}

pub fn frame(id: u32, timestamp: u64, position: Option<Position>) -> Frame {
    Frame {
        participant_id: id,
        timestamp,
        position,
        total_gold: 0,
        minions_killed: 0,
        jungle_minions_killed: 0,
    }
}

/// Ten frames at `minute`: ids in `near` stand next to `at`, the rest at home.
pub fn minute_frames(minute: u64, at: Position, near: &[u32]) -> Vec<Frame> {
    (1..=10u32)
        .map(|id| {
            let pos = if near.contains(&id) {
                Position::new(at.x + 50.0 + id as f64, at.y)
            } else {
                home(id)
            };
            frame(id, minute * MINUTE, Some(pos))
        })
        .collect()
}

pub fn kill(
    timestamp: u64,
    killer: u32,
    victim: u32,
    assists: &[u32],
    position: Option<Position>,
) -> KillEvent {
    KillEvent {
        timestamp,
        killer,
        victim,
        assists: assists.to_vec(),
        position,
        team_id: team_of(killer),
    }
}

pub fn objective(timestamp: u64, objective: Objective, team_id: u32) -> ObjectiveEvent {
    ObjectiveEvent {
        timestamp,
        objective,
        team_id,
    }
}

pub fn stats(id: u32, kills: u32, deaths: u32, assists: u32, win: bool) -> ParticipantStats {
    ParticipantStats {
        participant_id: id,
        kills,
        deaths,
        assists,
        gold_earned: 8000 + id * 100,
        total_minions_killed: 100 + id * 10,
        neutral_minions_team_jungle: Some(4),
        neutral_minions_enemy_jungle: None,
        win,
    }
}

pub fn record(game_id: u64, frames: Vec<Frame>, kills: Vec<KillEvent>) -> MatchRecord {
    MatchRecord {
        game_id,
        participants: roster(),
        frames,
        kills,
        objectives: Vec::new(),
        stats: Vec::new(),
    }
}
