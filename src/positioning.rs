//! # Positioning scorer
//!
//! Aggression/passivity of a participant relative to the map-wide battlefront,
//! bucketed into early / mid / late phases, plus the forward-kill ratio.
//!
//! A frame contributes when it lies more than ε beyond the line on either
//! side: forward frames feed the aggressive sum, backward frames the passive
//! sum, each with `|distance| / position_scale`. Frames inside the neutral
//! band contribute nothing and are not counted.
//!
//! Phase score = `(mean(aggressive) + (1 - mean(passive))) / 2` over
//! contributing frames; a phase without contributions is `None`.

use serde::{Deserialize, Serialize};

use crate::config::scoring::ScoringConfig;
use crate::model::{Frame, KillEvent, ParticipantId, TeamId, BLUE_TEAM};
use crate::phase::PerPhase;
use crate::stats::Ratio;

/// How frames without a position are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullFramePolicy {
    /// Skip the frame, keep scanning.
    #[default]
    Skip,
    /// Stop at the first missing position (legacy behavior).
    Truncate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Accumulator {
    aggressive: f64,
    passive: f64,
    frames: u32,
}

impl Accumulator {
    fn score(&self) -> Option<f64> {
        if self.frames == 0 {
            return None;
        }
        let n = self.frames as f64;
        Some((self.aggressive / n + (1.0 - self.passive / n)) / 2.0)
    }

    fn merge(&mut self, other: &Accumulator) {
        self.aggressive += other.aggressive;
        self.passive += other.passive;
        self.frames += other.frames;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositioningScores {
    pub phases: PerPhase<Option<f64>>,
    /// Same formula over all contributing frames of the game.
    pub overall: Option<f64>,
}

/// Side-adjusted distance: positive = toward the enemy base of `team`.
fn oriented(distance: f64, team: TeamId, forward_sign: i8) -> f64 {
    let sign = if forward_sign < 0 { -1.0 } else { 1.0 };
    if team == BLUE_TEAM {
        distance * sign
    } else {
        -distance * sign
    }
}

/// Score one participant's frames (time-ordered) for one game.
pub fn positioning<'a, I>(team: TeamId, frames: I, cfg: &ScoringConfig) -> PositioningScores
where
    I: IntoIterator<Item = &'a Frame>,
{
    let mut acc: PerPhase<Accumulator> = PerPhase::default();
    let eps = cfg.neutral_zone;

    for frame in frames {
        let Some(pos) = frame.position else {
            match cfg.null_frames {
                NullFramePolicy::Skip => continue,
                NullFramePolicy::Truncate => break,
            }
        };
        let minute = frame.minute();
        let Some(phase) = cfg.phases.phase_of(minute) else {
            continue;
        };
        let line = cfg.battlefront.map_line_at(minute);
        let d = oriented(line.distance(pos), team, line.forward_sign);
        let slot = acc.get_mut(phase);
        if d > eps {
            slot.aggressive += d.abs() / cfg.position_scale;
            slot.frames += 1;
        } else if d < -eps {
            slot.passive += d.abs() / cfg.position_scale;
            slot.frames += 1;
        }
    }

    let mut total = Accumulator::default();
    for (_, a) in acc.iter() {
        total.merge(a);
    }

    PositioningScores {
        phases: acc.map(Accumulator::score),
        overall: total.score(),
    }
}

/// Kills credited to `participant` (killer or assist) that happened beyond
/// the neutral band on the enemy side of the map line.
pub fn forward_kills<'a, I>(participant: ParticipantId, kills: I, cfg: &ScoringConfig) -> Ratio
where
    I: IntoIterator<Item = &'a KillEvent>,
{
    let mut ratio = Ratio::default();
    for kill in kills {
        if !kill.credited_to(participant) {
            continue;
        }
        let Some(pos) = kill.position else {
            continue;
        };
        let line = cfg.battlefront.map_line_at(crate::model::minute_bucket(kill.timestamp));
        let d = oriented(line.distance(pos), kill.team_id, line.forward_sign);
        ratio.record(d > cfg.neutral_zone);
    }
    ratio
}
