// src/fight/tactician.rs
//! Per-game tactician evaluation: mean fight worth and mean objective
//! follow-up over the fights a participant took part in.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::scoring::ScoringConfig;
use crate::model::{MatchRecord, ParticipantId};
use crate::stats::mean;

use super::objectives::fight_objectives;
use super::stitch::stitch_fights;
use super::worth::{count_fight_members, worth};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TacticianScore {
    /// Mean worth (−2..=+2); `None` without fights.
    pub worth: Option<f64>,
    /// Mean objective points per fight; `None` without fights.
    pub objectives: Option<f64>,
    pub fights: usize,
}

pub fn tactician(
    record: &MatchRecord,
    participant: ParticipantId,
    cfg: &ScoringConfig,
) -> TacticianScore {
    let Some(team) = record.team_of(participant) else {
        return TacticianScore::default();
    };

    let fights = stitch_fights(record, cfg, |k| k.involves(participant));
    let mut worths = Vec::with_capacity(fights.len());
    let mut objectives = Vec::with_capacity(fights.len());

    for fight in &fights {
        let members = count_fight_members(fight, record, cfg);
        worths.push(f64::from(worth(members.team(team), members.opponents_of(team))));

        let points = fight
            .last(record)
            .map(|k| {
                fight_objectives(
                    k.timestamp,
                    &record.objectives,
                    &cfg.objective_values,
                    cfg.objective_window_min,
                )
            })
            .unwrap_or(0.0);
        objectives.push(points);
    }

    let score = TacticianScore {
        worth: mean(worths),
        objectives: mean(objectives),
        fights: fights.len(),
    };
    debug!(
        target: "fight",
        game_id = record.game_id,
        participant,
        fights = score.fights,
        worth = ?score.worth,
        "tactician evaluated"
    );
    score
}
