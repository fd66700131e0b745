// src/fight/stitch.rs
//! Temporal stitching of consecutive kills into fights.
//!
//! From an anchor kill, following kills join while they happen less than
//! `stitch_window_min` after the anchor and lie strictly inside
//! `base + base·gap` of the anchor position (`gap` in minutes). A follow-up
//! without a position joins on time alone. The first kill failing a test
//! ends the fight. Joined kills are consumed and never start a fight of
//! their own.
//!
//! The fight kind is decided once, from the anchor kill.

use serde::Serialize;
use tracing::debug;

use crate::config::scoring::ScoringConfig;
use crate::geometry::circle_contains;
use crate::model::{KillEvent, MatchRecord};

use super::detect::{classify_kill, FightKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fight {
    /// Indices into `MatchRecord::kills`, ascending; the first is the anchor.
    pub kills: Vec<usize>,
    /// `None` when the anchor kill has no position.
    pub kind: Option<FightKind>,
}

impl Fight {
    pub fn anchor<'a>(&self, record: &'a MatchRecord) -> Option<&'a KillEvent> {
        self.kills.first().and_then(|i| record.kills.get(*i))
    }

    pub fn last<'a>(&self, record: &'a MatchRecord) -> Option<&'a KillEvent> {
        self.kills.last().and_then(|i| record.kills.get(*i))
    }

    pub fn events<'a>(
        &'a self,
        record: &'a MatchRecord,
    ) -> impl Iterator<Item = &'a KillEvent> + 'a {
        self.kills.iter().filter_map(move |i| record.kills.get(*i))
    }

    pub fn len(&self) -> usize {
        self.kills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kills.is_empty()
    }
}

/// Index one past the last kill stitched onto the anchor at `start`.
fn stitch_end(kills: &[KillEvent], start: usize, cfg: &ScoringConfig) -> usize {
    let anchor = &kills[start];
    let Some(center) = anchor.position else {
        return start + 1;
    };
    let t0 = anchor.minutes();

    let mut end = start + 1;
    while let Some(next) = kills.get(end) {
        let gap = (next.minutes() - t0).abs();
        if gap >= cfg.stitch_window_min {
            break;
        }
        if let Some(pos) = next.position {
            let radius = cfg.fight_radius + cfg.fight_radius * gap;
            if !circle_contains(pos, center, radius) {
                break;
            }
        }
        end += 1;
    }
    end
}

/// Group kills into fights. Only kills accepted by `is_anchor` may start a
/// fight; follow-up kills are taken regardless of the filter. Kills that are
/// neither anchors nor stitched belong to no fight.
pub fn stitch_fights<F>(record: &MatchRecord, cfg: &ScoringConfig, mut is_anchor: F) -> Vec<Fight>
where
    F: FnMut(&KillEvent) -> bool,
{
    let kills = &record.kills;
    let mut fights = Vec::new();
    let mut i = 0;
    while i < kills.len() {
        if !is_anchor(&kills[i]) {
            i += 1;
            continue;
        }
        let end = stitch_end(kills, i, cfg);
        let kind = classify_kill(&kills[i], record, cfg);
        debug!(
            target: "fight",
            game_id = record.game_id,
            anchor = i,
            kills = end - i,
            ?kind,
            "fight stitched"
        );
        fights.push(Fight {
            kills: (i..end).collect(),
            kind,
        });
        i = end;
    }
    fights
}

/// Every kill of the game lands in exactly one fight.
pub fn stitch_all(record: &MatchRecord, cfg: &ScoringConfig) -> Vec<Fight> {
    stitch_fights(record, cfg, |_| true)
}
