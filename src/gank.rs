//! # Gank attributor
//!
//! Share of a participant's kills (as killer, victim or assistant) that were
//! ganks: the stitched fight is GANK-sized and the kill passes the lane gate
//! of the participant's role.
//!
//! Jungle and unrecognized roles have no lane line, so every GANK-sized kill
//! counts for them.

use tracing::debug;

use crate::battlefront::Role;
use crate::config::scoring::ScoringConfig;
use crate::fight::{stitch_fights, FightKind};
use crate::model::{minute_bucket, KillEvent, MatchRecord, ParticipantId};
use crate::stats::Ratio;

/// Lane gate of `role` for one kill.
fn passes_gate(kill: &KillEvent, role: Option<Role>, cfg: &ScoringConfig) -> bool {
    let line = role.and_then(|r| cfg.battlefront.line_at(r, minute_bucket(kill.timestamp)));
    let Some(line) = line else {
        return true;
    };
    match kill.position {
        Some(pos) => line.passes(line.distance(pos), cfg.neutral_zone),
        None => false,
    }
}

/// Ganks over relevant kills. The caller reads it with
/// [`Ratio::or_zero`]: no relevant kills is a gank ratio of 0.
pub fn gank_ratio(
    record: &MatchRecord,
    participant: ParticipantId,
    role: Option<Role>,
    cfg: &ScoringConfig,
) -> Ratio {
    let mut ratio = Ratio::default();
    for fight in stitch_fights(record, cfg, |k| k.involves(participant)) {
        let is_gank = fight.kind == Some(FightKind::Gank);
        for kill in fight.events(record).filter(|k| k.involves(participant)) {
            ratio.record(is_gank && passes_gate(kill, role, cfg));
        }
    }
    debug!(
        target: "gank",
        game_id = record.game_id,
        participant,
        ?role,
        ganks = ratio.hits,
        kills = ratio.total,
        "gank ratio"
    );
    ratio
}
