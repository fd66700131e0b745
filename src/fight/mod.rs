// src/fight/mod.rs
//! Fight detection and evaluation: per-kill classification, temporal
//! stitching of kills into fights, fight worth and objective follow-up.

pub mod detect;
pub mod objectives;
pub mod stitch;
pub mod tactician;
pub mod worth;

pub use detect::{classify_kill, count_members, fight_radius, FightKind};
pub use objectives::{fight_objectives, ObjectiveValues};
pub use stitch::{stitch_all, stitch_fights, Fight};
pub use tactician::{tactician, TacticianScore};
pub use worth::{count_fight_members, worth, FightMembers, TeamCounts};
