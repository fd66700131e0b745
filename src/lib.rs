// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod base_metrics;
pub mod battlefront;
pub mod classify;
pub mod combinations;
pub mod config;
pub mod engine;
pub mod fight;
pub mod gank;
pub mod geometry;
pub mod model;
pub mod normalize;
pub mod phase;
pub mod positioning;
pub mod stats;

// ---- Re-exports for stable public API ----
pub use crate::config::calibration::CalibrationTable;
pub use crate::config::scoring::ScoringConfig;
pub use crate::engine::{score_games, score_participant, DuoGame, DuoReport};
pub use crate::model::MatchRecord;
pub use crate::normalize::Normalizer;
