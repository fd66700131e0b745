//! Duo Behavior Analyzer: Binary Entrypoint
//! Scores a batch of games played by a duo and prints the report as JSON.
//!
//! Usage: `duo-behavior-analyzer <games.json>`
//! Config: `SCORING_CONFIG_PATH` / `config/scoring.toml`,
//! `CALIBRATION_PATH` / `config/calibration.toml`.

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use duo_behavior_analyzer::engine::load_games;
use duo_behavior_analyzer::{score_games, CalibrationTable, DuoReport, Normalizer, ScoringConfig};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR ANALYZER_ENV in {local, development, dev})
///   - ANALYZER_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("ANALYZER_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("ANALYZER_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("duo_behavior_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    // Load .env in local/dev; lets SCORING_CONFIG_PATH / CALIBRATION_PATH come from it.
    let _ = dotenvy::dotenv();
    enable_dev_tracing();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: duo-behavior-analyzer <games.json>"))?;

    let cfg = ScoringConfig::load_default().context("loading scoring config")?;
    let calibration = CalibrationTable::load_default().context("loading calibration")?;
    info!(metrics = calibration.len(), "calibration ready");
    let normalizer = Normalizer::new(calibration);

    let games = load_games(&path)?;
    let scored = score_games(&games, &cfg);
    let report = DuoReport::build(&scored, &normalizer);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
