// src/config/mod.rs
//! File-backed configuration: scoring constants and the calibration store.
//! Both accept TOML or JSON, picked by file extension.

pub mod calibration;
pub mod scoring;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Read and parse a config file. `.toml` → TOML, `.json` → JSON,
/// anything else tries TOML then JSON.
pub(crate) fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing config {}", path.display()))
}

fn parse_config<T: DeserializeOwned>(s: &str, hint_ext: &str) -> Result<T> {
    match hint_ext {
        "toml" => Ok(toml::from_str(s)?),
        "json" => Ok(serde_json::from_str(s)?),
        _ => {
            if let Ok(v) = toml::from_str(s) {
                return Ok(v);
            }
            if let Ok(v) = serde_json::from_str(s) {
                return Ok(v);
            }
            Err(anyhow!("unsupported config format"))
        }
    }
}

/// Env var first (must point to an existing file), then the first existing
/// fallback path. `Ok(None)` when nothing is configured.
pub(crate) fn load_with_fallbacks<T: DeserializeOwned>(
    env_var: &str,
    fallbacks: &[PathBuf],
) -> Result<Option<T>> {
    if let Ok(p) = std::env::var(env_var) {
        let pb = PathBuf::from(p);
        if !pb.exists() {
            return Err(anyhow!("{env_var} points to non-existent path {}", pb.display()));
        }
        info!(target: "config", path = %pb.display(), "loading config from {env_var}");
        return read_config(&pb).map(Some);
    }
    for p in fallbacks {
        if p.exists() {
            return read_config(p).map(Some);
        }
    }
    Ok(None)
}
