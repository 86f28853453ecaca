//! Command handlers for the `tkt` binary.
//!
//! Shared helpers (clock, config) live here. Station operations are in `station`,
//! code generation and validation in `codes`.

pub mod codes;
pub mod station;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tkt_config::{StationConfig, StationLayers, UnusedKeyPolicy};

const LOCAL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse_local_time(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), LOCAL_TIME_FORMAT)
        .with_context(|| format!("invalid time '{s}', expected YYYY-MM-DDTHH:MM:SS"))
}

/// `--at` when given, otherwise the local wall clock.
pub fn resolve_now(at: Option<&str>) -> Result<NaiveDateTime> {
    match at {
        Some(s) => parse_local_time(s),
        None => Ok(Local::now().naive_local()),
    }
}

/// Merge the config layers (none means all defaults) and read station settings.
pub fn load_station_config(paths: &[String]) -> Result<StationConfig> {
    let layers = StationLayers::from_files(paths)?;
    for ptr in layers.unused_keys(UnusedKeyPolicy::Warn)? {
        tracing::warn!(key = %ptr, "unused config key");
    }
    let cfg = layers.station_config()?;
    tracing::debug!(
        fingerprint = %layers.fingerprint,
        layers = layers.sources.len(),
        "config loaded"
    );
    Ok(cfg)
}

pub fn config_hash(paths: &[String]) -> Result<()> {
    let layers = StationLayers::from_files(paths)?;
    let unused = layers.unused_keys(UnusedKeyPolicy::Warn)?;
    let effective = layers.station_config()?;

    println!("config_hash={}", layers.fingerprint);
    println!("{}", layers.canonical_json);
    println!(
        "effective={}",
        serde_json::to_string(&effective)
            .context("serialize effective config failed")?
    );
    for ptr in unused {
        println!("unused_key={ptr}");
    }
    Ok(())
}
