//! tkt-config
//!
//! Layered YAML configuration for a scanning station.
//!
//! A station reads a base file, then site and station overrides. Later layers win key
//! by key. The merged document is serialized canonically and fingerprinted with SHA-256
//! so two stations can tell whether they run the same effective configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

pub const DEFAULT_DATA_FILE: &str = "tickets_data.json";
pub const DEFAULT_REPORTS_DIR: &str = ".";
pub const DEFAULT_ALERT_WINDOW: u32 = 3;
pub const DEFAULT_RANGE_TOLERANCE: u32 = 10;
pub const DEFAULT_NEIGHBOUR_SCAN_LIMIT: u32 = 100;

/// JSON pointers read by [`StationConfig::from_json`]. A leaf outside these is unused.
pub const CONSUMED_POINTERS: &[&str] = &[
    "/station/data_file",
    "/station/reports_dir",
    "/policy/alert_window",
    "/policy/range_tolerance",
    "/policy/neighbour_scan_limit",
];

// ---------------------------------------------------------------------------
// Layered loading
// ---------------------------------------------------------------------------

/// Effective configuration of a station, merged from its YAML layers.
#[derive(Debug, Clone)]
pub struct StationLayers {
    /// Layer names in merge order: file paths, or `layer[N]` for in-memory documents.
    pub sources: Vec<String>,
    pub merged: Value,
    /// Compact JSON with keys in sorted order.
    pub canonical_json: String,
    /// Lowercase hex SHA-256 of `canonical_json`.
    pub fingerprint: String,
}

impl StationLayers {
    /// Read YAML files in merge order (base, then site, then station).
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut layers = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let raw = fs::read_to_string(path)
                .with_context(|| format!("CONFIG_READ cannot read {}", path.display()))?;
            layers.push((path.display().to_string(), raw));
        }
        Self::merge(layers)
    }

    pub fn from_yaml<S: AsRef<str>>(docs: &[S]) -> Result<Self> {
        let layers = docs
            .iter()
            .enumerate()
            .map(|(i, doc)| (format!("layer[{i}]"), doc.as_ref().to_string()))
            .collect();
        Self::merge(layers)
    }

    fn merge(layers: Vec<(String, String)>) -> Result<Self> {
        let mut merged = serde_json::json!({});
        let mut sources = Vec::with_capacity(layers.len());
        for (name, raw) in layers {
            let doc: serde_yaml::Value = serde_yaml::from_str(&raw)
                .with_context(|| format!("CONFIG_PARSE {name} is not valid yaml"))?;
            let doc = serde_json::to_value(doc)
                .with_context(|| format!("CONFIG_PARSE {name} has no json equivalent"))?;
            // an empty file parses as null and leaves the merge as it was
            if !doc.is_null() {
                overlay(&mut merged, doc);
            }
            sources.push(name);
        }

        // serde_json maps are key ordered, so compact output is already canonical
        let canonical_json = serde_json::to_string(&merged)
            .context("CONFIG_PARSE canonical serialization")?;
        let fingerprint = hex::encode(Sha256::digest(canonical_json.as_bytes()));
        Ok(Self {
            sources,
            merged,
            canonical_json,
            fingerprint,
        })
    }

    pub fn station_config(&self) -> Result<StationConfig> {
        StationConfig::from_json(&self.merged)
    }

    pub fn unused_keys(&self, policy: UnusedKeyPolicy) -> Result<Vec<String>> {
        report_unused_keys(&self.merged, policy)
    }
}

/// Objects merge key by key; any other value in `layer` replaces what `base` held.
fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

// ---------------------------------------------------------------------------
// Unused keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

/// Leaf pointers of `merged` that no station setting reads, sorted.
///
/// With [`UnusedKeyPolicy::Fail`] any unused leaf is an error.
pub fn report_unused_keys(merged: &Value, policy: UnusedKeyPolicy) -> Result<Vec<String>> {
    let mut leaves = Vec::new();
    collect_leaf_pointers(merged, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|leaf| !is_consumed(leaf))
        .collect();
    unused.sort();
    unused.dedup();

    if policy == UnusedKeyPolicy::Fail && !unused.is_empty() {
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s): {:?}",
            unused.len(),
            unused
        );
    }
    Ok(unused)
}

fn is_consumed(leaf: &str) -> bool {
    CONSUMED_POINTERS.iter().any(|p| is_prefix_pointer(p, leaf))
}

/// "/a/b" covers "/a/b" and "/a/b/c" but not "/a/bc".
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    leaf == prefix
        || leaf
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) if !map.is_empty() => {
            for (k, vv) in map {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) if !arr.is_empty() => {
            for (i, vv) in arr.iter().enumerate() {
                collect_leaf_pointers(vv, &format!("{prefix}/{i}"), out);
            }
        }
        // the empty root object has no leaves
        Value::Object(_) if prefix.is_empty() => {}
        _ => out.push(if prefix.is_empty() {
            "/".to_string()
        } else {
            prefix.to_string()
        }),
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

// ---------------------------------------------------------------------------
// Typed station settings
// ---------------------------------------------------------------------------

/// Effective settings of one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Snapshot file holding the reconciliation state.
    pub data_file: PathBuf,
    /// Where closing reports are written.
    pub reports_dir: PathBuf,
    pub alert_window: u32,
    pub range_tolerance: u32,
    pub neighbour_scan_limit: u32,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            alert_window: DEFAULT_ALERT_WINDOW,
            range_tolerance: DEFAULT_RANGE_TOLERANCE,
            neighbour_scan_limit: DEFAULT_NEIGHBOUR_SCAN_LIMIT,
        }
    }
}

impl StationConfig {
    /// Read settings from merged config JSON. Absent keys take defaults; present keys
    /// of the wrong type are errors.
    pub fn from_json(v: &Value) -> Result<Self> {
        let d = Self::default();
        let cfg = Self {
            data_file: read_path(v, "/station/data_file", d.data_file)?,
            reports_dir: read_path(v, "/station/reports_dir", d.reports_dir)?,
            alert_window: read_u32(v, "/policy/alert_window", d.alert_window)?,
            range_tolerance: read_u32(v, "/policy/range_tolerance", d.range_tolerance)?,
            neighbour_scan_limit: read_u32(
                v,
                "/policy/neighbour_scan_limit",
                d.neighbour_scan_limit,
            )?,
        };

        if cfg.neighbour_scan_limit == 0 {
            bail!("CONFIG_INVALID /policy/neighbour_scan_limit must be >= 1");
        }
        Ok(cfg)
    }
}

fn read_u32(v: &Value, ptr: &str, default: u32) -> Result<u32> {
    match v.pointer(ptr) {
        None | Some(Value::Null) => Ok(default),
        Some(x) => match x.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Ok(n),
            None => bail!("CONFIG_TYPE_ERROR {ptr} expected unsigned integer, got {x}"),
        },
    }
}

fn read_path(v: &Value, ptr: &str, default: PathBuf) -> Result<PathBuf> {
    match v.pointer(ptr) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(PathBuf::from(s)),
        Some(x) => bail!("CONFIG_TYPE_ERROR {ptr} expected non-empty string, got {x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_replaces_leaves_and_keeps_siblings() {
        let mut base = serde_json::json!({"policy": {"alert_window": 3, "range_tolerance": 10}});
        overlay(
            &mut base,
            serde_json::json!({"policy": {"alert_window": 5}, "station": {"data_file": "a.json"}}),
        );
        assert_eq!(
            base,
            serde_json::json!({
                "policy": {"alert_window": 5, "range_tolerance": 10},
                "station": {"data_file": "a.json"}
            })
        );
    }

    #[test]
    fn overlay_scalar_replaces_a_section() {
        let mut base = serde_json::json!({"policy": {"alert_window": 3}});
        overlay(&mut base, serde_json::json!({"policy": null}));
        assert_eq!(base, serde_json::json!({"policy": null}));
    }

    #[test]
    fn parse_errors_name_the_layer() {
        let layers = ["policy: {}", "policy: [unclosed"];
        let err = StationLayers::from_yaml(&layers).unwrap_err();
        assert!(err.to_string().contains("layer[1]"), "{err}");
    }

    #[test]
    fn prefix_pointer_respects_token_boundary() {
        assert!(is_prefix_pointer("/station", "/station/data_file"));
        let leaf = "/station/data_file";
        assert!(is_prefix_pointer(leaf, leaf));
        assert!(!is_prefix_pointer("/station", "/stations/x"));
    }

    #[test]
    fn empty_config_has_no_leaves() {
        let v = serde_json::json!({});
        let unused = report_unused_keys(&v, UnusedKeyPolicy::Fail).unwrap();
        assert!(unused.is_empty());
    }
}
