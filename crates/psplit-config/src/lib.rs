//! psplit-config
//!
//! Layered YAML configuration for the `psplit` tools.
//!
//! Responsibilities:
//! - Merge YAML layers (later layers override earlier ones, objects merge deeply).
//! - Produce canonical JSON (recursively sorted keys) and its SHA-256 hash so two
//!   runs can prove they used the same effective configuration.
//! - Decode the typed [`SplitConfig`] with defaults and validation.
//! - Report keys nothing reads ([`report_unused_keys`]).

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;

mod consumption;
mod split;

pub use consumption::{
    consumed_pointers, report_unused_keys, UnusedKeyPolicy, UnusedKeyReport,
};
pub use split::{OutputFormat, SplitConfig};

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for (i, raw) in yaml_docs.iter().enumerate() {
        let v_yaml: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("invalid yaml in layer {i}"))?;
        // An empty document parses as null; treat it as an empty layer.
        if v_yaml.is_null() {
            continue;
        }
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    let sorted = sort_keys(&merged);
    let canonical_json = serde_json::to_string(&sorted).context("canonical json serialize failed")?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: sorted,
    })
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

/// Rebuild `v` with every object's keys in ascending order.
fn sort_keys(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for k in keys {
                out.insert(k.clone(), sort_keys(&map[k.as_str()]));
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_merge_overrides_leaves_and_keeps_siblings() {
        let merged = deep_merge(
            json!({"summary": {"tolerance": 100, "names_per_line": 4}}),
            json!({"summary": {"tolerance": 50}}),
        );
        assert_eq!(merged, json!({"summary": {"tolerance": 50, "names_per_line": 4}}));
    }

    #[test]
    fn empty_layer_is_ignored() {
        let a = load_layered_yaml_from_strings(&["summary:\n  tolerance: 7\n", ""]).unwrap();
        assert_eq!(a.config_json.pointer("/summary/tolerance"), Some(&json!(7)));
    }

    #[test]
    fn canonical_json_sorts_nested_keys() {
        let a = load_layered_yaml_from_strings(&["b:\n  z: 1\n  a: 2\na: 0\n"]).unwrap();
        assert_eq!(a.canonical_json, r#"{"a":0,"b":{"a":2,"z":1}}"#);
    }
}
