//! Unused-key guard.
//!
//! Consumed keys are JSON-pointer prefixes. A leaf under any consumed prefix is
//! read by some code path; every other leaf is reported as unused. Callers pick
//! whether that is a warning or an error.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Everything `SplitConfig::from_json` and the CLI read.
pub fn consumed_pointers() -> &'static [&'static str] {
    &[
        "/summary/tolerance",
        "/summary/price_ceiling",
        "/summary/names_per_line",
        "/output/format",
        "/logging/filter",
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Consumed prefixes used for this analysis (sorted, unique).
    pub consumed_prefixes: Vec<String>,
    /// Unused leaf pointers (sorted).
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// With `Fail`, any unused leaf is an error; with `Warn` the report is always returned.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<String> = consumed_pointers()
        .iter()
        .map(|p| normalize_pointer(p))
        .collect();
    let consumed_prefixes: Vec<String> = consumed.into_iter().collect();

    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|lp| !consumed_prefixes.iter().any(|cp| is_prefix_pointer(cp, lp)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s) detected. \
            Remove them or fix the spelling. First few: {}",
            report.unused_leaf_pointers.len(),
            preview_list(&report.unused_leaf_pointers, 12)
        );
    }

    Ok(report)
}

fn normalize_pointer(p: &str) -> String {
    let mut s = p.trim().to_string();
    if s.is_empty() {
        return "/".to_string();
    }
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    while s.ends_with('/') && s.len() > 1 {
        s.pop();
    }
    s
}

/// "/a/b" covers "/a/b" and "/a/b/c" but not "/a/bc"; "/" covers everything.
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if prefix == "/" || leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, vv) in map {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) => {
            for (i, vv) in arr.iter().enumerate() {
                collect_leaf_pointers(vv, &format!("{prefix}/{i}"), out);
            }
        }
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

fn preview_list(items: &[String], n: usize) -> String {
    let take = items.iter().take(n).cloned().collect::<Vec<_>>();
    format!("{:?}", take)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_respects_segment_boundary() {
        assert!(is_prefix_pointer("/summary", "/summary/tolerance"));
        assert!(is_prefix_pointer("/output/format", "/output/format"));
        assert!(!is_prefix_pointer("/output/format", "/output/formats"));
        assert!(is_prefix_pointer("/", "/anything"));
    }

    #[test]
    fn pointer_tokens_are_escaped() {
        let mut out = Vec::new();
        collect_leaf_pointers(&serde_json::json!({"a/b": {"c~d": 1}}), "", &mut out);
        assert_eq!(out, vec!["/a~1b/c~0d".to_string()]);
    }
}
