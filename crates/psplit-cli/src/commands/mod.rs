//! Command handlers for psplit-cli.
//!
//! Shared loading and printing helpers live here.
//! Command-specific logic lives in the submodules.

pub mod records;
pub mod split;

use anyhow::{Context, Result};
use psplit_config::{report_unused_keys, OutputFormat, SplitConfig, UnusedKeyPolicy};
use psplit_engine::{Allocation, ComputeError, SplitState};
use psplit_summary::{header_title, render_table};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

/// Exit status when the engine rejects a snapshot.
pub const EXIT_COMPUTE_ERROR: u8 = 2;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Merge config layers into a [`SplitConfig`]. No paths → defaults.
/// Unused keys are warned about on stderr, never fatal.
pub fn load_config(paths: &[String]) -> Result<SplitConfig> {
    if paths.is_empty() {
        return Ok(SplitConfig::default());
    }
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = psplit_config::load_layered_yaml(&path_refs)?;

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    if !report.is_clean() {
        eprintln!(
            "WARN: CONFIG_UNUSED_KEYS unused_leaf_keys={}",
            report.unused_leaf_pointers.len()
        );
        for p in report.unused_leaf_pointers.iter().take(50) {
            eprintln!("  unused={}", p);
        }
    }

    SplitConfig::from_json(&loaded.config_json)
}

/// `--format` beats config; config beats the table default.
pub fn resolve_format(flag: Option<&str>, cfg: &SplitConfig) -> Result<OutputFormat> {
    match flag {
        None => Ok(cfg.output_format),
        Some(raw) => OutputFormat::parse(raw).with_context(|| {
            format!("invalid --format '{}'. expected one of: table | json", raw)
        }),
    }
}

/// Read a snapshot file and normalize it. A UTF-8 BOM is tolerated.
pub fn load_state(path: &Path) -> Result<SplitState> {
    let bytes =
        fs::read(path).with_context(|| format!("read state file failed: {}", path.display()))?;
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
    let raw = String::from_utf8(bytes.to_vec()).context("state file must be UTF-8 text")?;
    let v: Value =
        serde_json::from_str(raw.trim()).context("state file must contain valid JSON")?;
    Ok(psplit_snapshot::normalize_state(&v))
}

/// Print an engine result in the requested format and map it to an exit code.
///
/// JSON output is either the allocation record or `{"error": "..."}`.
pub fn print_result(
    state: &SplitState,
    result: &Result<Allocation, ComputeError>,
    format: OutputFormat,
) -> Result<ExitCode> {
    match format {
        OutputFormat::Json => {
            let v = match result {
                Ok(a) => serde_json::to_value(a).context("serialize allocation failed")?,
                Err(e) => json!({ "error": e.to_string() }),
            };
            println!("{}", serde_json::to_string_pretty(&v)?);
        }
        OutputFormat::Table => match result {
            Ok(a) => {
                let title = header_title(state);
                if !title.is_empty() {
                    println!("{title}");
                }
                println!("{}", render_table(a));
            }
            Err(e) => eprintln!("error: {e}"),
        },
    }

    Ok(match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(EXIT_COMPUTE_ERROR),
    })
}
