//! `psplit compute | summary | check`.

use anyhow::Result;
use psplit_config::{OutputFormat, SplitConfig};
use psplit_engine::{check_invariants, compute as compute_split};
use psplit_summary::clipboard_text;
use std::path::Path;
use std::process::ExitCode;
use tracing::{info, warn};

use super::{load_state, print_result, EXIT_COMPUTE_ERROR};

pub fn compute(state_path: &Path, format: OutputFormat) -> Result<ExitCode> {
    let state = load_state(state_path)?;
    let result = compute_split(&state);
    if let Ok(a) = &result {
        info!(
            members = a.rows.len(),
            net_income = a.meta.net_income,
            "allocation computed"
        );
    }
    print_result(&state, &result, format)
}

/// The clipboard text is printed even when the split fails (date header only).
pub fn summary(state_path: &Path, cfg: &SplitConfig) -> Result<ExitCode> {
    let state = load_state(state_path)?;
    let result = compute_split(&state);
    if let Err(e) = &result {
        warn!(error = %e, "split failed; summary has header only");
    }
    println!("{}", clipboard_text(&state.date, &result, &cfg.summary));
    Ok(ExitCode::SUCCESS)
}

pub fn check(state_path: &Path) -> Result<ExitCode> {
    let state = load_state(state_path)?;
    let a = match compute_split(&state) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(ExitCode::from(EXIT_COMPUTE_ERROR));
        }
    };

    let violations = check_invariants(&a);
    if violations.is_empty() {
        println!("invariants_ok=true");
        return Ok(ExitCode::SUCCESS);
    }
    println!("invariants_ok=false violations={}", violations.len());
    for v in &violations {
        println!("  violation={v}");
    }
    Ok(ExitCode::FAILURE)
}
