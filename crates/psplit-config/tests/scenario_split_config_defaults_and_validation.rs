//! Scenario: typed split configuration
//!
//! # Invariants under test
//!
//! 1. An empty config decodes to the documented defaults.
//! 2. Present keys override defaults, layer by layer.
//! 3. Out-of-range or mistyped values are rejected with CONFIG_INVALID.

use psplit_config::{load_layered_yaml_from_strings, OutputFormat, SplitConfig};
use psplit_summary::SummaryOptions;

fn decode(layers: &[&str]) -> anyhow::Result<SplitConfig> {
    let loaded = load_layered_yaml_from_strings(layers)?;
    SplitConfig::from_json(&loaded.config_json)
}

#[test]
fn empty_config_uses_defaults() {
    let cfg = decode(&["{}"]).unwrap();
    assert_eq!(cfg.summary, SummaryOptions::default());
    assert_eq!(cfg.summary.tolerance, 100);
    assert_eq!(cfg.summary.price_ceiling, 5_000_000);
    assert_eq!(cfg.summary.names_per_line, 4);
    assert_eq!(cfg.output_format, OutputFormat::Table);
    assert_eq!(cfg.log_filter, "warn");
}

#[test]
fn layered_values_override_defaults() {
    let cfg = decode(&[
        "summary:\n  tolerance: 10\n  names_per_line: 2\n",
        "summary:\n  tolerance: 0\noutput:\n  format: json\nlogging:\n  filter: debug\n",
    ])
    .unwrap();
    assert_eq!(cfg.summary.tolerance, 0);
    assert_eq!(cfg.summary.names_per_line, 2);
    assert_eq!(cfg.summary.price_ceiling, 5_000_000);
    assert_eq!(cfg.output_format, OutputFormat::Json);
    assert_eq!(cfg.log_filter, "debug");
}

#[test]
fn invalid_values_are_rejected() {
    for bad in [
        "summary:\n  names_per_line: 0\n",
        "summary:\n  price_ceiling: 1\n",
        "summary:\n  tolerance: -5\n",
        "summary:\n  tolerance: lots\n",
        "output:\n  format: csv\n",
        "logging:\n  filter: 3\n",
    ] {
        let err = decode(&[bad]).unwrap_err();
        assert!(
            format!("{err:#}").contains("CONFIG_INVALID"),
            "expected CONFIG_INVALID for {bad:?}, got {err:#}"
        );
    }
}
