use anyhow::{bail, Context, Result};
use psplit_summary::SummaryOptions;
use serde_json::Value;

/// How `psplit compute` prints an allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

/// Typed view of the effective configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub summary: SummaryOptions,
    pub output_format: OutputFormat,
    /// Default tracing filter directive; `RUST_LOG` still wins at runtime.
    pub log_filter: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            summary: SummaryOptions::default(),
            output_format: OutputFormat::default(),
            log_filter: "warn".to_string(),
        }
    }
}

impl SplitConfig {
    /// Decode from merged config JSON. Absent keys keep their defaults;
    /// present keys of the wrong type or out of range are errors.
    pub fn from_json(config_json: &Value) -> Result<Self> {
        let mut cfg = SplitConfig::default();

        if let Some(v) = config_json.pointer("/summary/tolerance") {
            let t = v
                .as_i64()
                .context("CONFIG_INVALID: summary.tolerance must be an integer")?;
            if t < 0 {
                bail!("CONFIG_INVALID: summary.tolerance must be >= 0 (got {t})");
            }
            cfg.summary.tolerance = t;
        }

        if let Some(v) = config_json.pointer("/summary/price_ceiling") {
            let c = v
                .as_i64()
                .context("CONFIG_INVALID: summary.price_ceiling must be an integer")?;
            if c < 2 {
                bail!("CONFIG_INVALID: summary.price_ceiling must be >= 2 (got {c})");
            }
            cfg.summary.price_ceiling = c;
        }

        if let Some(v) = config_json.pointer("/summary/names_per_line") {
            let n = v
                .as_u64()
                .context("CONFIG_INVALID: summary.names_per_line must be a positive integer")?;
            if n == 0 {
                bail!("CONFIG_INVALID: summary.names_per_line must be > 0");
            }
            cfg.summary.names_per_line = usize::try_from(n)
                .context("CONFIG_INVALID: summary.names_per_line out of range")?;
        }

        if let Some(v) = config_json.pointer("/output/format") {
            let raw = v
                .as_str()
                .context("CONFIG_INVALID: output.format must be a string")?;
            cfg.output_format = OutputFormat::parse(raw).with_context(|| {
                format!("CONFIG_INVALID: output.format must be table|json (got {raw:?})")
            })?;
        }

        if let Some(v) = config_json.pointer("/logging/filter") {
            let f = v
                .as_str()
                .context("CONFIG_INVALID: logging.filter must be a string")?;
            if !f.trim().is_empty() {
                cfg.log_filter = f.trim().to_string();
            }
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn output_format_parse_is_case_insensitive() {
        assert_eq!(OutputFormat::parse(" JSON "), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::parse("csv"), None);
    }

    #[test]
    fn blank_filter_keeps_default() {
        let cfg = SplitConfig::from_json(&json!({"logging": {"filter": "  "}})).unwrap();
        assert_eq!(cfg.log_filter, "warn");
    }
}
