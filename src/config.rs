//! # Renderer Configuration
//!
//! Settings loaded from environment variables. Command-line flags take
//! precedence over every value here.

use crate::constants::{DEFAULT_TESTRUN_GENERATE_NAME, DEFAULT_TESTRUN_NAMESPACE};
use std::fmt;
use std::str::FromStr;

/// Manifest serialisation format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => f.write_str("yaml"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Renderer configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    /// `RUST_LOG` wins when set
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    pub output_format: OutputFormat,
    /// Namespace the Testrun is rendered into
    pub testrun_namespace: String,
    /// Testrun name; a trailing `-` makes it a `generateName` prefix
    pub testrun_name: String,
    /// Garbage collection delay for finished Testruns (seconds)
    pub testrun_ttl_seconds: Option<i32>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            output_format: OutputFormat::Yaml,
            testrun_namespace: DEFAULT_TESTRUN_NAMESPACE.to_string(),
            testrun_name: DEFAULT_TESTRUN_GENERATE_NAME.to_string(),
            testrun_ttl_seconds: None,
        }
    }
}

impl RendererConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup; unset or unparseable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_level: var_or_default_str(&lookup, "LOG_LEVEL", "INFO"),
            log_format: var_or_default_str(&lookup, "LOG_FORMAT", "text"),
            output_format: var_or_default(&lookup, "OUTPUT_FORMAT", OutputFormat::Yaml),
            testrun_namespace: var_or_default_str(
                &lookup,
                "TESTRUN_NAMESPACE",
                DEFAULT_TESTRUN_NAMESPACE,
            ),
            testrun_name: var_or_default_str(&lookup, "TESTRUN_NAME", DEFAULT_TESTRUN_GENERATE_NAME),
            testrun_ttl_seconds: lookup("TESTRUN_TTL_SECONDS").and_then(|v| v.parse().ok()),
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Read variable or return default value
fn var_or_default<T: FromStr>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read variable as string or return default
fn var_or_default_str(lookup: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RendererConfig::default();
        assert_eq!(config.output_format, OutputFormat::Yaml);
        assert_eq!(config.testrun_namespace, "default");
        assert_eq!(config.testrun_name, "create-shoot-");
        assert!(!config.json_logs());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("YML".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("toml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_json_logs_case_insensitive() {
        let config = RendererConfig {
            log_format: "JSON".into(),
            ..RendererConfig::default()
        };
        assert!(config.json_logs());
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let config = RendererConfig::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "DEBUG"),
            ("LOG_FORMAT", "json"),
            ("OUTPUT_FORMAT", "json"),
            ("TESTRUN_NAMESPACE", "garden-it"),
            ("TESTRUN_NAME", "nightly"),
            ("TESTRUN_TTL_SECONDS", "3600"),
        ]));
        assert_eq!(
            config,
            RendererConfig {
                log_level: "DEBUG".into(),
                log_format: "json".into(),
                output_format: OutputFormat::Json,
                testrun_namespace: "garden-it".into(),
                testrun_name: "nightly".into(),
                testrun_ttl_seconds: Some(3600),
            }
        );
    }

    #[test]
    fn test_from_lookup_empty_matches_default() {
        assert_eq!(
            RendererConfig::from_lookup(|_| None),
            RendererConfig::default()
        );
    }

    #[test]
    fn test_from_lookup_invalid_values_fall_back() {
        let config = RendererConfig::from_lookup(lookup_from(&[
            ("OUTPUT_FORMAT", "toml"),
            ("TESTRUN_TTL_SECONDS", "an hour"),
        ]));
        assert_eq!(config.output_format, OutputFormat::Yaml);
        assert_eq!(config.testrun_ttl_seconds, None);
    }
}
