//! Application configuration loaded from environment variables.

use domain::columns;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Runtime configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `TABDB_LOG_FORMAT`: `text` or `json` (default: `text`)
/// - `TABDB_REQUIRED_COLUMNS`: comma-separated catalog columns to require
///   (default: the twelve standard catalog columns)
/// - `TABDB_METRICS`: `1`/`true` prints Prometheus metrics after a command
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub required_columns: Vec<String>,
    pub emit_metrics: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| std::env::var(name).ok();

        Self {
            log_level: var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: var("TABDB_LOG_FORMAT")
                .map(|v| parse_log_format(&v))
                .unwrap_or(defaults.log_format),
            required_columns: var("TABDB_REQUIRED_COLUMNS")
                .map(|v| parse_columns(&v))
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.required_columns),
            emit_metrics: var("TABDB_METRICS").is_some_and(|v| parse_flag(&v)),
        }
    }

    /// Required catalog columns in the borrowed form the loader takes.
    pub fn required_columns(&self) -> Vec<&str> {
        self.required_columns.iter().map(String::as_str).collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            required_columns: columns::REQUIRED_CATALOG
                .iter()
                .map(|c| c.to_string())
                .collect(),
            emit_metrics: false,
        }
    }
}

fn parse_columns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_log_format(raw: &str) -> LogFormat {
    if raw.trim().eq_ignore_ascii_case("json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    }
}
