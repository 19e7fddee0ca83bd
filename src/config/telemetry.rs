//! Logging configuration

use serde::Deserialize;

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directives, used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// Log line format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info,ragdesk=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_defaults() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.log_filter, "info,ragdesk=debug");
    }
}
