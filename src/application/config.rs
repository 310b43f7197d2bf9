use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub alarms: AlarmsConfig,
    #[serde(default)]
    pub notifiers: NotifiersConfig,
}

/// General settings: polling cadence and outbound request timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_trigger_interval")]
    pub trigger_interval_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// The alarms defined for this process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlarmsConfig {
    #[serde(default)]
    pub node_rating: NodeRatingConfig,
}

/// Node rating alarm: drift threshold (percent), API address, and the set
/// of monitored node public keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRatingConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub pub_keys: Vec<String>,
}

/// Notification channel settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifiersConfig {
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub slack: SlackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlackConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: String,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

// --- Defaults ---

const fn default_trigger_interval() -> u64 {
    30
}

const fn default_request_timeout() -> u64 {
    10
}

const fn default_threshold() -> f64 {
    1.0
}

fn default_api_url() -> String {
    "https://api.elrond.com".into()
}

const fn default_smtp_port() -> u16 {
    587
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trigger_interval_secs: default_trigger_interval(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: String::new(),
            to: vec![],
        }
    }
}

impl Default for NodeRatingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            api_url: default_api_url(),
            pub_keys: vec![],
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").expect("parse");
        assert_eq!(config.general.trigger_interval_secs, 30);
        assert_eq!(config.general.request_timeout_secs, 10);
        assert!((config.alarms.node_rating.threshold - 1.0).abs() < f64::EPSILON);
        assert!(config.alarms.node_rating.pub_keys.is_empty());
        assert!(!config.notifiers.email.enabled);
        assert_eq!(config.notifiers.email.port, 587);
        assert!(!config.notifiers.slack.enabled);
    }

    #[test]
    fn full_config_parses() {
        let raw = r#"
            [general]
            trigger_interval_secs = 60
            request_timeout_secs = 5

            [alarms.node_rating]
            threshold = 2.5
            api_url = "https://api.example.com"
            pub_keys = ["abcd", "efgh"]

            [notifiers.email]
            enabled = true
            host = "smtp.example.com"
            port = 465
            username = "alerts"
            password = "secret"
            from = "alerts@example.com"
            to = ["ops@example.com", "oncall@example.com"]

            [notifiers.slack]
            enabled = true
            url = "https://hooks.slack.com/services/T00/B00/xxx"
        "#;
        let config: AppConfig = toml::from_str(raw).expect("parse");
        assert_eq!(config.general.trigger_interval_secs, 60);
        assert!((config.alarms.node_rating.threshold - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.alarms.node_rating.pub_keys.len(), 2);
        assert!(config.notifiers.email.enabled);
        assert_eq!(config.notifiers.email.port, 465);
        assert_eq!(config.notifiers.email.to.len(), 2);
        assert!(config.notifiers.slack.enabled);
    }

    #[test]
    fn partial_section_fills_missing_fields() {
        let raw = r#"
            [alarms.node_rating]
            pub_keys = ["abcd"]
        "#;
        let config: AppConfig = toml::from_str(raw).expect("parse");
        assert_eq!(config.alarms.node_rating.pub_keys, vec!["abcd"]);
        assert_eq!(config.alarms.node_rating.api_url, "https://api.elrond.com");
        assert_eq!(config.notifiers.email.port, 587);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }
}
