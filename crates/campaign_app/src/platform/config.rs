use std::fs;
use std::path::Path;
use std::time::Duration;

use campaign_client::ClientSettings;
use dash_logging::dash_warn;
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "campaign_dashboard.ron";

/// User-editable settings read from `campaign_dashboard.ron` next to the
/// binary. A missing or unparsable file falls back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AppConfig {
    #[serde(default = "default_base_url")]
    pub(crate) base_url: String,
    #[serde(default = "default_connect_timeout_ms")]
    pub(crate) connect_timeout_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub(crate) request_timeout_ms: u64,
    #[serde(default = "default_log_file")]
    pub(crate) log_file: String,
    #[serde(default = "default_log_level")]
    pub(crate) log_level: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_log_file() -> String {
    "dashboard.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_request_timeout_ms() -> u64 {
    60_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub(crate) fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}

pub(crate) fn load(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            dash_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            dash_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load(&dir.path().join(CONFIG_FILENAME));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"(base_url: "http://backend.internal:9000")"#).expect("write");

        let config = load(&path);
        assert_eq!(config.base_url, "http://backend.internal:9000");
        assert_eq!(config.request_timeout_ms, default_request_timeout_ms());
    }

    #[test]
    fn unparsable_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "not ron at all {{{").expect("write");

        assert_eq!(load(&path), AppConfig::default());
    }

    #[test]
    fn log_settings_are_configurable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"(log_file: "campaign.log", log_level: "debug")"#).expect("write");

        let config = load(&path);
        assert_eq!(config.log_file, "campaign.log");
        assert_eq!(
            crate::platform::logging::parse_level(&config.log_level),
            log::LevelFilter::Debug
        );
    }

    #[test]
    fn round_trips_through_ron() {
        let config = AppConfig {
            base_url: "http://10.0.0.5:8000".to_string(),
            connect_timeout_ms: 1_000,
            request_timeout_ms: 30_000,
            log_file: "dashboard.log".to_string(),
            log_level: "warn".to_string(),
        };
        let pretty = ron::ser::PrettyConfig::new();
        let text = ron::ser::to_string_pretty(&config, pretty).expect("serialize");

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, text).expect("write");

        assert_eq!(load(&path), config);
    }
}
