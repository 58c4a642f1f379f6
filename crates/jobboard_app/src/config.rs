use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use board_logging::board_info;
use jobboard_core::DEFAULT_FEATURED_LIMIT;
use jobboard_engine::{ClientSettings, DEFAULT_API_BASE_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogDestination;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "jobboard.ron";
/// Server root override; `/api/v1` is appended.
pub const API_URL_ENV: &str = "JOBBOARD_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_response_bytes: u64,
    /// `job` or `alljobs`.
    pub detail_segment: String,
    pub featured_limit: usize,
    pub country: Option<String>,
    pub token_path: PathBuf,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: client.request_timeout.as_secs(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            max_response_bytes: client.max_bytes,
            detail_segment: client.detail_segment,
            featured_limit: DEFAULT_FEATURED_LIMIT,
            country: None,
            token_path: PathBuf::from(".jobboard_token"),
            log: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or `jobboard.ron` when present, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_ron(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        board_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Applies the server root from the environment, if set.
    pub fn apply_api_url_override(&mut self, server_root: Option<String>) {
        if let Some(root) = server_root.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()) {
            self.api_base_url = format!("{}/api/v1", root.trim_end_matches('/'));
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
            detail_segment: self.detail_segment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_client_defaults() {
        let config = AppConfig::default();
        let settings = config.client_settings();
        assert_eq!(settings.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        assert_eq!(config.featured_limit, 6);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(request_timeout_secs: 3, country: Some("Germany"), log: both)"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.country.as_deref(), Some("Germany"));
        assert_eq!(config.log, LogDestination::Both);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn broken_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(request_timeout_secs: \"soon\")").unwrap();
        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn env_override_appends_api_prefix() {
        let mut config = AppConfig::default();
        config.apply_api_url_override(Some("http://localhost:8080/".to_string()));
        assert_eq!(config.api_base_url, "http://localhost:8080/api/v1");

        config.apply_api_url_override(Some("  ".to_string()));
        assert_eq!(config.api_base_url, "http://localhost:8080/api/v1");
    }
}
