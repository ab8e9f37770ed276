use crate::fetch::DEFAULT_API_URL;
use reqwest::Url;
use std::path::PathBuf;
use thiserror::Error;

pub const API_URL_VAR: &str = "HERO_API_URL";
pub const LOG_VAR: &str = "HERO_TUI_LOG";
const DEFAULT_LOG_FILE: &str = "hero_tui.log";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {value}")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: Url,
    /// Base path for the log file, in the temp dir unless overridden.
    pub log_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = match lookup(API_URL_VAR).filter(|s| !s.trim().is_empty()) {
            Some(raw) => Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidUrl {
                var: API_URL_VAR,
                value: raw.clone(),
            })?,
            None => Url::parse(DEFAULT_API_URL).map_err(|_| ConfigError::InvalidUrl {
                var: API_URL_VAR,
                value: DEFAULT_API_URL.to_string(),
            })?,
        };
        let log_path = lookup(LOG_VAR)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_path);
        Ok(Self { api_url, log_path })
    }
}

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.log_path, std::env::temp_dir().join("hero_tui.log"));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            (API_URL_VAR, "http://localhost:8080/heroes.json"),
            (LOG_VAR, "/tmp/hero.log"),
        ]))
        .unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8080/heroes.json");
        assert_eq!(config.log_path, PathBuf::from("/tmp/hero.log"));
    }

    #[test]
    fn blank_values_fall_back() {
        let config = Config::from_lookup(lookup(&[(API_URL_VAR, "  "), (LOG_VAR, "")])).unwrap();
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.log_path, default_log_path());
    }

    #[test]
    fn rejects_invalid_url() {
        let err = Config::from_lookup(lookup(&[(API_URL_VAR, "heroes.json")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidUrl {
                var: API_URL_VAR,
                value: "heroes.json".to_string()
            }
        );
    }
}
