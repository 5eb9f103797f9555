use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset values fall back to the built-in defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON career catalog. `None` serves the catalog compiled into the binary.
    pub catalog_path: Option<PathBuf>,
    pub engine_settings_path: Option<PathBuf>,
    /// Used when a request omits `exploration_level`.
    pub default_exploration_level: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            catalog_path: None,
            engine_settings_path: None,
            default_exploration_level: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: match optional_env("PORT") {
                Some(port) => port
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            catalog_path: optional_env("CATALOG_PATH").map(PathBuf::from),
            engine_settings_path: optional_env("ENGINE_SETTINGS_PATH").map(PathBuf::from),
            default_exploration_level: match optional_env("DEFAULT_EXPLORATION_LEVEL") {
                Some(level) => level
                    .parse::<i64>()
                    .context("DEFAULT_EXPLORATION_LEVEL must be an integer")?,
                None => defaults.default_exploration_level,
            },
        })
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
