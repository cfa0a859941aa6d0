//! Configuration file support for Vitalize.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/vitalize/config.toml`.
//! Retention behavior (TTL, sweep cadence, record cap) is intentionally
//! absent here: those are fixed constants carried by
//! [`crate::store::RetentionPolicy`].

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

/// HTTP server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// Client-side configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Vitalize server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Uniform timeout for every server call, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Directory holding the fallback cache
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_ms: default_timeout_ms(),
            data_dir: default_data_dir(),
        }
    }
}

// Default value functions
fn default_bind() -> String {
    "127.0.0.1:3000".into()
}

fn default_server_url() -> String {
    "http://127.0.0.1:3000".into()
}

fn default_timeout_ms() -> u64 {
    2_000
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("vitalize")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("vitalize").join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.client.timeout_ms, 2_000);
        assert!(config.client.server_url.starts_with("http://"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.server.bind, parsed.server.bind);
        assert_eq!(config.client.server_url, parsed.client.server_url);
        assert_eq!(config.client.timeout_ms, parsed.client.timeout_ms);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[client]
timeout_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.client.timeout_ms, 500);
        assert_eq!(config.server.bind, "127.0.0.1:3000"); // default
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbind = \"0.0.0.0:8080\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }
}
