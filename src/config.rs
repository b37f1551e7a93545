use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Name of the optional configuration file looked up at the analyzed root.
pub const CONFIG_FILE: &str = "bridge.toml";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

/// Configuration loaded from `bridge.toml`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct BridgeConfig {
    /// Additional path patterns to exclude from snapshot walks (beyond
    /// .gitignore and node_modules).
    pub exclude: Option<Vec<String>>,
    /// HTTP port for `serve`. The `PORT` environment variable takes precedence.
    pub port: Option<u16>,
    /// Default tracing filter when `RUST_LOG` is unset, e.g. `"info"` or
    /// `"bridge_analyzer=debug"`.
    pub log_level: Option<String>,
    /// Files larger than this are left out of walked snapshots.
    pub max_file_bytes: Option<u64>,
}

impl BridgeConfig {
    /// Load configuration from `bridge.toml` in the given root directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or cannot be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|err| {
                warn!("failed to parse {CONFIG_FILE}: {err}. Using defaults.");
                Self::default()
            }),
            Err(err) => {
                warn!("failed to read {CONFIG_FILE}: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Port to listen on: `PORT` if set and valid, else `requested` (the
    /// command-line flag), else the configured port, else 8080.
    pub fn port(&self, requested: Option<u16>) -> u16 {
        self.port_with_env(std::env::var("PORT").ok().as_deref(), requested)
    }

    fn port_with_env(&self, env: Option<&str>, requested: Option<u16>) -> u16 {
        env.and_then(|v| v.trim().parse().ok())
            .or(requested)
            .or(self.port)
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes.unwrap_or(DEFAULT_MAX_FILE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = BridgeConfig::load(dir.path());
        assert!(config.exclude.is_none());
        assert_eq!(config.port_with_env(None, None), 8080);
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.max_file_bytes(), 1024 * 1024);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE),
            "exclude = [\"*.gen.ts\", \"dist\"]\nport = 9000\nlog_level = \"debug\"\nmax_file_bytes = 2048\n",
        )
        .unwrap();
        let config = BridgeConfig::load(dir.path());
        assert_eq!(
            config.exclude.as_deref(),
            Some(&["*.gen.ts".to_string(), "dist".to_string()][..])
        );
        assert_eq!(config.port_with_env(None, None), 9000);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.max_file_bytes(), 2048);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "port = \"not a number\"").unwrap();
        let config = BridgeConfig::load(dir.path());
        assert!(config.port.is_none());
    }

    #[test]
    fn test_port_env_overrides_config() {
        let config = BridgeConfig {
            port: Some(9000),
            ..Default::default()
        };
        assert_eq!(config.port_with_env(Some("3001"), None), 3001);
        assert_eq!(config.port_with_env(Some("garbage"), None), 9000);
        assert_eq!(BridgeConfig::default().port_with_env(Some(" 7000 "), None), 7000);
    }

    #[test]
    fn test_port_flag_sits_between_env_and_config() {
        let config = BridgeConfig {
            port: Some(9000),
            ..Default::default()
        };
        assert_eq!(config.port_with_env(Some("3001"), Some(4000)), 3001);
        // An unparsable PORT does not hide the flag.
        assert_eq!(config.port_with_env(Some("garbage"), Some(4000)), 4000);
        assert_eq!(config.port_with_env(None, Some(4000)), 4000);
        assert_eq!(config.port_with_env(None, None), 9000);
    }
}
