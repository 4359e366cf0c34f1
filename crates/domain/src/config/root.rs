use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::filter::FilterConfig;
use super::logging::LoggingConfig;
use super::ranking::RankingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-relay.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-relay/config.toml";

/// Main configuration structure for Ferrous Relay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream resolvers and relay timeout
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Health probing and periodic re-ranking
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Response post-processing
    #[serde(default)]
    pub filter: FilterConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-relay.toml in current directory
    /// 3. /etc/ferrous-relay/config.toml
    /// 4. Default configuration
    ///
    /// Command-line overrides are applied on top of whichever source won.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.servers = vec![upstream];
        }
        if let Some(interval) = overrides.ranking_interval_secs {
            self.ranking.interval_secs = interval;
        }
        if overrides.debug {
            self.logging.debug = true;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    ///
    /// Fails when the relay could not serve anything: port 0, zero timeouts,
    /// or no upstream entry that survives normalization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.upstream.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream.query_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.ranking.probe_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "ranking.probe_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.upstream.parse_servers().resolvers.is_empty() {
            return Err(ConfigError::Validation(
                "No valid upstream servers configured".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file that `load(None, ..)` would use
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    /// Comma-separated resolver list, replaces `upstream.servers`.
    pub upstream: Option<String>,
    pub ranking_interval_secs: Option<u64>,
    pub debug: bool,
    pub log_level: Option<String>,
}
