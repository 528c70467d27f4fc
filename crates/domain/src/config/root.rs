use serde::{Deserialize, Serialize};

use super::cache::{CacheConfig, MAX_TTL_SECS, MIN_TTL_SECS};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::transport::TransportKind;
use super::upstream::UpstreamConfig;

/// Main configuration structure for Relay DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, transport)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream resolver configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Resolution cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. relay-dns.toml in current directory
    /// 3. /etc/relay-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("relay-dns.toml").exists() {
            Self::from_file("relay-dns.toml")?
        } else if std::path::Path::new("/etc/relay-dns/config.toml").exists() {
            Self::from_file("/etc/relay-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(address) = overrides.upstream {
            self.upstream.address = address;
        }
        if let Some(transport) = overrides.upstream_transport {
            self.upstream.transport = transport;
        }
        if let Some(address) = overrides.listen {
            self.server.listen_address = address;
        }
        if let Some(transport) = overrides.listen_transport {
            self.server.listen_transport = transport;
        }
        if let Some(address) = overrides.fake_address {
            self.server.fake_address = address;
        }
        if let Some(ttl) = overrides.ttl {
            self.cache.ttl = ttl;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Clamp values to their supported ranges.
    ///
    /// The TTL bound is applied once here; everything downstream (sweep
    /// interval, advertised answer TTL) reads the clamped value.
    pub fn normalize(&mut self) {
        self.cache.ttl = self.cache.ttl.clamp(MIN_TTL_SECS, MAX_TTL_SECS);
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server
            .listen_address
            .parse::<std::net::SocketAddr>()
            .map_err(|_| {
                ConfigError::Validation(format!(
                    "Invalid listen address: {}",
                    self.server.listen_address
                ))
            })?;

        self.upstream
            .address
            .parse::<std::net::SocketAddr>()
            .map_err(|_| {
                ConfigError::Validation(format!(
                    "Invalid upstream address: {}",
                    self.upstream.address
                ))
            })?;

        if self.upstream.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Upstream query timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub upstream: Option<String>,
    pub upstream_transport: Option<TransportKind>,
    pub listen: Option<String>,
    pub listen_transport: Option<TransportKind>,
    pub fake_address: Option<String>,
    pub ttl: Option<u32>,
    pub log_level: Option<String>,
}
