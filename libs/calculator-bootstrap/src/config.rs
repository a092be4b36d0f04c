//! Layered application configuration.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. YAML file (if provided)
//! 3. environment variables `CALCULATOR__*` (`__` separates nesting)
//! 4. CLI overrides

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::{INDEPENDENT_LOGGER, KNOWN_LOGGERS, LogLevel, REQUEST_LOGGER, STACK_LOGGER};

/// Prefix for environment overrides, e.g. `CALCULATOR__SERVER__BIND_ADDR`.
pub const ENV_PREFIX: &str = "CALCULATOR__";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8496";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid bind address '{addr}': {reason}")]
    InvalidBindAddr { addr: String, reason: String },

    #[error("unknown logger '{0}' in logging.loggers (expected one of: {list})", list = KNOWN_LOGGERS.join(", "))]
    UnknownLogger(String),

    #[error("logger '{0}' has an empty file name")]
    EmptyLogFile(String),
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Parses `bind_addr` into a socket address.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBindAddr`] when the address does not parse.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                addr: self.bind_addr.clone(),
                reason: e.to_string(),
            })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Directory holding all log files; created on startup.
    pub dir: PathBuf,
    /// Level for service-wide messages (startup, shutdown) printed to stderr.
    pub service_level: LogLevel,
    pub rotation: RotationConfig,
    pub loggers: BTreeMap<String, LoggerConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let loggers = BTreeMap::from([
            (
                REQUEST_LOGGER.to_owned(),
                LoggerConfig::new("requests.log", LogLevel::Info, true),
            ),
            (
                STACK_LOGGER.to_owned(),
                LoggerConfig::new("stack.log", LogLevel::Info, false),
            ),
            (
                INDEPENDENT_LOGGER.to_owned(),
                LoggerConfig::new("independent.log", LogLevel::Debug, false),
            ),
        ]);
        Self {
            dir: PathBuf::from("logs"),
            service_level: LogLevel::Info,
            rotation: RotationConfig::default(),
            loggers,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct RotationConfig {
    /// Rotate once a file reaches this size. `0` disables rotation.
    pub max_bytes: usize,
    /// Number of rotated files kept next to the active one.
    pub max_files: usize,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_files: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    pub file: String,
    pub level: LogLevel,
    /// Mirror this logger to stderr as well.
    #[serde(default)]
    pub console: bool,
}

impl LoggerConfig {
    #[must_use]
    pub fn new(file: impl Into<String>, level: LogLevel, console: bool) -> Self {
        Self {
            file: file.into(),
            level,
            console,
        }
    }
}

/// Overrides coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub logs_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from defaults, an optional YAML file and the environment.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, a value has the wrong shape,
    /// or the result fails validation.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Self = figment
            .extract()
            .context("failed to load calculator configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Applies CLI overrides on top of the loaded configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBindAddr`] if a port override is given
    /// while the configured bind address is malformed.
    pub fn apply_cli_overrides(&mut self, overrides: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(port) = overrides.port {
            let mut addr = self.server.socket_addr()?;
            addr.set_port(port);
            self.server.bind_addr = addr.to_string();
        }
        if let Some(dir) = &overrides.logs_dir {
            self.logging.dir.clone_from(dir);
        }
        Ok(())
    }

    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;
        for (name, logger) in &self.logging.loggers {
            if !KNOWN_LOGGERS.contains(&name.as_str()) {
                return Err(ConfigError::UnknownLogger(name.clone()));
            }
            if logger.file.trim().is_empty() {
                return Err(ConfigError::EmptyLogFile(name.clone()));
            }
        }
        Ok(())
    }

    /// Effective configuration as pretty JSON, for `--print-config`.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize configuration")
    }
}
