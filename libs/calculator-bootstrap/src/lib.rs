//! Process plumbing for the calculator service: layered configuration,
//! per-logger file logging with runtime-adjustable levels, and shutdown
//! signal handling.

pub mod config;
pub mod logging;
pub mod signals;

pub use config::{AppConfig, CliOverrides, ConfigError, LoggerConfig, LoggingConfig, ServerConfig};
pub use logging::{
    INDEPENDENT_LOGGER, LogLevel, LogLevels, LoggingError, LoggingGuard, REQUEST_LOGGER,
    STACK_LOGGER, init_logging,
};
pub use signals::wait_for_shutdown;
