//! Named loggers and their runtime-adjustable levels.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::reload;

pub const REQUEST_LOGGER: &str = "request-logger";
pub const STACK_LOGGER: &str = "stack-logger";
pub const INDEPENDENT_LOGGER: &str = "independent-logger";

pub const KNOWN_LOGGERS: [&str; 3] = [REQUEST_LOGGER, STACK_LOGGER, INDEPENDENT_LOGGER];

pub(crate) type FilterHandle = reload::Handle<Targets, Registry>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    #[error("No log by the name '{0}'")]
    UnknownLogger(String),

    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("failed to apply log level to '{name}': {reason}")]
    Reload { name: String, reason: String },
}

/// Levels a logger can be switched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Error,
    Info,
    Debug,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    #[must_use]
    pub const fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(Self::Error),
            "INFO" => Ok(Self::Info),
            "DEBUG" => Ok(Self::Debug),
            _ => Err(LoggingError::InvalidLevel(s.to_owned())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LoggingError;

    fn try_from(value: String) -> Result<Self, LoggingError> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_owned()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter that lets exactly one logger's events through at `level`.
pub(crate) fn logger_targets(name: &str, level: LogLevel) -> Targets {
    Targets::new().with_target(name.to_owned(), level.to_filter())
}

struct LoggerSlot {
    name: String,
    level: RwLock<LogLevel>,
    handle: Option<FilterHandle>,
}

/// Registry of the named loggers.
///
/// Cheap to clone; all clones observe the same levels. Loggers built by
/// [`init_logging`](super::init_logging) carry a reload handle into the live
/// subscriber, so level changes take effect immediately.
#[derive(Clone)]
pub struct LogLevels {
    slots: Arc<Vec<LoggerSlot>>,
}

impl fmt::Debug for LogLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|s| (&s.name, *s.level.read())))
            .finish()
    }
}

impl LogLevels {
    pub(crate) fn from_handles(
        entries: impl IntoIterator<Item = (String, LogLevel, FilterHandle)>,
    ) -> Self {
        let slots = entries
            .into_iter()
            .map(|(name, level, handle)| LoggerSlot {
                name,
                level: RwLock::new(level),
                handle: Some(handle),
            })
            .collect();
        Self {
            slots: Arc::new(slots),
        }
    }

    /// Registry that only tracks levels, without a subscriber behind it.
    #[must_use]
    pub fn detached(entries: impl IntoIterator<Item = (String, LogLevel)>) -> Self {
        let slots = entries
            .into_iter()
            .map(|(name, level)| LoggerSlot {
                name,
                level: RwLock::new(level),
                handle: None,
            })
            .collect();
        Self {
            slots: Arc::new(slots),
        }
    }

    fn slot(&self, name: &str) -> Result<&LoggerSlot, LoggingError> {
        self.slots
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| LoggingError::UnknownLogger(name.to_owned()))
    }

    /// # Errors
    /// Returns [`LoggingError::UnknownLogger`] if no logger has that name.
    pub fn level(&self, name: &str) -> Result<LogLevel, LoggingError> {
        Ok(*self.slot(name)?.level.read())
    }

    /// Switches a logger to `level` (case-insensitive) and returns the new level.
    ///
    /// The logger name is checked before the level.
    ///
    /// # Errors
    /// Returns [`LoggingError::UnknownLogger`], [`LoggingError::InvalidLevel`],
    /// or [`LoggingError::Reload`] if the live subscriber rejected the change.
    pub fn set_level(&self, name: &str, level: &str) -> Result<LogLevel, LoggingError> {
        let slot = self.slot(name)?;
        let level: LogLevel = level.parse()?;

        let mut current = slot.level.write();
        if let Some(handle) = &slot.handle {
            handle
                .reload(logger_targets(&slot.name, level))
                .map_err(|e| LoggingError::Reload {
                    name: slot.name.clone(),
                    reason: e.to_string(),
                })?;
        }
        *current = level;
        Ok(level)
    }
}
