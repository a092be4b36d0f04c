//! Logging setup.
//!
//! Every named logger is a `tracing` target with its own file sink and its own
//! reloadable level filter. Service-wide messages from any other target go to
//! stderr in the default `fmt` format.

mod format;
mod levels;
mod request_scope;

use std::fs;
use std::path::Path;

use anyhow::Context as _;
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::writer::MakeWriterExt as _;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{Layer, Registry, reload};

use crate::config::{LoggerConfig, LoggingConfig, RotationConfig};

pub use format::{DATE_FORMAT, RequestLineFormat};
pub use levels::{
    INDEPENDENT_LOGGER, KNOWN_LOGGERS, LogLevel, LogLevels, LoggingError, REQUEST_LOGGER,
    STACK_LOGGER,
};
pub use request_scope::{current_request_number, scope_request};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the background log writers alive; drop it last to flush files.
#[must_use = "dropping the guard stops the log writers"]
pub struct LoggingGuard {
    levels: LogLevels,
    _writers: Vec<WorkerGuard>,
}

impl LoggingGuard {
    /// Runtime level registry bound to the installed subscriber.
    #[must_use]
    pub fn levels(&self) -> LogLevels {
        self.levels.clone()
    }
}

/// Installs the global subscriber described by `cfg`.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    fs::create_dir_all(&cfg.dir)
        .with_context(|| format!("failed to create log directory {}", cfg.dir.display()))?;

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(cfg.loggers.len() + 1);
    let mut handles = Vec::with_capacity(cfg.loggers.len());
    let mut writers = Vec::with_capacity(cfg.loggers.len());

    for (name, logger) in &cfg.loggers {
        let (filter, handle) = reload::Layer::new(levels::logger_targets(name, logger.level));
        let (writer, guard) = tracing_appender::non_blocking(open_log_file(
            &cfg.dir,
            logger,
            cfg.rotation,
        ));

        let base = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(RequestLineFormat);
        let layer = if logger.console {
            base.with_writer(writer.and(std::io::stderr))
                .with_filter(filter)
                .boxed()
        } else {
            base.with_writer(writer).with_filter(filter).boxed()
        };

        layers.push(layer);
        handles.push((name.clone(), logger.level, handle));
        writers.push(guard);
    }

    layers.push(service_layer(cfg));

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::debug!(dir = %cfg.dir.display(), "logging initialized");

    Ok(LoggingGuard {
        levels: LogLevels::from_handles(handles),
        _writers: writers,
    })
}

fn open_log_file(dir: &Path, logger: &LoggerConfig, rotation: RotationConfig) -> FileRotate<AppendCount> {
    let limit = if rotation.max_bytes == 0 {
        ContentLimit::None
    } else {
        ContentLimit::Bytes(rotation.max_bytes)
    };
    FileRotate::new(
        dir.join(&logger.file),
        AppendCount::new(rotation.max_files),
        limit,
        Compression::None,
        #[cfg(unix)]
        None,
    )
}

/// stderr layer for everything that is not one of the named loggers.
fn service_layer(cfg: &LoggingConfig) -> BoxedLayer {
    let filter = KNOWN_LOGGERS.iter().fold(
        Targets::new().with_default(cfg.service_level.to_filter()),
        |targets, name| targets.with_target(*name, LevelFilter::OFF),
    );
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_open_log_file_creates_file_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let logger = LoggerConfig::new("stack.log", LogLevel::Info, false);
        let mut file = open_log_file(dir.path(), &logger, RotationConfig::default());
        std::io::Write::write_all(&mut file, b"hello\n").unwrap();
        std::io::Write::flush(&mut file).unwrap();
        let written = fs::read_to_string(dir.path().join("stack.log")).unwrap();
        assert_eq!(written, "hello\n");
    }

    #[test]
    fn test_logger_targets_only_admit_own_target() {
        let targets = levels::logger_targets(STACK_LOGGER, LogLevel::Info);
        assert!(targets.would_enable(STACK_LOGGER, &tracing::Level::INFO));
        assert!(!targets.would_enable(STACK_LOGGER, &tracing::Level::DEBUG));
        assert!(!targets.would_enable(REQUEST_LOGGER, &tracing::Level::ERROR));
    }

    #[test]
    fn test_default_config_covers_every_known_logger() {
        let cfg = LoggingConfig::default();
        let names: Vec<&str> = cfg.loggers.keys().map(String::as_str).collect();
        for name in KNOWN_LOGGERS {
            assert!(names.contains(&name), "{name}");
        }
        assert_eq!(cfg.dir, PathBuf::from("logs"));
    }
}
