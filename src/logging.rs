//! File logging for hosts.
//!
//! A terminal UI owns stdout, so events go to the file named by [`EnvConfig::log_file`]
//! through a non-blocking writer. Without a file, no subscriber is installed and the
//! `tracing` macros in the runtime are free.

use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

const DEFAULT_FILTER: &str = "uiterm=info";

/// Keeps the background writer alive; buffered lines are flushed when it drops.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_file: PathBuf,
}

impl LoggingGuard {
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard")
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// Install the global subscriber described by `config`.
///
/// Returns `None` when no log file is configured, the file's directory cannot be created,
/// or another subscriber is already installed.
pub fn init(config: &EnvConfig) -> Option<LoggingGuard> {
    let log_file = PathBuf::from(config.log_file.as_deref()?);
    let (dir, file_name) = split_log_path(&log_file).ok()?;

    let file_appender = tracing_appender::rolling::never(&dir, &file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = filter_for(config);
    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_file = %log_file.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_file,
    })
}

fn filter_for(config: &EnvConfig) -> EnvFilter {
    config
        .log_filter
        .as_deref()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn split_log_path(path: &Path) -> io::Result<(PathBuf, PathBuf)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name")
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    Ok((dir, PathBuf::from(file_name)))
}
