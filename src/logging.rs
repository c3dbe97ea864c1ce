//! ログ出力の初期化
//!
//! Logs always go to stderr. When a log directory is configured they are also
//! written to a daily rolling file inside it.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{
    InitError,
    RollingFileAppender,
    Rotation,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Prefix of the rolling log files (`app-shell.YYYY-MM-DD.log`).
pub const LOG_FILE_PREFIX: &str = "app-shell";

/// Daily rolling appender in `dir`, creating the directory if needed.
///
/// # Errors
/// The directory cannot be created or the log file cannot be opened.
pub fn rolling_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
}

/// `RUST_LOG` filter, `info` when unset.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Human-readable output on stderr.
fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer().with_writer(std::io::stderr)
}

/// Install the global subscriber.
///
/// Returns the file writer guard when logging to disk; it must be kept alive
/// until shutdown. If the log directory is unusable, stderr logging is still
/// installed before the error is returned.
///
/// # Errors
/// The rolling file appender could not be created in `log_dir`.
pub fn init(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, InitError> {
    let Some(dir) = log_dir else {
        tracing_subscriber::registry().with(env_filter()).with(stderr_layer()).init();
        return Ok(None);
    };

    let appender = match rolling_appender(dir) {
        Ok(appender) => appender,
        Err(e) => {
            tracing_subscriber::registry().with(env_filter()).with(stderr_layer()).init();
            return Err(e);
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer);
    tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer())
        .with(file_layer)
        .init();
    Ok(Some(guard))
}
