//! Logging Infrastructure
//!
//! Structured logging for development (pretty, stdout) and production
//! (JSON, optional daily rolling file).

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger from `RUST_LOG`, defaulting to `info`
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON and file output
///
/// `log_level` is used only when `RUST_LOG` is not set. File output goes to
/// `<log_dir>/dine-server.<date>` and is skipped when the directory cannot
/// be created.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_appender = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_err() {
            eprintln!("Log directory {} is not writable, logging to stdout", dir);
            return None;
        }
        Some(tracing_appender::rolling::daily(log_path, "dine-server"))
    });

    // try_init: a second call (tests) keeps the first subscriber
    let result = match (json, file_appender) {
        (true, Some(appender)) => builder.json().with_writer(appender).try_init(),
        (true, None) => builder.json().try_init(),
        (false, Some(appender)) => builder.with_ansi(false).with_writer(appender).try_init(),
        (false, None) => builder.try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("Logger already initialized: {}", e);
    }
}
