//! Logging Infrastructure
//!
//! `RUST_LOG` takes precedence over the configured level when set.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger (stdout only)
pub fn init_logger(log_level: &str) {
    init_logger_with_file(log_level, false, None);
}

/// Initialize the logger with optional JSON format and a daily rolling file
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger_with_file(log_level: &str, json: bool, log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},sqlx=warn,tower_http=info")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir exists
    let result = match log_dir.filter(|dir| dir.exists()) {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "pos-server");
            if json {
                builder.json().with_writer(file_appender).try_init()
            } else {
                builder.with_ansi(false).with_writer(file_appender).try_init()
            }
        }
        None if json => builder.json().try_init(),
        None => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}
