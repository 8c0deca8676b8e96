//! Logging Infrastructure
//!
//! `RUST_LOG` wins over the configured level when set.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON format and daily rolling file output
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // 目录不存在时退回 stdout
    let appender = log_dir
        .map(Path::new)
        .filter(|dir| dir.exists())
        .map(|dir| tracing_appender::rolling::daily(dir, "seating-server"));

    match (appender, json) {
        (Some(file), true) => builder.json().with_writer(file).init(),
        (Some(file), false) => builder.with_ansi(false).with_writer(file).init(),
        (None, true) => builder.json().init(),
        (None, false) => builder.init(),
    }
}
