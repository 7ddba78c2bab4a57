//! Logging Infrastructure
//!
//! `RUST_LOG` wins over the configured level when set.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_logger_with_level(log_level: Option<&str>, json: bool) {
    let level = log_level.unwrap_or(crate::config::DEFAULT_LOG_LEVEL);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
