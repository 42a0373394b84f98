//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros to a `fmt` layer that writes into the rotating log
//! file, filtered by an `EnvFilter`.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "regdesk.log";

/// Resolves the filter directive: `RUST_LOG`, then `config.trace_level`,
/// then `"info"`.
#[must_use]
pub fn resolve_filter(config: &Config, rust_log: Option<&str>) -> String {
    rust_log
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| "info".to_string())
}

/// Initializes the tracing subscriber with file output.
///
/// # File Location
///
/// `<data dir>/regdesk.log`, where the data directory is
/// [`data_dir`](crate::infrastructure::data_dir).
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Does nothing if the directory cannot be created; logging is optional
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```no_run
/// use regdesk::observability::init_tracing;
/// use regdesk::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = resolve_filter(config, rust_log.as_deref());

    let data_dir = crate::infrastructure::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = FileWriter::new(data_dir.join(LOG_FILE_NAME));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true),
    );

    if subscriber.try_init().is_ok() {
        tracing::debug!(filter = %directive, "tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_wins_over_config() {
        let config = Config {
            trace_level: Some("debug".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_filter(&config, Some("regdesk=trace")), "regdesk=trace");
        assert_eq!(resolve_filter(&config, Some("  ")), "debug");
        assert_eq!(resolve_filter(&Config::default(), None), "info");
    }
}
