use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::SollinkConfig;

const DEFAULT_FILTER: &str =
    "info,sollink_app=debug,sollink_ui=debug,sollink_chain=debug,sollink_core=debug";

/// Initializes file + console logging under `~/.sollink/logs`.
/// Returns a guard that must be kept alive for the duration of the app.
///
/// The console layer writes to stderr so the rendered header on stdout stays
/// readable.
pub fn init_logging(level: Option<&str>) -> Result<WorkerGuard> {
    let logs_dir = SollinkConfig::logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;

    // File appender: daily rotation
    let file_appender = tracing_appender::rolling::daily(&logs_dir, "sollink");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

/// Filter used when `RUST_LOG` is unset.
fn filter_directive(level: Option<&str>) -> &str {
    level.unwrap_or(DEFAULT_FILTER)
}

/// Initialize file-only logging to a custom directory with a custom filter.
pub fn init_logging_to_dir(logs_dir: &std::path::Path, filter: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, "sollink");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_to_dir_creates_directory() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let logs_dir = tmp.path().join("nested").join("logs");
        assert!(!logs_dir.exists());

        // Only one global subscriber per process; a second install errors but
        // the directory is still created.
        let result = init_logging_to_dir(&logs_dir, "warn");
        assert!(logs_dir.exists());
        drop(result);
    }

    #[test]
    fn second_install_reports_logging_error() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let first = init_logging_to_dir(&tmp.path().join("a"), "info");
        let second = init_logging_to_dir(&tmp.path().join("b"), "info");

        // At most one of the two can own the global subscriber.
        assert!(first.is_err() || second.is_err());
        if let Err(e) = second {
            assert!(e.to_string().contains("logging"), "unexpected error: {e}");
        }
    }

    #[test]
    fn unset_level_uses_per_crate_filter() {
        let config = SollinkConfig::default();
        assert_eq!(filter_directive(config.log_level.as_deref()), DEFAULT_FILTER);
        assert_eq!(filter_directive(Some("warn")), "warn");
    }

    #[test]
    fn default_filter_parses() {
        let filter = EnvFilter::try_new(DEFAULT_FILTER);
        assert!(filter.is_ok());
    }
}
