use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "TUBEQUIZ_LOG";

/// Builds the filter from `TUBEQUIZ_LOG`, falling back to `default_level`
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sends tracing output to `<dir>/tubequiz.log`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout. Keep the
/// returned guard alive until exit or buffered lines are lost.
pub fn init(dir: &Path, default_level: &str) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let file_appender = tracing_appender::rolling::never(dir, "tubequiz.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false);

    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(file_layer)
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn configured_level_sets_max_level() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert_eq!(env_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(env_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn invalid_level_falls_back_to_info() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert_eq!(
            env_filter("tubequiz=loud").max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn init_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("state");
        let guard = init(&log_dir, "info").unwrap();
        tracing::info!("hello");
        drop(guard);
        assert!(log_dir.is_dir());
    }
}
