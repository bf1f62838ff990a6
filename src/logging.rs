use crate::config::{Config, LogConfig};
use std::env;
use std::fs;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "LEFTOVERS_LOG";
const LOG_FILE: &str = "leftovers.log";

/// Installs the file logger. Nothing goes to the terminal so the review
/// screen stays intact. Keep the guard alive until exit or buffered lines
/// are lost.
pub fn init_logger(config: &LogConfig) -> Option<WorkerGuard> {
    let log_dir = Config::data_dir();
    if fs::create_dir_all(&log_dir).is_err() {
        return None;
    }

    let filter = env::var(LOG_ENV).unwrap_or_else(|_| config.level.clone());
    let filter_layer = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter_layer)
        .try_init()
        .is_ok();

    if !installed {
        return None;
    }

    info!(filter = %filter, "logging to {}", log_dir.join(LOG_FILE).display());
    Some(guard)
}
