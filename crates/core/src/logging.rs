use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directory that receives the rolling log files, `~/.fqcn/logs`.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fqcn")
        .join("logs")
}

// Files are named after the component, e.g. cli.2024-01-21
fn file_appender(dir: &Path, component: &str) -> Result<RollingFileAppender, String> {
    std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(component)
        .build(dir)
        .map_err(|e| e.to_string())
}

/// Install the global subscriber. Without a usable log directory output
/// falls back to stderr and no guard is returned.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<WorkerGuard> {
    let log_dir = log_dir();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard, file_error) = match file_appender(&log_dir, component) {
        Ok(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    let stderr_layer = (to_stderr || file_error.is_some()).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if let Some(e) = file_error {
        tracing::warn!("Could not open log directory {:?}: {}", log_dir, e);
    }
    if !installed {
        tracing::debug!("A global subscriber was already installed");
    }

    guard
}
