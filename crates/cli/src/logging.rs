//! Logging to stderr and to a per-session file.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::CliConfig;

/// Name of the log file inside a session directory.
pub const LOG_FILE: &str = "autoroute.log";

/// An initialized logging session.
///
/// Dropping it flushes and closes the log file.
pub struct Session {
    pub id: String,
    /// Directory holding the log file and run reports.
    pub dir: PathBuf,
    _guard: WorkerGuard,
}

/// Get the platform-specific log directory
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/autoroute/logs`
/// - Linux: `~/.cache/autoroute/logs` (or `$XDG_CACHE_HOME/autoroute/logs`)
/// - Windows: `%LOCALAPPDATA%\autoroute\cache\logs`
/// - Fallback: `/tmp/autoroute/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "autoroute")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/autoroute"))
        .join("logs")
}

fn generated_session_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{timestamp}")
}

/// Setup logging to both stderr and file.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init(config: &CliConfig) -> Result<Session> {
    let log_dir = config.log_dir.clone().unwrap_or_else(default_log_dir);
    let id = config
        .session_id
        .clone()
        .unwrap_or_else(generated_session_id);
    let dir = session_dir(&log_dir, &id)?;

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    tracing::info!(session = %id, "logging initialized");
    tracing::info!("Log file: {}", dir.join(LOG_FILE).display());

    Ok(Session {
        id,
        dir,
        _guard: guard,
    })
}

fn session_dir(log_dir: &Path, id: &str) -> Result<PathBuf> {
    let dir = log_dir.join(id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    Ok(dir)
}
