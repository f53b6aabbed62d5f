use thiserror::Error;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            enable_file_logs: false,
            log_dir: "./logs".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create rolling file appender: {0}")]
    Appender(#[from] InitError),
    #[error("failed to initialize tracing: {0}")]
    Init(String),
}

/// Installs the global subscriber for a host process. The engine itself only
/// emits events; a subscriber that is already installed is left in place.
pub fn init_tracing(config: &LogConfig) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let stdout_layer = fmt::layer().with_target(true).with_thread_ids(false);

    let registry = Registry::default().with(env_filter).with(stdout_layer);

    if config.enable_file_logs {
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("learning-engine")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&config.log_dir)?;
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .json();
        ignore_already_set(registry.with(file_layer).try_init())
    } else {
        ignore_already_set(registry.try_init())
    }
}

fn ignore_already_set(
    result: Result<(), tracing_subscriber::util::TryInitError>,
) -> Result<(), LoggingError> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.to_string().contains("already been set") => Ok(()),
        Err(e) => Err(LoggingError::Init(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let cfg = LogConfig::default();
        init_tracing(&cfg).expect("first init");
        init_tracing(&cfg).expect("second init is a no-op");
    }

    #[test]
    fn unwritable_log_dir_is_reported() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let cfg = LogConfig {
            enable_file_logs: true,
            log_dir: file.path().join("logs").to_string_lossy().into_owned(),
            ..LogConfig::default()
        };
        assert!(matches!(init_tracing(&cfg), Err(LoggingError::Appender(_))));
    }

    #[test]
    fn file_logging_accepts_existing_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = LogConfig {
            enable_file_logs: true,
            log_dir: dir.path().to_string_lossy().into_owned(),
            ..LogConfig::default()
        };
        init_tracing(&cfg).expect("file logging init");
        tracing::info!(target: "learning_engine", "file logging initialized");
    }
}
