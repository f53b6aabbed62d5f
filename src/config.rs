use std::env;
use std::str::FromStr;

use crate::adaptive::config::AdaptiveConfigOverrides;
use crate::logging::LogConfig;

/// Settings a host service reads from its environment before building an
/// [`crate::adaptive::AdaptiveEngine`].
#[derive(Debug, Clone)]
pub struct EngineEnvConfig {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub adaptive: AdaptiveConfigOverrides,
}

impl EngineEnvConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            adaptive: AdaptiveConfigOverrides {
                difficulty_adjustment_factor: env_opt_parse("ADAPTIVE_DIFFICULTY_ADJUSTMENT_FACTOR"),
                mastery_threshold: env_opt_parse("ADAPTIVE_MASTERY_THRESHOLD"),
                review_spacing_base: env_opt_parse("ADAPTIVE_REVIEW_SPACING_BASE"),
                max_difficulty_jump: env_opt_parse("ADAPTIVE_MAX_DIFFICULTY_JUMP"),
                min_session_gap: env_opt_parse("ADAPTIVE_MIN_SESSION_GAP"),
                error_weight_factor: env_opt_parse("ADAPTIVE_ERROR_WEIGHT_FACTOR"),
            },
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_level: self.log_level.clone(),
            enable_file_logs: self.enable_file_logs,
            log_dir: self.log_dir.clone(),
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// `None` when the variable is unset or does not parse.
pub fn env_opt_parse<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(
                key,
                value = %raw,
                "Failed to parse env var, using default"
            );
            None
        }
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
