use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input: {field}={value} (expected {expected})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("invalid attempt {attempt_id}: {reason}")]
    InvalidAttempt { attempt_id: String, reason: String },
    #[error("invalid candidate activity {activity_id}: {reason}")]
    InvalidCandidate { activity_id: String, reason: String },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub fn attempt(attempt_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAttempt {
            attempt_id: attempt_id.to_string(),
            reason: reason.into(),
        }
    }

    pub fn candidate(activity_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCandidate {
            activity_id: activity_id.to_string(),
            reason: reason.into(),
        }
    }
}
