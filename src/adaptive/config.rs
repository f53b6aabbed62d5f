use serde::{Deserialize, Serialize};

use crate::adaptive::error::{EngineError, EngineResult};

fn default_difficulty_adjustment_factor() -> f64 {
    0.1
}

fn default_mastery_threshold() -> f64 {
    0.8
}

fn default_review_spacing_base() -> f64 {
    2.0
}

fn default_max_difficulty_jump() -> f64 {
    0.3
}

fn default_min_session_gap() -> u32 {
    30
}

fn default_error_weight_factor() -> f64 {
    1.5
}

/// Tunables of the adaptive engine. Missing fields deserialize to their
/// defaults, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveConfig {
    /// Shift applied to the seen-concept difficulty when the global average
    /// score leaves the `[0.6, 0.85]` band. Bounds: `[0, 0.5]`.
    #[serde(default = "default_difficulty_adjustment_factor")]
    pub difficulty_adjustment_factor: f64,
    /// Mastery at which a concept counts as learned. Bounds: `(0, 1]`.
    #[serde(default = "default_mastery_threshold")]
    pub mastery_threshold: f64,
    /// Review interval in days is `review_spacing_base ^ review_count`. Bounds: `(1, 10]`.
    #[serde(default = "default_review_spacing_base")]
    pub review_spacing_base: f64,
    /// Largest difficulty change between consecutive activities, for callers
    /// that pace their own activity sequence. Bounds: `(0, 1]`.
    #[serde(default = "default_max_difficulty_jump")]
    pub max_difficulty_jump: f64,
    /// Minutes of inactivity separating two sessions. Not read by the break
    /// check, which compares lifetime study time. Bounds: `[0, 1440]`.
    #[serde(default = "default_min_session_gap")]
    pub min_session_gap: u32,
    /// Weight of recorded errors for callers scoring remediation. Bounds: `[0, 10]`.
    #[serde(default = "default_error_weight_factor")]
    pub error_weight_factor: f64,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            difficulty_adjustment_factor: default_difficulty_adjustment_factor(),
            mastery_threshold: default_mastery_threshold(),
            review_spacing_base: default_review_spacing_base(),
            max_difficulty_jump: default_max_difficulty_jump(),
            min_session_gap: default_min_session_gap(),
            error_weight_factor: default_error_weight_factor(),
        }
    }
}

/// Partial overrides for [`AdaptiveConfig`]; `None` keeps the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveConfigOverrides {
    pub difficulty_adjustment_factor: Option<f64>,
    pub mastery_threshold: Option<f64>,
    pub review_spacing_base: Option<f64>,
    pub max_difficulty_jump: Option<f64>,
    pub min_session_gap: Option<u32>,
    pub error_weight_factor: Option<f64>,
}

impl AdaptiveConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AdaptiveConfig {
    /// Defaults with `overrides` applied, validated.
    pub fn with_overrides(overrides: &AdaptiveConfigOverrides) -> EngineResult<Self> {
        Self::default().merge(overrides)
    }

    pub fn merge(mut self, overrides: &AdaptiveConfigOverrides) -> EngineResult<Self> {
        if let Some(v) = overrides.difficulty_adjustment_factor {
            self.difficulty_adjustment_factor = v;
        }
        if let Some(v) = overrides.mastery_threshold {
            self.mastery_threshold = v;
        }
        if let Some(v) = overrides.review_spacing_base {
            self.review_spacing_base = v;
        }
        if let Some(v) = overrides.max_difficulty_jump {
            self.max_difficulty_jump = v;
        }
        if let Some(v) = overrides.min_session_gap {
            self.min_session_gap = v;
        }
        if let Some(v) = overrides.error_weight_factor {
            self.error_weight_factor = v;
        }
        self.validate().map_err(EngineError::InvalidConfig)?;
        Ok(self)
    }

    pub fn from_env(env_config: &crate::config::EngineEnvConfig) -> EngineResult<Self> {
        Self::with_overrides(&env_config.adaptive)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=0.5).contains(&self.difficulty_adjustment_factor) {
            return Err("difficulty_adjustment_factor must be in [0,0.5]".to_string());
        }
        if !(self.mastery_threshold > 0.0 && self.mastery_threshold <= 1.0) {
            return Err("mastery_threshold must be in (0,1]".to_string());
        }
        if !(self.review_spacing_base > 1.0 && self.review_spacing_base <= 10.0) {
            return Err("review_spacing_base must be in (1,10]".to_string());
        }
        if !(self.max_difficulty_jump > 0.0 && self.max_difficulty_jump <= 1.0) {
            return Err("max_difficulty_jump must be in (0,1]".to_string());
        }
        if self.min_session_gap > 1440 {
            return Err("min_session_gap must be in [0,1440] minutes".to_string());
        }
        if !(0.0..=10.0).contains(&self.error_weight_factor) {
            return Err("error_weight_factor must be in [0,10]".to_string());
        }
        Ok(())
    }

    /// Days until a concept reviewed `review_count` times is due again.
    pub fn review_interval_days(&self, review_count: u32) -> f64 {
        self.review_spacing_base.powf(f64::from(review_count))
    }
}
