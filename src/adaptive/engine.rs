use chrono::{DateTime, Utc};

use crate::adaptive::config::AdaptiveConfig;
use crate::adaptive::error::{EngineError, EngineResult};
use crate::adaptive::types::*;
use crate::adaptive::{difficulty, monitoring, patterns, profile, recommend, zpd};

/// Entry point bundling the analytic functions with one validated config.
///
/// The engine holds no per-student state: every call maps its inputs to a
/// fresh output, so a single instance can be shared across threads. Callers
/// serialize read-modify-write of one student's profile themselves.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveEngine {
    config: AdaptiveConfig,
}

impl AdaptiveEngine {
    pub fn new(config: AdaptiveConfig) -> EngineResult<Self> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    /// A copy of this engine running with `config`.
    pub fn with_config(&self, config: AdaptiveConfig) -> EngineResult<Self> {
        let engine = Self::new(config)?;
        tracing::info!("Adaptive engine config replaced");
        Ok(engine)
    }

    pub fn update_profile(
        &self,
        profile: &LearningProfile,
        attempt: &ActivityAttempt,
    ) -> EngineResult<LearningProfile> {
        self.update_profile_at(profile, attempt, Utc::now())
    }

    pub fn update_profile_at(
        &self,
        current: &LearningProfile,
        attempt: &ActivityAttempt,
        now: DateTime<Utc>,
    ) -> EngineResult<LearningProfile> {
        let updated = profile::update_profile_at(current, attempt, now).inspect_err(|e| {
            tracing::warn!(student_id = %current.student_id, error = %e, "Attempt rejected");
        })?;

        let violations = monitoring::check_profile_invariants(&updated);
        if !violations.is_empty() {
            tracing::warn!(
                student_id = %updated.student_id,
                violations = ?violations,
                "Profile invariant violation"
            );
        }

        Ok(updated)
    }

    pub fn generate_recommendations(
        &self,
        profile: &LearningProfile,
        candidates: &[CandidateActivity],
    ) -> EngineResult<Vec<AdaptiveRecommendation>> {
        self.generate_recommendations_at(profile, candidates, Utc::now())
    }

    pub fn generate_recommendations_at(
        &self,
        profile: &LearningProfile,
        candidates: &[CandidateActivity],
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<AdaptiveRecommendation>> {
        let recommendations =
            recommend::generate_recommendations_at(profile, candidates, &self.config, now)
                .inspect_err(|e| {
                    tracing::warn!(student_id = %profile.student_id, error = %e, "Recommendation pool rejected");
                })?;

        let violations = monitoring::check_recommendations(&recommendations);
        if !violations.is_empty() {
            tracing::warn!(
                student_id = %profile.student_id,
                violations = ?violations,
                "Recommendation invariant violation"
            );
        }

        Ok(recommendations)
    }

    pub fn optimal_difficulty(&self, profile: &LearningProfile, concept: &str) -> f64 {
        difficulty::calculate_optimal_difficulty(profile, concept, &self.config)
    }

    pub fn assess_zpd(
        &self,
        profile: &LearningProfile,
        concept: &str,
        prerequisites: &[String],
    ) -> ZpdAssessment {
        zpd::assess_zpd(profile, concept, prerequisites, &self.config)
    }

    pub fn analyze_error_patterns(&self, attempts: &[ActivityAttempt]) -> Vec<ErrorPattern> {
        patterns::analyze_error_patterns(attempts)
    }
}
