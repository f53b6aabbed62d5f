use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adaptive::error::{EngineError, EngineResult};
use crate::constants::{
    DEFAULT_FEEDBACK_STYLE, DEFAULT_PREFERRED_DIFFICULTY, DEFAULT_SESSION_LENGTH_MINUTES,
    MAX_ESTIMATED_MINUTES, MIN_ESTIMATED_MINUTES,
};

/// A value constrained to `[0, 1]`. Construction from untrusted data goes
/// through [`UnitInterval::new`] (or serde), which rejects NaN and
/// out-of-range values instead of clamping them.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitInterval(f64);

impl UnitInterval {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    pub fn new(value: f64) -> EngineResult<Self> {
        Self::checked("value", value)
    }

    /// Like [`UnitInterval::new`] but names the offending field in the error.
    pub fn checked(field: &'static str, value: f64) -> EngineResult<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(EngineError::InvalidInput {
                field,
                value,
                expected: "[0, 1]",
            })
        }
    }

    /// For results of internal arithmetic that are bounded by construction.
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for UnitInterval {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitInterval> for f64 {
    fn from(value: UnitInterval) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeState {
    pub concept: String,
    pub mastery: UnitInterval,
    pub confidence: UnitInterval,
    pub last_reviewed: DateTime<Utc>,
    pub review_count: u32,
    /// Distinct error types seen on this concept.
    #[serde(default)]
    pub error_patterns: BTreeSet<String>,
}

impl KnowledgeState {
    pub fn new(concept: &str, now: DateTime<Utc>) -> Self {
        Self {
            concept: concept.to_string(),
            mastery: UnitInterval::ZERO,
            confidence: UnitInterval::ZERO,
            last_reviewed: now,
            review_count: 0,
            error_patterns: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub difficulty: UnitInterval,
    /// Minutes.
    pub session_length: u32,
    #[serde(default)]
    pub preferred_game_types: Vec<String>,
    pub feedback_style: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            difficulty: UnitInterval::saturating(DEFAULT_PREFERRED_DIFFICULTY),
            session_length: DEFAULT_SESSION_LENGTH_MINUTES,
            preferred_game_types: Vec::new(),
            feedback_style: DEFAULT_FEEDBACK_STYLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub average_score: UnitInterval,
    pub streak_days: u32,
    /// Minutes, accumulated over the profile's lifetime.
    pub total_study_time: u64,
    pub completed_activities: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProfile {
    pub student_id: String,
    pub learning_style: String,
    #[serde(default)]
    pub knowledge_map: BTreeMap<String, KnowledgeState>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub performance: PerformanceSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LearningProfile {
    pub fn new(student_id: &str, learning_style: &str, now: DateTime<Utc>) -> Self {
        Self {
            student_id: student_id.to_string(),
            learning_style: learning_style.to_string(),
            knowledge_map: BTreeMap::new(),
            preferences: Preferences::default(),
            performance: PerformanceSummary::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn knowledge(&self, concept: &str) -> Option<&KnowledgeState> {
        self.knowledge_map.get(concept)
    }

    /// Mastery of `concept`, or zero when nothing is recorded for it.
    pub fn mastery_of(&self, concept: &str) -> f64 {
        self.knowledge(concept)
            .map(|k| k.mastery.get())
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mistake {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub error_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityAttempt {
    pub id: String,
    pub student_id: String,
    pub activity_id: String,
    pub game_type: String,
    pub concept: String,
    pub difficulty: UnitInterval,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub score: UnitInterval,
    /// Seconds.
    pub time_spent: u32,
    pub hints_used: u32,
    #[serde(default)]
    pub mistakes: Vec<Mistake>,
    pub completed: bool,
}

impl ActivityAttempt {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::attempt(&self.id, "attempt id must not be empty"));
        }
        if self.concept.trim().is_empty() {
            return Err(EngineError::attempt(&self.id, "concept must not be empty"));
        }
        if self.end_time < self.start_time {
            return Err(EngineError::attempt(
                &self.id,
                format!(
                    "end_time {} precedes start_time {}",
                    self.end_time, self.start_time
                ),
            ));
        }
        Ok(())
    }

    /// Error types recorded on this attempt, blank tags skipped.
    pub fn error_types(&self) -> impl Iterator<Item = &str> {
        self.mistakes
            .iter()
            .map(|m| m.error_type.trim())
            .filter(|t| !t.is_empty())
    }
}

/// One entry of the externally supplied activity pool. Difficulty is kept
/// raw so that malformed catalog entries can be reported rather than masked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateActivity {
    pub id: String,
    pub concept: String,
    pub difficulty: f64,
    pub game_type: String,
}

impl CandidateActivity {
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::candidate(&self.id, "id must not be empty"));
        }
        if self.concept.trim().is_empty() {
            return Err(EngineError::candidate(&self.id, "concept must not be empty"));
        }
        if !self.difficulty.is_finite() || !(0.0..=1.0).contains(&self.difficulty) {
            return Err(EngineError::candidate(
                &self.id,
                format!("difficulty {} outside [0, 1]", self.difficulty),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn weight(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High => 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTarget {
    pub activity_id: String,
    pub game_type: String,
    pub concept: String,
    pub difficulty: f64,
}

/// Recommendation type together with the figures that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecommendationKind {
    #[serde(rename_all = "camelCase")]
    NextActivity { preferred_difficulty: f64 },
    #[serde(rename_all = "camelCase")]
    DifficultyAdjustment {
        current_mastery: f64,
        target_difficulty: f64,
        error_types: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    ConceptReview {
        mastery: f64,
        days_since_review: i64,
        optimal_interval_days: f64,
    },
    /// `lifetime_minutes` is the profile's cumulative study time; sessions
    /// are not tracked by the engine.
    #[serde(rename_all = "camelCase")]
    BreakSuggestion {
        lifetime_minutes: u64,
        session_length: u32,
    },
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NextActivity { .. } => "next_activity",
            Self::DifficultyAdjustment { .. } => "difficulty_adjustment",
            Self::ConceptReview { .. } => "concept_review",
            Self::BreakSuggestion { .. } => "break_suggestion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveRecommendation {
    #[serde(flatten)]
    pub kind: RecommendationKind,
    pub target: Option<ActivityTarget>,
    pub reasoning: String,
    pub confidence: UnitInterval,
    pub priority: Priority,
    /// Minutes, within `[1, 60]`.
    pub estimated_time: u32,
}

impl AdaptiveRecommendation {
    pub fn new(
        kind: RecommendationKind,
        target: Option<ActivityTarget>,
        reasoning: String,
        confidence: f64,
        priority: Priority,
        estimated_time: u32,
    ) -> Self {
        Self {
            kind,
            target,
            reasoning,
            confidence: UnitInterval::saturating(confidence),
            priority,
            estimated_time: estimated_time.clamp(MIN_ESTIMATED_MINUTES, MAX_ESTIMATED_MINUTES),
        }
    }

    pub fn concept(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.concept.as_str())
    }

    /// Ranking score: priority weight plus confidence.
    pub fn rank_score(&self) -> f64 {
        self.priority.weight() + self.confidence.get()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZpdAssessment {
    pub concept: String,
    pub current_level: UnitInterval,
    pub target_level: UnitInterval,
    pub scaffolding_needed: Vec<String>,
    pub readiness_indicators: Vec<String>,
    pub next_concepts: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn from_frequency(frequency: u32) -> Self {
        if frequency >= 5 {
            Self::High
        } else if frequency <= 2 {
            Self::Low
        } else {
            Self::Medium
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPattern {
    pub pattern: String,
    pub frequency: u32,
    pub concept: String,
    pub severity: Severity,
    pub remediation: Vec<String>,
    pub last_seen: DateTime<Utc>,
}
