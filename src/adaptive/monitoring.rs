use serde::{Deserialize, Serialize};

use crate::adaptive::types::{AdaptiveRecommendation, LearningProfile};
use crate::constants::{MAX_ESTIMATED_MINUTES, MIN_ESTIMATED_MINUTES};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvariantViolation {
    pub field: String,
    pub value: f64,
    pub expected_range: String,
}

/// Cross-field invariants the value types cannot express on their own.
pub fn check_profile_invariants(profile: &LearningProfile) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let completed = profile.performance.completed_activities;

    let total_reviews: u64 = profile
        .knowledge_map
        .values()
        .map(|k| u64::from(k.review_count))
        .sum();
    if total_reviews > completed {
        violations.push(InvariantViolation {
            field: "knowledgeMap.*.reviewCount".to_string(),
            value: total_reviews as f64,
            expected_range: format!("<= completedActivities ({completed})"),
        });
    }

    if completed == 0 && profile.performance.average_score.get() > 0.0 {
        violations.push(InvariantViolation {
            field: "performance.averageScore".to_string(),
            value: profile.performance.average_score.get(),
            expected_range: "0 before any completed activity".to_string(),
        });
    }

    for (concept, knowledge) in &profile.knowledge_map {
        if knowledge.concept != *concept {
            violations.push(InvariantViolation {
                field: format!("knowledgeMap.{concept}.concept"),
                value: f64::NAN,
                expected_range: format!("== {concept}"),
            });
        }
        if knowledge.review_count == 0 && !knowledge.error_patterns.is_empty() {
            violations.push(InvariantViolation {
                field: format!("knowledgeMap.{concept}.errorPatterns"),
                value: knowledge.error_patterns.len() as f64,
                expected_range: "empty while reviewCount is 0".to_string(),
            });
        }
        if knowledge.last_reviewed > profile.updated_at {
            violations.push(InvariantViolation {
                field: format!("knowledgeMap.{concept}.lastReviewed"),
                value: (knowledge.last_reviewed - profile.updated_at).num_seconds() as f64,
                expected_range: "<= updatedAt".to_string(),
            });
        }
    }

    if profile.updated_at < profile.created_at {
        violations.push(InvariantViolation {
            field: "updatedAt".to_string(),
            value: (profile.updated_at - profile.created_at).num_seconds() as f64,
            expected_range: ">= createdAt".to_string(),
        });
    }

    violations
}

pub fn check_recommendations(recommendations: &[AdaptiveRecommendation]) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for (idx, rec) in recommendations.iter().enumerate() {
        check_range(
            &mut violations,
            &format!("recommendations[{idx}].estimatedTime"),
            f64::from(rec.estimated_time),
            f64::from(MIN_ESTIMATED_MINUTES),
            f64::from(MAX_ESTIMATED_MINUTES),
        );
    }

    for (idx, pair) in recommendations.windows(2).enumerate() {
        if pair[0].priority < pair[1].priority && pair[1].rank_score() > pair[0].rank_score() {
            violations.push(InvariantViolation {
                field: format!("recommendations[{}].rankScore", idx + 1),
                value: pair[1].rank_score(),
                expected_range: format!("<= {}", pair[0].rank_score()),
            });
        }
    }

    violations
}

fn check_range(
    violations: &mut Vec<InvariantViolation>,
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if value.is_nan() || value < min || value > max {
        violations.push(InvariantViolation {
            field: field.to_string(),
            value,
            expected_range: format!("[{min}, {max}]"),
        });
    }
}
