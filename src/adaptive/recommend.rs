//! Merges spaced review, new-concept discovery, remediation and break
//! suggestions into one ranked recommendation list.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::adaptive::config::AdaptiveConfig;
use crate::adaptive::error::EngineResult;
use crate::adaptive::types::*;
use crate::constants::{FLOAT_TOLERANCE, MIN_DIFFICULTY};

const REVIEW_DIFFICULTY_TOLERANCE: f64 = 0.3;
const REVIEW_HIGH_PRIORITY_BELOW: f64 = 0.5;
const REVIEW_CONFIDENCE_BOOST: f64 = 0.2;
const REVIEW_CONFIDENCE_CAP: f64 = 0.9;
const NEXT_CONCEPT_HEADROOM: f64 = 0.2;
const NEXT_CONCEPT_CONFIDENCE: f64 = 0.7;
const REMEDIATION_MASTERY_CEILING: f64 = 0.6;
const REMEDIATION_STEP_DOWN: f64 = 0.2;
const REMEDIATION_CONFIDENCE: f64 = 0.8;
const BREAK_CONFIDENCE: f64 = 0.9;

const REVIEW_MINUTES: u32 = 10;
const NEXT_ACTIVITY_MINUTES: u32 = 15;
const REMEDIATION_MINUTES: u32 = 10;
const BREAK_MINUTES: u32 = 5;

pub fn generate_recommendations(
    profile: &LearningProfile,
    candidates: &[CandidateActivity],
    config: &AdaptiveConfig,
) -> EngineResult<Vec<AdaptiveRecommendation>> {
    generate_recommendations_at(profile, candidates, config, Utc::now())
}

/// Ranked recommendations for `profile` as of `now`. Every candidate is
/// validated before anything is emitted.
pub fn generate_recommendations_at(
    profile: &LearningProfile,
    candidates: &[CandidateActivity],
    config: &AdaptiveConfig,
    now: DateTime<Utc>,
) -> EngineResult<Vec<AdaptiveRecommendation>> {
    for candidate in candidates {
        candidate.validate()?;
    }

    let mut recommendations = Vec::new();
    recommendations.extend(review_due(profile, candidates, config, now));
    recommendations.extend(next_concepts(profile, candidates));
    recommendations.extend(remediation(profile, candidates));
    recommendations.extend(break_suggestion(profile));

    let ranked = rank(recommendations);

    tracing::debug!(
        student_id = %profile.student_id,
        candidates = candidates.len(),
        recommendations = ranked.len(),
        "Recommendations generated"
    );

    Ok(ranked)
}

/// Sorts by priority weight plus confidence, descending. Ties keep emission
/// order through an explicit index key.
pub fn rank(recommendations: Vec<AdaptiveRecommendation>) -> Vec<AdaptiveRecommendation> {
    let mut indexed: Vec<(usize, AdaptiveRecommendation)> =
        recommendations.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| {
        b.rank_score()
            .partial_cmp(&a.rank_score())
            .unwrap_or(Ordering::Equal)
            .then(ia.cmp(ib))
    });
    indexed.into_iter().map(|(_, r)| r).collect()
}

fn target_of(activity: &CandidateActivity, difficulty: f64) -> ActivityTarget {
    ActivityTarget {
        activity_id: activity.id.clone(),
        game_type: activity.game_type.clone(),
        concept: activity.concept.clone(),
        difficulty,
    }
}

/// Whole calendar days between `last_reviewed` and `now`.
pub fn days_since(last_reviewed: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now.date_naive() - last_reviewed.date_naive()).num_days()
}

fn review_due(
    profile: &LearningProfile,
    candidates: &[CandidateActivity],
    config: &AdaptiveConfig,
    now: DateTime<Utc>,
) -> Vec<AdaptiveRecommendation> {
    let mut out = Vec::new();

    for (concept, knowledge) in &profile.knowledge_map {
        let mastery = knowledge.mastery.get();
        if mastery >= config.mastery_threshold {
            continue;
        }

        let interval = config.review_interval_days(knowledge.review_count);
        let elapsed = days_since(knowledge.last_reviewed, now);
        if (elapsed as f64) < interval {
            continue;
        }

        let Some(activity) = candidates.iter().find(|a| {
            a.concept == *concept
                && (a.difficulty - mastery).abs() <= REVIEW_DIFFICULTY_TOLERANCE + FLOAT_TOLERANCE
        }) else {
            tracing::debug!(concept = %concept, "Review due but no matching activity");
            continue;
        };

        let priority = if mastery < REVIEW_HIGH_PRIORITY_BELOW {
            Priority::High
        } else {
            Priority::Medium
        };
        let confidence =
            (knowledge.confidence.get() + REVIEW_CONFIDENCE_BOOST).min(REVIEW_CONFIDENCE_CAP);

        out.push(AdaptiveRecommendation::new(
            RecommendationKind::ConceptReview {
                mastery,
                days_since_review: elapsed,
                optimal_interval_days: interval,
            },
            Some(target_of(activity, activity.difficulty)),
            format!(
                "Time to review {concept}: last practiced {elapsed} days ago and mastery is {:.0}%",
                mastery * 100.0
            ),
            confidence,
            priority,
            REVIEW_MINUTES,
        ));
    }

    out
}

fn next_concepts(
    profile: &LearningProfile,
    candidates: &[CandidateActivity],
) -> Vec<AdaptiveRecommendation> {
    let preferred = profile.preferences.difficulty.get();
    let ceiling = preferred + NEXT_CONCEPT_HEADROOM + FLOAT_TOLERANCE;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();

    for candidate in candidates {
        let concept = candidate.concept.as_str();
        if profile.knowledge_map.contains_key(concept) || !seen.insert(concept) {
            continue;
        }

        let Some(activity) = candidates
            .iter()
            .find(|a| a.concept == concept && a.difficulty <= ceiling)
        else {
            continue;
        };

        out.push(AdaptiveRecommendation::new(
            RecommendationKind::NextActivity {
                preferred_difficulty: preferred,
            },
            Some(target_of(activity, activity.difficulty)),
            format!("Ready to start a new concept: {concept}"),
            NEXT_CONCEPT_CONFIDENCE,
            Priority::Medium,
            NEXT_ACTIVITY_MINUTES,
        ));
    }

    out
}

fn remediation(
    profile: &LearningProfile,
    candidates: &[CandidateActivity],
) -> Vec<AdaptiveRecommendation> {
    let mut out = Vec::new();

    for (concept, knowledge) in &profile.knowledge_map {
        let mastery = knowledge.mastery.get();
        if knowledge.error_patterns.is_empty() || mastery >= REMEDIATION_MASTERY_CEILING {
            continue;
        }

        let Some(activity) = candidates
            .iter()
            .find(|a| a.concept == *concept && a.difficulty < mastery)
        else {
            continue;
        };

        let target_difficulty = (mastery - REMEDIATION_STEP_DOWN).max(MIN_DIFFICULTY);
        let error_types: Vec<String> = knowledge.error_patterns.iter().cloned().collect();

        out.push(AdaptiveRecommendation::new(
            RecommendationKind::DifficultyAdjustment {
                current_mastery: mastery,
                target_difficulty,
                error_types: error_types.clone(),
            },
            Some(target_of(activity, target_difficulty)),
            format!(
                "Practice {concept} at an easier level to address: {}",
                error_types.join(", ")
            ),
            REMEDIATION_CONFIDENCE,
            Priority::High,
            REMEDIATION_MINUTES,
        ));
    }

    out
}

fn break_suggestion(profile: &LearningProfile) -> Option<AdaptiveRecommendation> {
    // compares lifetime study time with the per-session preference; the
    // engine has no notion of session boundaries
    let studied = profile.performance.total_study_time;
    let session_length = profile.preferences.session_length;
    if studied <= u64::from(session_length) {
        return None;
    }

    Some(AdaptiveRecommendation::new(
        RecommendationKind::BreakSuggestion {
            lifetime_minutes: studied,
            session_length,
        },
        None,
        format!("You've studied for {studied} minutes. A short break will help you retain more."),
        BREAK_CONFIDENCE,
        Priority::Medium,
        BREAK_MINUTES,
    ))
}
