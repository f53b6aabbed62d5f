//! Zone of proximal development: how far a student can be pushed on a
//! concept and which prerequisites still need scaffolding.

use crate::adaptive::config::AdaptiveConfig;
use crate::adaptive::types::{LearningProfile, UnitInterval, ZpdAssessment};

const ZPD_STEP: f64 = 0.2;

pub fn assess_zpd(
    profile: &LearningProfile,
    concept: &str,
    prerequisites: &[String],
    config: &AdaptiveConfig,
) -> ZpdAssessment {
    let current_level = profile.mastery_of(concept);
    let target_level = (current_level + ZPD_STEP).min(1.0);

    let mut scaffolding_needed = Vec::new();
    let mut readiness_indicators = Vec::new();

    for prerequisite in prerequisites {
        // unknown prerequisites count as unmastered
        let mastery = profile.mastery_of(prerequisite);
        if mastery >= config.mastery_threshold {
            readiness_indicators.push(format!("Strong foundation in {prerequisite}"));
        } else {
            scaffolding_needed.push(format!(
                "Review {prerequisite} (current mastery: {:.0}%)",
                mastery * 100.0
            ));
        }
    }

    let next_concepts = if current_level >= config.mastery_threshold {
        forward_concepts(concept)
    } else {
        Vec::new()
    };

    tracing::debug!(
        student_id = %profile.student_id,
        concept,
        current_level,
        scaffolding = scaffolding_needed.len(),
        ready = readiness_indicators.len(),
        "ZPD assessed"
    );

    ZpdAssessment {
        concept: concept.to_string(),
        current_level: UnitInterval::saturating(current_level),
        target_level: UnitInterval::saturating(target_level),
        scaffolding_needed,
        readiness_indicators,
        next_concepts,
    }
}

/// Generic progression steps; the curriculum graph lives with the caller.
fn forward_concepts(concept: &str) -> Vec<String> {
    vec![
        format!("{concept}_advanced"),
        format!("{concept}_applications"),
    ]
}
