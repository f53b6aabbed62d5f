use crate::adaptive::config::AdaptiveConfig;
use crate::adaptive::types::LearningProfile;
use crate::constants::{MAX_DIFFICULTY, MIN_DIFFICULTY};

const UNSEEN_CONCEPT_OFFSET: f64 = 0.2;
const MASTERY_WEIGHT: f64 = 0.7;
const CONFIDENCE_WEIGHT: f64 = 0.3;
const STRUGGLING_AVERAGE: f64 = 0.6;
const EXCELLING_AVERAGE: f64 = 0.85;
const PREFERENCE_BLEND: f64 = 0.5;

/// Next-best difficulty for `concept`, always within `[0.1, 0.9]`.
pub fn calculate_optimal_difficulty(
    profile: &LearningProfile,
    concept: &str,
    config: &AdaptiveConfig,
) -> f64 {
    let preferred = profile.preferences.difficulty.get();

    let Some(knowledge) = profile.knowledge(concept) else {
        return (preferred - UNSEEN_CONCEPT_OFFSET).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    };

    let mut base =
        MASTERY_WEIGHT * knowledge.mastery.get() + CONFIDENCE_WEIGHT * knowledge.confidence.get();

    // dead band between the two thresholds keeps difficulty from oscillating
    let average = profile.performance.average_score.get();
    if average < STRUGGLING_AVERAGE {
        base -= config.difficulty_adjustment_factor;
    } else if average > EXCELLING_AVERAGE {
        base += config.difficulty_adjustment_factor;
    }

    let blended = PREFERENCE_BLEND * base + (1.0 - PREFERENCE_BLEND) * preferred;
    blended.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}
