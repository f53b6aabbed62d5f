use chrono::{DateTime, Utc};

use crate::adaptive::error::{EngineError, EngineResult};
use crate::adaptive::types::*;
use crate::constants::SECONDS_PER_MINUTE;

const SCORE_WEIGHT: f64 = 0.3;
const CONFIDENCE_GAIN_COMPLETED: f64 = 0.1;
const CONFIDENCE_LOSS_ABANDONED: f64 = 0.05;

/// Folds `attempt` into `profile`, stamped with the current time.
pub fn update_profile(
    profile: &LearningProfile,
    attempt: &ActivityAttempt,
) -> EngineResult<LearningProfile> {
    update_profile_at(profile, attempt, Utc::now())
}

/// Folds `attempt` into `profile` as of `now` and returns the new profile.
/// The input profile is left untouched.
pub fn update_profile_at(
    profile: &LearningProfile,
    attempt: &ActivityAttempt,
    now: DateTime<Utc>,
) -> EngineResult<LearningProfile> {
    attempt.validate()?;
    if attempt.student_id != profile.student_id {
        return Err(EngineError::attempt(
            &attempt.id,
            format!(
                "attempt belongs to student {} but profile is {}",
                attempt.student_id, profile.student_id
            ),
        ));
    }

    let previous = profile
        .knowledge(&attempt.concept)
        .cloned()
        .unwrap_or_else(|| KnowledgeState::new(&attempt.concept, now));
    let knowledge = update_knowledge(previous, attempt, now);

    let mut knowledge_map = profile.knowledge_map.clone();
    knowledge_map.insert(attempt.concept.clone(), knowledge);

    let performance = update_performance(&profile.performance, attempt, profile.updated_at, now);

    tracing::debug!(
        student_id = %profile.student_id,
        concept = %attempt.concept,
        score = attempt.score.get(),
        completed = performance.completed_activities,
        streak = performance.streak_days,
        "Profile updated"
    );

    Ok(LearningProfile {
        knowledge_map,
        performance,
        updated_at: now,
        ..profile.clone()
    })
}

fn update_knowledge(
    mut state: KnowledgeState,
    attempt: &ActivityAttempt,
    now: DateTime<Utc>,
) -> KnowledgeState {
    let mastery = SCORE_WEIGHT * attempt.score.get() + (1.0 - SCORE_WEIGHT) * state.mastery.get();
    state.mastery = UnitInterval::saturating(mastery);

    let delta = if attempt.completed {
        CONFIDENCE_GAIN_COMPLETED
    } else {
        -CONFIDENCE_LOSS_ABANDONED
    };
    state.confidence = UnitInterval::saturating(state.confidence.get() + delta);

    state
        .error_patterns
        .extend(attempt.error_types().map(str::to_string));
    state.review_count = state.review_count.saturating_add(1);
    state.last_reviewed = now;
    state
}

fn update_performance(
    previous: &PerformanceSummary,
    attempt: &ActivityAttempt,
    last_updated: DateTime<Utc>,
    now: DateTime<Utc>,
) -> PerformanceSummary {
    let count = previous.completed_activities as f64;
    let average = (previous.average_score.get() * count + attempt.score.get()) / (count + 1.0);

    PerformanceSummary {
        average_score: UnitInterval::saturating(average),
        streak_days: next_streak(previous.streak_days, last_updated, now),
        total_study_time: previous
            .total_study_time
            .saturating_add(u64::from(attempt.time_spent / SECONDS_PER_MINUTE)),
        completed_activities: previous.completed_activities.saturating_add(1),
    }
}

/// Streak by calendar day: same day keeps it, the next day extends it, any
/// longer gap restarts it at one.
pub fn next_streak(streak_days: u32, last_updated: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let gap = (now.date_naive() - last_updated.date_naive()).num_days();
    match gap {
        1 => streak_days.saturating_add(1),
        g if g > 1 => 1,
        // same day, or a clock that moved backwards
        _ => streak_days,
    }
}
