use chrono::{DateTime, Duration, TimeZone, Utc};

use learning_engine::adaptive::types::{
    ActivityAttempt, CandidateActivity, KnowledgeState, LearningProfile, Mistake, UnitInterval,
};

pub const STUDENT_ID: &str = "student-1";

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 15, 30, 0).unwrap()
}

pub fn fresh_profile() -> LearningProfile {
    LearningProfile::new(STUDENT_ID, "visual", fixed_now() - Duration::days(30))
}

pub fn seed_knowledge(
    profile: &mut LearningProfile,
    concept: &str,
    mastery: f64,
    confidence: f64,
    review_count: u32,
    days_since_review: i64,
) {
    profile.knowledge_map.insert(
        concept.to_string(),
        KnowledgeState {
            concept: concept.to_string(),
            mastery: UnitInterval::new(mastery).expect("mastery in range"),
            confidence: UnitInterval::new(confidence).expect("confidence in range"),
            last_reviewed: fixed_now() - Duration::days(days_since_review),
            review_count,
            error_patterns: Default::default(),
        },
    );
}

pub fn candidate(id: &str, concept: &str, difficulty: f64) -> CandidateActivity {
    CandidateActivity {
        id: id.to_string(),
        concept: concept.to_string(),
        difficulty,
        game_type: "quiz".to_string(),
    }
}

pub fn attempt(concept: &str, score: f64, error_types: &[&str]) -> ActivityAttempt {
    let end = fixed_now();
    ActivityAttempt {
        id: ActivityAttempt::generate_id(),
        student_id: STUDENT_ID.to_string(),
        activity_id: format!("{concept}-activity"),
        game_type: "quiz".to_string(),
        concept: concept.to_string(),
        difficulty: UnitInterval::new(0.5).expect("difficulty in range"),
        start_time: end - Duration::minutes(3),
        end_time: end,
        score: UnitInterval::new(score).expect("score in range"),
        time_spent: 180,
        hints_used: 0,
        mistakes: error_types
            .iter()
            .map(|error_type| Mistake {
                question: "3/4 - 1/4".to_string(),
                user_answer: "2/0".to_string(),
                correct_answer: "1/2".to_string(),
                error_type: error_type.to_string(),
            })
            .collect(),
        completed: true,
    }
}
