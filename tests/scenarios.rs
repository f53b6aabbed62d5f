mod common;

use chrono::Duration;

use common::fixtures::{attempt, candidate, fixed_now, fresh_profile, seed_knowledge};
use learning_engine::adaptive::types::{Priority, RecommendationKind, Severity};
use learning_engine::adaptive::{
    analyze_error_patterns, calculate_optimal_difficulty, generate_recommendations_at,
    update_profile_at, AdaptiveConfig, AdaptiveEngine, EngineError,
};

#[test]
fn unseen_concept_difficulty_is_below_preference() {
    let profile = fresh_profile();
    let difficulty = calculate_optimal_difficulty(&profile, "fractions", &AdaptiveConfig::default());
    assert!((difficulty - 0.3).abs() < 1e-9);
}

#[test]
fn mastered_concept_is_not_reviewed_even_when_overdue() {
    let mut profile = fresh_profile();
    seed_knowledge(&mut profile, "fractions", 0.9, 0.9, 3, 10);
    let pool = [candidate("f-1", "fractions", 0.85)];

    let recs =
        generate_recommendations_at(&profile, &pool, &AdaptiveConfig::default(), fixed_now())
            .expect("valid pool");
    assert!(recs
        .iter()
        .all(|r| !matches!(r.kind, RecommendationKind::ConceptReview { .. })));
}

#[test]
fn weak_overdue_concept_gets_high_priority_review() {
    let mut profile = fresh_profile();
    seed_knowledge(&mut profile, "fractions", 0.4, 0.3, 1, 3);
    let pool = [candidate("f-1", "fractions", 0.45)];

    let recs =
        generate_recommendations_at(&profile, &pool, &AdaptiveConfig::default(), fixed_now())
            .expect("valid pool");
    let review = recs
        .iter()
        .find(|r| matches!(r.kind, RecommendationKind::ConceptReview { .. }))
        .expect("review emitted");
    assert_eq!(review.priority, Priority::High);
    assert_eq!(review.concept(), Some("fractions"));
    match &review.kind {
        RecommendationKind::ConceptReview {
            days_since_review,
            optimal_interval_days,
            ..
        } => {
            assert_eq!(*days_since_review, 3);
            assert_eq!(*optimal_interval_days, 2.0);
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn repeated_procedural_errors_form_one_high_severity_pattern() {
    let attempts: Vec<_> = (0..5)
        .map(|_| attempt("fractions", 0.4, &["procedural_error"]))
        .collect();
    let patterns = analyze_error_patterns(&attempts);

    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].pattern, "procedural_error");
    assert_eq!(patterns[0].concept, "fractions");
    assert_eq!(patterns[0].frequency, 5);
    assert_eq!(patterns[0].severity, Severity::High);
    assert_eq!(patterns[0].remediation.len(), 3);
}

#[test]
fn long_study_time_yields_single_break_suggestion() {
    let mut profile = fresh_profile();
    profile.performance.total_study_time = 130;
    profile.preferences.session_length = 60;

    let recs = generate_recommendations_at(&profile, &[], &AdaptiveConfig::default(), fixed_now())
        .expect("empty pool is fine");
    let breaks: Vec<_> = recs
        .iter()
        .filter(|r| matches!(r.kind, RecommendationKind::BreakSuggestion { .. }))
        .collect();
    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].priority, Priority::Medium);
    assert!(breaks[0].target.is_none());
    assert!((breaks[0].confidence.get() - 0.9).abs() < 1e-9);
}

#[test]
fn study_time_equal_to_session_length_needs_no_break() {
    let mut profile = fresh_profile();
    profile.performance.total_study_time = 60;
    profile.preferences.session_length = 60;

    let recs = generate_recommendations_at(&profile, &[], &AdaptiveConfig::default(), fixed_now())
        .expect("empty pool is fine");
    assert!(recs
        .iter()
        .all(|r| !matches!(r.kind, RecommendationKind::BreakSuggestion { .. })));

    profile.performance.total_study_time = 61;
    let recs = generate_recommendations_at(&profile, &[], &AdaptiveConfig::default(), fixed_now())
        .expect("empty pool is fine");
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].kind.as_str(), "break_suggestion");
}

#[test]
fn streak_tracks_calendar_days() {
    let mut profile = fresh_profile();
    profile.performance.streak_days = 4;
    profile.updated_at = fixed_now() - Duration::days(3);

    let same_day = update_profile_at(
        &profile,
        &attempt("fractions", 0.5, &[]),
        profile.updated_at + Duration::hours(1),
    )
    .expect("valid attempt");
    assert_eq!(same_day.performance.streak_days, 4);

    let next_day = update_profile_at(
        &profile,
        &attempt("fractions", 0.5, &[]),
        profile.updated_at + Duration::days(1),
    )
    .expect("valid attempt");
    assert_eq!(next_day.performance.streak_days, 5);

    let after_gap = update_profile_at(&profile, &attempt("fractions", 0.5, &[]), fixed_now())
        .expect("valid attempt");
    assert_eq!(after_gap.performance.streak_days, 1);
}

#[test]
fn full_flow_through_engine() {
    let engine = AdaptiveEngine::default();
    let mut profile = fresh_profile();
    profile.updated_at = fixed_now() - Duration::days(5);

    // two weak fraction attempts with the same mistake type
    for _ in 0..2 {
        profile = engine
            .update_profile_at(
                &profile,
                &attempt("fractions", 0.3, &["conceptual_misunderstanding"]),
                fixed_now() - Duration::days(5),
            )
            .expect("valid attempt");
    }
    let fractions = profile.knowledge("fractions").expect("fractions tracked");
    assert_eq!(fractions.review_count, 2);
    assert_eq!(fractions.error_patterns.len(), 1);
    assert!(fractions.mastery.get() < 0.6);

    let pool = [
        candidate("f-easy", "fractions", 0.05),
        candidate("f-review", "fractions", 0.3),
        candidate("d-intro", "decimals", 0.4),
    ];
    let recs = engine
        .generate_recommendations_at(&profile, &pool, fixed_now())
        .expect("valid pool");

    let kinds: Vec<&str> = recs.iter().map(|r| r.kind.as_str()).collect();
    assert!(kinds.contains(&"concept_review"));
    assert!(kinds.contains(&"next_activity"));
    assert!(kinds.contains(&"difficulty_adjustment"));
    for pair in recs.windows(2) {
        assert!(pair[0].rank_score() >= pair[1].rank_score());
    }

    let zpd = engine.assess_zpd(&profile, "decimals", &["fractions".to_string()]);
    assert_eq!(zpd.current_level.get(), 0.0);
    assert_eq!(zpd.scaffolding_needed.len(), 1);
    assert!(zpd.readiness_indicators.is_empty());

    let difficulty = engine.optimal_difficulty(&profile, "fractions");
    assert!((0.1..=0.9).contains(&difficulty));
}

#[test]
fn malformed_candidate_is_reported_by_engine() {
    let engine = AdaptiveEngine::default();
    let profile = fresh_profile();
    let result = engine.generate_recommendations_at(
        &profile,
        &[candidate("", "fractions", 0.4)],
        fixed_now(),
    );
    assert!(matches!(result, Err(EngineError::InvalidCandidate { .. })));
}
