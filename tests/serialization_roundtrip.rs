mod common;

use common::fixtures::{attempt, candidate, fixed_now, fresh_profile, seed_knowledge};
use learning_engine::adaptive::types::{AdaptiveRecommendation, ActivityAttempt, LearningProfile};
use learning_engine::adaptive::{generate_recommendations_at, AdaptiveConfig};

#[test]
fn pt_serialization_roundtrip() {
    let mut profile = fresh_profile();
    seed_knowledge(&mut profile, "fractions", 0.4, 0.3, 1, 3);
    let encoded = serde_json::to_string(&profile).expect("serialize profile");
    let decoded: LearningProfile = serde_json::from_str(&encoded).expect("deserialize profile");
    assert_eq!(decoded, profile);

    let a = attempt("fractions", 0.75, &["attention_error"]);
    let encoded_attempt = serde_json::to_string(&a).expect("serialize attempt");
    let decoded_attempt: ActivityAttempt =
        serde_json::from_str(&encoded_attempt).expect("deserialize attempt");
    assert_eq!(decoded_attempt, a);

    let recs = generate_recommendations_at(
        &profile,
        &[candidate("f-1", "fractions", 0.5)],
        &AdaptiveConfig::default(),
        fixed_now(),
    )
    .expect("valid pool");
    let encoded_recs = serde_json::to_string(&recs).expect("serialize recommendations");
    let decoded_recs: Vec<AdaptiveRecommendation> =
        serde_json::from_str(&encoded_recs).expect("deserialize recommendations");
    assert_eq!(decoded_recs, recs);
}

#[test]
fn profile_json_uses_camel_case_and_rejects_out_of_range() {
    let profile = fresh_profile();
    let value = serde_json::to_value(&profile).expect("serialize profile");
    assert!(value.get("knowledgeMap").is_some());
    assert_eq!(value["performance"]["averageScore"], 0.0);

    let mut broken = value.clone();
    broken["preferences"]["difficulty"] = serde_json::json!(1.7);
    assert!(serde_json::from_value::<LearningProfile>(broken).is_err());
}
