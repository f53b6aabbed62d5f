use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::adaptive::types::{ActivityAttempt, ErrorPattern, Severity};

const CONCEPTUAL_MISUNDERSTANDING: &[&str] = &[
    "Revisit the core concept with visual explanations",
    "Work through guided examples step by step",
    "Connect the concept to familiar real-world situations",
];

const PROCEDURAL_ERROR: &[&str] = &[
    "Practice the procedure with a step-by-step checklist",
    "Break problems into smaller sub-steps",
    "Study worked examples before attempting new problems",
];

const ATTENTION_ERROR: &[&str] = &[
    "Slow down and double-check each answer",
    "Use shorter, focused practice sessions",
    "Highlight key information in each question",
];

const MEMORY_ERROR: &[&str] = &[
    "Schedule spaced review sessions",
    "Use flashcards and retrieval practice",
    "Create mnemonics for key facts",
];

const GENERIC_REMEDIATION: &[&str] = &[
    "Review the related material",
    "Practice similar problems",
    "Ask a teacher or tutor for help",
];

pub fn remediation_for(error_type: &str) -> Vec<String> {
    let strategies = match error_type {
        "conceptual_misunderstanding" => CONCEPTUAL_MISUNDERSTANDING,
        "procedural_error" => PROCEDURAL_ERROR,
        "attention_error" => ATTENTION_ERROR,
        "memory_error" => MEMORY_ERROR,
        _ => GENERIC_REMEDIATION,
    };
    strategies.iter().map(|s| s.to_string()).collect()
}

struct Group {
    frequency: u32,
    last_seen: DateTime<Utc>,
}

/// Clusters the mistakes of `attempts` by `(error type, concept)`. Most
/// severe and most frequent patterns come first.
pub fn analyze_error_patterns(attempts: &[ActivityAttempt]) -> Vec<ErrorPattern> {
    let mut groups: BTreeMap<(String, String), Group> = BTreeMap::new();

    for attempt in attempts {
        // attempts are not validated here, so end may precede start
        let seen_at = attempt.end_time.max(attempt.start_time);
        for error_type in attempt.error_types() {
            groups
                .entry((error_type.to_string(), attempt.concept.clone()))
                .and_modify(|g| {
                    g.frequency += 1;
                    g.last_seen = g.last_seen.max(seen_at);
                })
                .or_insert(Group {
                    frequency: 1,
                    last_seen: seen_at,
                });
        }
    }

    let mut patterns: Vec<ErrorPattern> = groups
        .into_iter()
        .map(|((pattern, concept), group)| ErrorPattern {
            remediation: remediation_for(&pattern),
            severity: Severity::from_frequency(group.frequency),
            frequency: group.frequency,
            last_seen: group.last_seen,
            pattern,
            concept,
        })
        .collect();

    // stable: equal keys keep (pattern, concept) order from the map
    patterns.sort_by(|a, b| match b.severity.cmp(&a.severity) {
        Ordering::Equal => b.frequency.cmp(&a.frequency),
        other => other,
    });

    tracing::debug!(
        attempts = attempts.len(),
        patterns = patterns.len(),
        "Error patterns analyzed"
    );

    patterns
}
