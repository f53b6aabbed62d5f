pub mod config;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod monitoring;
pub mod patterns;
pub mod profile;
pub mod recommend;
pub mod types;
pub mod zpd;

pub use config::{AdaptiveConfig, AdaptiveConfigOverrides};
pub use difficulty::calculate_optimal_difficulty;
pub use engine::AdaptiveEngine;
pub use error::{EngineError, EngineResult};
pub use patterns::analyze_error_patterns;
pub use profile::{update_profile, update_profile_at};
pub use recommend::{generate_recommendations, generate_recommendations_at};
pub use zpd::assess_zpd;
