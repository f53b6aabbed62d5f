/// Seconds per minute, for converting attempt time into study minutes
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Lower bound of any recommended difficulty
pub const MIN_DIFFICULTY: f64 = 0.1;

/// Upper bound of any recommended difficulty
pub const MAX_DIFFICULTY: f64 = 0.9;

/// Preferred difficulty of a freshly created profile
pub const DEFAULT_PREFERRED_DIFFICULTY: f64 = 0.5;

/// Session length (minutes) of a freshly created profile
pub const DEFAULT_SESSION_LENGTH_MINUTES: u32 = 30;

/// Feedback style of a freshly created profile
pub const DEFAULT_FEEDBACK_STYLE: &str = "encouraging";

/// Bounds of a recommendation's estimated time (minutes)
pub const MIN_ESTIMATED_MINUTES: u32 = 1;
pub const MAX_ESTIMATED_MINUTES: u32 = 60;

/// Tolerance for float comparisons against fixed thresholds
pub const FLOAT_TOLERANCE: f64 = 1e-9;
