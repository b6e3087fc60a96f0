//! Shared constants for relevance scoring and dependency tree rendering.

/// Score contributed by each matching keyword.
pub const KEYWORD_WEIGHT: f64 = 0.2;

/// Score contributed by each matching intent pattern.
pub const INTENT_PATTERN_WEIGHT: f64 = 0.5;

/// Score contributed by each matching context indicator.
pub const CONTEXT_INDICATOR_WEIGHT: f64 = 0.3;

/// Upper bound of every relevance score.
pub const MAX_RELEVANCE_SCORE: f64 = 1.0;

/// Marker appended to a node when the tree rendering meets a cycle.
pub const CIRCULAR_REFERENCE_MARKER: &str = "(circular reference)";
