//! Regex compilation as data.
//!
//! Trigger and completion-signal patterns come from user-edited JSON. A
//! pattern that fails to compile is kept as [`Pattern::Invalid`] and simply
//! never matches, so one bad entry cannot disable a whole skill.

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// A configured pattern, compiled case-insensitively.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Compiled matcher.
    Valid(Regex),
    /// Source text that failed to compile.
    Invalid {
        /// Pattern as written in configuration.
        source: String,
        /// Compiler error message.
        error: String,
    },
}

impl Pattern {
    /// Compile `source` case-insensitively.
    pub fn compile(source: &str) -> Self {
        match RegexBuilder::new(source).case_insensitive(true).build() {
            Ok(regex) => Self::Valid(regex),
            Err(e) => Self::Invalid {
                source: source.to_string(),
                error: e.to_string(),
            },
        }
    }

    /// Compile every entry, logging the ones that are invalid.
    ///
    /// `owner` names the skill (or pattern set) for the log line.
    pub fn compile_all(sources: &[String], owner: &str) -> Vec<Self> {
        sources
            .iter()
            .map(|source| {
                let pattern = Self::compile(source);
                if let Self::Invalid { error, .. } = &pattern {
                    warn!(owner, pattern = %source, %error, "invalid pattern, treating as non-matching");
                }
                pattern
            })
            .collect()
    }

    /// Whether the pattern matches `text`. Invalid patterns never match.
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Valid(regex) => regex.is_match(text),
            Self::Invalid { .. } => false,
        }
    }

    /// Whether the pattern compiled.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The pattern as written in configuration.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Valid(regex) => regex.as_str(),
            Self::Invalid { source, .. } => source,
        }
    }
}

/// Whether any pattern in `patterns` matches `text`.
pub fn any_match(patterns: &[Pattern], text: &str) -> bool {
    patterns.iter().any(|p| p.is_match(text))
}
