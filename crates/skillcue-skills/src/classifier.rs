//! Coarse input classification.
//!
//! Decides whether an input concerns the skill domain at all. The domain set
//! is checked first; the general set only labels off-topic input so the
//! conversation tag reflects it.

use skillcue_settings::ClassificationSettings;

use crate::pattern::{Pattern, any_match};

/// Result of classifying one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Matched a domain pattern.
    Domain,
    /// Matched a general pattern and no domain pattern.
    General,
    /// Matched neither set.
    Unclassified,
}

/// Two independent pattern sets and the tags they record.
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    domain_tag: String,
    domain_patterns: Vec<Pattern>,
    general_tag: String,
    general_patterns: Vec<Pattern>,
}

impl DomainClassifier {
    /// Compile the configured pattern sets.
    pub fn from_settings(settings: &ClassificationSettings) -> Self {
        Self {
            domain_tag: settings.domain_tag.clone(),
            domain_patterns: Pattern::compile_all(&settings.domain_patterns, &settings.domain_tag),
            general_tag: settings.general_tag.clone(),
            general_patterns: Pattern::compile_all(
                &settings.general_patterns,
                &settings.general_tag,
            ),
        }
    }

    /// Classify `input`.
    pub fn classify(&self, input: &str) -> Classification {
        if any_match(&self.domain_patterns, input) {
            Classification::Domain
        } else if any_match(&self.general_patterns, input) {
            Classification::General
        } else {
            Classification::Unclassified
        }
    }

    /// Conversation tag for `classification`, if it records one.
    pub fn tag(&self, classification: Classification) -> Option<&str> {
        match classification {
            Classification::Domain => Some(&self.domain_tag),
            Classification::General => Some(&self.general_tag),
            Classification::Unclassified => None,
        }
    }
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::from_settings(&ClassificationSettings::default())
    }
}
