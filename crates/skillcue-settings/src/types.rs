//! Configuration type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` to match the JSON files
//! the hook has always read. Types marked with `#[serde(default)]` accept
//! partial JSON; missing fields get their default value.
//!
//! These are raw shapes: patterns are strings and priorities are free text.
//! The engine validates and compiles them when it builds its rule store.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default minimum relevance score for activation.
pub const DEFAULT_MIN_RELEVANCE_SCORE: f64 = 0.3;

/// Default directory (relative to the project) holding skill documentation.
pub const DEFAULT_SKILLS_PATH: &str = "skills";

/// Root of `skill-rules.json`.
///
/// ```json
/// {
///   "globalSettings": { "enableDependencyResolution": true },
///   "rules": {
///     "al-development-core": {
///       "priority": "high",
///       "promptTriggers": { "keywords": ["table", "page"] },
///       "lifecycle": { "idleTimeout": 1800000, "minRelevanceScore": 0.3 },
///       "dependencies": ["al-symbols-navigator"]
///     }
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillRulesConfig {
    /// Global engine toggles.
    pub global_settings: GlobalSettings,
    /// Skill definitions keyed by identifier, in file order.
    pub rules: IndexMap<String, SkillRuleConfig>,
    /// Top-level dependency map (skill → prerequisites).
    ///
    /// Merged with each rule's own `dependencies` list.
    pub dependencies: IndexMap<String, Vec<String>>,
}

/// Global toggles in `skill-rules.json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    /// Whether activating a skill also activates its prerequisites.
    pub enable_dependency_resolution: bool,
    /// Directory holding `<skill>/SKILL.md`, used only for directive text.
    pub skills_path: String,
    /// Input classification patterns.
    pub classification: ClassificationSettings,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            enable_dependency_resolution: true,
            skills_path: DEFAULT_SKILLS_PATH.to_string(),
            classification: ClassificationSettings::default(),
        }
    }
}

/// Pattern sets that decide whether an input concerns the skill domain.
///
/// The two sets are independent: the domain set is checked first, the
/// general set only labels off-topic input.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassificationSettings {
    /// Conversation tag recorded for domain-relevant input.
    pub domain_tag: String,
    /// Case-insensitive regexes marking domain-relevant input.
    pub domain_patterns: Vec<String>,
    /// Conversation tag recorded for generic input.
    pub general_tag: String,
    /// Case-insensitive regexes marking generic/off-topic input.
    pub general_patterns: Vec<String>,
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            domain_tag: "bc-development".to_string(),
            domain_patterns: [
                r"\b(table|page|codeunit|enum|report|query)\b",
                r"\bal\b.*\b(code|development|extension)\b",
                r"business central",
                r"\bbc\b.*\b(app|extension|project)\b",
                r"dynamics\s*365",
                r"\.al\b",
                r"tableextension|pageextension|enumextension",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            general_tag: "general".to_string(),
            general_patterns: [
                r"^(what|who|when|where|why|how)\s+(is|are|was|were|does|do|did)",
                r"weather",
                r"news",
                r"time.*in",
                r"general.*question",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// One skill's entry under `rules`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillRuleConfig {
    /// Short human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `critical`, `high`, `medium` or `low`. Missing means `medium`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Relevance triggers. A rule without triggers never scores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_triggers: Option<PromptTriggers>,
    /// Activation/deactivation policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<LifecycleSettings>,
    /// Prerequisite skills.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// One-line reminder included in the activation directive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
}

/// Trigger sets scored against each input.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptTriggers {
    /// Case-insensitive substrings, +0.2 each.
    pub keywords: Vec<String>,
    /// Case-insensitive regexes, +0.5 each.
    pub intent_patterns: Vec<String>,
    /// Case-insensitive substrings, +0.3 each.
    pub context_indicators: Vec<String>,
}

/// Per-skill lifecycle policy as written in configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifecycleSettings {
    /// Idle timeout in milliseconds. Absent, non-positive or non-finite
    /// disables suspension. Fractional values are accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_timeout: Option<f64>,
    /// Activation threshold. Absent or non-positive means 0.3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_relevance_score: Option<f64>,
    /// Whether a completed skill may be reactivated. Absent means `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_reactivate: Option<bool>,
}

/// Root of `lifecycle-rules.json`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifecycleRulesConfig {
    /// Skill identifier → regexes signalling the skill's work is done.
    pub completion_signals: IndexMap<String, Vec<String>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
