//! Core types for the activation engine.
//!
//! Persisted types use `camelCase` serde renaming so existing
//! `conversation-state.json` files keep loading.

use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use skillcue_core::ConversationId;
use skillcue_settings::{DEFAULT_MIN_RELEVANCE_SCORE, LifecycleSettings};

use crate::pattern::Pattern;

/// Configured importance of a skill, used to order the directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Always listed first.
    Critical,
    /// Listed before ordinary skills.
    High,
    /// Default when a rule names no priority.
    #[default]
    Medium,
    /// Listed after ordinary skills.
    Low,
    /// An unrecognized priority string; listed last.
    Unranked,
}

impl Priority {
    /// Parse a configured priority. `None` means [`Priority::Medium`].
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Medium;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unranked,
        }
    }

    /// Sort key: lower ranks are listed first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Unranked => 4,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
            Self::Unranked => write!(f, "unranked"),
        }
    }
}

/// Largest idle timeout honored, in milliseconds (roughly 290,000 years).
const MAX_IDLE_TIMEOUT_MS: f64 = 9.2e15;

/// Activation and deactivation policy for one skill.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecyclePolicy {
    /// Suspend the skill after this long without a matching input.
    pub idle_timeout: Option<TimeDelta>,
    /// Minimum relevance score that activates the skill.
    pub min_relevance_score: f64,
    /// Whether a completed skill may be reactivated by a later match.
    pub auto_reactivate: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            idle_timeout: None,
            min_relevance_score: DEFAULT_MIN_RELEVANCE_SCORE,
            auto_reactivate: true,
        }
    }
}

impl From<&LifecycleSettings> for LifecyclePolicy {
    // Timeout is range-checked before the cast.
    #[allow(clippy::cast_possible_truncation)]
    fn from(settings: &LifecycleSettings) -> Self {
        let idle_timeout = settings
            .idle_timeout
            .filter(|ms| ms.is_finite() && *ms >= 1.0 && *ms <= MAX_IDLE_TIMEOUT_MS)
            .map(|ms| TimeDelta::milliseconds(ms as i64));
        let min_relevance_score = settings
            .min_relevance_score
            .filter(|score| *score > 0.0)
            .unwrap_or(DEFAULT_MIN_RELEVANCE_SCORE);
        Self {
            idle_timeout,
            min_relevance_score,
            auto_reactivate: settings.auto_reactivate.unwrap_or(true),
        }
    }
}

/// A validated skill definition held by the rule store.
#[derive(Debug, Clone)]
pub struct SkillDefinition {
    /// Unique identifier.
    pub name: String,
    /// Short human-readable description.
    pub description: Option<String>,
    /// Directive ordering.
    pub priority: Priority,
    /// Case-insensitive substrings, +0.2 each.
    pub keywords: Vec<String>,
    /// Compiled case-insensitive regexes, +0.5 each.
    pub intent_patterns: Vec<Pattern>,
    /// Case-insensitive substrings, +0.3 each.
    pub context_indicators: Vec<String>,
    /// Whether a trigger block was configured at all.
    pub has_triggers: bool,
    /// Activation/deactivation policy.
    pub lifecycle: LifecyclePolicy,
    /// Direct prerequisites, in configuration order.
    pub dependencies: Vec<String>,
    /// Reminder line included in the directive.
    pub reminder: Option<String>,
}

impl SkillDefinition {
    /// A definition with no triggers and default policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            priority: Priority::Medium,
            keywords: Vec::new(),
            intent_patterns: Vec::new(),
            context_indicators: Vec::new(),
            has_triggers: false,
            lifecycle: LifecyclePolicy::default(),
            dependencies: Vec::new(),
            reminder: None,
        }
    }
}

/// Status of a record in the active set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillStatus {
    /// Currently in use.
    #[default]
    Active,
    /// Idle timeout exceeded; about to leave the active set.
    Suspended,
}

/// Per-skill activation state within one conversation.
///
/// The skill identifier is the key of [`ConversationState::active_skills`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSkillRecord {
    /// When this record was created.
    pub activated_at: DateTime<Utc>,
    /// Last time an input matched the skill.
    pub last_used_at: DateTime<Utc>,
    /// Free-form workflow phase set by callers.
    #[serde(default)]
    pub phase: Option<String>,
    /// 1 on creation, +1 on every re-match while active.
    pub usage_count: u32,
    /// Current status.
    #[serde(default)]
    pub status: SkillStatus,
    /// Score of the most recent matching input (0 for dependencies).
    #[serde(default)]
    pub relevance_score: f64,
    /// Skill whose activation pulled this one in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated_by_dependency: Option<String>,
}

impl ActiveSkillRecord {
    /// Record for a skill activated by its own score.
    pub fn activated(now: DateTime<Utc>, score: f64) -> Self {
        Self {
            activated_at: now,
            last_used_at: now,
            phase: None,
            usage_count: 1,
            status: SkillStatus::Active,
            relevance_score: score,
            activated_by_dependency: None,
        }
    }

    /// Record for a prerequisite pulled in by `required_by`.
    pub fn pulled_in(now: DateTime<Utc>, required_by: &str) -> Self {
        Self {
            relevance_score: 0.0,
            activated_by_dependency: Some(required_by.to_string()),
            ..Self::activated(now, 0.0)
        }
    }

    /// Apply a re-match while already active.
    pub fn touch(&mut self, now: DateTime<Utc>, score: f64) {
        self.last_used_at = now;
        self.usage_count = self.usage_count.saturating_add(1);
        self.relevance_score = score;
        self.status = SkillStatus::Active;
    }

    /// Time since the last match.
    pub fn idle_for(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.last_used_at
    }
}

/// All cross-call mutable state of one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationState {
    /// Generated once, stable for the conversation.
    pub conversation_id: ConversationId,
    /// The active set, in activation order.
    pub active_skills: IndexMap<String, ActiveSkillRecord>,
    /// Skills whose work was signalled as done, oldest first.
    pub completed_skills: Vec<String>,
    /// Tag from the most recent classified input.
    pub conversation_context: Option<String>,
    /// When the last full transition ran.
    pub last_prompt_at: Option<DateTime<Utc>>,
}

impl ConversationState {
    /// Fresh state with a newly generated conversation ID.
    pub fn new() -> Self {
        Self {
            conversation_id: ConversationId::new(),
            active_skills: IndexMap::new(),
            completed_skills: Vec::new(),
            conversation_context: None,
            last_prompt_at: None,
        }
    }

    /// Whether `name` is in the active set.
    pub fn is_active(&self, name: &str) -> bool {
        self.active_skills.contains_key(name)
    }

    /// Whether `name` is in the completed list.
    pub fn is_completed(&self, name: &str) -> bool {
        self.completed_skills.iter().any(|s| s == name)
    }

    /// Active skill names in activation order.
    pub fn active_names(&self) -> Vec<&str> {
        self.active_skills.keys().map(String::as_str).collect()
    }

    /// Append `name` to the completed list unless already present.
    pub fn mark_completed(&mut self, name: &str) {
        if !self.is_completed(name) {
            self.completed_skills.push(name.to_string());
        }
    }

    /// Drop `name` from the completed list. Returns whether it was present.
    pub fn clear_completed(&mut self, name: &str) -> bool {
        let before = self.completed_skills.len();
        self.completed_skills.retain(|s| s != name);
        before != self.completed_skills.len()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
