//! Immutable rule store.
//!
//! Built once from the two configuration files. Patterns are compiled here so
//! each input is scored against ready matchers, and invalid patterns are
//! reported once instead of on every prompt.

use indexmap::IndexMap;
use skillcue_settings::{
    ClassificationSettings, DEFAULT_SKILLS_PATH, LifecycleRulesConfig, SkillRulesConfig,
};
use tracing::{debug, warn};

use crate::pattern::Pattern;
use crate::types::{LifecyclePolicy, Priority, SkillDefinition};

/// In-memory view of skill definitions and completion signals.
#[derive(Debug, Clone)]
pub struct RuleStore {
    skills: IndexMap<String, SkillDefinition>,
    completion_signals: IndexMap<String, Vec<Pattern>>,
    dependency_cascade: bool,
    skills_path: String,
    classification: ClassificationSettings,
}

impl RuleStore {
    /// Create a store from already-built definitions, in the given order.
    pub fn new(definitions: impl IntoIterator<Item = SkillDefinition>) -> Self {
        Self {
            skills: definitions
                .into_iter()
                .map(|def| (def.name.clone(), def))
                .collect(),
            completion_signals: IndexMap::new(),
            dependency_cascade: true,
            skills_path: DEFAULT_SKILLS_PATH.to_string(),
            classification: ClassificationSettings::default(),
        }
    }

    /// Build the store from raw configuration.
    ///
    /// Per-rule `dependencies` and the top-level `dependencies` map are
    /// merged, rule list first, without duplicates.
    pub fn from_config(rules: &SkillRulesConfig, lifecycle: &LifecycleRulesConfig) -> Self {
        let mut skills = IndexMap::with_capacity(rules.rules.len());

        for (name, rule) in &rules.rules {
            let priority = Priority::parse(rule.priority.as_deref());
            if priority == Priority::Unranked {
                warn!(skill = %name, priority = ?rule.priority, "unknown priority, ordering skill last");
            }

            let mut dependencies = rule.dependencies.clone();
            for dep in rules.dependencies.get(name).into_iter().flatten() {
                if !dependencies.contains(dep) {
                    dependencies.push(dep.clone());
                }
            }

            let triggers = rule.prompt_triggers.as_ref();
            let definition = SkillDefinition {
                name: name.clone(),
                description: rule.description.clone(),
                priority,
                keywords: triggers.map(|t| t.keywords.clone()).unwrap_or_default(),
                intent_patterns: triggers
                    .map(|t| Pattern::compile_all(&t.intent_patterns, name))
                    .unwrap_or_default(),
                context_indicators: triggers
                    .map(|t| t.context_indicators.clone())
                    .unwrap_or_default(),
                has_triggers: triggers.is_some(),
                lifecycle: rule
                    .lifecycle
                    .as_ref()
                    .map(LifecyclePolicy::from)
                    .unwrap_or_default(),
                dependencies,
                reminder: rule.reminder.clone(),
            };
            let _ = skills.insert(name.clone(), definition);
        }

        for name in rules.dependencies.keys() {
            if !skills.contains_key(name) {
                debug!(skill = %name, "dependency entry for undefined skill ignored");
            }
        }

        let completion_signals = lifecycle
            .completion_signals
            .iter()
            .map(|(name, sources)| (name.clone(), Pattern::compile_all(sources, name)))
            .collect();

        debug!(count = skills.len(), "rule store built");

        Self {
            skills,
            completion_signals,
            dependency_cascade: rules.global_settings.enable_dependency_resolution,
            skills_path: rules.global_settings.skills_path.clone(),
            classification: rules.global_settings.classification.clone(),
        }
    }

    /// Attach completion-signal patterns for `skill`.
    #[must_use]
    pub fn with_completion_signals(mut self, skill: &str, sources: &[&str]) -> Self {
        let sources: Vec<String> = sources.iter().map(ToString::to_string).collect();
        let _ = self
            .completion_signals
            .insert(skill.to_string(), Pattern::compile_all(&sources, skill));
        self
    }

    /// Enable or disable dependency cascade activation.
    #[must_use]
    pub fn with_dependency_cascade(mut self, enabled: bool) -> Self {
        self.dependency_cascade = enabled;
        self
    }

    /// Get a skill definition by identifier.
    pub fn get(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.get(name)
    }

    /// Check whether a skill is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.skills.contains_key(name)
    }

    /// Skill identifiers in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    /// Skill definitions in configuration order.
    pub fn definitions(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }

    /// Number of defined skills.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether no skills are defined.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Completion-signal patterns for `name` (empty if none configured).
    pub fn completion_signals(&self, name: &str) -> &[Pattern] {
        self.completion_signals
            .get(name)
            .map_or(&[], Vec::as_slice)
    }

    /// Whether activating a skill also activates its prerequisites.
    pub fn dependency_cascade(&self) -> bool {
        self.dependency_cascade
    }

    /// Directory holding skill documentation, for directive text.
    pub fn skills_path(&self) -> &str {
        &self.skills_path
    }

    /// Input classification settings.
    pub fn classification(&self) -> &ClassificationSettings {
        &self.classification
    }
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
