//! Presentation-neutral view of the active set after one input.

use serde::Serialize;

use crate::lifecycle::{ActivationKind, TransitionReport};
use crate::rules::RuleStore;
use crate::types::{ConversationState, Priority};

/// How an active skill is labelled in the directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DisplayStatus {
    /// Newly activated by this input.
    Activated,
    /// Returned from the completed list on this input.
    Reactivated,
    /// Pulled in on this input as a prerequisite.
    Dependency {
        /// Skill that required it.
        #[serde(rename = "requiredBy")]
        required_by: String,
    },
    /// Already active before this input.
    Active,
}

impl DisplayStatus {
    fn from_report(report: &TransitionReport, skill: &str) -> Self {
        let kinds: Vec<&ActivationKind> = report
            .activated
            .iter()
            .filter(|a| a.skill == skill)
            .map(|a| &a.kind)
            .collect();

        if kinds.contains(&&ActivationKind::New) {
            return Self::Activated;
        }
        if kinds.contains(&&ActivationKind::Reactivated) {
            return Self::Reactivated;
        }
        kinds
            .into_iter()
            .find_map(|kind| match kind {
                ActivationKind::Dependency { required_by } => Some(Self::Dependency {
                    required_by: required_by.clone(),
                }),
                _ => None,
            })
            .unwrap_or(Self::Active)
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Activated => write!(f, "Activated"),
            Self::Reactivated => write!(f, "Reactivated"),
            Self::Dependency { required_by } => write!(f, "Dependency (required by {required_by})"),
            Self::Active => write!(f, "Active"),
        }
    }
}

/// One active skill as shown to the assistant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    /// Skill identifier.
    pub name: String,
    /// Configured priority.
    pub priority: Priority,
    /// Label for this input.
    pub status: DisplayStatus,
    /// Caller-set workflow phase.
    pub phase: Option<String>,
    /// Configured reminder line.
    pub reminder: Option<String>,
}

/// Active skills ordered for display, plus completed skills.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationSummary {
    /// Active skills, highest priority first; ties keep activation order.
    pub skills: Vec<SummaryEntry>,
    /// Completed skills, oldest first.
    pub completed: Vec<String>,
    /// Directory holding each skill's documentation.
    pub skills_path: String,
}

impl ActivationSummary {
    /// Summarize `state` after the transition described by `report`.
    pub fn build(rules: &RuleStore, state: &ConversationState, report: &TransitionReport) -> Self {
        let mut skills: Vec<SummaryEntry> = state
            .active_skills
            .iter()
            .map(|(name, record)| {
                let definition = rules.get(name);
                SummaryEntry {
                    name: name.clone(),
                    priority: definition.map(|d| d.priority).unwrap_or_default(),
                    status: DisplayStatus::from_report(report, name),
                    phase: record.phase.clone(),
                    reminder: definition.and_then(|d| d.reminder.clone()),
                }
            })
            .collect();
        skills.sort_by_key(|entry| entry.priority.rank());

        Self {
            skills,
            completed: state.completed_skills.clone(),
            skills_path: rules.skills_path().to_string(),
        }
    }

    /// Skill names in display order.
    pub fn names(&self) -> Vec<&str> {
        self.skills.iter().map(|s| s.name.as_str()).collect()
    }

    /// Whether no skill is active.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::lifecycle::Activation;
    use crate::types::{ActiveSkillRecord, SkillDefinition};

    fn rules() -> RuleStore {
        RuleStore::new(vec![
            SkillDefinition {
                priority: Priority::Low,
                ..SkillDefinition::new("docs")
            },
            SkillDefinition {
                priority: Priority::Critical,
                reminder: Some("Check object ID ranges".into()),
                ..SkillDefinition::new("core")
            },
            SkillDefinition::new("nav"),
            SkillDefinition::new("testing"),
        ])
    }

    fn state(names: &[&str]) -> ConversationState {
        let now = DateTime::from_timestamp(0, 0).unwrap();
        let mut state = ConversationState::new();
        for name in names {
            let _ = state
                .active_skills
                .insert((*name).to_string(), ActiveSkillRecord::activated(now, 0.5));
        }
        state
    }

    #[test]
    fn entries_sorted_by_priority_stably() {
        let summary = ActivationSummary::build(
            &rules(),
            &state(&["docs", "testing", "core", "nav"]),
            &TransitionReport::default(),
        );
        assert_eq!(summary.names(), vec!["core", "testing", "nav", "docs"]);
        assert_eq!(summary.skills[0].reminder.as_deref(), Some("Check object ID ranges"));
        assert_eq!(summary.skills_path, "skills");
    }

    #[test]
    fn status_reflects_report() {
        let report = TransitionReport {
            activated: vec![
                Activation {
                    skill: "core".into(),
                    kind: ActivationKind::Reactivated,
                    score: 0.4,
                },
                Activation {
                    skill: "nav".into(),
                    kind: ActivationKind::Dependency {
                        required_by: "core".into(),
                    },
                    score: 0.0,
                },
            ],
            deactivated: Vec::new(),
        };
        let summary =
            ActivationSummary::build(&rules(), &state(&["core", "nav", "testing"]), &report);
        let status: Vec<String> = summary.skills.iter().map(|s| s.status.to_string()).collect();
        assert_eq!(
            status,
            vec!["Reactivated", "Dependency (required by core)", "Active"]
        );
    }

    #[test]
    fn new_wins_over_dependency() {
        let report = TransitionReport {
            activated: vec![
                Activation {
                    skill: "nav".into(),
                    kind: ActivationKind::Dependency {
                        required_by: "core".into(),
                    },
                    score: 0.0,
                },
                Activation {
                    skill: "nav".into(),
                    kind: ActivationKind::New,
                    score: 0.4,
                },
            ],
            deactivated: Vec::new(),
        };
        let summary = ActivationSummary::build(&rules(), &state(&["nav"]), &report);
        assert_eq!(summary.skills[0].status, DisplayStatus::Activated);
    }

    #[test]
    fn unknown_active_skill_defaults_to_medium() {
        let summary = ActivationSummary::build(
            &rules(),
            &state(&["docs", "retired"]),
            &TransitionReport::default(),
        );
        assert_eq!(summary.names(), vec!["retired", "docs"]);
        assert_eq!(summary.skills[0].priority, Priority::Medium);
    }

    #[test]
    fn completed_list_is_carried() {
        let mut state = state(&["core"]);
        state.mark_completed("testing");
        let summary = ActivationSummary::build(&rules(), &state, &TransitionReport::default());
        assert_eq!(summary.completed, vec!["testing"]);
        assert!(!summary.is_empty());
    }
}
