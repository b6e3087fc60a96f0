//! Per-conversation skill lifecycle state machine.
//!
//! States per skill: dormant (absent everywhere), active (in the active set),
//! suspended (idle timeout exceeded; removed from the active set but not
//! completed, so it behaves like dormant afterwards), and completed (in the
//! completed list). A completed skill returns to active only if its policy
//! allows auto-reactivation.
//!
//! [`SkillLifecycle::apply`] processes one input in a fixed order:
//! deactivation is decided from the state *before* this input's activations.
//!
//! 1. completion signals, then idle timeouts, for every active skill
//! 2. removal of everything deactivated
//! 3. scoring of every known skill
//! 4. activation, reactivation, in-place refresh, and dependency cascade
//! 5. recording the input timestamp
//!
//! A score below threshold never deactivates an active skill.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::pattern::any_match;
use crate::resolver::DependencyResolver;
use crate::rules::RuleStore;
use crate::scorer::score_all;
use crate::types::{ActiveSkillRecord, ConversationState, SkillStatus};

/// How a skill entered the active set during one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationKind {
    /// Activated by its own score, never completed before.
    New,
    /// Activated by its own score after being completed.
    Reactivated,
    /// Pulled in as a prerequisite of another activation.
    Dependency {
        /// Skill whose activation required this one.
        required_by: String,
    },
}

/// One skill entering the active set.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    /// Skill identifier.
    pub skill: String,
    /// How it was activated.
    pub kind: ActivationKind,
    /// Relevance score recorded on the new record.
    pub score: f64,
}

/// Why a skill left the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeactivationReason {
    /// A completion signal matched; the skill moved to the completed list.
    Completed,
    /// The idle timeout elapsed; the skill was suspended.
    IdleTimeout,
}

/// One skill leaving the active set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deactivation {
    /// Skill identifier.
    pub skill: String,
    /// Why it left.
    pub reason: DeactivationReason,
}

/// Changes made by one [`SkillLifecycle::apply`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionReport {
    /// Skills that entered the active set, in activation order.
    pub activated: Vec<Activation>,
    /// Skills that left the active set.
    pub deactivated: Vec<Deactivation>,
}

impl TransitionReport {
    /// First activation recorded for `skill`.
    pub fn activation(&self, skill: &str) -> Option<&Activation> {
        self.activated.iter().find(|a| a.skill == skill)
    }

    /// Whether `skill` was deactivated for `reason`.
    pub fn was_deactivated(&self, skill: &str, reason: DeactivationReason) -> bool {
        self.deactivated
            .iter()
            .any(|d| d.skill == skill && d.reason == reason)
    }

    /// Whether nothing entered or left the active set.
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }
}

/// Owns one conversation's activation state and the rules that drive it.
#[derive(Debug, Clone)]
pub struct SkillLifecycle {
    rules: RuleStore,
    state: ConversationState,
}

impl SkillLifecycle {
    /// Wrap existing state.
    pub fn new(rules: RuleStore, state: ConversationState) -> Self {
        Self { rules, state }
    }

    /// The rule store.
    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    /// Current conversation state.
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Consume the machine, returning its state.
    pub fn into_state(self) -> ConversationState {
        self.state
    }

    /// Set the conversation's classification tag.
    pub fn set_context(&mut self, tag: Option<String>) {
        self.state.conversation_context = tag;
    }

    /// Replace the state with a fresh conversation.
    pub fn reset(&mut self) {
        self.state = ConversationState::new();
    }

    /// Set the workflow phase tag of an active skill.
    ///
    /// Returns `false` if the skill is not active.
    pub fn set_phase(&mut self, skill: &str, phase: Option<String>) -> bool {
        match self.state.active_skills.get_mut(skill) {
            Some(record) => {
                record.phase = phase;
                true
            }
            None => false,
        }
    }

    /// Whether `input` matches one of `skill`'s completion signals.
    pub fn is_completion_signal(&self, skill: &str, input: &str) -> bool {
        any_match(self.rules.completion_signals(skill), input)
    }

    /// Whether active `skill` has been idle longer than its timeout at `now`.
    pub fn is_idle(&self, skill: &str, now: DateTime<Utc>) -> bool {
        let Some(record) = self.state.active_skills.get(skill) else {
            return false;
        };
        let Some(timeout) = self.rules.get(skill).and_then(|d| d.lifecycle.idle_timeout) else {
            return false;
        };
        record.idle_for(now) > timeout
    }

    /// Process one input at `now`.
    pub fn apply(&mut self, input: &str, now: DateTime<Utc>) -> TransitionReport {
        let mut report = TransitionReport::default();

        self.deactivate(input, now, &mut report);
        activate(&self.rules, &mut self.state, input, now, &mut report);
        self.state.last_prompt_at = Some(now);

        debug!(
            conversation = %self.state.conversation_id,
            activated = report.activated.len(),
            deactivated = report.deactivated.len(),
            active = self.state.active_skills.len(),
            "skill transition applied"
        );
        report
    }

    fn deactivate(&mut self, input: &str, now: DateTime<Utc>, report: &mut TransitionReport) {
        let mut leaving = Vec::new();
        for name in self.state.active_skills.keys() {
            if self.is_completion_signal(name, input) {
                leaving.push(Deactivation {
                    skill: name.clone(),
                    reason: DeactivationReason::Completed,
                });
            } else if self.is_idle(name, now) {
                leaving.push(Deactivation {
                    skill: name.clone(),
                    reason: DeactivationReason::IdleTimeout,
                });
            }
        }

        for deactivation in &leaving {
            let name = deactivation.skill.as_str();
            match deactivation.reason {
                DeactivationReason::Completed => {
                    debug!(skill = name, "completion signal matched");
                    self.state.mark_completed(name);
                }
                DeactivationReason::IdleTimeout => {
                    debug!(skill = name, "idle timeout exceeded, suspending");
                    if let Some(record) = self.state.active_skills.get_mut(name) {
                        record.status = SkillStatus::Suspended;
                    }
                }
            }
            let _ = self.state.active_skills.shift_remove(name);
        }

        report.deactivated = leaving;
    }
}

fn activate(
    rules: &RuleStore,
    state: &mut ConversationState,
    input: &str,
    now: DateTime<Utc>,
    report: &mut TransitionReport,
) {
    let resolver = DependencyResolver::new(rules);

    for (name, score) in score_all(input, rules) {
        let Some(definition) = rules.get(name) else {
            continue;
        };
        if score < definition.lifecycle.min_relevance_score {
            continue;
        }

        let was_completed = state.is_completed(name);
        if was_completed && !definition.lifecycle.auto_reactivate {
            debug!(skill = name, score, "completed skill matched but auto-reactivate is off");
            continue;
        }

        if let Some(record) = state.active_skills.get_mut(name) {
            record.touch(now, score);
            continue;
        }

        let _ = state
            .active_skills
            .insert(name.to_string(), ActiveSkillRecord::activated(now, score));
        let _ = state.clear_completed(name);
        let kind = if was_completed {
            ActivationKind::Reactivated
        } else {
            ActivationKind::New
        };
        debug!(skill = name, score, ?kind, "skill activated");
        report.activated.push(Activation {
            skill: name.to_string(),
            kind,
            score,
        });

        if !rules.dependency_cascade() {
            continue;
        }
        for dep in resolver.resolve(name) {
            if state.is_active(&dep) {
                continue;
            }
            let _ = state
                .active_skills
                .insert(dep.clone(), ActiveSkillRecord::pulled_in(now, name));
            let _ = state.clear_completed(&dep);
            debug!(skill = %dep, required_by = name, "dependency activated");
            report.activated.push(Activation {
                skill: dep,
                kind: ActivationKind::Dependency {
                    required_by: name.to_string(),
                },
                score: 0.0,
            });
        }
    }
}
