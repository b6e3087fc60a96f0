//! One conversation's entry point: classify, transition, persist, render.
//!
//! Persistence failures never block the prompt. They are logged and the
//! in-memory state carries on.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::classifier::{Classification, DomainClassifier};
use crate::directive::{BannerFormatter, DirectiveFormatter};
use crate::lifecycle::{SkillLifecycle, TransitionReport};
use crate::rules::RuleStore;
use crate::store::StateStore;
use crate::summary::ActivationSummary;
use crate::types::ConversationState;

/// Outcome of processing one input.
#[derive(Debug, Clone, PartialEq)]
pub enum Processed {
    /// Pass the input through unchanged.
    Passthrough,
    /// Prepend a directive built from this summary.
    Directive(ActivationSummary),
}

/// A conversation bound to its state store.
pub struct ConversationSession<S: StateStore> {
    lifecycle: SkillLifecycle,
    classifier: DomainClassifier,
    store: S,
    formatter: Box<dyn DirectiveFormatter>,
}

impl<S: StateStore> ConversationSession<S> {
    /// Open the conversation persisted in `store`.
    ///
    /// Nothing stored starts a fresh conversation. An unreadable store is
    /// logged and also starts fresh.
    pub fn open(rules: RuleStore, store: S) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => {
                debug!(conversation = %state.conversation_id, "resumed conversation");
                state
            }
            Ok(None) => ConversationState::new(),
            Err(error) => {
                warn!(%error, "failed to load conversation state, starting fresh");
                ConversationState::new()
            }
        };
        let classifier = DomainClassifier::from_settings(rules.classification());

        Self {
            lifecycle: SkillLifecycle::new(rules, state),
            classifier,
            store,
            formatter: Box::new(BannerFormatter::new()),
        }
    }

    /// Replace the directive formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl DirectiveFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Current conversation state.
    pub fn state(&self) -> &ConversationState {
        self.lifecycle.state()
    }

    /// The rule store.
    pub fn rules(&self) -> &RuleStore {
        self.lifecycle.rules()
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process `input` at `now`.
    ///
    /// Input that is not domain-relevant while nothing is active is passed
    /// through without touching state or the store.
    pub fn process(&mut self, input: &str, now: DateTime<Utc>) -> Processed {
        let classification = self.classifier.classify(input);
        if classification != Classification::Domain && self.state().active_skills.is_empty() {
            debug!(?classification, "no active skills and input is off-domain, passing through");
            return Processed::Passthrough;
        }

        if let Some(tag) = self.classifier.tag(classification) {
            self.lifecycle.set_context(Some(tag.to_string()));
        }

        let report = self.lifecycle.apply(input, now);
        self.persist();
        self.summarize(&report)
    }

    /// Process `input` now and return the text to hand to the assistant.
    pub fn process_input(&mut self, input: &str) -> String {
        match self.process(input, Utc::now()) {
            Processed::Passthrough => input.to_string(),
            Processed::Directive(summary) => self.formatter.format(&summary, input),
        }
    }

    /// Set the workflow phase of an active skill and persist it.
    pub fn set_phase(&mut self, skill: &str, phase: Option<String>) -> bool {
        let updated = self.lifecycle.set_phase(skill, phase);
        if updated {
            self.persist();
        }
        updated
    }

    /// Discard all state and start a new conversation.
    pub fn reset(&mut self) {
        self.lifecycle.reset();
        self.persist();
    }

    fn summarize(&self, report: &TransitionReport) -> Processed {
        if self.state().active_skills.is_empty() {
            return Processed::Passthrough;
        }
        Processed::Directive(ActivationSummary::build(
            self.rules(),
            self.state(),
            report,
        ))
    }

    fn persist(&self) {
        if let Err(error) = self.store.save(self.state()) {
            warn!(%error, "failed to save conversation state");
        }
    }
}
