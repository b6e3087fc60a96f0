//! # skillcue-skills
//!
//! Decides which skills apply to each user input and keeps that decision
//! stable across a conversation.
//!
//! - [`rules`]: immutable rule store built from configuration
//! - [`scorer`]: keyword, intent and context scoring
//! - [`resolver`]: transitive prerequisites, dependents, tree rendering
//! - [`lifecycle`]: per-conversation activation state machine
//! - [`classifier`]: domain vs. general input classification
//! - [`session`]: classify, transition, persist and summarize one input
//! - [`summary`] / [`directive`]: presentation-neutral result and its rendering
//! - [`store`]: JSON file and in-memory persistence
//!
//! ## Crate Position
//!
//! Depends on: skillcue-core, skillcue-settings. Depended on by: skillcue-cli.

#![deny(unsafe_code)]

pub mod classifier;
pub mod constants;
pub mod directive;
pub mod errors;
pub mod lifecycle;
pub mod pattern;
pub mod resolver;
pub mod rules;
pub mod scorer;
pub mod session;
pub mod store;
pub mod summary;
pub mod types;

pub use classifier::{Classification, DomainClassifier};
pub use directive::{BannerFormatter, DirectiveFormatter};
pub use errors::{Result, SkillError};
pub use lifecycle::{
    Activation, ActivationKind, Deactivation, DeactivationReason, SkillLifecycle,
    TransitionReport,
};
pub use pattern::Pattern;
pub use resolver::DependencyResolver;
pub use rules::RuleStore;
pub use scorer::{score, score_all};
pub use session::{ConversationSession, Processed};
pub use store::{JsonFileStore, MemoryStore, StateStore};
pub use summary::{ActivationSummary, DisplayStatus, SummaryEntry};
pub use types::{
    ActiveSkillRecord, ConversationState, LifecyclePolicy, Priority, SkillDefinition,
    SkillStatus,
};
