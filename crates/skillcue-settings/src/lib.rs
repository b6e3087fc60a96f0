//! # skillcue-settings
//!
//! Configuration shapes and loaders for the two JSON files that drive the
//! activation engine:
//!
//! 1. **Skill rules** (`skill-rules.json`): per-skill triggers, priority,
//!    lifecycle policy and dependencies, plus global toggles
//! 2. **Lifecycle rules** (`lifecycle-rules.json`): completion-signal
//!    patterns per skill
//!
//! Loading never aborts the host: a missing file yields defaults, and the
//! tolerant loaders also substitute defaults for unreadable or malformed
//! files (logged at `warn`).
//!
//! # Usage
//!
//! ```no_run
//! use skillcue_settings::{ConfigPaths, load_lifecycle_rules_or_default, load_skill_rules_or_default};
//!
//! let paths = ConfigPaths::resolve(std::path::Path::new("."));
//! let rules = load_skill_rules_or_default(&paths.skill_rules);
//! let lifecycle = load_lifecycle_rules_or_default(&paths.lifecycle_rules);
//! println!("{} skills, {} signal sets", rules.rules.len(), lifecycle.completion_signals.len());
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    ConfigPaths, load_json, load_json_or_default, load_lifecycle_rules,
    load_lifecycle_rules_or_default, load_skill_rules, load_skill_rules_or_default,
};
pub use types::*;
