//! Configuration loading and path resolution.
//!
//! Loading flow for each file:
//! 1. Missing file → compiled defaults (not an error)
//! 2. Present file → parsed JSON; partial objects are filled with defaults
//! 3. Unreadable or malformed file → error from the strict loaders, or
//!    defaults plus a `warn` from the `*_or_default` loaders
//!
//! Paths come from explicit overrides, then `SKILLCUE_*` environment
//! variables, then the conventional `.claude/hooks/` layout under the
//! project directory.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::{LifecycleRulesConfig, SkillRulesConfig};

/// Env var overriding the skill rules path.
pub const ENV_SKILL_RULES: &str = "SKILLCUE_SKILL_RULES";
/// Env var overriding the lifecycle rules path.
pub const ENV_LIFECYCLE_RULES: &str = "SKILLCUE_LIFECYCLE_RULES";
/// Env var overriding the conversation state path.
pub const ENV_STATE: &str = "SKILLCUE_STATE";

/// Default skill rules location, relative to the project directory.
pub const DEFAULT_SKILL_RULES: &str = ".claude/hooks/config/skill-rules.json";
/// Default lifecycle rules location, relative to the project directory.
pub const DEFAULT_LIFECYCLE_RULES: &str = ".claude/hooks/config/lifecycle-rules.json";
/// Default conversation state location, relative to the project directory.
pub const DEFAULT_STATE: &str = ".claude/hooks/state/conversation-state.json";

/// Resolved locations of the three files the engine touches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigPaths {
    /// `skill-rules.json`.
    pub skill_rules: PathBuf,
    /// `lifecycle-rules.json`.
    pub lifecycle_rules: PathBuf,
    /// Persisted conversation state.
    pub state: PathBuf,
}

impl ConfigPaths {
    /// Resolve paths under `project_dir`, honoring `SKILLCUE_*` env vars.
    pub fn resolve(project_dir: &Path) -> Self {
        Self::resolve_with(project_dir, read_env_string)
    }

    /// Resolve paths with a custom variable lookup (testable without env vars).
    ///
    /// Relative override values are joined onto `project_dir`.
    pub fn resolve_with(project_dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |var: &str, default: &str| {
            let raw = lookup(var).map_or_else(|| PathBuf::from(default), PathBuf::from);
            if raw.is_absolute() {
                raw
            } else {
                project_dir.join(raw)
            }
        };
        Self {
            skill_rules: pick(ENV_SKILL_RULES, DEFAULT_SKILL_RULES),
            lifecycle_rules: pick(ENV_LIFECYCLE_RULES, DEFAULT_LIFECYCLE_RULES),
            state: pick(ENV_STATE, DEFAULT_STATE),
        }
    }
}

/// Load a JSON file into `T`, returning `T::default()` if it does not exist.
pub fn load_json<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        debug!(?path, "config file not found, using defaults");
        return Ok(T::default());
    }

    debug!(?path, "loading config file");
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON file into `T`, substituting defaults for any failure.
pub fn load_json_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    load_json(path).unwrap_or_else(|error| {
        warn!(?path, %error, "failed to load config, using defaults");
        T::default()
    })
}

/// Load `skill-rules.json` strictly.
pub fn load_skill_rules(path: &Path) -> Result<SkillRulesConfig> {
    load_json(path)
}

/// Load `skill-rules.json`, falling back to an empty rule set.
pub fn load_skill_rules_or_default(path: &Path) -> SkillRulesConfig {
    load_json_or_default(path)
}

/// Load `lifecycle-rules.json` strictly.
pub fn load_lifecycle_rules(path: &Path) -> Result<LifecycleRulesConfig> {
    load_json(path)
}

/// Load `lifecycle-rules.json`, falling back to no completion signals.
pub fn load_lifecycle_rules_or_default(path: &Path) -> LifecycleRulesConfig {
    load_json_or_default(path)
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
