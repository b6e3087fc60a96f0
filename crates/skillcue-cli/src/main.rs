//! # skillcue
//!
//! Prompt hook binary. `skillcue hook` reads the user prompt on stdin and
//! writes it back, prefixed with a skill directive when skills are active.
//! The other subcommands inspect the configured rules and stored state.

#![deny(unsafe_code)]

mod input;

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skillcue_settings::{ConfigPaths, load_lifecycle_rules_or_default, load_skill_rules_or_default};
use skillcue_skills::{
    ConversationSession, ConversationState, DependencyResolver, JsonFileStore, RuleStore,
    StateStore, score_all,
};
use tracing::debug;

/// Skill activation hook and rule inspection.
#[derive(Parser, Debug)]
#[command(name = "skillcue", about = "Skill activation hook and rule inspection")]
struct Cli {
    /// Path to `skill-rules.json`.
    #[arg(long, global = true)]
    skill_rules: Option<PathBuf>,

    /// Path to `lifecycle-rules.json`.
    #[arg(long, global = true)]
    lifecycle_rules: Option<PathBuf>,

    /// Path to the conversation state file.
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Log level for stderr output (`RUST_LOG` overrides).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a prompt on stdin and print it with the skill directive.
    Hook,
    /// Print the dependency tree of all skills.
    Graph,
    /// Print the transitive prerequisites of a skill.
    Deps {
        /// Skill identifier.
        skill: String,
    },
    /// Print the skills that directly depend on a skill.
    Dependents {
        /// Skill identifier.
        skill: String,
    },
    /// Print every skill's relevance score for some text.
    Score {
        /// Text to score.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Print the stored conversation state.
    State,
    /// Start a new conversation, discarding stored state.
    Reset,
}

impl Cli {
    fn config_paths(&self) -> Result<ConfigPaths> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let mut paths = ConfigPaths::resolve(&cwd);
        if let Some(path) = &self.skill_rules {
            paths.skill_rules.clone_from(path);
        }
        if let Some(path) = &self.lifecycle_rules {
            paths.lifecycle_rules.clone_from(path);
        }
        if let Some(path) = &self.state {
            paths.state.clone_from(path);
        }
        Ok(paths)
    }
}

fn load_rules(paths: &ConfigPaths) -> RuleStore {
    let skill_rules = load_skill_rules_or_default(&paths.skill_rules);
    let lifecycle_rules = load_lifecycle_rules_or_default(&paths.lifecycle_rules);
    RuleStore::from_config(&skill_rules, &lifecycle_rules)
}

fn run_hook(paths: &ConfigPaths, stdin: impl Read, out: &mut impl Write) -> Result<()> {
    let prompt = input::read_prompt(stdin).context("Failed to read prompt from stdin")?;

    let mut session = ConversationSession::open(load_rules(paths), JsonFileStore::new(&paths.state));
    let text = session.process_input(&prompt);
    debug!(
        conversation = %session.state().conversation_id,
        active = session.state().active_skills.len(),
        "hook processed prompt"
    );
    write!(out, "{text}")?;
    Ok(())
}

fn run_score(rules: &RuleStore, text: &str, out: &mut impl Write) -> Result<()> {
    for (name, score) in score_all(text, rules) {
        let threshold = rules
            .get(name)
            .map_or(0.0, |def| def.lifecycle.min_relevance_score);
        let marker = if score >= threshold { "*" } else { " " };
        writeln!(out, "{marker} {name}\t{score:.2}\t(threshold {threshold:.2})")?;
    }
    Ok(())
}

fn run_state(paths: &ConfigPaths, out: &mut impl Write) -> Result<()> {
    let store = JsonFileStore::new(&paths.state);
    match store.load()? {
        Some(state) => writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?,
        None => writeln!(out, "no conversation state at {}", paths.state.display())?,
    }
    Ok(())
}

fn run_reset(paths: &ConfigPaths, out: &mut impl Write) -> Result<()> {
    let state = ConversationState::new();
    JsonFileStore::new(&paths.state).save(&state)?;
    writeln!(out, "started conversation {}", state.conversation_id)?;
    Ok(())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let paths = cli.config_paths()?;
    debug!(?paths, "resolved configuration paths");

    match &cli.command {
        Command::Hook => run_hook(&paths, std::io::stdin().lock(), out),
        Command::Graph => {
            let rules = load_rules(&paths);
            writeln!(out, "{}", DependencyResolver::new(&rules).render_tree())?;
            Ok(())
        }
        Command::Deps { skill } => {
            let rules = load_rules(&paths);
            for dep in DependencyResolver::new(&rules).resolve(skill) {
                writeln!(out, "{dep}")?;
            }
            Ok(())
        }
        Command::Dependents { skill } => {
            let rules = load_rules(&paths);
            for dependent in DependencyResolver::new(&rules).dependents(skill) {
                writeln!(out, "{dependent}")?;
            }
            Ok(())
        }
        Command::Score { text } => run_score(&load_rules(&paths), &text.join(" "), out),
        Command::State => run_state(&paths, out),
        Command::Reset => run_reset(&paths, out),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    skillcue_core::logging::init_subscriber(&cli.log_level);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)?;
    out.flush()?;
    Ok(())
}
