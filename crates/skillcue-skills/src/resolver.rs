//! Dependency resolution over the rule store's dependency edges.
//!
//! Resolution walks depth-first with an explicit path that is copied for
//! each branch, so two siblings sharing a prerequisite are never mistaken
//! for a cycle. An edge back onto the current path is a cycle: it is logged
//! and skipped. The skill owning that edge is left out of its parent's
//! closure, but its other prerequisites are kept.

use std::fmt::Write;

use tracing::{debug, warn};

use crate::constants::CIRCULAR_REFERENCE_MARKER;
use crate::rules::RuleStore;

/// Outcome of walking one skill's prerequisites.
struct Walk {
    /// Transitive prerequisites, deepest first.
    deps: Vec<String>,
    /// The skill has an edge back onto the current path.
    cyclic: bool,
}

/// Read-only dependency queries over a [`RuleStore`].
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    rules: &'a RuleStore,
}

impl<'a> DependencyResolver<'a> {
    /// Create a resolver over `rules`.
    pub fn new(rules: &'a RuleStore) -> Self {
        Self { rules }
    }

    /// Transitive prerequisites of `skill`.
    ///
    /// Ordered depth-first so every prerequisite precedes the skills that
    /// depend on it. Contains no duplicates and never contains `skill`.
    /// Undefined dependencies are skipped with a warning.
    pub fn resolve(&self, skill: &str) -> Vec<String> {
        self.walk(skill, &[skill]).deps
    }

    /// Skills whose direct dependency list contains `skill`.
    pub fn dependents(&self, skill: &str) -> Vec<String> {
        self.rules
            .definitions()
            .filter(|def| def.dependencies.iter().any(|d| d == skill))
            .map(|def| def.name.clone())
            .collect()
    }

    fn walk<'p>(&'p self, skill: &'p str, path: &[&'p str]) -> Walk {
        let mut walk = Walk {
            deps: Vec::new(),
            cyclic: false,
        };
        let Some(definition) = self.rules.get(skill) else {
            return walk;
        };

        for dep in &definition.dependencies {
            if !self.rules.contains(dep) {
                warn!(skill, dependency = %dep, "dependency skill not found, skipping");
                continue;
            }

            if path.contains(&dep.as_str()) {
                warn!(
                    skill,
                    dependency = %dep,
                    path = %path.join(" -> "),
                    "circular dependency detected"
                );
                walk.cyclic = true;
                continue;
            }

            let mut branch = path.to_vec();
            branch.push(dep);
            let child = self.walk(dep, &branch);
            for name in child.deps {
                if !walk.deps.contains(&name) {
                    walk.deps.push(name);
                }
            }
            if child.cyclic {
                debug!(skill, dependency = %dep, "dropping dependency that closes a cycle");
            } else if !walk.deps.contains(dep) {
                walk.deps.push(dep.clone());
            }
        }

        walk
    }

    /// Render the dependency forest as an indented tree.
    ///
    /// Roots are skills nothing depends on, plus skills without
    /// dependencies. A skill met again on its own path is printed with a
    /// `(circular reference)` marker and not expanded.
    pub fn render_tree(&self) -> String {
        let mut out = String::from("Skill Dependency Graph:\n");

        for def in self.rules.definitions() {
            let is_root = def.dependencies.is_empty() || self.dependents(&def.name).is_empty();
            if !is_root {
                continue;
            }
            out.push('\n');
            self.render_node(&mut out, &def.name, 0, "", &mut Vec::new());
        }

        out.trim_end().to_string()
    }

    fn render_node<'p>(
        &'p self,
        out: &mut String,
        skill: &'p str,
        depth: usize,
        prefix: &str,
        path: &mut Vec<&'p str>,
    ) {
        let indent = "  ".repeat(depth);

        if path.contains(&skill) {
            let _ = writeln!(out, "{indent}{prefix}{skill} {CIRCULAR_REFERENCE_MARKER}");
            return;
        }

        let Some(definition) = self.rules.get(skill) else {
            let _ = writeln!(out, "{indent}{prefix}{skill} (missing)");
            return;
        };

        let _ = writeln!(out, "{indent}{prefix}{skill}");

        path.push(skill);
        let last = definition.dependencies.len().saturating_sub(1);
        for (i, dep) in definition.dependencies.iter().enumerate() {
            let branch = if i == last { "└─ " } else { "├─ " };
            self.render_node(out, dep, depth + 1, branch, path);
        }
        let _ = path.pop();
    }
}
