//! Rendering an [`ActivationSummary`] into the text prepended to a prompt.
//!
//! The engine only produces the summary; wording lives behind
//! [`DirectiveFormatter`] so hosts can swap it.

use std::fmt::Write;

use crate::summary::ActivationSummary;

// =============================================================================
// Formatter Trait
// =============================================================================

/// Turns a summary and the raw input into the text the assistant sees.
pub trait DirectiveFormatter: Send + Sync {
    /// Render the directive. `input` must appear verbatim in the result.
    fn format(&self, summary: &ActivationSummary, input: &str) -> String;
}

// =============================================================================
// Banner Formatter (Default)
// =============================================================================

/// Plain-text banner listing the documents to read, the status of every
/// active skill, and the user's request at the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct BannerFormatter;

impl BannerFormatter {
    /// Create the default formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DirectiveFormatter for BannerFormatter {
    fn format(&self, summary: &ActivationSummary, input: &str) -> String {
        let mut out = String::new();

        out.push_str("SKILL ACTIVATION: read the skill documentation before answering.\n\n");
        out.push_str("Load each file below in full, including every resource file it references:\n");
        for entry in &summary.skills {
            let _ = writeln!(out, "- {}/{}/SKILL.md", summary.skills_path, entry.name);
        }

        let reminders: Vec<&str> = summary
            .skills
            .iter()
            .filter_map(|entry| entry.reminder.as_deref())
            .collect();
        if !reminders.is_empty() {
            out.push_str("\nReminders:\n");
            for reminder in reminders {
                let _ = writeln!(out, "  {reminder}");
            }
        }

        out.push_str("\nSkill status:\n");
        for entry in &summary.skills {
            let phase = entry
                .phase
                .as_deref()
                .map(|p| format!(" ({p})"))
                .unwrap_or_default();
            let _ = writeln!(out, "  {}{phase} - {}", entry.name, entry.status);
        }
        if !summary.completed.is_empty() {
            let _ = writeln!(out, "\n  Completed: {}", summary.completed.join(", "));
        }

        out.push_str(
            "\nFollow the documented workflow and rules of every active skill. \
             Do not skip phases or substitute your own approach.\n",
        );
        let _ = writeln!(out, "\nActive skills: {}", summary.names().join(", "));
        let _ = write!(out, "\nUSER REQUEST:\n{input}");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{DisplayStatus, SummaryEntry};
    use crate::types::Priority;

    fn entry(name: &str, status: DisplayStatus) -> SummaryEntry {
        SummaryEntry {
            name: name.into(),
            priority: Priority::Medium,
            status,
            phase: None,
            reminder: None,
        }
    }

    #[test]
    fn banner_layout() {
        let summary = ActivationSummary {
            skills: vec![
                SummaryEntry {
                    phase: Some("design".into()),
                    reminder: Some("Check object ID ranges".into()),
                    ..entry("core", DisplayStatus::Activated)
                },
                entry(
                    "nav",
                    DisplayStatus::Dependency {
                        required_by: "core".into(),
                    },
                ),
            ],
            completed: vec!["testing".into()],
            skills_path: "skills".into(),
        };
        let text = BannerFormatter::new().format(&summary, "create a table and a page");
        insta::assert_snapshot!(text, @r"
SKILL ACTIVATION: read the skill documentation before answering.

Load each file below in full, including every resource file it references:
- skills/core/SKILL.md
- skills/nav/SKILL.md

Reminders:
  Check object ID ranges

Skill status:
  core (design) - Activated
  nav - Dependency (required by core)

  Completed: testing

Follow the documented workflow and rules of every active skill. Do not skip phases or substitute your own approach.

Active skills: core, nav

USER REQUEST:
create a table and a page
");
    }

    #[test]
    fn optional_sections_are_omitted() {
        let summary = ActivationSummary {
            skills: vec![entry("core", DisplayStatus::Active)],
            completed: Vec::new(),
            skills_path: ".claude/skills".into(),
        };
        let text = BannerFormatter::new().format(&summary, "hi");
        assert!(!text.contains("Reminders:"));
        assert!(!text.contains("Completed:"));
        assert!(text.contains("- .claude/skills/core/SKILL.md"));
        assert!(text.contains("  core - Active\n"));
        assert!(text.ends_with("USER REQUEST:\nhi"));
    }

    #[test]
    fn input_is_kept_verbatim() {
        let summary = ActivationSummary {
            skills: vec![entry("core", DisplayStatus::Active)],
            completed: Vec::new(),
            skills_path: "skills".into(),
        };
        let input = "line one\n  line two {braces}";
        assert!(BannerFormatter.format(&summary, input).ends_with(input));
    }
}
