//! End-to-end scenarios driving a session from on-disk configuration.

use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::{Value, json};

use skillcue_settings::{load_lifecycle_rules, load_skill_rules};
use skillcue_skills::{
    ActivationKind, ConversationSession, DeactivationReason, DependencyResolver, DisplayStatus,
    JsonFileStore, Processed, RuleStore, SkillLifecycle, StateStore,
};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap() + TimeDelta::seconds(secs)
}

fn write(dir: &Path, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// `core` (keywords table/page, needs `nav`), `nav`, and `testing`.
fn rules_from_disk(dir: &Path, core_lifecycle: Value) -> RuleStore {
    let skill_rules = write(
        dir,
        "skill-rules.json",
        &json!({
            "globalSettings": {"skillsPath": ".claude/skills"},
            "rules": {
                "core": {
                    "priority": "high",
                    "promptTriggers": {"keywords": ["table", "page"]},
                    "lifecycle": core_lifecycle,
                    "dependencies": ["nav"],
                    "reminder": "Check object ID ranges"
                },
                "nav": {
                    "priority": "critical",
                    "promptTriggers": {"keywords": ["symbol", "navigate"]}
                },
                "testing": {
                    "priority": "low",
                    "promptTriggers": {"intentPatterns": ["write\\s+tests?"]}
                }
            }
        }),
    );
    let lifecycle_rules = write(
        dir,
        "lifecycle-rules.json",
        &json!({"completionSignals": {"core": ["phase 6 complete", "(unclosed"]}}),
    );

    RuleStore::from_config(
        &load_skill_rules(&skill_rules).unwrap(),
        &load_lifecycle_rules(&lifecycle_rules).unwrap(),
    )
}

fn lifecycle(rules: RuleStore) -> SkillLifecycle {
    SkillLifecycle::new(rules, skillcue_skills::ConversationState::new())
}

#[test]
fn single_keyword_stays_dormant_two_keywords_activate_with_dependency() {
    let dir = tempfile::tempdir().unwrap();
    let mut lc = lifecycle(rules_from_disk(dir.path(), json!({})));

    let report = lc.apply("create a table", at(0));
    assert!(report.activated.is_empty());
    assert!(lc.state().active_skills.is_empty());

    let report = lc.apply("create a table and a page", at(1));
    assert_eq!(report.activation("core").unwrap().kind, ActivationKind::New);
    assert_eq!(
        report.activation("nav").unwrap().kind,
        ActivationKind::Dependency {
            required_by: "core".into()
        }
    );
    let core = &lc.state().active_skills["core"];
    assert!((core.relevance_score - 0.4).abs() < 1e-9);
    assert_eq!(lc.state().active_skills["nav"].relevance_score, 0.0);
}

#[test]
fn completion_signal_completes_and_invalid_signal_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut lc = lifecycle(rules_from_disk(dir.path(), json!({})));
    let _ = lc.apply("table page", at(0));

    let report = lc.apply("(unclosed", at(1));
    assert!(report.deactivated.is_empty());

    let report = lc.apply("Phase 6 complete", at(2));
    assert!(report.was_deactivated("core", DeactivationReason::Completed));
    assert!(!lc.state().is_active("core"));
    assert_eq!(lc.state().completed_skills, vec!["core"]);
    assert!(lc.state().is_active("nav"));
}

#[test]
fn auto_reactivate_decides_return_from_completed() {
    for (auto_reactivate, expect_active) in [(true, true), (false, false)] {
        let dir = tempfile::tempdir().unwrap();
        let mut lc = lifecycle(rules_from_disk(
            dir.path(),
            json!({"autoReactivate": auto_reactivate}),
        ));
        let _ = lc.apply("table page", at(0));
        let _ = lc.apply("phase 6 complete", at(1));
        let report = lc.apply("another table page", at(2));

        assert_eq!(lc.state().is_active("core"), expect_active, "{auto_reactivate}");
        assert_eq!(lc.state().is_completed("core"), !expect_active);
        if expect_active {
            assert_eq!(
                report.activation("core").unwrap().kind,
                ActivationKind::Reactivated
            );
        }
    }
}

#[test]
fn idle_timeout_suspends_without_completing() {
    for timeout in [json!(60_000), json!(60_000.0)] {
        let dir = tempfile::tempdir().unwrap();
        let core_lifecycle = json!({"idleTimeout": timeout.clone()});
        let mut lc = lifecycle(rules_from_disk(dir.path(), core_lifecycle));
        assert_eq!(lc.rules().len(), 3, "{timeout}");
        let _ = lc.apply("table page", at(0));

        let report = lc.apply("symbol", at(60));
        assert!(report.deactivated.is_empty(), "{timeout}");

        let report = lc.apply("symbol", at(121));
        assert!(report.was_deactivated("core", DeactivationReason::IdleTimeout), "{timeout}");
        assert!(!lc.state().is_active("core"));
        assert!(!lc.state().is_completed("core"));
    }
}

#[test]
fn repeated_input_only_bumps_usage() {
    let dir = tempfile::tempdir().unwrap();
    let mut lc = lifecycle(rules_from_disk(dir.path(), json!({})));
    let _ = lc.apply("table page", at(0));
    let names: Vec<String> = lc.state().active_skills.keys().cloned().collect();

    let report = lc.apply("table page", at(5));
    assert!(report.is_empty());
    assert_eq!(
        lc.state().active_skills.keys().cloned().collect::<Vec<_>>(),
        names
    );
    assert_eq!(lc.state().active_skills["core"].usage_count, 2);
    assert_eq!(lc.state().active_skills["nav"].usage_count, 1);
}

#[test]
fn mutual_dependency_resolves_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "skill-rules.json",
        &json!({"rules": {"A": {"dependencies": ["B"]}, "B": {"dependencies": ["A"]}}}),
    );
    let rules = RuleStore::from_config(&load_skill_rules(&path).unwrap(), &Default::default());
    let resolver = DependencyResolver::new(&rules);
    assert!(resolver.resolve("A").is_empty());
    assert!(resolver.resolve("B").is_empty());
}

#[test]
fn off_domain_input_never_creates_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let rules = rules_from_disk(dir.path(), json!({}));
    let state_path = dir.path().join("state/conversation-state.json");
    let mut session = ConversationSession::open(rules, JsonFileStore::new(&state_path));

    assert_eq!(session.process("what is the weather", at(0)), Processed::Passthrough);
    assert!(!state_path.exists());
}

#[test]
fn directive_orders_by_priority_and_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state/conversation-state.json");

    let mut session = ConversationSession::open(
        rules_from_disk(dir.path(), json!({})),
        JsonFileStore::new(&state_path),
    );
    let Processed::Directive(summary) = session.process("create a table and a page", at(0)) else {
        panic!("expected a directive");
    };
    assert_eq!(summary.names(), vec!["nav", "core"]);
    assert_eq!(summary.skills[1].status, DisplayStatus::Activated);
    assert_eq!(summary.skills_path, ".claude/skills");

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(&state_path).unwrap()).unwrap();
    assert_eq!(raw["activeSkills"]["nav"]["activatedByDependency"], "core");
    assert_eq!(raw["conversationContext"], "bc-development");

    let mut resumed = ConversationSession::open(
        rules_from_disk(dir.path(), json!({})),
        JsonFileStore::new(&state_path),
    );
    assert_eq!(
        resumed.state().conversation_id,
        JsonFileStore::new(&state_path).load().unwrap().unwrap().conversation_id
    );
    let text = resumed.process_input("write tests for the table");
    assert!(text.contains("  core - Active"));
    assert!(text.contains("  testing - Activated"));
    assert!(text.contains("Reminders:\n  Check object ID ranges"));
    assert!(text.ends_with("USER REQUEST:\nwrite tests for the table"));
}
