// crates/formgate-core/tests/lint.rs
// ============================================================================
// Module: Structural Lint Tests
// Description: Issues reported for misconfigured rule sets and forms.
// Purpose: Ensure every lint kind is detected and reported once.
// Dependencies: formgate-core, serde_json
// ============================================================================

//! Structural lint tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use formgate_core::Component;
use formgate_core::ComponentTree;
use formgate_core::Condition;
use formgate_core::EngineLimits;
use formgate_core::FieldId;
use formgate_core::LintKind;
use formgate_core::OperatorKind;
use formgate_core::ValidationRuleSet;
use formgate_core::lint_component_tree;
use formgate_core::lint_rule_set;
use serde_json::json;
use support::TestResult;
use support::condition;
use support::grouped;

fn kinds(field: &str, rules: &ValidationRuleSet) -> Vec<LintKind> {
    lint_rule_set(&FieldId::from(field), rules, &EngineLimits::default())
        .into_iter()
        .map(|issue| issue.kind)
        .collect()
}

#[test]
fn clean_rule_set_has_no_issues() {
    let rules = ValidationRuleSet {
        required: true,
        pattern: Some("^[0-9]+$".to_string()),
        conditions: vec![
            grouped("a", "equals", json!("x"), "Group 1"),
            condition("b", "isChecked", json!(null)),
        ],
        condition_groups: vec!["Group 1".to_string()],
        ..ValidationRuleSet::default()
    };
    assert!(kinds("field", &rules).is_empty());
}

#[test]
fn undeclared_and_duplicate_groups() {
    let rules = ValidationRuleSet {
        conditions: vec![grouped("a", "equals", json!("x"), "ghost")],
        condition_groups: vec!["G".to_string(), "G".to_string(), "G".to_string()],
        ..ValidationRuleSet::default()
    };
    assert_eq!(kinds("field", &rules), vec![
        LintKind::DuplicateGroup { group: "G".to_string() },
        LintKind::UndeclaredGroup { index: 0, group: "ghost".to_string() },
    ]);
}

#[test]
fn operator_issues() {
    let rules = ValidationRuleSet {
        conditions: vec![
            Condition::new("a", OperatorKind::Contains, None),
            Condition::new("a", OperatorKind::IsEmpty, None),
            Condition::new("a", OperatorKind::parse("between"), None),
        ],
        ..ValidationRuleSet::default()
    };
    assert_eq!(kinds("field", &rules), vec![
        LintKind::MissingComparand { index: 0, operator: "contains".to_string() },
        LintKind::UnknownOperator { index: 2, operator: "between".to_string() },
    ]);
}

#[test]
fn self_reference_and_bad_pattern() {
    let rules = ValidationRuleSet {
        pattern: Some("[".to_string()),
        conditions: vec![condition("field", "equals", json!("x"))],
        ..ValidationRuleSet::default()
    };
    let found = kinds("field", &rules);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0], LintKind::SelfReference { index: 0 });
    assert!(matches!(found[1], LintKind::InvalidPattern { .. }));
}

#[test]
fn tree_lint_reports_unknown_targets_and_duplicate_ids() {
    let tree = ComponentTree::new(vec![
        Component::new("a", "input"),
        Component::new("a", "input"),
        Component::new("b", "input").with_rules(ValidationRuleSet {
            conditions: vec![
                condition("a", "equals", json!("x")),
                condition("", "equals", json!("")),
            ],
            ..ValidationRuleSet::default()
        }),
    ]);
    let issues = lint_component_tree(&tree, &EngineLimits::default());
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].field_id.as_str(), "a");
    assert_eq!(issues[0].kind, LintKind::DuplicateFieldId);
    assert_eq!(issues[1].kind, LintKind::UnknownTarget { index: 1, target_id: FieldId::default() });
}

#[test]
fn issues_serialize_with_kind_tag() -> TestResult {
    let tree = ComponentTree::new(vec![Component::new("b", "input").with_rules(ValidationRuleSet {
        conditions: vec![condition("zzz", "equals", json!(1))],
        ..ValidationRuleSet::default()
    })]);
    let issues = lint_component_tree(&tree, &EngineLimits::default());
    let value = serde_json::to_value(&issues)?;
    assert_eq!(
        value,
        json!([{"fieldId": "b", "kind": "unknown_target", "index": 0, "target_id": "zzz"}])
    );
    assert_eq!(issues[0].to_string(), "b: condition 0 targets unknown field \"zzz\"");
    Ok(())
}
