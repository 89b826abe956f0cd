// crates/formgate-core/tests/authoring.rs
// ============================================================================
// Module: Rule Set Authoring Tests
// Description: Condition and group editing operations.
// Purpose: Keep group bookkeeping consistent under edits.
// Dependencies: formgate-core, serde_json
// ============================================================================

//! Rule set authoring tests.

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

use formgate_core::AuthoringError;
use formgate_core::ConditionEdit;
use formgate_core::FieldId;
use formgate_core::OperatorKind;
use formgate_core::ValidationRuleSet;
use formgate_core::library_default_rules;
use serde_json::json;

#[test]
fn add_condition_appends_blank_equals_condition() -> Result<(), AuthoringError> {
    let mut rules = ValidationRuleSet::default();
    let index = rules.add_condition(None)?;
    assert_eq!(index, 0);
    let condition = &rules.conditions[0];
    assert!(condition.target_id.is_empty());
    assert_eq!(condition.operator, OperatorKind::Equals);
    assert_eq!(condition.value, Some(json!("")));
    assert_eq!(condition.group, None);
    Ok(())
}

#[test]
fn add_condition_into_declared_group() -> Result<(), AuthoringError> {
    let mut rules = ValidationRuleSet::default();
    let group = rules.add_condition_group();
    assert_eq!(group, "Group 1");
    let index = rules.add_condition(Some(&group))?;
    assert_eq!(rules.conditions[index].group_label(), Some("Group 1"));
    assert_eq!(
        rules.add_condition(Some("Group 9")),
        Err(AuthoringError::UnknownGroup("Group 9".to_string()))
    );
    Ok(())
}

#[test]
fn update_condition_applies_single_field_edits() -> Result<(), AuthoringError> {
    let mut rules = ValidationRuleSet::default();
    rules.add_condition(None)?;
    rules.update_condition(0, ConditionEdit::Target(FieldId::from("country")))?;
    rules.update_condition(0, ConditionEdit::Operator(OperatorKind::NotEquals))?;
    rules.update_condition(0, ConditionEdit::Value(Some(json!("US"))))?;
    let condition = &rules.conditions[0];
    assert_eq!(condition.target_id.as_str(), "country");
    assert_eq!(condition.operator, OperatorKind::NotEquals);
    assert_eq!(condition.value, Some(json!("US")));
    assert_eq!(
        rules.update_condition(3, ConditionEdit::Value(None)),
        Err(AuthoringError::ConditionOutOfRange { index: 3, len: 1 })
    );
    Ok(())
}

#[test]
fn remove_condition_returns_removed_entry() -> Result<(), AuthoringError> {
    let mut rules = ValidationRuleSet::default();
    rules.add_condition(None)?;
    rules.add_condition(None)?;
    rules.update_condition(1, ConditionEdit::Target(FieldId::from("b")))?;
    let removed = rules.remove_condition(0)?;
    assert!(removed.target_id.is_empty());
    assert_eq!(rules.conditions.len(), 1);
    assert_eq!(rules.conditions[0].target_id.as_str(), "b");
    assert_eq!(
        rules.remove_condition(1).map(|_| ()),
        Err(AuthoringError::ConditionOutOfRange { index: 1, len: 1 })
    );
    Ok(())
}

#[test]
fn group_names_skip_labels_already_declared() {
    let mut rules = ValidationRuleSet {
        condition_groups: vec!["Group 2".to_string()],
        ..ValidationRuleSet::default()
    };
    assert_eq!(rules.add_condition_group(), "Group 3");
    assert_eq!(rules.add_condition_group(), "Group 4");
    assert_eq!(rules.condition_groups, vec!["Group 2", "Group 3", "Group 4"]);
}

#[test]
fn remove_group_cascades_to_its_conditions() -> Result<(), AuthoringError> {
    let mut rules = ValidationRuleSet::default();
    let first = rules.add_condition_group();
    let second = rules.add_condition_group();
    rules.add_condition(Some(&first))?;
    rules.add_condition(None)?;
    rules.add_condition(Some(&first))?;
    rules.add_condition(Some(&second))?;
    assert_eq!(rules.remove_condition_group(&first)?, 2);
    assert_eq!(rules.condition_groups, vec![second.clone()]);
    assert_eq!(rules.conditions.len(), 2);
    assert_eq!(rules.conditions_in(None).count(), 1);
    let tagged: Vec<usize> = rules.conditions_in(Some(&second)).map(|(index, _)| index).collect();
    assert_eq!(tagged, vec![1]);
    assert_eq!(
        rules.remove_condition_group(&first),
        Err(AuthoringError::UnknownGroup(first))
    );
    Ok(())
}

#[test]
fn library_defaults_for_dropped_components() {
    assert_eq!(library_default_rules("input").and_then(|rules| rules.max_length), Some(100));
    assert_eq!(library_default_rules("textarea").and_then(|rules| rules.max_length), Some(1000));
    assert_eq!(library_default_rules("select"), Some(ValidationRuleSet::default()));
    assert_eq!(library_default_rules("heading"), None);
}

#[test]
fn rule_set_round_trips_editor_json() -> Result<(), serde_json::Error> {
    let raw = json!({
        "required": true,
        "minLength": 2,
        "pattern": "^[a-z]+$",
        "patternError": "lowercase only",
        "conditions": [
            {"targetId": "kind", "operator": "equals", "value": "person", "group": "Group 1"}
        ],
        "conditionGroups": ["Group 1"]
    });
    let rules: ValidationRuleSet = serde_json::from_value(raw.clone())?;
    assert_eq!(rules.min_length, Some(2));
    assert_eq!(rules.pattern_message(), "lowercase only");
    assert_eq!(serde_json::to_value(&rules)?, raw);
    Ok(())
}
