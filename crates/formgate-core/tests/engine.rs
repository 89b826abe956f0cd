// crates/formgate-core/tests/engine.rs
// ============================================================================
// Module: Validation Engine Tests
// Description: Form-wide validation, limits, strict structure, and auditing.
// Purpose: Ensure the form pass gates submission and respects its limits.
// Dependencies: formgate-core, serde_json
// ============================================================================

//! Form-wide validation pass tests.

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

use std::sync::Arc;

use formgate_core::Component;
use formgate_core::ComponentTree;
use formgate_core::CustomValidatorRegistry;
use formgate_core::EngineLimits;
use formgate_core::FieldId;
use formgate_core::FormContext;
use formgate_core::ValidationEngine;
use formgate_core::ValidationError;
use formgate_core::ValidationRuleSet;
use formgate_core::audit::EVENT_CUSTOM_VALIDATOR_MISSING;
use formgate_core::audit::EVENT_FIELD_VALIDATED;
use formgate_core::audit::EVENT_FORM_VALIDATED;
use serde_json::json;
use support::CapturingAuditSink;
use support::TestResult;
use support::condition;
use support::context;

fn required() -> ValidationRuleSet {
    ValidationRuleSet {
        required: true,
        ..ValidationRuleSet::default()
    }
}

fn subscription_form() -> ComponentTree {
    ComponentTree::new(vec![
        Component::new("heading", "text"),
        Component::new("subscribe", "checkbox"),
        Component::new("email", "input").with_rules(ValidationRuleSet {
            required: true,
            email: true,
            conditions: vec![condition("subscribe", "isChecked", json!(null))],
            ..ValidationRuleSet::default()
        }),
        Component::new("name", "input").with_rules(required()),
    ])
}

// ============================================================================
// SECTION: Form Pass
// ============================================================================

#[test]
fn form_pass_covers_rule_bearing_components_only() -> TestResult {
    let engine = ValidationEngine::new();
    let ctx = context(&[("name", json!("Ada"))]);
    let verdict = engine.validate_form(&subscription_form(), &ctx)?;
    let ids: Vec<&str> = verdict.fields().iter().map(|field| field.field_id.as_str()).collect();
    assert_eq!(ids, vec!["email", "name"]);
    assert!(verdict.can_submit());
    let email = verdict.field(&FieldId::from("email")).unwrap();
    assert!(!email.gated_in);
    assert!(email.verdict.is_valid());
    Ok(())
}

#[test]
fn gated_in_field_blocks_submission() -> TestResult {
    let engine = ValidationEngine::new();
    let ctx = context(&[("name", json!("Ada")), ("subscribe", json!(true)), ("email", json!("ada"))]);
    let verdict = engine.validate_form(&subscription_form(), &ctx)?;
    assert!(!verdict.can_submit());
    assert_eq!(verdict.invalid_count(), 1);
    let email = verdict.field(&FieldId::from("email")).unwrap();
    assert!(email.gated_in);
    assert_eq!(email.verdict.errors(), ["Must be a valid email address"]);
    Ok(())
}

#[test]
fn form_verdict_serializes_camel_case() -> TestResult {
    let engine = ValidationEngine::new();
    let verdict = engine.validate_form(&subscription_form(), &FormContext::new())?;
    let value = serde_json::to_value(&verdict)?;
    assert_eq!(value["canSubmit"], json!(false));
    assert_eq!(value["fields"][1]["fieldId"], json!("name"));
    assert_eq!(value["fields"][1]["isValid"], json!(false));
    assert_eq!(value["fields"][1]["errors"], json!(["This field is required"]));
    assert_eq!(value["fields"][0]["gatedIn"], json!(false));
    Ok(())
}

#[test]
fn empty_form_can_submit() -> TestResult {
    let verdict = ValidationEngine::new().validate_form(&ComponentTree::default(), &FormContext::new())?;
    assert!(verdict.can_submit());
    assert!(verdict.fields().is_empty());
    Ok(())
}

#[test]
fn component_tree_deserializes_template_shape() -> TestResult {
    let tree: ComponentTree = serde_json::from_value(json!([
        {"id": 1, "type": "checkbox", "properties": {"label": "Subscribe"}},
        {
            "id": 2,
            "type": "input",
            "properties": {
                "label": "Email",
                "placeholder": "you@example.com",
                "validation": {
                    "required": true,
                    "conditions": [{"targetId": 1, "operator": "isChecked"}]
                }
            },
            "position": {"x": 10, "y": 20}
        }
    ]))?;
    let ctx = context(&[("1", json!(true))]);
    let verdict = ValidationEngine::new().validate_form(&tree, &ctx)?;
    assert_eq!(verdict.fields().len(), 1);
    assert_eq!(verdict.fields()[0].verdict.errors(), ["This field is required"]);
    let placeholder = &tree.components()[1].properties.extra["placeholder"];
    assert_eq!(placeholder, &json!("you@example.com"));
    Ok(())
}

// ============================================================================
// SECTION: Limits
// ============================================================================

#[test]
fn too_many_components_is_rejected() {
    let limits = EngineLimits {
        max_components: 2,
        ..EngineLimits::default()
    };
    let engine = ValidationEngine::new().with_limits(limits);
    let err = engine.validate_form(&subscription_form(), &FormContext::new()).unwrap_err();
    assert!(matches!(err, ValidationError::TooManyComponents { len: 4, limit: 2 }));
}

#[test]
fn too_many_conditions_is_rejected() {
    let limits = EngineLimits {
        max_conditions_per_field: 0,
        ..EngineLimits::default()
    };
    let engine = ValidationEngine::new().with_limits(limits);
    let err = engine.validate_form(&subscription_form(), &FormContext::new()).unwrap_err();
    match err {
        ValidationError::TooManyConditions { field_id, len, limit } => {
            assert_eq!(field_id.as_str(), "email");
            assert_eq!((len, limit), (1, 0));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn long_pattern_is_rejected() {
    let limits = EngineLimits {
        max_pattern_length: 4,
        ..EngineLimits::default()
    };
    let engine = ValidationEngine::new().with_limits(limits);
    let rules = ValidationRuleSet {
        pattern: Some("^[0-9]+$".to_string()),
        ..ValidationRuleSet::default()
    };
    let err = engine.validate_rules(Some(&json!("1")), &rules, &FormContext::new()).unwrap_err();
    assert!(matches!(err, ValidationError::PatternTooLong { len: 8, limit: 4 }));
}

#[test]
fn gated_off_field_skips_pattern_compilation() -> TestResult {
    let tree = ComponentTree::new(vec![Component::new("code", "input").with_rules(ValidationRuleSet {
        pattern: Some("(".to_string()),
        conditions: vec![condition("toggle", "isChecked", json!(null))],
        ..ValidationRuleSet::default()
    })]);
    let verdict = ValidationEngine::new().validate_form(&tree, &FormContext::new())?;
    assert!(verdict.can_submit());
    let err = ValidationEngine::new()
        .validate_form(&tree, &context(&[("toggle", json!(true))]))
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidPattern { .. }));
    Ok(())
}

#[test]
fn lookahead_pattern_field_yields_a_verdict() -> TestResult {
    let tree = ComponentTree::new(vec![Component::new("password", "input").with_rules(ValidationRuleSet {
        pattern: Some("^(?=.*[0-9]).{8,}$".to_string()),
        pattern_error: Some("needs a digit".to_string()),
        ..ValidationRuleSet::default()
    })]);
    let engine = ValidationEngine::new();
    let verdict = engine.validate_form(&tree, &context(&[("password", json!("password"))]))?;
    assert!(!verdict.can_submit());
    let field = verdict.field(&FieldId::from("password")).unwrap();
    assert_eq!(field.verdict.errors(), ["needs a digit"]);
    let verdict = engine.validate_form(&tree, &context(&[("password", json!("password1"))]))?;
    assert!(verdict.can_submit());
    Ok(())
}

// ============================================================================
// SECTION: Pattern Cache
// ============================================================================

fn pattern(source: &str) -> ValidationRuleSet {
    ValidationRuleSet {
        pattern: Some(source.to_string()),
        ..ValidationRuleSet::default()
    }
}

#[test]
fn compiled_patterns_are_reused_across_calls_and_clones() -> TestResult {
    let engine = ValidationEngine::new();
    let ctx = FormContext::new();
    engine.validate_rules(Some(&json!("1")), &pattern("^[0-9]+$"), &ctx)?;
    engine.validate_rules(Some(&json!("2")), &pattern("^[0-9]+$"), &ctx)?;
    assert_eq!(engine.pattern_cache().len(), 1);

    let clone = engine.clone();
    clone.validate_rules(Some(&json!("a")), &pattern("^[a-z]+$"), &ctx)?;
    assert_eq!(engine.pattern_cache().len(), 2);
    Ok(())
}

#[test]
fn zero_capacity_disables_pattern_caching() -> TestResult {
    let limits = EngineLimits {
        pattern_cache_capacity: 0,
        ..EngineLimits::default()
    };
    let engine = ValidationEngine::new().with_limits(limits);
    let errors = engine.validate_rules(Some(&json!("x")), &pattern("^[0-9]+$"), &FormContext::new())?;
    assert_eq!(errors, vec!["Invalid format"]);
    assert!(engine.pattern_cache().is_empty());
    Ok(())
}

#[test]
fn full_pattern_cache_starts_over() -> TestResult {
    let limits = EngineLimits {
        pattern_cache_capacity: 2,
        ..EngineLimits::default()
    };
    let engine = ValidationEngine::new().with_limits(limits);
    let ctx = FormContext::new();
    for source in ["^a", "^b", "^c"] {
        engine.validate_rules(Some(&json!("a")), &pattern(source), &ctx)?;
    }
    assert_eq!(engine.pattern_cache().len(), 1);
    Ok(())
}

#[test]
fn invalid_patterns_are_not_cached() {
    let engine = ValidationEngine::new();
    for _ in 0..2 {
        let err = engine.validate_rules(Some(&json!("x")), &pattern("("), &FormContext::new()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPattern { .. }));
    }
    assert!(engine.pattern_cache().is_empty());
}

#[test]
fn cached_pattern_still_honors_length_limit() -> TestResult {
    let engine = ValidationEngine::new();
    engine.validate_rules(Some(&json!("1")), &pattern("^[0-9]+$"), &FormContext::new())?;
    assert_eq!(engine.pattern_cache().len(), 1);
    let limits = EngineLimits {
        max_pattern_length: 4,
        ..EngineLimits::default()
    };
    let engine = engine.with_limits(limits);
    let err = engine.validate_rules(Some(&json!("1")), &pattern("^[0-9]+$"), &FormContext::new()).unwrap_err();
    assert!(matches!(err, ValidationError::PatternTooLong { len: 8, limit: 4 }));
    Ok(())
}

// ============================================================================
// SECTION: Strict Structure
// ============================================================================

#[test]
fn strict_structure_refuses_linted_forms() {
    let tree = ComponentTree::new(vec![Component::new("a", "input").with_rules(ValidationRuleSet {
        conditions: vec![condition("missing", "equals", json!("x"))],
        ..ValidationRuleSet::default()
    })]);
    let lenient = ValidationEngine::new();
    assert!(lenient.validate_form(&tree, &FormContext::new()).is_ok());
    let strict = ValidationEngine::new().with_strict_structure(true);
    let err = strict.validate_form(&tree, &FormContext::new()).unwrap_err();
    match err {
        ValidationError::Structure { issues } => assert_eq!(issues.len(), 1),
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// SECTION: Verdicts
// ============================================================================

#[test]
fn missing_rule_set_is_always_valid() -> TestResult {
    let verdict = ValidationEngine::new().verdict(None, None, &FormContext::new())?;
    assert!(verdict.is_valid());
    assert!(verdict.errors().is_empty());
    Ok(())
}

#[test]
fn verdict_validity_tracks_errors() -> TestResult {
    let verdict = ValidationEngine::new().verdict(None, Some(&required()), &FormContext::new())?;
    assert!(!verdict.is_valid());
    assert_eq!(verdict.errors(), ["This field is required"]);
    Ok(())
}

// ============================================================================
// SECTION: Auditing
// ============================================================================

#[test]
fn form_pass_emits_field_and_form_events() -> TestResult {
    let sink = Arc::new(CapturingAuditSink::default());
    let engine = ValidationEngine::new().with_audit_sink(sink.clone());
    engine.validate_form(&subscription_form(), &context(&[("name", json!("Ada"))]))?;
    assert_eq!(sink.names(), vec![EVENT_FIELD_VALIDATED, EVENT_FIELD_VALIDATED, EVENT_FORM_VALIDATED]);
    let events = sink.events();
    assert_eq!(events[0].field_id.as_ref().map(FieldId::as_str), Some("email"));
    assert_eq!(events[0].gated_in, Some(false));
    assert_eq!(events[2].field_count, Some(2));
    assert_eq!(events[2].can_submit, Some(true));
    assert!(events.iter().all(|event| event.redaction == "values_omitted"));
    Ok(())
}

#[test]
fn missing_custom_predicate_is_audited() -> TestResult {
    let sink = Arc::new(CapturingAuditSink::default());
    let engine = ValidationEngine::new()
        .with_registry(CustomValidatorRegistry::new().with("known", |_value, _context| None))
        .with_audit_sink(sink.clone());
    let tree = ComponentTree::new(vec![Component::new("f", "input").with_rules(ValidationRuleSet {
        custom: Some("unknown".to_string()),
        ..ValidationRuleSet::default()
    })]);
    let verdict = engine.validate_form(&tree, &FormContext::new())?;
    assert!(verdict.can_submit());
    let events = sink.events();
    assert_eq!(events[0].event, EVENT_CUSTOM_VALIDATOR_MISSING);
    assert_eq!(events[0].custom_key.as_deref(), Some("unknown"));
    assert_eq!(events[0].field_id.as_ref().map(FieldId::as_str), Some("f"));
    Ok(())
}

#[test]
fn audit_events_never_carry_values() -> TestResult {
    let sink = Arc::new(CapturingAuditSink::default());
    let engine = ValidationEngine::new().with_audit_sink(sink.clone());
    let ctx = context(&[("name", json!("top-secret-value"))]);
    engine.validate_form(&subscription_form(), &ctx)?;
    for event in sink.events() {
        let line = serde_json::to_string(&event)?;
        assert!(!line.contains("top-secret-value"));
    }
    Ok(())
}
