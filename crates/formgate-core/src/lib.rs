// crates/formgate-core/src/lib.rs
// ============================================================================
// Module: FormGate Core Library
// Description: Public API surface for conditional form validation.
// Purpose: Expose the rule-set model, evaluation runtime, and audit sinks.
// Dependencies: crate::{audit, core, runtime}
// ============================================================================

//! ## Overview
//! FormGate core decides, for each field of a form, whether its validation
//! rules are active given the other fields' current values, and which rule
//! checks fail. Rule sets are plain serde data attached to placed components;
//! evaluation takes the component tree and form context as explicit inputs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ValidationAuditEvent;
pub use audit::ValidationAuditSink;
pub use runtime::CustomValidator;
pub use runtime::CustomValidatorRegistry;
pub use runtime::EngineLimits;
pub use runtime::GateEvaluation;
pub use runtime::LintIssue;
pub use runtime::LintKind;
pub use runtime::PatternCache;
pub use runtime::ValidationEngine;
pub use runtime::ValidationError;
pub use runtime::apply_operator;
pub use runtime::evaluate_condition;
pub use runtime::evaluate_gate;
pub use runtime::lint_component_tree;
pub use runtime::lint_rule_set;
pub use runtime::should_validate;
pub use runtime::validate_field;
pub use runtime::validate_rules;
