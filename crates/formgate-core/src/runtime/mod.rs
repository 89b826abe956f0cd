// crates/formgate-core/src/runtime/mod.rs
// ============================================================================
// Module: FormGate Runtime
// Description: Operators, condition gating, rule checks, lint, and the engine.
// Purpose: Evaluate rule sets against values and form contexts.
// Dependencies: crate::{audit, core}, regress, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Runtime modules build on one another: coercion helpers back the operator
//! library, operators back condition evaluation, conditions back group
//! gating, and gating plus rule checks form the engine's field facade.
//! Every evaluation is a pure function of its explicit inputs.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod coerce;
pub mod condition;
pub mod custom;
pub mod engine;
pub mod error;
pub mod gate;
pub mod lint;
pub mod operator;
pub mod rules;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use condition::evaluate_condition;
pub use custom::CustomValidator;
pub use custom::CustomValidatorRegistry;
pub use engine::DEFAULT_MAX_COMPONENTS;
pub use engine::DEFAULT_MAX_CONDITIONS_PER_FIELD;
pub use engine::DEFAULT_MAX_PATTERN_LENGTH;
pub use engine::DEFAULT_PATTERN_CACHE_CAPACITY;
pub use engine::EngineLimits;
pub use engine::ValidationEngine;
pub use engine::validate_field;
pub use engine::validate_rules;
pub use error::ValidationError;
pub use gate::BucketOutcome;
pub use gate::DEFAULT_GROUP;
pub use gate::GateEvaluation;
pub use gate::evaluate_gate;
pub use gate::should_validate;
pub use lint::LintIssue;
pub use lint::LintKind;
pub use lint::lint_component_tree;
pub use lint::lint_rule_set;
pub use operator::apply_operator;
pub use rules::EMAIL_MESSAGE;
pub use rules::PatternCache;
pub use rules::REQUIRED_MESSAGE;
pub use rules::RuleReport;
pub use rules::URL_MESSAGE;
pub use rules::check_rules;
pub use rules::compile_pattern;
