// crates/formgate-core/src/core/mod.rs
// ============================================================================
// Module: FormGate Core Types
// Description: Data model for rule sets, component trees, contexts, and verdicts.
// Purpose: Provide the serializable types consumed and produced by the engine.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe *what* is validated. They carry no evaluation logic
//! beyond simple accessors and the rule-set authoring operations; evaluation
//! lives in [`crate::runtime`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod authoring;
pub mod component;
pub mod context;
pub mod defaults;
pub mod identifiers;
pub mod rules;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use authoring::AuthoringError;
pub use authoring::ConditionEdit;
pub use component::Component;
pub use component::ComponentProperties;
pub use component::ComponentTree;
pub use component::Position;
pub use context::FormContext;
pub use defaults::default_rules_for_input;
pub use defaults::library_default_rules;
pub use identifiers::FieldId;
pub use rules::Condition;
pub use rules::INVALID_FORMAT;
pub use rules::OperatorKind;
pub use rules::ValidationRuleSet;
pub use verdict::FieldVerdict;
pub use verdict::FormVerdict;
pub use verdict::ValidationVerdict;
