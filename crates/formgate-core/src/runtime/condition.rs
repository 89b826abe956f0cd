// crates/formgate-core/src/runtime/condition.rs
// ============================================================================
// Module: FormGate Condition Evaluation
// Description: Evaluates one condition against a form context snapshot.
// Purpose: Bridge condition data to the operator library.
// Dependencies: crate::core, crate::runtime::operator
// ============================================================================

//! ## Overview
//! A condition reads its target from the form context (absent keys read as
//! unset) and applies its operator with the stored comparand.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Condition;
use crate::core::FormContext;
use crate::runtime::operator::apply_operator;

// ============================================================================
// SECTION: Condition Evaluation
// ============================================================================

/// Evaluates a condition against the current form values.
#[must_use]
pub fn evaluate_condition(condition: &Condition, context: &FormContext) -> bool {
    apply_operator(&condition.operator, context.get(&condition.target_id), condition.value.as_ref())
}
