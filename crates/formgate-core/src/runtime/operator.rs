// crates/formgate-core/src/runtime/operator.rs
// ============================================================================
// Module: FormGate Operator Library
// Description: Comparison operators over a target value and a comparand.
// Purpose: Give every operator one pure, total implementation.
// Dependencies: crate::core, crate::runtime::coerce, serde_json
// ============================================================================

//! ## Overview
//! Operators never fail. Missing targets flow through as unset values and
//! each operator defines its result for them. Unknown operators evaluate to
//! `true`.
//!
//! The emptiness and checked operators are intentionally not complements:
//! `isEmpty` and `isNotEmpty` are both false for nonzero numbers, and `isChecked` and
//! `isNotChecked` are both false for an unset value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::OperatorKind;
use crate::runtime::coerce::is_truthy;
use crate::runtime::coerce::length_of;
use crate::runtime::coerce::strict_equals;
use crate::runtime::coerce::to_display_string;
use crate::runtime::coerce::to_number;

// ============================================================================
// SECTION: Operator Evaluation
// ============================================================================

/// Applies an operator to a target value and comparand.
///
/// Unary operators ignore `comparand`.
#[must_use]
pub fn apply_operator(
    operator: &OperatorKind,
    target: Option<&Value>,
    comparand: Option<&Value>,
) -> bool {
    match operator {
        OperatorKind::Equals => strict_equals(target, comparand),
        OperatorKind::NotEquals => !strict_equals(target, comparand),
        OperatorKind::Contains => contains(target, comparand),
        OperatorKind::NotContains => !contains(target, comparand),
        OperatorKind::GreaterThan => to_number(target) > to_number(comparand),
        OperatorKind::LessThan => to_number(target) < to_number(comparand),
        OperatorKind::IsEmpty => is_empty(target),
        OperatorKind::IsNotEmpty => is_not_empty(target),
        OperatorKind::IsChecked => matches!(target, Some(Value::Bool(true))),
        OperatorKind::IsNotChecked => matches!(target, Some(Value::Bool(false))),
        OperatorKind::Unknown(_) => true,
    }
}

/// Substring test for strings, membership test for arrays.
///
/// Targets without containment support (unset, `null`, numbers, booleans,
/// objects) contain nothing.
fn contains(target: Option<&Value>, comparand: Option<&Value>) -> bool {
    match target {
        Some(Value::String(haystack)) => haystack.contains(to_display_string(comparand).as_ref()),
        Some(Value::Array(items)) => items.iter().any(|item| strict_equals(Some(item), comparand)),
        _ => false,
    }
}

/// Falsy, or length-bearing with length zero.
fn is_empty(target: Option<&Value>) -> bool {
    !is_truthy(target) || length_of(target) == Some(0)
}

/// Truthy and length-bearing with a positive length.
fn is_not_empty(target: Option<&Value>) -> bool {
    is_truthy(target) && length_of(target).is_some_and(|len| len > 0)
}
