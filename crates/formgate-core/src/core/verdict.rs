// crates/formgate-core/src/core/verdict.rs
// ============================================================================
// Module: FormGate Verdicts
// Description: Per-field and per-form validation outcomes.
// Purpose: Package error lists with their derived validity flags.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Verdicts are produced fresh on every evaluation and never stored inside a
//! rule set. Validity is always derived from the error list, so a verdict can
//! not disagree with its own errors. Verdicts are output-only and do not
//! implement `Deserialize`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::identifiers::FieldId;

// ============================================================================
// SECTION: Field Verdict
// ============================================================================

/// Outcome of validating one value against one rule set.
///
/// # Invariants
/// - `is_valid == errors.is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    /// Error messages in check order.
    errors: Vec<String>,
    /// Derived validity flag.
    is_valid: bool,
}

impl ValidationVerdict {
    /// Builds a verdict from an ordered error list.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        let is_valid = errors.is_empty();
        Self {
            errors,
            is_valid,
        }
    }

    /// Returns a verdict with no errors.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            errors: Vec::new(),
            is_valid: true,
        }
    }

    /// Returns the error messages in check order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns true when no error fired.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }
}

/// Verdict for one field in a form-wide pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldVerdict {
    /// Field the verdict belongs to.
    pub field_id: FieldId,
    /// Whether the rule set's conditions activated validation.
    pub gated_in: bool,
    /// Validation outcome.
    #[serde(flatten)]
    pub verdict: ValidationVerdict,
}

// ============================================================================
// SECTION: Form Verdict
// ============================================================================

/// Outcome of validating every rule-bearing field of a form.
///
/// # Invariants
/// - `can_submit` is true exactly when every field verdict is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormVerdict {
    /// Field verdicts in component order.
    fields: Vec<FieldVerdict>,
    /// Derived submission gate.
    can_submit: bool,
}

impl FormVerdict {
    /// Builds a form verdict from field verdicts.
    #[must_use]
    pub fn from_fields(fields: Vec<FieldVerdict>) -> Self {
        let can_submit = fields.iter().all(|field| field.verdict.is_valid());
        Self {
            fields,
            can_submit,
        }
    }

    /// Returns the field verdicts in component order.
    #[must_use]
    pub fn fields(&self) -> &[FieldVerdict] {
        &self.fields
    }

    /// Returns the verdict for a field, if it carries a rule set.
    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&FieldVerdict> {
        self.fields.iter().find(|field| &field.field_id == id)
    }

    /// Returns true when every field is valid.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.can_submit
    }

    /// Returns the number of invalid fields.
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.fields.iter().filter(|field| !field.verdict.is_valid()).count()
    }
}
