// crates/formgate-core/src/core/context.rs
// ============================================================================
// Module: FormGate Form Context
// Description: Snapshot of current field values for one fill session.
// Purpose: Provide read-only value lookups for condition evaluation.
// Dependencies: crate::core::identifiers, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`FormContext`] maps field identifiers to their current values. It is
//! rebuilt on every value change: [`FormContext::with_value`] consumes the
//! snapshot and returns a new one, and no in-place mutation is exposed.
//! Missing entries read as unset (`None`), which is distinct from a stored
//! JSON `null`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::FieldId;

// ============================================================================
// SECTION: Form Context
// ============================================================================

/// Current value snapshot across all fields of a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormContext {
    /// Values keyed by field identifier.
    values: BTreeMap<FieldId, Value>,
}

impl FormContext {
    /// Creates an empty form context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Returns the current value of a field, or `None` when unset.
    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&Value> {
        self.values.get(id)
    }

    /// Returns a new snapshot with one field value replaced.
    #[must_use]
    pub fn with_value(mut self, id: impl Into<FieldId>, value: Value) -> Self {
        self.values.insert(id.into(), value);
        self
    }

    /// Returns a new snapshot with one field cleared back to unset.
    #[must_use]
    pub fn without_value(mut self, id: &FieldId) -> Self {
        self.values.remove(id);
        self
    }

    /// Returns the number of set fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over set fields in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &Value)> {
        self.values.iter()
    }
}

impl<K> FromIterator<(K, Value)> for FormContext
where
    K: Into<FieldId>,
{
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(id, value)| (id.into(), value)).collect(),
        }
    }
}
