// crates/formgate-core/src/core/identifiers.rs
// ============================================================================
// Module: FormGate Identifiers
// Description: Opaque identifiers for placed template components.
// Purpose: Provide a strongly typed field identifier with a stable string form.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Field identifiers name one placed component instance within a template.
//! Templates persist them either as strings or as numbers; both forms
//! normalize to the same canonical string so `5` and `"5"` address the same
//! form-context entry. Identifiers always serialize as strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Number;

// ============================================================================
// SECTION: Field Identifier
// ============================================================================

/// Identifier of a placed field within a template.
///
/// # Invariants
/// - Numeric identifiers are stored in their canonical decimal string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Creates a new field identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the identifier is empty (an unassigned condition target).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FieldId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<u64> for FieldId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Wire forms accepted for field identifiers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldId {
    /// String identifier.
    Text(String),
    /// Numeric identifier assigned at placement time.
    Number(Number),
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawFieldId::deserialize(deserializer)? {
            RawFieldId::Text(text) => Ok(Self(text)),
            RawFieldId::Number(number) => Ok(Self(number.to_string())),
        }
    }
}
