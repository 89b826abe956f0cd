// crates/formgate-core/src/core/rules.rs
// ============================================================================
// Module: FormGate Rule Sets
// Description: Declarative validation rules and conditional gating data.
// Purpose: Define operators, conditions, and the per-field rule set model.
// Dependencies: crate::core::identifiers, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ValidationRuleSet`] is attached to a field's properties and serializes
//! in the camelCase shape the template editor persists. Conditions are kept
//! as a flat list tagged with an optional group label: conditions sharing a
//! label are AND-ed, and labels are OR-ed against each other.
//!
//! An unset comparand is distinct from a JSON `null` comparand; the custom
//! deserializer on [`Condition::value`] preserves that distinction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::FieldId;

// ============================================================================
// SECTION: Operators
// ============================================================================

/// Comparison operator applied by a condition.
///
/// The operator set is closed; names outside it are retained verbatim as
/// [`OperatorKind::Unknown`] so a rule set round-trips without loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperatorKind {
    /// Strict equality.
    #[default]
    Equals,
    /// Strict inequality.
    NotEquals,
    /// Substring or membership containment.
    Contains,
    /// Negated containment.
    NotContains,
    /// Numeric greater-than after coercion.
    GreaterThan,
    /// Numeric less-than after coercion.
    LessThan,
    /// Falsy or zero-length target.
    IsEmpty,
    /// Truthy target with a positive length.
    IsNotEmpty,
    /// Target is exactly `true`.
    IsChecked,
    /// Target is exactly `false`.
    IsNotChecked,
    /// Operator name outside the known set.
    Unknown(String),
}

impl OperatorKind {
    /// All known operators in canonical order.
    pub const KNOWN: [Self; 10] = [
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::NotContains,
        Self::GreaterThan,
        Self::LessThan,
        Self::IsEmpty,
        Self::IsNotEmpty,
        Self::IsChecked,
        Self::IsNotChecked,
    ];

    /// Parses an operator name, falling back to [`OperatorKind::Unknown`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "equals" => Self::Equals,
            "notEquals" => Self::NotEquals,
            "contains" => Self::Contains,
            "notContains" => Self::NotContains,
            "greaterThan" => Self::GreaterThan,
            "lessThan" => Self::LessThan,
            "isEmpty" => Self::IsEmpty,
            "isNotEmpty" => Self::IsNotEmpty,
            "isChecked" => Self::IsChecked,
            "isNotChecked" => Self::IsNotChecked,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the wire name of the operator.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
            Self::IsChecked => "isChecked",
            Self::IsNotChecked => "isNotChecked",
            Self::Unknown(name) => name,
        }
    }

    /// Returns true for operators that ignore the comparand.
    #[must_use]
    pub const fn is_unary(&self) -> bool {
        matches!(self, Self::IsEmpty | Self::IsNotEmpty | Self::IsChecked | Self::IsNotChecked)
    }

    /// Returns true when the operator name is outside the known set.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for OperatorKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for OperatorKind {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<OperatorKind> for String {
    fn from(value: OperatorKind) -> Self {
        match value {
            OperatorKind::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

// ============================================================================
// SECTION: Conditions
// ============================================================================

/// One gating condition evaluated against the form context.
///
/// # Invariants
/// - `group` is unset, empty, or names an entry of the owning rule set's
///   `condition_groups`. Empty labels are equivalent to unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Field whose current value is tested.
    #[serde(default)]
    pub target_id: FieldId,
    /// Operator applied to the target value.
    #[serde(default)]
    pub operator: OperatorKind,
    /// Comparand for binary operators; `None` means unset.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    /// Optional OR-group label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Condition {
    /// Creates an ungrouped condition.
    #[must_use]
    pub fn new(target_id: impl Into<FieldId>, operator: OperatorKind, value: Option<Value>) -> Self {
        Self {
            target_id: target_id.into(),
            operator,
            value,
            group: None,
        }
    }

    /// Returns this condition tagged with the given group label.
    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Returns the effective group label; empty labels count as ungrouped.
    #[must_use]
    pub fn group_label(&self) -> Option<&str> {
        self.group.as_deref().filter(|label| !label.is_empty())
    }
}

/// Deserializes a present value (including JSON `null`) as `Some`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// ============================================================================
// SECTION: Rule Sets
// ============================================================================

/// Declarative validation configuration attached to a field.
///
/// Numeric bounds follow the editor's truthiness convention: a bound of zero
/// is treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRuleSet {
    /// Field must hold a non-empty value.
    #[serde(default)]
    pub required: bool,
    /// Minimum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Enables the email format check.
    #[serde(default, skip_serializing_if = "is_false")]
    pub email: bool,
    /// Enables the URL format check.
    #[serde(default, skip_serializing_if = "is_false")]
    pub url: bool,
    /// Minimum numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular-expression source the value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message reported when `pattern` does not match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_error: Option<String>,
    /// Key of a registered custom predicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    /// Gating conditions.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Declared OR-group labels, in editor order.
    #[serde(default)]
    pub condition_groups: Vec<String>,
}

impl ValidationRuleSet {
    /// Returns the pattern source when one is configured.
    #[must_use]
    pub fn pattern_source(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|pattern| !pattern.is_empty())
    }

    /// Returns the message reported on a pattern mismatch.
    #[must_use]
    pub fn pattern_message(&self) -> &str {
        self.pattern_error.as_deref().filter(|message| !message.is_empty()).unwrap_or(INVALID_FORMAT)
    }

    /// Returns the custom predicate key when one is configured.
    #[must_use]
    pub fn custom_key(&self) -> Option<&str> {
        self.custom.as_deref().filter(|key| !key.is_empty())
    }

    /// Returns true when the rule set carries gating conditions.
    #[must_use]
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }
}

/// Generic message for pattern mismatches without a configured message.
pub const INVALID_FORMAT: &str = "Invalid format";

/// Serde helper to omit false flags.
#[allow(clippy::trivially_copy_pass_by_ref, reason = "Serde skip predicates take references.")]
const fn is_false(flag: &bool) -> bool {
    !*flag
}
