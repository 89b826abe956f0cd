// crates/formgate-core/src/core/defaults.rs
// ============================================================================
// Module: FormGate Default Rule Sets
// Description: Rule sets seeded for freshly placed components.
// Purpose: Keep component-library defaults in one deterministic place.
// Dependencies: crate::core::rules
// ============================================================================

//! ## Overview
//! Two families of defaults exist: per input kind (`email`, `url`, `number`,
//! `phone`) and per component type as dropped from the component library.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::rules::ValidationRuleSet;

// ============================================================================
// SECTION: Input Kind Defaults
// ============================================================================

/// Returns the default rule set for an input kind.
///
/// Unknown kinds yield an empty rule set.
#[must_use]
pub fn default_rules_for_input(kind: &str) -> ValidationRuleSet {
    match kind {
        "email" => ValidationRuleSet {
            required: true,
            email: true,
            ..ValidationRuleSet::default()
        },
        "url" => ValidationRuleSet {
            required: true,
            url: true,
            ..ValidationRuleSet::default()
        },
        "number" => ValidationRuleSet {
            required: true,
            pattern: Some("^[0-9]*$".to_string()),
            pattern_error: Some("Must be a valid number".to_string()),
            ..ValidationRuleSet::default()
        },
        "phone" => ValidationRuleSet {
            required: true,
            pattern: Some("^[0-9]{10}$".to_string()),
            pattern_error: Some("Must be a valid 10-digit phone number".to_string()),
            ..ValidationRuleSet::default()
        },
        _ => ValidationRuleSet::default(),
    }
}

// ============================================================================
// SECTION: Component Library Defaults
// ============================================================================

/// Returns the rule set a component starts with when dropped on the canvas.
///
/// Display and layout components carry no rule set.
#[must_use]
pub fn library_default_rules(component_type: &str) -> Option<ValidationRuleSet> {
    match component_type {
        "input" => Some(ValidationRuleSet {
            max_length: Some(100),
            ..ValidationRuleSet::default()
        }),
        "select" => Some(ValidationRuleSet::default()),
        "textarea" => Some(ValidationRuleSet {
            max_length: Some(1000),
            ..ValidationRuleSet::default()
        }),
        _ => None,
    }
}
