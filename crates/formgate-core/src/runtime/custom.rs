// crates/formgate-core/src/runtime/custom.rs
// ============================================================================
// Module: FormGate Custom Validators
// Description: Registry of named custom predicates referenced by rule sets.
// Purpose: Resolve `custom` rule keys to host-supplied checks.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! Rule sets reference custom checks by key. The host registers a predicate
//! per key; a predicate returns `Some(message)` to fail the field and `None`
//! to pass. Predicates see the field value and the full form context so they
//! can express cross-field checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::core::FormContext;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Custom predicate: `Some(message)` fails the field.
pub type CustomValidator = Arc<dyn Fn(Option<&Value>, &FormContext) -> Option<String> + Send + Sync>;

/// Named custom predicates.
#[derive(Clone, Default)]
pub struct CustomValidatorRegistry {
    /// Predicates keyed by rule-set `custom` key.
    validators: BTreeMap<String, CustomValidator>,
}

impl CustomValidatorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a predicate, replacing any previous one under the key.
    pub fn register<F>(&mut self, key: impl Into<String>, validator: F)
    where
        F: Fn(Option<&Value>, &FormContext) -> Option<String> + Send + Sync + 'static,
    {
        self.validators.insert(key.into(), Arc::new(validator));
    }

    /// Returns the registry with a predicate registered.
    #[must_use]
    pub fn with<F>(mut self, key: impl Into<String>, validator: F) -> Self
    where
        F: Fn(Option<&Value>, &FormContext) -> Option<String> + Send + Sync + 'static,
    {
        self.register(key, validator);
        self
    }

    /// Looks up a predicate by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CustomValidator> {
        self.validators.get(key)
    }

    /// Returns true when a predicate is registered under the key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.validators.contains_key(key)
    }

    /// Returns registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Returns the number of registered predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true when no predicate is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for CustomValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidatorRegistry")
            .field("keys", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}
