// crates/formgate-core/src/runtime/engine.rs
// ============================================================================
// Module: FormGate Validation Engine
// Description: Field facade and form-wide validation pass.
// Purpose: Combine gating, rule checks, limits, and audit emission.
// Dependencies: crate::{audit, core, runtime}
// ============================================================================

//! ## Overview
//! The engine owns the custom predicate registry, resource limits, and audit
//! sink. A field is validated in two steps: its conditions decide whether the
//! rule set is active, then the rule checks run. A gated-off field is always
//! valid. The form pass applies this to every rule-bearing component with the
//! form context passed explicitly.
//!
//! Security posture: templates are untrusted input; pattern sources are
//! bounded in length, and form size is capped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::audit::NoopAuditSink;
use crate::audit::ValidationAuditEvent;
use crate::audit::ValidationAuditSink;
use crate::core::Component;
use crate::core::ComponentTree;
use crate::core::FieldId;
use crate::core::FieldVerdict;
use crate::core::FormContext;
use crate::core::FormVerdict;
use crate::core::ValidationRuleSet;
use crate::core::ValidationVerdict;
use crate::runtime::custom::CustomValidatorRegistry;
use crate::runtime::error::ValidationError;
use crate::runtime::gate::should_validate;
use crate::runtime::lint::lint_component_tree;
use crate::runtime::rules::PatternCache;
use crate::runtime::rules::check_rules;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum number of components in one form.
pub const DEFAULT_MAX_COMPONENTS: usize = 1024;
/// Default maximum number of conditions on one rule set.
pub const DEFAULT_MAX_CONDITIONS_PER_FIELD: usize = 256;
/// Default maximum pattern source length in bytes.
pub const DEFAULT_MAX_PATTERN_LENGTH: usize = 1024;
/// Default number of compiled patterns kept per engine.
pub const DEFAULT_PATTERN_CACHE_CAPACITY: usize = 256;

/// Resource limits applied during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    /// Maximum components accepted by the form pass.
    pub max_components: usize,
    /// Maximum conditions on one rule set in the form pass.
    pub max_conditions_per_field: usize,
    /// Maximum pattern source length in bytes.
    pub max_pattern_length: usize,
    /// Compiled patterns kept per engine; zero disables caching.
    pub pattern_cache_capacity: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_components: DEFAULT_MAX_COMPONENTS,
            max_conditions_per_field: DEFAULT_MAX_CONDITIONS_PER_FIELD,
            max_pattern_length: DEFAULT_MAX_PATTERN_LENGTH,
            pattern_cache_capacity: DEFAULT_PATTERN_CACHE_CAPACITY,
        }
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Validation engine with registry, limits, and audit sink.
#[derive(Clone)]
pub struct ValidationEngine {
    /// Custom predicates resolved by key.
    registry: CustomValidatorRegistry,
    /// Resource limits.
    limits: EngineLimits,
    /// Compiled pattern rules, shared by clones.
    patterns: Arc<PatternCache>,
    /// Audit sink for validation events.
    audit: Arc<dyn ValidationAuditSink>,
    /// Refuse component trees with structural lint issues.
    strict_structure: bool,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("registry", &self.registry)
            .field("limits", &self.limits)
            .field("patterns", &self.patterns)
            .field("strict_structure", &self.strict_structure)
            .finish_non_exhaustive()
    }
}

impl ValidationEngine {
    /// Creates an engine with default limits, no predicates, and no audit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: CustomValidatorRegistry::new(),
            limits: EngineLimits::default(),
            patterns: Arc::new(PatternCache::new()),
            audit: Arc::new(NoopAuditSink),
            strict_structure: false,
        }
    }

    /// Replaces the custom predicate registry.
    #[must_use]
    pub fn with_registry(mut self, registry: CustomValidatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the resource limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: EngineLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn ValidationAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Enables or disables strict structure checking in the form pass.
    #[must_use]
    pub const fn with_strict_structure(mut self, strict: bool) -> Self {
        self.strict_structure = strict;
        self
    }

    /// Returns the custom predicate registry.
    #[must_use]
    pub const fn registry(&self) -> &CustomValidatorRegistry {
        &self.registry
    }

    /// Returns the custom predicate registry for registration.
    pub const fn registry_mut(&mut self) -> &mut CustomValidatorRegistry {
        &mut self.registry
    }

    /// Returns the resource limits.
    #[must_use]
    pub const fn limits(&self) -> &EngineLimits {
        &self.limits
    }

    /// Returns the compiled pattern cache.
    #[must_use]
    pub fn pattern_cache(&self) -> &PatternCache {
        &self.patterns
    }

    /// Returns true when strict structure checking is enabled.
    #[must_use]
    pub const fn strict_structure(&self) -> bool {
        self.strict_structure
    }

    // ------------------------------------------------------------------------
    // Field validation
    // ------------------------------------------------------------------------

    /// Runs the rule checks without consulting the conditions.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the pattern rule is unusable.
    pub fn validate_rules(
        &self,
        value: Option<&Value>,
        rules: &ValidationRuleSet,
        context: &FormContext,
    ) -> Result<Vec<String>, ValidationError> {
        self.run_rules(None, value, rules, context)
    }

    /// Validates a value: gated-off rule sets yield no errors.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the pattern rule is unusable.
    pub fn validate_field(
        &self,
        value: Option<&Value>,
        rules: &ValidationRuleSet,
        context: &FormContext,
    ) -> Result<Vec<String>, ValidationError> {
        if !should_validate(&rules.conditions, context) {
            return Ok(Vec::new());
        }
        self.run_rules(None, value, rules, context)
    }

    /// Validates a value against an optional rule set and packages the result.
    ///
    /// A missing rule set always yields a valid verdict.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the pattern rule is unusable.
    pub fn verdict(
        &self,
        value: Option<&Value>,
        rules: Option<&ValidationRuleSet>,
        context: &FormContext,
    ) -> Result<ValidationVerdict, ValidationError> {
        match rules {
            Some(rules) => self.validate_field(value, rules, context).map(ValidationVerdict::from_errors),
            None => Ok(ValidationVerdict::valid()),
        }
    }

    // ------------------------------------------------------------------------
    // Form validation
    // ------------------------------------------------------------------------

    /// Validates one placed component, reading its value from the context.
    ///
    /// Returns `None` for components without a rule set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the rule set exceeds the condition
    /// limit or its pattern rule is unusable.
    pub fn validate_component(
        &self,
        component: &Component,
        context: &FormContext,
    ) -> Result<Option<FieldVerdict>, ValidationError> {
        let Some(rules) = component.rules() else {
            return Ok(None);
        };
        if rules.conditions.len() > self.limits.max_conditions_per_field {
            return Err(ValidationError::TooManyConditions {
                field_id: component.id.clone(),
                len: rules.conditions.len(),
                limit: self.limits.max_conditions_per_field,
            });
        }
        let gated_in = should_validate(&rules.conditions, context);
        let errors = if gated_in {
            self.run_rules(Some(&component.id), context.get(&component.id), rules, context)?
        } else {
            Vec::new()
        };
        self.audit.record(&ValidationAuditEvent::field_validated(
            &component.id,
            gated_in,
            errors.len(),
        ));
        Ok(Some(FieldVerdict {
            field_id: component.id.clone(),
            gated_in,
            verdict: ValidationVerdict::from_errors(errors),
        }))
    }

    /// Validates every rule-bearing component of a form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the form exceeds configured limits,
    /// fails strict structure checking, or carries an unusable pattern.
    pub fn validate_form(
        &self,
        tree: &ComponentTree,
        context: &FormContext,
    ) -> Result<FormVerdict, ValidationError> {
        if tree.len() > self.limits.max_components {
            return Err(ValidationError::TooManyComponents {
                len: tree.len(),
                limit: self.limits.max_components,
            });
        }
        if self.strict_structure {
            let issues = lint_component_tree(tree, &self.limits);
            if !issues.is_empty() {
                return Err(ValidationError::Structure {
                    issues,
                });
            }
        }
        let mut fields = Vec::new();
        for component in tree.components() {
            if let Some(verdict) = self.validate_component(component, context)? {
                fields.push(verdict);
            }
        }
        let verdict = FormVerdict::from_fields(fields);
        self.audit.record(&ValidationAuditEvent::form_validated(
            verdict.fields().len(),
            verdict.invalid_count(),
            verdict.can_submit(),
        ));
        Ok(verdict)
    }

    /// Runs rule checks and reports unresolved custom keys.
    fn run_rules(
        &self,
        field_id: Option<&FieldId>,
        value: Option<&Value>,
        rules: &ValidationRuleSet,
        context: &FormContext,
    ) -> Result<Vec<String>, ValidationError> {
        let report = check_rules(value, rules, context, &self.registry, &self.patterns, &self.limits)?;
        if let Some(key) = &report.missing_custom {
            self.audit.record(&ValidationAuditEvent::custom_validator_missing(field_id, key));
        }
        Ok(report.errors)
    }
}

// ============================================================================
// SECTION: Default-Engine Shorthands
// ============================================================================

/// Runs the rule checks with a default engine.
///
/// # Errors
///
/// Returns [`ValidationError`] when the pattern rule is unusable.
pub fn validate_rules(
    value: Option<&Value>,
    rules: &ValidationRuleSet,
    context: &FormContext,
) -> Result<Vec<String>, ValidationError> {
    ValidationEngine::new().validate_rules(value, rules, context)
}

/// Validates a field with a default engine.
///
/// # Errors
///
/// Returns [`ValidationError`] when the pattern rule is unusable.
pub fn validate_field(
    value: Option<&Value>,
    rules: &ValidationRuleSet,
    context: &FormContext,
) -> Result<Vec<String>, ValidationError> {
    ValidationEngine::new().validate_field(value, rules, context)
}
