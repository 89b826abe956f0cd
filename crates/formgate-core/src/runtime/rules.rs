// crates/formgate-core/src/runtime/rules.rs
// ============================================================================
// Module: FormGate Rule Validator
// Description: Applies a rule set's checks to one value in fixed order.
// Purpose: Produce the ordered error list for an active rule set.
// Dependencies: crate::core, crate::runtime::{coerce, custom, error}, regress
// ============================================================================

//! ## Overview
//! Checks run in a fixed order and never short-circuit: required, minimum
//! length, maximum length, email, URL, minimum, maximum, pattern, custom.
//! Every failing check appends one message. The value is read as given; only
//! the required check trims strings.
//!
//! Bounds follow the editor's truthiness convention, so a bound of zero is
//! inactive. Length checks apply to length-bearing values only.
//!
//! Patterns use ECMAScript syntax and semantics (`regress`): `\d`, `\w`,
//! and `\b` are ASCII-only, and lookaround and backreferences are accepted.
//! Compiled patterns are kept in a [`PatternCache`] owned by the engine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::Mutex;

use regress::Regex;
use serde_json::Value;

use crate::core::FormContext;
use crate::core::ValidationRuleSet;
use crate::runtime::coerce::format_number;
use crate::runtime::coerce::is_blank_string;
use crate::runtime::coerce::is_truthy;
use crate::runtime::coerce::length_of;
use crate::runtime::coerce::to_display_string;
use crate::runtime::coerce::to_number;
use crate::runtime::custom::CustomValidatorRegistry;
use crate::runtime::engine::EngineLimits;
use crate::runtime::error::ValidationError;

// ============================================================================
// SECTION: Messages
// ============================================================================

/// Message for a failed required check.
pub const REQUIRED_MESSAGE: &str = "This field is required";
/// Message for a failed email check.
pub const EMAIL_MESSAGE: &str = "Must be a valid email address";
/// Message for a failed URL check.
pub const URL_MESSAGE: &str = "Must be a valid URL";

// ============================================================================
// SECTION: Format Patterns
// ============================================================================

/// Email format: local part, `@`, domain, and an alphabetic TLD.
static EMAIL_PATTERN: LazyLock<Result<Regex, regress::Error>> =
    LazyLock::new(|| Regex::with_flags(r"^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$", "i"));

/// URL format: optional http(s) scheme, host, TLD, and optional path.
///
/// The path segment `[/\w .-]*` matches the same strings as the nested form
/// `([/\w .-]*)*` without its exponential backtracking.
static URL_PATTERN: LazyLock<Result<Regex, regress::Error>> = LazyLock::new(|| {
    Regex::new(r"^(https?:\/\/)?([\da-z.-]+)\.([a-z.]{2,6})[/\w .-]*\/?$")
});

/// Tests text against a lazily compiled built-in pattern.
fn matches_builtin(pattern: &LazyLock<Result<Regex, regress::Error>>, text: &str) -> bool {
    pattern.as_ref().is_ok_and(|regex| regex.find(text).is_some())
}

// ============================================================================
// SECTION: Rule Report
// ============================================================================

/// Result of running a rule set's checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleReport {
    /// Error messages in check order.
    pub errors: Vec<String>,
    /// Custom key that had no registered predicate.
    pub missing_custom: Option<String>,
}

// ============================================================================
// SECTION: Rule Checks
// ============================================================================

/// Runs every check of `rules` against `value`.
///
/// # Errors
///
/// Returns [`ValidationError`] when the pattern rule is too long or fails to
/// compile.
pub fn check_rules(
    value: Option<&Value>,
    rules: &ValidationRuleSet,
    context: &FormContext,
    registry: &CustomValidatorRegistry,
    patterns: &PatternCache,
    limits: &EngineLimits,
) -> Result<RuleReport, ValidationError> {
    let mut report = RuleReport::default();
    let errors = &mut report.errors;

    if rules.required && (!is_truthy(value) || is_blank_string(value)) {
        errors.push(REQUIRED_MESSAGE.to_string());
    }

    let length = length_of(value).map(|len| u64::try_from(len).unwrap_or(u64::MAX));
    if let (Some(bound), Some(len)) = (active_length(rules.min_length), length)
        && len < bound
    {
        errors.push(format!("Must be at least {bound} characters"));
    }
    if let (Some(bound), Some(len)) = (active_length(rules.max_length), length)
        && len > bound
    {
        errors.push(format!("Must be no more than {bound} characters"));
    }

    let text = to_display_string(value);
    if rules.email && !matches_builtin(&EMAIL_PATTERN, &text) {
        errors.push(EMAIL_MESSAGE.to_string());
    }
    if rules.url && !matches_builtin(&URL_PATTERN, &text) {
        errors.push(URL_MESSAGE.to_string());
    }

    let number = to_number(value);
    if let Some(bound) = active_bound(rules.min)
        && number < bound
    {
        errors.push(format!("Must be at least {}", format_number(bound)));
    }
    if let Some(bound) = active_bound(rules.max)
        && number > bound
    {
        errors.push(format!("Must be no more than {}", format_number(bound)));
    }

    if let Some(source) = rules.pattern_source() {
        let regex = patterns.get_or_compile(source, limits)?;
        if regex.find(&text).is_none() {
            errors.push(rules.pattern_message().to_string());
        }
    }

    if let Some(key) = rules.custom_key() {
        match registry.get(key) {
            Some(validator) => {
                if let Some(message) = validator(value, context).filter(|msg| !msg.is_empty()) {
                    errors.push(message);
                }
            }
            None => report.missing_custom = Some(key.to_string()),
        }
    }

    Ok(report)
}

/// Compiles a pattern rule under the configured limits.
///
/// # Errors
///
/// Returns [`ValidationError::PatternTooLong`] when the source exceeds
/// `max_pattern_length` and [`ValidationError::InvalidPattern`] when it is
/// not a valid ECMAScript pattern.
pub fn compile_pattern(source: &str, limits: &EngineLimits) -> Result<Regex, ValidationError> {
    check_pattern_length(source, limits)?;
    Regex::new(source).map_err(|err| ValidationError::InvalidPattern {
        pattern: source.to_string(),
        reason: err.to_string(),
    })
}

/// Rejects pattern sources longer than `max_pattern_length`.
fn check_pattern_length(source: &str, limits: &EngineLimits) -> Result<(), ValidationError> {
    if source.len() > limits.max_pattern_length {
        return Err(ValidationError::PatternTooLong {
            len: source.len(),
            limit: limits.max_pattern_length,
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Pattern Cache
// ============================================================================

/// Compiled pattern rules keyed by source text.
///
/// Holds at most `pattern_cache_capacity` entries and is cleared when full.
/// Compilation failures are never cached. A poisoned lock degrades to
/// compiling on every call.
#[derive(Default)]
pub struct PatternCache {
    /// Compiled patterns by source.
    entries: Mutex<HashMap<String, Arc<Regex>>>,
}

impl fmt::Debug for PatternCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternCache").field("len", &self.len()).finish()
    }
}

impl PatternCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled pattern for `source`, compiling it on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the source is too long or invalid.
    pub fn get_or_compile(
        &self,
        source: &str,
        limits: &EngineLimits,
    ) -> Result<Arc<Regex>, ValidationError> {
        check_pattern_length(source, limits)?;
        if let Ok(entries) = self.entries.lock()
            && let Some(regex) = entries.get(source)
        {
            return Ok(Arc::clone(regex));
        }
        let regex = Arc::new(compile_pattern(source, limits)?);
        let capacity = limits.pattern_cache_capacity;
        if capacity > 0
            && let Ok(mut entries) = self.entries.lock()
        {
            if entries.len() >= capacity {
                entries.clear();
            }
            entries.insert(source.to_string(), Arc::clone(&regex));
        }
        Ok(regex)
    }

    /// Returns the number of cached patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Returns true when no pattern is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Length bound, inactive when unset or zero.
fn active_length(bound: Option<u64>) -> Option<u64> {
    bound.filter(|bound| *bound > 0)
}

/// Numeric bound, inactive when unset, zero, or `NaN`.
fn active_bound(bound: Option<f64>) -> Option<f64> {
    bound.filter(|bound| *bound != 0.0 && !bound.is_nan())
}
