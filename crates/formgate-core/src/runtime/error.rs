// crates/formgate-core/src/runtime/error.rs
// ============================================================================
// Module: FormGate Validation Errors
// Description: Failures that prevent a verdict from being produced.
// Purpose: Separate rule-set defects from ordinary validation failures.
// Dependencies: crate::core, crate::runtime::lint, thiserror
// ============================================================================

//! ## Overview
//! A failed check is not an error: it becomes a message in a verdict. The
//! errors here describe rule sets or forms the engine refuses to evaluate,
//! such as an uncompilable pattern or a form exceeding configured limits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::FieldId;
use crate::runtime::lint::LintIssue;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while validating a field or form.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A pattern rule failed to compile.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// Pattern source as configured.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
    /// A pattern rule exceeds the configured source length.
    #[error("pattern length {len} exceeds limit {limit}")]
    PatternTooLong {
        /// Pattern length in bytes.
        len: usize,
        /// Configured limit.
        limit: usize,
    },
    /// A form holds more components than allowed.
    #[error("form has {len} components, limit is {limit}")]
    TooManyComponents {
        /// Number of components.
        len: usize,
        /// Configured limit.
        limit: usize,
    },
    /// A rule set holds more conditions than allowed.
    #[error("field {field_id} has {len} conditions, limit is {limit}")]
    TooManyConditions {
        /// Field owning the rule set.
        field_id: FieldId,
        /// Number of conditions.
        len: usize,
        /// Configured limit.
        limit: usize,
    },
    /// Strict structure checking found defects.
    #[error("form structure has {} issue(s); first: {}", .issues.len(), first_issue(.issues))]
    Structure {
        /// Every issue found.
        issues: Vec<LintIssue>,
    },
}

/// Renders the first issue for the structure error message.
fn first_issue(issues: &[LintIssue]) -> String {
    issues.first().map_or_else(String::new, ToString::to_string)
}
