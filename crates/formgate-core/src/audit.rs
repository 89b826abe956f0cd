// crates/formgate-core/src/audit.rs
// ============================================================================
// Module: FormGate Audit Logging
// Description: Structured audit events for validation passes.
// Purpose: Emit value-free audit records without a global logger.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Validation emits JSON-line audit events through a [`ValidationAuditSink`].
//! Events describe outcomes only: field values and form context entries are
//! never recorded, and every event carries the `values_omitted` redaction
//! label. Sink failures are swallowed so logging cannot change a verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::FieldId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Redaction label carried by every event.
pub const REDACTION_VALUES_OMITTED: &str = "values_omitted";

/// Event name for a single field verdict.
pub const EVENT_FIELD_VALIDATED: &str = "field_validated";
/// Event name for a completed form pass.
pub const EVENT_FORM_VALIDATED: &str = "form_validated";
/// Event name for an unresolved custom predicate key.
pub const EVENT_CUSTOM_VALIDATOR_MISSING: &str = "custom_validator_missing";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Validation audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Field the event refers to, when field scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<FieldId>,
    /// Whether gating activated the rule set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gated_in: Option<bool>,
    /// Number of error messages produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_count: Option<usize>,
    /// Number of rule-bearing fields in a form pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_count: Option<usize>,
    /// Number of invalid fields in a form pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_count: Option<usize>,
    /// Submission gate of a form pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_submit: Option<bool>,
    /// Custom predicate key that failed to resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_key: Option<String>,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

impl ValidationAuditEvent {
    /// Creates an event with a consistent timestamp and no detail fields.
    fn base(event: &'static str) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            field_id: None,
            gated_in: None,
            error_count: None,
            field_count: None,
            invalid_count: None,
            can_submit: None,
            custom_key: None,
            redaction: REDACTION_VALUES_OMITTED,
        }
    }

    /// Creates a `field_validated` event.
    #[must_use]
    pub fn field_validated(field_id: &FieldId, gated_in: bool, error_count: usize) -> Self {
        Self {
            field_id: Some(field_id.clone()),
            gated_in: Some(gated_in),
            error_count: Some(error_count),
            ..Self::base(EVENT_FIELD_VALIDATED)
        }
    }

    /// Creates a `form_validated` event.
    #[must_use]
    pub fn form_validated(field_count: usize, invalid_count: usize, can_submit: bool) -> Self {
        Self {
            field_count: Some(field_count),
            invalid_count: Some(invalid_count),
            can_submit: Some(can_submit),
            ..Self::base(EVENT_FORM_VALIDATED)
        }
    }

    /// Creates a `custom_validator_missing` event.
    #[must_use]
    pub fn custom_validator_missing(field_id: Option<&FieldId>, key: &str) -> Self {
        Self {
            field_id: field_id.cloned(),
            custom_key: Some(key.to_string()),
            ..Self::base(EVENT_CUSTOM_VALIDATOR_MISSING)
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for validation events.
pub trait ValidationAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ValidationAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ValidationAuditSink for StderrAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ValidationAuditSink for FileAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ValidationAuditSink for NoopAuditSink {
    fn record(&self, _event: &ValidationAuditEvent) {}
}
