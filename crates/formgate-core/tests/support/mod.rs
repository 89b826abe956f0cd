// crates/formgate-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared fixtures for FormGate core integration tests.
// ============================================================================
//! ## Overview
//! Builders for contexts, conditions, and components plus a capturing audit
//! sink used to assert emitted events.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Mutex;

use formgate_core::Condition;
use formgate_core::FormContext;
use formgate_core::OperatorKind;
use formgate_core::ValidationAuditEvent;
use formgate_core::ValidationAuditSink;
use serde_json::Value;

/// Standard result type used across core integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Builds a form context from `(id, value)` pairs.
pub fn context(entries: &[(&str, Value)]) -> FormContext {
    entries.iter().map(|(id, value)| (*id, value.clone())).collect()
}

/// Builds an ungrouped condition.
pub fn condition(target: &str, operator: &str, value: Value) -> Condition {
    Condition::new(target, OperatorKind::parse(operator), Some(value))
}

/// Builds a grouped condition.
pub fn grouped(target: &str, operator: &str, value: Value, group: &str) -> Condition {
    condition(target, operator, value).in_group(group)
}

/// Audit sink that keeps every event in memory.
#[derive(Default)]
pub struct CapturingAuditSink {
    /// Recorded events in emission order.
    events: Mutex<Vec<ValidationAuditEvent>>,
}

impl CapturingAuditSink {
    /// Returns a snapshot of recorded events.
    pub fn events(&self) -> Vec<ValidationAuditEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns the names of recorded events.
    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(|event| event.event).collect()
    }
}

impl ValidationAuditSink for CapturingAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
