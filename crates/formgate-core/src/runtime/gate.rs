// crates/formgate-core/src/runtime/gate.rs
// ============================================================================
// Module: FormGate Condition Groups
// Description: AND-within-group, OR-across-groups gating of rule sets.
// Purpose: Decide whether a field's validation rules are active.
// Dependencies: crate::core, crate::runtime::condition, serde
// ============================================================================

//! ## Overview
//! Conditions form a flat list tagged with optional group labels:
//!
//! - No conditions: the gate is open.
//! - No condition carries a label: the gate is the AND of all conditions.
//! - Otherwise conditions are bucketed by label (unlabeled conditions form
//!   the `default` bucket), each bucket is an AND, and the gate is open when
//!   any bucket holds.
//!
//! A condition explicitly labeled `default` shares the unlabeled bucket.
//! Buckets are derived from conditions only; a declared group with no
//! conditions does not form a bucket. An empty bucket would hold vacuously.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::Condition;
use crate::core::FormContext;
use crate::runtime::condition::evaluate_condition;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Label of the bucket holding unlabeled conditions.
pub const DEFAULT_GROUP: &str = "default";

// ============================================================================
// SECTION: Gate Evaluation
// ============================================================================

/// Returns true when the rule set guarded by `conditions` is active.
#[must_use]
pub fn should_validate(conditions: &[Condition], context: &FormContext) -> bool {
    if conditions.is_empty() {
        return true;
    }
    if !has_labels(conditions) {
        return all_hold(conditions.iter(), context);
    }
    partition(conditions).iter().any(|bucket| all_hold(bucket.members.iter().copied(), context))
}

/// Evaluates the gate and records the outcome of every bucket.
///
/// Unlike [`should_validate`], every bucket is evaluated so the trace is
/// complete; the open/closed result is identical.
#[must_use]
pub fn evaluate_gate(conditions: &[Condition], context: &FormContext) -> GateEvaluation {
    if conditions.is_empty() {
        return GateEvaluation {
            open: true,
            grouped: false,
            buckets: Vec::new(),
        };
    }
    let grouped = has_labels(conditions);
    let buckets: Vec<BucketOutcome> = if grouped {
        partition(conditions)
            .iter()
            .map(|bucket| BucketOutcome::evaluate(bucket.label, &bucket.members, context))
            .collect()
    } else {
        let members: Vec<&Condition> = conditions.iter().collect();
        vec![BucketOutcome::evaluate(DEFAULT_GROUP, &members, context)]
    };
    let open = buckets.iter().any(|bucket| bucket.holds);
    GateEvaluation {
        open,
        grouped,
        buckets,
    }
}

// ============================================================================
// SECTION: Gate Trace
// ============================================================================

/// Outcome of gate evaluation with per-bucket detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateEvaluation {
    /// True when validation rules are active.
    pub open: bool,
    /// True when at least one condition carries a group label.
    pub grouped: bool,
    /// Buckets in order of first appearance.
    pub buckets: Vec<BucketOutcome>,
}

/// Outcome of one AND-bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketOutcome {
    /// Bucket label (`default` for unlabeled conditions).
    pub label: String,
    /// Per-condition results in list order.
    pub results: Vec<bool>,
    /// True when every condition in the bucket holds.
    pub holds: bool,
}

impl BucketOutcome {
    /// Evaluates every member of a bucket.
    fn evaluate(label: &str, members: &[&Condition], context: &FormContext) -> Self {
        let results: Vec<bool> =
            members.iter().map(|condition| evaluate_condition(condition, context)).collect();
        let holds = results.iter().all(|result| *result);
        Self {
            label: label.to_string(),
            results,
            holds,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Conditions sharing one group label.
struct Bucket<'a> {
    /// Bucket label.
    label: &'a str,
    /// Member conditions in list order.
    members: Vec<&'a Condition>,
}

/// Returns true when any condition carries a non-empty group label.
fn has_labels(conditions: &[Condition]) -> bool {
    conditions.iter().any(|condition| condition.group_label().is_some())
}

/// AND over a sequence of conditions; vacuously true when empty.
fn all_hold<'a>(
    mut conditions: impl Iterator<Item = &'a Condition>,
    context: &FormContext,
) -> bool {
    conditions.all(|condition| evaluate_condition(condition, context))
}

/// Buckets conditions by label in order of first appearance.
fn partition(conditions: &[Condition]) -> Vec<Bucket<'_>> {
    let mut buckets: Vec<Bucket<'_>> = Vec::new();
    for condition in conditions {
        let label = condition.group_label().unwrap_or(DEFAULT_GROUP);
        if let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.label == label) {
            bucket.members.push(condition);
        } else {
            buckets.push(Bucket {
                label,
                members: vec![condition],
            });
        }
    }
    buckets
}
