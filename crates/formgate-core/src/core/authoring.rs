// crates/formgate-core/src/core/authoring.rs
// ============================================================================
// Module: FormGate Rule Set Authoring
// Description: Editing operations over conditions and condition groups.
// Purpose: Keep group/condition bookkeeping consistent while a template is edited.
// Dependencies: crate::core::rules, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The property editor manipulates a rule set through a handful of actions:
//! add/update/remove a condition and add/remove an OR-group. Removing a group
//! cascades to every condition tagged with it, which keeps the group
//! invariant of [`Condition`] intact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::FieldId;
use crate::core::rules::Condition;
use crate::core::rules::OperatorKind;
use crate::core::rules::ValidationRuleSet;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rule set editing errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthoringError {
    /// Condition index does not exist.
    #[error("condition index {index} out of range (len {len})")]
    ConditionOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of conditions.
        len: usize,
    },
    /// Group label is not declared on the rule set.
    #[error("condition group not declared: {0}")]
    UnknownGroup(String),
}

// ============================================================================
// SECTION: Edits
// ============================================================================

/// Single-field edit applied to an existing condition.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionEdit {
    /// Replace the target field.
    Target(FieldId),
    /// Replace the operator.
    Operator(OperatorKind),
    /// Replace the comparand (`None` clears it).
    Value(Option<Value>),
}

// ============================================================================
// SECTION: Operations
// ============================================================================

impl ValidationRuleSet {
    /// Appends a blank condition and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::UnknownGroup`] when `group` is not declared.
    pub fn add_condition(&mut self, group: Option<&str>) -> Result<usize, AuthoringError> {
        let group = group.filter(|label| !label.is_empty());
        if let Some(label) = group
            && !self.condition_groups.iter().any(|declared| declared == label)
        {
            return Err(AuthoringError::UnknownGroup(label.to_string()));
        }
        self.conditions.push(Condition {
            target_id: FieldId::default(),
            operator: OperatorKind::Equals,
            value: Some(Value::String(String::new())),
            group: group.map(str::to_string),
        });
        Ok(self.conditions.len() - 1)
    }

    /// Applies a single-field edit to an existing condition.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::ConditionOutOfRange`] for a missing index.
    pub fn update_condition(
        &mut self,
        index: usize,
        edit: ConditionEdit,
    ) -> Result<(), AuthoringError> {
        let len = self.conditions.len();
        let condition = self.conditions.get_mut(index).ok_or(AuthoringError::ConditionOutOfRange {
            index,
            len,
        })?;
        match edit {
            ConditionEdit::Target(target) => condition.target_id = target,
            ConditionEdit::Operator(operator) => condition.operator = operator,
            ConditionEdit::Value(value) => condition.value = value,
        }
        Ok(())
    }

    /// Removes a condition and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::ConditionOutOfRange`] for a missing index.
    pub fn remove_condition(&mut self, index: usize) -> Result<Condition, AuthoringError> {
        if index >= self.conditions.len() {
            return Err(AuthoringError::ConditionOutOfRange {
                index,
                len: self.conditions.len(),
            });
        }
        Ok(self.conditions.remove(index))
    }

    /// Declares a new OR-group and returns its label.
    ///
    /// Labels take the form `Group {n}` with the smallest `n` above the
    /// current group count that is not already declared.
    pub fn add_condition_group(&mut self) -> String {
        let mut next = self.condition_groups.len() + 1;
        let label = loop {
            let candidate = format!("Group {next}");
            if !self.condition_groups.contains(&candidate) {
                break candidate;
            }
            next += 1;
        };
        self.condition_groups.push(label.clone());
        label
    }

    /// Removes a declared group and every condition tagged with it.
    ///
    /// Returns the number of conditions removed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::UnknownGroup`] when the group is not declared.
    pub fn remove_condition_group(&mut self, label: &str) -> Result<usize, AuthoringError> {
        let before = self.condition_groups.len();
        self.condition_groups.retain(|declared| declared != label);
        if self.condition_groups.len() == before {
            return Err(AuthoringError::UnknownGroup(label.to_string()));
        }
        let conditions = self.conditions.len();
        self.conditions.retain(|condition| condition.group_label() != Some(label));
        Ok(conditions - self.conditions.len())
    }

    /// Returns the conditions tagged with `group` (`None` selects ungrouped ones)
    /// together with their indexes in the flat list.
    pub fn conditions_in(&self, group: Option<&str>) -> impl Iterator<Item = (usize, &Condition)> {
        self.conditions
            .iter()
            .enumerate()
            .filter(move |(_, condition)| condition.group_label() == group)
    }
}
