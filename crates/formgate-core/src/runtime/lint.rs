// crates/formgate-core/src/runtime/lint.rs
// ============================================================================
// Module: FormGate Structural Lint
// Description: Static checks over rule sets and component trees.
// Purpose: Surface misconfigured conditions before a form is filled.
// Dependencies: crate::core, crate::runtime::{engine, rules}, serde
// ============================================================================

//! ## Overview
//! Evaluation is permissive: unknown operators pass, missing targets read as
//! unset, and undeclared groups still form buckets. Lint reports the same
//! situations as issues so authors can fix them. Lint never changes how a
//! form validates unless strict structure checking is enabled on the engine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::core::ComponentTree;
use crate::core::FieldId;
use crate::core::ValidationRuleSet;
use crate::runtime::engine::EngineLimits;
use crate::runtime::rules::compile_pattern;

// ============================================================================
// SECTION: Issues
// ============================================================================

/// Structural issue found in a field's rule set or placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintIssue {
    /// Field the issue belongs to.
    pub field_id: FieldId,
    /// Issue details.
    #[serde(flatten)]
    pub kind: LintKind,
}

/// Kind of structural issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LintKind {
    /// Condition is tagged with a group missing from `condition_groups`.
    UndeclaredGroup {
        /// Condition index.
        index: usize,
        /// Group label on the condition.
        group: String,
    },
    /// A group label is declared more than once.
    DuplicateGroup {
        /// Repeated label.
        group: String,
    },
    /// Condition targets a field that is not placed in the form.
    UnknownTarget {
        /// Condition index.
        index: usize,
        /// Target identifier.
        target_id: FieldId,
    },
    /// Condition targets the field that owns it.
    SelfReference {
        /// Condition index.
        index: usize,
    },
    /// Binary operator without a comparand.
    MissingComparand {
        /// Condition index.
        index: usize,
        /// Operator name.
        operator: String,
    },
    /// Operator name outside the known set.
    UnknownOperator {
        /// Condition index.
        index: usize,
        /// Operator name.
        operator: String,
    },
    /// Another component already uses this identifier.
    DuplicateFieldId,
    /// Pattern rule does not compile.
    InvalidPattern {
        /// Compiler diagnostic.
        reason: String,
    },
}

impl fmt::Display for LintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndeclaredGroup {
                index,
                group,
            } => write!(f, "condition {index} uses undeclared group \"{group}\""),
            Self::DuplicateGroup {
                group,
            } => write!(f, "group \"{group}\" is declared more than once"),
            Self::UnknownTarget {
                index,
                target_id,
            } => write!(f, "condition {index} targets unknown field \"{target_id}\""),
            Self::SelfReference {
                index,
            } => write!(f, "condition {index} targets its own field"),
            Self::MissingComparand {
                index,
                operator,
            } => write!(f, "condition {index} uses {operator} without a value"),
            Self::UnknownOperator {
                index,
                operator,
            } => write!(f, "condition {index} uses unknown operator \"{operator}\""),
            Self::DuplicateFieldId => f.write_str("field identifier is not unique"),
            Self::InvalidPattern {
                reason,
            } => write!(f, "pattern does not compile: {reason}"),
        }
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_id, self.kind)
    }
}

// ============================================================================
// SECTION: Rule Set Lint
// ============================================================================

/// Lints one rule set in isolation.
///
/// Target existence is not checked here; see [`lint_component_tree`].
#[must_use]
pub fn lint_rule_set(
    field_id: &FieldId,
    rules: &ValidationRuleSet,
    limits: &EngineLimits,
) -> Vec<LintIssue> {
    let mut kinds = Vec::new();

    let mut declared = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for group in &rules.condition_groups {
        if !declared.insert(group.as_str()) && reported.insert(group.as_str()) {
            kinds.push(LintKind::DuplicateGroup {
                group: group.clone(),
            });
        }
    }

    for (index, condition) in rules.conditions.iter().enumerate() {
        if let Some(group) = condition.group_label()
            && !declared.contains(group)
        {
            kinds.push(LintKind::UndeclaredGroup {
                index,
                group: group.to_string(),
            });
        }
        if &condition.target_id == field_id {
            kinds.push(LintKind::SelfReference {
                index,
            });
        }
        if condition.operator.is_unknown() {
            kinds.push(LintKind::UnknownOperator {
                index,
                operator: condition.operator.to_string(),
            });
        } else if !condition.operator.is_unary() && condition.value.is_none() {
            kinds.push(LintKind::MissingComparand {
                index,
                operator: condition.operator.to_string(),
            });
        }
    }

    if let Some(source) = rules.pattern_source()
        && let Err(err) = compile_pattern(source, limits)
    {
        kinds.push(LintKind::InvalidPattern {
            reason: err.to_string(),
        });
    }

    kinds
        .into_iter()
        .map(|kind| LintIssue {
            field_id: field_id.clone(),
            kind,
        })
        .collect()
}

// ============================================================================
// SECTION: Component Tree Lint
// ============================================================================

/// Lints every component of a form, including cross-field references.
#[must_use]
pub fn lint_component_tree(tree: &ComponentTree, limits: &EngineLimits) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let mut seen = BTreeSet::new();
    for component in tree.components() {
        if !seen.insert(&component.id) {
            issues.push(LintIssue {
                field_id: component.id.clone(),
                kind: LintKind::DuplicateFieldId,
            });
        }
        let Some(rules) = component.rules() else {
            continue;
        };
        issues.extend(lint_rule_set(&component.id, rules, limits));
        for (index, condition) in rules.conditions.iter().enumerate() {
            if !tree.contains(&condition.target_id) {
                issues.push(LintIssue {
                    field_id: component.id.clone(),
                    kind: LintKind::UnknownTarget {
                        index,
                        target_id: condition.target_id.clone(),
                    },
                });
            }
        }
    }
    issues
}
