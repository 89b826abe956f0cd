// crates/formgate-core/src/core/component.rs
// ============================================================================
// Module: FormGate Component Tree
// Description: Placed component instances supplied by the template layer.
// Purpose: Carry field identifiers, types, and rule sets into validation.
// Dependencies: crate::core::{identifiers, rules}, serde, serde_json
// ============================================================================

//! ## Overview
//! The component tree is the ordered list of placed components in a
//! template. Only `properties.validation` is interpreted here; every other
//! property is preserved untouched in [`ComponentProperties::extra`] so the
//! tree can be passed back to the template layer without loss.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::identifiers::FieldId;
use crate::core::rules::ValidationRuleSet;

// ============================================================================
// SECTION: Components
// ============================================================================

/// Canvas position of a placed component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset.
    #[serde(default)]
    pub x: f64,
    /// Vertical offset.
    #[serde(default)]
    pub y: f64,
}

/// Properties of a placed component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentProperties {
    /// Validation rule set; absent means the field is always valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRuleSet>,
    /// Remaining presentation properties, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One placed component instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Field identifier assigned at placement time.
    pub id: FieldId,
    /// Component type name (`input`, `select`, `checkbox`, ...).
    #[serde(rename = "type")]
    pub component_type: String,
    /// Component properties.
    #[serde(default)]
    pub properties: ComponentProperties,
    /// Canvas position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Component {
    /// Creates a component without a rule set.
    #[must_use]
    pub fn new(id: impl Into<FieldId>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            properties: ComponentProperties::default(),
            position: None,
        }
    }

    /// Returns this component with the given rule set attached.
    #[must_use]
    pub fn with_rules(mut self, rules: ValidationRuleSet) -> Self {
        self.properties.validation = Some(rules);
        self
    }

    /// Returns the attached rule set, if any.
    #[must_use]
    pub const fn rules(&self) -> Option<&ValidationRuleSet> {
        self.properties.validation.as_ref()
    }
}

// ============================================================================
// SECTION: Component Tree
// ============================================================================

/// Ordered sequence of placed components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTree {
    /// Components in placement order.
    components: Vec<Component>,
}

impl ComponentTree {
    /// Creates a component tree from placed components.
    #[must_use]
    pub const fn new(components: Vec<Component>) -> Self {
        Self {
            components,
        }
    }

    /// Returns the components in placement order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns the number of placed components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true when no component is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Looks up a component by identifier.
    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&Component> {
        self.components.iter().find(|component| &component.id == id)
    }

    /// Returns true when a component with the identifier is placed.
    #[must_use]
    pub fn contains(&self, id: &FieldId) -> bool {
        self.get(id).is_some()
    }
}

impl FromIterator<Component> for ComponentTree {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
