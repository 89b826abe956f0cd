// crates/formgate-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for FormGate configuration. The output is static and is
//! kept valid by the config test suite.

/// Returns a canonical example `formgate.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"# Audit events are JSON lines; field values are never logged.
[audit]
sink = "file"
path = "formgate-audit.jsonl"

# Upper bounds applied to untrusted templates.
[limits]
max_components = 1024
max_conditions_per_field = 256
max_pattern_length = 1024
pattern_cache_capacity = 256

[validation]
# Refuse templates whose conditions reference unknown fields or groups.
strict_structure = false
"#,
    )
}
