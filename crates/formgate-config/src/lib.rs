// crates/formgate-config/src/lib.rs
// ============================================================================
// Module: FormGate Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for formgate.toml semantics.
// Dependencies: formgate-core, serde, toml
// ============================================================================

//! ## Overview
//! `formgate-config` defines the configuration model for FormGate. Loading is
//! strict and fails closed: oversized files, unknown keys, and out-of-range
//! limits are rejected before an engine is built.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
