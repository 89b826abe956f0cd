// crates/formgate-cli/src/lib.rs
// ============================================================================
// Module: FormGate CLI Library
// Description: Shared helpers for the FormGate command-line binary.
// Purpose: Host the message catalog used by the `formgate` entry point.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! Library surface of the FormGate CLI. The binary routes every user-facing
//! string through [`i18n`] so messages stay consistent across commands.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod i18n;

#[cfg(test)]
mod tests;
