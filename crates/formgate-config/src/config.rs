// crates/formgate-config/src/config.rs
// ============================================================================
// Module: FormGate Configuration
// Description: Configuration loading and validation for FormGate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: formgate-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional and defaults to the engine's built-in limits.
//! Unknown keys and out-of-range values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use formgate_core::EngineLimits;
use formgate_core::FileAuditSink;
use formgate_core::NoopAuditSink;
use formgate_core::StderrAuditSink;
use formgate_core::ValidationAuditSink;
use formgate_core::ValidationEngine;
use formgate_core::runtime::DEFAULT_MAX_COMPONENTS;
use formgate_core::runtime::DEFAULT_MAX_CONDITIONS_PER_FIELD;
use formgate_core::runtime::DEFAULT_MAX_PATTERN_LENGTH;
use formgate_core::runtime::DEFAULT_PATTERN_CACHE_CAPACITY;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "formgate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "FORMGATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum components per form.
pub(crate) const MAX_MAX_COMPONENTS: usize = 65_536;
/// Maximum conditions per rule set.
pub(crate) const MAX_MAX_CONDITIONS_PER_FIELD: usize = 4096;
/// Maximum pattern source length in bytes.
pub(crate) const MAX_MAX_PATTERN_LENGTH: usize = 65_536;
/// Maximum compiled patterns kept per engine.
pub(crate) const MAX_PATTERN_CACHE_CAPACITY: usize = 65_536;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// FormGate configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormGateConfig {
    /// Audit sink configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Resource limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Validation behavior toggles.
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl FormGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Loads configuration when a file is available, otherwise defaults.
    ///
    /// An explicit path or `FORMGATE_CONFIG` must exist; only the implicit
    /// `formgate.toml` in the working directory is optional.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an existing file fails to load.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if path.is_none()
            && env::var_os(CONFIG_ENV_VAR).is_none()
            && !Path::new(DEFAULT_CONFIG_NAME).exists()
        {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.audit.validate()?;
        self.limits.validate()?;
        Ok(())
    }

    /// Returns the engine limits described by `[limits]`.
    #[must_use]
    pub const fn engine_limits(&self) -> EngineLimits {
        EngineLimits {
            max_components: self.limits.max_components,
            max_conditions_per_field: self.limits.max_conditions_per_field,
            max_pattern_length: self.limits.max_pattern_length,
            pattern_cache_capacity: self.limits.pattern_cache_capacity,
        }
    }

    /// Constructs the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns an error when the audit file cannot be opened.
    pub fn build_audit_sink(&self) -> io::Result<Arc<dyn ValidationAuditSink>> {
        let sink: Arc<dyn ValidationAuditSink> = match (self.audit.sink, &self.audit.path) {
            (AuditSinkKind::Stderr, _) => Arc::new(StderrAuditSink),
            (AuditSinkKind::File, Some(path)) => Arc::new(FileAuditSink::new(Path::new(path.trim()))?),
            (AuditSinkKind::None | AuditSinkKind::File, _) => Arc::new(NoopAuditSink),
        };
        Ok(sink)
    }

    /// Builds a validation engine with the configured limits, audit sink, and
    /// structure policy.
    ///
    /// # Errors
    ///
    /// Returns an error when the audit file cannot be opened.
    pub fn build_engine(&self) -> io::Result<ValidationEngine> {
        Ok(ValidationEngine::new()
            .with_limits(self.engine_limits())
            .with_audit_sink(self.build_audit_sink()?)
            .with_strict_structure(self.validation.strict_structure))
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `path`.
    File,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink receiving audit events.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path (JSON lines); required for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid for the file sink".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Resource limits applied to untrusted templates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum components per form.
    #[serde(default = "default_max_components")]
    pub max_components: usize,
    /// Maximum conditions per rule set.
    #[serde(default = "default_max_conditions_per_field")]
    pub max_conditions_per_field: usize,
    /// Maximum pattern source length in bytes.
    #[serde(default = "default_max_pattern_length")]
    pub max_pattern_length: usize,
    /// Compiled patterns kept per engine; zero disables caching.
    #[serde(default = "default_pattern_cache_capacity")]
    pub pattern_cache_capacity: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_components: default_max_components(),
            max_conditions_per_field: default_max_conditions_per_field(),
            max_pattern_length: default_max_pattern_length(),
            pattern_cache_capacity: default_pattern_cache_capacity(),
        }
    }
}

impl LimitsConfig {
    /// Validates limit ranges.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_range("limits.max_components", self.max_components, 1, MAX_MAX_COMPONENTS)?;
        validate_range(
            "limits.max_conditions_per_field",
            self.max_conditions_per_field,
            1,
            MAX_MAX_CONDITIONS_PER_FIELD,
        )?;
        validate_range(
            "limits.max_pattern_length",
            self.max_pattern_length,
            1,
            MAX_MAX_PATTERN_LENGTH,
        )?;
        validate_range(
            "limits.pattern_cache_capacity",
            self.pattern_cache_capacity,
            0,
            MAX_PATTERN_CACHE_CAPACITY,
        )
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validation behavior toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Refuse templates that fail the structural lint.
    #[serde(default)]
    pub strict_structure: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates that a value lies within an inclusive range.
fn validate_range(field: &str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::Invalid(format!("{field} must be between {min} and {max}")));
    }
    Ok(())
}

/// Default maximum components per form.
const fn default_max_components() -> usize {
    DEFAULT_MAX_COMPONENTS
}

/// Default maximum conditions per rule set.
const fn default_max_conditions_per_field() -> usize {
    DEFAULT_MAX_CONDITIONS_PER_FIELD
}

/// Default maximum pattern source length.
const fn default_max_pattern_length() -> usize {
    DEFAULT_MAX_PATTERN_LENGTH
}

/// Default compiled pattern cache capacity.
const fn default_pattern_cache_capacity() -> usize {
    DEFAULT_PATTERN_CACHE_CAPACITY
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use super::*;

    #[test]
    fn validate_path_string_rejects_whitespace_only() {
        let err = validate_path_string("audit.path", "   ").unwrap_err();
        assert!(err.to_string().contains("audit.path must be non-empty"));
    }

    #[test]
    fn validate_path_string_rejects_component_too_long() {
        let long = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        assert!(validate_path_string("audit.path", &format!("logs/{long}")).is_err());
        let at_max = "a".repeat(MAX_PATH_COMPONENT_LENGTH);
        assert!(validate_path_string("audit.path", &format!("logs/{at_max}")).is_ok());
    }

    #[test]
    fn validate_range_is_inclusive() {
        assert!(validate_range("x", 1, 1, 4).is_ok());
        assert!(validate_range("x", 4, 1, 4).is_ok());
        assert!(validate_range("x", 0, 1, 4).is_err());
        assert!(validate_range("x", 5, 1, 4).is_err());
    }

    #[test]
    fn validate_path_rejects_overlong_paths() {
        let long = "a/".repeat(MAX_TOTAL_PATH_LENGTH);
        assert!(validate_path(Path::new(&long)).is_err());
    }
}
