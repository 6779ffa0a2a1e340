// crates/gigs-config/src/config.rs
// ============================================================================
// Module: Harness Configuration
// Description: TOML configuration model for a GIGS suite run.
// Purpose: Load, validate, and apply tolerance, options, and log settings.
// Dependencies: gigs-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! [`HarnessConfig`] is read from `gigs.toml`, from the path named by
//! `GIGS_HARNESS_CONFIG`, or from an explicit path. Every section has
//! defaults, so an empty file is a valid configuration. Loading fails closed:
//! oversized files, overlong paths, non-UTF-8 content, and out-of-range
//! values are rejected before any fixture runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

use gigs_core::ConformanceOption;
use gigs_core::ConformanceOptions;
use gigs_core::FileLog;
use gigs_core::HarnessLog;
use gigs_core::NoopLog;
use gigs_core::Resources;
use gigs_core::StderrLog;
use gigs_core::Tolerance;
use gigs_core::fixture::DEFAULT_RELATIVE_TOLERANCE;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits and Defaults
// ============================================================================

/// Default config file name.
const DEFAULT_CONFIG_NAME: &str = "gigs.toml";
/// Environment variable naming the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "GIGS_HARNESS_CONFIG";
/// Maximum config file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Harness Config
// ============================================================================

/// GIGS harness run configuration.
///
/// Unknown sections and keys are parse errors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Numeric tolerance settings.
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    /// Default conformance options for top-level fixtures.
    #[serde(default)]
    pub options: OptionsConfig,
    /// Harness event log settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl HarnessConfig {
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
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tolerance.validate()?;
        self.log.validate()
    }

    /// Returns the default conformance options.
    #[must_use]
    pub const fn options(&self) -> ConformanceOptions {
        self.options.to_options()
    }

    /// Returns the run tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the factor is out of range.
    pub fn tolerance(&self) -> Result<Tolerance, ConfigError> {
        Tolerance::new(self.tolerance.relative)
            .map_err(|err| ConfigError::Invalid(format!("tolerance.relative: {err}")))
    }

    /// Opens the configured log sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the log file cannot be opened and
    /// [`ConfigError::Invalid`] when a file sink has no path.
    pub fn log_sink(&self) -> Result<Rc<dyn HarnessLog>, ConfigError> {
        match self.log.sink {
            LogSinkKind::None => Ok(Rc::new(NoopLog)),
            LogSinkKind::Stderr => Ok(Rc::new(StderrLog)),
            LogSinkKind::File => {
                let Some(path) = &self.log.path else {
                    return Err(ConfigError::Invalid("log.path required for file sink".to_string()));
                };
                let log = FileLog::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Rc::new(log))
            }
        }
    }

    /// Builds run resources carrying the configured options, tolerance, and
    /// log sink. Library factories are attached by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the tolerance or the log sink is invalid.
    pub fn resources(&self) -> Result<Resources, ConfigError> {
        let resources = Resources::new(self.options(), self.tolerance()?);
        Ok(resources.with_log(self.log_sink()?))
    }
}

// ============================================================================
// SECTION: Tolerance
// ============================================================================

/// Numeric tolerance settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToleranceConfig {
    /// Relative tolerance factor applied to every numeric check.
    #[serde(default = "default_relative_tolerance")]
    pub relative: f64,
}

impl ToleranceConfig {
    /// Validates the tolerance factor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] unless the factor is finite, at least
    /// zero, and below one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.relative.is_finite() || self.relative < 0.0 || self.relative >= 1.0 {
            return Err(ConfigError::Invalid(
                "tolerance.relative must be finite and within [0, 1)".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            relative: default_relative_tolerance(),
        }
    }
}

// ============================================================================
// SECTION: Options
// ============================================================================

/// Default conformance options, one flag per option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    /// Compare numeric values with the reference values.
    #[serde(default = "default_true")]
    pub preserve_user_values: bool,
    /// Skip identifier code checks.
    #[serde(default)]
    pub skip_identification_check: bool,
    /// Run the structural validator on built objects.
    #[serde(default = "default_true")]
    pub validation_enabled: bool,
    /// Check that standard aliases are present.
    #[serde(default = "default_true")]
    pub standard_alias_supported: bool,
    /// Check the names of dependency objects.
    #[serde(default = "default_true")]
    pub dependency_identification_supported: bool,
}

impl OptionsConfig {
    /// Converts the flags into a conformance option registry.
    #[must_use]
    pub const fn to_options(&self) -> ConformanceOptions {
        ConformanceOptions::new()
            .with(ConformanceOption::PreserveUserValues, self.preserve_user_values)
            .with(ConformanceOption::SkipIdentificationCheck, self.skip_identification_check)
            .with(ConformanceOption::ValidationEnabled, self.validation_enabled)
            .with(ConformanceOption::StandardAliasSupported, self.standard_alias_supported)
            .with(
                ConformanceOption::DependencyIdentificationSupported,
                self.dependency_identification_supported,
            )
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            preserve_user_values: true,
            skip_identification_check: false,
            validation_enabled: true,
            standard_alias_supported: true,
            dependency_identification_supported: true,
        }
    }
}

// ============================================================================
// SECTION: Log
// ============================================================================

/// Harness event sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSinkKind {
    /// Discard events.
    #[default]
    None,
    /// Write JSON lines to stderr.
    Stderr,
    /// Append JSON lines to a file.
    File,
}

/// Harness event log settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: LogSinkKind,
    /// File path for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl LogConfig {
    /// Validates log settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a file sink lacks a usable path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (LogSinkKind::File, None) => {
                Err(ConfigError::Invalid("log.path required for file sink".to_string()))
            }
            (LogSinkKind::File, Some(path)) => {
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::Invalid("log.path must be non-empty".to_string()));
                }
                validate_path(path)
            }
            (LogSinkKind::None | LogSinkKind::Stderr, _) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration or opening the log.
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

/// Resolves the config path from the argument, the environment, or the
/// default file name.
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

/// Enforces total and per-component path length limits.
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

/// Default relative tolerance.
const fn default_relative_tolerance() -> f64 {
    DEFAULT_RELATIVE_TOLERANCE
}

/// Serde default for flags that start enabled.
const fn default_true() -> bool {
    true
}
