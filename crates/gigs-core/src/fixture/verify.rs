// crates/gigs-core/src/fixture/verify.rs
// ============================================================================
// Module: Verification Protocol
// Description: Tolerance and identification comparison for built objects.
// Purpose: Turn observed object properties into counted, gated assertions.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Numeric values pass when `|actual - expected| <= r * |expected|`, with `r`
//! the run's relative tolerance; a zero expected value must match exactly.
//! Numeric checks are skipped (counted as gated, never failed) when the
//! library is not expected to preserve user values. Name checks always run.
//! Identifier code checks run unless identification checking is skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::core::error::FixtureError;
use crate::core::error::FixtureResult;
use crate::core::identity::GIGS_CODESPACE;
use crate::core::identity::GigsCode;
use crate::core::identity::Identity;
use crate::core::options::ConformanceOption;
use crate::core::properties::Identifier;
use crate::fixture::context::FixtureContext;
use crate::interfaces::IdentifiedObject;

// ============================================================================
// SECTION: Tolerance
// ============================================================================

/// Default relative tolerance for numeric checks.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-7;

/// Relative tolerance applied to every numeric check in a run.
///
/// # Invariants
/// - `relative` is finite and in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tolerance {
    /// Relative factor.
    relative: f64,
}

impl Tolerance {
    /// Creates a tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ConfigurationMisuse`] when the factor is not
    /// finite or lies outside `[0, 1)`.
    pub fn new(relative: f64) -> FixtureResult<Self> {
        if !relative.is_finite() || !(0.0 .. 1.0).contains(&relative) {
            return Err(FixtureError::misuse(format!(
                "relative tolerance {relative} must be finite and in [0, 1)"
            )));
        }
        Ok(Self {
            relative,
        })
    }

    /// Returns the relative factor.
    #[must_use]
    pub const fn relative(self) -> f64 {
        self.relative
    }

    /// Returns true when `actual` is within tolerance of `expected`.
    #[must_use]
    pub fn accepts(self, actual: f64, expected: f64) -> bool {
        within_tolerance(actual, expected, self.relative)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: DEFAULT_RELATIVE_TOLERANCE,
        }
    }
}

/// Applies the relative tolerance law.
///
/// Zero and infinite expected values must match exactly; NaN never matches.
#[must_use]
#[allow(clippy::float_cmp, reason = "Zero and infinite references require exact equality.")]
pub fn within_tolerance(actual: f64, expected: f64, relative: f64) -> bool {
    if expected == 0.0 || expected.is_infinite() {
        return actual == expected;
    }
    (actual - expected).abs() <= relative * expected.abs()
}

/// Converts a value between two units of the same kind.
#[must_use]
pub fn convert(value: f64, from_to_base: f64, to_to_base: f64) -> f64 {
    value * from_to_base / to_to_base
}

// ============================================================================
// SECTION: Identification
// ============================================================================

/// Identification a built object is expected to carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedIdentification {
    /// Expected primary name, when known.
    pub name: Option<String>,
    /// Expected identifier, when checked.
    pub identifier: Option<Identifier>,
    /// Aliases that must all be present.
    pub aliases: Vec<String>,
}

impl ExpectedIdentification {
    /// Expectation for an object built from a GIGS identity.
    #[must_use]
    pub fn of(identity: &Identity, aliases: &[&str]) -> Self {
        Self {
            name: Some(identity.name().to_string()),
            identifier: Some(Identifier::new(GIGS_CODESPACE, identity.code().get())),
            aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
        }
    }

    /// Expectation on the name only.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            identifier: None,
            aliases: Vec::new(),
        }
    }

    /// Returns the expectation without its identifier.
    #[must_use]
    pub fn without_identifier(mut self) -> Self {
        self.identifier = None;
        self
    }
}

/// Which parts of an identification are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentificationScope {
    /// Compare the identifier code.
    pub code: bool,
    /// Compare the alias subset.
    pub aliases: bool,
}

/// Result of a successful identification comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentificationChecks {
    /// Number of individual assertions that ran.
    pub executed: u32,
}

/// Field, expected and actual values of a failed comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentificationMismatch {
    /// Compared field.
    pub field: &'static str,
    /// Expected rendering.
    pub expected: String,
    /// Actual rendering.
    pub actual: String,
}

/// Compares an object's identification with an expectation.
///
/// # Errors
///
/// Returns the first mismatching field.
pub fn compare_identification(
    object: &dyn IdentifiedObject,
    expected: &ExpectedIdentification,
    scope: IdentificationScope,
) -> Result<IdentificationChecks, IdentificationMismatch> {
    let mut executed = 0_u32;
    if let Some(name) = &expected.name {
        executed += 1;
        if object.name() != name {
            return Err(IdentificationMismatch {
                field: "name",
                expected: name.clone(),
                actual: object.name().to_string(),
            });
        }
    }
    if scope.code
        && let Some(identifier) = &expected.identifier
    {
        executed += 1;
        if !object.identifiers().contains(identifier) {
            return Err(IdentificationMismatch {
                field: "identifier",
                expected: identifier.to_string(),
                actual: render_list(object.identifiers()),
            });
        }
    }
    if scope.aliases && !expected.aliases.is_empty() {
        executed += 1;
        if let Some(absent) =
            expected.aliases.iter().find(|alias| !object.aliases().contains(*alias))
        {
            return Err(IdentificationMismatch {
                field: "alias",
                expected: absent.clone(),
                actual: render_list(object.aliases()),
            });
        }
    }
    Ok(IdentificationChecks {
        executed,
    })
}

/// Renders a list as `[a, b]`.
fn render_list<T: fmt::Display>(values: &[T]) -> String {
    let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

// ============================================================================
// SECTION: Fixture Checks
// ============================================================================

impl FixtureContext {
    /// Returns the GIGS code of this fixture, when set.
    fn code(&self) -> Option<GigsCode> {
        self.identity().map(Identity::code)
    }

    /// Checks a numeric value, gated on preserved user values.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Mismatch`] when the value is outside tolerance.
    pub fn check_value(&mut self, field: &str, actual: f64, expected: f64) -> FixtureResult {
        if !self.options().preserves_user_values() {
            self.tally_mut().gated += 1;
            return Ok(());
        }
        self.tally_mut().executed += 1;
        if self.resources().tolerance().accepts(actual, expected) {
            Ok(())
        } else {
            Err(FixtureError::mismatch(self.code(), field, expected, actual))
        }
    }

    /// Checks a value carrying a unit, converting it into the expected unit
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Mismatch`] when the converted value is outside
    /// tolerance.
    pub fn check_measure(
        &mut self,
        field: &str,
        actual: (f64, f64),
        expected: (f64, f64),
    ) -> FixtureResult {
        let (actual_value, actual_to_base) = actual;
        let (expected_value, expected_to_base) = expected;
        self.check_value(field, convert(actual_value, actual_to_base, expected_to_base), expected_value)
    }

    /// Checks exact equality of a text property.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Mismatch`] when the text differs.
    pub fn check_text(&mut self, field: &str, actual: &str, expected: &str) -> FixtureResult {
        self.tally_mut().executed += 1;
        if actual == expected {
            Ok(())
        } else {
            Err(FixtureError::mismatch(self.code(), field, expected, actual))
        }
    }

    /// Checks an arbitrary condition.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Mismatch`] when the condition is false.
    pub fn check_that(
        &mut self,
        field: &str,
        condition: bool,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> FixtureResult {
        self.tally_mut().executed += 1;
        if condition { Ok(()) } else { Err(FixtureError::mismatch(self.code(), field, expected, actual)) }
    }

    /// Checks identification of the object this fixture built.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Mismatch`] on the first differing field.
    pub fn check_identification(
        &mut self,
        object: &dyn IdentifiedObject,
        expected: &ExpectedIdentification,
    ) -> FixtureResult {
        let scope = IdentificationScope {
            code: !self.options().skips_identification(),
            aliases: self.options().get(ConformanceOption::StandardAliasSupported),
        };
        match compare_identification(object, expected, scope) {
            Ok(checks) => {
                self.tally_mut().executed += checks.executed;
                Ok(())
            }
            Err(mismatch) => {
                self.tally_mut().executed += 1;
                Err(FixtureError::mismatch(
                    self.code(),
                    mismatch.field,
                    mismatch.expected,
                    mismatch.actual,
                ))
            }
        }
    }

    /// Checks the name of a dependency object when dependency identification
    /// is supported.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Mismatch`] when the name differs.
    pub fn check_dependency_name(
        &mut self,
        field: &str,
        object: &dyn IdentifiedObject,
        expected: &str,
    ) -> FixtureResult {
        if !self.options().get(ConformanceOption::DependencyIdentificationSupported) {
            return Ok(());
        }
        self.check_text(field, object.name(), expected)
    }

    /// Runs the structural validator when validation is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Mismatch`] when validation fails.
    pub fn check_structure(&mut self, object: &dyn IdentifiedObject) -> FixtureResult {
        if !self.options().get(ConformanceOption::ValidationEnabled) {
            return Ok(());
        }
        self.tally_mut().executed += 1;
        self.resources()
            .validator()
            .validate(object)
            .map_err(|err| FixtureError::mismatch(self.code(), "structure", "valid", err.0))
    }
}
