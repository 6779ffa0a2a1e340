// crates/gigs-core/src/core/error.rs
// ============================================================================
// Module: Fixture Error Definitions
// Description: Failure taxonomy for fixture construction and verification.
// Purpose: Separate coverage gaps, library defects, and harness bugs.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Fixture failures fall into three groups with different reporting weight:
//! - [`FixtureError::Unsupported`] is a coverage gap. The library under test
//!   does not implement a code or method the suite treats as optional.
//! - [`FixtureError::Mismatch`] and [`FixtureError::Construction`] are hard
//!   failures of the library under test for the current fixture tree.
//! - [`FixtureError::DuplicateIdentity`] and
//!   [`FixtureError::ConfigurationMisuse`] are contract violations inside the
//!   harness itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::core::identity::FixtureKind;
use crate::core::identity::GigsCode;
use crate::core::identity::Identity;

// ============================================================================
// SECTION: Unsupported Capability
// ============================================================================

/// Why a capability is reported as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedReason {
    /// The library exposes no factory for this kind of object.
    FactoryMissing,
    /// The factory rejected the code or method as unknown.
    NotImplemented,
    /// The factory returned no object.
    NothingProduced,
}

impl UnsupportedReason {
    /// Returns a stable label for the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FactoryMissing => "factory_missing",
            Self::NotImplemented => "not_implemented",
            Self::NothingProduced => "nothing_produced",
        }
    }
}

/// A capability the library under test does not provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedCapability {
    /// Kind of object that could not be produced.
    pub kind: FixtureKind,
    /// Reason classification.
    pub reason: UnsupportedReason,
    /// Code, method name, or factory operation concerned.
    pub subject: String,
}

impl fmt::Display for UnsupportedCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind, self.subject, self.reason.as_str())
    }
}

// ============================================================================
// SECTION: Assertion Mismatch
// ============================================================================

/// An observable property that differs from its reference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionMismatch {
    /// GIGS code of the fixture that ran the check, when known.
    pub fixture: Option<GigsCode>,
    /// Checked field (for example `semi_major_axis`).
    pub field: String,
    /// Expected value, rendered for display.
    pub expected: String,
    /// Actual value, rendered for display.
    pub actual: String,
}

impl fmt::Display for AssertionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixture {
            Some(code) => write!(
                f,
                "{code}: {} expected {} but was {}",
                self.field, self.expected, self.actual
            ),
            None => write!(f, "{} expected {} but was {}", self.field, self.expected, self.actual),
        }
    }
}

// ============================================================================
// SECTION: Fixture Errors
// ============================================================================

/// Errors raised while building or verifying a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum FixtureError {
    /// The library under test does not implement the requested capability.
    #[error("unsupported capability: {0}")]
    Unsupported(UnsupportedCapability),
    /// A built object does not match its reference values.
    #[error("assertion mismatch: {0}")]
    Mismatch(AssertionMismatch),
    /// Unexpected failure while the library built an object.
    #[error("construction error for {kind}: {message}")]
    Construction {
        /// Kind of object being built.
        kind: FixtureKind,
        /// Library-supplied failure message.
        message: String,
    },
    /// Identity was set again after a construction consumed it.
    #[error("identity {existing} already consumed; cannot replace with {requested}")]
    DuplicateIdentity {
        /// Identity consumed by the construction.
        existing: Identity,
        /// Identity the caller attempted to set.
        requested: Identity,
    },
    /// The harness used a fixture outside its contract.
    #[error("configuration misuse: {0}")]
    ConfigurationMisuse(String),
}

/// How a fixture error counts in a suite report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeClass {
    /// Coverage gap; the case is skipped.
    CoverageGap,
    /// Defect in the library under test.
    Defect,
    /// Bug in the harness.
    HarnessFault,
}

impl FixtureError {
    /// Creates a configuration misuse error.
    pub fn misuse(message: impl Into<String>) -> Self {
        Self::ConfigurationMisuse(message.into())
    }

    /// Creates an unsupported capability error.
    pub fn unsupported(
        kind: FixtureKind,
        reason: UnsupportedReason,
        subject: impl Into<String>,
    ) -> Self {
        Self::Unsupported(UnsupportedCapability {
            kind,
            reason,
            subject: subject.into(),
        })
    }

    /// Creates an assertion mismatch error.
    pub fn mismatch(
        fixture: Option<GigsCode>,
        field: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self::Mismatch(AssertionMismatch {
            fixture,
            field: field.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }

    /// Classifies the error for reporting.
    #[must_use]
    pub const fn outcome_class(&self) -> OutcomeClass {
        match self {
            Self::Unsupported(_) => OutcomeClass::CoverageGap,
            Self::Mismatch(_)
            | Self::Construction {
                ..
            } => OutcomeClass::Defect,
            Self::DuplicateIdentity {
                ..
            }
            | Self::ConfigurationMisuse(_) => OutcomeClass::HarnessFault,
        }
    }
}

// ============================================================================
// SECTION: Result Alias
// ============================================================================

/// Result type for fixture operations.
pub type FixtureResult<T = ()> = Result<T, FixtureError>;
