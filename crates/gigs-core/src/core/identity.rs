// crates/gigs-core/src/core/identity.rs
// ============================================================================
// Module: GIGS Identity
// Description: Code namespaces and fixture identity for GIGS reference objects.
// Purpose: Keep GIGS codes and external authority codes in disjoint types.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A fixture is identified by a GIGS `(code, name)` pair. GIGS codes and the
//! external authority's own codes live in different numeric ranges, so each
//! namespace gets its own newtype and the two can never be mixed up at a call
//! site. Identities validate on construction and are never mutated afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::error::FixtureError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Codespace attached to every identifier the harness hands to a factory.
pub const GIGS_CODESPACE: &str = "GIGS";

// ============================================================================
// SECTION: Codes
// ============================================================================

/// Code in the GIGS namespace (for example `67030`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GigsCode(u32);

impl GigsCode {
    /// Creates a GIGS code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Returns the raw numeric code.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GigsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Code in the external geodetic authority namespace (for example `7030`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorityCode(u32);

impl AuthorityCode {
    /// Creates an authority code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Returns the raw numeric code.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the code in the string form authority factories are keyed by.
    #[must_use]
    pub fn as_lookup_key(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for AuthorityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Identity
// ============================================================================

/// GIGS identity of the reference object a fixture builds.
///
/// # Invariants
/// - `code` is strictly positive.
/// - `name` is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// GIGS code.
    code: GigsCode,
    /// Reference object name.
    name: String,
}

impl Identity {
    /// Creates a validated identity.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ConfigurationMisuse`] when the code is zero or
    /// the name is blank.
    pub fn new(code: u32, name: impl Into<String>) -> Result<Self, FixtureError> {
        let name = name.into();
        if code == 0 {
            return Err(FixtureError::misuse("identity code must be a positive integer"));
        }
        if name.trim().is_empty() {
            return Err(FixtureError::misuse(format!("identity {code} has an empty name")));
        }
        Ok(Self {
            code: GigsCode::new(code),
            name,
        })
    }

    /// Returns the GIGS code.
    #[must_use]
    pub const fn code(&self) -> GigsCode {
        self.code
    }

    /// Returns the reference object name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

// ============================================================================
// SECTION: Fixture Kinds
// ============================================================================

/// Geodetic object kind a fixture builds.
///
/// # Invariants
/// - Variants are stable for log labels and registry keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    /// Unit of measure.
    Unit,
    /// Ellipsoid.
    Ellipsoid,
    /// Prime meridian.
    PrimeMeridian,
    /// Geodetic datum.
    GeodeticDatum,
    /// Vertical datum.
    VerticalDatum,
    /// Geographic coordinate reference system.
    GeographicCrs,
    /// Vertical coordinate reference system.
    VerticalCrs,
    /// Map projection or other conversion.
    Conversion,
    /// Datum transformation.
    Transformation,
    /// Projected coordinate reference system.
    ProjectedCrs,
}

impl FixtureKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Ellipsoid => "ellipsoid",
            Self::PrimeMeridian => "prime_meridian",
            Self::GeodeticDatum => "geodetic_datum",
            Self::VerticalDatum => "vertical_datum",
            Self::GeographicCrs => "geographic_crs",
            Self::VerticalCrs => "vertical_crs",
            Self::Conversion => "conversion",
            Self::Transformation => "transformation",
            Self::ProjectedCrs => "projected_crs",
        }
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Provenance
// ============================================================================

/// Where a sub-component came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Provenance {
    /// Fetched from the authority factory by code; trusted as-is.
    AuthorityFetched {
        /// Authority code used for the lookup.
        code: AuthorityCode,
    },
    /// Built from literal defining parameters by a delegated fixture.
    UserDefined {
        /// Name of the build routine that defined the component.
        routine: &'static str,
    },
}

impl Provenance {
    /// Returns true for components fetched from the authority factory.
    #[must_use]
    pub const fn is_authority(&self) -> bool {
        matches!(self, Self::AuthorityFetched { .. })
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthorityFetched {
                code,
            } => write!(f, "authority:{code}"),
            Self::UserDefined {
                routine,
            } => write!(f, "user:{routine}"),
        }
    }
}
