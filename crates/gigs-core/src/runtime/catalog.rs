// crates/gigs-core/src/runtime/catalog.rs
// ============================================================================
// Module: Standard Case Catalog
// Description: Registration of every built-in GIGS case.
// Purpose: Provide the default case set a suite run executes.
// Dependencies: crate::{core, runtime, series}
// ============================================================================

//! ## Overview
//! Registers each built-in build routine as a case. Cases that only differ
//! in component provenance (user-defined versus authority) are registered
//! separately so both paths are exercised.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::error::FixtureResult;
use crate::runtime::registry::CaseRegistry;
use crate::series::crs;
use crate::series::datum;
use crate::series::ellipsoid;
use crate::series::operation;
use crate::series::prime_meridian;
use crate::series::unit;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Returns a registry holding every built-in case.
///
/// # Errors
///
/// Returns [`crate::FixtureError::ConfigurationMisuse`] when two built-in
/// cases share a key.
pub fn standard_registry() -> FixtureResult<CaseRegistry> {
    let mut registry = CaseRegistry::new();

    registry.register(unit::GIGS_METRE)?;
    registry.register(unit::GIGS_DEGREE)?;
    registry.register(unit::GIGS_GRAD)?;
    registry.register(unit::GIGS_BRITISH_FOOT)?;
    registry.register(unit::GIGS_UNITY)?;

    registry.register(ellipsoid::GIGS_ELLIPSOID_A)?;
    registry.register(ellipsoid::GIGS_ELLIPSOID_A_BY_SEMI_MINOR)?;
    registry.register(ellipsoid::GIGS_ELLIPSOID_B)?;
    registry.register(ellipsoid::GIGS_ELLIPSOID_E)?;
    registry.register(ellipsoid::GIGS_ELLIPSOID_H)?;
    registry.register(ellipsoid::GIGS_ELLIPSOID_I)?;

    registry.register(prime_meridian::GIGS_GREENWICH)?;
    registry.register(prime_meridian::GIGS_PARIS)?;

    registry.register(datum::GIGS_DATUM_A)?;
    registry.register(datum::GIGS_DATUM_A_AUTHORITY)?;
    registry.register(datum::GIGS_DATUM_E)?;
    registry.register(datum::GIGS_VERTICAL_DATUM_A)?;

    registry.register(crs::GIGS_GEOG_CRS_A)?;
    registry.register(crs::GIGS_GEOG_CRS_A_AUTHORITY)?;
    registry.register(crs::GIGS_GEOG_CRS_A_3D)?;
    registry.register(crs::GIGS_GEOG_CRS_E)?;
    registry.register(crs::GIGS_VERTICAL_CRS_A)?;
    registry.register(crs::GIGS_VERTICAL_CRS_A_AUTHORITY)?;
    registry.register(crs::GIGS_PROJECTED_CRS_A)?;
    registry.register(crs::GIGS_PROJECTED_CRS_A_AUTHORITY)?;
    registry.register(crs::GIGS_PROJECTED_CRS_UPS)?;

    registry.register(operation::GIGS_UTM_ZONE_31N)?;
    registry.register(operation::GIGS_UPS_NORTH)?;
    registry.register(operation::GIGS_GEOCENTRIC_TRANSLATION_E)?;
    registry.register(operation::GIGS_POSITION_VECTOR_E)?;

    Ok(registry)
}
