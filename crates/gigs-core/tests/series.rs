// crates/gigs-core/tests/series.rs
// ============================================================================
// Module: Series Fixture Tests
// Description: CRS and coordinate operation fixtures over composed components.
// ============================================================================
//! ## Overview
//! Builds the higher series (geographic, projected, conversion, and
//! transformation) and checks how their components are bound.

#[path = "support/mocks.rs"]
mod mocks;
mod support;

use gigs_core::ComponentSource;
use gigs_core::Delegate;
use gigs_core::DelegationMode;
use gigs_core::Fixture;
use gigs_core::FixtureError;
use gigs_core::FixtureKind;
use gigs_core::FixtureResult;
use gigs_core::UnsupportedReason;
use gigs_core::series::ConversionFixture;
use gigs_core::series::GeographicCrsFixture;
use gigs_core::series::crs::GIGS_GEOG_CRS_A_3D;
use gigs_core::series::crs::GIGS_PROJECTED_CRS_A;
use gigs_core::series::crs::GIGS_PROJECTED_CRS_UPS;
use gigs_core::series::datum::GIGS_DATUM_A;
use gigs_core::series::operation::GIGS_POSITION_VECTOR_E;
use gigs_core::series::operation::GIGS_UPS_NORTH;
use gigs_core::series::operation::GIGS_UTM_ZONE_31N;
use mocks::MockLibrary;
use mocks::standard_resources;
use support::TestResult;
use support::ensure;
use support::expect_err;

/// Geographic CRS with an unsupported dimension.
fn four_dimensional_crs(fixture: &mut GeographicCrsFixture) -> FixtureResult {
    fixture.define(64099, "GIGS geogCRS X", ComponentSource::UserDefined(GIGS_DATUM_A), 4)
}

// ============================================================================
// SECTION: Geographic CRS
// ============================================================================

#[test]
fn test_geographic_crs_rejects_unsupported_dimension() -> TestResult {
    let library = MockLibrary::new();
    let delegate: Delegate<GeographicCrsFixture> =
        Delegate::new("four_dimensional_crs", four_dimensional_crs);
    let err = expect_err(
        delegate.instantiate(&standard_resources(&library)),
        "Expected the dimension to be rejected",
    )?;
    ensure(matches!(err, FixtureError::ConfigurationMisuse(_)), "Expected misuse")?;
    ensure(library.calls(FixtureKind::GeographicCrs) == 0, "Expected no build")?;
    Ok(())
}

#[test]
fn test_three_dimensional_crs_verifies() -> TestResult {
    let library = MockLibrary::new();
    let mut crs = GIGS_GEOG_CRS_A_3D.instantiate(&standard_resources(&library))?;
    crs.verify()?;
    ensure(crs.datum().is_some_and(|datum| datum.dependency().is_some()), "Expected a bound datum")?;
    Ok(())
}

// ============================================================================
// SECTION: Projected CRS
// ============================================================================

#[test]
fn test_projected_crs_binds_base_and_conversion() -> TestResult {
    let library = MockLibrary::new();
    let mut crs = GIGS_PROJECTED_CRS_A.instantiate(&standard_resources(&library))?;
    crs.verify()?;
    let base = crs.base().and_then(|resolved| resolved.dependency()).map(|dep| dep.routine());
    ensure(base == Some("gigs_geog_crs_a"), "Expected the geographic base routine")?;
    let conversion =
        crs.conversion().and_then(|resolved| resolved.dependency()).map(|dep| dep.mode());
    ensure(conversion == Some(DelegationMode::Reuse), "Expected a reused conversion")?;
    ensure(library.calls(FixtureKind::ProjectedCrs) == 1, "Expected one projected build")?;
    Ok(())
}

#[test]
fn test_projected_crs_on_unsupported_method_is_unsupported() -> TestResult {
    let library = MockLibrary::new();
    let mut crs = GIGS_PROJECTED_CRS_UPS.instantiate(&standard_resources(&library))?;
    let err = expect_err(crs.verify(), "Expected the UPS method to be unsupported")?;
    ensure(matches!(err, FixtureError::Unsupported(_)), "Expected an unsupported outcome")?;
    ensure(library.calls(FixtureKind::ProjectedCrs) == 0, "Expected no projected build")?;
    Ok(())
}

// ============================================================================
// SECTION: Coordinate Operations
// ============================================================================

#[test]
fn test_conversion_keeps_parameters_in_order() -> TestResult {
    let library = MockLibrary::new();
    let mut conversion = GIGS_UTM_ZONE_31N.instantiate(&standard_resources(&library))?;
    conversion.verify()?;
    let names: Vec<&str> =
        conversion.parameters().iter().map(|parameter| parameter.name.as_str()).collect();
    ensure(
        names.first() == Some(&"Latitude of natural origin")
            && names.last() == Some(&"False northing"),
        "Expected parameters in definition order",
    )?;
    Ok(())
}

#[test]
fn test_unsupported_method_is_reported() -> TestResult {
    let library = MockLibrary::new();
    let mut conversion: ConversionFixture =
        GIGS_UPS_NORTH.instantiate(&standard_resources(&library))?;
    let err = expect_err(conversion.verify(), "Expected an unsupported method")?;
    ensure(
        matches!(
            err,
            FixtureError::Unsupported(ref capability)
                if capability.kind == FixtureKind::Conversion
                    && capability.reason == UnsupportedReason::NotImplemented
        ),
        "Expected a not-implemented conversion",
    )?;
    Ok(())
}

#[test]
fn test_transformation_binds_source_and_target() -> TestResult {
    let library = MockLibrary::new();
    let mut transformation = GIGS_POSITION_VECTOR_E.instantiate(&standard_resources(&library))?;
    transformation.verify()?;
    ensure(transformation.source_crs().is_some(), "Expected a source CRS")?;
    ensure(transformation.target_crs().is_some(), "Expected a target CRS")?;
    ensure(
        transformation.node().context().tally().delegated > 0,
        "Expected delegated CRS checks",
    )?;
    Ok(())
}
