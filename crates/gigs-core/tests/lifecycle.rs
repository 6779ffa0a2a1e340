// crates/gigs-core/tests/lifecycle.rs
// ============================================================================
// Module: Fixture Lifecycle Tests
// Description: Memoized construction, cached failures, and lifecycle states.
// Purpose: Ensure each fixture builds its object at most once.
// ============================================================================
//! ## Overview
//! Integration tests for `get_object` memoization, identity consumption, and
//! the observable lifecycle state machine.

#[path = "support/mocks.rs"]
mod mocks;
mod support;

use std::rc::Rc;

use gigs_core::Fixture;
use gigs_core::FixtureError;
use gigs_core::FixtureKind;
use gigs_core::FixtureState;
use gigs_core::UnsupportedReason;
use gigs_core::series::UnitFixture;
use gigs_core::series::datum::GIGS_DATUM_A;
use gigs_core::series::unit::GIGS_METRE;
use mocks::MockLibrary;
use mocks::standard_resources;
use support::TestResult;
use support::ensure;
use support::expect_err;

// ============================================================================
// SECTION: Memoization
// ============================================================================

#[test]
fn test_get_object_builds_once() -> TestResult {
    let library = MockLibrary::new();
    let mut fixture = GIGS_METRE.instantiate(&standard_resources(&library))?;
    let first = fixture.get_object()?;
    let second = fixture.get_object()?;
    ensure(Rc::ptr_eq(&first, &second), "Expected the cached object to be returned")?;
    ensure(library.calls(FixtureKind::Unit) == 1, "Expected exactly one factory call")?;
    ensure(fixture.node().construction_count() == 1, "Expected one construction")?;
    Ok(())
}

#[test]
fn test_verify_reuses_built_object() -> TestResult {
    let library = MockLibrary::new();
    let mut fixture = GIGS_METRE.instantiate(&standard_resources(&library))?;
    fixture.get_object()?;
    fixture.verify()?;
    fixture.verify()?;
    ensure(library.calls(FixtureKind::Unit) == 1, "Expected verify not to rebuild")?;
    Ok(())
}

#[test]
fn test_construction_failure_is_cached() -> TestResult {
    let library = MockLibrary::new();
    library.fail_for(FixtureKind::Unit);
    let mut fixture = GIGS_METRE.instantiate(&standard_resources(&library))?;
    let first = expect_err(fixture.get_object(), "Expected the first build to fail")?;
    let second = expect_err(fixture.get_object(), "Expected the cached failure")?;
    ensure(first == second, "Expected the same failure both times")?;
    ensure(
        matches!(first, FixtureError::Construction { kind: FixtureKind::Unit, .. }),
        "Expected a construction error",
    )?;
    ensure(library.calls(FixtureKind::Unit) == 1, "Expected no retry after failure")?;
    ensure(
        fixture.node().state() == FixtureState::ConstructionFailed,
        "Expected the failed state",
    )?;
    Ok(())
}

#[test]
fn test_empty_factory_result_is_unsupported() -> TestResult {
    let library = MockLibrary::new();
    library.produce_nothing_for(FixtureKind::Unit);
    let mut fixture = GIGS_METRE.instantiate(&standard_resources(&library))?;
    let err = expect_err(fixture.verify(), "Expected nothing to be produced")?;
    match err {
        FixtureError::Unsupported(capability) => {
            ensure(capability.kind == FixtureKind::Unit, "Expected the unit kind")?;
            ensure(
                capability.reason == UnsupportedReason::NothingProduced,
                "Expected the nothing-produced reason",
            )?;
            ensure(capability.subject.contains("GIGS metre"), "Expected the identity subject")?;
        }
        other => return Err(format!("unexpected error: {other}").into()),
    }
    Ok(())
}

#[test]
fn test_children_build_once_per_parent() -> TestResult {
    let library = MockLibrary::new();
    let mut datum = GIGS_DATUM_A.instantiate(&standard_resources(&library))?;
    datum.verify()?;
    datum.verify()?;
    ensure(library.calls(FixtureKind::GeodeticDatum) == 1, "Expected one datum build")?;
    ensure(library.calls(FixtureKind::Ellipsoid) == 1, "Expected one ellipsoid build")?;
    ensure(library.calls(FixtureKind::PrimeMeridian) == 1, "Expected one meridian build")?;
    Ok(())
}

// ============================================================================
// SECTION: Identity
// ============================================================================

#[test]
fn test_missing_identity_is_misuse_and_not_cached() -> TestResult {
    let library = MockLibrary::new();
    let mut fixture = UnitFixture::instantiate(&standard_resources(&library));
    let err = expect_err(fixture.get_object(), "Expected a missing identity error")?;
    ensure(matches!(err, FixtureError::ConfigurationMisuse(_)), "Expected misuse")?;
    ensure(fixture.node().state() == FixtureState::Uninitialized, "Expected no state change")?;
    ensure(library.calls(FixtureKind::Unit) == 0, "Expected the factory not to be called")?;
    UnitFixture::gigs_metre(&mut fixture)?;
    fixture.get_object()?;
    ensure(library.calls(FixtureKind::Unit) == 1, "Expected a build once identity is set")?;
    Ok(())
}

#[test]
fn test_identity_can_change_before_build() -> TestResult {
    let library = MockLibrary::new();
    let mut fixture = GIGS_METRE.instantiate(&standard_resources(&library))?;
    fixture.set_identity(69002, "GIGS kilometre")?;
    let identity = fixture.node().context().identity().map(ToString::to_string);
    ensure(
        identity.as_deref() == Some("GIGS kilometre (69002)"),
        "Expected the replaced identity",
    )?;
    Ok(())
}

#[test]
fn test_identity_is_frozen_after_build() -> TestResult {
    let library = MockLibrary::new();
    let mut fixture = GIGS_METRE.instantiate(&standard_resources(&library))?;
    fixture.get_object()?;
    let err = expect_err(fixture.set_identity(69002, "GIGS kilometre"), "Expected rejection")?;
    match err {
        FixtureError::DuplicateIdentity { existing, requested } => {
            ensure(existing.code().get() == 69001, "Expected the consumed identity")?;
            ensure(requested.name() == "GIGS kilometre", "Expected the requested identity")?;
        }
        other => return Err(format!("unexpected error: {other}").into()),
    }
    Ok(())
}

#[test]
fn test_invalid_identity_is_rejected() -> TestResult {
    let library = MockLibrary::new();
    let mut fixture = UnitFixture::instantiate(&standard_resources(&library));
    let zero = expect_err(fixture.set_identity(0, "GIGS metre"), "Expected zero code rejection")?;
    ensure(matches!(zero, FixtureError::ConfigurationMisuse(_)), "Expected misuse for code 0")?;
    let blank = expect_err(fixture.set_identity(69001, "  "), "Expected blank name rejection")?;
    ensure(matches!(blank, FixtureError::ConfigurationMisuse(_)), "Expected misuse for blank")?;
    Ok(())
}

// ============================================================================
// SECTION: States
// ============================================================================

#[test]
fn test_lifecycle_states_in_order() -> TestResult {
    let library = MockLibrary::new();
    let resources = standard_resources(&library);
    let mut fixture = UnitFixture::instantiate(&resources);
    ensure(fixture.node().state() == FixtureState::Uninitialized, "Expected uninitialized")?;
    UnitFixture::gigs_metre(&mut fixture)?;
    ensure(fixture.node().state() == FixtureState::IdentitySet, "Expected identity set")?;
    fixture.get_object()?;
    ensure(fixture.node().state() == FixtureState::Built, "Expected built")?;
    fixture.verify()?;
    ensure(fixture.node().state() == FixtureState::Verified, "Expected verified")?;
    Ok(())
}

#[test]
fn test_skip_flag_short_circuits_verify() -> TestResult {
    let library = MockLibrary::new();
    let mut fixture = GIGS_METRE.instantiate(&standard_resources(&library))?;
    fixture.node_mut().context_mut().set_skip(true);
    fixture.verify()?;
    ensure(fixture.node().state() == FixtureState::Skipped, "Expected skipped")?;
    ensure(fixture.node().context().tally().total() == 0, "Expected no assertions")?;
    ensure(library.calls(FixtureKind::Unit) == 0, "Expected no build for a skipped verify")?;
    Ok(())
}

#[test]
fn test_failed_verify_returns_recorded_failure() -> TestResult {
    let library = MockLibrary::new();
    library.rename(FixtureKind::Unit, "metre");
    let mut fixture = GIGS_METRE.instantiate(&standard_resources(&library))?;
    let first = expect_err(fixture.verify(), "Expected a name mismatch")?;
    let tally = *fixture.node().context().tally();
    ensure(
        fixture.node().state() == FixtureState::VerificationFailed,
        "Expected the failure to be recorded",
    )?;
    let second = expect_err(fixture.verify(), "Expected the recorded failure again")?;
    ensure(first == second, "Expected the same failure on the second call")?;
    ensure(*fixture.node().context().tally() == tally, "Expected no checks on the second call")?;
    ensure(library.calls(FixtureKind::Unit) == 1, "Expected a single construction")?;
    Ok(())
}
