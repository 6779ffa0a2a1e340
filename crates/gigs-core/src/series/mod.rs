// crates/gigs-core/src/series/mod.rs
// ============================================================================
// Module: GIGS Fixture Series
// Description: Concrete fixtures for each kind of geodetic object.
// Purpose: Define GIGS reference objects and the checks run against them.
// Dependencies: crate::{core, fixture, interfaces}
// ============================================================================

//! ## Overview
//! Each module holds one or two fixture kinds. A fixture stores the defining
//! values of its object and exposes named build routines that set identity
//! and values for one GIGS test case. Every routine is also published as a
//! [`Delegate`](crate::fixture::Delegate) constant so parents and the case
//! registry can refer to it.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod crs;
pub mod datum;
pub mod ellipsoid;
pub mod operation;
pub mod prime_meridian;
pub mod unit;

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::error::FixtureError;
use crate::core::error::FixtureResult;
use crate::core::identity::FixtureKind;
use crate::core::properties::Properties;
use crate::fixture::context::FixtureContext;
use crate::fixture::node::Fixture;
use crate::fixture::resolver::ComponentSource;
use crate::fixture::resolver::Resolved;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crs::GeographicCrsFixture;
pub use crs::ProjectedCrsFixture;
pub use crs::VerticalCrsFixture;
pub use datum::GeodeticDatumFixture;
pub use datum::VerticalDatumFixture;
pub use ellipsoid::EllipsoidFixture;
pub use operation::ConversionFixture;
pub use operation::TransformationFixture;
pub use prime_meridian::PrimeMeridianFixture;
pub use unit::UnitFixture;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds factory properties from the fixture identity.
pub(crate) fn properties_of(
    context: &FixtureContext,
    aliases: &[&str],
) -> FixtureResult<Properties> {
    Ok(Properties::for_identity(context.require_identity()?, aliases))
}

/// Returns a component source a build routine must have set.
pub(crate) fn require_source<F: Fixture>(
    source: Option<ComponentSource<F>>,
    kind: FixtureKind,
    component: &str,
) -> FixtureResult<ComponentSource<F>> {
    source.ok_or_else(|| {
        FixtureError::misuse(format!("{kind} fixture has no {component} source"))
    })
}

/// Returns the expected name of a user-defined component.
///
/// Authority components carry the library's own naming and are not compared.
pub(crate) fn component_name<F: Fixture>(resolved: &Resolved<F>) -> Option<String> {
    resolved
        .dependency()
        .and_then(|dependency| dependency.child().node().context().identity())
        .map(|identity| identity.name().to_string())
}
