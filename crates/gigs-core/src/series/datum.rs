// crates/gigs-core/src/series/datum.rs
// ============================================================================
// Module: Datum Fixtures
// Description: User-defined geodetic and vertical datums.
// Purpose: Verify datums assembled from resolved ellipsoids and meridians.
// Dependencies: crate::{core, fixture, interfaces}
// ============================================================================

//! ## Overview
//! A geodetic datum is assembled from an ellipsoid and a prime meridian, each
//! resolved independently. The same GIGS datum can be built twice, once from
//! user-defined components and once from authority components; both builds
//! must pass the same datum-level checks. Vertical datums are leaves.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::rc::Rc;

use crate::core::error::FixtureResult;
use crate::core::identity::AuthorityCode;
use crate::core::identity::FixtureKind;
use crate::fixture::context::Resources;
use crate::fixture::delegate::Delegate;
use crate::fixture::node::Fixture;
use crate::fixture::node::FixtureNode;
use crate::fixture::node::from_factory;
use crate::fixture::resolver::ComponentSource;
use crate::fixture::resolver::Resolved;
use crate::fixture::verify::ExpectedIdentification;
use crate::interfaces::AuthorityFactory;
use crate::interfaces::FactoryResult;
use crate::interfaces::GeodeticDatum;
use crate::interfaces::VerticalDatum;
use crate::series::component_name;
use crate::series::ellipsoid::EllipsoidFixture;
use crate::series::ellipsoid::GIGS_ELLIPSOID_A;
use crate::series::ellipsoid::GIGS_ELLIPSOID_I;
use crate::series::prime_meridian::GIGS_GREENWICH;
use crate::series::prime_meridian::GIGS_PARIS;
use crate::series::prime_meridian::PrimeMeridianFixture;
use crate::series::properties_of;
use crate::series::require_source;

// ============================================================================
// SECTION: Geodetic Datum
// ============================================================================

/// Authority code of the WGS 84 ellipsoid.
const WGS84_ELLIPSOID: u32 = 7030;
/// Authority code of the Greenwich meridian.
const GREENWICH: u32 = 8901;

/// User-defined geodetic datum.
pub struct GeodeticDatumFixture {
    /// Node holding the built datum.
    node: FixtureNode<Rc<dyn GeodeticDatum>>,
    /// Ellipsoid source.
    ellipsoid_source: Option<ComponentSource<EllipsoidFixture>>,
    /// Prime meridian source.
    prime_meridian_source: Option<ComponentSource<PrimeMeridianFixture>>,
    /// Resolved ellipsoid.
    ellipsoid: Option<Resolved<EllipsoidFixture>>,
    /// Resolved prime meridian.
    prime_meridian: Option<Resolved<PrimeMeridianFixture>>,
    /// Aliases handed to the factory.
    aliases: &'static [&'static str],
}

impl GeodeticDatumFixture {
    /// Sets identity and component sources.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn define(
        &mut self,
        code: u32,
        name: &str,
        ellipsoid: ComponentSource<EllipsoidFixture>,
        prime_meridian: ComponentSource<PrimeMeridianFixture>,
    ) -> FixtureResult {
        self.set_identity(code, name)?;
        self.ellipsoid_source = Some(ellipsoid);
        self.prime_meridian_source = Some(prime_meridian);
        Ok(())
    }

    /// Sets the aliases handed to the factory.
    pub const fn set_aliases(&mut self, aliases: &'static [&'static str]) {
        self.aliases = aliases;
    }

    /// Returns the resolved ellipsoid once built.
    #[must_use]
    pub const fn ellipsoid(&self) -> Option<&Resolved<EllipsoidFixture>> {
        self.ellipsoid.as_ref()
    }

    /// Returns the resolved prime meridian once built.
    #[must_use]
    pub const fn prime_meridian(&self) -> Option<&Resolved<PrimeMeridianFixture>> {
        self.prime_meridian.as_ref()
    }

    /// GIGS geodetic datum A from user-defined components.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_datum_a(fixture: &mut Self) -> FixtureResult {
        fixture.set_aliases(&["WGS 84"]);
        fixture.define(
            66001,
            "GIGS geodetic datum A",
            ComponentSource::UserDefined(GIGS_ELLIPSOID_A),
            ComponentSource::UserDefined(GIGS_GREENWICH),
        )
    }

    /// GIGS geodetic datum A from authority components.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_datum_a_authority(fixture: &mut Self) -> FixtureResult {
        fixture.set_aliases(&["WGS 84"]);
        fixture.define(
            66001,
            "GIGS geodetic datum A",
            ComponentSource::authority(WGS84_ELLIPSOID),
            ComponentSource::authority(GREENWICH),
        )
    }

    /// GIGS geodetic datum E, with a foot-based ellipsoid and Paris meridian.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_datum_e(fixture: &mut Self) -> FixtureResult {
        fixture.define(
            66005,
            "GIGS geodetic datum E",
            ComponentSource::UserDefined(GIGS_ELLIPSOID_I),
            ComponentSource::UserDefined(GIGS_PARIS),
        )
    }
}

/// Delegate to [`GeodeticDatumFixture::gigs_datum_a`].
pub const GIGS_DATUM_A: Delegate<GeodeticDatumFixture> =
    Delegate::new("gigs_datum_a", GeodeticDatumFixture::gigs_datum_a);
/// Delegate to [`GeodeticDatumFixture::gigs_datum_a_authority`].
pub const GIGS_DATUM_A_AUTHORITY: Delegate<GeodeticDatumFixture> =
    Delegate::new("gigs_datum_a_authority", GeodeticDatumFixture::gigs_datum_a_authority);
/// Delegate to [`GeodeticDatumFixture::gigs_datum_e`].
pub const GIGS_DATUM_E: Delegate<GeodeticDatumFixture> =
    Delegate::new("gigs_datum_e", GeodeticDatumFixture::gigs_datum_e);

impl Fixture for GeodeticDatumFixture {
    type Object = Rc<dyn GeodeticDatum>;

    const KIND: FixtureKind = FixtureKind::GeodeticDatum;

    fn instantiate(resources: &Resources) -> Self {
        Self {
            node: FixtureNode::new(Self::KIND, resources),
            ellipsoid_source: None,
            prime_meridian_source: None,
            ellipsoid: None,
            prime_meridian: None,
            aliases: &[],
        }
    }

    fn node(&self) -> &FixtureNode<Self::Object> {
        &self.node
    }

    fn node_mut(&mut self) -> &mut FixtureNode<Self::Object> {
        &mut self.node
    }

    fn construct(&mut self) -> FixtureResult<Option<Self::Object>> {
        let context = self.node.context();
        let properties = properties_of(context, self.aliases)?;
        let factory = context.resources().datum_factory(Self::KIND)?;
        let ellipsoid =
            require_source(self.ellipsoid_source, Self::KIND, "ellipsoid")?.resolve(context)?;
        let prime_meridian = require_source(self.prime_meridian_source, Self::KIND, "prime meridian")?
            .resolve(context)?;
        let created = factory.create_geodetic_datum(
            &properties,
            Rc::clone(ellipsoid.object()),
            Rc::clone(prime_meridian.object()),
        );
        self.ellipsoid = Some(ellipsoid);
        self.prime_meridian = Some(prime_meridian);
        from_factory(Self::KIND, created)
    }

    fn check(&mut self, object: &Self::Object) -> FixtureResult {
        let Self {
            node,
            ellipsoid,
            prime_meridian,
            aliases,
            ..
        } = self;
        let context = node.context_mut();
        let expected = ExpectedIdentification::of(context.require_identity()?, *aliases);
        context.check_structure(&**object)?;
        context.check_identification(&**object, &expected)?;
        if let Some(ellipsoid) = ellipsoid {
            if let Some(name) = component_name(ellipsoid) {
                context.check_dependency_name("ellipsoid.name", &*object.ellipsoid(), &name)?;
            }
            ellipsoid.verify_within(context)?;
        }
        if let Some(prime_meridian) = prime_meridian {
            if let Some(name) = component_name(prime_meridian) {
                context.check_dependency_name(
                    "prime_meridian.name",
                    &*object.prime_meridian(),
                    &name,
                )?;
            }
            prime_meridian.verify_within(context)?;
        }
        Ok(())
    }

    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object> {
        authority.create_geodetic_datum(&code.as_lookup_key())
    }
}

// ============================================================================
// SECTION: Vertical Datum
// ============================================================================

/// User-defined vertical datum.
pub struct VerticalDatumFixture {
    /// Node holding the built datum.
    node: FixtureNode<Rc<dyn VerticalDatum>>,
}

impl VerticalDatumFixture {
    /// GIGS vertical datum A.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_vertical_datum_a(fixture: &mut Self) -> FixtureResult {
        fixture.set_identity(66600, "GIGS vertical datum A")
    }
}

/// Delegate to [`VerticalDatumFixture::gigs_vertical_datum_a`].
pub const GIGS_VERTICAL_DATUM_A: Delegate<VerticalDatumFixture> =
    Delegate::new("gigs_vertical_datum_a", VerticalDatumFixture::gigs_vertical_datum_a);

impl Fixture for VerticalDatumFixture {
    type Object = Rc<dyn VerticalDatum>;

    const KIND: FixtureKind = FixtureKind::VerticalDatum;

    fn instantiate(resources: &Resources) -> Self {
        Self {
            node: FixtureNode::new(Self::KIND, resources),
        }
    }

    fn node(&self) -> &FixtureNode<Self::Object> {
        &self.node
    }

    fn node_mut(&mut self) -> &mut FixtureNode<Self::Object> {
        &mut self.node
    }

    fn construct(&mut self) -> FixtureResult<Option<Self::Object>> {
        let context = self.node.context();
        let properties = properties_of(context, &[])?;
        let factory = context.resources().datum_factory(Self::KIND)?;
        from_factory(Self::KIND, factory.create_vertical_datum(&properties))
    }

    fn check(&mut self, object: &Self::Object) -> FixtureResult {
        let context = self.node.context_mut();
        let expected = ExpectedIdentification::of(context.require_identity()?, &[]);
        context.check_structure(&**object)?;
        context.check_identification(&**object, &expected)
    }

    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object> {
        authority.create_vertical_datum(&code.as_lookup_key())
    }
}
