// crates/gigs-core/src/series/prime_meridian.rs
// ============================================================================
// Module: Prime Meridian Fixtures
// Description: User-defined prime meridians built from a Greenwich longitude.
// Purpose: Verify longitude and angular unit of library-built prime meridians.
// Dependencies: crate::{core, fixture, interfaces}
// ============================================================================

//! ## Overview
//! A prime meridian is defined by its longitude from Greenwich in an angular
//! unit that is itself resolved through the authority or a unit fixture.

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
use crate::interfaces::PrimeMeridian;
use crate::interfaces::UnitKind;
use crate::series::properties_of;
use crate::series::require_source;
use crate::series::unit::GIGS_GRAD;
use crate::series::unit::UnitFixture;

/// Authority code of the degree.
const DEGREE: u32 = 9102;

// ============================================================================
// SECTION: Fixture
// ============================================================================

/// User-defined prime meridian.
pub struct PrimeMeridianFixture {
    /// Node holding the built prime meridian.
    node: FixtureNode<Rc<dyn PrimeMeridian>>,
    /// Longitude from Greenwich in the angular unit.
    greenwich_longitude: f64,
    /// Angular unit source.
    unit_source: Option<ComponentSource<UnitFixture>>,
    /// Resolved angular unit.
    unit: Option<Resolved<UnitFixture>>,
}

impl PrimeMeridianFixture {
    /// Sets identity and defining values.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn define(
        &mut self,
        code: u32,
        name: &str,
        greenwich_longitude: f64,
        unit: ComponentSource<UnitFixture>,
    ) -> FixtureResult {
        self.set_identity(code, name)?;
        self.greenwich_longitude = greenwich_longitude;
        self.unit_source = Some(unit);
        Ok(())
    }

    /// Returns the resolved angular unit once built.
    #[must_use]
    pub const fn unit(&self) -> Option<&Resolved<UnitFixture>> {
        self.unit.as_ref()
    }

    /// Greenwich.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_greenwich(fixture: &mut Self) -> FixtureResult {
        fixture.define(68901, "GIGS PM A", 0.0, ComponentSource::authority(DEGREE))
    }

    /// Paris, in grads from a user-defined unit.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_paris(fixture: &mut Self) -> FixtureResult {
        fixture.define(
            68903,
            "GIGS PM D",
            2.596_921_3,
            ComponentSource::UserDefined(GIGS_GRAD),
        )
    }
}

/// Delegate to [`PrimeMeridianFixture::gigs_greenwich`].
pub const GIGS_GREENWICH: Delegate<PrimeMeridianFixture> =
    Delegate::new("gigs_greenwich", PrimeMeridianFixture::gigs_greenwich);
/// Delegate to [`PrimeMeridianFixture::gigs_paris`].
pub const GIGS_PARIS: Delegate<PrimeMeridianFixture> =
    Delegate::new("gigs_paris", PrimeMeridianFixture::gigs_paris);

impl Fixture for PrimeMeridianFixture {
    type Object = Rc<dyn PrimeMeridian>;

    const KIND: FixtureKind = FixtureKind::PrimeMeridian;

    fn instantiate(resources: &Resources) -> Self {
        Self {
            node: FixtureNode::new(Self::KIND, resources),
            greenwich_longitude: 0.0,
            unit_source: None,
            unit: None,
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
        let unit =
            require_source(self.unit_source, Self::KIND, "angular unit")?.resolve(context)?;
        let created = factory.create_prime_meridian(
            &properties,
            self.greenwich_longitude,
            Rc::clone(unit.object()),
        );
        self.unit = Some(unit);
        from_factory(Self::KIND, created)
    }

    fn check(&mut self, object: &Self::Object) -> FixtureResult {
        let Self {
            node,
            greenwich_longitude,
            unit,
            ..
        } = self;
        let context = node.context_mut();
        let expected = ExpectedIdentification::of(context.require_identity()?, &[]);
        context.check_structure(&**object)?;
        context.check_identification(&**object, &expected)?;
        let angular_unit = object.angular_unit();
        context.check_that(
            "angular_unit.kind",
            angular_unit.kind() == UnitKind::Angle,
            UnitKind::Angle,
            angular_unit.kind(),
        )?;
        let expected_to_base = unit.as_ref().map_or(1.0, |unit| unit.object().to_base());
        context.check_measure(
            "greenwich_longitude",
            (object.greenwich_longitude(), angular_unit.to_base()),
            (*greenwich_longitude, expected_to_base),
        )?;
        if let Some(unit) = unit {
            unit.verify_within(context)?;
        }
        Ok(())
    }

    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object> {
        authority.create_prime_meridian(&code.as_lookup_key())
    }
}
