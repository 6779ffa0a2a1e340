// crates/gigs-core/src/series/ellipsoid.rs
// ============================================================================
// Module: Ellipsoid Fixtures
// Description: User-defined ellipsoids built from literal axis values.
// Purpose: Verify semi-axes and flattening of library-built ellipsoids.
// Dependencies: crate::{core, fixture, interfaces}
// ============================================================================

//! ## Overview
//! An ellipsoid is defined by its semi-major axis plus either the inverse
//! flattening or the semi-minor axis. When the semi-minor axis defines the
//! shape, the expected inverse flattening is derived from both axes. The axis
//! unit is resolved either from the authority factory or from a
//! [`UnitFixture`](crate::series::unit::UnitFixture) build routine.

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
use crate::interfaces::Ellipsoid;
use crate::interfaces::EllipsoidShape;
use crate::interfaces::FactoryResult;
use crate::interfaces::UnitKind;
use crate::series::properties_of;
use crate::series::require_source;
use crate::series::unit::GIGS_BRITISH_FOOT;
use crate::series::unit::UnitFixture;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Inverse flattening `a / (a - b)`; infinite for a sphere.
#[must_use]
pub fn derived_inverse_flattening(semi_major: f64, semi_minor: f64) -> f64 {
    let difference = semi_major - semi_minor;
    if difference == 0.0 { f64::INFINITY } else { semi_major / difference }
}

/// Authority code of the metre.
const METRE: u32 = 9001;

// ============================================================================
// SECTION: Fixture
// ============================================================================

/// User-defined ellipsoid.
pub struct EllipsoidFixture {
    /// Node holding the built ellipsoid.
    node: FixtureNode<Rc<dyn Ellipsoid>>,
    /// Semi-major axis in the axis unit.
    semi_major: f64,
    /// Second defining parameter.
    shape: EllipsoidShape,
    /// Axis unit source.
    unit_source: Option<ComponentSource<UnitFixture>>,
    /// Resolved axis unit.
    unit: Option<Resolved<UnitFixture>>,
    /// Aliases handed to the factory.
    aliases: &'static [&'static str],
}

impl EllipsoidFixture {
    /// Sets identity and defining values.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn define(
        &mut self,
        code: u32,
        name: &str,
        semi_major: f64,
        shape: EllipsoidShape,
        unit: ComponentSource<UnitFixture>,
    ) -> FixtureResult {
        self.set_identity(code, name)?;
        self.semi_major = semi_major;
        self.shape = shape;
        self.unit_source = Some(unit);
        Ok(())
    }

    /// Sets the aliases handed to the factory.
    pub const fn set_aliases(&mut self, aliases: &'static [&'static str]) {
        self.aliases = aliases;
    }

    /// Returns the resolved axis unit once built.
    #[must_use]
    pub const fn unit(&self) -> Option<&Resolved<UnitFixture>> {
        self.unit.as_ref()
    }

    /// Expected inverse flattening for the current definition.
    #[must_use]
    pub fn expected_inverse_flattening(&self) -> f64 {
        match self.shape {
            EllipsoidShape::InverseFlattening(value) => value,
            EllipsoidShape::SemiMinorAxis(semi_minor) => {
                derived_inverse_flattening(self.semi_major, semi_minor)
            }
        }
    }

    /// GIGS ellipsoid A (WGS 84), defined by inverse flattening.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_ellipsoid_a(fixture: &mut Self) -> FixtureResult {
        fixture.set_aliases(&["WGS 84"]);
        fixture.define(
            67030,
            "GIGS ellipsoid A",
            6_378_137.0,
            EllipsoidShape::InverseFlattening(298.257_223_6),
            ComponentSource::authority(METRE),
        )
    }

    /// GIGS ellipsoid A, defined by its semi-minor axis.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_ellipsoid_a_by_semi_minor(fixture: &mut Self) -> FixtureResult {
        fixture.set_aliases(&["WGS 84"]);
        fixture.define(
            67030,
            "GIGS ellipsoid A",
            6_378_137.0,
            EllipsoidShape::SemiMinorAxis(6_356_752.314_247_833),
            ComponentSource::authority(METRE),
        )
    }

    /// GIGS ellipsoid B (Airy 1830).
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_ellipsoid_b(fixture: &mut Self) -> FixtureResult {
        fixture.set_aliases(&["Airy 1830"]);
        fixture.define(
            67001,
            "GIGS ellipsoid B",
            6_377_563.396,
            EllipsoidShape::InverseFlattening(299.324_964_6),
            ComponentSource::authority(METRE),
        )
    }

    /// GIGS ellipsoid E (International 1924).
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_ellipsoid_e(fixture: &mut Self) -> FixtureResult {
        fixture.set_aliases(&["International 1924"]);
        fixture.define(
            67022,
            "GIGS ellipsoid E",
            6_378_388.0,
            EllipsoidShape::InverseFlattening(297.0),
            ComponentSource::authority(METRE),
        )
    }

    /// GIGS ellipsoid H (sphere), defined by equal semi-axes.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_ellipsoid_h(fixture: &mut Self) -> FixtureResult {
        fixture.define(
            67052,
            "GIGS ellipsoid H",
            6_371_000.0,
            EllipsoidShape::SemiMinorAxis(6_371_000.0),
            ComponentSource::authority(METRE),
        )
    }

    /// GIGS ellipsoid I, axes in British feet from a user-defined unit.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_ellipsoid_i(fixture: &mut Self) -> FixtureResult {
        fixture.define(
            67018,
            "GIGS ellipsoid I",
            20_925_832.164,
            EllipsoidShape::SemiMinorAxis(20_854_892.013),
            ComponentSource::UserDefined(GIGS_BRITISH_FOOT),
        )
    }
}

/// Delegate to [`EllipsoidFixture::gigs_ellipsoid_a`].
pub const GIGS_ELLIPSOID_A: Delegate<EllipsoidFixture> =
    Delegate::new("gigs_ellipsoid_a", EllipsoidFixture::gigs_ellipsoid_a);
/// Delegate to [`EllipsoidFixture::gigs_ellipsoid_a_by_semi_minor`].
pub const GIGS_ELLIPSOID_A_BY_SEMI_MINOR: Delegate<EllipsoidFixture> = Delegate::new(
    "gigs_ellipsoid_a_by_semi_minor",
    EllipsoidFixture::gigs_ellipsoid_a_by_semi_minor,
);
/// Delegate to [`EllipsoidFixture::gigs_ellipsoid_b`].
pub const GIGS_ELLIPSOID_B: Delegate<EllipsoidFixture> =
    Delegate::new("gigs_ellipsoid_b", EllipsoidFixture::gigs_ellipsoid_b);
/// Delegate to [`EllipsoidFixture::gigs_ellipsoid_e`].
pub const GIGS_ELLIPSOID_E: Delegate<EllipsoidFixture> =
    Delegate::new("gigs_ellipsoid_e", EllipsoidFixture::gigs_ellipsoid_e);
/// Delegate to [`EllipsoidFixture::gigs_ellipsoid_h`].
pub const GIGS_ELLIPSOID_H: Delegate<EllipsoidFixture> =
    Delegate::new("gigs_ellipsoid_h", EllipsoidFixture::gigs_ellipsoid_h);
/// Delegate to [`EllipsoidFixture::gigs_ellipsoid_i`].
pub const GIGS_ELLIPSOID_I: Delegate<EllipsoidFixture> =
    Delegate::new("gigs_ellipsoid_i", EllipsoidFixture::gigs_ellipsoid_i);

impl Fixture for EllipsoidFixture {
    type Object = Rc<dyn Ellipsoid>;

    const KIND: FixtureKind = FixtureKind::Ellipsoid;

    fn instantiate(resources: &Resources) -> Self {
        Self {
            node: FixtureNode::new(Self::KIND, resources),
            semi_major: 0.0,
            shape: EllipsoidShape::InverseFlattening(f64::INFINITY),
            unit_source: None,
            unit: None,
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
        let unit = require_source(self.unit_source, Self::KIND, "axis unit")?.resolve(context)?;
        let created = factory.create_ellipsoid(
            &properties,
            self.semi_major,
            self.shape,
            Rc::clone(unit.object()),
        );
        self.unit = Some(unit);
        from_factory(Self::KIND, created)
    }

    fn check(&mut self, object: &Self::Object) -> FixtureResult {
        let expected_ivf = self.expected_inverse_flattening();
        let Self {
            node,
            semi_major,
            shape,
            unit,
            aliases,
            ..
        } = self;
        let context = node.context_mut();
        let expected = ExpectedIdentification::of(context.require_identity()?, *aliases);
        context.check_structure(&**object)?;
        context.check_identification(&**object, &expected)?;
        let axis_unit = object.axis_unit();
        context.check_that(
            "axis_unit.kind",
            axis_unit.kind() == UnitKind::Length,
            UnitKind::Length,
            axis_unit.kind(),
        )?;
        let expected_to_base = unit.as_ref().map_or(1.0, |unit| unit.object().to_base());
        context.check_measure(
            "semi_major_axis",
            (object.semi_major_axis(), axis_unit.to_base()),
            (*semi_major, expected_to_base),
        )?;
        match *shape {
            EllipsoidShape::InverseFlattening(_) => {
                context.check_that(
                    "inverse_flattening_definitive",
                    object.is_inverse_flattening_definitive(),
                    true,
                    false,
                )?;
            }
            EllipsoidShape::SemiMinorAxis(semi_minor) => {
                context.check_measure(
                    "semi_minor_axis",
                    (object.semi_minor_axis(), axis_unit.to_base()),
                    (semi_minor, expected_to_base),
                )?;
            }
        }
        context.check_value("inverse_flattening", object.inverse_flattening(), expected_ivf)?;
        if let Some(unit) = unit {
            unit.verify_within(context)?;
        }
        Ok(())
    }

    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object> {
        authority.create_ellipsoid(&code.as_lookup_key())
    }
}
