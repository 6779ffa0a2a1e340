// crates/gigs-core/src/series/crs.rs
// ============================================================================
// Module: CRS Fixtures
// Description: User-defined geographic, vertical, and projected CRS.
// Purpose: Verify CRS assembled from resolved datums and conversions.
// Dependencies: crate::{core, fixture, interfaces}
// ============================================================================

//! ## Overview
//! Geographic and vertical CRS wrap a datum; projected CRS combine a base
//! geographic CRS with a defining conversion. Every component goes through
//! [`ComponentSource`] so one GIGS CRS can be built on user-defined or
//! authority components.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::rc::Rc;

use crate::core::error::FixtureError;
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
use crate::interfaces::GeographicCrs;
use crate::interfaces::ProjectedCrs;
use crate::interfaces::VerticalCrs;
use crate::series::component_name;
use crate::series::datum::GIGS_DATUM_A;
use crate::series::datum::GIGS_DATUM_E;
use crate::series::datum::GIGS_VERTICAL_DATUM_A;
use crate::series::datum::GeodeticDatumFixture;
use crate::series::datum::VerticalDatumFixture;
use crate::series::operation::ConversionFixture;
use crate::series::operation::GIGS_UPS_NORTH;
use crate::series::operation::GIGS_UTM_ZONE_31N;
use crate::series::properties_of;
use crate::series::require_source;

// ============================================================================
// SECTION: Authority Codes
// ============================================================================

/// World Geodetic System 1984 datum.
const WGS84_DATUM: u32 = 6326;
/// WGS 84 geographic 2D CRS.
const WGS84_CRS: u32 = 4326;
/// UTM zone 31N conversion.
const UTM_ZONE_31N: u32 = 16031;
/// Mean Sea Level vertical datum.
const MEAN_SEA_LEVEL: u32 = 5100;

// ============================================================================
// SECTION: Geographic CRS
// ============================================================================

/// User-defined geographic CRS.
pub struct GeographicCrsFixture {
    /// Node holding the built CRS.
    node: FixtureNode<Rc<dyn GeographicCrs>>,
    /// Coordinate system dimension.
    dimension: u8,
    /// Datum source.
    datum_source: Option<ComponentSource<GeodeticDatumFixture>>,
    /// Resolved datum.
    datum: Option<Resolved<GeodeticDatumFixture>>,
}

impl GeographicCrsFixture {
    /// Sets identity, datum source, and dimension.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node, or a misuse error when the
    /// dimension is neither 2 nor 3.
    pub fn define(
        &mut self,
        code: u32,
        name: &str,
        datum: ComponentSource<GeodeticDatumFixture>,
        dimension: u8,
    ) -> FixtureResult {
        if !matches!(dimension, 2 | 3) {
            return Err(FixtureError::misuse(format!(
                "geographic crs dimension must be 2 or 3, got {dimension}"
            )));
        }
        self.set_identity(code, name)?;
        self.datum_source = Some(datum);
        self.dimension = dimension;
        Ok(())
    }

    /// Returns the resolved datum once built.
    #[must_use]
    pub const fn datum(&self) -> Option<&Resolved<GeodeticDatumFixture>> {
        self.datum.as_ref()
    }

    /// GIGS geogCRS A, 2D, on user-defined datum A.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_geog_crs_a(fixture: &mut Self) -> FixtureResult {
        fixture.define(64003, "GIGS geogCRS A", ComponentSource::UserDefined(GIGS_DATUM_A), 2)
    }

    /// GIGS geogCRS A, 2D, on the authority WGS 84 datum.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_geog_crs_a_authority(fixture: &mut Self) -> FixtureResult {
        fixture.define(64003, "GIGS geogCRS A", ComponentSource::authority(WGS84_DATUM), 2)
    }

    /// GIGS geogCRS A, 3D.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_geog_crs_a_3d(fixture: &mut Self) -> FixtureResult {
        fixture.define(64004, "GIGS geog3DCRS A", ComponentSource::UserDefined(GIGS_DATUM_A), 3)
    }

    /// GIGS geogCRS E on user-defined datum E.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_geog_crs_e(fixture: &mut Self) -> FixtureResult {
        fixture.define(64009, "GIGS geogCRS E", ComponentSource::UserDefined(GIGS_DATUM_E), 2)
    }
}

/// Delegate to [`GeographicCrsFixture::gigs_geog_crs_a`].
pub const GIGS_GEOG_CRS_A: Delegate<GeographicCrsFixture> =
    Delegate::new("gigs_geog_crs_a", GeographicCrsFixture::gigs_geog_crs_a);
/// Delegate to [`GeographicCrsFixture::gigs_geog_crs_a_authority`].
pub const GIGS_GEOG_CRS_A_AUTHORITY: Delegate<GeographicCrsFixture> =
    Delegate::new("gigs_geog_crs_a_authority", GeographicCrsFixture::gigs_geog_crs_a_authority);
/// Delegate to [`GeographicCrsFixture::gigs_geog_crs_a_3d`].
pub const GIGS_GEOG_CRS_A_3D: Delegate<GeographicCrsFixture> =
    Delegate::new("gigs_geog_crs_a_3d", GeographicCrsFixture::gigs_geog_crs_a_3d);
/// Delegate to [`GeographicCrsFixture::gigs_geog_crs_e`].
pub const GIGS_GEOG_CRS_E: Delegate<GeographicCrsFixture> =
    Delegate::new("gigs_geog_crs_e", GeographicCrsFixture::gigs_geog_crs_e);

impl Fixture for GeographicCrsFixture {
    type Object = Rc<dyn GeographicCrs>;

    const KIND: FixtureKind = FixtureKind::GeographicCrs;

    fn instantiate(resources: &Resources) -> Self {
        Self {
            node: FixtureNode::new(Self::KIND, resources),
            dimension: 2,
            datum_source: None,
            datum: None,
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
        let factory = context.resources().crs_factory(Self::KIND)?;
        let datum = require_source(self.datum_source, Self::KIND, "datum")?.resolve(context)?;
        let created =
            factory.create_geographic_crs(&properties, Rc::clone(datum.object()), self.dimension);
        self.datum = Some(datum);
        from_factory(Self::KIND, created)
    }

    fn check(&mut self, object: &Self::Object) -> FixtureResult {
        let Self {
            node,
            dimension,
            datum,
            ..
        } = self;
        let context = node.context_mut();
        let expected = ExpectedIdentification::of(context.require_identity()?, &[]);
        context.check_structure(&**object)?;
        context.check_identification(&**object, &expected)?;
        context.check_that(
            "dimension",
            object.dimension() == *dimension,
            *dimension,
            object.dimension(),
        )?;
        if let Some(datum) = datum {
            if let Some(name) = component_name(datum) {
                context.check_dependency_name("datum.name", &*object.datum(), &name)?;
            }
            datum.verify_within(context)?;
        }
        Ok(())
    }

    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object> {
        authority.create_geographic_crs(&code.as_lookup_key())
    }
}

// ============================================================================
// SECTION: Vertical CRS
// ============================================================================

/// User-defined vertical CRS.
pub struct VerticalCrsFixture {
    /// Node holding the built CRS.
    node: FixtureNode<Rc<dyn VerticalCrs>>,
    /// Datum source.
    datum_source: Option<ComponentSource<VerticalDatumFixture>>,
    /// Resolved datum.
    datum: Option<Resolved<VerticalDatumFixture>>,
}

impl VerticalCrsFixture {
    /// Sets identity and datum source.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn define(
        &mut self,
        code: u32,
        name: &str,
        datum: ComponentSource<VerticalDatumFixture>,
    ) -> FixtureResult {
        self.set_identity(code, name)?;
        self.datum_source = Some(datum);
        Ok(())
    }

    /// GIGS vertCRS A1 on user-defined vertical datum A.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_vertical_crs_a(fixture: &mut Self) -> FixtureResult {
        fixture.define(64501, "GIGS vertCRS A1", ComponentSource::UserDefined(GIGS_VERTICAL_DATUM_A))
    }

    /// GIGS vertCRS A1 on the authority mean sea level datum.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_vertical_crs_a_authority(fixture: &mut Self) -> FixtureResult {
        fixture.define(64501, "GIGS vertCRS A1", ComponentSource::authority(MEAN_SEA_LEVEL))
    }
}

/// Delegate to [`VerticalCrsFixture::gigs_vertical_crs_a`].
pub const GIGS_VERTICAL_CRS_A: Delegate<VerticalCrsFixture> =
    Delegate::new("gigs_vertical_crs_a", VerticalCrsFixture::gigs_vertical_crs_a);
/// Delegate to [`VerticalCrsFixture::gigs_vertical_crs_a_authority`].
pub const GIGS_VERTICAL_CRS_A_AUTHORITY: Delegate<VerticalCrsFixture> =
    Delegate::new("gigs_vertical_crs_a_authority", VerticalCrsFixture::gigs_vertical_crs_a_authority);

impl Fixture for VerticalCrsFixture {
    type Object = Rc<dyn VerticalCrs>;

    const KIND: FixtureKind = FixtureKind::VerticalCrs;

    fn instantiate(resources: &Resources) -> Self {
        Self {
            node: FixtureNode::new(Self::KIND, resources),
            datum_source: None,
            datum: None,
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
        let factory = context.resources().crs_factory(Self::KIND)?;
        let datum = require_source(self.datum_source, Self::KIND, "datum")?.resolve(context)?;
        let created = factory.create_vertical_crs(&properties, Rc::clone(datum.object()));
        self.datum = Some(datum);
        from_factory(Self::KIND, created)
    }

    fn check(&mut self, object: &Self::Object) -> FixtureResult {
        let Self {
            node,
            datum,
            ..
        } = self;
        let context = node.context_mut();
        let expected = ExpectedIdentification::of(context.require_identity()?, &[]);
        context.check_structure(&**object)?;
        context.check_identification(&**object, &expected)?;
        if let Some(datum) = datum {
            if let Some(name) = component_name(datum) {
                context.check_dependency_name("datum.name", &*object.datum(), &name)?;
            }
            datum.verify_within(context)?;
        }
        Ok(())
    }

    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object> {
        authority.create_vertical_crs(&code.as_lookup_key())
    }
}

// ============================================================================
// SECTION: Projected CRS
// ============================================================================

/// User-defined projected CRS.
pub struct ProjectedCrsFixture {
    /// Node holding the built CRS.
    node: FixtureNode<Rc<dyn ProjectedCrs>>,
    /// Base CRS source.
    base_source: Option<ComponentSource<GeographicCrsFixture>>,
    /// Conversion source.
    conversion_source: Option<ComponentSource<ConversionFixture>>,
    /// Resolved base CRS.
    base: Option<Resolved<GeographicCrsFixture>>,
    /// Resolved conversion.
    conversion: Option<Resolved<ConversionFixture>>,
}

impl ProjectedCrsFixture {
    /// Sets identity, base CRS, and conversion sources.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn define(
        &mut self,
        code: u32,
        name: &str,
        base: ComponentSource<GeographicCrsFixture>,
        conversion: ComponentSource<ConversionFixture>,
    ) -> FixtureResult {
        self.set_identity(code, name)?;
        self.base_source = Some(base);
        self.conversion_source = Some(conversion);
        Ok(())
    }

    /// Returns the resolved base CRS once built.
    #[must_use]
    pub const fn base(&self) -> Option<&Resolved<GeographicCrsFixture>> {
        self.base.as_ref()
    }

    /// Returns the resolved conversion once built.
    #[must_use]
    pub const fn conversion(&self) -> Option<&Resolved<ConversionFixture>> {
        self.conversion.as_ref()
    }

    /// GIGS projCRS A1: UTM zone 31N on user-defined geogCRS A.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_projected_crs_a(fixture: &mut Self) -> FixtureResult {
        fixture.define(
            62001,
            "GIGS projCRS A1",
            ComponentSource::UserDefined(GIGS_GEOG_CRS_A),
            ComponentSource::UserDefined(GIGS_UTM_ZONE_31N),
        )
    }

    /// GIGS projCRS A1 on authority components.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_projected_crs_a_authority(fixture: &mut Self) -> FixtureResult {
        fixture.define(
            62001,
            "GIGS projCRS A1",
            ComponentSource::authority(WGS84_CRS),
            ComponentSource::authority(UTM_ZONE_31N),
        )
    }

    /// GIGS projCRS A2: polar stereographic north on user-defined geogCRS A.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_projected_crs_ups(fixture: &mut Self) -> FixtureResult {
        fixture.define(
            62002,
            "GIGS projCRS A2",
            ComponentSource::UserDefined(GIGS_GEOG_CRS_A),
            ComponentSource::UserDefined(GIGS_UPS_NORTH),
        )
    }
}

/// Delegate to [`ProjectedCrsFixture::gigs_projected_crs_a`].
pub const GIGS_PROJECTED_CRS_A: Delegate<ProjectedCrsFixture> =
    Delegate::new("gigs_projected_crs_a", ProjectedCrsFixture::gigs_projected_crs_a);
/// Delegate to [`ProjectedCrsFixture::gigs_projected_crs_a_authority`].
pub const GIGS_PROJECTED_CRS_A_AUTHORITY: Delegate<ProjectedCrsFixture> = Delegate::new(
    "gigs_projected_crs_a_authority",
    ProjectedCrsFixture::gigs_projected_crs_a_authority,
);
/// Delegate to [`ProjectedCrsFixture::gigs_projected_crs_ups`].
pub const GIGS_PROJECTED_CRS_UPS: Delegate<ProjectedCrsFixture> =
    Delegate::new("gigs_projected_crs_ups", ProjectedCrsFixture::gigs_projected_crs_ups);

impl Fixture for ProjectedCrsFixture {
    type Object = Rc<dyn ProjectedCrs>;

    const KIND: FixtureKind = FixtureKind::ProjectedCrs;

    fn instantiate(resources: &Resources) -> Self {
        Self {
            node: FixtureNode::new(Self::KIND, resources),
            base_source: None,
            conversion_source: None,
            base: None,
            conversion: None,
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
        let factory = context.resources().crs_factory(Self::KIND)?;
        let base = require_source(self.base_source, Self::KIND, "base crs")?.resolve(context)?;
        let conversion =
            require_source(self.conversion_source, Self::KIND, "conversion")?.resolve(context)?;
        let created = factory.create_projected_crs(
            &properties,
            Rc::clone(base.object()),
            Rc::clone(conversion.object()),
        );
        self.base = Some(base);
        self.conversion = Some(conversion);
        from_factory(Self::KIND, created)
    }

    fn check(&mut self, object: &Self::Object) -> FixtureResult {
        let Self {
            node,
            base,
            conversion,
            ..
        } = self;
        let context = node.context_mut();
        let expected = ExpectedIdentification::of(context.require_identity()?, &[]);
        context.check_structure(&**object)?;
        context.check_identification(&**object, &expected)?;
        if let Some(base) = base {
            if let Some(name) = component_name(base) {
                context.check_dependency_name("base_crs.name", &*object.base_crs(), &name)?;
            }
            base.verify_within(context)?;
        }
        if let Some(conversion) = conversion {
            if let Some(name) = component_name(conversion) {
                context.check_dependency_name("conversion.name", &*object.conversion(), &name)?;
            }
            conversion.verify_within(context)?;
        }
        Ok(())
    }

    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object> {
        authority.create_projected_crs(&code.as_lookup_key())
    }
}
