// crates/gigs-core/src/series/operation.rs
// ============================================================================
// Module: Coordinate Operation Fixtures
// Description: User-defined conversions and transformations.
// Purpose: Verify method names, parameter values, and operation endpoints.
// Dependencies: crate::{core, fixture, interfaces}
// ============================================================================

//! ## Overview
//! Conversions are defined by a method name and a list of named parameter
//! values with units. Transformations add a source and a target geographic
//! CRS, each resolved independently, and an optional accuracy.
//!
//! Parameters are compared by name, ignoring case, and numerically after
//! conversion into the expected unit. Parameters the library adds beyond the
//! expected list are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::rc::Rc;

use crate::core::error::FixtureResult;
use crate::core::identity::AuthorityCode;
use crate::core::identity::FixtureKind;
use crate::fixture::context::FixtureContext;
use crate::fixture::context::Resources;
use crate::fixture::delegate::Delegate;
use crate::fixture::node::Fixture;
use crate::fixture::node::FixtureNode;
use crate::fixture::node::from_factory;
use crate::fixture::resolver::ComponentSource;
use crate::fixture::resolver::Resolved;
use crate::fixture::verify::ExpectedIdentification;
use crate::interfaces::AuthorityFactory;
use crate::interfaces::Conversion;
use crate::interfaces::FactoryResult;
use crate::interfaces::MeasureUnit;
use crate::interfaces::ParameterValue;
use crate::interfaces::Transformation;
use crate::interfaces::TransformationRequest;
use crate::interfaces::find_parameter;
use crate::series::component_name;
use crate::series::crs::GIGS_GEOG_CRS_E;
use crate::series::crs::GeographicCrsFixture;
use crate::series::properties_of;
use crate::series::require_source;

// ============================================================================
// SECTION: Parameter Checks
// ============================================================================

/// Checks every expected parameter against the library's parameter list.
fn check_parameters(
    context: &mut FixtureContext,
    actual: &[ParameterValue],
    expected: &[ParameterValue],
) -> FixtureResult {
    for parameter in expected {
        let found = find_parameter(actual, &parameter.name);
        context.check_that(
            &parameter.name,
            found.is_some(),
            "present",
            "absent",
        )?;
        if let Some(found) = found {
            context.check_that(
                &parameter.name,
                found.unit.kind == parameter.unit.kind,
                parameter.unit.kind,
                found.unit.kind,
            )?;
            context.check_measure(
                &parameter.name,
                (found.value, found.unit.to_base),
                (parameter.value, parameter.unit.to_base),
            )?;
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

/// User-defined conversion.
pub struct ConversionFixture {
    /// Node holding the built conversion.
    node: FixtureNode<Rc<dyn Conversion>>,
    /// Operation method name.
    method: &'static str,
    /// Expected parameter values.
    parameters: Vec<ParameterValue>,
}

impl ConversionFixture {
    /// Sets identity, method, and parameters.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn define(
        &mut self,
        code: u32,
        name: &str,
        method: &'static str,
        parameters: Vec<ParameterValue>,
    ) -> FixtureResult {
        self.set_identity(code, name)?;
        self.method = method;
        self.parameters = parameters;
        Ok(())
    }

    /// Returns the expected parameters.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterValue] {
        &self.parameters
    }

    /// UTM zone 31N.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_utm_zone_31n(fixture: &mut Self) -> FixtureResult {
        fixture.define(
            65031,
            "GIGS UTM zone 31N",
            "Transverse Mercator",
            vec![
                ParameterValue::new("Latitude of natural origin", 0.0, MeasureUnit::DEGREE),
                ParameterValue::new("Longitude of natural origin", 3.0, MeasureUnit::DEGREE),
                ParameterValue::new(
                    "Scale factor at natural origin",
                    0.9996,
                    MeasureUnit::UNITY,
                ),
                ParameterValue::new("False easting", 500_000.0, MeasureUnit::METRE),
                ParameterValue::new("False northing", 0.0, MeasureUnit::METRE),
            ],
        )
    }

    /// Universal Polar Stereographic north.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_ups_north(fixture: &mut Self) -> FixtureResult {
        fixture.define(
            65041,
            "GIGS UPS North",
            "Polar Stereographic (variant A)",
            vec![
                ParameterValue::new("Latitude of natural origin", 90.0, MeasureUnit::DEGREE),
                ParameterValue::new("Longitude of natural origin", 0.0, MeasureUnit::DEGREE),
                ParameterValue::new(
                    "Scale factor at natural origin",
                    0.994,
                    MeasureUnit::UNITY,
                ),
                ParameterValue::new("False easting", 2_000_000.0, MeasureUnit::METRE),
                ParameterValue::new("False northing", 2_000_000.0, MeasureUnit::METRE),
            ],
        )
    }
}

/// Delegate to [`ConversionFixture::gigs_utm_zone_31n`].
pub const GIGS_UTM_ZONE_31N: Delegate<ConversionFixture> =
    Delegate::new("gigs_utm_zone_31n", ConversionFixture::gigs_utm_zone_31n);
/// Delegate to [`ConversionFixture::gigs_ups_north`].
pub const GIGS_UPS_NORTH: Delegate<ConversionFixture> =
    Delegate::new("gigs_ups_north", ConversionFixture::gigs_ups_north);

impl Fixture for ConversionFixture {
    type Object = Rc<dyn Conversion>;

    const KIND: FixtureKind = FixtureKind::Conversion;

    fn instantiate(resources: &Resources) -> Self {
        Self {
            node: FixtureNode::new(Self::KIND, resources),
            method: "",
            parameters: Vec::new(),
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
        let factory = context.resources().operation_factory(Self::KIND)?;
        from_factory(
            Self::KIND,
            factory.create_conversion(&properties, self.method, &self.parameters),
        )
    }

    fn check(&mut self, object: &Self::Object) -> FixtureResult {
        let context = self.node.context_mut();
        let expected = ExpectedIdentification::of(context.require_identity()?, &[]);
        context.check_structure(&**object)?;
        context.check_identification(&**object, &expected)?;
        context.check_text("method", object.method_name(), self.method)?;
        check_parameters(context, object.parameter_values(), &self.parameters)
    }

    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object> {
        authority.create_conversion(&code.as_lookup_key())
    }
}

// ============================================================================
// SECTION: Transformation
// ============================================================================

/// Authority code of WGS 84 geographic 2D.
const WGS84: u32 = 4326;

/// User-defined transformation.
pub struct TransformationFixture {
    /// Node holding the built transformation.
    node: FixtureNode<Rc<dyn Transformation>>,
    /// Operation method name.
    method: &'static str,
    /// Expected parameter values.
    parameters: Vec<ParameterValue>,
    /// Expected accuracy in metres.
    accuracy: Option<f64>,
    /// Source CRS source.
    source_crs_source: Option<ComponentSource<GeographicCrsFixture>>,
    /// Target CRS source.
    target_crs_source: Option<ComponentSource<GeographicCrsFixture>>,
    /// Resolved source CRS.
    source_crs: Option<Resolved<GeographicCrsFixture>>,
    /// Resolved target CRS.
    target_crs: Option<Resolved<GeographicCrsFixture>>,
}

impl TransformationFixture {
    /// Sets identity, endpoints, method, and parameters.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn define(
        &mut self,
        code: u32,
        name: &str,
        endpoints: (ComponentSource<GeographicCrsFixture>, ComponentSource<GeographicCrsFixture>),
        method: &'static str,
        parameters: Vec<ParameterValue>,
    ) -> FixtureResult {
        self.set_identity(code, name)?;
        self.source_crs_source = Some(endpoints.0);
        self.target_crs_source = Some(endpoints.1);
        self.method = method;
        self.parameters = parameters;
        Ok(())
    }

    /// Sets the expected accuracy.
    pub const fn set_accuracy(&mut self, accuracy: Option<f64>) {
        self.accuracy = accuracy;
    }

    /// Returns the resolved source CRS once built.
    #[must_use]
    pub const fn source_crs(&self) -> Option<&Resolved<GeographicCrsFixture>> {
        self.source_crs.as_ref()
    }

    /// Returns the resolved target CRS once built.
    #[must_use]
    pub const fn target_crs(&self) -> Option<&Resolved<GeographicCrsFixture>> {
        self.target_crs.as_ref()
    }

    /// Geocentric translations from GIGS geogCRS E to WGS 84.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_geocentric_translation_e(fixture: &mut Self) -> FixtureResult {
        fixture.set_accuracy(Some(5.0));
        fixture.define(
            61110,
            "GIGS geogCRS E to WGS 84 (1)",
            (ComponentSource::UserDefined(GIGS_GEOG_CRS_E), ComponentSource::authority(WGS84)),
            "Geocentric translations (geog2D domain)",
            vec![
                ParameterValue::new("X-axis translation", 371.0, MeasureUnit::METRE),
                ParameterValue::new("Y-axis translation", -112.0, MeasureUnit::METRE),
                ParameterValue::new("Z-axis translation", 434.0, MeasureUnit::METRE),
            ],
        )
    }

    /// Position vector transformation from GIGS geogCRS E to WGS 84.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_position_vector_e(fixture: &mut Self) -> FixtureResult {
        fixture.define(
            61111,
            "GIGS geogCRS E to WGS 84 (2)",
            (ComponentSource::UserDefined(GIGS_GEOG_CRS_E), ComponentSource::authority(WGS84)),
            "Position Vector transformation (geog2D domain)",
            vec![
                ParameterValue::new("X-axis translation", 446.448, MeasureUnit::METRE),
                ParameterValue::new("Y-axis translation", -125.157, MeasureUnit::METRE),
                ParameterValue::new("Z-axis translation", 542.06, MeasureUnit::METRE),
                ParameterValue::new("X-axis rotation", 0.15, MeasureUnit::ARC_SECOND),
                ParameterValue::new("Y-axis rotation", 0.247, MeasureUnit::ARC_SECOND),
                ParameterValue::new("Z-axis rotation", 0.842, MeasureUnit::ARC_SECOND),
                ParameterValue::new(
                    "Scale difference",
                    -20.489,
                    MeasureUnit::PARTS_PER_MILLION,
                ),
            ],
        )
    }
}

/// Delegate to [`TransformationFixture::gigs_geocentric_translation_e`].
pub const GIGS_GEOCENTRIC_TRANSLATION_E: Delegate<TransformationFixture> = Delegate::new(
    "gigs_geocentric_translation_e",
    TransformationFixture::gigs_geocentric_translation_e,
);
/// Delegate to [`TransformationFixture::gigs_position_vector_e`].
pub const GIGS_POSITION_VECTOR_E: Delegate<TransformationFixture> =
    Delegate::new("gigs_position_vector_e", TransformationFixture::gigs_position_vector_e);

impl Fixture for TransformationFixture {
    type Object = Rc<dyn Transformation>;

    const KIND: FixtureKind = FixtureKind::Transformation;

    fn instantiate(resources: &Resources) -> Self {
        Self {
            node: FixtureNode::new(Self::KIND, resources),
            method: "",
            parameters: Vec::new(),
            accuracy: None,
            source_crs_source: None,
            target_crs_source: None,
            source_crs: None,
            target_crs: None,
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
        let factory = context.resources().operation_factory(Self::KIND)?;
        let source =
            require_source(self.source_crs_source, Self::KIND, "source crs")?.resolve(context)?;
        let target =
            require_source(self.target_crs_source, Self::KIND, "target crs")?.resolve(context)?;
        let created = factory.create_transformation(
            &properties,
            TransformationRequest {
                source: Rc::clone(source.object()),
                target: Rc::clone(target.object()),
                method: self.method,
                parameters: &self.parameters,
                accuracy: self.accuracy,
            },
        );
        self.source_crs = Some(source);
        self.target_crs = Some(target);
        from_factory(Self::KIND, created)
    }

    fn check(&mut self, object: &Self::Object) -> FixtureResult {
        let Self {
            node,
            method,
            parameters,
            accuracy,
            source_crs,
            target_crs,
            ..
        } = self;
        let context = node.context_mut();
        let expected = ExpectedIdentification::of(context.require_identity()?, &[]);
        context.check_structure(&**object)?;
        context.check_identification(&**object, &expected)?;
        context.check_text("method", object.method_name(), *method)?;
        check_parameters(context, object.parameter_values(), parameters)?;
        if let Some(accuracy) = *accuracy {
            match object.accuracy() {
                Some(actual) => context.check_value("accuracy", actual, accuracy)?,
                None => context.check_that("accuracy", false, accuracy, "none")?,
            }
        }
        if let Some(source) = source_crs {
            if let Some(name) = component_name(source) {
                context.check_dependency_name("source_crs.name", &*object.source_crs(), &name)?;
            }
            source.verify_within(context)?;
        }
        if let Some(target) = target_crs {
            if let Some(name) = component_name(target) {
                context.check_dependency_name("target_crs.name", &*object.target_crs(), &name)?;
            }
            target.verify_within(context)?;
        }
        Ok(())
    }

    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object> {
        authority.create_transformation(&code.as_lookup_key())
    }
}
