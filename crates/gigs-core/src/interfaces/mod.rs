// crates/gigs-core/src/interfaces/mod.rs
// ============================================================================
// Module: GIGS Library Interfaces
// Description: Accessor and factory contracts of the geodetic library under test.
// Purpose: Define the collaborator surfaces fixtures build and inspect through.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The harness never computes geodesy itself. It asks the library under test
//! to construct objects through these factory traits and reads them back
//! through the accessor traits. Implementations live with the library; the
//! harness treats them as opaque.
//!
//! Factories report three outcomes: an object, no object (`Ok(None)`), or a
//! [`FactoryError`]. `FactoryError::Unsupported` marks an optional code or
//! method the library does not implement.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::properties::Identifier;
use crate::core::properties::Properties;

// ============================================================================
// SECTION: Units
// ============================================================================

/// Quantity measured by a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Length; base unit is the metre.
    Length,
    /// Angle; base unit is the radian.
    Angle,
    /// Dimensionless scale; base unit is unity.
    Scale,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Length => "length",
            Self::Angle => "angle",
            Self::Scale => "scale",
        })
    }
}

/// Unit attached to a literal parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasureUnit {
    /// Measured quantity.
    pub kind: UnitKind,
    /// Factor converting one unit into the base unit of its kind.
    pub to_base: f64,
}

impl MeasureUnit {
    /// Metre.
    pub const METRE: Self = Self {
        kind: UnitKind::Length,
        to_base: 1.0,
    };
    /// Degree.
    pub const DEGREE: Self = Self {
        kind: UnitKind::Angle,
        to_base: std::f64::consts::PI / 180.0,
    };
    /// Arc-second.
    pub const ARC_SECOND: Self = Self {
        kind: UnitKind::Angle,
        to_base: std::f64::consts::PI / 648_000.0,
    };
    /// Unity.
    pub const UNITY: Self = Self {
        kind: UnitKind::Scale,
        to_base: 1.0,
    };
    /// Parts per million.
    pub const PARTS_PER_MILLION: Self = Self {
        kind: UnitKind::Scale,
        to_base: 1e-6,
    };
}

/// Named operation parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    /// Parameter name (for example `Latitude of natural origin`).
    pub name: String,
    /// Numeric value in `unit`.
    pub value: f64,
    /// Unit of the value.
    pub unit: MeasureUnit,
}

impl ParameterValue {
    /// Creates a parameter value.
    pub fn new(name: impl Into<String>, value: f64, unit: MeasureUnit) -> Self {
        Self {
            name: name.into(),
            value,
            unit,
        }
    }
}

// ============================================================================
// SECTION: Object Accessors
// ============================================================================

/// Identification shared by every object the library returns.
pub trait IdentifiedObject {
    /// Returns the primary name.
    fn name(&self) -> &str;

    /// Returns every identifier attached to the object.
    fn identifiers(&self) -> &[Identifier];

    /// Returns alternative names.
    fn aliases(&self) -> &[String];
}

/// Unit of measure.
pub trait UnitOfMeasure: IdentifiedObject {
    /// Returns the measured quantity.
    fn kind(&self) -> UnitKind;

    /// Returns the factor converting one unit into the base unit.
    fn to_base(&self) -> f64;
}

/// Reference ellipsoid.
pub trait Ellipsoid: IdentifiedObject {
    /// Returns the semi-major axis in [`Ellipsoid::axis_unit`].
    fn semi_major_axis(&self) -> f64;

    /// Returns the semi-minor axis in [`Ellipsoid::axis_unit`].
    fn semi_minor_axis(&self) -> f64;

    /// Returns the inverse flattening (infinite for a sphere).
    fn inverse_flattening(&self) -> f64;

    /// Returns true when the inverse flattening was the defining parameter.
    fn is_inverse_flattening_definitive(&self) -> bool;

    /// Returns the unit of both axes.
    fn axis_unit(&self) -> Rc<dyn UnitOfMeasure>;
}

/// Prime meridian.
pub trait PrimeMeridian: IdentifiedObject {
    /// Returns the longitude from Greenwich in [`PrimeMeridian::angular_unit`].
    fn greenwich_longitude(&self) -> f64;

    /// Returns the unit of the Greenwich longitude.
    fn angular_unit(&self) -> Rc<dyn UnitOfMeasure>;
}

/// Geodetic datum.
pub trait GeodeticDatum: IdentifiedObject {
    /// Returns the datum ellipsoid.
    fn ellipsoid(&self) -> Rc<dyn Ellipsoid>;

    /// Returns the datum prime meridian.
    fn prime_meridian(&self) -> Rc<dyn PrimeMeridian>;
}

/// Vertical datum.
pub trait VerticalDatum: IdentifiedObject {}

/// Geographic coordinate reference system.
pub trait GeographicCrs: IdentifiedObject {
    /// Returns the geodetic datum.
    fn datum(&self) -> Rc<dyn GeodeticDatum>;

    /// Returns the coordinate system dimension (2 or 3).
    fn dimension(&self) -> u8;
}

/// Vertical coordinate reference system.
pub trait VerticalCrs: IdentifiedObject {
    /// Returns the vertical datum.
    fn datum(&self) -> Rc<dyn VerticalDatum>;
}

/// Conversion (typically a map projection).
pub trait Conversion: IdentifiedObject {
    /// Returns the operation method name.
    fn method_name(&self) -> &str;

    /// Returns the parameter values.
    fn parameter_values(&self) -> &[ParameterValue];
}

/// Datum transformation.
pub trait Transformation: IdentifiedObject {
    /// Returns the operation method name.
    fn method_name(&self) -> &str;

    /// Returns the parameter values.
    fn parameter_values(&self) -> &[ParameterValue];

    /// Returns the source CRS.
    fn source_crs(&self) -> Rc<dyn GeographicCrs>;

    /// Returns the target CRS.
    fn target_crs(&self) -> Rc<dyn GeographicCrs>;

    /// Returns the operation accuracy in metres, when known.
    fn accuracy(&self) -> Option<f64>;
}

/// Projected coordinate reference system.
pub trait ProjectedCrs: IdentifiedObject {
    /// Returns the base geographic CRS.
    fn base_crs(&self) -> Rc<dyn GeographicCrs>;

    /// Returns the defining conversion from the base CRS.
    fn conversion(&self) -> Rc<dyn Conversion>;
}

/// Returns the parameter with the given name, ignoring case.
#[must_use]
pub fn find_parameter<'a>(values: &'a [ParameterValue], name: &str) -> Option<&'a ParameterValue> {
    values.iter().find(|value| value.name.eq_ignore_ascii_case(name))
}

// ============================================================================
// SECTION: Factory Errors
// ============================================================================

/// Errors reported by library factories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// The code, method, or operation is not implemented.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// The factory failed unexpectedly.
    #[error("factory failure: {0}")]
    Failed(String),
}

/// Result returned by factory operations; `Ok(None)` means nothing produced.
pub type FactoryResult<T> = Result<Option<T>, FactoryError>;

// ============================================================================
// SECTION: Construction Factories
// ============================================================================

/// Second defining parameter of an ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EllipsoidShape {
    /// Defined by inverse flattening.
    InverseFlattening(f64),
    /// Defined by semi-minor axis, in the axis unit.
    SemiMinorAxis(f64),
}

/// Builds units of measure.
pub trait UnitFactory {
    /// Creates a unit.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the unit cannot be created.
    fn create_unit(
        &self,
        properties: &Properties,
        kind: UnitKind,
        to_base: f64,
    ) -> FactoryResult<Rc<dyn UnitOfMeasure>>;
}

/// Builds ellipsoids, prime meridians, and datums.
pub trait DatumFactory {
    /// Creates an ellipsoid.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the ellipsoid cannot be created.
    fn create_ellipsoid(
        &self,
        properties: &Properties,
        semi_major_axis: f64,
        shape: EllipsoidShape,
        unit: Rc<dyn UnitOfMeasure>,
    ) -> FactoryResult<Rc<dyn Ellipsoid>>;

    /// Creates a prime meridian.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the prime meridian cannot be created.
    fn create_prime_meridian(
        &self,
        properties: &Properties,
        greenwich_longitude: f64,
        unit: Rc<dyn UnitOfMeasure>,
    ) -> FactoryResult<Rc<dyn PrimeMeridian>>;

    /// Creates a geodetic datum.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the datum cannot be created.
    fn create_geodetic_datum(
        &self,
        properties: &Properties,
        ellipsoid: Rc<dyn Ellipsoid>,
        prime_meridian: Rc<dyn PrimeMeridian>,
    ) -> FactoryResult<Rc<dyn GeodeticDatum>>;

    /// Creates a vertical datum.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the datum cannot be created.
    fn create_vertical_datum(&self, properties: &Properties) -> FactoryResult<Rc<dyn VerticalDatum>>;
}

/// Builds coordinate reference systems.
pub trait CrsFactory {
    /// Creates a geographic CRS.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the CRS cannot be created.
    fn create_geographic_crs(
        &self,
        properties: &Properties,
        datum: Rc<dyn GeodeticDatum>,
        dimension: u8,
    ) -> FactoryResult<Rc<dyn GeographicCrs>>;

    /// Creates a vertical CRS.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the CRS cannot be created.
    fn create_vertical_crs(
        &self,
        properties: &Properties,
        datum: Rc<dyn VerticalDatum>,
    ) -> FactoryResult<Rc<dyn VerticalCrs>>;

    /// Creates a projected CRS.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the CRS cannot be created.
    fn create_projected_crs(
        &self,
        properties: &Properties,
        base_crs: Rc<dyn GeographicCrs>,
        conversion: Rc<dyn Conversion>,
    ) -> FactoryResult<Rc<dyn ProjectedCrs>>;
}

/// Builds coordinate operations.
pub trait OperationFactory {
    /// Creates a conversion from a method name and parameter values.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Unsupported`] for unknown methods.
    fn create_conversion(
        &self,
        properties: &Properties,
        method: &str,
        parameters: &[ParameterValue],
    ) -> FactoryResult<Rc<dyn Conversion>>;

    /// Creates a transformation between two geographic CRS.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Unsupported`] for unknown methods.
    fn create_transformation(
        &self,
        properties: &Properties,
        request: TransformationRequest<'_>,
    ) -> FactoryResult<Rc<dyn Transformation>>;
}

/// Defining inputs of a transformation.
pub struct TransformationRequest<'a> {
    /// Source CRS.
    pub source: Rc<dyn GeographicCrs>,
    /// Target CRS.
    pub target: Rc<dyn GeographicCrs>,
    /// Operation method name.
    pub method: &'a str,
    /// Parameter values.
    pub parameters: &'a [ParameterValue],
    /// Operation accuracy in metres, when known.
    pub accuracy: Option<f64>,
}

// ============================================================================
// SECTION: Authority Factory
// ============================================================================

/// Looks up predefined objects by external authority code.
///
/// Every lookup defaults to [`FactoryError::Unsupported`] so a library can
/// implement any subset.
pub trait AuthorityFactory {
    /// Fetches a unit.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn create_unit(&self, code: &str) -> FactoryResult<Rc<dyn UnitOfMeasure>> {
        Err(FactoryError::Unsupported(format!("unit {code}")))
    }

    /// Fetches an ellipsoid.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn create_ellipsoid(&self, code: &str) -> FactoryResult<Rc<dyn Ellipsoid>> {
        Err(FactoryError::Unsupported(format!("ellipsoid {code}")))
    }

    /// Fetches a prime meridian.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn create_prime_meridian(&self, code: &str) -> FactoryResult<Rc<dyn PrimeMeridian>> {
        Err(FactoryError::Unsupported(format!("prime meridian {code}")))
    }

    /// Fetches a geodetic datum.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn create_geodetic_datum(&self, code: &str) -> FactoryResult<Rc<dyn GeodeticDatum>> {
        Err(FactoryError::Unsupported(format!("geodetic datum {code}")))
    }

    /// Fetches a vertical datum.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn create_vertical_datum(&self, code: &str) -> FactoryResult<Rc<dyn VerticalDatum>> {
        Err(FactoryError::Unsupported(format!("vertical datum {code}")))
    }

    /// Fetches a geographic CRS.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn create_geographic_crs(&self, code: &str) -> FactoryResult<Rc<dyn GeographicCrs>> {
        Err(FactoryError::Unsupported(format!("geographic crs {code}")))
    }

    /// Fetches a vertical CRS.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn create_vertical_crs(&self, code: &str) -> FactoryResult<Rc<dyn VerticalCrs>> {
        Err(FactoryError::Unsupported(format!("vertical crs {code}")))
    }

    /// Fetches a conversion.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn create_conversion(&self, code: &str) -> FactoryResult<Rc<dyn Conversion>> {
        Err(FactoryError::Unsupported(format!("conversion {code}")))
    }

    /// Fetches a transformation.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn create_transformation(&self, code: &str) -> FactoryResult<Rc<dyn Transformation>> {
        Err(FactoryError::Unsupported(format!("transformation {code}")))
    }

    /// Fetches a projected CRS.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn create_projected_crs(&self, code: &str) -> FactoryResult<Rc<dyn ProjectedCrs>> {
        Err(FactoryError::Unsupported(format!("projected crs {code}")))
    }
}

// ============================================================================
// SECTION: Structural Validator
// ============================================================================

/// Structural validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("structural validation failed: {0}")]
pub struct ValidationError(pub String);

/// Kind-agnostic structural validator.
pub trait ObjectValidator {
    /// Validates the structure of an object.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the object is structurally invalid.
    fn validate(&self, object: &dyn IdentifiedObject) -> Result<(), ValidationError>;
}

/// Validator that accepts every object.
pub struct NoopValidator;

impl ObjectValidator for NoopValidator {
    fn validate(&self, _object: &dyn IdentifiedObject) -> Result<(), ValidationError> {
        Ok(())
    }
}
