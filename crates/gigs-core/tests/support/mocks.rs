// crates/gigs-core/tests/support/mocks.rs
// ============================================================================
// Module: Mock Geodetic Library
// Description: In-memory library under test implementing every factory.
// ============================================================================
//! ## Overview
//! [`MockLibrary`] echoes the defining values it is given back through the
//! accessor traits, counts construction calls per kind, and exposes knobs
//! that make it misbehave in specific ways (alter values, drop identifiers,
//! rename objects, fail or return nothing).

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::rc::Rc;

use gigs_core::AuthorityFactory;
use gigs_core::ConformanceOption;
use gigs_core::ConformanceOptions;
use gigs_core::CrsFactory;
use gigs_core::DatumFactory;
use gigs_core::FactoryError;
use gigs_core::FactoryResult;
use gigs_core::FixtureKind;
use gigs_core::IdentifiedObject;
use gigs_core::Identifier;
use gigs_core::ObjectValidator;
use gigs_core::OperationFactory;
use gigs_core::Properties;
use gigs_core::Resources;
use gigs_core::Tolerance;
use gigs_core::UnitFactory;
use gigs_core::interfaces::Conversion;
use gigs_core::interfaces::Ellipsoid;
use gigs_core::interfaces::EllipsoidShape;
use gigs_core::interfaces::GeodeticDatum;
use gigs_core::interfaces::GeographicCrs;
use gigs_core::interfaces::ParameterValue;
use gigs_core::interfaces::PrimeMeridian;
use gigs_core::interfaces::ProjectedCrs;
use gigs_core::interfaces::Transformation;
use gigs_core::interfaces::TransformationRequest;
use gigs_core::interfaces::UnitKind;
use gigs_core::interfaces::UnitOfMeasure;
use gigs_core::interfaces::ValidationError;
use gigs_core::interfaces::VerticalCrs;
use gigs_core::interfaces::VerticalDatum;

// ========================================================================
// Identification
// ========================================================================

/// Identification stored on every mock object.
#[derive(Debug, Clone)]
pub struct Ident {
    name: String,
    identifiers: Vec<Identifier>,
    aliases: Vec<String>,
}

impl Ident {
    /// Identification of a predefined authority object.
    pub fn authority(name: &str, code: u32) -> Self {
        Self {
            name: name.to_string(),
            identifiers: vec![Identifier::new("EPSG", code)],
            aliases: Vec::new(),
        }
    }
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IdentifiedObject for $ty {
                fn name(&self) -> &str {
                    &self.ident.name
                }

                fn identifiers(&self) -> &[Identifier] {
                    &self.ident.identifiers
                }

                fn aliases(&self) -> &[String] {
                    &self.ident.aliases
                }
            }
        )*
    };
}

// ========================================================================
// Mock Objects
// ========================================================================

pub struct MockUnit {
    ident: Ident,
    kind: UnitKind,
    to_base: f64,
}

impl UnitOfMeasure for MockUnit {
    fn kind(&self) -> UnitKind {
        self.kind
    }

    fn to_base(&self) -> f64 {
        self.to_base
    }
}

pub struct MockEllipsoid {
    ident: Ident,
    semi_major: f64,
    semi_minor: f64,
    inverse_flattening: f64,
    definitive: bool,
    unit: Rc<dyn UnitOfMeasure>,
}

impl Ellipsoid for MockEllipsoid {
    fn semi_major_axis(&self) -> f64 {
        self.semi_major
    }

    fn semi_minor_axis(&self) -> f64 {
        self.semi_minor
    }

    fn inverse_flattening(&self) -> f64 {
        self.inverse_flattening
    }

    fn is_inverse_flattening_definitive(&self) -> bool {
        self.definitive
    }

    fn axis_unit(&self) -> Rc<dyn UnitOfMeasure> {
        Rc::clone(&self.unit)
    }
}

pub struct MockPrimeMeridian {
    ident: Ident,
    longitude: f64,
    unit: Rc<dyn UnitOfMeasure>,
}

impl PrimeMeridian for MockPrimeMeridian {
    fn greenwich_longitude(&self) -> f64 {
        self.longitude
    }

    fn angular_unit(&self) -> Rc<dyn UnitOfMeasure> {
        Rc::clone(&self.unit)
    }
}

pub struct MockGeodeticDatum {
    ident: Ident,
    ellipsoid: Rc<dyn Ellipsoid>,
    prime_meridian: Rc<dyn PrimeMeridian>,
}

impl GeodeticDatum for MockGeodeticDatum {
    fn ellipsoid(&self) -> Rc<dyn Ellipsoid> {
        Rc::clone(&self.ellipsoid)
    }

    fn prime_meridian(&self) -> Rc<dyn PrimeMeridian> {
        Rc::clone(&self.prime_meridian)
    }
}

pub struct MockVerticalDatum {
    ident: Ident,
}

impl VerticalDatum for MockVerticalDatum {}

pub struct MockGeographicCrs {
    ident: Ident,
    datum: Rc<dyn GeodeticDatum>,
    dimension: u8,
}

impl GeographicCrs for MockGeographicCrs {
    fn datum(&self) -> Rc<dyn GeodeticDatum> {
        Rc::clone(&self.datum)
    }

    fn dimension(&self) -> u8 {
        self.dimension
    }
}

pub struct MockVerticalCrs {
    ident: Ident,
    datum: Rc<dyn VerticalDatum>,
}

impl VerticalCrs for MockVerticalCrs {
    fn datum(&self) -> Rc<dyn VerticalDatum> {
        Rc::clone(&self.datum)
    }
}

pub struct MockConversion {
    ident: Ident,
    method: String,
    parameters: Vec<ParameterValue>,
}

impl Conversion for MockConversion {
    fn method_name(&self) -> &str {
        &self.method
    }

    fn parameter_values(&self) -> &[ParameterValue] {
        &self.parameters
    }
}

pub struct MockTransformation {
    ident: Ident,
    method: String,
    parameters: Vec<ParameterValue>,
    source: Rc<dyn GeographicCrs>,
    target: Rc<dyn GeographicCrs>,
    accuracy: Option<f64>,
}

impl Transformation for MockTransformation {
    fn method_name(&self) -> &str {
        &self.method
    }

    fn parameter_values(&self) -> &[ParameterValue] {
        &self.parameters
    }

    fn source_crs(&self) -> Rc<dyn GeographicCrs> {
        Rc::clone(&self.source)
    }

    fn target_crs(&self) -> Rc<dyn GeographicCrs> {
        Rc::clone(&self.target)
    }

    fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }
}

pub struct MockProjectedCrs {
    ident: Ident,
    base: Rc<dyn GeographicCrs>,
    conversion: Rc<dyn Conversion>,
}

impl ProjectedCrs for MockProjectedCrs {
    fn base_crs(&self) -> Rc<dyn GeographicCrs> {
        Rc::clone(&self.base)
    }

    fn conversion(&self) -> Rc<dyn Conversion> {
        Rc::clone(&self.conversion)
    }
}

identified!(
    MockUnit,
    MockEllipsoid,
    MockPrimeMeridian,
    MockGeodeticDatum,
    MockVerticalDatum,
    MockGeographicCrs,
    MockVerticalCrs,
    MockConversion,
    MockTransformation,
    MockProjectedCrs,
);

// ========================================================================
// Mock Library
// ========================================================================

/// Operation methods the mock library implements.
pub const SUPPORTED_METHODS: [&str; 3] = [
    "Transverse Mercator",
    "Geocentric translations (geog2D domain)",
    "Position Vector transformation (geog2D domain)",
];

/// WGS 84 semi-minor axis in metres.
const WGS84_SEMI_MINOR: f64 = 6_356_752.314_245_179;
/// WGS 84 inverse flattening.
const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;

/// Configurable in-memory geodetic library.
pub struct MockLibrary {
    calls: RefCell<BTreeMap<FixtureKind, u32>>,
    authority_calls: Cell<u32>,
    nothing_for: RefCell<BTreeSet<FixtureKind>>,
    fail_for: RefCell<BTreeSet<FixtureKind>>,
    renamed: RefCell<BTreeMap<FixtureKind, String>>,
    semi_major_scale: Cell<f64>,
    inverse_flattening_override: Cell<Option<f64>>,
    drop_identifiers: Cell<bool>,
    drop_aliases: Cell<bool>,
    predefined_datum_name: RefCell<Option<String>>,
}

impl Default for MockLibrary {
    fn default() -> Self {
        Self {
            calls: RefCell::new(BTreeMap::new()),
            authority_calls: Cell::new(0),
            nothing_for: RefCell::new(BTreeSet::new()),
            fail_for: RefCell::new(BTreeSet::new()),
            renamed: RefCell::new(BTreeMap::new()),
            semi_major_scale: Cell::new(1.0),
            inverse_flattening_override: Cell::new(None),
            drop_identifiers: Cell::new(false),
            drop_aliases: Cell::new(false),
            predefined_datum_name: RefCell::new(None),
        }
    }
}

impl MockLibrary {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Construction calls made for a kind.
    pub fn calls(&self, kind: FixtureKind) -> u32 {
        self.calls.borrow().get(&kind).copied().unwrap_or(0)
    }

    /// Authority lookups made for any kind.
    pub fn authority_calls(&self) -> u32 {
        self.authority_calls.get()
    }

    /// Makes construction of a kind return no object.
    pub fn produce_nothing_for(&self, kind: FixtureKind) {
        self.nothing_for.borrow_mut().insert(kind);
    }

    /// Makes construction of a kind fail.
    pub fn fail_for(&self, kind: FixtureKind) {
        self.fail_for.borrow_mut().insert(kind);
    }

    /// Gives built objects of a kind a different name than requested.
    pub fn rename(&self, kind: FixtureKind, name: &str) {
        self.renamed.borrow_mut().insert(kind, name.to_string());
    }

    /// Scales every semi-major axis the library is given.
    pub fn scale_semi_major(&self, factor: f64) {
        self.semi_major_scale.set(factor);
    }

    /// Reports a fixed inverse flattening for every built ellipsoid.
    pub fn override_inverse_flattening(&self, value: f64) {
        self.inverse_flattening_override.set(Some(value));
    }

    /// Drops GIGS identifiers from built objects.
    pub fn drop_identifiers(&self) {
        self.drop_identifiers.set(true);
    }

    /// Drops aliases from built objects.
    pub fn drop_aliases(&self) {
        self.drop_aliases.set(true);
    }

    /// Names datums built on a predefined ellipsoid after the library's own
    /// datum instead of the requested name.
    pub fn rename_datums_on_predefined_ellipsoids(&self, name: &str) {
        *self.predefined_datum_name.borrow_mut() = Some(name.to_string());
    }

    /// Counts a construction call and applies the failure knobs.
    fn enter(&self, kind: FixtureKind) -> Result<bool, FactoryError> {
        *self.calls.borrow_mut().entry(kind).or_insert(0) += 1;
        if self.fail_for.borrow().contains(&kind) {
            return Err(FactoryError::Failed(format!("{kind} rejected by mock")));
        }
        Ok(!self.nothing_for.borrow().contains(&kind))
    }

    /// Identification of a built object.
    fn ident(&self, kind: FixtureKind, properties: &Properties) -> Ident {
        let name = self
            .renamed
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| properties.name().to_string());
        let identifiers = if self.drop_identifiers.get() {
            Vec::new()
        } else {
            vec![properties.identifier().clone()]
        };
        let aliases = if self.drop_aliases.get() { Vec::new() } else { properties.aliases().to_vec() };
        Ident {
            name,
            identifiers,
            aliases,
        }
    }

    fn authority_unit(name: &str, code: u32, kind: UnitKind, to_base: f64) -> Rc<dyn UnitOfMeasure> {
        Rc::new(MockUnit {
            ident: Ident::authority(name, code),
            kind,
            to_base,
        })
    }

    fn metre() -> Rc<dyn UnitOfMeasure> {
        Self::authority_unit("metre", 9001, UnitKind::Length, 1.0)
    }

    fn degree() -> Rc<dyn UnitOfMeasure> {
        Self::authority_unit("degree", 9102, UnitKind::Angle, PI / 180.0)
    }

    fn wgs84_ellipsoid() -> Rc<dyn Ellipsoid> {
        Rc::new(MockEllipsoid {
            ident: Ident::authority("WGS 84", 7030),
            semi_major: 6_378_137.0,
            semi_minor: WGS84_SEMI_MINOR,
            inverse_flattening: WGS84_INVERSE_FLATTENING,
            definitive: true,
            unit: Self::metre(),
        })
    }

    fn greenwich() -> Rc<dyn PrimeMeridian> {
        Rc::new(MockPrimeMeridian {
            ident: Ident::authority("Greenwich", 8901),
            longitude: 0.0,
            unit: Self::degree(),
        })
    }

    fn wgs84_datum() -> Rc<dyn GeodeticDatum> {
        Rc::new(MockGeodeticDatum {
            ident: Ident::authority("World Geodetic System 1984", 6326),
            ellipsoid: Self::wgs84_ellipsoid(),
            prime_meridian: Self::greenwich(),
        })
    }

    fn wgs84_crs() -> Rc<dyn GeographicCrs> {
        Rc::new(MockGeographicCrs {
            ident: Ident::authority("WGS 84", 4326),
            datum: Self::wgs84_datum(),
            dimension: 2,
        })
    }

    fn utm_zone_31n() -> Rc<dyn Conversion> {
        Rc::new(MockConversion {
            ident: Ident::authority("UTM zone 31N", 16031),
            method: "Transverse Mercator".to_string(),
            parameters: Vec::new(),
        })
    }
}

// ========================================================================
// Construction Factories
// ========================================================================

impl UnitFactory for MockLibrary {
    fn create_unit(
        &self,
        properties: &Properties,
        kind: UnitKind,
        to_base: f64,
    ) -> FactoryResult<Rc<dyn UnitOfMeasure>> {
        if !self.enter(FixtureKind::Unit)? {
            return Ok(None);
        }
        Ok(Some(Rc::new(MockUnit {
            ident: self.ident(FixtureKind::Unit, properties),
            kind,
            to_base,
        })))
    }
}

impl DatumFactory for MockLibrary {
    fn create_ellipsoid(
        &self,
        properties: &Properties,
        semi_major_axis: f64,
        shape: EllipsoidShape,
        unit: Rc<dyn UnitOfMeasure>,
    ) -> FactoryResult<Rc<dyn Ellipsoid>> {
        if !self.enter(FixtureKind::Ellipsoid)? {
            return Ok(None);
        }
        let semi_major = semi_major_axis * self.semi_major_scale.get();
        let (semi_minor, inverse_flattening, definitive) = match shape {
            EllipsoidShape::InverseFlattening(ivf) => {
                (semi_major * (1.0 - 1.0 / ivf), ivf, true)
            }
            EllipsoidShape::SemiMinorAxis(semi_minor) => {
                let difference = semi_major - semi_minor;
                let ivf = if difference == 0.0 { f64::INFINITY } else { semi_major / difference };
                (semi_minor, ivf, false)
            }
        };
        let inverse_flattening =
            self.inverse_flattening_override.get().unwrap_or(inverse_flattening);
        Ok(Some(Rc::new(MockEllipsoid {
            ident: self.ident(FixtureKind::Ellipsoid, properties),
            semi_major,
            semi_minor,
            inverse_flattening,
            definitive,
            unit,
        })))
    }

    fn create_prime_meridian(
        &self,
        properties: &Properties,
        greenwich_longitude: f64,
        unit: Rc<dyn UnitOfMeasure>,
    ) -> FactoryResult<Rc<dyn PrimeMeridian>> {
        if !self.enter(FixtureKind::PrimeMeridian)? {
            return Ok(None);
        }
        Ok(Some(Rc::new(MockPrimeMeridian {
            ident: self.ident(FixtureKind::PrimeMeridian, properties),
            longitude: greenwich_longitude,
            unit,
        })))
    }

    fn create_geodetic_datum(
        &self,
        properties: &Properties,
        ellipsoid: Rc<dyn Ellipsoid>,
        prime_meridian: Rc<dyn PrimeMeridian>,
    ) -> FactoryResult<Rc<dyn GeodeticDatum>> {
        if !self.enter(FixtureKind::GeodeticDatum)? {
            return Ok(None);
        }
        let mut ident = self.ident(FixtureKind::GeodeticDatum, properties);
        let predefined = ellipsoid.identifiers().iter().any(|id| id.codespace == "EPSG");
        if predefined && let Some(name) = self.predefined_datum_name.borrow().as_ref() {
            ident.name.clone_from(name);
        }
        Ok(Some(Rc::new(MockGeodeticDatum {
            ident,
            ellipsoid,
            prime_meridian,
        })))
    }

    fn create_vertical_datum(&self, properties: &Properties) -> FactoryResult<Rc<dyn VerticalDatum>> {
        if !self.enter(FixtureKind::VerticalDatum)? {
            return Ok(None);
        }
        Ok(Some(Rc::new(MockVerticalDatum {
            ident: self.ident(FixtureKind::VerticalDatum, properties),
        })))
    }
}

impl CrsFactory for MockLibrary {
    fn create_geographic_crs(
        &self,
        properties: &Properties,
        datum: Rc<dyn GeodeticDatum>,
        dimension: u8,
    ) -> FactoryResult<Rc<dyn GeographicCrs>> {
        if !self.enter(FixtureKind::GeographicCrs)? {
            return Ok(None);
        }
        Ok(Some(Rc::new(MockGeographicCrs {
            ident: self.ident(FixtureKind::GeographicCrs, properties),
            datum,
            dimension,
        })))
    }

    fn create_vertical_crs(
        &self,
        properties: &Properties,
        datum: Rc<dyn VerticalDatum>,
    ) -> FactoryResult<Rc<dyn VerticalCrs>> {
        if !self.enter(FixtureKind::VerticalCrs)? {
            return Ok(None);
        }
        Ok(Some(Rc::new(MockVerticalCrs {
            ident: self.ident(FixtureKind::VerticalCrs, properties),
            datum,
        })))
    }

    fn create_projected_crs(
        &self,
        properties: &Properties,
        base_crs: Rc<dyn GeographicCrs>,
        conversion: Rc<dyn Conversion>,
    ) -> FactoryResult<Rc<dyn ProjectedCrs>> {
        if !self.enter(FixtureKind::ProjectedCrs)? {
            return Ok(None);
        }
        Ok(Some(Rc::new(MockProjectedCrs {
            ident: self.ident(FixtureKind::ProjectedCrs, properties),
            base: base_crs,
            conversion,
        })))
    }
}

impl OperationFactory for MockLibrary {
    fn create_conversion(
        &self,
        properties: &Properties,
        method: &str,
        parameters: &[ParameterValue],
    ) -> FactoryResult<Rc<dyn Conversion>> {
        if !SUPPORTED_METHODS.contains(&method) {
            return Err(FactoryError::Unsupported(format!("method {method}")));
        }
        if !self.enter(FixtureKind::Conversion)? {
            return Ok(None);
        }
        Ok(Some(Rc::new(MockConversion {
            ident: self.ident(FixtureKind::Conversion, properties),
            method: method.to_string(),
            parameters: parameters.to_vec(),
        })))
    }

    fn create_transformation(
        &self,
        properties: &Properties,
        request: TransformationRequest<'_>,
    ) -> FactoryResult<Rc<dyn Transformation>> {
        if !SUPPORTED_METHODS.contains(&request.method) {
            return Err(FactoryError::Unsupported(format!("method {}", request.method)));
        }
        if !self.enter(FixtureKind::Transformation)? {
            return Ok(None);
        }
        Ok(Some(Rc::new(MockTransformation {
            ident: self.ident(FixtureKind::Transformation, properties),
            method: request.method.to_string(),
            parameters: request.parameters.to_vec(),
            source: request.source,
            target: request.target,
            accuracy: request.accuracy,
        })))
    }
}

// ========================================================================
// Authority Factory
// ========================================================================

impl AuthorityFactory for MockLibrary {
    fn create_unit(&self, code: &str) -> FactoryResult<Rc<dyn UnitOfMeasure>> {
        self.authority_calls.set(self.authority_calls.get() + 1);
        Ok(match code {
            "9001" => Some(Self::metre()),
            "9102" => Some(Self::degree()),
            _ => None,
        })
    }

    fn create_ellipsoid(&self, code: &str) -> FactoryResult<Rc<dyn Ellipsoid>> {
        self.authority_calls.set(self.authority_calls.get() + 1);
        Ok((code == "7030").then(Self::wgs84_ellipsoid))
    }

    fn create_prime_meridian(&self, code: &str) -> FactoryResult<Rc<dyn PrimeMeridian>> {
        self.authority_calls.set(self.authority_calls.get() + 1);
        Ok((code == "8901").then(Self::greenwich))
    }

    fn create_geodetic_datum(&self, code: &str) -> FactoryResult<Rc<dyn GeodeticDatum>> {
        self.authority_calls.set(self.authority_calls.get() + 1);
        Ok((code == "6326").then(Self::wgs84_datum))
    }

    fn create_vertical_datum(&self, code: &str) -> FactoryResult<Rc<dyn VerticalDatum>> {
        self.authority_calls.set(self.authority_calls.get() + 1);
        Ok((code == "5100").then(|| {
            Rc::new(MockVerticalDatum {
                ident: Ident::authority("Mean Sea Level", 5100),
            }) as Rc<dyn VerticalDatum>
        }))
    }

    fn create_geographic_crs(&self, code: &str) -> FactoryResult<Rc<dyn GeographicCrs>> {
        self.authority_calls.set(self.authority_calls.get() + 1);
        Ok((code == "4326").then(Self::wgs84_crs))
    }

    fn create_conversion(&self, code: &str) -> FactoryResult<Rc<dyn Conversion>> {
        self.authority_calls.set(self.authority_calls.get() + 1);
        Ok((code == "16031").then(Self::utm_zone_31n))
    }
}

// ========================================================================
// Validator
// ========================================================================

/// Validator rejecting objects with one specific name.
pub struct RejectingValidator {
    pub name: &'static str,
}

impl ObjectValidator for RejectingValidator {
    fn validate(&self, object: &dyn IdentifiedObject) -> Result<(), ValidationError> {
        if object.name() == self.name {
            Err(ValidationError(format!("{} is malformed", self.name)))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// Resources
// ========================================================================

/// Options matching a fully capable library.
pub fn standard_options() -> ConformanceOptions {
    ConformanceOptions::new()
        .with(ConformanceOption::PreserveUserValues, true)
        .with(ConformanceOption::ValidationEnabled, true)
        .with(ConformanceOption::StandardAliasSupported, true)
        .with(ConformanceOption::DependencyIdentificationSupported, true)
}

/// Resources wiring every factory to the mock library.
pub fn resources_for(library: &Rc<MockLibrary>, options: ConformanceOptions) -> Resources {
    Resources::new(options, Tolerance::default())
        .with_unit_factory(Rc::clone(library) as Rc<dyn UnitFactory>)
        .with_datum_factory(Rc::clone(library) as Rc<dyn DatumFactory>)
        .with_crs_factory(Rc::clone(library) as Rc<dyn CrsFactory>)
        .with_operation_factory(Rc::clone(library) as Rc<dyn OperationFactory>)
        .with_authority_factory(Rc::clone(library) as Rc<dyn AuthorityFactory>)
}

/// Resources with standard options.
pub fn standard_resources(library: &Rc<MockLibrary>) -> Resources {
    resources_for(library, standard_options())
}
