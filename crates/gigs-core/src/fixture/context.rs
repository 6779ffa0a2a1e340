// crates/gigs-core/src/fixture/context.rs
// ============================================================================
// Module: Fixture Context
// Description: Per-fixture identity, options, skip flag, and assertion tally.
// Purpose: Hold the state every fixture kind composes instead of inheriting.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! [`Resources`] bundles the collaborators a fixture tree runs against: the
//! library factories, the structural validator, the log sink, the default
//! conformance options and the run tolerance. [`FixtureContext`] is the
//! per-fixture state built from it. A context is owned by exactly one fixture
//! and discarded with it at the end of a run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::rc::Rc;

use serde::Serialize;

use crate::core::error::FixtureError;
use crate::core::error::FixtureResult;
use crate::core::error::UnsupportedReason;
use crate::core::identity::FixtureKind;
use crate::core::identity::Identity;
use crate::core::log::HarnessEvent;
use crate::core::log::HarnessLog;
use crate::core::log::NoopLog;
use crate::core::options::ConformanceOptions;
use crate::fixture::verify::Tolerance;
use crate::interfaces::AuthorityFactory;
use crate::interfaces::CrsFactory;
use crate::interfaces::DatumFactory;
use crate::interfaces::NoopValidator;
use crate::interfaces::ObjectValidator;
use crate::interfaces::OperationFactory;
use crate::interfaces::UnitFactory;

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Collaborators and run-wide settings shared by a fixture tree.
#[derive(Clone)]
pub struct Resources {
    /// Unit factory of the library under test.
    units: Option<Rc<dyn UnitFactory>>,
    /// Datum factory of the library under test.
    datums: Option<Rc<dyn DatumFactory>>,
    /// CRS factory of the library under test.
    crs: Option<Rc<dyn CrsFactory>>,
    /// Operation factory of the library under test.
    operations: Option<Rc<dyn OperationFactory>>,
    /// Authority factory of the library under test.
    authority: Option<Rc<dyn AuthorityFactory>>,
    /// Structural validator.
    validator: Rc<dyn ObjectValidator>,
    /// Harness log sink.
    log: Rc<dyn HarnessLog>,
    /// Options every top-level fixture starts from.
    defaults: ConformanceOptions,
    /// Run-wide numeric tolerance.
    tolerance: Tolerance,
}

impl Resources {
    /// Creates a resource bundle with no factories, a no-op validator and a
    /// no-op log.
    #[must_use]
    pub fn new(defaults: ConformanceOptions, tolerance: Tolerance) -> Self {
        Self {
            units: None,
            datums: None,
            crs: None,
            operations: None,
            authority: None,
            validator: Rc::new(NoopValidator),
            log: Rc::new(NoopLog),
            defaults,
            tolerance,
        }
    }

    /// Sets the unit factory.
    #[must_use]
    pub fn with_unit_factory(mut self, factory: Rc<dyn UnitFactory>) -> Self {
        self.units = Some(factory);
        self
    }

    /// Sets the datum factory.
    #[must_use]
    pub fn with_datum_factory(mut self, factory: Rc<dyn DatumFactory>) -> Self {
        self.datums = Some(factory);
        self
    }

    /// Sets the CRS factory.
    #[must_use]
    pub fn with_crs_factory(mut self, factory: Rc<dyn CrsFactory>) -> Self {
        self.crs = Some(factory);
        self
    }

    /// Sets the operation factory.
    #[must_use]
    pub fn with_operation_factory(mut self, factory: Rc<dyn OperationFactory>) -> Self {
        self.operations = Some(factory);
        self
    }

    /// Sets the authority factory.
    #[must_use]
    pub fn with_authority_factory(mut self, factory: Rc<dyn AuthorityFactory>) -> Self {
        self.authority = Some(factory);
        self
    }

    /// Sets the structural validator.
    #[must_use]
    pub fn with_validator(mut self, validator: Rc<dyn ObjectValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Sets the log sink.
    #[must_use]
    pub fn with_log(mut self, log: Rc<dyn HarnessLog>) -> Self {
        self.log = log;
        self
    }

    /// Returns the default options.
    #[must_use]
    pub const fn defaults(&self) -> &ConformanceOptions {
        &self.defaults
    }

    /// Returns the run tolerance.
    #[must_use]
    pub const fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Returns the log sink.
    #[must_use]
    pub fn log(&self) -> &dyn HarnessLog {
        self.log.as_ref()
    }

    /// Returns the structural validator.
    #[must_use]
    pub fn validator(&self) -> &dyn ObjectValidator {
        self.validator.as_ref()
    }

    /// Returns the unit factory.
    ///
    /// # Errors
    ///
    /// Returns an unsupported capability when the library has none.
    pub fn unit_factory(&self, kind: FixtureKind) -> FixtureResult<&dyn UnitFactory> {
        self.units.as_deref().ok_or_else(|| missing(kind, "unit factory"))
    }

    /// Returns the datum factory.
    ///
    /// # Errors
    ///
    /// Returns an unsupported capability when the library has none.
    pub fn datum_factory(&self, kind: FixtureKind) -> FixtureResult<&dyn DatumFactory> {
        self.datums.as_deref().ok_or_else(|| missing(kind, "datum factory"))
    }

    /// Returns the CRS factory.
    ///
    /// # Errors
    ///
    /// Returns an unsupported capability when the library has none.
    pub fn crs_factory(&self, kind: FixtureKind) -> FixtureResult<&dyn CrsFactory> {
        self.crs.as_deref().ok_or_else(|| missing(kind, "crs factory"))
    }

    /// Returns the operation factory.
    ///
    /// # Errors
    ///
    /// Returns an unsupported capability when the library has none.
    pub fn operation_factory(&self, kind: FixtureKind) -> FixtureResult<&dyn OperationFactory> {
        self.operations.as_deref().ok_or_else(|| missing(kind, "operation factory"))
    }

    /// Returns the authority factory.
    ///
    /// # Errors
    ///
    /// Returns an unsupported capability when the library has none.
    pub fn authority_factory(&self, kind: FixtureKind) -> FixtureResult<&dyn AuthorityFactory> {
        self.authority.as_deref().ok_or_else(|| missing(kind, "authority factory"))
    }
}

/// Builds the error for an absent factory.
fn missing(kind: FixtureKind, factory: &str) -> FixtureError {
    FixtureError::unsupported(kind, UnsupportedReason::FactoryMissing, factory)
}

// ============================================================================
// SECTION: Assertion Tally
// ============================================================================

/// Count of checks a fixture ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AssertionTally {
    /// Checks this fixture executed itself.
    pub executed: u32,
    /// Numeric checks skipped because user values are not preserved.
    pub gated: u32,
    /// Checks executed by dependencies verified within this fixture.
    pub delegated: u32,
}

impl AssertionTally {
    /// Returns executed plus delegated checks.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.executed.saturating_add(self.delegated)
    }
}

// ============================================================================
// SECTION: Fixture Context
// ============================================================================

/// Identity, options, skip flag and tally of one fixture.
pub struct FixtureContext {
    /// Kind of object the owning fixture builds.
    kind: FixtureKind,
    /// GIGS identity, once set.
    identity: Option<Identity>,
    /// Current conformance options.
    options: ConformanceOptions,
    /// When true, `verify` is a no-op.
    skip: bool,
    /// Checks run so far.
    tally: AssertionTally,
    /// Collaborators.
    resources: Resources,
}

impl FixtureContext {
    /// Creates a context seeded with the run defaults.
    #[must_use]
    pub fn new(kind: FixtureKind, resources: &Resources) -> Self {
        Self {
            kind,
            identity: None,
            options: *resources.defaults(),
            skip: false,
            tally: AssertionTally::default(),
            resources: resources.clone(),
        }
    }

    /// Returns the fixture kind.
    #[must_use]
    pub const fn kind(&self) -> FixtureKind {
        self.kind
    }

    /// Returns the identity when set.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns the identity a construction needs.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ConfigurationMisuse`] when no identity is set.
    pub fn require_identity(&self) -> FixtureResult<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| FixtureError::misuse(format!("{} fixture has no identity", self.kind)))
    }

    /// Replaces the identity. Consumption rules are enforced by the node.
    pub(crate) fn replace_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &ConformanceOptions {
        &self.options
    }

    /// Returns the options for in-place changes.
    pub const fn options_mut(&mut self) -> &mut ConformanceOptions {
        &mut self.options
    }

    /// Copies a parent's options into this context.
    pub fn inherit_options(&mut self, parent: &ConformanceOptions) {
        self.options.copy_from(parent);
    }

    /// Returns the skip flag.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        self.skip
    }

    /// Sets the skip flag.
    pub const fn set_skip(&mut self, skip: bool) {
        self.skip = skip;
    }

    /// Returns the tally.
    #[must_use]
    pub const fn tally(&self) -> &AssertionTally {
        &self.tally
    }

    /// Returns the tally for updates by checks.
    pub(crate) const fn tally_mut(&mut self) -> &mut AssertionTally {
        &mut self.tally
    }

    /// Returns the collaborators.
    #[must_use]
    pub const fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Returns an event for this fixture, tagged with its identity when set.
    #[must_use]
    pub fn event(&self, name: &'static str) -> HarnessEvent {
        let event = HarnessEvent::new(name, self.kind);
        match &self.identity {
            Some(identity) => event.with_identity(identity.code(), identity.name()),
            None => event,
        }
    }

    /// Records an event through the run log.
    pub fn log(&self, event: &HarnessEvent) {
        self.resources.log().record(event);
    }
}
