// crates/gigs-core/src/lib.rs
// ============================================================================
// Module: GIGS Core Library
// Description: Public API surface of the GIGS conformance harness.
// Purpose: Expose fixture engine, collaborator interfaces, series, and runner.
// Dependencies: crate::{core, fixture, interfaces, runtime, series}
// ============================================================================

//! ## Overview
//! GIGS core checks whether a geodetic library builds reference objects that
//! match the GIGS dataset. Fixtures build one object each through the
//! library's factories, memoize it, delegate sub-components to other
//! fixtures or to the authority factory, and verify the result under
//! per-fixture conformance options. The harness owns no geodetic math; all
//! of it belongs to the library under test, reached through the traits in
//! [`interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod fixture;
pub mod interfaces;
pub mod runtime;
pub mod series;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use fixture::AssertionTally;
pub use fixture::ComponentSource;
pub use fixture::Delegate;
pub use fixture::DelegationMode;
pub use fixture::Dependency;
pub use fixture::Fixture;
pub use fixture::FixtureContext;
pub use fixture::FixtureNode;
pub use fixture::FixtureState;
pub use fixture::Resolved;
pub use fixture::Resources;
pub use fixture::Tolerance;
pub use interfaces::AuthorityFactory;
pub use interfaces::CrsFactory;
pub use interfaces::DatumFactory;
pub use interfaces::FactoryError;
pub use interfaces::FactoryResult;
pub use interfaces::IdentifiedObject;
pub use interfaces::ObjectValidator;
pub use interfaces::OperationFactory;
pub use interfaces::UnitFactory;
pub use runtime::CaseKey;
pub use runtime::CaseRegistry;
pub use runtime::CaseReport;
pub use runtime::CaseStatus;
pub use runtime::SuiteReport;
pub use runtime::SuiteRunner;
pub use runtime::standard_registry;
