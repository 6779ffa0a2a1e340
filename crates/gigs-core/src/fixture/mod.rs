// crates/gigs-core/src/fixture/mod.rs
// ============================================================================
// Module: GIGS Fixture Engine
// Description: Lazy build, delegation, resolution, and verification of fixtures.
// Purpose: Provide the composition pieces every fixture kind is built from.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The fixture engine is made of small parts composed per fixture kind:
//! a [`FixtureContext`] and memoized [`FixtureNode`], the [`Fixture`]
//! contract, [`Delegate`]s for reusing another fixture's build and checks,
//! [`ComponentSource`] for the authority-versus-user choice, and the
//! verification protocol in [`verify`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod context;
pub mod delegate;
pub mod node;
pub mod resolver;
pub mod verify;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use context::AssertionTally;
pub use context::FixtureContext;
pub use context::Resources;
pub use delegate::BuildRoutine;
pub use delegate::Delegate;
pub use delegate::DelegationMode;
pub use delegate::Dependency;
pub use node::Fixture;
pub use node::FixtureNode;
pub use node::FixtureState;
pub use node::from_factory;
pub use resolver::ComponentSource;
pub use resolver::Resolved;
pub use verify::DEFAULT_RELATIVE_TOLERANCE;
pub use verify::ExpectedIdentification;
pub use verify::IdentificationScope;
pub use verify::Tolerance;
pub use verify::compare_identification;
pub use verify::within_tolerance;
