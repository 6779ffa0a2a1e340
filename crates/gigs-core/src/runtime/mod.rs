// crates/gigs-core/src/runtime/mod.rs
// ============================================================================
// Module: GIGS Suite Runtime
// Description: Case registry, built-in catalog, and sequential runner.
// Purpose: Turn fixture build routines into a reportable suite run.
// Dependencies: crate::{core, fixture, series}
// ============================================================================

//! ## Overview
//! Runtime pieces sit above the fixture engine: [`CaseRegistry`] maps case
//! keys to runnable functions, [`standard_registry`] registers the built-in
//! cases, and [`SuiteRunner`] executes them into a [`SuiteReport`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod registry;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::standard_registry;
pub use registry::CaseKey;
pub use registry::CaseRegistry;
pub use registry::CaseRun;
pub use runner::CaseReport;
pub use runner::CaseStatus;
pub use runner::SuiteReport;
pub use runner::SuiteRunner;
