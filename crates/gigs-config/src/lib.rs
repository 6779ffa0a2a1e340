// crates/gigs-config/src/lib.rs
// ============================================================================
// Module: GIGS Config Library
// Description: Harness configuration model, validation, and examples.
// Purpose: Single source of truth for gigs.toml semantics.
// Dependencies: gigs-core, serde, toml
// ============================================================================

//! ## Overview
//! `gigs-config` defines the configuration of a GIGS suite run: the numeric
//! tolerance, the default conformance options, and the harness event sink.
//! Validation is strict and fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
