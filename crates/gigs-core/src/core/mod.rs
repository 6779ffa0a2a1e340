// crates/gigs-core/src/core/mod.rs
// ============================================================================
// Module: GIGS Core Types
// Description: Identities, conformance options, errors, properties, and logging.
// Purpose: Provide the value types shared by fixtures, factories, and the runner.
// Dependencies: serde, serde_json, smallvec, thiserror
// ============================================================================

//! ## Overview
//! Core types are plain values: fixture identities, the conformance option
//! registry, the failure taxonomy, factory properties and harness events.
//! They carry no references to the library under test.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod error;
pub mod identity;
pub mod log;
pub mod options;
pub mod properties;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::AssertionMismatch;
pub use error::FixtureError;
pub use error::FixtureResult;
pub use error::OutcomeClass;
pub use error::UnsupportedCapability;
pub use error::UnsupportedReason;
pub use identity::AuthorityCode;
pub use identity::FixtureKind;
pub use identity::GIGS_CODESPACE;
pub use identity::GigsCode;
pub use identity::Identity;
pub use identity::Provenance;
pub use log::FileLog;
pub use log::HarnessEvent;
pub use log::HarnessLog;
pub use log::MemoryLog;
pub use log::NoopLog;
pub use log::StderrLog;
pub use options::ConformanceOption;
pub use options::ConformanceOptions;
pub use options::Propagation;
pub use properties::Aliases;
pub use properties::Identifier;
pub use properties::Properties;
