// crates/gigs-core/src/runtime/registry.rs
// ============================================================================
// Module: Case Registry
// Description: Registry of runnable fixture cases keyed by kind and name.
// Purpose: Let the runner execute cases without string-based reflection.
// Dependencies: crate::{core, fixture}
// ============================================================================

//! ## Overview
//! A case is a [`Delegate`] to a build routine. Registering it stores a
//! type-erased run function that instantiates a fresh fixture, applies the
//! routine and verifies it. Cases are keyed by fixture kind and routine name
//! and iterate in key order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::error::FixtureError;
use crate::core::error::FixtureResult;
use crate::core::identity::FixtureKind;
use crate::fixture::context::AssertionTally;
use crate::fixture::context::Resources;
use crate::fixture::delegate::Delegate;
use crate::fixture::node::Fixture;

// ============================================================================
// SECTION: Case Key
// ============================================================================

/// Registry key of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CaseKey {
    /// Fixture kind the case builds.
    pub kind: FixtureKind,
    /// Build routine name.
    pub case: &'static str,
}

impl fmt::Display for CaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.kind, self.case)
    }
}

// ============================================================================
// SECTION: Case Run
// ============================================================================

/// Outcome of running one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRun {
    /// Verification result.
    pub result: FixtureResult,
    /// Checks the top-level fixture ran.
    pub tally: AssertionTally,
}

/// Type-erased case function.
type CaseFn = Box<dyn Fn(&Resources) -> CaseRun>;

/// Runs a delegate's routine on a fresh fixture and verifies it.
fn run_case<F: Fixture>(delegate: Delegate<F>, resources: &Resources) -> CaseRun {
    let mut fixture = F::instantiate(resources);
    let result = delegate.apply(&mut fixture).and_then(|()| fixture.verify());
    CaseRun {
        result,
        tally: *fixture.node().context().tally(),
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Runnable cases keyed by kind and routine name.
#[derive(Default)]
pub struct CaseRegistry {
    /// Case functions in key order.
    cases: BTreeMap<CaseKey, CaseFn>,
}

impl CaseRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a case.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ConfigurationMisuse`] when a case with the same
    /// kind and name is already registered.
    pub fn register<F: Fixture + 'static>(&mut self, delegate: Delegate<F>) -> FixtureResult {
        let key = CaseKey {
            kind: F::KIND,
            case: delegate.name(),
        };
        if self.cases.contains_key(&key) {
            return Err(FixtureError::misuse(format!("case already registered: {key}")));
        }
        self.cases.insert(key, Box::new(move |resources| run_case(delegate, resources)));
        Ok(())
    }

    /// Returns the number of registered cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns true when no case is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Returns true when the case is registered.
    #[must_use]
    pub fn contains(&self, key: &CaseKey) -> bool {
        self.cases.contains_key(key)
    }

    /// Returns the registered keys in run order.
    pub fn keys(&self) -> impl Iterator<Item = &CaseKey> {
        self.cases.keys()
    }

    /// Runs one case against fresh fixtures.
    ///
    /// Returns `None` when the case is not registered.
    #[must_use]
    pub fn run(&self, key: &CaseKey, resources: &Resources) -> Option<CaseRun> {
        self.cases.get(key).map(|case| case(resources))
    }
}
