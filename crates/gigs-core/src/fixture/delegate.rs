// crates/gigs-core/src/fixture/delegate.rs
// ============================================================================
// Module: Dependency Delegates
// Description: First-class references to another fixture's build routine.
// Purpose: Let a parent reuse a child fixture's own construction and checks.
// Dependencies: crate::{core, fixture}
// ============================================================================

//! ## Overview
//! A [`Delegate`] names a build routine of some fixture type `F` and is bound
//! at the call site as a plain function value. Invoking it creates a fresh
//! child fixture, seeds the child's skip flag and options from the parent,
//! runs the routine, builds the child object, and hands back a
//! [`Dependency`] that keeps the child alive so the parent can verify it
//! later with the child's own checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::core::error::FixtureResult;
use crate::fixture::context::FixtureContext;
use crate::fixture::context::Resources;
use crate::fixture::node::Fixture;

// ============================================================================
// SECTION: Delegation Mode
// ============================================================================

/// How the child's assertions relate to the parent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DelegationMode {
    /// The child is skip-flagged while it builds; the parent runs the child's
    /// checks later from its own `verify`.
    Reuse,
    /// The child verifies itself as soon as it is built; the parent does not
    /// repeat it.
    Standalone,
}

impl DelegationMode {
    /// Returns a stable label for the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reuse => "reuse",
            Self::Standalone => "standalone",
        }
    }
}

// ============================================================================
// SECTION: Delegate
// ============================================================================

/// Build routine signature: sets identity and defining values on a fixture.
pub type BuildRoutine<F> = fn(&mut F) -> FixtureResult;

/// Named reference to a build routine of fixture type `F`.
pub struct Delegate<F> {
    /// Routine name, used for provenance and registry keys.
    name: &'static str,
    /// Routine function.
    routine: BuildRoutine<F>,
}

impl<F> Clone for Delegate<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for Delegate<F> {}

impl<F> fmt::Debug for Delegate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<F: Fixture> Delegate<F> {
    /// Binds a named build routine.
    #[must_use]
    pub const fn new(name: &'static str, routine: BuildRoutine<F>) -> Self {
        Self {
            name,
            routine,
        }
    }

    /// Returns the routine name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the routine on an existing fixture.
    ///
    /// # Errors
    ///
    /// Returns whatever the routine returns.
    pub fn apply(&self, fixture: &mut F) -> FixtureResult {
        (self.routine)(fixture)
    }

    /// Creates a top-level fixture for this routine with run defaults.
    ///
    /// # Errors
    ///
    /// Returns whatever the routine returns.
    pub fn instantiate(&self, resources: &Resources) -> FixtureResult<F> {
        let mut fixture = F::instantiate(resources);
        self.apply(&mut fixture)?;
        Ok(fixture)
    }

    /// Builds a child fixture on behalf of `parent`.
    ///
    /// # Errors
    ///
    /// Returns routine, construction, and (in standalone mode) verification
    /// failures of the child.
    pub fn invoke(
        &self,
        parent: &FixtureContext,
        mode: DelegationMode,
    ) -> FixtureResult<Dependency<F>> {
        let mut child = F::instantiate(parent.resources());
        let context = child.node_mut().context_mut();
        let skip = context.is_skipped() || parent.is_skipped() || mode == DelegationMode::Reuse;
        context.set_skip(skip);
        context.inherit_options(parent.options());
        self.apply(&mut child)?;
        let object = child.get_object()?;
        let detail = format!("routine={} mode={}", self.name, mode.as_str());
        let context = child.node().context();
        context.log(&context.event("dependency_bound").with_detail(detail));
        if mode == DelegationMode::Standalone {
            child.verify()?;
        }
        Ok(Dependency {
            routine: self.name,
            mode,
            child,
            object,
        })
    }
}

// ============================================================================
// SECTION: Dependency
// ============================================================================

/// A child fixture bound to a parent for one build.
pub struct Dependency<F: Fixture> {
    /// Routine that defined the child.
    routine: &'static str,
    /// Delegation mode.
    mode: DelegationMode,
    /// Child fixture.
    child: F,
    /// Child object handed to the parent.
    object: F::Object,
}

impl<F: Fixture> Dependency<F> {
    /// Returns the routine name that defined the child.
    #[must_use]
    pub const fn routine(&self) -> &'static str {
        self.routine
    }

    /// Returns the delegation mode.
    #[must_use]
    pub const fn mode(&self) -> DelegationMode {
        self.mode
    }

    /// Returns the child fixture.
    #[must_use]
    pub const fn child(&self) -> &F {
        &self.child
    }

    /// Returns the child object.
    #[must_use]
    pub const fn object(&self) -> &F::Object {
        &self.object
    }

    /// Runs the child's checks as part of the parent's verification.
    ///
    /// Options are copied from the parent again and the child inherits the
    /// parent's skip flag. Checks executed by the child are added to the
    /// parent's delegated count. Standalone children already verified
    /// themselves and are left alone.
    ///
    /// # Errors
    ///
    /// Returns the child's verification failure.
    pub fn verify_within(&mut self, parent: &mut FixtureContext) -> FixtureResult {
        if self.mode == DelegationMode::Standalone {
            return Ok(());
        }
        let context = self.child.node_mut().context_mut();
        context.inherit_options(parent.options());
        context.set_skip(parent.is_skipped());
        let before = context.tally().total();
        let outcome = self.child.verify();
        let after = self.child.node().context().tally().total();
        parent.tally_mut().delegated += after.saturating_sub(before);
        outcome
    }
}
