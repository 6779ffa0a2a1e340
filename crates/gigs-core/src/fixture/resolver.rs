// crates/gigs-core/src/fixture/resolver.rs
// ============================================================================
// Module: Component Resolver
// Description: Authority-versus-user-definition choice for sub-components.
// Purpose: Give parents one input type regardless of component provenance.
// Dependencies: crate::{core, fixture}
// ============================================================================

//! ## Overview
//! A parent fixture names each sub-component as a [`ComponentSource`]: either
//! an authority code (the library's predefined object, trusted as-is) or a
//! [`Delegate`] to a user-definition fixture (built from literal values and
//! verified with that fixture's own checks). Both resolve to a [`Resolved`]
//! component the parent feeds into its own construction call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::error::FixtureError;
use crate::core::error::FixtureResult;
use crate::core::error::UnsupportedReason;
use crate::core::identity::AuthorityCode;
use crate::core::identity::Provenance;
use crate::fixture::context::FixtureContext;
use crate::fixture::delegate::Delegate;
use crate::fixture::delegate::DelegationMode;
use crate::fixture::delegate::Dependency;
use crate::fixture::node::Fixture;
use crate::fixture::node::from_factory;

// ============================================================================
// SECTION: Component Source
// ============================================================================

/// Where a parent obtains a sub-component from.
pub enum ComponentSource<F> {
    /// Fetch the predefined object by authority code.
    Authority(AuthorityCode),
    /// Build the object with a user-definition fixture.
    UserDefined(Delegate<F>),
}

impl<F> Clone for ComponentSource<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for ComponentSource<F> {}

impl<F: Fixture> ComponentSource<F> {
    /// Shorthand for an authority source.
    #[must_use]
    pub const fn authority(code: u32) -> Self {
        Self::Authority(AuthorityCode::new(code))
    }

    /// Shorthand for a user-definition source.
    #[must_use]
    pub const fn user(name: &'static str, routine: fn(&mut F) -> FixtureResult) -> Self {
        Self::UserDefined(Delegate::new(name, routine))
    }

    /// Returns the provenance this source resolves to.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        match self {
            Self::Authority(code) => Provenance::AuthorityFetched {
                code: *code,
            },
            Self::UserDefined(delegate) => Provenance::UserDefined {
                routine: delegate.name(),
            },
        }
    }

    /// Resolves the component on behalf of `parent`.
    ///
    /// # Errors
    ///
    /// Returns unsupported capabilities (no authority factory, unknown code,
    /// nothing returned) and construction or verification failures of the
    /// delegated fixture.
    pub fn resolve(&self, parent: &FixtureContext) -> FixtureResult<Resolved<F>> {
        let resolved = match self {
            Self::Authority(code) => {
                let authority = parent.resources().authority_factory(F::KIND)?;
                let object = from_factory(F::KIND, F::fetch(authority, *code))?.ok_or_else(|| {
                    FixtureError::unsupported(
                        F::KIND,
                        UnsupportedReason::NothingProduced,
                        format!("authority code {code}"),
                    )
                })?;
                Resolved {
                    object,
                    provenance: self.provenance(),
                    dependency: None,
                }
            }
            Self::UserDefined(delegate) => {
                let dependency = delegate.invoke(parent, DelegationMode::Reuse)?;
                Resolved {
                    object: dependency.object().clone(),
                    provenance: self.provenance(),
                    dependency: Some(dependency),
                }
            }
        };
        let event = parent
            .event("component_resolved")
            .with_provenance(resolved.provenance.clone())
            .with_detail(F::KIND.as_str());
        parent.log(&event);
        Ok(resolved)
    }
}

// ============================================================================
// SECTION: Resolved Component
// ============================================================================

/// A sub-component ready for the parent's construction call.
pub struct Resolved<F: Fixture> {
    /// Component object.
    object: F::Object,
    /// Provenance tag.
    provenance: Provenance,
    /// Bound child fixture for user-defined components.
    dependency: Option<Dependency<F>>,
}

impl<F: Fixture> Resolved<F> {
    /// Returns the component object.
    #[must_use]
    pub const fn object(&self) -> &F::Object {
        &self.object
    }

    /// Returns the provenance tag.
    #[must_use]
    pub const fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Returns the bound child fixture for user-defined components.
    #[must_use]
    pub const fn dependency(&self) -> Option<&Dependency<F>> {
        self.dependency.as_ref()
    }

    /// Verifies a user-defined component with its own fixture's checks.
    /// Authority components are trusted and not re-verified.
    ///
    /// # Errors
    ///
    /// Returns the delegated fixture's verification failure.
    pub fn verify_within(&mut self, parent: &mut FixtureContext) -> FixtureResult {
        match &mut self.dependency {
            Some(dependency) => dependency.verify_within(parent),
            None => Ok(()),
        }
    }
}
