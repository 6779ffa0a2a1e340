// crates/gigs-core/src/fixture/node.rs
// ============================================================================
// Module: Fixture Node
// Description: Build-once object slot and the fixture lifecycle contract.
// Purpose: Memoize construction and gate verification on the skip flag.
// Dependencies: crate::{core, fixture::context, interfaces}
// ============================================================================

//! ## Overview
//! A [`FixtureNode`] pairs a [`FixtureContext`] with a memoized slot for the
//! object under test. Concrete fixtures implement [`Fixture`] by composing a
//! node and supplying `construct` and `check`; the trait then provides the
//! shared `get_object` and `verify` behavior.
//!
//! Lifecycle:
//! `Uninitialized -> IdentitySet -> Building -> Built -> Verified`, with
//! `Building -> ConstructionFailed` on error and `Skipped` when `verify` runs
//! on a skip-flagged fixture. The slot is written at most once; a failed
//! construction is remembered and never retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::error::FixtureError;
use crate::core::error::FixtureResult;
use crate::core::error::UnsupportedReason;
use crate::core::identity::AuthorityCode;
use crate::core::identity::FixtureKind;
use crate::core::identity::Identity;
use crate::fixture::context::FixtureContext;
use crate::fixture::context::Resources;
use crate::interfaces::AuthorityFactory;
use crate::interfaces::FactoryError;
use crate::interfaces::FactoryResult;

// ============================================================================
// SECTION: Lifecycle State
// ============================================================================

/// Observable lifecycle state of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureState {
    /// No identity yet.
    Uninitialized,
    /// Identity set, nothing built.
    IdentitySet,
    /// Construction in progress.
    Building,
    /// Object built and cached.
    Built,
    /// `verify` ran on a skip-flagged fixture.
    Skipped,
    /// `verify` ran every check successfully.
    Verified,
    /// A check failed; repeated `verify` calls return the same failure.
    VerificationFailed,
    /// Construction failed; the failure is cached.
    ConstructionFailed,
}

/// Verification marker recorded by `verify`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Verification {
    /// Verify returned without assertions.
    Skipped,
    /// Verify completed every check.
    Verified,
    /// A check failed.
    Failed(FixtureError),
}

/// Memoized construction outcome.
enum Slot<T> {
    /// Not built yet.
    Empty,
    /// Built object.
    Ready(T),
    /// Cached construction failure.
    Failed(FixtureError),
}

// ============================================================================
// SECTION: Fixture Node
// ============================================================================

/// Context plus memoized object slot.
pub struct FixtureNode<T> {
    /// Identity, options, skip flag, and tally.
    context: FixtureContext,
    /// Construction outcome.
    slot: Slot<T>,
    /// True while `construct` runs.
    building: bool,
    /// Verification marker.
    verification: Option<Verification>,
    /// Number of times `construct` ran.
    constructions: u32,
}

impl<T: Clone> FixtureNode<T> {
    /// Creates an empty node for a fixture kind.
    #[must_use]
    pub fn new(kind: FixtureKind, resources: &Resources) -> Self {
        Self {
            context: FixtureContext::new(kind, resources),
            slot: Slot::Empty,
            building: false,
            verification: None,
            constructions: 0,
        }
    }

    /// Returns the context.
    #[must_use]
    pub const fn context(&self) -> &FixtureContext {
        &self.context
    }

    /// Returns the context for updates.
    pub const fn context_mut(&mut self) -> &mut FixtureContext {
        &mut self.context
    }

    /// Sets the identity.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ConfigurationMisuse`] for an invalid identity
    /// and [`FixtureError::DuplicateIdentity`] once a construction has
    /// consumed the current identity.
    pub fn set_identity(&mut self, code: u32, name: impl Into<String>) -> FixtureResult {
        let requested = Identity::new(code, name)?;
        if (self.building || self.constructions > 0)
            && let Some(existing) = self.context.identity()
        {
            return Err(FixtureError::DuplicateIdentity {
                existing: existing.clone(),
                requested,
            });
        }
        self.context.replace_identity(requested);
        Ok(())
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> FixtureState {
        if let Some(Verification::Skipped) = self.verification {
            return FixtureState::Skipped;
        }
        if let Slot::Failed(_) = self.slot {
            return FixtureState::ConstructionFailed;
        }
        if let Some(Verification::Verified) = self.verification {
            return FixtureState::Verified;
        }
        if let Some(Verification::Failed(_)) = self.verification {
            return FixtureState::VerificationFailed;
        }
        if self.building {
            return FixtureState::Building;
        }
        if let Slot::Ready(_) = self.slot {
            return FixtureState::Built;
        }
        if self.context.identity().is_some() {
            FixtureState::IdentitySet
        } else {
            FixtureState::Uninitialized
        }
    }

    /// Returns how many times construction ran.
    #[must_use]
    pub const fn construction_count(&self) -> u32 {
        self.constructions
    }

    /// Returns the cached construction outcome, if any.
    #[must_use]
    pub fn cached(&self) -> Option<FixtureResult<T>> {
        match &self.slot {
            Slot::Empty => None,
            Slot::Ready(object) => Some(Ok(object.clone())),
            Slot::Failed(err) => Some(Err(err.clone())),
        }
    }

    /// Returns true once `verify` completed every check.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self.verification, Some(Verification::Verified))
    }

    /// Returns the failure of an earlier `verify`, if any.
    #[must_use]
    pub fn verification_failure(&self) -> Option<&FixtureError> {
        match &self.verification {
            Some(Verification::Failed(err)) => Some(err),
            _ => None,
        }
    }

    /// Enters the building state.
    fn begin_construction(&mut self) -> FixtureResult {
        if self.building {
            return Err(FixtureError::misuse(format!(
                "{} fixture construction re-entered itself",
                self.context.kind()
            )));
        }
        self.context.require_identity()?;
        self.building = true;
        Ok(())
    }

    /// Leaves the building state and memoizes the outcome.
    fn finish_construction(&mut self, outcome: FixtureResult<T>) -> FixtureResult<T> {
        self.building = false;
        self.constructions += 1;
        match outcome {
            Ok(object) => {
                self.context.log(&self.context.event("fixture_built"));
                self.slot = Slot::Ready(object.clone());
                Ok(object)
            }
            Err(err) => {
                self.context.log(
                    &self
                        .context
                        .event("fixture_construction_failed")
                        .with_detail(err.to_string()),
                );
                self.slot = Slot::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Records a verification that returned without assertions.
    fn mark_skipped(&mut self) {
        self.verification = Some(Verification::Skipped);
        self.context.log(&self.context.event("fixture_skipped"));
    }

    /// Records a verification that ran every check.
    fn mark_verified(&mut self) {
        self.verification = Some(Verification::Verified);
        let detail = format!("assertions={}", self.context.tally().total());
        self.context.log(&self.context.event("fixture_verified").with_detail(detail));
    }

    /// Records a failed verification.
    fn mark_failed(&mut self, err: &FixtureError) {
        self.verification = Some(Verification::Failed(err.clone()));
        self.context.log(&self.context.event("fixture_verify_failed").with_detail(err.to_string()));
    }

    /// Describes the object being built for unsupported-capability reports.
    fn subject(&self) -> String {
        self.context
            .identity()
            .map_or_else(|| self.context.kind().to_string(), ToString::to_string)
    }
}

// ============================================================================
// SECTION: Fixture Contract
// ============================================================================

/// A test case that builds and verifies one reference object.
///
/// Implementors compose a [`FixtureNode`] and provide construction and
/// checks; `get_object` and `verify` are shared.
pub trait Fixture: Sized {
    /// Object handle returned by the library (typically `Rc<dyn Kind>`).
    type Object: Clone;

    /// Kind of object this fixture builds.
    const KIND: FixtureKind;

    /// Creates a fresh fixture against the given collaborators.
    fn instantiate(resources: &Resources) -> Self;

    /// Returns the node.
    fn node(&self) -> &FixtureNode<Self::Object>;

    /// Returns the node for updates.
    fn node_mut(&mut self) -> &mut FixtureNode<Self::Object>;

    /// Builds the object from the current identity and defining values.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when a dependency or factory fails.
    fn construct(&mut self) -> FixtureResult<Option<Self::Object>>;

    /// Runs every check on a built object.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] on the first failed check.
    fn check(&mut self, object: &Self::Object) -> FixtureResult;

    /// Fetches a predefined object of this kind by authority code.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the lookup fails.
    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object>;

    /// Sets the fixture identity.
    ///
    /// # Errors
    ///
    /// See [`FixtureNode::set_identity`].
    fn set_identity(&mut self, code: u32, name: &str) -> FixtureResult {
        self.node_mut().set_identity(code, name)
    }

    /// Returns the object, building it on the first call only.
    ///
    /// # Errors
    ///
    /// Returns the construction failure, cached after the first attempt.
    fn get_object(&mut self) -> FixtureResult<Self::Object> {
        if let Some(cached) = self.node().cached() {
            return cached;
        }
        self.node_mut().begin_construction()?;
        let outcome = match self.construct() {
            Ok(Some(object)) => Ok(object),
            Ok(None) => Err(FixtureError::unsupported(
                Self::KIND,
                UnsupportedReason::NothingProduced,
                self.node().subject(),
            )),
            Err(err) => Err(err),
        };
        self.node_mut().finish_construction(outcome)
    }

    /// Verifies the object unless the fixture is skip-flagged.
    ///
    /// Verification runs its checks at most once. Later calls return the
    /// recorded outcome without touching the tally.
    ///
    /// # Errors
    ///
    /// Returns construction failures and assertion mismatches.
    fn verify(&mut self) -> FixtureResult {
        if self.node().context().is_skipped() {
            self.node_mut().mark_skipped();
            return Ok(());
        }
        if self.node().is_verified() {
            return Ok(());
        }
        if let Some(err) = self.node().verification_failure() {
            return Err(err.clone());
        }
        let object = self.get_object()?;
        match self.check(&object) {
            Ok(()) => {
                self.node_mut().mark_verified();
                Ok(())
            }
            Err(err) => {
                self.node_mut().mark_failed(&err);
                Err(err)
            }
        }
    }
}

// ============================================================================
// SECTION: Factory Outcome Mapping
// ============================================================================

/// Maps a factory outcome into the fixture failure taxonomy.
///
/// # Errors
///
/// Returns [`FixtureError::Unsupported`] for unsupported codes or methods and
/// [`FixtureError::Construction`] for any other factory failure.
pub fn from_factory<T>(kind: FixtureKind, result: FactoryResult<T>) -> FixtureResult<Option<T>> {
    result.map_err(|err| match err {
        FactoryError::Unsupported(subject) => {
            FixtureError::unsupported(kind, UnsupportedReason::NotImplemented, subject)
        }
        FactoryError::Failed(message) => FixtureError::Construction {
            kind,
            message,
        },
    })
}
