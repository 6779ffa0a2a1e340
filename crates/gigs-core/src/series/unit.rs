// crates/gigs-core/src/series/unit.rs
// ============================================================================
// Module: Unit Fixtures
// Description: User-defined units of measure built from literal factors.
// Purpose: Leaf fixtures other fixtures delegate unit construction to.
// Dependencies: crate::{core, fixture, interfaces}
// ============================================================================

//! ## Overview
//! A unit is defined by the quantity it measures and its factor to the base
//! unit of that quantity.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::f64::consts::PI;
use std::rc::Rc;

use crate::core::error::FixtureResult;
use crate::core::identity::AuthorityCode;
use crate::core::identity::FixtureKind;
use crate::fixture::context::Resources;
use crate::fixture::delegate::Delegate;
use crate::fixture::node::Fixture;
use crate::fixture::node::FixtureNode;
use crate::fixture::node::from_factory;
use crate::fixture::verify::ExpectedIdentification;
use crate::interfaces::AuthorityFactory;
use crate::interfaces::FactoryResult;
use crate::interfaces::UnitKind;
use crate::interfaces::UnitOfMeasure;
use crate::series::properties_of;

// ============================================================================
// SECTION: Fixture
// ============================================================================

/// User-defined unit of measure.
pub struct UnitFixture {
    /// Node holding the built unit.
    node: FixtureNode<Rc<dyn UnitOfMeasure>>,
    /// Measured quantity.
    kind: UnitKind,
    /// Factor to the base unit.
    to_base: f64,
}

impl UnitFixture {
    /// Sets identity and defining values.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn define(&mut self, code: u32, name: &str, kind: UnitKind, to_base: f64) -> FixtureResult {
        self.set_identity(code, name)?;
        self.kind = kind;
        self.to_base = to_base;
        Ok(())
    }

    /// Metre.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_metre(fixture: &mut Self) -> FixtureResult {
        fixture.define(69001, "GIGS metre", UnitKind::Length, 1.0)
    }

    /// Degree.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_degree(fixture: &mut Self) -> FixtureResult {
        fixture.define(69102, "GIGS degree", UnitKind::Angle, PI / 180.0)
    }

    /// Grad.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_grad(fixture: &mut Self) -> FixtureResult {
        fixture.define(69105, "GIGS grad", UnitKind::Angle, PI / 200.0)
    }

    /// British foot (Sears 1922).
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_british_foot(fixture: &mut Self) -> FixtureResult {
        fixture.define(69040, "GIGS British foot (Sears 1922)", UnitKind::Length, 0.304_799_471_538_676)
    }

    /// Unity.
    ///
    /// # Errors
    ///
    /// Returns identity errors from the node.
    pub fn gigs_unity(fixture: &mut Self) -> FixtureResult {
        fixture.define(69201, "GIGS unity", UnitKind::Scale, 1.0)
    }
}

/// Delegate to [`UnitFixture::gigs_metre`].
pub const GIGS_METRE: Delegate<UnitFixture> = Delegate::new("gigs_metre", UnitFixture::gigs_metre);
/// Delegate to [`UnitFixture::gigs_degree`].
pub const GIGS_DEGREE: Delegate<UnitFixture> =
    Delegate::new("gigs_degree", UnitFixture::gigs_degree);
/// Delegate to [`UnitFixture::gigs_grad`].
pub const GIGS_GRAD: Delegate<UnitFixture> = Delegate::new("gigs_grad", UnitFixture::gigs_grad);
/// Delegate to [`UnitFixture::gigs_british_foot`].
pub const GIGS_BRITISH_FOOT: Delegate<UnitFixture> =
    Delegate::new("gigs_british_foot", UnitFixture::gigs_british_foot);
/// Delegate to [`UnitFixture::gigs_unity`].
pub const GIGS_UNITY: Delegate<UnitFixture> = Delegate::new("gigs_unity", UnitFixture::gigs_unity);

impl Fixture for UnitFixture {
    type Object = Rc<dyn UnitOfMeasure>;

    const KIND: FixtureKind = FixtureKind::Unit;

    fn instantiate(resources: &Resources) -> Self {
        Self {
            node: FixtureNode::new(Self::KIND, resources),
            kind: UnitKind::Length,
            to_base: 1.0,
        }
    }

    fn node(&self) -> &FixtureNode<Self::Object> {
        &self.node
    }

    fn node_mut(&mut self) -> &mut FixtureNode<Self::Object> {
        &mut self.node
    }

    fn construct(&mut self) -> FixtureResult<Option<Self::Object>> {
        let context = self.node.context();
        let properties = properties_of(context, &[])?;
        let factory = context.resources().unit_factory(Self::KIND)?;
        from_factory(Self::KIND, factory.create_unit(&properties, self.kind, self.to_base))
    }

    fn check(&mut self, object: &Self::Object) -> FixtureResult {
        let context = self.node.context_mut();
        let expected = ExpectedIdentification::of(context.require_identity()?, &[]);
        context.check_structure(&**object)?;
        context.check_identification(&**object, &expected)?;
        context.check_that("kind", object.kind() == self.kind, self.kind, object.kind())?;
        context.check_value("to_base", object.to_base(), self.to_base)
    }

    fn fetch(authority: &dyn AuthorityFactory, code: AuthorityCode) -> FactoryResult<Self::Object> {
        authority.create_unit(&code.as_lookup_key())
    }
}
