// crates/gigs-core/src/core/properties.rs
// ============================================================================
// Module: Construction Properties
// Description: Immutable identification record handed to construction factories.
// Purpose: Build factory properties in one step from a fixture identity.
// Dependencies: serde, smallvec
// ============================================================================

//! ## Overview
//! Every `create_*` factory call receives a [`Properties`] record carrying at
//! least the object name and a GIGS identifier. The record is assembled once
//! per build and never edited afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use crate::core::identity::GIGS_CODESPACE;
use crate::core::identity::Identity;

// ============================================================================
// SECTION: Identifier
// ============================================================================

/// Code qualified by its codespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    /// Codespace (for example `GIGS` or `EPSG`).
    pub codespace: String,
    /// Numeric code within the codespace.
    pub code: u32,
}

impl Identifier {
    /// Creates an identifier.
    pub fn new(codespace: impl Into<String>, code: u32) -> Self {
        Self {
            codespace: codespace.into(),
            code,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.codespace, self.code)
    }
}

// ============================================================================
// SECTION: Properties
// ============================================================================

/// Alias list; reference objects rarely carry more than two.
pub type Aliases = SmallVec<[String; 2]>;

/// Identification properties passed to construction factories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Properties {
    /// Object name.
    name: String,
    /// GIGS identifier.
    identifier: Identifier,
    /// Alternative names.
    aliases: Aliases,
}

impl Properties {
    /// Builds the properties for a fixture identity with optional aliases.
    #[must_use]
    pub fn for_identity(identity: &Identity, aliases: &[&str]) -> Self {
        Self {
            name: identity.name().to_string(),
            identifier: Identifier::new(GIGS_CODESPACE, identity.code().get()),
            aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
        }
    }

    /// Returns the object name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the GIGS identifier.
    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Returns the aliases.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}
