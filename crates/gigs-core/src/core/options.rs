// crates/gigs-core/src/core/options.rs
// ============================================================================
// Module: Conformance Options
// Description: Closed registry of boolean conformance options.
// Purpose: Carry assertion semantics down a fixture delegation chain.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every fixture carries a [`ConformanceOptions`] record. A delegating parent
//! copies its record into each child it binds. How a value crosses that
//! boundary is fixed per option:
//! - [`Propagation::Sticky`] options are OR-ed, so once an ancestor decides not
//!   to assert something no descendant can turn the assertion back on.
//! - [`Propagation::Inherit`] options are overwritten, so the ancestor fully
//!   determines the semantics for its whole sub-tree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Option Names
// ============================================================================

/// Named conformance option.
///
/// # Invariants
/// - The set is closed; `ALL` lists every variant exactly once in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConformanceOption {
    /// The library keeps user-supplied numeric values exactly as given.
    PreserveUserValues,
    /// Identifier code checks are not performed.
    SkipIdentificationCheck,
    /// The structural validator runs on every verified object.
    ValidationEnabled,
    /// Aliases given to factories are expected back on the built object.
    StandardAliasSupported,
    /// Names of dependency objects are checked by the parent.
    DependencyIdentificationSupported,
}

/// How an option value crosses a delegation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Child becomes `child OR parent`.
    Sticky,
    /// Child becomes `parent`.
    Inherit,
}

impl ConformanceOption {
    /// Every option, in index order.
    pub const ALL: [Self; 5] = [
        Self::PreserveUserValues,
        Self::SkipIdentificationCheck,
        Self::ValidationEnabled,
        Self::StandardAliasSupported,
        Self::DependencyIdentificationSupported,
    ];

    /// Number of options in the closed set.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the propagation rule for this option.
    #[must_use]
    pub const fn propagation(self) -> Propagation {
        match self {
            Self::SkipIdentificationCheck => Propagation::Sticky,
            Self::PreserveUserValues
            | Self::ValidationEnabled
            | Self::StandardAliasSupported
            | Self::DependencyIdentificationSupported => Propagation::Inherit,
        }
    }

    /// Returns a stable snake-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreserveUserValues => "preserve_user_values",
            Self::SkipIdentificationCheck => "skip_identification_check",
            Self::ValidationEnabled => "validation_enabled",
            Self::StandardAliasSupported => "standard_alias_supported",
            Self::DependencyIdentificationSupported => "dependency_identification_supported",
        }
    }

    /// Index of the option in the backing array.
    const fn index(self) -> usize {
        match self {
            Self::PreserveUserValues => 0,
            Self::SkipIdentificationCheck => 1,
            Self::ValidationEnabled => 2,
            Self::StandardAliasSupported => 3,
            Self::DependencyIdentificationSupported => 4,
        }
    }
}

impl fmt::Display for ConformanceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Current values of every conformance option.
///
/// # Invariants
/// - Every option has a value; unset options read as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConformanceOptions {
    /// Option values indexed by [`ConformanceOption`].
    values: [bool; ConformanceOption::COUNT],
}

impl ConformanceOptions {
    /// Creates a registry with every option `false`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [false; ConformanceOption::COUNT],
        }
    }

    /// Returns the value of an option.
    #[must_use]
    pub const fn get(&self, option: ConformanceOption) -> bool {
        self.values[option.index()]
    }

    /// Sets the value of an option.
    pub const fn set(&mut self, option: ConformanceOption, value: bool) {
        self.values[option.index()] = value;
    }

    /// Returns a copy with one option changed.
    #[must_use]
    pub const fn with(mut self, option: ConformanceOption, value: bool) -> Self {
        self.set(option, value);
        self
    }

    /// Copies a parent's values into this registry using each option's
    /// propagation rule.
    pub fn copy_from(&mut self, parent: &Self) {
        for option in ConformanceOption::ALL {
            let inherited = parent.get(option);
            let value = match option.propagation() {
                Propagation::Sticky => self.get(option) || inherited,
                Propagation::Inherit => inherited,
            };
            self.set(option, value);
        }
    }

    /// Iterates over every option and its value.
    pub fn iter(&self) -> impl Iterator<Item = (ConformanceOption, bool)> + '_ {
        ConformanceOption::ALL.into_iter().map(|option| (option, self.get(option)))
    }

    /// Returns whether numeric values are compared against reference values.
    #[must_use]
    pub const fn preserves_user_values(&self) -> bool {
        self.get(ConformanceOption::PreserveUserValues)
    }

    /// Returns whether identifier code checks are skipped.
    #[must_use]
    pub const fn skips_identification(&self) -> bool {
        self.get(ConformanceOption::SkipIdentificationCheck)
    }
}
