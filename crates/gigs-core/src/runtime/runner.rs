// crates/gigs-core/src/runtime/runner.rs
// ============================================================================
// Module: Suite Runner
// Description: Sequential execution of registered cases into a report.
// Purpose: Map fixture outcomes onto pass, skip, fail, and harness faults.
// Dependencies: crate::{core, fixture, runtime}, serde
// ============================================================================

//! ## Overview
//! The runner executes every registered case in key order, each in its own
//! fresh fixture tree built from the shared [`Resources`]. Outcomes are
//! classified with [`FixtureError::outcome_class`]: coverage gaps are
//! skipped, defects fail, and harness faults are reported apart from library
//! defects. A `case_finished` event is logged per case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::core::error::FixtureError;
use crate::core::error::OutcomeClass;
use crate::core::log::HarnessEvent;
use crate::fixture::context::Resources;
use crate::runtime::registry::CaseKey;
use crate::runtime::registry::CaseRegistry;
use crate::runtime::registry::CaseRun;

// ============================================================================
// SECTION: Case Status
// ============================================================================

/// Final status of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Every check passed.
    Passed,
    /// The library lacks a capability the case needs.
    Skipped,
    /// The library built a wrong object or failed to build it.
    Failed,
    /// The harness misused a fixture.
    HarnessFault,
}

impl CaseStatus {
    /// Classifies a verification result.
    #[must_use]
    pub const fn of(result: &Result<(), FixtureError>) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(err) => match err.outcome_class() {
                OutcomeClass::CoverageGap => Self::Skipped,
                OutcomeClass::Defect => Self::Failed,
                OutcomeClass::HarnessFault => Self::HarnessFault,
            },
        }
    }

    /// Returns a stable label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
            Self::HarnessFault => "harness_fault",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Report of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    /// Case key.
    pub key: CaseKey,
    /// Final status.
    pub status: CaseStatus,
    /// Checks executed, including delegated ones.
    pub executed: u32,
    /// Numeric checks gated off by options.
    pub gated: u32,
    /// Failure, when the case did not pass.
    pub error: Option<FixtureError>,
}

impl CaseReport {
    /// Builds a report from a case run.
    #[must_use]
    pub fn from_run(key: CaseKey, run: CaseRun) -> Self {
        Self {
            key,
            status: CaseStatus::of(&run.result),
            executed: run.tally.total(),
            gated: run.tally.gated,
            error: run.result.err(),
        }
    }
}

/// Aggregate report of a suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Per-case reports in run order.
    pub cases: Vec<CaseReport>,
    /// Passed case count.
    pub passed: u32,
    /// Skipped case count.
    pub skipped: u32,
    /// Failed case count.
    pub failed: u32,
    /// Harness fault count.
    pub harness_faults: u32,
}

impl SuiteReport {
    /// Appends a case report and updates the counts.
    pub fn push(&mut self, report: CaseReport) {
        match report.status {
            CaseStatus::Passed => self.passed += 1,
            CaseStatus::Skipped => self.skipped += 1,
            CaseStatus::Failed => self.failed += 1,
            CaseStatus::HarnessFault => self.harness_faults += 1,
        }
        self.cases.push(report);
    }

    /// Returns the report of one case.
    #[must_use]
    pub fn case(&self, key: &CaseKey) -> Option<&CaseReport> {
        self.cases.iter().find(|report| report.key == *key)
    }

    /// Returns the number of cases run.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.cases.len()
    }

    /// Returns true when no case failed and the harness raised no fault.
    #[must_use]
    pub const fn is_conformant(&self) -> bool {
        self.failed == 0 && self.harness_faults == 0
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Sequential suite runner.
pub struct SuiteRunner {
    /// Cases to run.
    registry: CaseRegistry,
}

impl SuiteRunner {
    /// Creates a runner over a registry.
    #[must_use]
    pub const fn new(registry: CaseRegistry) -> Self {
        Self {
            registry,
        }
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &CaseRegistry {
        &self.registry
    }

    /// Runs every registered case.
    #[must_use]
    pub fn run(&self, resources: &Resources) -> SuiteReport {
        self.run_matching(resources, |_| true)
    }

    /// Runs the registered cases accepted by `filter`.
    #[must_use]
    pub fn run_matching(
        &self,
        resources: &Resources,
        filter: impl Fn(&CaseKey) -> bool,
    ) -> SuiteReport {
        let mut report = SuiteReport::default();
        for key in self.registry.keys().filter(|key| filter(key)) {
            let Some(run) = self.registry.run(key, resources) else {
                continue;
            };
            let case = CaseReport::from_run(*key, run);
            let detail = match &case.error {
                Some(err) => format!("case={} status={} error={err}", key.case, case.status),
                None => format!("case={} status={}", key.case, case.status),
            };
            resources.log().record(&HarnessEvent::new("case_finished", key.kind).with_detail(detail));
            report.push(case);
        }
        report
    }
}
