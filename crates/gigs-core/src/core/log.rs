// crates/gigs-core/src/core/log.rs
// ============================================================================
// Module: Harness Logging
// Description: Structured events for fixture construction and verification.
// Purpose: Emit JSON-lines harness logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Fixtures report what they built, skipped, delegated and verified through a
//! [`HarnessLog`] sink. Events are plain serializable records so a run can be
//! routed to stderr, appended to a file as JSON lines, or captured in memory
//! for assertions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::identity::FixtureKind;
use crate::core::identity::GigsCode;
use crate::core::identity::Provenance;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Harness event payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarnessEvent {
    /// Event identifier (for example `fixture_built`).
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Kind of fixture that emitted the event.
    pub kind: FixtureKind,
    /// GIGS code of the fixture when its identity is set.
    pub code: Option<GigsCode>,
    /// Fixture name when its identity is set.
    pub name: Option<String>,
    /// Component provenance for resolver events.
    pub provenance: Option<Provenance>,
    /// Free-form detail (error message, assertion count, case name).
    pub detail: Option<String>,
}

impl HarnessEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(event: &'static str, kind: FixtureKind) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            kind,
            code: None,
            name: None,
            provenance: None,
            detail: None,
        }
    }

    /// Attaches the fixture identity.
    #[must_use]
    pub fn with_identity(mut self, code: GigsCode, name: &str) -> Self {
        self.code = Some(code);
        self.name = Some(name.to_string());
        self
    }

    /// Attaches a component provenance.
    #[must_use]
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    /// Attaches a detail string.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for harness events.
///
/// A fixture tree holds its sink as `Rc<dyn HarnessLog>` and runs on one
/// thread, so sinks need not be `Send` or `Sync`.
pub trait HarnessLog {
    /// Records an event.
    fn record(&self, event: &HarnessEvent);
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Discards every event.
pub struct NoopLog;

impl HarnessLog for NoopLog {
    fn record(&self, _event: &HarnessEvent) {}
}

/// Writes one JSON object per event to stderr.
pub struct StderrLog;

impl HarnessLog for StderrLog {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            // Best effort: a closed stderr must not fail the run.
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Appends one JSON object per event to a file.
pub struct FileLog {
    /// Append-mode log file.
    file: RefCell<std::fs::File>,
}

impl FileLog {
    /// Opens (or creates) the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: RefCell::new(file),
        })
    }
}

impl HarnessLog for FileLog {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.try_borrow_mut()
        {
            // Best effort: write failures drop the event instead of failing the run.
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Captures events in memory.
#[derive(Default)]
pub struct MemoryLog {
    /// Recorded events in arrival order.
    events: RefCell<Vec<HarnessEvent>>,
}

impl MemoryLog {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HarnessEvent> {
        self.events.borrow().clone()
    }

    /// Returns the recorded events with the given name.
    #[must_use]
    pub fn named(&self, event: &str) -> Vec<HarnessEvent> {
        self.events().into_iter().filter(|entry| entry.event == event).collect()
    }
}

impl HarnessLog for MemoryLog {
    fn record(&self, event: &HarnessEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
