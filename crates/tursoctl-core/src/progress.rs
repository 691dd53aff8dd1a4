//! Progress reporting for multi-step workflows
//!
//! Workflows emit events through an optional callback so the CLI can drive
//! spinners without the core knowing anything about terminals.

use std::time::Duration;

/// Progress events emitted during workflows
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Region picked for the operation
    RegionResolved {
        region: String,
        fallback_reason: Option<String>,
    },
    /// Database record is being created
    CreatingDatabase { name: String, region: String },
    /// First instance of a new database is being created
    CreatingInstance { name: String, region: String },
    /// Replica request is in flight
    Replicating { name: String, region: String },
    /// Remote side finished; local settings are being written
    Completed {
        name: String,
        region: String,
        elapsed: Duration,
    },
}

/// Callback type for progress updates
///
/// CLI can use this to update spinners/progress bars.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Helper to emit progress events
pub(crate) fn emit(callback: &Option<ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}
