use crate::batch::{BatchKind, BatchResult, ItemOutcome};
use crate::error::Error;
use std::path::{Path, PathBuf};

/// Trait for reporting batch progress.
///
/// The CLI implements it with indicatif and colored output, tests use
/// [`SilentReporter`]. All methods default to no-ops.
pub trait BatchReporter: Send + Sync {
    /// Called with the full candidate list before anything is touched.
    fn on_candidates(&self, _kind: BatchKind, _root: &Path, _items: &[PathBuf]) {}
    fn on_item_start(&self, _index: usize, _total: usize, _item: &Path) {}
    fn on_item_complete(&self, _outcome: &ItemOutcome) {}
    /// Called when a failure stops a batch that does not continue on error.
    fn on_batch_halted(&self, _partial: &BatchResult, _error: &Error) {}
    fn on_batch_complete(&self, _result: &BatchResult) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl BatchReporter for SilentReporter {}
