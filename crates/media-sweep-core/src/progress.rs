use crate::storage::models::CatalogItem;

/// Trait for reporting reconciliation progress.
///
/// CLI implements with indicatif/colored output; tests use SilentReporter.
/// All methods have default no-op implementations.
pub trait ReconcileReporter: Send + Sync {
    fn on_read_complete(&self, _eligible: usize) {}
    fn on_check_progress(&self, _checked: usize, _total: usize) {}
    fn on_classify_complete(&self, _found: usize, _missing: usize, _duration_secs: f64) {}
    fn on_delete_result(&self, _item: &CatalogItem, _deleted: bool) {}
    fn on_apply_complete(&self, _attempted: usize, _deleted: usize) {}
}

/// No-op reporter for silent operation.
pub struct SilentReporter;

impl ReconcileReporter for SilentReporter {}
