use crate::progress::ReconcileReporter;
use crate::storage::models::{CatalogItem, DeletionOutcome};
use crate::storage::CatalogStore;
use tracing::{error, info, warn};

/// Apply a deletion plan to the catalog store, one row at a time.
///
/// Deletes run sequentially in plan order. A failed delete is recorded and
/// the loop moves on; one bad id never blocks the rest of the plan. Paths
/// are not re-checked here — the plan is applied exactly as classified,
/// even if a file reappeared in the meantime.
pub fn apply_plan(
    store: &dyn CatalogStore,
    plan: &[CatalogItem],
    reporter: &dyn ReconcileReporter,
) -> Vec<DeletionOutcome> {
    let mut outcomes = Vec::with_capacity(plan.len());

    for item in plan {
        let deleted = match store.delete_item(&item.id) {
            Ok(true) => true,
            Ok(false) => {
                warn!("Catalog row {} was already gone", item.id);
                false
            }
            Err(err) => {
                error!("Failed to delete {} ({}): {}", item.id, item.name, err);
                false
            }
        };
        reporter.on_delete_result(item, deleted);
        outcomes.push(DeletionOutcome {
            item: item.clone(),
            deleted,
        });
    }

    let deleted = outcomes.iter().filter(|o| o.deleted).count();
    info!(
        "Deletion plan applied: {} of {} rows removed",
        deleted,
        outcomes.len()
    );
    reporter.on_apply_complete(outcomes.len(), deleted);
    outcomes
}
