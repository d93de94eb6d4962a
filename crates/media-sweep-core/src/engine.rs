use crate::applier;
use crate::config::{self, AppConfig};
use crate::error::Error;
use crate::fscheck::PathChecker;
use crate::progress::ReconcileReporter;
use crate::storage::models::{CatalogItem, DeletionOutcome};
use crate::storage::CatalogStore;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// How a run is allowed to touch the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Read, classify, and report only. The applier is never invoked and
    /// no confirmation is requested.
    Dry,
    /// Full flow: classify, confirm, apply.
    Apply,
}

/// Yes/no decision point ahead of mutation. Implementations own all input
/// handling; the engine only consumes the boolean.
pub trait ConfirmationGateway {
    fn confirm_deletion(&self, plan: &[CatalogItem]) -> bool;
}

/// Found/missing split of the eligible catalog. `missing` is the deletion
/// plan, ordered ascending by (item_type, name).
#[derive(Debug)]
pub struct Classification {
    pub found: usize,
    pub missing: Vec<CatalogItem>,
}

/// Terminal state of one reconciliation run.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every eligible item has its backing file.
    AllPresent { checked: usize },
    /// Dry mode: plan computed and surfaced, catalog untouched.
    PlanReported {
        found: usize,
        missing: Vec<CatalogItem>,
    },
    /// Confirmation declined; catalog untouched.
    Aborted { missing: usize },
    /// Plan applied; outcomes in plan order.
    Applied {
        found: usize,
        outcomes: Vec<DeletionOutcome>,
    },
}

pub struct ReconcileEngine {
    config: AppConfig,
}

impl ReconcileEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the reconciliation pipeline against a catalog store:
    /// 1. Read eligible items (an unreadable store is fatal)
    /// 2. Classify each item's path as present or missing
    /// 3. In Apply mode, gate on confirmation and delete the missing rows
    pub fn run(
        &self,
        store: &dyn CatalogStore,
        checker: &dyn PathChecker,
        mode: RunMode,
        gateway: &dyn ConfirmationGateway,
        reporter: &dyn ReconcileReporter,
    ) -> Result<RunOutcome, Error> {
        let items = store.eligible_items()?;
        info!("Read {} eligible catalog items", items.len());
        reporter.on_read_complete(items.len());

        let check_start = Instant::now();
        let classification = self.classify(items, checker, reporter);
        let check_duration = check_start.elapsed().as_secs_f64();
        debug!(
            "Classification completed in {:.2}s — {} found, {} missing",
            check_duration,
            classification.found,
            classification.missing.len(),
        );
        reporter.on_classify_complete(
            classification.found,
            classification.missing.len(),
            check_duration,
        );

        if classification.missing.is_empty() {
            return Ok(RunOutcome::AllPresent {
                checked: classification.found,
            });
        }

        if mode == RunMode::Dry {
            return Ok(RunOutcome::PlanReported {
                found: classification.found,
                missing: classification.missing,
            });
        }

        if !gateway.confirm_deletion(&classification.missing) {
            info!("Deletion declined, catalog untouched");
            return Ok(RunOutcome::Aborted {
                missing: classification.missing.len(),
            });
        }

        let outcomes = applier::apply_plan(store, &classification.missing, reporter);
        Ok(RunOutcome::Applied {
            found: classification.found,
            outcomes,
        })
    }

    /// Split items into found and missing, one existence check per item.
    ///
    /// Checks fan out on a bounded worker pool; the missing list is sorted
    /// afterwards so report order never depends on completion order.
    pub fn classify(
        &self,
        items: Vec<CatalogItem>,
        checker: &dyn PathChecker,
        reporter: &dyn ReconcileReporter,
    ) -> Classification {
        let total = items.len();
        let checked = AtomicUsize::new(0);

        let check = |item: CatalogItem| {
            let present = checker.exists(&item.path);
            let done = checked.fetch_add(1, Ordering::Relaxed) + 1;
            reporter.on_check_progress(done, total);
            (item, present)
        };

        let threads = config::effective_concurrency(self.config.concurrency, total);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build();
        let results: Vec<(CatalogItem, bool)> = match pool {
            Ok(pool) => pool.install(|| items.into_par_iter().map(check).collect()),
            Err(err) => {
                warn!("Worker pool unavailable ({}), checking serially", err);
                items.into_iter().map(check).collect()
            }
        };

        let mut found = 0usize;
        let mut missing = Vec::new();
        for (item, present) in results {
            if present {
                found += 1;
            } else {
                missing.push(item);
            }
        }
        missing.sort_by(|a, b| {
            a.item_type
                .cmp(&b.item_type)
                .then_with(|| a.name.cmp(&b.name))
        });

        Classification { found, missing }
    }
}
