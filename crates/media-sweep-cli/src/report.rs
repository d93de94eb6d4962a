use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use media_sweep_core::storage::models::{CatalogItem, DeletionOutcome};
use media_sweep_core::ReconcileReporter;
use std::sync::Mutex;

/// CLI reconciliation reporter using an indicatif progress bar for the
/// existence-check phase.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ReconcileReporter for CliReporter {
    fn on_read_complete(&self, eligible: usize) {
        eprintln!(
            "  \x1b[32m✓\x1b[0m Catalog read: {} eligible items",
            eligible
        );
        let pb = ProgressBar::new(eligible as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Checking [{bar:30.cyan/dim}] {pos}/{len} paths",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_check_progress(&self, checked: usize, _total: usize) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_position(checked as u64);
        }
    }

    fn on_classify_complete(&self, found: usize, missing: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Check complete: {} found, {} missing in {:.2}s",
            found, missing, duration_secs
        );
    }

    fn on_delete_result(&self, item: &CatalogItem, deleted: bool) {
        if deleted {
            println!("  {} {} ({})", "removed".green(), item.name, item.id.dimmed());
        } else {
            println!("  {} {} ({})", "FAILED".red(), item.name, item.id.dimmed());
        }
    }
}

/// Print the deletion plan, one entry per missing row.
pub fn print_plan(missing: &[CatalogItem]) {
    println!();
    println!(
        "{} catalog rows have no backing file:",
        format!("{}", missing.len()).red()
    );
    for item in missing {
        println!(
            "  {}  {}  {}",
            item.id.dimmed(),
            item.item_type.cyan(),
            item.name
        );
        println!("      {}", item.path.dimmed());
    }
}

/// Print the post-mutation summary, always distinguishing attempted from
/// removed so partial failure never reads as full success.
pub fn print_apply_summary(outcomes: &[DeletionOutcome]) {
    let attempted = outcomes.len();
    let deleted = outcomes.iter().filter(|o| o.deleted).count();

    println!();
    if deleted == attempted {
        println!(
            "{}: {} of {} rows removed",
            "Sweep complete".green(),
            deleted,
            attempted
        );
    } else {
        println!(
            "{}: {} of {} rows removed, {} failed",
            "Sweep finished with errors".yellow(),
            deleted,
            attempted,
            format!("{}", attempted - deleted).red()
        );
    }
}
