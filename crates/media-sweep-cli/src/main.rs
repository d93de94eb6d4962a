mod commands;
mod logging;
mod report;

use std::io::{self, Write};
use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use media_sweep_core::storage::models::CatalogItem;
use media_sweep_core::{
    preflight, AppConfig, ConfirmationGateway, Database, FsChecker, ReconcileEngine, RunMode,
    RunOutcome,
};
use report::CliReporter;
use tracing::error;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match media_sweep_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(2);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Sweep { dry_run, yes }) => {
            let code = match run_sweep(&config, dry_run, yes) {
                Ok(code) => code,
                Err(err) => {
                    error!("Error: {}", err);
                    2
                }
            };
            process::exit(code);
        }
        Some(Commands::Snapshot) => {
            match preflight::snapshot_catalog(&config.catalog_path, &config.snapshot_dir) {
                Ok(dest) => println!("Snapshot written to {}", dest.display()),
                Err(err) => {
                    error!("Error writing snapshot: {}", err);
                    process::exit(2);
                }
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_sweep(config: &AppConfig, dry_run: bool, yes: bool) -> Result<i32, media_sweep_core::Error> {
    let mode = if dry_run { RunMode::Dry } else { RunMode::Apply };

    // Preflight only matters when the catalog might be mutated.
    if mode == RunMode::Apply {
        if preflight::catalog_in_use(&config.catalog_path)? {
            println!(
                "{}",
                "The media server appears to be running against this catalog.".yellow()
            );
            if !prompt_confirm("Sweep anyway?", Some(false)).unwrap_or(false) {
                return Ok(3);
            }
        }

        if prompt_confirm("Create a catalog snapshot first?", Some(true)).unwrap_or(false) {
            let dest = preflight::snapshot_catalog(&config.catalog_path, &config.snapshot_dir)?;
            println!("Snapshot written to {}", dest.display().to_string().green());
        }
    }

    let db = Database::open(&config.catalog_path)?;
    let engine = ReconcileEngine::new(config.clone());
    let reporter = CliReporter::new();
    let gateway = PromptGateway { assume_yes: yes };

    let outcome = engine.run(&db, &FsChecker, mode, &gateway, &reporter)?;

    Ok(match outcome {
        RunOutcome::AllPresent { checked } => {
            println!(
                "{} — all {} catalog items have their files",
                "All present".green(),
                checked
            );
            0
        }
        RunOutcome::PlanReported { found: _, missing } => {
            report::print_plan(&missing);
            println!("{}", "Dry run, catalog untouched".yellow());
            0
        }
        RunOutcome::Aborted { missing } => {
            println!(
                "{} — {} rows left in place",
                "Aborted".yellow(),
                missing
            );
            3
        }
        RunOutcome::Applied { found: _, outcomes } => {
            report::print_apply_summary(&outcomes);
            0
        }
    })
}

/// Interactive deletion gate. Prints the plan, then asks; declining on an
/// empty answer is the default for a destructive step.
struct PromptGateway {
    assume_yes: bool,
}

impl ConfirmationGateway for PromptGateway {
    fn confirm_deletion(&self, plan: &[CatalogItem]) -> bool {
        report::print_plan(plan);
        if self.assume_yes {
            return true;
        }
        prompt_confirm(
            &format!("Delete these {} catalog rows?", plan.len()),
            Some(false),
        )
        .unwrap_or(false)
    }
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
