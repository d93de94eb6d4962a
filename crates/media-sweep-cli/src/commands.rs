use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "media-sweep")]
#[command(about = "Sweep dead entries out of a media-server catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconcile the catalog against the filesystem and offer to remove rows
    /// whose backing file is gone
    Sweep {
        /// Classify and report only; never prompts, never deletes
        #[arg(long)]
        dry_run: bool,
        /// Skip the deletion confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Copy the catalog into a timestamped snapshot
    Snapshot,
    /// Print configuration values
    PrintConfig,
}
