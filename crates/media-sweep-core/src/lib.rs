pub mod applier;
pub mod config;
pub mod engine;
pub mod error;
pub mod fscheck;
pub mod preflight;
pub mod progress;
pub mod storage;

pub use config::AppConfig;
pub use engine::{Classification, ConfirmationGateway, ReconcileEngine, RunMode, RunOutcome};
pub use error::Error;
pub use fscheck::{FsChecker, PathChecker};
pub use progress::{ReconcileReporter, SilentReporter};
pub use storage::{CatalogStore, Database};
