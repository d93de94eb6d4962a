use std::fs;
use std::io::ErrorKind;
use tracing::debug;

/// Existence check for a catalog path.
///
/// Existence is the sole criterion — a directory or zero-length file at the
/// path still counts as present. Implementations must answer for any input;
/// one unresolvable path must never abort a run.
pub trait PathChecker: Send + Sync {
    fn exists(&self, path: &str) -> bool;
}

/// Checker backed by the real filesystem.
pub struct FsChecker;

impl PathChecker for FsChecker {
    fn exists(&self, path: &str) -> bool {
        match fs::metadata(path) {
            Ok(_) => true,
            Err(err) if err.kind() == ErrorKind::NotFound => false,
            Err(err) => {
                // Permission or I/O trouble: indeterminate, counted as missing.
                debug!("Existence check failed for {}: {}", path, err);
                false
            }
        }
    }
}
