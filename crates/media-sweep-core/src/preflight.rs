use crate::error::Error;
use rusqlite::{Connection, OpenFlags};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Probe whether the owning media server still has the catalog open for
/// writing.
///
/// Attempts an immediate transaction on a connection with no busy timeout;
/// a busy or locked answer means another process holds a write lock.
pub fn catalog_in_use(path: &str) -> Result<bool, Error> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
    conn.execute_batch("PRAGMA busy_timeout = 0;")?;

    match conn.execute_batch("BEGIN IMMEDIATE; ROLLBACK;") {
        Ok(()) => Ok(false),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::DatabaseBusy
                || e.code == rusqlite::ErrorCode::DatabaseLocked =>
        {
            debug!("Catalog write lock is held by another process");
            Ok(true)
        }
        Err(err) => Err(err.into()),
    }
}

/// Copy the catalog (and any WAL/SHM sidecars) into a timestamped file
/// under `snapshot_dir`.
pub fn snapshot_catalog(catalog_path: &str, snapshot_dir: &str) -> Result<PathBuf, Error> {
    fs::create_dir_all(snapshot_dir)?;

    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    let file_name = Path::new(catalog_path)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog.db".to_string());
    let dest = Path::new(snapshot_dir).join(format!("{}.{}", file_name, stamp));

    fs::copy(catalog_path, &dest)?;
    for suffix in ["-wal", "-shm"] {
        let sidecar = PathBuf::from(format!("{}{}", catalog_path, suffix));
        if sidecar.exists() {
            fs::copy(&sidecar, PathBuf::from(format!("{}{}", dest.display(), suffix)))?;
        }
    }

    info!("Catalog snapshot written to {}", dest.display());
    Ok(dest)
}
