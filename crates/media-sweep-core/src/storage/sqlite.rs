use crate::error::Error;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an existing catalog. The file is never created here — the
    /// catalog belongs to the media server, and a missing file means there
    /// is nothing to reconcile.
    pub fn open(path: &str) -> Result<Self, Error> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        let db = Database { conn };
        db.configure_pragmas()?;
        db.probe_catalog()?;
        Ok(db)
    }

    /// In-memory catalog with the minimal schema applied. Test support.
    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.configure_pragmas()?;
        db.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(db)
    }

    fn configure_pragmas(&self) -> Result<(), Error> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        debug!("SQLite pragmas configured (5s busy timeout)");
        Ok(())
    }

    /// Verify the items table exists rather than creating anything; the
    /// schema is owned and migrated by the media server.
    fn probe_catalog(&self) -> Result<(), Error> {
        self.conn
            .query_row("SELECT COUNT(*) FROM media_item", [], |row| {
                row.get::<_, i64>(0)
            })?;
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
