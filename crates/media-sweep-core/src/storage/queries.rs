use super::models::CatalogItem;
use super::sqlite::Database;
use crate::error::Error;
use rusqlite::params;
use tracing::debug;

/// The two statement shapes the reconciliation core needs from a catalog
/// store. Injectable so the engine can run against a fake in tests.
pub trait CatalogStore {
    /// All reconciliation-eligible items, ordered by (item_type, name).
    fn eligible_items(&self) -> Result<Vec<CatalogItem>, Error>;

    /// Delete a single item by id. Ok(false) means the statement ran but
    /// removed nothing.
    fn delete_item(&self, id: &str) -> Result<bool, Error>;
}

impl CatalogStore for Database {
    /// Eligibility is fixed: a non-empty path outside the server's
    /// `/metadata/` store, on a row whose type tag ends in `Movie` or
    /// `Episode`. Rows that fail typed extraction are skipped; a corrupt
    /// row never blocks the read.
    fn eligible_items(&self) -> Result<Vec<CatalogItem>, Error> {
        let mut stmt = self.connection().prepare(
            "SELECT id, item_type, name, path FROM media_item \
             WHERE path IS NOT NULL AND path <> '' \
               AND path NOT LIKE '%/metadata/%' \
               AND (item_type LIKE '%Movie' OR item_type LIKE '%Episode') \
             ORDER BY item_type, name",
        )?;

        let mut skipped = 0usize;
        let items: Vec<CatalogItem> = stmt
            .query_map([], |row| {
                Ok(CatalogItem {
                    id: row.get(0)?,
                    item_type: row.get(1)?,
                    name: row.get(2)?,
                    path: row.get(3)?,
                })
            })?
            .filter_map(|row| match row {
                Ok(item) => Some(item),
                Err(err) => {
                    skipped += 1;
                    debug!("Skipping malformed catalog row: {}", err);
                    None
                }
            })
            .collect();

        if skipped > 0 {
            debug!("{} malformed catalog rows skipped", skipped);
        }
        Ok(items)
    }

    fn delete_item(&self, id: &str) -> Result<bool, Error> {
        let affected = self
            .connection()
            .execute("DELETE FROM media_item WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}
