pub mod models;
mod queries;
mod sqlite;

pub use queries::CatalogStore;
pub use sqlite::Database;
