use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The catalog cannot be opened or queried at all. The only condition
    /// that is fatal to a run.
    #[error("catalog store unreadable: {0}")]
    StoreUnreadable(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
