use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SQLite catalog of the host media server.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    /// Where catalog snapshots are written.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,
    /// Worker pool size for existence checks.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_catalog_path() -> String {
    "media_catalog.db".to_string()
}

fn default_snapshot_dir() -> String {
    "./snapshots".to_string()
}

fn default_concurrency() -> usize {
    8
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            snapshot_dir: default_snapshot_dir(),
            concurrency: default_concurrency(),
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Clamp the configured pool size to something sane for the batch at hand:
/// at least one worker, never more workers than items.
pub fn effective_concurrency(configured: usize, items: usize) -> usize {
    configured.max(1).min(items.max(1))
}
