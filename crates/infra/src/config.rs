//! Store configuration: where the persisted documents and backups live.

use std::path::PathBuf;

use tracing::debug;

/// Overrides [`StoreConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "DECKFORGE_DATA_DIR";
/// Overrides [`StoreConfig::backup_dir`].
pub const BACKUP_DIR_ENV: &str = "DECKFORGE_BACKUP_DIR";

/// Locations of the jobs/decks documents and the backup root.
///
/// Relative paths resolve against the process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub jobs_file: String,
    pub decks_file: String,
    pub backup_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            jobs_file: "jobs.json".to_string(),
            decks_file: "decks.json".to_string(),
            backup_dir: PathBuf::from("backups"),
        }
    }
}

impl StoreConfig {
    /// Defaults, overridden by `DECKFORGE_DATA_DIR` / `DECKFORGE_BACKUP_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test map, ...).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        match lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            Some(dir) => config.data_dir = PathBuf::from(dir),
            None => debug!(data_dir = %config.data_dir.display(), "{} not set; using default", DATA_DIR_ENV),
        }
        match lookup(BACKUP_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            Some(dir) => config.backup_dir = PathBuf::from(dir),
            None => debug!(backup_dir = %config.backup_dir.display(), "{} not set; using default", BACKUP_DIR_ENV),
        }
        config
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }

    pub fn jobs_path(&self) -> PathBuf {
        self.data_dir.join(&self.jobs_file)
    }

    pub fn decks_path(&self) -> PathBuf {
        self.data_dir.join(&self.decks_file)
    }

    /// Every document the stores write, in a stable order.
    pub fn persisted_files(&self) -> [PathBuf; 2] {
        [self.jobs_path(), self.decks_path()]
    }
}
