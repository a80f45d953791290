//! Runtime configuration resolved from the process environment.

use std::path::PathBuf;

/// Overrides the SQLite store location when set to a non-blank path.
pub const DB_PATH_ENV: &str = "TASKDECK_DB_PATH";
/// File name used under the temp directory when no override is set.
pub const DEFAULT_DB_FILE_NAME: &str = "taskdeck.sqlite3";

/// Where the board's key-value store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    /// Resolves the store location from `TASKDECK_DB_PATH`.
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(DB_PATH_ENV).ok().as_deref())
    }

    /// Resolves the store location from an optional raw override.
    ///
    /// Blank overrides fall back to `<temp_dir>/taskdeck.sqlite3`.
    pub fn resolve(raw_override: Option<&str>) -> Self {
        let db_path = raw_override
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        Self { db_path }
    }
}
