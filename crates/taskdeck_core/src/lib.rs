//! Core domain logic for taskdeck.
//! This crate is the single source of truth for task board invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod repo;
pub mod service;
pub mod store;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::filter::{Filter, InvalidFilter};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use presenter::board_presenter::{
    BoardPresenter, BoardViewModel, Modal, ModalView, TaskRow, UiIntent, BOARD_TITLE,
};
pub use repo::kv_store::{KvStore, MemoryKvStore, SqliteKvStore};
pub use repo::task_repo::{
    decode_tasks, encode_tasks, KvTaskRepository, RepoError, RepoResult, TaskRepository,
    TASKS_KEY, TOTAL_COMPLETED_KEY,
};
pub use service::task_board::{
    BoardObserver, BoardSnapshot, BoardSummary, SubscriptionId, TaskBoard,
};
pub use store::task_list::{TaskCounts, TaskList};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens a presenter over the SQLite store described by `config`.
pub fn open_sqlite_presenter(
    config: &StoreConfig,
) -> RepoResult<BoardPresenter<KvTaskRepository<SqliteKvStore>>> {
    let store = SqliteKvStore::open(&config.db_path)?;
    let board = TaskBoard::open(KvTaskRepository::new(store))?;
    Ok(BoardPresenter::new(board))
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
