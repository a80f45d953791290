//! Task repository contracts and the JSON-over-key-value implementation.
//!
//! # Responsibility
//! - Load and save the task list and the lifetime-completed counter.
//! - Own the persisted JSON layout under fixed keys.
//!
//! # Invariants
//! - Absent keys read as defaults (empty list, zero).
//! - Malformed stored values read as defaults and are left in place until
//!   the next write replaces them.
//! - Loaded lists never contain duplicate IDs.

use crate::db::DbError;
use crate::model::task::Task;
use crate::repo::kv_store::KvStore;
use crate::store::task_list::TaskList;
use log::{debug, warn};

/// Storage key for the serialized task list.
pub const TASKS_KEY: &str = "tasks";
/// Storage key for the lifetime-completed counter.
pub const TOTAL_COMPLETED_KEY: &str = "totalCompleted";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence interface injected into the task board.
pub trait TaskRepository {
    fn load_tasks(&self) -> RepoResult<TaskList>;
    fn save_tasks(&mut self, tasks: &TaskList) -> RepoResult<()>;
    fn load_total_completed(&self) -> RepoResult<u64>;
    fn save_total_completed(&mut self, total: u64) -> RepoResult<()>;
}

/// Serializes a task list to its persisted JSON text.
pub fn encode_tasks(tasks: &TaskList) -> serde_json::Result<String> {
    serde_json::to_string(tasks)
}

/// Parses persisted JSON text into a task list.
///
/// Later entries with an already-seen ID are dropped.
pub fn decode_tasks(raw: &str) -> serde_json::Result<TaskList> {
    serde_json::from_str(raw)
}

fn decode_task_vec(raw: &str) -> serde_json::Result<Vec<Task>> {
    serde_json::from_str(raw)
}

/// `TaskRepository` storing JSON text in any `KvStore`.
pub struct KvTaskRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> KvTaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KvStore> TaskRepository for KvTaskRepository<S> {
    fn load_tasks(&self) -> RepoResult<TaskList> {
        let Some(raw) = self.store.get_item(TASKS_KEY)? else {
            debug!("event=tasks_load module=repo status=ok source=default count=0");
            return Ok(TaskList::new());
        };

        let decoded = match decode_task_vec(&raw) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "event=tasks_load module=repo status=fallback reason=malformed bytes={} error={}",
                    raw.len(),
                    err
                );
                return Ok(TaskList::new());
            }
        };

        let stored_count = decoded.len();
        let tasks = TaskList::from(decoded);
        if tasks.len() != stored_count {
            warn!(
                "event=tasks_load module=repo status=repaired reason=duplicate_ids dropped={}",
                stored_count - tasks.len()
            );
        }
        debug!(
            "event=tasks_load module=repo status=ok source=store count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    fn save_tasks(&mut self, tasks: &TaskList) -> RepoResult<()> {
        let raw = encode_tasks(tasks).map_err(|source| RepoError::Encode {
            key: TASKS_KEY,
            source,
        })?;
        self.store.set_item(TASKS_KEY, &raw)?;
        debug!(
            "event=tasks_save module=repo status=ok count={}",
            tasks.len()
        );
        Ok(())
    }

    fn load_total_completed(&self) -> RepoResult<u64> {
        let Some(raw) = self.store.get_item(TOTAL_COMPLETED_KEY)? else {
            return Ok(0);
        };

        match serde_json::from_str::<u64>(&raw) {
            Ok(total) => Ok(total),
            Err(err) => {
                warn!(
                    "event=total_completed_load module=repo status=fallback reason=malformed error={}",
                    err
                );
                Ok(0)
            }
        }
    }

    fn save_total_completed(&mut self, total: u64) -> RepoResult<()> {
        let raw = serde_json::to_string(&total).map_err(|source| RepoError::Encode {
            key: TOTAL_COMPLETED_KEY,
            source,
        })?;
        self.store.set_item(TOTAL_COMPLETED_KEY, &raw)?;
        debug!("event=total_completed_save module=repo status=ok total={total}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_tasks, encode_tasks};
    use crate::store::task_list::TaskList;

    #[test]
    fn encoded_list_is_a_json_array_in_order() {
        let list = TaskList::new().with_added("first").with_added("second");
        let raw = encode_tasks(&list).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let texts: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["text"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        assert!(decode_tasks("{\"tasks\": []}").is_err());
        assert!(
            decode_tasks(r#"[{"id": "not-a-uuid", "text": "x", "completed": false}]"#).is_err()
        );
        assert!(decode_tasks("not json").is_err());
    }

    #[test]
    fn decode_accepts_empty_array() {
        assert!(decode_tasks("[]").unwrap().is_empty());
    }
}
