//! Persistence adapter for the task board.
//!
//! # Responsibility
//! - Define the key-value storage boundary and the task repository contract.
//! - Isolate SQLite and JSON details from service/presentation code.
//!
//! # Invariants
//! - Only the task list and the lifetime-completed counter are persisted.
//! - Malformed stored data degrades to defaults instead of failing a load.

pub mod kv_store;
pub mod task_repo;
