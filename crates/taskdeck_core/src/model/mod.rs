//! Domain model for the task board.
//!
//! # Responsibility
//! - Define canonical task and filter types used by every layer.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Filter state is view-only and never persisted.

pub mod filter;
pub mod task;
