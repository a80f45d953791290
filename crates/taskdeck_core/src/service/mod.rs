//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate task store transformations and repository writes.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_board;
