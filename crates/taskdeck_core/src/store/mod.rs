//! In-memory task store.
//!
//! # Responsibility
//! - Hold the ordered task collection and its pure transformations.
//! - Stay free of persistence and presentation concerns.

pub mod task_list;
