//! Presentation layer between the board service and a host UI toolkit.

pub mod board_presenter;
