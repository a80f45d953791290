//! Flutter-facing bindings for the taskdeck core.

pub mod api;
