//! Flutter-facing bindings for countdown core.

pub mod api;
