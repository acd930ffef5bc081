//! Countdown use-case services.
//!
//! # Responsibility
//! - Express add/edit/delete/clear as read-modify-write over the store.
//! - Keep FFI/CLI callers decoupled from storage and clock details.

pub mod countdown_service;
