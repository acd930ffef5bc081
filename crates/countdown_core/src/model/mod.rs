//! Countdown domain model.
//!
//! # Responsibility
//! - Define the canonical countdown record shared by store and view layers.
//! - Own the persisted document shape (field names, timestamp format).
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId` assigned at creation.
//! - `id` and `created_at` never change after creation.

pub mod entry;
