//! Entry persistence over a key-value backend.
//!
//! # Responsibility
//! - Persist the whole countdown collection as one document under one key.
//! - Turn storage and decoding faults into safe defaults at one boundary.
//!
//! # Invariants
//! - The store holds no cached state; every load reads the backend.
//! - There is no per-entry write primitive. Callers load, modify, save.

pub mod entry_store;
