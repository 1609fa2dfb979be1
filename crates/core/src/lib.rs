//! Domain layer for the cost-of-capital best-practices knowledge base.
//!
//! Everything here is free of HTTP and SQL concerns so the storage backends
//! and the API server can share one definition of a practice record, the
//! record-store contract and the conflict-aware edit protocol.

pub mod category;
pub mod contributions;
pub mod editor;
pub mod error;
pub mod memory_store;
pub mod practice;
pub mod store;
pub mod types;
