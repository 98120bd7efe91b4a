//! Storage implementations for the newsdesk pipeline.
//!
//! Available backends:
//! - `MemoryStore` - In-memory storage (always available)
//! - `PostgresStore` - PostgreSQL storage (requires `postgres` feature)

pub mod memory;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::{MemoryStore, StoredArticle};

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
