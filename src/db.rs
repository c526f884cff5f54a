// src/db.rs

pub mod filter;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod store;

pub use filter::Filter;
pub use memory::{MemoryChatStore, MemoryDocumentStore};
pub use postgres::{PgChatStore, PgDocumentStore};
pub use repository::Repository;
pub use store::{ChatStore, DocumentStore};
