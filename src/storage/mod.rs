//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - contacts(id, first_name, last_name, email, phone, category)

pub mod schema;
pub mod sqlite;

pub use sqlite::ContactStore;
