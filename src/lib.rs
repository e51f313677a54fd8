//! # Contactbook - local address book
//!
//! A single-user contact manager backed by one SQLite file.
//!
//! Contactbook provides:
//! - A `ContactStore` wrapping the `contacts` table (add, edit, delete, search, group)
//! - Email and phone format validation
//! - A line-oriented interactive menu (`Shell`) driven over any reader/writer
//! - Optional TOML configuration naming the database file

pub mod contact;
pub mod storage;
pub mod validate;
pub mod shell;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use contact::{Contact, ContactFields};
pub use storage::ContactStore;
pub use shell::Shell;

/// Result type alias for Contactbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Contactbook operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid contact id: {0}")]
    InvalidId(String),
}
