//! Error taxonomy for the todo store.
//!
//! Errors are split in two groups:
//!
//! - **Raised to the caller**: [`StoreError::Validation`], [`StoreError::StoreUnavailable`],
//!   [`StoreError::TransactionAlreadyOpen`], [`StoreError::NoTransactionOpen`],
//!   [`StoreError::TransactionLost`] and [`StoreError::Decode`]. These describe bad
//!   input, a database file that cannot be opened, transaction misuse or loss, and
//!   rows that violate the storage encoding.
//! - **Reduced at the store boundary**: [`StoreError::Query`] wraps any SQLite failure
//!   while running a statement. [`crate::db::todos::Todos`] logs it and turns it into
//!   `false`, an empty list or `None`.

use thiserror::Error;

/// Result alias used throughout the store layer.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Input rejected before any database access.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The database file could not be opened or configured.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// `begin_transaction` was called while another transaction is open.
    #[error("A transaction is already open on the shared connection")]
    TransactionAlreadyOpen,

    /// `commit` or `rollback` was called with no open transaction.
    #[error("No transaction is open on the shared connection")]
    NoTransactionOpen,

    /// The connection went away while a transaction was open; SQLite rolled its work back.
    #[error("The open transaction was lost with its connection and rolled back")]
    TransactionLost,

    /// A stored row does not follow the expected encoding.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Statement-level SQLite failure.
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
