//! Database layer.
//!
//! Persistence for todos on a single SQLite file:
//!
//! - **`db`**: the connection lifecycle manager ([`db::Db`]) with transactions
//! - **`schema`**: the `todos` table and its indexes
//! - **`row`**: conversion between [`crate::libs::todo::Todo`] and its row encoding
//! - **`todos`**: the CRUD and query API ([`todos::Todos`])
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use todolist::db::{db::{Db, DbConfig}, todos::Todos};
//!
//! let db = Arc::new(Db::new(DbConfig::new("todos.db")));
//! let todos = Todos::new(db.clone());
//! for todo in todos.get_pending()? {
//!     println!("{}", todo);
//! }
//! db.close();
//! # Ok::<(), todolist::libs::error::StoreError>(())
//! ```

/// Connection lifecycle manager.
///
/// Owns the shared connection, reopens it when it is lost and exposes
/// transaction boundaries.
pub mod db;

/// Row encoding of a todo.
pub mod row;

/// Table and index definitions.
pub mod schema;

/// Todo CRUD and filtered reads.
pub mod todos;
