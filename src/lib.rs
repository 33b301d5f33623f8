//! # todolist
//!
//! A persistent to-do store on a single SQLite file.
//!
//! ## Features
//!
//! - **Connection Lifecycle**: one shared connection, opened lazily, reopened when lost
//! - **Todo Store**: insert, read, filter, update and delete todos
//! - **Transactions**: group writes on the shared connection
//! - **Command Line**: `todolist add|list|show|done|undo|edit|delete`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use todolist::db::{db::{Db, DbConfig}, todos::Todos};
//! use todolist::libs::todo::Todo;
//!
//! let db = Arc::new(Db::new(DbConfig::new("todos.db")));
//! let todos = Todos::new(db.clone());
//! let mut todo = Todo::new("Buy milk", None, None)?;
//! todos.insert(&mut todo)?;
//! db.close();
//! # Ok::<(), todolist::libs::error::StoreError>(())
//! ```

pub mod commands;
pub mod db;
pub mod libs;
