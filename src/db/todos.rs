//! CRUD and filtered reads over the `todos` table.
//!
//! [`Todos`] is what the presentation layer talks to. Every call acquires the
//! shared connection from [`Db`]. Input problems are rejected with
//! [`StoreError::Validation`] before the database is touched. SQLite failures
//! while running a statement are logged here and turned into a negative result
//! (`false`, an empty list, `None`); an unopenable database file, a transaction
//! lost with its connection and rows that cannot be decoded are returned as errors.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use todolist::db::db::{Db, DbConfig};
//! use todolist::db::todos::Todos;
//! use todolist::libs::todo::Todo;
//!
//! let db = Arc::new(Db::new(DbConfig::new("todos.db")));
//! let todos = Todos::new(db.clone());
//!
//! let mut todo = Todo::new("Pay rent", None, None)?;
//! todos.insert(&mut todo)?;
//! assert!(todo.id() > 0);
//!
//! db.close();
//! # Ok::<(), todolist::libs::error::StoreError>(())
//! ```

use super::db::Db;
use super::row::{encode_timestamp, TodoRow};
use crate::libs::error::{Result, StoreError};
use crate::libs::messages::Message;
use crate::libs::todo::{now, validate_title, Todo};
use crate::msg_error;
use chrono::{Duration, NaiveDateTime};
use rusqlite::{params, OptionalExtension, Params};
use std::sync::Arc;

const INSERT_TODO: &str = "INSERT INTO todos (title, description, completed, due_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_TODO: &str = "UPDATE todos SET title = ?2, description = ?3, completed = ?4, due_date = ?5, updated_at = ?6 WHERE id = ?1";
const UPDATE_COMPLETED: &str = "UPDATE todos SET completed = ?2, updated_at = ?3 WHERE id = ?1";
const DELETE_TODO: &str = "DELETE FROM todos WHERE id = ?1";
const COUNT_TODOS: &str = "SELECT COUNT(*) FROM todos";
const SELECT_TODOS: &str = "SELECT id, title, description, completed, due_date, created_at, updated_at FROM todos";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_PENDING: &str = "WHERE completed = 0";
const WHERE_COMPLETED: &str = "WHERE completed = 1";
const ORDER_NEWEST: &str = "ORDER BY created_at DESC, id DESC";
const ORDER_BY_DUE: &str = "ORDER BY due_date IS NULL, due_date ASC, created_at DESC, id DESC";

pub struct Todos {
    db: Arc<Db>,
}

impl Todos {
    pub fn new(db: Arc<Db>) -> Todos {
        Todos { db }
    }

    /// Persists a new todo and assigns it the generated id.
    ///
    /// Returns `Ok(false)` when the database rejects the row; the todo keeps id `0` in that case.
    pub fn insert(&self, todo: &mut Todo) -> Result<bool> {
        check_insertable(todo)?;

        let updated_at = now();
        let inserted = recover(self.insert_row(todo, updated_at).map(Some), None, Message::TodoInsertFailed)?;
        match inserted {
            Some(id) if id > 0 => {
                todo.assign_identity(id, updated_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Persists several todos in one transaction.
    ///
    /// Ids are assigned only after the commit, so a failed batch leaves every todo unpersisted.
    pub fn insert_all(&self, todos: &mut [Todo]) -> Result<bool> {
        for todo in todos.iter() {
            check_insertable(todo)?;
        }

        let updated_at = now();
        let ids = self.db.transaction(|| {
            todos
                .iter()
                .map(|todo| self.insert_row(todo, updated_at))
                .collect::<Result<Vec<i64>>>()
        });

        match ids {
            Ok(ids) => {
                for (todo, id) in todos.iter_mut().zip(ids) {
                    todo.assign_identity(id, updated_at);
                }
                Ok(true)
            }
            Err(StoreError::Query(e)) => {
                msg_error!(Message::TodoBatchRolledBack(e.to_string()));
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn insert_row(&self, todo: &Todo, updated_at: NaiveDateTime) -> Result<i64> {
        let row = TodoRow::from_todo(todo);
        self.db.with_connection(|conn| {
            conn.execute(
                INSERT_TODO,
                params![
                    row.title,
                    row.description,
                    row.completed,
                    row.due_date,
                    row.created_at,
                    encode_timestamp(updated_at)
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All todos, newest first.
    pub fn get_all(&self) -> Result<Vec<Todo>> {
        self.fetch(&format!("{} {}", SELECT_TODOS, ORDER_NEWEST), [])
    }

    /// Ids below 1 never match and issue no query.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Todo>> {
        if id <= 0 {
            return Ok(None);
        }

        let sql = format!("{} {}", SELECT_TODOS, WHERE_ID);
        let row = self
            .db
            .with_connection(|conn| conn.query_row(&sql, params![id], TodoRow::from_row).optional());
        recover(row, None, Message::TodoFetchFailed)?.map(TodoRow::into_todo).transpose()
    }

    /// Open todos by due date, undated ones last, then newest first.
    pub fn get_pending(&self) -> Result<Vec<Todo>> {
        self.fetch(&format!("{} {} {}", SELECT_TODOS, WHERE_PENDING, ORDER_BY_DUE), [])
    }

    /// Completed todos, newest first.
    pub fn get_completed(&self) -> Result<Vec<Todo>> {
        self.fetch(&format!("{} {} {}", SELECT_TODOS, WHERE_COMPLETED, ORDER_NEWEST), [])
    }

    fn fetch<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Todo>> {
        let rows = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let row_iter = stmt.query_map(params, TodoRow::from_row)?;

            let mut rows = Vec::new();
            for row in row_iter {
                rows.push(row?);
            }
            Ok(rows)
        });

        recover(rows, Vec::new(), Message::TodoFetchFailed)?
            .into_iter()
            .map(TodoRow::into_todo)
            .collect()
    }

    /// Writes title, description, completion and due date back and refreshes `updated_at`.
    ///
    /// `created_at` is never written. Returns whether a row matched; a missing row and a
    /// failed statement both give `false`.
    pub fn update(&self, todo: &mut Todo) -> Result<bool> {
        if !todo.is_persisted() {
            return Err(StoreError::validation("Cannot update a todo that has no id"));
        }
        validate_title(todo.title())?;

        let updated_at = next_update_time(todo.updated_at());
        let row = TodoRow::from_todo(todo);
        let changed = self.db.with_connection(|conn| {
            conn.execute(
                UPDATE_TODO,
                params![
                    row.id,
                    row.title,
                    row.description,
                    row.completed,
                    row.due_date,
                    encode_timestamp(updated_at)
                ],
            )
        });

        let changed = recover(changed, 0, Message::TodoUpdateFailed)? > 0;
        if changed {
            todo.touch(updated_at);
        }
        Ok(changed)
    }

    /// Flips the completion flag of a stored todo.
    pub fn set_completed(&self, id: i64, completed: bool) -> Result<bool> {
        if id <= 0 {
            return Ok(false);
        }

        let updated_at = encode_timestamp(now());
        let changed = self
            .db
            .with_connection(|conn| conn.execute(UPDATE_COMPLETED, params![id, completed, updated_at]));
        Ok(recover(changed, 0, Message::TodoUpdateFailed)? > 0)
    }

    /// Removes a todo. Unknown ids and ids below 1 give `false`.
    pub fn delete(&self, id: i64) -> Result<bool> {
        if id <= 0 {
            return Ok(false);
        }

        let deleted = self.db.with_connection(|conn| conn.execute(DELETE_TODO, params![id]));
        Ok(recover(deleted, 0, Message::TodoDeleteFailed)? > 0)
    }

    pub fn count(&self) -> Result<usize> {
        let count = self
            .db
            .with_connection(|conn| conn.query_row(COUNT_TODOS, [], |row| row.get::<_, i64>(0)));
        Ok(recover(count, 0, Message::TodoCountFailed)? as usize)
    }
}

fn check_insertable(todo: &Todo) -> Result<()> {
    validate_title(todo.title())?;
    if todo.is_persisted() {
        return Err(StoreError::validation(format!("Todo #{} is already stored", todo.id())));
    }
    Ok(())
}

/// Reduces a statement failure to `fallback` after logging it. Other errors pass through.
fn recover<T>(result: Result<T>, fallback: T, message: fn(String) -> Message) -> Result<T> {
    match result {
        Err(StoreError::Query(e)) => {
            msg_error!(message(e.to_string()));
            Ok(fallback)
        }
        other => other,
    }
}

/// `now`, pushed past `previous` when the clock has not moved since the last write.
fn next_update_time(previous: Option<NaiveDateTime>) -> NaiveDateTime {
    let now = now();
    match previous {
        Some(previous) if now <= previous => previous + Duration::microseconds(1),
        _ => now,
    }
}
