//! Fixed layout of the `todos` table.
//!
//! [`init_schema`] is idempotent: it creates the table and its secondary
//! indexes when missing, and adds the `updated_at` column to files created
//! before that column existed.

use crate::libs::messages::Message;
use crate::msg_debug;
use rusqlite::Connection;

const SCHEMA_TODOS: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    completed INTEGER DEFAULT 0,
    due_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT
)";

const INDEXES_TODOS: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_todos_completed ON todos(completed)",
    "CREATE INDEX IF NOT EXISTS idx_todos_due_date ON todos(due_date)",
    "CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at)",
];

const ADD_UPDATED_AT: &str = "ALTER TABLE todos ADD COLUMN updated_at TEXT";

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(SCHEMA_TODOS, [])?;

    if !has_column(conn, "todos", "updated_at")? {
        conn.execute(ADD_UPDATED_AT, [])?;
        msg_debug!(Message::SchemaColumnAdded("updated_at".to_string()));
    }

    for index in INDEXES_TODOS {
        conn.execute(index, [])?;
    }

    Ok(())
}

pub fn has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Names of the indexes SQLite reports for `table`.
pub fn index_names(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = ?1 ORDER BY name")?;
    let names = stmt.query_map([table], |row| row.get(0))?;
    names.collect()
}
