//! Row encoding for the `todos` table.
//!
//! [`TodoRow`] is the on-disk shape of a [`Todo`]: timestamps as sortable
//! ISO-8601 text, the completion flag as an integer, absent values as NULL.
//! Both directions are plain functions with no database access.

use crate::libs::error::{Result, StoreError};
use crate::libs::todo::Todo;
use chrono::NaiveDateTime;
use rusqlite::Row;

/// Format written for every timestamp. `%.f` only emits a fraction when it is non-zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Minute-precision form found in files written by older clients.
const TIMESTAMP_FORMAT_MINUTES: &str = "%Y-%m-%dT%H:%M";

pub fn encode_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn decode_timestamp(column: &str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT_MINUTES))
        .map_err(|e| StoreError::decode(format!("{column}: invalid timestamp '{value}': {e}")))
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: i64,
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl TodoRow {
    /// Reads a row selected as `id, title, description, completed, due_date, created_at, updated_at`.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(TodoRow {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            completed: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
            due_date: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    pub fn from_todo(todo: &Todo) -> Self {
        TodoRow {
            id: todo.id(),
            title: todo.title().to_string(),
            description: Some(todo.description.clone()),
            completed: i64::from(todo.completed),
            due_date: todo.due_date.map(encode_timestamp),
            created_at: encode_timestamp(todo.created_at()),
            updated_at: todo.updated_at().map(encode_timestamp),
        }
    }

    pub fn into_todo(self) -> Result<Todo> {
        let due_date = self.due_date.as_deref().map(|v| decode_timestamp("due_date", v)).transpose()?;
        let created_at = decode_timestamp("created_at", &self.created_at)?;
        let updated_at = self.updated_at.as_deref().map(|v| decode_timestamp("updated_at", v)).transpose()?;

        Todo::load(
            self.id,
            &self.title,
            self.description,
            self.completed != 0,
            due_date,
            Some(created_at),
            updated_at,
        )
        .map_err(|e| StoreError::decode(format!("row {}: {e}", self.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, nanos: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_nano_opt(h, m, s, nanos).unwrap()
    }

    #[test]
    fn timestamps_encode_as_sortable_text() {
        assert_eq!(encode_timestamp(at(9, 5, 0, 0)), "2024-03-15T09:05:00");
        assert_eq!(encode_timestamp(at(9, 5, 0, 250_000_000)), "2024-03-15T09:05:00.250");
        assert!(encode_timestamp(at(9, 5, 0, 0)) < encode_timestamp(at(9, 5, 0, 1_000)));
        assert!(encode_timestamp(at(9, 5, 59, 999_000_000)) < encode_timestamp(at(9, 6, 0, 0)));
    }

    #[test]
    fn decode_accepts_minute_precision() {
        assert_eq!(decode_timestamp("due_date", "2024-03-15T09:05").unwrap(), at(9, 5, 0, 0));
        assert_eq!(decode_timestamp("due_date", "2024-03-15T09:05:07.123456").unwrap(), at(9, 5, 7, 123_456_000));
    }

    #[test]
    fn malformed_timestamp_is_a_decode_error() {
        let row = TodoRow {
            id: 1,
            title: "Pay rent".into(),
            description: None,
            completed: 0,
            due_date: Some("next tuesday".into()),
            created_at: "2024-03-15T09:05:00".into(),
            updated_at: None,
        };
        assert!(matches!(row.into_todo(), Err(StoreError::Decode(_))));
    }

    #[test]
    fn blank_stored_title_is_a_decode_error() {
        let row = TodoRow {
            id: 2,
            title: "  ".into(),
            description: None,
            completed: 0,
            due_date: None,
            created_at: "2024-03-15T09:05:00".into(),
            updated_at: None,
        };
        assert!(matches!(row.into_todo(), Err(StoreError::Decode(_))));
    }

    #[test]
    fn entity_survives_the_row_encoding() {
        let mut todo = Todo::new("Buy milk", Some("2 litres"), Some(at(18, 0, 0, 0))).unwrap();
        todo.set_created_at(at(8, 30, 12, 345_678_901));
        todo.assign_identity(11, at(8, 30, 13, 0));

        let row = TodoRow::from_todo(&todo);
        assert_eq!(row.due_date.as_deref(), Some("2024-03-15T18:00:00"));
        assert_eq!(row.completed, 0);
        assert_eq!(row.into_todo().unwrap(), todo);
    }
}
