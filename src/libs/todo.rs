//! The to-do entity.
//!
//! A [`Todo`] is created in memory with [`Todo::new`], gains its identity when
//! [`crate::db::todos::Todos::insert`] persists it, and is rebuilt from a row with
//! [`Todo::load`]. The title is validated on every path that sets it.

use crate::libs::error::{Result, StoreError};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Current local time, the clock every timestamp in the store is taken from.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Trims a title and rejects it when nothing is left.
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation("Title cannot be empty"));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Todo {
    id: i64,
    title: String,
    pub description: String,
    pub completed: bool,
    pub due_date: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
    updated_at: Option<NaiveDateTime>,
}

impl Todo {
    /// Creates a todo that has not been persisted yet.
    pub fn new(title: &str, description: Option<&str>, due_date: Option<NaiveDateTime>) -> Result<Self> {
        Ok(Todo {
            id: 0,
            title: validate_title(title)?,
            description: description.unwrap_or_default().to_string(),
            completed: false,
            due_date,
            created_at: now(),
            updated_at: None,
        })
    }

    /// Rebuilds a todo from stored values.
    pub fn load(
        id: i64,
        title: &str,
        description: Option<String>,
        completed: bool,
        due_date: Option<NaiveDateTime>,
        created_at: Option<NaiveDateTime>,
        updated_at: Option<NaiveDateTime>,
    ) -> Result<Self> {
        Ok(Todo {
            id,
            title: validate_title(title)?,
            description: description.unwrap_or_default(),
            completed,
            due_date,
            created_at: created_at.unwrap_or_else(now),
            updated_at,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// A todo has a durable identity once the store assigned it an id.
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = validate_title(title)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<&str>) {
        self.description = description.unwrap_or_default().to_string();
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Overrides the creation time. Ignored once the todo is persisted.
    pub fn set_created_at(&mut self, created_at: NaiveDateTime) {
        if !self.is_persisted() {
            self.created_at = created_at;
        }
    }

    pub fn updated_at(&self) -> Option<NaiveDateTime> {
        self.updated_at
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(now())
    }

    /// Overdue means a due date strictly before `now` on a todo that is not completed.
    pub fn is_overdue_at(&self, now: NaiveDateTime) -> bool {
        match self.due_date {
            Some(due) => !self.completed && due < now,
            None => false,
        }
    }

    pub(crate) fn assign_identity(&mut self, id: i64, updated_at: NaiveDateTime) {
        self.id = id;
        self.updated_at = Some(updated_at);
    }

    pub(crate) fn touch(&mut self, updated_at: NaiveDateTime) {
        self.updated_at = Some(updated_at);
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if self.completed {
            write!(f, " (Done)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_trims_title_and_defaults_fields() {
        let todo = Todo::new("  Pay rent  ", None, None).unwrap();
        assert_eq!(todo.title(), "Pay rent");
        assert_eq!(todo.description, "");
        assert!(!todo.completed);
        assert_eq!(todo.id(), 0);
        assert!(!todo.is_persisted());
        assert!(todo.updated_at().is_none());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(matches!(Todo::new("", None, None), Err(StoreError::Validation(_))));
        assert!(matches!(Todo::new(" \t ", None, None), Err(StoreError::Validation(_))));

        let mut todo = Todo::new("Buy milk", None, None).unwrap();
        assert!(todo.set_title("   ").is_err());
        assert_eq!(todo.title(), "Buy milk");
    }

    #[test]
    fn overdue_derivation() {
        let now = now();
        let mut todo = Todo::new("Pay rent", None, Some(now - Duration::days(1))).unwrap();
        assert!(todo.is_overdue_at(now));

        todo.completed = true;
        assert!(!todo.is_overdue_at(now));

        todo.completed = false;
        todo.due_date = None;
        assert!(!todo.is_overdue_at(now));

        todo.due_date = Some(now + Duration::days(1));
        assert!(!todo.is_overdue_at(now));

        // Due exactly now is not yet overdue.
        todo.due_date = Some(now);
        assert!(!todo.is_overdue_at(now));
    }

    #[test]
    fn display_marks_completed() {
        let mut todo = Todo::new("Old chore", None, None).unwrap();
        assert_eq!(todo.to_string(), "Old chore");
        todo.completed = true;
        assert_eq!(todo.to_string(), "Old chore (Done)");
    }

    #[test]
    fn created_at_is_frozen_after_persisting() {
        let mut todo = Todo::new("Water plants", None, None).unwrap();
        let earlier = todo.created_at() - Duration::hours(2);
        todo.set_created_at(earlier);
        assert_eq!(todo.created_at(), earlier);

        todo.assign_identity(7, now());
        todo.set_created_at(earlier - Duration::hours(1));
        assert_eq!(todo.created_at(), earlier);
    }

    #[test]
    fn load_defaults_missing_values() {
        let todo = Todo::load(3, "Read", None, true, None, None, None).unwrap();
        assert_eq!(todo.id(), 3);
        assert_eq!(todo.description, "");
        assert!(todo.completed);
        assert!(Todo::load(3, " ", None, false, None, None, None).is_err());
    }
}
