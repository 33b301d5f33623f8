use super::todo::{now, Todo};
use chrono::NaiveDateTime;
use prettytable::{row, Table};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct View {}

impl View {
    pub fn todos(todos: &[Todo]) {
        Self::todos_table(todos, now()).printstd();
    }

    pub fn todos_table(todos: &[Todo], now: NaiveDateTime) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DESCRIPTION", "DUE", "STATUS", "CREATED"]);
        for todo in todos {
            table.add_row(row![
                todo.id(),
                todo.title(),
                todo.description,
                todo.due_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
                Self::status(todo, now),
                todo.created_at().format(DATE_FORMAT)
            ]);
        }

        table
    }

    pub fn status(todo: &Todo, now: NaiveDateTime) -> &'static str {
        if todo.completed {
            "done"
        } else if todo.is_overdue_at(now) {
            "overdue"
        } else {
            "open"
        }
    }
}
