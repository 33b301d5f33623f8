pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod show;

use crate::db::db::Db;
use crate::db::todos::Todos;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Add a todo")]
    Add(add::AddArgs),
    #[command(about = "List todos")]
    List(list::ListArgs),
    #[command(about = "Show a single todo")]
    Show(show::ShowArgs),
    #[command(about = "Mark a todo as done")]
    Done(done::DoneArgs),
    #[command(about = "Mark a todo as not done")]
    Undo(done::DoneArgs),
    #[command(about = "Change a todo")]
    Edit(edit::EditArgs),
    #[command(about = "Delete a todo")]
    Delete(delete::DeleteArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();

        let config = Config::read()?;
        let db_config = match cli.db {
            Some(path) => config.db_config_at(path),
            None => config.db_config()?,
        };

        let db = Arc::new(Db::new(db_config));
        let todos = Todos::new(db.clone());

        let result = match cli.command {
            Commands::Add(args) => add::cmd(&todos, args),
            Commands::List(args) => list::cmd(&todos, args),
            Commands::Show(args) => show::cmd(&todos, args),
            Commands::Done(args) => done::cmd(&todos, args, true),
            Commands::Undo(args) => done::cmd(&todos, args, false),
            Commands::Edit(args) => edit::cmd(&todos, args),
            Commands::Delete(args) => delete::cmd(&todos, args),
        };

        db.close();
        result
    }
}

/// Parses `YYYY-MM-DD` (end of that day), `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_due_date(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(due) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(due);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .ok_or_else(|| msg_error_anyhow!(Message::InvalidDueDate(value.to_string())))
}
