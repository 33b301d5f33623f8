use super::parse_due_date;
use crate::db::todos::Todos;
use crate::libs::messages::Message;
use crate::libs::todo::Todo;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(required = true)]
    title: String,
    #[arg(short, long)]
    description: Option<String>,
    /// Due date: YYYY-MM-DD or YYYY-MM-DDTHH:MM
    #[arg(long)]
    due: Option<String>,
}

pub fn cmd(todos: &Todos, args: AddArgs) -> Result<()> {
    let due_date = args.due.as_deref().map(parse_due_date).transpose()?;
    let mut todo = Todo::new(&args.title, args.description.as_deref(), due_date)?;

    if !todos.insert(&mut todo)? {
        msg_bail_anyhow!(Message::TodoCreateFailed);
    }
    msg_success!(Message::TodoCreated(todo.id()));

    Ok(())
}
