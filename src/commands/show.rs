use crate::db::todos::Todos;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_bail_anyhow;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(required = true)]
    id: i64,
}

pub fn cmd(todos: &Todos, args: ShowArgs) -> Result<()> {
    match todos.get_by_id(args.id)? {
        Some(todo) => {
            View::todos(std::slice::from_ref(&todo));
            Ok(())
        }
        None => msg_bail_anyhow!(Message::TodoNotFound(args.id)),
    }
}
