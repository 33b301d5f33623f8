use crate::db::todos::Todos;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    #[arg(required = true)]
    id: i64,
}

pub fn cmd(todos: &Todos, args: DoneArgs, completed: bool) -> Result<()> {
    if !todos.set_completed(args.id, completed)? {
        msg_bail_anyhow!(Message::TodoNotFound(args.id));
    }

    if completed {
        msg_success!(Message::TodoCompleted(args.id));
    } else {
        msg_success!(Message::TodoReopened(args.id));
    }

    Ok(())
}
