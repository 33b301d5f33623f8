use crate::db::todos::Todos;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(required = true)]
    id: i64,
}

pub fn cmd(todos: &Todos, args: DeleteArgs) -> Result<()> {
    if !todos.delete(args.id)? {
        msg_bail_anyhow!(Message::TodoNotFound(args.id));
    }
    msg_success!(Message::TodoDeleted(args.id));

    Ok(())
}
