use crate::db::todos::Todos;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_info;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, conflicts_with = "completed", help = "Only todos that are not done, by due date")]
    pending: bool,
    #[arg(long, help = "Only todos that are done")]
    completed: bool,
    #[arg(long, help = "Print JSON instead of a table")]
    json: bool,
}

pub fn cmd(todos: &Todos, args: ListArgs) -> Result<()> {
    let list = if args.pending {
        todos.get_pending()?
    } else if args.completed {
        todos.get_completed()?
    } else {
        todos.get_all()?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else if list.is_empty() {
        msg_info!(Message::TodosNotFound);
    } else {
        View::todos(&list);
    }

    Ok(())
}
