use super::parse_due_date;
use crate::db::todos::Todos;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(required = true)]
    id: i64,
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    /// New due date: YYYY-MM-DD or YYYY-MM-DDTHH:MM
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<String>,
    #[arg(long, help = "Remove the due date")]
    clear_due: bool,
}

pub fn cmd(todos: &Todos, args: EditArgs) -> Result<()> {
    if args.title.is_none() && args.description.is_none() && args.due.is_none() && !args.clear_due {
        msg_info!(Message::NoChangesRequested);
        return Ok(());
    }

    let Some(mut todo) = todos.get_by_id(args.id)? else {
        msg_bail_anyhow!(Message::TodoNotFound(args.id));
    };

    if let Some(title) = &args.title {
        todo.set_title(title)?;
    }
    if let Some(description) = &args.description {
        todo.set_description(Some(description));
    }
    if let Some(due) = &args.due {
        todo.due_date = Some(parse_due_date(due)?);
    }
    if args.clear_due {
        todo.due_date = None;
    }

    if !todos.update(&mut todo)? {
        msg_bail_anyhow!(Message::TodoNotFound(args.id));
    }
    msg_success!(Message::TodoUpdated(args.id));

    Ok(())
}
