//! Implementation of the `promptamp remove` command.

use super::open_session;
use crate::cli::IdArgs;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::repository::PromptRepository;
use serde_json::json;
use std::path::Path;

/// Execute the `promptamp remove` command.
pub fn cmd_remove(library: Option<&Path>, args: IdArgs) -> Result<()> {
    let session = open_session(library, &args.user)?;
    let removed = PromptRepository::new(&session.ctx).delete(&session.user, &args.id)?;

    append_event(
        &session.ctx,
        &Event::new(EventAction::Delete, &session.user)
            .with_prompt(&removed.id)
            .with_details(json!({
                "type": removed.prompt_type,
                "title": removed.title,
            })),
    )?;

    println!("Removed {}: {}", removed.id, removed.title);
    Ok(())
}
