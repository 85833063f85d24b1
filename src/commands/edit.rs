//! Implementation of the `promptamp edit` command.
//!
//! Fields not given on the command line keep their stored values; the merged
//! record then passes the same validation as a new prompt.

use super::{open_session, read_content};
use crate::cli::EditArgs;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::prompt::PromptDraft;
use crate::repository::PromptRepository;
use serde_json::json;
use std::path::Path;

/// Execute the `promptamp edit` command.
pub fn cmd_edit(library: Option<&Path>, args: EditArgs) -> Result<()> {
    let session = open_session(library, &args.user)?;
    let repo = PromptRepository::new(&session.ctx);
    let existing = repo.get(&session.user, &args.id)?;

    let content = read_content(&args.content, false)?;

    let mut changed = Vec::new();
    if args.title.is_some() {
        changed.push("title");
    }
    if args.prompt_type.is_some() {
        changed.push("type");
    }
    if args.category.is_some() || args.clear_category {
        changed.push("category");
    }
    if content.is_some() {
        changed.push("content");
    }

    if changed.is_empty() {
        println!("Nothing to change for {}.", existing.id);
        return Ok(());
    }

    let category = if args.clear_category {
        None
    } else {
        args.category.or(existing.category)
    };

    let draft = PromptDraft {
        prompt_type: Some(args.prompt_type.unwrap_or(existing.prompt_type)),
        title: args.title.unwrap_or(existing.title),
        content: content.unwrap_or(existing.content),
        category,
    };

    let prompt = repo.update(&session.user, &existing.id, draft)?;

    append_event(
        &session.ctx,
        &Event::new(EventAction::Update, &session.user)
            .with_prompt(&prompt.id)
            .with_details(json!({ "changed": changed })),
    )?;

    println!("Updated {}: {}", prompt.id, prompt.title);
    println!("  Changed: {}", changed.join(", "));

    Ok(())
}
