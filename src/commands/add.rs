//! Implementation of the `promptamp add` command.

use super::{open_session, read_content};
use crate::cli::AddArgs;
use crate::error::{AmpError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::prompt::PromptDraft;
use crate::repository::PromptRepository;
use serde_json::json;
use std::path::Path;

/// Execute the `promptamp add` command.
pub fn cmd_add(library: Option<&Path>, args: AddArgs) -> Result<()> {
    let session = open_session(library, &args.user)?;

    let content = read_content(&args.content, true)?.ok_or_else(|| {
        AmpError::UserError(
            "no prompt content given.\n\n\
             Pass --content \"...\", --file PATH, or pipe the content on stdin."
                .to_string(),
        )
    })?;

    if args.category.is_some() && !args.prompt_type.allows_category() {
        tracing::warn!("quick actions have no category; ignoring --category");
    }

    let draft = PromptDraft {
        prompt_type: Some(args.prompt_type),
        title: args.title,
        content,
        category: args.category,
    };

    let repo = PromptRepository::new(&session.ctx);
    let prompt = repo.add(&session.user, draft)?;

    append_event(
        &session.ctx,
        &Event::new(EventAction::Add, &session.user)
            .with_prompt(&prompt.id)
            .with_details(json!({
                "type": prompt.prompt_type,
                "title": prompt.title,
                "category": prompt.category,
            })),
    )?;

    println!("Added {}: {}", prompt.prompt_type.display_name(), prompt.title);
    println!("  ID: {}", prompt.id);
    if let Some(category) = &prompt.category {
        println!("  Category: {}", category);
    }

    Ok(())
}
