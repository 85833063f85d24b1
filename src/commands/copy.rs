//! Implementation of the `promptamp copy` command.
//!
//! Writes the prompt's content to stdout, byte for byte, and bumps its copy
//! count. Status goes to the log so the output can be piped straight into a
//! clipboard tool.

use super::open_session;
use crate::cli::IdArgs;
use crate::error::{AmpError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::repository::PromptRepository;
use serde_json::json;
use std::io::Write;
use std::path::Path;

/// Execute the `promptamp copy` command.
pub fn cmd_copy(library: Option<&Path>, args: IdArgs) -> Result<()> {
    let session = open_session(library, &args.user)?;
    let repo = PromptRepository::new(&session.ctx);

    let prompt = repo.get(&session.user, &args.id)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(prompt.content.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| AmpError::UserError(format!("failed to write prompt content: {}", e)))?;

    let updated = repo.record_copy(&session.user, &prompt.id)?;

    append_event(
        &session.ctx,
        &Event::new(EventAction::Copy, &session.user)
            .with_prompt(&updated.id)
            .with_details(json!({ "copy_count": updated.copy_count_or_default() })),
    )?;

    tracing::info!(
        id = %updated.id,
        copies = updated.copy_count_or_default(),
        "prompt copied"
    );
    Ok(())
}
