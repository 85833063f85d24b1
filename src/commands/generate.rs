//! Implementation of the `promptamp generate` command.
//!
//! Renders the userscript for a user's current prompts. The script goes to
//! stdout unless `--output` names a file, which is replaced atomically.

use super::open_session;
use crate::cli::GenerateArgs;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::fs::atomic_write_file;
use crate::prompt::{PALETTE_VERSION, PromptType, of_type};
use crate::repository::PromptRepository;
use crate::userscript::generate;
use serde_json::json;
use std::path::Path;

/// Execute the `promptamp generate` command.
pub fn cmd_generate(library: Option<&Path>, args: GenerateArgs) -> Result<()> {
    let session = open_session(library, &args.user)?;
    let prompts = PromptRepository::new(&session.ctx).list(&session.user)?;

    let script = generate(&prompts, &session.config.script);

    match &args.output {
        Some(path) => {
            atomic_write_file(path, &script)?;
            println!(
                "Wrote userscript with {} prompts to {}",
                prompts.len(),
                path.display()
            );
            for prompt_type in PromptType::ALL {
                println!(
                    "  {:<20} {}",
                    prompt_type.display_name(),
                    of_type(&prompts, prompt_type).len()
                );
            }
        }
        None => print!("{}", script),
    }

    append_event(
        &session.ctx,
        &Event::new(EventAction::Generate, &session.user).with_details(json!({
            "prompts": prompts.len(),
            "bytes": script.len(),
            "output": args.output.as_ref().map(|p| p.display().to_string()),
            "palette_version": PALETTE_VERSION,
        })),
    )?;

    Ok(())
}
