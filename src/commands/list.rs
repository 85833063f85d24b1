//! Implementation of the `promptamp list` command.
//!
//! Prints a user's prompts grouped by type, or the raw records as JSON with
//! `--json` for piping into other tools.

use super::{open_session, preview};
use crate::cli::ListArgs;
use crate::error::{AmpError, Result};
use crate::prompt::{Prompt, PromptType, of_type};
use crate::repository::PromptRepository;
use std::path::Path;

const PREVIEW_CHARS: usize = 60;

/// Execute the `promptamp list` command.
pub fn cmd_list(library: Option<&Path>, args: ListArgs) -> Result<()> {
    let session = open_session(library, &args.user)?;
    let repo = PromptRepository::new(&session.ctx);

    let prompts = match args.prompt_type {
        Some(prompt_type) => repo.list_by_type(&session.user, prompt_type)?,
        None => repo.list(&session.user)?,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&prompts).map_err(|e| {
            AmpError::StorageError(format!("failed to serialize prompts to JSON: {}", e))
        })?;
        println!("{}", json);
        return Ok(());
    }

    if prompts.is_empty() {
        println!("No prompts for user '{}'.", session.user);
        println!();
        println!("Add one with `promptamp add \"Title\" --type system --content \"...\"`.");
        return Ok(());
    }

    let types = match args.prompt_type {
        Some(prompt_type) => vec![prompt_type],
        None => PromptType::ALL.to_vec(),
    };

    for prompt_type in types {
        let group = of_type(&prompts, prompt_type);
        if group.is_empty() {
            continue;
        }
        println!("{} ({})", prompt_type.display_name(), group.len());
        for prompt in group {
            println!("{}", format_row(prompt));
        }
        println!();
    }

    Ok(())
}

/// One table row: id, title, category badge, copy count and a content preview.
fn format_row(prompt: &Prompt) -> String {
    let mut row = format!("  {:<22} {}", prompt.id, prompt.title);

    if let Some(category) = &prompt.category {
        row.push_str(&format!(" [{}]", category));
    }

    let copies = prompt.copy_count_or_default();
    if copies > 0 {
        row.push_str(&format!(" (copied {}x)", copies));
    }

    row.push_str(&format!("\n  {:<22} {}", "", preview(&prompt.content, PREVIEW_CHARS)));
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::prompt;

    #[test]
    fn row_shows_badge_and_copies() {
        let mut p = prompt("prompt_1", PromptType::SystemPrompt, "Reviewer", "Review\nthis code.");
        p.category = Some("Code".to_string());
        p.copy_count = Some(3);

        let row = format_row(&p);
        assert!(row.contains("prompt_1"));
        assert!(row.contains("Reviewer [Code] (copied 3x)"));
        assert!(row.contains("Review this code."));
    }

    #[test]
    fn row_omits_zero_copies_and_missing_category() {
        let p = prompt("prompt_2", PromptType::QuickAction, "Fix", "Fix grammar");
        let row = format_row(&p);
        assert!(!row.contains('['));
        assert!(!row.contains("copied"));
    }
}
