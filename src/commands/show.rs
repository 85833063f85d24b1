//! Implementation of the `promptamp show` command.
//!
//! Displays one prompt's metadata followed by its full content.

use super::open_session;
use crate::cli::IdArgs;
use crate::error::Result;
use crate::prompt::category_color;
use crate::repository::PromptRepository;
use std::path::Path;

/// Execute the `promptamp show` command.
pub fn cmd_show(library: Option<&Path>, args: IdArgs) -> Result<()> {
    let session = open_session(library, &args.user)?;
    let prompt = PromptRepository::new(&session.ctx).get(&session.user, &args.id)?;

    println!("================================================================================");
    println!("{} [{}]", prompt.id, prompt.prompt_type);
    println!("================================================================================");
    println!();

    println!("Title:      {}", prompt.title);
    println!("Type:       {}", prompt.prompt_type.display_name());

    if let Some(category) = &prompt.category {
        match category_color(category) {
            Some(color) => println!("Category:   {} ({})", category, color.name),
            None => println!("Category:   {}", category),
        }
    }

    println!("Copied:     {} times", prompt.copy_count_or_default());

    println!();
    println!("--------------------------------------------------------------------------------");
    print!("{}", prompt.content);
    if !prompt.content.ends_with('\n') {
        println!();
    }

    Ok(())
}
