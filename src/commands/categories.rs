//! Implementation of the `promptamp categories` command.

use super::open_session;
use crate::cli::UserArgs;
use crate::error::Result;
use crate::prompt::{PALETTE_VERSION, category_color};
use crate::repository::PromptRepository;
use std::path::Path;

/// Execute the `promptamp categories` command.
///
/// Lists each category in use with its prompt count and badge color.
pub fn cmd_categories(library: Option<&Path>, args: UserArgs) -> Result<()> {
    let session = open_session(library, &args)?;
    let repo = PromptRepository::new(&session.ctx);

    let categories = repo.categories(&session.user)?;
    if categories.is_empty() {
        println!("No categories in use for user '{}'.", session.user);
        return Ok(());
    }

    let prompts = repo.list(&session.user)?;
    let width = categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);

    println!("Categories ({}, palette v{})", categories.len(), PALETTE_VERSION);
    for category in &categories {
        let count = prompts
            .iter()
            .filter(|p| p.category.as_deref() == Some(category.as_str()))
            .count();

        let swatch = category_color(category)
            .map(|c| format!("{} {}/{}", c.name, c.background, c.foreground))
            .unwrap_or_default();

        println!("  {:<width$}  {:>3}  {}", category, count, swatch, width = width);
    }

    Ok(())
}
