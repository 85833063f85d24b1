//! Implementation of the `promptamp init` command.
//!
//! Creates the library directory structure:
//!
//! ```text
//! .promptamp/
//!   config.yaml
//!   users/
//!   events/events.ndjson
//! ```
//!
//! Running it again is harmless: directories are created only when missing
//! and an existing `config.yaml` is never overwritten.

use crate::config::Config;
use crate::context::LibraryContext;
use crate::error::{AmpError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::fs::atomic_write_file;
use serde_json::json;
use std::fs;
use std::path::Path;

/// Execute the `promptamp init` command.
pub fn cmd_init(library: Option<&Path>) -> Result<()> {
    let ctx = LibraryContext::resolve(library)?;
    let already_initialized = ctx.exists();

    for dir in [ctx.root.clone(), ctx.users_dir(), ctx.events_dir()] {
        create_dir(&dir)?;
    }

    let config_created = write_default_config(&ctx)?;
    let config = Config::load(ctx.config_path())?;

    append_event(
        &ctx,
        &Event::new(EventAction::Init, &config.user).with_details(json!({
            "root": ctx.root.display().to_string(),
            "config_created": config_created,
            "reinitialized": already_initialized,
        })),
    )?;

    if already_initialized {
        println!("Prompt library already initialized.");
    } else {
        println!("Initialized prompt library.");
    }
    println!();
    println!("Library: {}", ctx.root.display());
    if config_created {
        println!("Config:  {} (created)", ctx.config_path().display());
    } else {
        println!("Config:  {} (kept)", ctx.config_path().display());
    }
    println!("User:    {}", config.user);
    println!();
    println!("You can now add prompts with `promptamp add \"Title\" --type system --content \"...\"`.");

    Ok(())
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| {
        AmpError::StorageError(format!(
            "failed to create directory '{}': {}",
            dir.display(),
            e
        ))
    })
}

/// Write `config.yaml` with defaults unless one exists. Returns whether it was written.
fn write_default_config(ctx: &LibraryContext) -> Result<bool> {
    let path = ctx.config_path();
    if path.exists() {
        return Ok(false);
    }

    let yaml = Config::default().to_yaml()?;
    atomic_write_file(&path, &format!("{}{}", CONFIG_PREAMBLE, yaml))?;
    Ok(true)
}

const CONFIG_PREAMBLE: &str = "\
# promptamp library configuration.
# `user` selects whose prompts commands act on when --user is not given.
# `script` controls the header and behaviour of the generated userscript.
";
