//! Command implementations for promptamp.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the helpers every command shares: opening the
//! library, resolving the acting user and reading prompt content.

mod add;
mod categories;
mod copy;
mod edit;
mod generate;
mod history;
mod init;
mod list;
mod panel;
mod remove;
mod show;

use crate::cli::{Cli, Command, ContentArgs, UserArgs};
use crate::config::Config;
use crate::context::{LibraryContext, require_library};
use crate::error::{AmpError, Result};
use crate::repository::validate_user;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let library = cli.library.as_deref();

    match cli.command {
        Command::Init => init::cmd_init(library),
        Command::Add(args) => add::cmd_add(library, args),
        Command::Edit(args) => edit::cmd_edit(library, args),
        Command::Remove(args) => remove::cmd_remove(library, args),
        Command::List(args) => list::cmd_list(library, args),
        Command::Show(args) => show::cmd_show(library, args),
        Command::Copy(args) => copy::cmd_copy(library, args),
        Command::Categories(args) => categories::cmd_categories(library, args),
        Command::Generate(args) => generate::cmd_generate(library, args),
        Command::Panel(args) => panel::cmd_panel(library, args),
        Command::History(args) => history::cmd_history(library, args),
    }
}

/// An initialized library opened on behalf of one user.
pub(crate) struct Session {
    pub ctx: LibraryContext,
    pub config: Config,
    pub user: String,
}

/// Open the library and settle which user the command acts for.
///
/// `--user` wins over the `user` key in `config.yaml`.
pub(crate) fn open_session(library: Option<&Path>, args: &UserArgs) -> Result<Session> {
    let ctx = require_library(library)?;
    let config = Config::load_or_default(ctx.config_path())?;

    let user = match &args.user {
        Some(user) => user.clone(),
        None => config.user.clone(),
    };
    validate_user(&user)?;

    tracing::debug!(root = %ctx.root.display(), user = %user, "library opened");
    Ok(Session { ctx, config, user })
}

/// Read prompt content from `--content`, `--file` or piped stdin.
///
/// Stdin is only consulted when `allow_stdin` is set and it is not a terminal.
/// Returns `None` when no source supplied anything.
pub(crate) fn read_content(args: &ContentArgs, allow_stdin: bool) -> Result<Option<String>> {
    if let Some(content) = &args.content {
        return Ok(Some(content.clone()));
    }

    if let Some(path) = &args.file {
        let content = fs::read_to_string(path).map_err(|e| {
            AmpError::UserError(format!(
                "failed to read content file '{}': {}",
                path.display(),
                e
            ))
        })?;
        return Ok(Some(content));
    }

    let stdin = std::io::stdin();
    if !allow_stdin || stdin.is_terminal() {
        return Ok(None);
    }

    let mut content = String::new();
    stdin
        .lock()
        .read_to_string(&mut content)
        .map_err(|e| AmpError::UserError(format!("failed to read content from stdin: {}", e)))?;
    Ok(Some(content))
}

/// Shorten text to one line of at most `max` characters for tables.
pub(crate) fn preview(text: &str, max: usize) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= max {
        return line;
    }
    let cut: String = line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
