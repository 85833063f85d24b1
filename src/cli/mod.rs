//! CLI argument parsing for promptamp.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::prompt::PromptType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// promptamp: a file-backed prompt library that renders a prompt-picker
/// userscript for chat sites.
///
/// Prompts live as documents under `.promptamp/users/<user>/prompts/`.
/// `promptamp generate` turns a user's library into a userscript that adds a
/// floating panel of system prompts, app starters and quick actions to
/// supported chat pages.
#[derive(Parser, Debug)]
#[command(name = "promptamp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Library directory (default: $PROMPTAMP_HOME, else the nearest `.promptamp/`).
    #[arg(long, global = true, value_name = "PATH")]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for promptamp.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a prompt library.
    ///
    /// Creates `.promptamp/` with a default `config.yaml`, `users/` and
    /// `events/`. Safe to run again; an existing config is kept.
    Init,

    /// Add a prompt.
    ///
    /// Content comes from `--content`, `--file`, or standard input.
    Add(AddArgs),

    /// Edit a prompt's fields. Unspecified fields are kept.
    Edit(EditArgs),

    /// Delete a prompt.
    #[command(alias = "rm")]
    Remove(IdArgs),

    /// List prompts grouped by type.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one prompt in full.
    Show(IdArgs),

    /// Print a prompt's content and count the copy.
    ///
    /// Pipe the output to your clipboard tool, e.g. `promptamp copy ID | pbcopy`.
    Copy(IdArgs),

    /// List the categories in use.
    Categories(UserArgs),

    /// Render the userscript for a user's library.
    Generate(GenerateArgs),

    /// Show what the injected panel will display.
    Panel(PanelArgs),

    /// Show recent library changes from the audit log.
    History(HistoryArgs),
}

/// Selects whose library a command works on.
#[derive(Args, Debug, Clone, Default)]
pub struct UserArgs {
    /// User identity (default: `user` from config.yaml).
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for commands that take a single prompt id.
#[derive(Args, Debug)]
pub struct IdArgs {
    /// Prompt id (see `promptamp list`).
    pub id: String,

    #[command(flatten)]
    pub user: UserArgs,
}

/// Where a prompt's content comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct ContentArgs {
    /// Prompt content.
    #[arg(long, conflicts_with = "file")]
    pub content: Option<String>,

    /// Read prompt content from a file.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Arguments for the `add` command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Title shown in lists (button text for quick actions).
    pub title: String,

    /// Prompt type: system, app-starter or quick.
    #[arg(short = 't', long = "type", value_parser = parse_prompt_type)]
    pub prompt_type: PromptType,

    /// Category label (ignored for quick actions).
    #[arg(short, long)]
    pub category: Option<String>,

    #[command(flatten)]
    pub content: ContentArgs,

    #[command(flatten)]
    pub user: UserArgs,
}

/// Arguments for the `edit` command.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Prompt id to edit.
    pub id: String,

    /// New title.
    #[arg(long)]
    pub title: Option<String>,

    /// New prompt type.
    #[arg(short = 't', long = "type", value_parser = parse_prompt_type)]
    pub prompt_type: Option<PromptType>,

    /// New category.
    #[arg(short, long, conflicts_with = "clear_category")]
    pub category: Option<String>,

    /// Remove the category.
    #[arg(long)]
    pub clear_category: bool,

    #[command(flatten)]
    pub content: ContentArgs,

    #[command(flatten)]
    pub user: UserArgs,
}

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list prompts of this type.
    #[arg(short = 't', long = "type", value_parser = parse_prompt_type)]
    pub prompt_type: Option<PromptType>,

    /// Print the prompts as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub user: UserArgs,
}

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Write the script to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub user: UserArgs,
}

/// Arguments for the `panel` command.
#[derive(Args, Debug)]
pub struct PanelArgs {
    /// Also show the list opened by this type's button.
    #[arg(long, value_parser = parse_prompt_type)]
    pub open: Option<PromptType>,

    #[command(flatten)]
    pub user: UserArgs,
}

/// Arguments for the `history` command.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Number of most recent events to show.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    /// Show events for every user.
    #[arg(long, conflicts_with = "user")]
    pub all_users: bool,

    #[command(flatten)]
    pub user: UserArgs,
}

fn parse_prompt_type(s: &str) -> Result<PromptType, String> {
    PromptType::from_str(s).ok_or_else(|| {
        format!(
            "unknown prompt type '{}' (expected system, app-starter or quick)",
            s
        )
    })
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["promptamp", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init));
        assert_eq!(cli.library, None);
    }

    #[test]
    fn parse_global_library_after_subcommand() {
        let cli = Cli::try_parse_from(["promptamp", "list", "--library", "/tmp/lib"]).unwrap();
        assert_eq!(cli.library, Some(PathBuf::from("/tmp/lib")));
    }

    #[test]
    fn parse_add_full() {
        let cli = Cli::try_parse_from([
            "promptamp",
            "add",
            "Reviewer",
            "--type",
            "system",
            "--category",
            "Code",
            "--content",
            "Review this code.",
            "--user",
            "alice",
        ])
        .unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.title, "Reviewer");
            assert_eq!(args.prompt_type, PromptType::SystemPrompt);
            assert_eq!(args.category.as_deref(), Some("Code"));
            assert_eq!(args.content.content.as_deref(), Some("Review this code."));
            assert_eq!(args.user.user.as_deref(), Some("alice"));
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn parse_add_accepts_wire_spelling() {
        let cli =
            Cli::try_parse_from(["promptamp", "add", "Fix", "-t", "QUICK_ACTION", "--content", "x"])
                .unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.prompt_type, PromptType::QuickAction);
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn add_requires_type() {
        assert!(Cli::try_parse_from(["promptamp", "add", "Fix"]).is_err());
    }

    #[test]
    fn add_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["promptamp", "add", "Fix", "-t", "banana"]).is_err());
    }

    #[test]
    fn content_and_file_conflict() {
        let result = Cli::try_parse_from([
            "promptamp", "add", "T", "-t", "s", "--content", "x", "--file", "y.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_edit() {
        let cli = Cli::try_parse_from([
            "promptamp",
            "edit",
            "prompt_abc",
            "--title",
            "New",
            "--clear-category",
        ])
        .unwrap();
        if let Command::Edit(args) = cli.command {
            assert_eq!(args.id, "prompt_abc");
            assert_eq!(args.title.as_deref(), Some("New"));
            assert!(args.clear_category);
            assert_eq!(args.prompt_type, None);
        } else {
            panic!("Expected Edit command");
        }
    }

    #[test]
    fn edit_category_conflicts_with_clear() {
        let result = Cli::try_parse_from([
            "promptamp",
            "edit",
            "prompt_abc",
            "--category",
            "X",
            "--clear-category",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_remove_alias() {
        let cli = Cli::try_parse_from(["promptamp", "rm", "prompt_abc"]).unwrap();
        if let Command::Remove(args) = cli.command {
            assert_eq!(args.id, "prompt_abc");
        } else {
            panic!("Expected Remove command");
        }
    }

    #[test]
    fn parse_list_filters() {
        let cli = Cli::try_parse_from(["promptamp", "ls", "-t", "app", "--json"]).unwrap();
        if let Command::List(args) = cli.command {
            assert_eq!(args.prompt_type, Some(PromptType::AppStarterPrompt));
            assert!(args.json);
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn parse_copy_and_show() {
        let cli = Cli::try_parse_from(["promptamp", "copy", "prompt_1", "-u", "bob"]).unwrap();
        if let Command::Copy(args) = cli.command {
            assert_eq!(args.id, "prompt_1");
            assert_eq!(args.user.user.as_deref(), Some("bob"));
        } else {
            panic!("Expected Copy command");
        }

        let cli = Cli::try_parse_from(["promptamp", "show", "prompt_1"]).unwrap();
        assert!(matches!(cli.command, Command::Show(_)));
    }

    #[test]
    fn parse_generate_output() {
        let cli = Cli::try_parse_from(["promptamp", "generate", "-o", "out.user.js"]).unwrap();
        if let Command::Generate(args) = cli.command {
            assert_eq!(args.output, Some(PathBuf::from("out.user.js")));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn parse_panel_open() {
        let cli = Cli::try_parse_from(["promptamp", "panel", "--open", "system"]).unwrap();
        if let Command::Panel(args) = cli.command {
            assert_eq!(args.open, Some(PromptType::SystemPrompt));
        } else {
            panic!("Expected Panel command");
        }
    }

    #[test]
    fn parse_history_defaults() {
        let cli = Cli::try_parse_from(["promptamp", "history"]).unwrap();
        if let Command::History(args) = cli.command {
            assert_eq!(args.limit, 20);
            assert!(!args.all_users);
        } else {
            panic!("Expected History command");
        }
    }
}
