//! Implementation of the `promptamp panel` command.
//!
//! Loads the user's prompts into the panel model exactly as the generated
//! script would on a fresh page and prints what it displays: the button row
//! and, with `--open`, the list modal for one type.

use super::{open_session, preview};
use crate::cli::PanelArgs;
use crate::error::{AmpError, Result};
use crate::prompt::PromptType;
use crate::repository::PromptRepository;
use crate::userscript::data::ScriptRecord;
use crate::userscript::panel::{PageContext, PanelState, list_button_label};
use std::collections::BTreeMap;
use std::path::Path;

const PREVIEW_CHARS: usize = 50;

/// Execute the `promptamp panel` command.
pub fn cmd_panel(library: Option<&Path>, args: PanelArgs) -> Result<()> {
    let session = open_session(library, &args.user)?;
    let prompts = PromptRepository::new(&session.ctx).list(&session.user)?;

    let records: Vec<ScriptRecord> = prompts.iter().map(ScriptRecord::from).collect();
    let mut state = PanelState::init(
        records,
        BTreeMap::new(),
        PageContext {
            hostname: String::new(),
            href: String::new(),
        },
        session.config.script.edit_url.clone(),
    );

    let position = if state.panel.is_centered() {
        "top center".to_string()
    } else {
        format!("top {}, left {}", state.panel.top, state.panel.left)
    };
    println!("Panel for user '{}' ({})", session.user, position);
    println!("  {}", button_row(&state));
    println!();

    for prompt_type in [PromptType::SystemPrompt, PromptType::AppStarterPrompt] {
        if let Some(label) = list_button_label(prompt_type) {
            println!("  {:<10} {} prompts", label, state.prompts_of_type(prompt_type).len());
        }
    }
    println!("  {:<10} {} buttons", "Quick", state.quick_actions().len());

    let Some(open) = args.open else {
        return Ok(());
    };

    if list_button_label(open).is_none() {
        return Err(AmpError::UserError(
            "quick actions are panel buttons and have no list; use --open system or --open app"
                .to_string(),
        ));
    }

    state.toggle_list(open);

    for modal in &state.open_modals_stack {
        println!();
        println!("{} (z-index {})", modal.id(), modal.z_index());
    }

    let items = state.list_items();
    if items.is_empty() {
        println!("  No {} yet.", open.display_name().to_lowercase());
    }
    for (i, item) in items.iter().enumerate() {
        let mut row = format!("  {:>2}. {}", i + 1, item.title);
        if !item.category.is_empty() {
            row.push_str(&format!(" [{}]", item.category));
        }
        if item.copy_count > 0 {
            row.push_str(&format!(" ({}x)", item.copy_count));
        }
        println!("{}", row);
        println!("      {}", preview(&item.content, PREVIEW_CHARS));
    }

    Ok(())
}

/// The panel's buttons left to right, as their labels.
fn button_row(state: &PanelState) -> String {
    let mut buttons = vec!["✥".to_string()];
    buttons.extend(
        [PromptType::SystemPrompt, PromptType::AppStarterPrompt]
            .into_iter()
            .filter_map(list_button_label)
            .map(str::to_string),
    );
    buttons.extend(state.quick_actions().iter().map(|q| q.title.clone()));
    buttons.push("E".to_string());
    buttons.push("P".to_string());

    buttons
        .iter()
        .map(|b| format!("[{}]", b))
        .collect::<Vec<_>>()
        .join(" ")
}
