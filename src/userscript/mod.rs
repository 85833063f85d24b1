//! Userscript generation.
//!
//! [`generate`] turns a snapshot of prompts into a complete browser
//! userscript. The output is assembled from two bundled fragments:
//!
//! - `shell.js`: the skeleton (header, data array, IIFE, bootstrap)
//! - `runtime.js`: the in-page panel controller
//!
//! Only named slots are filled in; the runtime's logic is never generated.
//! Every value placed in a slot is either a fixed constant or a literal
//! produced by [`literal`], so prompt text cannot change the script's
//! structure.
//!
//! ```no_run
//! use promptamp::prompt::{Prompt, PromptType};
//! use promptamp::userscript::{ScriptOptions, generate};
//!
//! let prompts = vec![Prompt {
//!     id: "1".into(),
//!     prompt_type: PromptType::QuickAction,
//!     title: "Fix".into(),
//!     content: "Fix grammar".into(),
//!     category: None,
//!     copy_count: None,
//! }];
//! let script = generate(&prompts, &ScriptOptions::default());
//! assert!(script.starts_with("// ==UserScript=="));
//! ```

pub mod data;
pub mod header;
pub mod literal;
pub mod panel;
pub mod template;

pub use template::TemplateError;

use crate::config::ScriptSettings;
use crate::prompt::{Prompt, PromptType};
use chrono::{DateTime, Utc};
use literal::string_literal;
use template::{render_template, slots};

const SHELL: &str = include_str!("shell.js");
const RUNTIME: &str = include_str!("runtime.js");

/// Inputs to the generator other than the prompts themselves.
pub type ScriptOptions = ScriptSettings;

/// Render the userscript for `prompts`, stamped with the current time.
pub fn generate(prompts: &[Prompt], options: &ScriptOptions) -> String {
    generate_at(prompts, options, Utc::now())
}

/// Render the userscript with an explicit generation time.
///
/// Never fails. Prompt data cannot produce a rendering error; only a broken
/// bundled fragment can, and then the script body is a comment naming it.
pub fn generate_at(prompts: &[Prompt], options: &ScriptOptions, now: DateTime<Utc>) -> String {
    match render(prompts, options, now) {
        Ok(script) => {
            tracing::debug!(
                prompts = prompts.len(),
                bytes = script.len(),
                "userscript generated"
            );
            script
        }
        Err(e) => {
            tracing::error!(error = %e, "bundled userscript fragment failed to render");
            format!(
                "{}\n\n// Script generation failed: {}\n",
                header::render_header(options, now),
                e
            )
        }
    }
}

/// Fallible core of [`generate_at`].
pub fn render(
    prompts: &[Prompt],
    options: &ScriptOptions,
    now: DateTime<Utc>,
) -> Result<String, TemplateError> {
    let runtime = render_template(RUNTIME, &runtime_slots(prompts, options)?)?;

    let shell_slots = slots([
        ("header", header::render_header(options, now)),
        ("prompts", data::render_records(prompts)?),
        ("runtime", runtime.trim_end().to_string()),
    ]);

    render_template(SHELL, &shell_slots)
}

fn runtime_slots(
    prompts: &[Prompt],
    options: &ScriptOptions,
) -> Result<std::collections::HashMap<String, String>, TemplateError> {
    Ok(slots([
        ("prompts_storage_key", string_literal(panel::PROMPTS_STORAGE_KEY)),
        ("positions_storage_key", string_literal(panel::POSITIONS_STORAGE_KEY)),
        ("notification_ms", panel::NOTIFICATION_DISMISS_MS.to_string()),
        ("modal_base_z", panel::MODAL_BASE_Z.to_string()),
        ("init_delay_ms", options.init_delay_ms.to_string()),
        ("default_top", string_literal(panel::DEFAULT_PANEL_TOP)),
        ("default_left", string_literal(panel::DEFAULT_PANEL_LEFT)),
        ("list_modal_id", string_literal(panel::LIST_MODAL_ID)),
        ("preview_prefix", string_literal(panel::PREVIEW_MODAL_PREFIX)),
        ("edit_url", string_literal(&options.edit_url)),
        ("script_name", string_literal(&options.name)),
        ("category_colors", data::render_category_colors(prompts)?),
        ("system_template", data::template_snippet(PromptType::SystemPrompt)?),
        (
            "app_starter_template",
            data::template_snippet(PromptType::AppStarterPrompt)?,
        ),
    ]))
}
