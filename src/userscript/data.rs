//! Data section of the generated script.
//!
//! Every prompt becomes one record on its own line:
//!
//! ```text
//! {"id":"…","type":"…","title":"…","category":"…","content":"…","copyCount":0}
//! ```
//!
//! Missing optional fields are filled here, so the runtime never sees an
//! `undefined` category or count.

use super::literal::{encode, string_literal};
use super::template::TemplateError;
use crate::prompt::{Prompt, PromptType, category_color};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Emitted in place of records when the library is empty.
pub const EMPTY_PLACEHOLDER: &str =
    "// No prompts defined. Add some in Prompt Amplifier or edit this script!";

/// Indentation of records inside the data array.
pub const RECORD_INDENT: &str = "        ";

/// A prompt as the runtime sees it. Field order is the emitted key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub prompt_type: String,
    pub title: String,
    pub category: String,
    pub content: String,
    pub copy_count: u64,
}

impl From<&Prompt> for ScriptRecord {
    fn from(prompt: &Prompt) -> Self {
        Self {
            id: prompt.id.clone(),
            prompt_type: prompt.prompt_type.as_str().to_string(),
            title: prompt.title.clone(),
            category: prompt.category_or_default().to_string(),
            content: prompt.content.clone(),
            copy_count: prompt.copy_count_or_default(),
        }
    }
}

/// Render the body of the data array: one record per line, comma separated.
pub fn render_records(prompts: &[Prompt]) -> Result<String, TemplateError> {
    if prompts.is_empty() {
        return Ok(format!("{}{}", RECORD_INDENT, EMPTY_PLACEHOLDER));
    }

    let lines = prompts
        .iter()
        .map(|p| {
            encode(&ScriptRecord::from(p), "prompt record")
                .map(|record| format!("{}{}", RECORD_INDENT, record))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(lines.join(",\n"))
}

/// Scaffolding record copied by the list modal's "Copy Template" button.
///
/// The snippet is itself a record line plus a trailing comma, ready to be
/// pasted into the data array of an installed script.
pub fn template_snippet(prompt_type: PromptType) -> Result<String, TemplateError> {
    let (id, title, content) = match prompt_type {
        PromptType::SystemPrompt => (
            "new_system_prompt_id",
            "⚙️ - (New system prompt name)",
            "(Write the system prompt here)",
        ),
        PromptType::AppStarterPrompt => (
            "new_app_starter_id",
            "(New app starter name)",
            "(Write the app starter prompt here)",
        ),
        PromptType::QuickAction => ("new_quick_action_id", "New", "(Write the instruction here)"),
    };

    let record = ScriptRecord {
        id: id.to_string(),
        prompt_type: prompt_type.as_str().to_string(),
        title: title.to_string(),
        category: String::new(),
        content: content.to_string(),
        copy_count: 0,
    };

    let snippet = format!("{},", encode(&record, "template snippet")?);
    Ok(string_literal(&snippet))
}

#[derive(Debug, Serialize)]
struct BadgeColors {
    background: &'static str,
    foreground: &'static str,
}

/// Category badge colors for every category present, keyed by name.
pub fn render_category_colors(prompts: &[Prompt]) -> Result<String, TemplateError> {
    let colors: BTreeMap<&str, BadgeColors> = prompts
        .iter()
        .filter_map(|p| {
            let name = p.category.as_deref()?;
            let color = category_color(name)?;
            Some((
                name,
                BadgeColors {
                    background: color.background,
                    foreground: color.foreground,
                },
            ))
        })
        .collect();

    encode(&colors, "category colors")
}
