//! Prompt records and their on-disk document form.
//!
//! A [`Prompt`] is the unit of content in a user's library. Three kinds exist
//! (see [`PromptType`]); quick actions are short canned instructions that
//! never carry a category.
//!
//! Edits go through [`PromptDraft::validate`], which is the only place the
//! "non-empty title and content" and "no category on quick actions" rules are
//! enforced. Readers such as the script generator accept whatever snapshot
//! they are handed and fill missing optional fields with defaults.

mod color;
mod document;
#[cfg(test)]
mod tests;

pub use color::{PALETTE_VERSION, category_color};
pub use document::PromptDocument;

use crate::error::{AmpError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conventional maximum title length (in characters) for quick-action buttons.
pub const QUICK_ACTION_TITLE_HINT: usize = 4;

/// The closed set of prompt kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PromptType {
    #[serde(rename = "SYSTEM_PROMPT")]
    SystemPrompt,
    #[serde(rename = "APP_STARTER_PROMPT")]
    AppStarterPrompt,
    #[serde(rename = "QUICK_ACTION")]
    QuickAction,
}

impl PromptType {
    /// All prompt types in display order.
    pub const ALL: [PromptType; 3] = [
        PromptType::SystemPrompt,
        PromptType::AppStarterPrompt,
        PromptType::QuickAction,
    ];

    /// Wire spelling used in documents and generated scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptType::SystemPrompt => "SYSTEM_PROMPT",
            PromptType::AppStarterPrompt => "APP_STARTER_PROMPT",
            PromptType::QuickAction => "QUICK_ACTION",
        }
    }

    /// Human-readable section heading.
    pub fn display_name(&self) -> &'static str {
        match self {
            PromptType::SystemPrompt => "System Prompts",
            PromptType::AppStarterPrompt => "App Starter Prompts",
            PromptType::QuickAction => "Quick Actions",
        }
    }

    /// Parse a prompt type from its wire spelling or a short alias.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "system_prompt" | "system" | "s" => Some(Self::SystemPrompt),
            "app_starter_prompt" | "app_starter" | "app" | "a" => Some(Self::AppStarterPrompt),
            "quick_action" | "quick" | "q" => Some(Self::QuickAction),
            _ => None,
        }
    }

    /// Whether prompts of this type may carry a category.
    pub fn allows_category(&self) -> bool {
        !matches!(self, PromptType::QuickAction)
    }
}

impl fmt::Display for PromptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored prompt.
///
/// Optional fields default when absent so partial records (older documents,
/// hand-edited JSON) still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,

    #[serde(rename = "type")]
    pub prompt_type: PromptType,

    pub title: String,

    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_count: Option<u64>,
}

impl Prompt {
    /// Category with the empty-string default applied.
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Copy count with the zero default applied.
    pub fn copy_count_or_default(&self) -> u64 {
        self.copy_count.unwrap_or(0)
    }
}

/// User-supplied fields for creating or replacing a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptDraft {
    pub prompt_type: Option<PromptType>,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub prompt_type: PromptType,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

impl PromptDraft {
    /// Check the edit-boundary invariants and normalize the draft.
    ///
    /// - `title` and `content` must be non-empty after trimming. The title is
    ///   stored trimmed; content is stored verbatim.
    /// - A blank category is stored as absent.
    /// - Quick actions never keep a category.
    pub fn validate(self) -> Result<ValidDraft> {
        let prompt_type = self.prompt_type.ok_or_else(|| {
            AmpError::ValidationError("prompt type is required".to_string())
        })?;

        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AmpError::ValidationError(
                "title must not be empty".to_string(),
            ));
        }

        if self.content.trim().is_empty() {
            return Err(AmpError::ValidationError(
                "content must not be empty".to_string(),
            ));
        }

        if prompt_type == PromptType::QuickAction
            && title.chars().count() > QUICK_ACTION_TITLE_HINT
        {
            tracing::warn!(
                title = %title,
                "quick action titles are shown as buttons; keep them to {} characters",
                QUICK_ACTION_TITLE_HINT
            );
        }

        let category = if prompt_type.allows_category() {
            self.category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
        } else {
            None
        };

        Ok(ValidDraft {
            prompt_type,
            title,
            content: self.content,
            category,
        })
    }
}

/// Filter prompts to one type, preserving input order.
pub fn of_type(prompts: &[Prompt], prompt_type: PromptType) -> Vec<&Prompt> {
    prompts
        .iter()
        .filter(|p| p.prompt_type == prompt_type)
        .collect()
}
