//! Prompt document format.
//!
//! Each prompt is stored as YAML frontmatter followed by the prompt content:
//!
//! ```text
//! ---
//! id: prompt_lx2k9a0001
//! type: SYSTEM_PROMPT
//! title: Reviewer
//! category: Code
//! copy_count: 3
//! ---
//! You are a meticulous code reviewer.
//! ```
//!
//! The content after the closing delimiter is kept byte-for-byte, including
//! its line endings. Frontmatter fields this version does not know about are
//! preserved on save.

use super::{Prompt, PromptType};
use crate::error::{AmpError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Typed frontmatter of a prompt document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptFrontmatter {
    pub id: String,

    #[serde(rename = "type")]
    pub prompt_type: PromptType,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// Unknown fields, kept for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A parsed prompt document.
#[derive(Debug, Clone)]
pub struct PromptDocument {
    pub frontmatter: PromptFrontmatter,
    /// Prompt content, exactly as stored.
    pub body: String,
}

impl PromptDocument {
    /// Build a fresh document for a new prompt.
    pub fn from_prompt(prompt: &Prompt, now: DateTime<Utc>) -> Self {
        Self {
            frontmatter: PromptFrontmatter {
                id: prompt.id.clone(),
                prompt_type: prompt.prompt_type,
                title: prompt.title.clone(),
                category: prompt.category.clone(),
                copy_count: prompt.copy_count,
                created: Some(now),
                updated: Some(now),
                extra: BTreeMap::new(),
            },
            body: prompt.content.clone(),
        }
    }

    /// The prompt record this document stores.
    pub fn to_prompt(&self) -> Prompt {
        let fm = &self.frontmatter;
        Prompt {
            id: fm.id.clone(),
            prompt_type: fm.prompt_type,
            title: fm.title.clone(),
            content: self.body.clone(),
            category: fm.category.clone().filter(|c| !c.is_empty()),
            copy_count: fm.copy_count,
        }
    }

    /// Parse a document from its text.
    pub fn parse(content: &str) -> Result<Self> {
        let (yaml, body_start) = split_frontmatter(content)?;

        let frontmatter: PromptFrontmatter = serde_yaml::from_str(yaml).map_err(|e| {
            AmpError::StorageError(format!("failed to parse prompt frontmatter: {}", e))
        })?;

        Ok(Self {
            frontmatter,
            body: content[body_start..].to_string(),
        })
    }

    /// Serialize the document to text.
    pub fn render(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(&self.frontmatter).map_err(|e| {
            AmpError::StorageError(format!("failed to serialize prompt frontmatter: {}", e))
        })?;

        let mut output = String::with_capacity(yaml.len() + self.body.len() + 8);
        output.push_str("---\n");
        output.push_str(&yaml);
        if !yaml.ends_with('\n') {
            output.push('\n');
        }
        output.push_str("---\n");
        output.push_str(&self.body);
        Ok(output)
    }

    /// Load a document from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AmpError::StorageError(format!(
                "failed to read prompt document '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content).map_err(|e| match e {
            AmpError::StorageError(msg) => {
                AmpError::StorageError(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Atomically save the document.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = self.render()?;
        crate::fs::atomic_write_file(path, &text)
    }
}

/// Locate the frontmatter and the byte offset where the body begins.
///
/// Delimiter lines may end in LF or CRLF. The body starts right after the
/// closing delimiter's line break.
fn split_frontmatter(content: &str) -> Result<(&str, usize)> {
    let first_break = match content.find('\n') {
        Some(pos) if content[..pos].trim_end_matches('\r') == "---" => pos,
        _ => {
            return Err(AmpError::StorageError(
                "prompt document must start with a '---' line".to_string(),
            ));
        }
    };

    let yaml_start = first_break + 1;
    let mut line_start = yaml_start;

    while line_start <= content.len() {
        let line_end = content[line_start..]
            .find('\n')
            .map(|p| line_start + p)
            .unwrap_or(content.len());

        let line = content[line_start..line_end].trim_end_matches('\r');
        if line == "---" {
            let body_start = if line_end < content.len() {
                line_end + 1
            } else {
                line_end
            };
            return Ok((&content[yaml_start..line_start], body_start));
        }

        if line_end == content.len() {
            break;
        }
        line_start = line_end + 1;
    }

    Err(AmpError::StorageError(
        "prompt document is missing its closing '---' line".to_string(),
    ))
}
