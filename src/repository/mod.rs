//! File-backed prompt repository.
//!
//! Each user owns a directory of prompt documents:
//!
//! ```text
//! .promptamp/users/<user>/prompts/<id>.md
//! ```
//!
//! Writes replace whole documents atomically, and the last write wins. The
//! repository is the only component that creates ids or mutates prompts;
//! everything downstream (listing, script generation) works on snapshots.

mod ids;

pub use ids::validate_user;

use ids::{generate_id, validate_id};

use crate::context::LibraryContext;
use crate::error::{AmpError, Result};
use crate::prompt::{Prompt, PromptDocument, PromptDraft, PromptType};
use chrono::Utc;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Maximum attempts to step past an existing id when creating a prompt.
const MAX_ID_ATTEMPTS: u64 = 1024;

/// Prompt CRUD keyed by user identity.
#[derive(Debug, Clone, Copy)]
pub struct PromptRepository<'a> {
    ctx: &'a LibraryContext,
}

impl<'a> PromptRepository<'a> {
    pub fn new(ctx: &'a LibraryContext) -> Self {
        Self { ctx }
    }

    /// All of a user's prompts, sorted by title and then id.
    ///
    /// Documents that cannot be parsed are skipped with a warning so one bad
    /// file does not hide the rest of the library.
    pub fn list(&self, user: &str) -> Result<Vec<Prompt>> {
        let user = validate_user(user)?;
        let dir = self.ctx.prompts_dir(user);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|e| {
            AmpError::StorageError(format!(
                "failed to read prompt directory '{}': {}",
                dir.display(),
                e
            ))
        })?;

        let mut prompts = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                AmpError::StorageError(format!("failed to read directory entry: {}", e))
            })?;
            let path = entry.path();

            let Some(id) = document_id(&path) else {
                continue;
            };

            match PromptDocument::load(&path) {
                Ok(doc) => {
                    let mut prompt = doc.to_prompt();
                    if prompt.id != id {
                        tracing::warn!(
                            path = %path.display(),
                            frontmatter_id = %prompt.id,
                            "prompt id does not match file name; using file name"
                        );
                        prompt.id = id.to_string();
                    }
                    prompts.push(prompt);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable prompt");
                }
            }
        }

        prompts.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        tracing::debug!(user, count = prompts.len(), "listed prompts");
        Ok(prompts)
    }

    /// A user's prompts of one type, in list order.
    pub fn list_by_type(&self, user: &str, prompt_type: PromptType) -> Result<Vec<Prompt>> {
        Ok(self
            .list(user)?
            .into_iter()
            .filter(|p| p.prompt_type == prompt_type)
            .collect())
    }

    /// Load one prompt.
    pub fn get(&self, user: &str, id: &str) -> Result<Prompt> {
        Ok(self.load_document(user, id)?.to_prompt())
    }

    /// Create a prompt from a draft and assign it a fresh id.
    pub fn add(&self, user: &str, draft: PromptDraft) -> Result<Prompt> {
        let user = validate_user(user)?;
        let valid = draft.validate()?;
        let now = Utc::now();

        let id = (0..MAX_ID_ATTEMPTS)
            .map(|bump| generate_id(now, bump))
            .find(|candidate| !self.ctx.prompt_path(user, candidate).exists())
            .ok_or_else(|| {
                AmpError::StorageError("could not allocate a unique prompt id".to_string())
            })?;

        let prompt = Prompt {
            id,
            prompt_type: valid.prompt_type,
            title: valid.title,
            content: valid.content,
            category: valid.category,
            copy_count: None,
        };

        PromptDocument::from_prompt(&prompt, now).save(self.ctx.prompt_path(user, &prompt.id))?;
        tracing::info!(user, id = %prompt.id, prompt_type = %prompt.prompt_type, "prompt added");
        Ok(prompt)
    }

    /// Replace a prompt's editable fields.
    ///
    /// The id, copy count, creation time and unknown frontmatter fields are kept.
    pub fn update(&self, user: &str, id: &str, draft: PromptDraft) -> Result<Prompt> {
        let mut doc = self.load_document(user, id)?;
        let valid = draft.validate()?;

        let fm = &mut doc.frontmatter;
        fm.prompt_type = valid.prompt_type;
        fm.title = valid.title;
        fm.category = valid.category;
        fm.updated = Some(Utc::now());
        doc.body = valid.content;

        doc.save(self.ctx.prompt_path(user, id))?;
        tracing::info!(user, id, "prompt updated");
        Ok(doc.to_prompt())
    }

    /// Delete a prompt, returning the removed record.
    pub fn delete(&self, user: &str, id: &str) -> Result<Prompt> {
        let prompt = self.get(user, id)?;
        let path = self.ctx.prompt_path(user, id);

        fs::remove_file(&path).map_err(|e| {
            AmpError::StorageError(format!(
                "failed to delete prompt document '{}': {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(user, id, "prompt deleted");
        Ok(prompt)
    }

    /// Increment a prompt's copy count and return the updated record.
    pub fn record_copy(&self, user: &str, id: &str) -> Result<Prompt> {
        let mut doc = self.load_document(user, id)?;
        let count = doc.frontmatter.copy_count.unwrap_or(0).saturating_add(1);
        doc.frontmatter.copy_count = Some(count);

        doc.save(self.ctx.prompt_path(user, id))?;
        tracing::debug!(user, id, count, "copy recorded");
        Ok(doc.to_prompt())
    }

    /// Distinct non-empty categories in use, sorted.
    pub fn categories(&self, user: &str) -> Result<Vec<String>> {
        let set: BTreeSet<String> = self
            .list(user)?
            .into_iter()
            .filter_map(|p| p.category)
            .filter(|c| !c.trim().is_empty())
            .collect();
        Ok(set.into_iter().collect())
    }

    fn load_document(&self, user: &str, id: &str) -> Result<PromptDocument> {
        let user = validate_user(user)?;
        let id = validate_id(id)?;
        let path = self.ctx.prompt_path(user, id);

        if !path.exists() {
            return Err(AmpError::NotFound(format!(
                "prompt '{}' not found for user '{}'.\n\n\
                 Use `promptamp list` to see available prompts.",
                id, user
            )));
        }

        PromptDocument::load(&path)
    }
}

/// The id encoded in a prompt document's file name, if it is one.
fn document_id(path: &Path) -> Option<&str> {
    if path.extension().and_then(|e| e.to_str()) != Some("md") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    validate_id(stem).ok()
}
