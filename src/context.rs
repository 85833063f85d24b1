//! Library location resolution for promptamp.
//!
//! Every command works against one library directory (`.promptamp/`). The
//! library is found, in order, from:
//!
//! 1. the `--library` flag,
//! 2. the `PROMPTAMP_HOME` environment variable,
//! 3. the nearest ancestor of the working directory that contains `.promptamp/`.
//!
//! `init` creates the directory in the working directory when none is found.

use crate::error::{AmpError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Library directory name created by `init`.
pub const LIBRARY_DIR_NAME: &str = ".promptamp";

/// Environment variable naming an explicit library directory.
pub const LIBRARY_ENV_VAR: &str = "PROMPTAMP_HOME";

/// Resolved paths of a prompt library. All paths are absolute.
#[derive(Debug, Clone)]
pub struct LibraryContext {
    /// The library directory itself.
    pub root: PathBuf,
}

impl LibraryContext {
    /// Wrap a known library directory.
    pub fn at<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            current_dir()?.join(root)
        };
        Ok(Self { root })
    }

    /// Resolve the library for a command.
    ///
    /// Returns the location where the library is or would be created; use
    /// [`LibraryContext::ensure_initialized`] before reading from it.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::at(path);
        }

        if let Some(home) = env::var_os(LIBRARY_ENV_VAR).filter(|v| !v.is_empty()) {
            return Self::at(PathBuf::from(home));
        }

        let cwd = current_dir()?;
        Ok(Self::discover_from(&cwd).unwrap_or_else(|| Self {
            root: cwd.join(LIBRARY_DIR_NAME),
        }))
    }

    /// Find the nearest `.promptamp/` at or above `start`.
    pub fn discover_from(start: &Path) -> Option<Self> {
        start
            .ancestors()
            .map(|dir| dir.join(LIBRARY_DIR_NAME))
            .find(|candidate| candidate.is_dir())
            .map(|root| Self { root })
    }

    /// Whether the library directory exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Fail with guidance when the library has not been initialized.
    pub fn ensure_initialized(&self) -> Result<()> {
        if !self.exists() {
            return Err(AmpError::UserError(format!(
                "prompt library not initialized.\n\
                 Expected library at: {}\n\n\
                 Run `promptamp init` to create one, or set {} to an existing library.",
                self.root.display(),
                LIBRARY_ENV_VAR
            )));
        }
        Ok(())
    }

    /// Path to `config.yaml`.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    /// Directory holding one sub-directory per user.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Directory holding a user's prompt documents.
    pub fn prompts_dir(&self, user: &str) -> PathBuf {
        self.users_dir().join(user).join("prompts")
    }

    /// Path of one prompt document.
    pub fn prompt_path(&self, user: &str, id: &str) -> PathBuf {
        self.prompts_dir(user).join(format!("{}.md", id))
    }

    /// Directory of the audit log.
    pub fn events_dir(&self) -> PathBuf {
        self.root.join("events")
    }

    /// The NDJSON audit log.
    pub fn events_file(&self) -> PathBuf {
        self.events_dir().join("events.ndjson")
    }
}

fn current_dir() -> Result<PathBuf> {
    env::current_dir().map_err(|e| {
        AmpError::UserError(format!("failed to get current working directory: {}", e))
    })
}

/// Resolve the library and require that it exists.
pub fn require_library(explicit: Option<&Path>) -> Result<LibraryContext> {
    let ctx = LibraryContext::resolve(explicit)?;
    ctx.ensure_initialized()?;
    Ok(ctx)
}
