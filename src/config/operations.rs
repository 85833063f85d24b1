//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{AmpError, Result};
use crate::repository::validate_user;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            AmpError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config if the file exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file deserializes to `null`, which serde rejects for a struct.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| AmpError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AmpError::UserError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `user` must be a valid user identity
    /// - `script.name` and `script.edit_url` must be non-empty
    /// - `script.match_patterns` must be non-empty, with no blank entries
    /// - no script value may contain a line break (it would split the header)
    pub fn validate(&self) -> Result<()> {
        validate_user(&self.user).map_err(|e| {
            AmpError::UserError(format!("config validation failed: {}", e))
        })?;

        let script = &self.script;

        if script.name.trim().is_empty() {
            return Err(AmpError::UserError(
                "config validation failed: script.name must not be empty".to_string(),
            ));
        }

        if script.edit_url.trim().is_empty() {
            return Err(AmpError::UserError(
                "config validation failed: script.edit_url must not be empty".to_string(),
            ));
        }

        if script.match_patterns.is_empty() {
            return Err(AmpError::UserError(
                "config validation failed: script.match_patterns must list at least one pattern"
                    .to_string(),
            ));
        }

        if script.match_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(AmpError::UserError(
                "config validation failed: script.match_patterns entries must be non-empty"
                    .to_string(),
            ));
        }

        let header_values = [
            ("script.name", &script.name),
            ("script.namespace", &script.namespace),
            ("script.author", &script.author),
            ("script.description", &script.description),
        ];
        let patterns = script
            .match_patterns
            .iter()
            .map(|p| ("script.match_patterns", p));

        for (field, value) in header_values.into_iter().chain(patterns) {
            if value.contains(['\n', '\r']) {
                return Err(AmpError::UserError(format!(
                    "config validation failed: {} must be a single line",
                    field
                )));
            }
        }

        Ok(())
    }
}
