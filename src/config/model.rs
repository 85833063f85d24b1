//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a prompt library.
///
/// This struct represents the contents of `.promptamp/config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// User identity whose prompts commands operate on when `--user` is absent.
    #[serde(default = "default_user")]
    pub user: String,

    /// Settings for the generated userscript.
    pub script: ScriptSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: default_user(),
            script: ScriptSettings::default(),
        }
    }
}
