//! Configuration types and defaults for promptamp.

use crate::repository::validate_user;
use serde::{Deserialize, Serialize};

/// Default `@match` patterns: the supported chat sites.
pub fn default_match_patterns() -> Vec<String> {
    vec![
        "https://aistudio.google.com/*".to_string(),
        "https://*.gemini.google.com/app*".to_string(),
        "https://chat.openai.com/*".to_string(),
        "https://chatgpt.com/*".to_string(),
        "https://m365.cloud.microsoft/chat*".to_string(),
        "https://zebra-ai-web-prd.ait.microsoft.com/*".to_string(),
        "https://onesupport.crm.dynamics.com/*".to_string(),
    ]
}

pub fn default_script_name() -> String {
    "Prompt Amplifier Enhanced Prompts".to_string()
}

pub fn default_namespace() -> String {
    "http://tampermonkey.net/".to_string()
}

pub fn default_author() -> String {
    "Prompt Amplifier User".to_string()
}

pub fn default_description() -> String {
    "Enhanced prompt helper with UI, managed by Prompt Amplifier.".to_string()
}

pub fn default_edit_url() -> String {
    "extension://iikmkjmpaadaobahmlepeloendndfphd/options.html#nav=0e53e7d4-cc80-45d0-83b4-8036d8f440a3+editor"
        .to_string()
}

pub fn default_init_delay_ms() -> u64 {
    800
}

/// Default user identity: the login name, or `default`.
pub fn default_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .and_then(|u| sanitize_user(&u))
        .unwrap_or_else(|| "default".to_string())
}

/// Reduce a login name to a valid user identity, if anything usable remains.
pub(crate) fn sanitize_user(raw: &str) -> Option<String> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect();
    let user: String = kept
        .trim_start_matches(['.', '-'])
        .chars()
        .take(128)
        .collect();

    validate_user(&user).is_ok().then_some(user)
}

/// Userscript metadata and runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    /// `@name` of the generated script.
    pub name: String,

    /// `@namespace` of the generated script.
    pub namespace: String,

    /// `@author` of the generated script.
    pub author: String,

    /// Leading text of `@description`; the last-updated timestamp is appended.
    pub description: String,

    /// Deep link copied by the panel's edit button.
    pub edit_url: String,

    /// `@match` URL patterns.
    pub match_patterns: Vec<String>,

    /// Delay before the panel is built once the runtime initializes.
    pub init_delay_ms: u64,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            name: default_script_name(),
            namespace: default_namespace(),
            author: default_author(),
            description: default_description(),
            edit_url: default_edit_url(),
            match_patterns: default_match_patterns(),
            init_delay_ms: default_init_delay_ms(),
        }
    }
}
