//! Append-only audit log of library changes.
//!
//! Events are stored in NDJSON format (one JSON object per line) in
//! `.promptamp/events/events.ndjson`.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: init, add, update, delete, copy, generate
//! - `actor`: `user@HOST` of the process that made the change
//! - `user`: library user identity the change applies to
//! - `prompt`: optional prompt id
//! - `details`: freeform object with action-specific details
//!
//! ```no_run
//! use promptamp::context::LibraryContext;
//! use promptamp::events::{Event, EventAction, append_event};
//! use serde_json::json;
//!
//! let ctx = LibraryContext::resolve(None)?;
//! let event = Event::new(EventAction::Generate, "alice")
//!     .with_details(json!({"prompts": 12}));
//! append_event(&ctx, &event)?;
//! # Ok::<(), promptamp::error::AmpError>(())
//! ```

use crate::context::LibraryContext;
use crate::error::{AmpError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Library initialized
    Init,
    /// Prompt created
    Add,
    /// Prompt replaced by an edit
    Update,
    /// Prompt deleted
    Delete,
    /// Prompt content copied (copy count incremented)
    Copy,
    /// Userscript generated
    Generate,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventAction::Init => "init",
            EventAction::Add => "add",
            EventAction::Update => "update",
            EventAction::Delete => "delete",
            EventAction::Copy => "copy",
            EventAction::Generate => "generate",
        };
        f.write_str(name)
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,

    pub action: EventAction,

    /// Who ran the command (`user@HOST`).
    pub actor: String,

    /// Library user identity the change applies to.
    pub user: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    pub details: Value,
}

impl Event {
    /// Create a new event for `user`, stamped with the current time.
    pub fn new(action: EventAction, user: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            user: user.into(),
            prompt: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the prompt id for this event.
    pub fn with_prompt(mut self, prompt_id: impl Into<String>) -> Self {
        self.prompt = Some(prompt_id.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            AmpError::StorageError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the library's audit log, creating it if needed.
pub fn append_event(ctx: &LibraryContext, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    let events_dir = ctx.events_dir();
    fs::create_dir_all(&events_dir).map_err(|e| {
        AmpError::StorageError(format!(
            "failed to create events directory '{}': {}",
            events_dir.display(),
            e
        ))
    })?;

    let events_file = ctx.events_file();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            AmpError::StorageError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        AmpError::StorageError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    tracing::trace!(action = %event.action, user = %event.user, "event appended");
    Ok(())
}

/// Read every event in the log. Lines that fail to parse are skipped.
pub fn read_events(ctx: &LibraryContext) -> Result<Vec<Event>> {
    let events_file = ctx.events_file();
    if !events_file.exists() {
        return Ok(Vec::new());
    }

    let file = fs::File::open(&events_file).map_err(|e| {
        AmpError::StorageError(format!(
            "failed to open events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    let mut events = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| {
            AmpError::StorageError(format!("failed to read events file: {}", e))
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Event>(&line) {
            Ok(event) => events.push(event),
            Err(e) => tracing::warn!(error = %e, "skipping malformed event line"),
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_library;
    use serde_json::json;

    #[test]
    fn event_display_names() {
        assert_eq!(EventAction::Init.to_string(), "init");
        assert_eq!(EventAction::Generate.to_string(), "generate");
    }

    #[test]
    fn event_serializes_to_single_line() {
        let event = Event::new(EventAction::Add, "alice")
            .with_prompt("prompt_1")
            .with_details(json!({"title": "Line\nbreak"}));

        let line = event.to_ndjson_line().unwrap();
        assert!(!line.contains('\n'));

        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["action"], "add");
        assert_eq!(value["user"], "alice");
        assert_eq!(value["prompt"], "prompt_1");
        assert_eq!(value["details"]["title"], "Line\nbreak");
    }

    #[test]
    fn prompt_field_omitted_when_absent() {
        let line = Event::new(EventAction::Generate, "alice")
            .to_ndjson_line()
            .unwrap();
        assert!(!line.contains("\"prompt\""));
    }

    #[test]
    fn append_and_read_back() {
        let (_temp, ctx) = create_test_library();

        append_event(&ctx, &Event::new(EventAction::Init, "tester")).unwrap();
        append_event(
            &ctx,
            &Event::new(EventAction::Copy, "tester").with_prompt("prompt_9"),
        )
        .unwrap();

        let events = read_events(&ctx).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, EventAction::Init);
        assert_eq!(events[1].prompt.as_deref(), Some("prompt_9"));
    }

    #[test]
    fn read_skips_malformed_lines() {
        let (_temp, ctx) = create_test_library();
        append_event(&ctx, &Event::new(EventAction::Delete, "tester")).unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(ctx.events_file())
            .unwrap();
        writeln!(file, "not json").unwrap();

        let events = read_events(&ctx).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn read_without_log_is_empty() {
        let (_temp, ctx) = create_test_library();
        assert!(read_events(&ctx).unwrap().is_empty());
    }
}
