//! Implementation of the `promptamp history` command.

use super::open_session;
use crate::cli::HistoryArgs;
use crate::error::Result;
use crate::events::{Event, read_events};
use std::path::Path;

/// Execute the `promptamp history` command.
///
/// Shows the most recent audit-log entries for the acting user, oldest first.
pub fn cmd_history(library: Option<&Path>, args: HistoryArgs) -> Result<()> {
    let session = open_session(library, &args.user)?;

    let events: Vec<Event> = read_events(&session.ctx)?
        .into_iter()
        .filter(|e| args.all_users || e.user == session.user)
        .collect();

    if events.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    let skip = events.len().saturating_sub(args.limit);
    for event in &events[skip..] {
        println!("{}", format_event(event, args.all_users));
    }

    Ok(())
}

fn format_event(event: &Event, show_user: bool) -> String {
    let mut line = format!(
        "{}  {:<8}",
        event.ts.format("%Y-%m-%d %H:%M:%S"),
        event.action.to_string()
    );
    if show_user {
        line.push_str(&format!(" {:<12}", event.user));
    }
    if let Some(prompt) = &event.prompt {
        line.push_str(&format!(" {}", prompt));
    }
    if let Some(title) = event.details.get("title").and_then(|t| t.as_str()) {
        line.push_str(&format!(" \"{}\"", title));
    }
    line.trim_end().to_string()
}
