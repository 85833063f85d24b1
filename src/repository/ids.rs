//! Prompt id and user identity rules.

use crate::error::{AmpError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Prefix of every generated prompt id.
pub const ID_PREFIX: &str = "prompt_";

/// Ids and user identities become path components; keep them to a safe alphabet.
static KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}$").expect("Invalid key regex"));

/// Generate a prompt id from a timestamp.
///
/// The id is `prompt_` followed by the base-36 nanosecond timestamp, so ids
/// from one clock are strictly increasing. `bump` is added to the timestamp
/// and lets the caller step past an id that already exists.
pub fn generate_id(now: DateTime<Utc>, bump: u64) -> String {
    let nanos = now
        .timestamp_nanos_opt()
        .map(|n| n.max(0) as u64)
        .unwrap_or_else(|| now.timestamp_millis().max(0) as u64 * 1_000_000);

    format!("{}{}", ID_PREFIX, to_base36(nanos.saturating_add(bump)))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Validate a prompt id before it is used to build a document path.
pub fn validate_id(id: &str) -> Result<&str> {
    check_key(id, "prompt id").map_err(AmpError::UserError)
}

/// Validate a user identity before it is used to build a directory path.
pub fn validate_user(user: &str) -> Result<&str> {
    check_key(user, "user").map_err(AmpError::UserError)
}

fn check_key<'a>(value: &'a str, what: &str) -> std::result::Result<&'a str, String> {
    if value.contains('/') || value.contains('\\') || value.contains("..") {
        return Err(format!(
            "invalid {} '{}': contains path traversal characters",
            what, value
        ));
    }

    if !KEY_REGEX.is_match(value) {
        return Err(format!(
            "invalid {} '{}': use letters, digits, '_', '-' or '.' (max 128 characters)",
            what, value
        ));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
    }

    #[test]
    fn generated_ids_are_prefixed_and_valid() {
        let id = generate_id(Utc::now(), 0);
        assert!(id.starts_with(ID_PREFIX));
        assert!(validate_id(&id).is_ok());
    }

    #[test]
    fn later_timestamps_give_different_ids() {
        let a = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 1).unwrap();
        assert_ne!(generate_id(a, 0), generate_id(b, 0));
    }

    #[test]
    fn bump_changes_id() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_ne!(generate_id(now, 0), generate_id(now, 1));
    }

    #[test]
    fn rejects_path_traversal() {
        assert!(validate_id("../etc").is_err());
        assert!(validate_id("a/b").is_err());
        assert!(validate_user("..").is_err());
        assert!(validate_user("a\\b").is_err());
    }

    #[test]
    fn rejects_empty_and_hidden_names() {
        assert!(validate_id("").is_err());
        assert!(validate_user(".hidden").is_err());
        assert!(validate_id("has space").is_err());
    }

    #[test]
    fn accepts_ordinary_keys() {
        assert!(validate_user("alice").is_ok());
        assert!(validate_user("bob.smith-2").is_ok());
        assert!(validate_id("prompt_lx2k9a").is_ok());
    }
}
