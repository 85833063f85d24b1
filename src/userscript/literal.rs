//! Script-safe literal encoding.
//!
//! Values are encoded as JSON, which is a subset of JavaScript expression
//! syntax, and then a few characters that are legal in JSON strings but
//! dangerous in an inline script are replaced by their `\uXXXX` escapes:
//!
//! - `<` and `>` so user text cannot form `</script>` or `<!--`
//! - U+2028 and U+2029, which older engines treat as line terminators
//!
//! The decoded value always equals the input. Backslashes, quotes,
//! backticks and `${` need no special treatment because the result is a
//! double-quoted string, never a template literal.

use super::template::TemplateError;
use serde::Serialize;

/// Encode any serializable value as a script literal.
pub fn encode<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String, TemplateError> {
    let json = serde_json::to_string(value).map_err(|e| TemplateError::Encoding {
        what: what.to_string(),
        message: e.to_string(),
    })?;
    Ok(harden(&json))
}

/// Encode a string as a double-quoted script literal.
pub fn string_literal(value: &str) -> String {
    // Serializing a str cannot fail.
    harden(&serde_json::Value::from(value).to_string())
}

/// Replace characters that are inert in JSON but not in an inline script.
fn harden(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}
