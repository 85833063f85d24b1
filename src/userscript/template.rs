//! Slot substitution for the bundled script fragments.
//!
//! The fragments are JavaScript and CSS, which are full of braces, so slots
//! use a marker that neither language produces on its own:
//!
//! - `@@name@@` - Substitutes the value of slot `name`
//! - `@@@@` - Renders as a literal `@@`
//!
//! Rendering is a single left-to-right pass. Substituted values are copied
//! to the output and never rescanned, so a value containing `@@x@@` is
//! emitted as-is. Undefined slots are an error rather than an empty string.

use std::collections::HashMap;
use std::fmt;

const MARKER: &str = "@@";

/// Error type for fragment rendering failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A slot was referenced but not provided.
    UndefinedVariable {
        /// The name of the undefined slot.
        name: String,
        /// Byte offset of the opening marker.
        position: usize,
    },
    /// An opening `@@` has no closing `@@`.
    UnmatchedDelimiter {
        /// Byte offset of the opening marker.
        position: usize,
    },
    /// A slot with a blank name (e.g., `@@ @@`).
    EmptyVariableName {
        /// Byte offset of the opening marker.
        position: usize,
    },
    /// A value could not be encoded as a script literal.
    Encoding {
        /// What was being encoded.
        what: String,
        /// The encoder's message.
        message: String,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedVariable { name, position } => {
                write!(
                    f,
                    "undefined slot '{}' at position {} in fragment",
                    name, position
                )
            }
            TemplateError::UnmatchedDelimiter { position } => {
                write!(f, "unterminated '@@' at position {} in fragment", position)
            }
            TemplateError::EmptyVariableName { position } => {
                write!(f, "empty slot name at position {} in fragment", position)
            }
            TemplateError::Encoding { what, message } => {
                write!(f, "failed to encode {}: {}", what, message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Render a fragment by filling its `@@name@@` slots.
///
/// ```no_run
/// use promptamp::userscript::template::{render_template, slots};
///
/// let vars = slots([("delay", "800")]);
/// let js = render_template("setTimeout(init, @@delay@@);", &vars).unwrap();
/// assert_eq!(js, "setTimeout(init, 800);");
/// ```
pub fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find(MARKER) {
        result.push_str(&rest[..start]);
        let position = offset + start;
        let after_open = &rest[start + MARKER.len()..];

        // @@@@ is an escaped literal marker
        if let Some(tail) = after_open.strip_prefix(MARKER) {
            result.push_str(MARKER);
            offset = position + 2 * MARKER.len();
            rest = tail;
            continue;
        }

        let Some(end) = after_open.find(MARKER) else {
            return Err(TemplateError::UnmatchedDelimiter { position });
        };

        let name = after_open[..end].trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyVariableName { position });
        }

        match variables.get(name) {
            Some(value) => result.push_str(value),
            None => {
                return Err(TemplateError::UndefinedVariable {
                    name: name.to_string(),
                    position,
                });
            }
        }

        let consumed = start + MARKER.len() + end + MARKER.len();
        offset += consumed;
        rest = &rest[consumed..];
    }

    result.push_str(rest);
    Ok(result)
}

/// Helper to create a slot map from a list of key-value pairs.
pub fn slots<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
