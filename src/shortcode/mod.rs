//! Shortcode insertion for JWT claim templates.
//!
//! The claims editor offers a list of shortcodes (`user.id`, `app.name`, ...).
//! Picking one splices a `"name": "{{name}}"` entry into the claims buffer,
//! which is expected to hold a JSON object literal.
//!
//! The splice is textual, not a JSON rewrite: formatting and comments in the
//! buffer are left exactly as the author wrote them, and the result is only
//! as valid as the buffer it started from.

pub mod vocabulary;

use thiserror::Error;

pub use vocabulary::{SHORTCODES, Shortcode, ShortcodeCategory};

#[derive(Debug, Error)]
enum ShortcodeError {
    #[error("claims buffer has no content to splice into")]
    EmptyBuffer,

    #[error("failed to encode claim entry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Insert a `"name": "{{name}}"` entry into a claims buffer.
///
/// Never fails. A missing closing brace is supplied by the splice; only a
/// buffer with nothing to splice into is replaced by a single-entry object.
///
/// # Examples
///
/// ```
/// use brackt::shortcode::insert_shortcode;
///
/// assert_eq!(insert_shortcode("{}", "user.id"), r#"{ "user.id": "{{user.id}}" }"#);
/// assert_eq!(
///     insert_shortcode(r#"{ "a": "{{a}}" }"#, "user.id"),
///     r#"{ "a": "{{a}}", "user.id": "{{user.id}}" }"#
/// );
/// ```
pub fn insert_shortcode(current_text: &str, name: &str) -> String {
    match try_insert(current_text, name) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Replacing claims buffer while inserting '{}': {}", name, e);
            minimal_object(name)
        }
    }
}

fn try_insert(current_text: &str, name: &str) -> Result<String, ShortcodeError> {
    let trimmed = current_text.trim();
    let entry = claim_entry(name)?;

    if is_empty_object(trimmed) {
        return Ok(format!("{{ {} }}", entry));
    }

    // A missing closing brace is tolerated; the splice closes the object.
    let body = trimmed.strip_suffix('}').unwrap_or(trimmed).trim_end();
    match body.chars().last() {
        None => Err(ShortcodeError::EmptyBuffer),
        Some(',') | Some('{') => Ok(format!("{} {} }}", body, entry)),
        Some(_) => Ok(format!("{}, {} }}", body, entry)),
    }
}

/// `{}` with nothing but whitespace between the braces.
fn is_empty_object(trimmed: &str) -> bool {
    trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .is_some_and(|inner| inner.trim().is_empty())
}

/// `"name": "{{name}}"`, JSON-encoded.
fn claim_entry(name: &str) -> Result<String, ShortcodeError> {
    let key = serde_json::to_string(name)?;
    let value = serde_json::to_string(&format!("{{{{{}}}}}", name))?;
    Ok(format!("{}: {}", key, value))
}

fn minimal_object(name: &str) -> String {
    match claim_entry(name) {
        Ok(entry) => format!("{{ {} }}", entry),
        Err(_) => format!("{{ \"{0}\": \"{{{{{0}}}}}\" }}", name),
    }
}
