//! Bracket syntax translation.
//!
//! Template authors write `[user.first_name]` and `[#if app.url]...[#endif]`
//! in the console editor. This module rewrites those directives into the
//! directive syntax understood by the compiler:
//!
//! | Bracket syntax   | Directive syntax   |
//! |------------------|--------------------|
//! | `[#if expr]`     | `{% if expr %}`    |
//! | `[#else]`        | `{% else %}`       |
//! | `[#endif]`       | `{% endif %}`      |
//! | `[expr]`         | `{{ expr }}`       |
//!
//! The rules run in the order above. Translation never fails: malformed
//! brackets produce malformed directives, which the compiler then rejects
//! with a positioned error.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::TemplateOptions;

static IF_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[#if\s+([^\[\]]+)\]").expect("valid if-directive pattern"));
static ELSE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[#else\s*\]").expect("valid else-directive pattern"));
static ENDIF_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[#endif\s*\]").expect("valid endif-directive pattern"));
static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]").expect("valid variable pattern"));

const PARAGRAPH_OPEN: &str = "<p>";
const PARAGRAPH_CLOSE: &str = "</p>";

/// Translate bracket syntax into directive syntax with default options.
///
/// # Examples
///
/// ```
/// use brackt::templating::translate;
///
/// assert_eq!(translate("Hi [user.first_name]"), "<p>Hi {{ user.first_name }}</p>");
/// ```
pub fn translate(source: &str) -> String {
    translate_with(source, &TemplateOptions::default())
}

/// Translate bracket syntax into directive syntax.
///
/// Only `options.wrap_paragraph` is consulted here.
pub fn translate_with(source: &str, options: &TemplateOptions) -> String {
    let translated = IF_DIRECTIVE.replace_all(source, |caps: &Captures<'_>| {
        format!("{{% if {} %}}", caps[1].trim())
    });
    let translated = ELSE_DIRECTIVE.replace_all(&translated, "{% else %}");
    let translated = ENDIF_DIRECTIVE.replace_all(&translated, "{% endif %}");
    let translated = VARIABLE.replace_all(&translated, |caps: &Captures<'_>| {
        format!("{{{{ {} }}}}", caps[1].trim())
    });

    tracing::trace!("Translated {} bytes of bracket syntax", source.len());

    if options.wrap_paragraph {
        wrap_paragraph(&translated)
    } else {
        translated.into_owned()
    }
}

/// Whether the text already starts with a paragraph tag.
pub fn is_paragraph_wrapped(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with(PARAGRAPH_OPEN) || trimmed.starts_with("<p ")
}

/// Wrap the text in a single paragraph unless it already starts with one.
pub fn wrap_paragraph(text: &str) -> String {
    if is_paragraph_wrapped(text) {
        text.to_string()
    } else {
        format!("{PARAGRAPH_OPEN}{text}{PARAGRAPH_CLOSE}")
    }
}
