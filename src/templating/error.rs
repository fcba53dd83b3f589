//! Template error handling for brackt
//!
//! This module provides structured error types for template compilation and
//! rendering with location information and user-friendly formatting.

use thiserror::Error;

/// Errors raised while compiling or rendering a template.
///
/// Translation from bracket syntax never fails, so every variant here comes
/// from the compile or render stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The directive source is structurally invalid: unbalanced or nested
    /// blocks, unknown tags, or an expression that is not a dotted path.
    #[error("Template syntax error at line {}, column {}: {message}", location.line, location.column)]
    Syntax {
        message: String,
        location: Box<ErrorLocation>,
    },

    /// The template engine rejected the compiled output.
    #[error("Malformed template near `{fragment}`: {message}")]
    Malformed {
        fragment: String,
        message: String,
    },

    /// Rendering hit a condition it cannot recover from. Missing variables
    /// only end up here in strict mode.
    #[error("Template render error: {message}")]
    Render {
        variable: Option<String>,
        message: String,
        suggestions: Vec<String>,
    },
}

/// Location information for template syntax errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLocation {
    /// 1-based line number in the directive source
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
    /// The offending piece of source text
    pub fragment: String,
}

impl TemplateError {
    pub(crate) fn syntax(
        message: impl Into<String>,
        line: usize,
        column: usize,
        fragment: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            message: message.into(),
            location: Box::new(ErrorLocation {
                line,
                column,
                fragment: fragment.into(),
            }),
        }
    }

    /// The offending source fragment, when the error carries one.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            TemplateError::Syntax {
                location,
                ..
            } => Some(&location.fragment),
            TemplateError::Malformed {
                fragment,
                ..
            } => Some(fragment),
            TemplateError::Render {
                ..
            } => None,
        }
    }

    /// Generate user-friendly error message with context and suggestions
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::Syntax {
                message,
                location,
            } => format_syntax_error(message, location),
            TemplateError::Malformed {
                fragment,
                message,
            } => format_malformed_error(fragment, message),
            TemplateError::Render {
                variable,
                message,
                suggestions,
            } => format_render_error(variable.as_deref(), message, suggestions),
        }
    }
}

/// Format syntax error
fn format_syntax_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Syntax Error\n\n");
    msg.push_str(&format!("Error: {}\n", message));
    msg.push_str(&format!("Line: {}, column: {}\n\n", location.line, location.column));

    if !location.fragment.is_empty() {
        msg.push_str(&format!("  {}\n", location.fragment));
        msg.push_str("  ^\n\n");
    }

    msg.push_str("SUGGESTION: Check template syntax for unclosed or misplaced directives.\n");
    msg.push_str("Common issues:\n");
    msg.push_str("  - [#if ...] without a matching [#endif]\n");
    msg.push_str("  - [#if ...] blocks nested inside each other\n");
    msg.push_str("  - Bracketed text that is not a dotted variable path\n\n");

    msg
}

/// Format an error reported by the underlying template engine
fn format_malformed_error(fragment: &str, message: &str) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Malformed Template\n\n");
    msg.push_str(&format!("Error: {}\n", message));
    msg.push_str(&format!("Near: {}\n\n", fragment));
    msg.push_str("SUGGESTION: Look for stray '{#' comment markers in the template text.\n\n");

    msg
}

/// Format render error
fn format_render_error(variable: Option<&str>, message: &str, suggestions: &[String]) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Render Error\n\n");
    msg.push_str(&format!("Error: {}\n", message));
    if let Some(variable) = variable {
        msg.push_str(&format!("Variable: {}\n", variable));
    }
    msg.push('\n');

    if !suggestions.is_empty() {
        msg.push_str("Did you mean one of these?\n");
        for suggestion in suggestions {
            msg.push_str(&format!("  - {}\n", suggestion));
        }
        msg.push('\n');
    }

    msg
}
