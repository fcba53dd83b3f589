//! Error handling for brackt
//!
//! This module provides the command-level error type and user-friendly error
//! reporting for the `brackt` CLI. The library's template pipeline reports
//! its own typed errors ([`TemplateError`](crate::templating::TemplateError),
//! [`ContextError`](crate::templating::ContextError)); this module wraps file
//! and configuration failures around them.
//!
//! # Architecture
//!
//! - [`BracktError`] - Enumerated error types for CLI failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Use [`user_friendly_error`] to convert any error into a user-friendly format with
//! contextual suggestions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use brackt::core::{BracktError, ErrorContext};
//!
//! let error = BracktError::ConfigNotFound {
//!     path: "brackt.toml".to_string(),
//! };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Check the --config path")
//!     .with_details("brackt reads TOML configuration from ~/.brackt/config.toml by default");
//!
//! // Display with colors in terminal
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::templating::{ContextError, TemplateError};

/// The main error type for brackt commands
#[derive(Error, Debug)]
pub enum BracktError {
    /// A template could not be compiled or rendered
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The variable context file is not usable
    #[error("Invalid template context in {source_name}: {reason}")]
    InvalidContext {
        source_name: String,
        reason: String,
    },

    /// A `--var` assignment is not of the form `path=value`
    #[error("Invalid variable assignment '{assignment}': expected PATH=VALUE")]
    InvalidAssignment {
        assignment: String,
    },

    /// An explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        path: String,
    },

    /// Configuration file exists but cannot be parsed
    #[error("Invalid configuration in {path}: {reason}")]
    ConfigError {
        path: String,
        reason: String,
    },

    #[error("{message}")]
    Other {
        message: String,
    },
}

impl From<ContextError> for BracktError {
    fn from(error: ContextError) -> Self {
        BracktError::InvalidContext {
            source_name: "context".to_string(),
            reason: error.to_string(),
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    pub error: BracktError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: BracktError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly format with contextual suggestions
///
/// Walks the error chain looking for a [`TemplateError`] or [`BracktError`]
/// and falls back to a generic context carrying the top-level message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut current_error: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(template_error) = current_error.downcast_ref::<TemplateError>() {
            return template_error_context(template_error);
        }

        if let Some(brackt_error) = current_error.downcast_ref::<BracktError>() {
            if let BracktError::Template(template_error) = brackt_error {
                return template_error_context(template_error);
            }
            return create_error_context(brackt_error);
        }

        if let Some(io_error) = current_error.downcast_ref::<std::io::Error>() {
            return ErrorContext::new(BracktError::Other {
                message: error.to_string(),
            })
            .with_suggestion("Check that the path exists and you have the necessary permissions")
            .with_details(format!("IO error: {}", io_error));
        }

        match current_error.source() {
            Some(source) => current_error = source,
            None => break,
        }
    }

    ErrorContext::new(BracktError::Other {
        message: format!("{:#}", error),
    })
}

fn template_error_context(template_error: &TemplateError) -> ErrorContext {
    let suggestion = match template_error {
        TemplateError::Syntax {
            ..
        } => "Check that every [#if] has a matching [#endif] and that bracketed text is a dotted variable path",
        TemplateError::Malformed {
            ..
        } => "Remove or close stray '{#' markers in the template text",
        TemplateError::Render {
            ..
        } => "Provide the missing variables with --context or --var, or render without --strict",
    };

    ErrorContext::new(BracktError::Template(template_error.clone()))
        .with_suggestion(suggestion)
        .with_details(template_error.format_with_context())
}

fn create_error_context(error: &BracktError) -> ErrorContext {
    match error {
        BracktError::InvalidContext {
            source_name,
            reason,
        } => ErrorContext::new(BracktError::InvalidContext {
            source_name: source_name.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Template contexts are JSON objects of strings, numbers, booleans, null and nested objects"),
        BracktError::InvalidAssignment {
            assignment,
        } => ErrorContext::new(BracktError::InvalidAssignment {
            assignment: assignment.clone(),
        })
        .with_suggestion("Use --var user.first_name=Ada"),
        BracktError::ConfigNotFound {
            path,
        } => ErrorContext::new(BracktError::ConfigNotFound {
            path: path.clone(),
        })
        .with_suggestion("Check the --config path or the BRACKT_CONFIG environment variable"),
        BracktError::ConfigError {
            path,
            reason,
        } => ErrorContext::new(BracktError::ConfigError {
            path: path.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Fix the TOML syntax; known tables are [templates] and [cache]"),
        other => ErrorContext::new(BracktError::Other {
            message: other.to_string(),
        }),
    }
}
