//! Core types for brackt
//!
//! This module holds the command-level error handling shared by the CLI:
//!
//! - [`BracktError`] - Enumerated error types for file, configuration and input failures
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! Template errors themselves live in [`crate::templating::TemplateError`];
//! [`user_friendly_error`] finds them anywhere in an `anyhow` chain and
//! renders their positioned report.

pub mod error;

pub use error::{BracktError, ErrorContext, user_friendly_error};
