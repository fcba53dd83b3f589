//! brackt - bracket template compiler and shortcode inserter
//!
//! Email templates in the console are authored with a bracket syntax
//! (`[user.first_name]`, `[#if app.url]...[#endif]`) and JWT claim templates
//! with a directive syntax (`{{user.id}}`). This crate turns both into
//! rendered output:
//!
//! - bracket source is translated to directive source,
//! - directive source is validated and compiled once,
//! - compiled templates are rendered against a [`VariableContext`] of
//!   dotted-path variables,
//! - JWT claim buffers gain `"name": "{{name}}"` entries through
//!   [`shortcode::insert_shortcode`].
//!
//! # Core Modules
//!
//! - [`templating`] - Translation, compilation, rendering, caching and live preview
//! - [`shortcode`] - Claim buffer splicing and the shortcode vocabulary
//!
//! # Supporting Modules
//!
//! - [`cli`] - The `brackt` command-line interface
//! - [`config`] - `~/.brackt/config.toml` defaults
//! - [`core`] - Command-level errors and user-facing error reports
//!
//! # Example
//!
//! ```
//! use brackt::templating::{TemplateOptions, VariableContext, render_bracket};
//!
//! let context = VariableContext::new().with("user.first_name", "Ada");
//! let html = render_bracket("Hello [user.first_name]!", &context, &TemplateOptions::default())?;
//! assert_eq!(html, "<p>Hello Ada!</p>");
//! # Ok::<(), brackt::templating::TemplateError>(())
//! ```
//!
//! [`VariableContext`]: templating::VariableContext

pub mod cli;
pub mod config;
pub mod core;
pub mod shortcode;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
