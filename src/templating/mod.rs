//! Bracket templating for email and JWT claim templates.
//!
//! This module provides the template pipeline behind the console's template
//! editors:
//!
//! 1. [`translate`] rewrites bracket syntax into directive syntax.
//! 2. [`compile`] validates directive syntax and builds a Tera-backed
//!    [`CompiledTemplate`].
//! 3. [`CompiledTemplate::render`] resolves dotted paths against a
//!    [`VariableContext`] and produces the final HTML fragment.
//!
//! # Syntax
//!
//! | Bracket syntax                         | Directive syntax                              |
//! |----------------------------------------|-----------------------------------------------|
//! | `[user.first_name]`                    | `{{ user.first_name }}`                       |
//! | `[#if app.url]...[#else]...[#endif]`   | `{% if app.url %}...{% else %}...{% endif %}` |
//!
//! Email templates are written in bracket syntax. JWT claim templates are
//! written directly in directive syntax, usually through
//! [`insert_shortcode`](crate::shortcode::insert_shortcode).
//!
//! # Semantics
//!
//! - Conditional blocks cannot be nested; a nested `if` is a syntax error.
//! - A missing variable renders as an empty string. With
//!   [`TemplateOptions::strict`] it is a render error instead.
//! - Conditions use truthiness: null, missing, `false`, `0` and `""` are falsy.
//! - Interpolated values are HTML-escaped unless
//!   [`TemplateOptions::escape_html`] is off. Literal template text is never
//!   escaped.
//! - Paths are opaque: `user.id` and `invitation.expires_in_days` get no
//!   special treatment.
//!
//! # Examples
//!
//! ```
//! use brackt::templating::{compile, translate, VariableContext};
//!
//! let source = "[#if inviter_name][inviter_name] invited you[#else]Welcome[#endif] to [app.name]";
//! let template = compile(&translate(source)).unwrap();
//!
//! let context = VariableContext::new()
//!     .with("inviter_name", "Grace")
//!     .with("app.name", "Console");
//! assert_eq!(template.render(&context).unwrap(), "<p>Grace invited you to Console</p>");
//!
//! let rendered = template.render(&VariableContext::new()).unwrap();
//! assert_eq!(rendered, "<p>Welcome to </p>");
//! ```

pub mod cache;
pub mod context;
pub mod directive;
pub mod error;
pub mod preview;
pub mod renderer;
pub mod translate;
pub(crate) mod utils;

use serde::{Deserialize, Serialize};

pub use cache::{DEFAULT_CACHE_CAPACITY, TemplateCache};
pub use context::{ContextError, ContextValue, VariableContext};
pub use directive::is_dotted_path;
pub use error::{ErrorLocation, TemplateError};
pub use preview::{PreviewState, SourceSyntax, TemplatePreview};
pub use renderer::{CompiledTemplate, compile, compile_with};
pub use translate::{is_paragraph_wrapped, translate, translate_with, wrap_paragraph};

/// Options shared by translation, compilation and rendering.
///
/// Deserialized from the `[templates]` table of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    /// Fail on missing variables and on mappings used as text or conditions
    pub strict: bool,
    /// HTML-escape interpolated values
    pub escape_html: bool,
    /// Wrap translated output in a single `<p>` unless it already starts with one
    pub wrap_paragraph: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            escape_html: true,
            wrap_paragraph: true,
        }
    }
}

/// Translate, compile and render bracket source in one step.
///
/// # Errors
///
/// Returns the compile or render error for the translated source.
pub fn render_bracket(
    source: &str,
    context: &VariableContext,
    options: &TemplateOptions,
) -> Result<String, TemplateError> {
    let directive_source = translate_with(source, options);
    compile_with(&directive_source, options)?.render(context)
}
