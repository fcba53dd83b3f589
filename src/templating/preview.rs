//! Live preview state for the template editor.
//!
//! [`TemplatePreview`] is the host-side owner of the editor's source string.
//! Every edit goes through [`TemplatePreview::update`], which stores the text
//! first and only then translates, compiles and renders it. A failed edit
//! records the error but keeps the last good rendering, so the preview pane
//! never blanks while the author is mid-keystroke.

use serde::{Deserialize, Serialize};

use super::TemplateOptions;
use super::cache::TemplateCache;
use super::context::VariableContext;
use super::error::TemplateError;
use super::translate::translate_with;
use crate::shortcode;

/// Syntax the editor source is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceSyntax {
    /// `[path]` and `[#if path]` directives, used by email templates
    #[default]
    Bracket,
    /// `{{ path }}` and `{% if path %}` directives, used by JWT claim templates
    Directive,
}

/// Outcome of the most recent preview pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    /// Last successful rendering, kept across failed edits
    pub rendered: Option<String>,
    /// Error from the most recent pass, if it failed
    pub error: Option<TemplateError>,
}

impl PreviewState {
    /// Whether the rendered output reflects the current source.
    pub fn is_current(&self) -> bool {
        self.error.is_none() && self.rendered.is_some()
    }
}

/// Editor-owned template source plus its live preview.
#[derive(Debug)]
pub struct TemplatePreview {
    source: String,
    syntax: SourceSyntax,
    options: TemplateOptions,
    cache: TemplateCache,
    state: PreviewState,
}

impl TemplatePreview {
    pub fn new(syntax: SourceSyntax, options: TemplateOptions) -> Self {
        Self::with_cache(syntax, options, TemplateCache::default())
    }

    pub fn with_cache(syntax: SourceSyntax, options: TemplateOptions, cache: TemplateCache) -> Self {
        Self {
            source: String::new(),
            syntax,
            options,
            cache,
            state: PreviewState::default(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn syntax(&self) -> SourceSyntax {
        self.syntax
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Replace the source and re-render it against `context`.
    pub fn update(&mut self, source: impl Into<String>, context: &VariableContext) -> &PreviewState {
        self.source = source.into();
        self.refresh(context)
    }

    /// Re-render the current source, for instance after the context changed.
    pub fn refresh(&mut self, context: &VariableContext) -> &PreviewState {
        match self.render(context) {
            Ok(rendered) => {
                self.state.rendered = Some(rendered);
                self.state.error = None;
            }
            Err(e) => {
                tracing::debug!("Preview kept previous rendering: {}", e);
                self.state.error = Some(e);
            }
        }
        &self.state
    }

    /// Insert a `"name": "{{name}}"` claim into the source and refresh.
    ///
    /// Only meaningful for directive-syntax claim buffers; the splice itself
    /// never fails.
    pub fn insert_shortcode(&mut self, name: &str, context: &VariableContext) -> &PreviewState {
        self.source = shortcode::insert_shortcode(&self.source, name);
        self.refresh(context)
    }

    fn render(&mut self, context: &VariableContext) -> Result<String, TemplateError> {
        let directive_source = match self.syntax {
            SourceSyntax::Bracket => translate_with(&self.source, &self.options),
            SourceSyntax::Directive => self.source.clone(),
        };
        let template = self.cache.get_or_compile(&directive_source, &self.options)?;
        template.render(context)
    }
}
