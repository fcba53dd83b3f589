//! Helpers shared by the brackt subcommands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use tokio::io::AsyncReadExt;

use crate::templating::{SourceSyntax, TemplateOptions, translate_with};

/// Input argument value meaning "read from standard input".
pub const STDIN_MARKER: &str = "-";

/// Output format for commands with machine-readable output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output with colors.
    #[default]
    Text,

    /// Structured JSON output for editors and automation.
    Json,
}

/// Template flags shared by `render` and `check`.
///
/// Each flag overrides the matching `[templates]` value from the
/// configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateFlags {
    /// Syntax the input is written in
    #[arg(long, value_enum, default_value = "bracket")]
    pub syntax: SourceSyntax,

    /// Fail on missing variables instead of rendering them empty
    #[arg(long)]
    pub strict: bool,

    /// Do not HTML-escape interpolated values
    #[arg(long)]
    pub no_escape: bool,

    /// Do not wrap translated bracket source in a paragraph
    #[arg(long)]
    pub no_wrap: bool,
}

impl TemplateFlags {
    /// Apply the flags on top of configured options.
    #[must_use]
    pub fn apply(&self, mut options: TemplateOptions) -> TemplateOptions {
        if self.strict {
            options.strict = true;
        }
        if self.no_escape {
            options.escape_html = false;
        }
        if self.no_wrap {
            options.wrap_paragraph = false;
        }
        options
    }

    /// Directive source for `source`, translating bracket syntax when needed.
    pub fn directive_source(&self, source: &str, options: &TemplateOptions) -> String {
        match self.syntax {
            SourceSyntax::Bracket => translate_with(source, options),
            SourceSyntax::Directive => source.to_string(),
        }
    }
}

/// Read a template from a file, or from stdin when `input` is `-`.
pub async fn read_input(input: &str) -> Result<String> {
    if input == STDIN_MARKER {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .context("Failed to read template from stdin")?;
        return Ok(content);
    }

    let path = Path::new(input);
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read template from {}", path.display()))
}

/// Human-readable name for an input argument.
pub fn input_label(input: &str) -> &str {
    if input == STDIN_MARKER {
        "<stdin>"
    } else {
        input
    }
}
