//! Render templates against a variable context.
//!
//! The context is assembled in layers, later layers winning:
//!
//! 1. shortcode sample values (`--sample`)
//! 2. a JSON object file (`--context FILE`)
//! 3. individual assignments (`--var path=value`)
//!
//! `--var` values are parsed as JSON scalars or objects when possible and
//! used as text otherwise, so `--var invitation.expires_in_days=7` is a
//! number and `--var user.first_name=Ada` is a string.
//!
//! Several files can be rendered in one run; they share one compiled
//! template cache sized by `[cache] capacity`.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::common::{TemplateFlags, input_label, read_input};
use crate::config::Config;
use crate::core::BracktError;
use crate::shortcode::vocabulary;
use crate::templating::{ContextValue, TemplateCache, VariableContext, is_dotted_path};

/// Render one or more templates.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template files, or `-` for stdin
    #[arg(value_name = "FILE", required = true)]
    pub inputs: Vec<String>,

    /// JSON file holding the variable context
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Set a single variable, e.g. `--var user.first_name=Ada`
    #[arg(long = "var", value_name = "PATH=VALUE")]
    pub vars: Vec<String>,

    /// Start from the shortcode sample values
    #[arg(long)]
    pub sample: bool,

    #[command(flatten)]
    pub template: TemplateFlags,
}

impl RenderCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let options = self.template.apply(config.templates);
        let context = self.build_context().await?;
        let mut cache = TemplateCache::with_capacity(config.cache.capacity);

        for input in &self.inputs {
            let label = input_label(input);
            let source = read_input(input).await?;
            let directive_source = self.template.directive_source(&source, &options);

            let template = cache
                .get_or_compile(&directive_source, &options)
                .with_context(|| format!("Failed to compile {}", label))?;
            let rendered =
                template.render(&context).with_context(|| format!("Failed to render {}", label))?;

            println!("{}", rendered);
        }

        let (hits, misses) = cache.stats();
        tracing::debug!("Template cache: {} hits, {} misses", hits, misses);
        Ok(())
    }

    async fn build_context(&self) -> Result<VariableContext> {
        let mut context = if self.sample {
            vocabulary::sample_context()
        } else {
            VariableContext::new()
        };

        if let Some(path) = &self.context {
            context.merge(load_context_file(path).await?);
        }

        for assignment in &self.vars {
            let (path, value) = parse_assignment(assignment)?;
            context.insert(path, value);
        }

        tracing::debug!("Render context has {} top-level entries", context.len());
        Ok(context)
    }
}

/// Read a JSON context file.
pub async fn load_context_file(path: &std::path::Path) -> Result<VariableContext> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read context from {}", path.display()))?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| BracktError::InvalidContext {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;

    VariableContext::from_json(value).map_err(|e| {
        BracktError::InvalidContext {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Split `path=value` into a validated path and a parsed value.
pub fn parse_assignment(assignment: &str) -> Result<(String, ContextValue), BracktError> {
    let invalid = || BracktError::InvalidAssignment {
        assignment: assignment.to_string(),
    };

    let (path, literal) = assignment.split_once('=').ok_or_else(invalid)?;
    let path = path.trim();
    if !is_dotted_path(path) {
        return Err(invalid());
    }

    Ok((path.to_string(), ContextValue::parse_literal(literal)))
}
