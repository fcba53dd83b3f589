//! Validate a template without rendering it.
//!
//! On success the command lists the variable and condition paths the
//! template references. On failure it reports the error with its location
//! and exits non-zero. `--format json` prints a [`CheckReport`] either way.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::common::{OutputFormat, TemplateFlags, input_label, read_input};
use crate::config::Config;
use crate::templating::{CompiledTemplate, TemplateError, compile_with};

/// Compile a template and report what it references.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Template file, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub input: String,

    #[command(flatten)]
    pub template: TemplateFlags,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Machine-readable check result.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CheckReport {
    pub file: String,
    pub valid: bool,
    pub variables: Vec<String>,
    pub conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CheckError>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CheckError {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

impl From<&TemplateError> for CheckError {
    fn from(error: &TemplateError) -> Self {
        match error {
            TemplateError::Syntax {
                message,
                location,
            } => CheckError {
                kind: "syntax",
                message: message.clone(),
                line: Some(location.line),
                column: Some(location.column),
                fragment: Some(location.fragment.clone()),
            },
            TemplateError::Malformed {
                fragment,
                message,
            } => CheckError {
                kind: "malformed",
                message: message.clone(),
                line: None,
                column: None,
                fragment: Some(fragment.clone()),
            },
            TemplateError::Render {
                message,
                ..
            } => CheckError {
                kind: "render",
                message: message.clone(),
                line: None,
                column: None,
                fragment: None,
            },
        }
    }
}

impl CheckReport {
    fn from_outcome(file: &str, outcome: &Result<CompiledTemplate, TemplateError>) -> Self {
        match outcome {
            Ok(template) => CheckReport {
                file: file.to_string(),
                valid: true,
                variables: template.variables().map(str::to_string).collect(),
                conditions: template.conditions().map(str::to_string).collect(),
                error: None,
            },
            Err(e) => CheckReport {
                file: file.to_string(),
                valid: false,
                variables: Vec::new(),
                conditions: Vec::new(),
                error: Some(CheckError::from(e)),
            },
        }
    }
}

impl CheckCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let label = input_label(&self.input).to_string();
        let source = read_input(&self.input).await?;
        let options = self.template.apply(config.templates);
        let directive_source = self.template.directive_source(&source, &options);

        let outcome = compile_with(&directive_source, &options);
        let report = CheckReport::from_outcome(&label, &outcome);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_text(&report),
        }

        match outcome {
            Ok(_) => Ok(()),
            Err(e) if self.format == OutputFormat::Json => {
                Err(anyhow::anyhow!("Template check failed for {}: {}", label, e))
            }
            Err(e) => Err(anyhow::Error::new(e).context(format!("Template check failed for {}", label))),
        }
    }
}

fn print_text(report: &CheckReport) {
    if !report.valid {
        return;
    }

    println!("{} {}", "✓".green(), report.file);
    if report.variables.is_empty() {
        println!("  variables: (none)");
    } else {
        println!("  variables: {}", report.variables.join(", "));
    }
    if report.conditions.is_empty() {
        println!("  conditions: (none)");
    } else {
        println!("  conditions: {}", report.conditions.join(", "));
    }
}
