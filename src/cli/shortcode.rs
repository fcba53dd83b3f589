//! Shortcode commands for JWT claim templates.
//!
//! # Examples
//!
//! ```bash
//! brackt shortcode list
//! brackt shortcode insert claims.json user.id --in-place
//! echo '{}' | brackt shortcode insert - app.name
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use super::common::{OutputFormat, STDIN_MARKER, read_input};
use crate::shortcode::{SHORTCODES, insert_shortcode, vocabulary};

#[derive(Subcommand, Debug)]
pub enum ShortcodeCommand {
    /// Insert a shortcode claim into a claims buffer
    Insert(InsertCommand),

    /// List the known shortcodes
    List(ListCommand),
}

impl ShortcodeCommand {
    pub async fn execute(self) -> Result<()> {
        match self {
            ShortcodeCommand::Insert(cmd) => cmd.execute().await,
            ShortcodeCommand::List(cmd) => cmd.execute(),
        }
    }
}

#[derive(Args, Debug)]
pub struct InsertCommand {
    /// Claims file, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub input: String,

    /// Shortcode to insert, e.g. `user.id`
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Write the result back to FILE instead of printing it
    #[arg(long)]
    pub in_place: bool,

    /// Do not warn about shortcodes missing from the vocabulary
    #[arg(long)]
    pub quiet_unknown: bool,
}

impl InsertCommand {
    pub async fn execute(self) -> Result<()> {
        if self.in_place && self.input == STDIN_MARKER {
            anyhow::bail!("--in-place needs a file, not stdin");
        }

        if !self.quiet_unknown && vocabulary::find(&self.name).is_none() {
            let suggestions = vocabulary::suggest(&self.name);
            if suggestions.is_empty() {
                eprintln!("{} '{}' is not a known shortcode", "warning:".yellow(), self.name);
            } else {
                eprintln!(
                    "{} '{}' is not a known shortcode; did you mean {}?",
                    "warning:".yellow(),
                    self.name,
                    suggestions.join(", ")
                );
            }
        }

        let current = read_input(&self.input).await?;
        let updated = insert_shortcode(&current, &self.name);

        if self.in_place {
            let path = Path::new(&self.input);
            tokio::fs::write(path, format!("{}\n", updated))
                .await
                .with_context(|| format!("Failed to write claims to {}", path.display()))?;
            tracing::debug!("Inserted '{}' into {}", self.name, path.display());
        } else {
            println!("{}", updated);
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListCommand {
    pub fn execute(self) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(SHORTCODES)?),
            OutputFormat::Text => {
                let width = SHORTCODES.iter().map(|s| s.name.len()).max().unwrap_or(0);
                for shortcode in SHORTCODES {
                    let name = format!("{:<width$}", shortcode.name, width = width);
                    println!(
                        "{}  {:<12}  {}",
                        name.bold(),
                        shortcode.category.to_string(),
                        shortcode.description
                    );
                }
            }
        }
        Ok(())
    }
}
