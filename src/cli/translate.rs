//! Print the directive form of a bracket template.
//!
//! # Examples
//!
//! ```bash
//! brackt translate welcome.html
//! echo 'Hi [user.first_name]' | brackt translate - --no-wrap
//! ```

use anyhow::Result;
use clap::Args;

use super::common::{input_label, read_input};
use crate::config::Config;
use crate::templating::translate_with;

/// Translate bracket syntax to directive syntax.
#[derive(Args, Debug)]
pub struct TranslateCommand {
    /// Template file, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub input: String,

    /// Do not wrap the output in a paragraph
    #[arg(long)]
    pub no_wrap: bool,
}

impl TranslateCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let source = read_input(&self.input).await?;

        let mut options = config.templates;
        if self.no_wrap {
            options.wrap_paragraph = false;
        }

        tracing::debug!("Translating {}", input_label(&self.input));
        println!("{}", translate_with(&source, &options));
        Ok(())
    }
}
