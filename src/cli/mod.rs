//! Command-line interface for brackt.
//!
//! # Available Commands
//!
//! - `translate` - Print the directive form of a bracket template
//! - `render` - Render templates against a variable context
//! - `check` - Validate a template and list the paths it references
//! - `shortcode insert` - Splice a shortcode claim into a claims buffer
//! - `shortcode list` - List the known shortcodes
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging on stderr
//! - `--quiet` / `-q` - Errors only
//! - `--config <PATH>` - Alternative configuration file
//!
//! Without either verbosity flag `RUST_LOG` is honored, falling back to
//! warnings only.
//!
//! # Examples
//!
//! ```bash
//! brackt translate welcome.html
//! brackt render welcome.html --context context.json --var app.name=Console
//! brackt check claims.json --syntax directive --format json
//! brackt shortcode insert claims.json user.id --in-place
//! ```

pub mod check;
pub mod common;
pub mod render;
pub mod shortcode;
pub mod translate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter forced by a verbosity flag; `None` defers to `RUST_LOG`
    pub log_level: Option<&'static str>,

    /// Explicit configuration file path
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the stderr tracing subscriber.
    ///
    /// Safe to call more than once; later calls are no-ops.
    pub fn init_logging(&self) {
        let filter = match self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// brackt - bracket template compiler and shortcode inserter
#[derive(Parser, Debug)]
#[command(
    name = "brackt",
    about = "Compile, check and render bracket templates and JWT claim shortcodes",
    version,
    long_about = "brackt translates [bracket] templates to {{ directive }} syntax, validates them, \
                  renders them against JSON contexts and splices shortcodes into JWT claim buffers."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file (default: ~/.brackt/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate bracket syntax into directive syntax
    Translate(translate::TranslateCommand),

    /// Render templates against a variable context
    Render(render::RenderCommand),

    /// Validate a template and list the paths it references
    Check(check::CheckCommand),

    /// Work with JWT claim shortcodes
    #[command(subcommand)]
    Shortcode(shortcode::ShortcodeCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; `main` turns it into a user-facing report.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit [`CliConfig`].
    pub async fn execute_with_config(self, cli_config: CliConfig) -> Result<()> {
        cli_config.init_logging();

        let config = Config::load_with_optional(cli_config.config_path).await?;
        tracing::debug!("Template defaults: {:?}", config.templates);

        match self.command {
            Commands::Translate(cmd) => cmd.execute(&config).await,
            Commands::Render(cmd) => cmd.execute(&config).await,
            Commands::Check(cmd) => cmd.execute(&config).await,
            Commands::Shortcode(cmd) => cmd.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_verbosity() {
        let cli = Cli::parse_from(["brackt", "--verbose", "translate", "-"]);
        assert_eq!(cli.build_config().log_level, Some("debug"));

        let cli = Cli::parse_from(["brackt", "translate", "-", "--quiet"]);
        assert_eq!(cli.build_config().log_level, Some("error"));

        let cli = Cli::parse_from(["brackt", "translate", "-"]);
        assert_eq!(cli.build_config().log_level, None);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["brackt", "-v", "-q", "translate", "-"]).is_err());
    }

    #[test]
    fn test_config_path_flag() {
        let cli = Cli::parse_from(["brackt", "--config", "custom.toml", "shortcode", "list"]);
        assert_eq!(cli.build_config().config_path, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_render_flags_parse() {
        let cli = Cli::parse_from([
            "brackt",
            "render",
            "a.html",
            "b.html",
            "--var",
            "user.id=1",
            "--var",
            "app.name=Console",
            "--strict",
            "--syntax",
            "directive",
        ]);
        let Commands::Render(cmd) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(cmd.inputs, vec!["a.html", "b.html"]);
        assert_eq!(cmd.vars.len(), 2);
        assert!(cmd.template.strict);
        assert_eq!(cmd.template.syntax, crate::templating::SourceSyntax::Directive);
    }

    #[test]
    fn test_render_requires_input() {
        assert!(Cli::try_parse_from(["brackt", "render"]).is_err());
    }
}
