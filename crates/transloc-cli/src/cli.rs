//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use tracing::debug;
use transloc_config::{vars, ConfigLoader, TranslocConfig};

use crate::commands::{ChainCommand, CheckCommand, ReadCommand};
use crate::error::CliError;

/// transloc - locale fallback resolution for translated attributes
///
/// Resolves which locales a translated read tries, and in what order.
#[derive(Debug, Parser)]
#[command(
    name = "transloc",
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::TRANSLOC_CONFIG_PATH,
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read a translated value, falling back across locales
    Read(ReadCommand),

    /// Print the locale chain a read would walk
    Chain(ChainCommand),

    /// Validate the configuration
    Check(CheckCommand),
}

impl Cli {
    /// Load configuration from `--config`, or `transloc.yaml` in the
    /// current directory.
    pub fn load_config(&self) -> Result<TranslocConfig, CliError> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load_file(path)?,
            None => ConfigLoader::default().load()?,
        };
        debug!(mode = config.mode(), backend = config.backend.name(), "configuration loaded");
        Ok(config)
    }

    /// Execute the selected command
    pub async fn execute(self, config: TranslocConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            config_path: self.config,
            format: self.format,
        };

        match self.command {
            Command::Read(cmd) => cmd.execute(&ctx).await,
            Command::Chain(cmd) => cmd.execute(&ctx),
            Command::Check(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: TranslocConfig,
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use transloc_fallbacks::{FallbackOption, Locale};

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_read_command() {
        let cli = Cli::try_parse_from([
            "transloc", "-vv", "--format", "json", "read", "--data", "t.json", "--locale", "en-US",
            "--fallback", "pl,de-DE", "--trace",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Read(cmd) => {
                assert_eq!(cmd.locale, Locale::new("en-US").unwrap());
                assert_eq!(
                    cmd.fallback,
                    Some(FallbackOption::LocaleList(vec![
                        Locale::new("pl").unwrap(),
                        Locale::new("de-DE").unwrap()
                    ]))
                );
                assert!(cmd.trace);
                assert!(cmd.r#override.is_none());
            }
            other => panic!("Expected read command, got {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["transloc", "-q", "-v", "check"]).is_err());
    }

    #[test]
    fn test_invalid_locale_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["transloc", "chain", "--locale", "en--US"]).is_err());
    }
}
