//! Check command implementation.

use clap::Parser;
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Validate the configuration
#[derive(Debug, Parser)]
pub struct CheckCommand {}

/// Effective configuration summary.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub config: Option<String>,
    pub fallbacks: &'static str,
    pub backend: &'static str,
    pub attribute: String,
    pub max_depth: usize,
}

impl FormattedOutput for CheckOutput {
    fn format_text(&self) -> String {
        format!(
            "config: {}\nfallbacks: {}\nbackend: {}\nattribute: {}\nmax_depth: {}",
            self.config.as_deref().unwrap_or("(defaults)"),
            self.fallbacks,
            self.backend,
            self.attribute,
            self.max_depth,
        )
    }
}

impl CheckCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        ctx.config.fallback_spec()?;

        let config = &ctx.config;
        print_output(
            ctx.format,
            &CheckOutput {
                config: ctx.config_path.as_ref().map(|p| p.display().to_string()),
                fallbacks: config.mode(),
                backend: config.backend.name(),
                attribute: config.attribute.clone(),
                max_depth: config.max_depth,
            },
        )
    }
}
