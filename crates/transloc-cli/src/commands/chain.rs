//! Chain command implementation.

use std::collections::BTreeMap;

use clap::Parser;
use serde::Serialize;
use transloc_fallbacks::{with_override, FallbackOption, Locale, ReadOptions, Value};
use transloc_log::spans;

use crate::args::{parse_fallback, parse_locale};
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Print the locale chain a read would walk
#[derive(Debug, Parser)]
pub struct ChainCommand {
    /// Requested locale
    #[arg(short, long, value_parser = parse_locale)]
    pub locale: Locale,

    /// Fallback option: false, true, a locale, or a comma-separated list
    #[arg(long, value_parser = parse_fallback)]
    pub fallback: Option<FallbackOption>,

    /// Override active while resolving; replaces --fallback
    #[arg(long = "override", value_parser = parse_fallback)]
    pub r#override: Option<FallbackOption>,
}

/// A resolved chain.
#[derive(Debug, Serialize)]
pub struct ChainOutput {
    pub requested: String,
    pub chain: Vec<String>,
}

impl FormattedOutput for ChainOutput {
    fn format_text(&self) -> String {
        self.chain.join(" -> ")
    }
}

impl ChainCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        print_output(ctx.format, &self.resolve(ctx)?)
    }

    fn resolve(&self, ctx: &CommandContext) -> Result<ChainOutput, CliError> {
        let reader = ctx.config.reader(BTreeMap::<Locale, Value>::new())?;
        let options = match &self.fallback {
            Some(fallback) => ReadOptions::new().fallback(fallback.clone()),
            None => ReadOptions::new(),
        };

        let chain = match &self.r#override {
            Some(option) => with_override(option.clone(), || reader.chain_for(&self.locale, &options)),
            None => reader.chain_for(&self.locale, &options),
        };
        spans::chain_span(&self.locale, chain.len()).in_scope(|| {
            tracing::debug!(chain = ?chain.as_slice(), "chain resolved");
        });

        Ok(ChainOutput {
            requested: self.locale.to_string(),
            chain: chain.iter().map(Locale::to_string).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use transloc_config::ConfigLoader;

    fn l(s: &str) -> Locale {
        Locale::new(s).unwrap()
    }

    fn ctx(yaml: &str) -> CommandContext {
        CommandContext {
            config: ConfigLoader::parse(yaml).unwrap(),
            config_path: None,
            format: OutputFormat::Text,
        }
    }

    fn chain(ctx: &CommandContext, cmd: ChainCommand) -> String {
        cmd.resolve(ctx).unwrap().format_text()
    }

    fn cmd(locale: &str) -> ChainCommand {
        ChainCommand {
            locale: l(locale),
            fallback: None,
            r#override: None,
        }
    }

    #[test]
    fn test_custom_chain() {
        let ctx = ctx("fallbacks:\n  en-US: de-DE\n  pt: de-DE\n");
        assert_eq!(chain(&ctx, cmd("en-US")), "en-US -> de-DE");
        assert_eq!(chain(&ctx, cmd("ja")), "ja");
    }

    #[test]
    fn test_fallback_flag_and_override() {
        let ctx = ctx("fallbacks:\n  en-US: de-DE\n");

        let mut disabled = cmd("en-US");
        disabled.fallback = Some(FallbackOption::Disabled);
        assert_eq!(chain(&ctx, disabled), "en-US");

        let mut overridden = cmd("en-US");
        overridden.fallback = Some(FallbackOption::Disabled);
        overridden.r#override = Some(FallbackOption::LocaleList(vec![l("pl"), l("ja")]));
        assert_eq!(chain(&ctx, overridden), "en-US -> pl -> ja");
    }

    #[test]
    fn test_depth_limit_applies() {
        let unlimited = ctx("fallbacks:\n  en-US: de-DE\n  de-DE: ja\n");
        assert_eq!(chain(&unlimited, cmd("en-US")), "en-US -> de-DE -> ja");

        // One lookup: en-US's own fallback, none of its fallback's.
        let limited = ctx("fallbacks:\n  en-US: de-DE\n  de-DE: ja\nmax_depth: 1\n");
        assert_eq!(chain(&limited, cmd("en-US")), "en-US -> de-DE");
    }
}
