//! Read command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use serde::Serialize;
use tracing::Instrument;
use transloc_backends::{read_or_default, DEFAULT_KEY};
use transloc_config::TranslocConfig;
use transloc_fallbacks::{
    is_usable, with_override_async, FallbackError, FallbackOption, Locale, Options, ReadOptions,
    RecordingSource, Value, ValueSource,
};
use transloc_log::spans::{self, Timer};

use crate::args::{parse_fallback, parse_locale};
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

type Backend = Box<dyn ValueSource + Send + Sync>;

/// Read a translated value, falling back across locales
#[derive(Debug, Parser)]
pub struct ReadCommand {
    /// JSON object of stored values keyed by locale, e.g. {"en": "Hello"}
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Locale to read
    #[arg(short, long, value_parser = parse_locale)]
    pub locale: Locale,

    /// Fallback for this read: false, true, a locale, or a comma-separated list
    #[arg(long, value_parser = parse_fallback)]
    pub fallback: Option<FallbackOption>,

    /// Override active around the read; replaces --fallback
    #[arg(long = "override", value_parser = parse_fallback)]
    pub r#override: Option<FallbackOption>,

    /// Value printed when no locale in the chain has a stored value
    #[arg(long)]
    pub default: Option<String>,

    /// Also print each locale read, in order
    #[arg(long)]
    pub trace: bool,
}

/// Result of a read.
#[derive(Debug, Serialize)]
pub struct ReadOutput {
    pub locale: String,
    pub value: Value,
    pub resolved: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reads: Option<Vec<String>>,
}

impl FormattedOutput for ReadOutput {
    fn format_text(&self) -> String {
        let mut lines: Vec<String> = self
            .reads
            .iter()
            .flatten()
            .map(|locale| format!("read {locale}"))
            .collect();
        lines.push(self.value.to_string());
        lines.join("\n")
    }
}

impl ReadCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let output = self.run(&ctx.config).await?;
        print_output(ctx.format, &output)
    }

    async fn run(&self, config: &TranslocConfig) -> Result<ReadOutput, CliError> {
        let timer = Timer::start("read");
        let reader = config.reader(RecordingSource::new(self.load_source(config)?))?;

        let mut options = ReadOptions::new();
        if let Some(fallback) = &self.fallback {
            options = options.fallback(fallback.clone());
        }
        if let Some(default) = &self.default {
            options = options.with(DEFAULT_KEY, default.clone());
        }

        let read = async {
            let value = read_or_default(&reader, &self.locale, &options)?;
            let resolved = Self::resolved_locale(reader.source())?;
            if let Some(locale) = &resolved {
                spans::record_resolved(locale);
            }
            Ok::<_, FallbackError>((value, resolved))
        }
        .instrument(spans::read_span(&self.locale));

        let (value, resolved) = match &self.r#override {
            Some(option) => with_override_async(option.clone(), read).await,
            None => read.await,
        }?;
        timer.finish();

        let reads = reader.source().locales();
        let resolved = resolved.as_ref().map(Locale::to_string);

        Ok(ReadOutput {
            locale: self.locale.to_string(),
            value,
            resolved,
            reads: self
                .trace
                .then(|| reads.iter().map(Locale::to_string).collect()),
        })
    }

    /// The last locale read, if it holds a usable stored value.
    fn resolved_locale(source: &RecordingSource<Backend>) -> Result<Option<Locale>, FallbackError> {
        let Some(last) = source.locales().pop() else {
            return Ok(None);
        };
        let stored = source.inner().read(&last, &Options::new())?;
        Ok(is_usable(&stored).then_some(last))
    }

    /// Build the configured backend and store every entry of the data file.
    fn load_source(&self, config: &TranslocConfig) -> Result<Backend, CliError> {
        let contents =
            std::fs::read_to_string(&self.data).map_err(|e| CliError::io(&self.data, e))?;
        let entries: serde_json::Map<String, Value> = serde_json::from_str(&contents)
            .map_err(|e| CliError::validation("data", format!("{}: {e}", self.data.display())))?;

        let values = entries
            .into_iter()
            .map(|(tag, value)| Ok((Locale::new(&tag)?, value)))
            .collect::<Result<Vec<_>, FallbackError>>()?;
        let locales: Vec<Locale> = values.iter().map(|(locale, _)| locale.clone()).collect();

        let mut backend = config.backend.build(&config.attribute, &locales);
        let options = Options::new();
        for (locale, value) in values {
            backend
                .write(&locale, value, &options)
                .map_err(FallbackError::from)?;
        }
        Ok(backend)
    }
}
