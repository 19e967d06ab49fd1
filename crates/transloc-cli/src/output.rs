//! Output formatting for CLI commands.

use serde::Serialize;
use std::io::Write;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Types printable as text or JSON.
pub trait FormattedOutput: Serialize {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Render `value` in `format`.
pub fn render<T: FormattedOutput>(format: OutputFormat, value: &T) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(value.format_text()),
        OutputFormat::Json => value
            .format_json()
            .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}"))),
    }
}

/// Print `value` to stdout.
pub fn print_output<T: FormattedOutput>(format: OutputFormat, value: &T) -> Result<(), CliError> {
    let output = render(format, value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").map_err(|e| CliError::Other(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Greeting {
        locale: &'static str,
    }

    impl FormattedOutput for Greeting {
        fn format_text(&self) -> String {
            format!("hello in {}", self.locale)
        }
    }

    #[test]
    fn test_render_formats() {
        let greeting = Greeting { locale: "en" };
        assert_eq!(render(OutputFormat::Text, &greeting).unwrap(), "hello in en");
        assert_eq!(
            render(OutputFormat::Json, &greeting).unwrap(),
            "{\n  \"locale\": \"en\"\n}"
        );
    }
}
