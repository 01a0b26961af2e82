//! Output formatting for query results
//!
//! This module provides:
//! - Text output, one version per line, for update scripts
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::QueryResult;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain versions, newline separated
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

impl OutputFormat {
    /// Select the format from CLI arguments
    pub fn from_cli(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a query result
    fn format(&self, result: &QueryResult, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter for the given format
pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_output_format_from_cli() {
        assert_eq!(OutputFormat::from_cli(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_cli(false), OutputFormat::Text);
    }

    #[test]
    fn test_create_formatter() {
        let result = QueryResult::Found("1.2.3".into());

        let mut text = Vec::new();
        create_formatter(OutputFormat::Text)
            .format(&result, &mut text)
            .unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "1.2.3\n");

        let mut json = Vec::new();
        create_formatter(OutputFormat::Json)
            .format(&result, &mut json)
            .unwrap();
        assert!(String::from_utf8(json).unwrap().contains("\"1.2.3\""));
    }
}
