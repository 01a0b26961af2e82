//! JSON output formatter for machine processing

use crate::domain::QueryResult;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of a query result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Whether any version was found
    found: bool,
    /// Versions, newest first
    versions: Vec<&'a str>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &QueryResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            found: result.is_found(),
            versions: result.versions(),
        };
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
