//! Text output formatter
//!
//! Prints each version on its own line so update scripts can consume the
//! output directly. Nothing is printed for `NotFound`.

use crate::domain::QueryResult;
use crate::output::OutputFormatter;
use std::io::Write;

/// Plain text formatter
#[derive(Debug, Default)]
pub struct TextFormatter;

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &QueryResult, writer: &mut dyn Write) -> std::io::Result<()> {
        for version in result.versions() {
            writeln!(writer, "{}", version)?;
        }
        Ok(())
    }
}
