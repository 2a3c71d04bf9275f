//! Output formatter trait

use ensemble_domain::{OutputFormat, QueryReport};

/// Trait for rendering query reports
pub trait OutputFormatter {
    /// Answer plus the evidence trail and diagnostics
    fn format_full(&self, report: &QueryReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &QueryReport) -> String;

    /// Final answer only, or the error when the query failed
    fn format_answer(&self, report: &QueryReport) -> String;

    fn render(&self, report: &QueryReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => self.format_answer(report),
            OutputFormat::Full => self.format_full(report),
            OutputFormat::Json => self.format_json(report),
        }
    }
}
