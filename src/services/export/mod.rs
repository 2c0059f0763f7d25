//! Export formatters
//!
//! Each output format implements the `Formatter` trait over the same
//! generated report, so formats stay independent: a fault in one never
//! affects the others, and adding a format touches nothing but this module.

mod csv;
mod excel;
mod pdf;

pub use csv::CsvFormatter;
pub use excel::ExcelFormatter;
pub use pdf::PdfFormatter;

use crate::models::{ExportConfig, ExportFormat, ReportData};
use crate::utils::error::AppResult;

/// A rendered export ready for delivery
#[derive(Debug, Clone)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
    /// Inline artifacts are displayed rather than downloaded
    pub inline: bool,
}

/// Renders a generated report into one output format
pub trait Formatter: Send + Sync {
    fn format(&self) -> ExportFormat;

    fn render(&self, report: &ReportData, config: &ExportConfig) -> AppResult<Vec<u8>>;
}

/// Resolve the formatter for an export format.
///
/// Print preview reuses the PDF formatter; only the delivery disposition
/// differs.
pub fn formatter_for(format: ExportFormat) -> Box<dyn Formatter> {
    match format {
        ExportFormat::Pdf | ExportFormat::Print => Box::new(PdfFormatter),
        ExportFormat::Excel => Box::new(ExcelFormatter),
        ExportFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Render `report` as `format` and package it for delivery.
pub fn export(
    report: &ReportData,
    format: ExportFormat,
    config: &ExportConfig,
) -> AppResult<Artifact> {
    let formatter = formatter_for(format);
    let bytes = formatter.render(report, config)?;

    Ok(Artifact {
        bytes,
        content_type: format.content_type(),
        filename: format!(
            "{}_{}.{}",
            report.template.id,
            report.generated_at.format("%Y%m%d_%H%M%S"),
            format.file_extension()
        ),
        inline: format.is_inline(),
    })
}
