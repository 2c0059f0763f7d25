//! CSV export
//!
//! Header row from the template's field labels, then one record per data
//! row in field order. Every value is quoted so embedded commas, quotes,
//! and newlines survive any downstream parser.

use csv::{QuoteStyle, WriterBuilder};

use crate::models::{ExportConfig, ExportFormat, ReportData};
use crate::utils::error::{AppError, AppResult};

use super::Formatter;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, report: &ReportData, _config: &ExportConfig) -> AppResult<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(Vec::new());

        let fields = &report.template.fields;
        writer
            .write_record(fields.iter().map(|f| f.label.as_str()))
            .map_err(|e| AppError::Export(format!("CSV header: {}", e)))?;

        for row in &report.data {
            let record: Vec<String> = fields
                .iter()
                .map(|f| row.get(&f.key).map(|c| c.display()).unwrap_or_default())
                .collect();
            writer
                .write_record(&record)
                .map_err(|e| AppError::Export(format!("CSV row: {}", e)))?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Export(format!("CSV flush: {}", e)))
    }
}
