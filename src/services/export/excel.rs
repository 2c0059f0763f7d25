//! Excel export
//!
//! One "Report" worksheet with a title block, bold headers, and typed cells
//! (numbers stay numbers so spreadsheet formulas work on them). When the
//! report carries aggregations, a second "Summary" worksheet lists them.

use rust_xlsxwriter::{Color, Format, Workbook};

use crate::models::{CellValue, ExportConfig, ExportFormat, ReportData};
use crate::utils::error::{AppError, AppResult};

use super::Formatter;

pub struct ExcelFormatter;

impl Formatter for ExcelFormatter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Excel
    }

    fn render(&self, report: &ReportData, config: &ExportConfig) -> AppResult<Vec<u8>> {
        build_workbook(report, config)
            .map_err(|e| AppError::Export(format!("Excel workbook: {}", e)))
    }
}

fn build_workbook(
    report: &ReportData,
    config: &ExportConfig,
) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(14.0);
    let header_format = Format::new().set_bold().set_background_color(Color::Gray);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Report")?;

    let mut row_idx: u32 = 0;
    if config.show_header {
        worksheet.write_string_with_format(row_idx, 0, &report.template.name, &title_format)?;
        row_idx += 1;
        if config.show_generation_date {
            worksheet.write_string(
                row_idx,
                0,
                &format!(
                    "Generated {} by {}",
                    report.generated_at.format("%Y-%m-%d %H:%M UTC"),
                    report.generated_by
                ),
            )?;
            row_idx += 1;
        }
        row_idx += 1;
    }

    let fields = &report.template.fields;
    for (col, field) in fields.iter().enumerate() {
        worksheet.write_string_with_format(row_idx, col as u16, &field.label, &header_format)?;
    }
    row_idx += 1;

    for data_row in &report.data {
        for (col, field) in fields.iter().enumerate() {
            let col = col as u16;
            match data_row.get(&field.key) {
                Some(CellValue::Number(n)) => {
                    worksheet.write_number(row_idx, col, *n)?;
                }
                Some(cell) => {
                    worksheet.write_string(row_idx, col, &cell.display())?;
                }
                None => {}
            }
        }
        row_idx += 1;
    }
    worksheet.autofit();

    if !report.summary.aggregations.is_empty() {
        let summary = workbook.add_worksheet();
        summary.set_name("Summary")?;

        summary.write_string_with_format(0, 0, "Summary", &title_format)?;
        summary.write_string_with_format(2, 0, "Metric", &header_format)?;
        summary.write_string_with_format(2, 1, "Value", &header_format)?;

        let mut srow: u32 = 3;
        summary.write_string(srow, 0, "Total Records")?;
        summary.write_number(srow, 1, report.summary.total_records as f64)?;
        srow += 1;

        // Stable ordering for reproducible workbooks
        let mut keys: Vec<&String> = report.summary.aggregations.keys().collect();
        keys.sort();
        for key in keys {
            summary.write_string(srow, 0, key)?;
            match &report.summary.aggregations[key] {
                serde_json::Value::Number(n) => {
                    summary.write_number(srow, 1, n.as_f64().unwrap_or(0.0))?;
                }
                other => {
                    summary.write_string(srow, 1, &other.to_string())?;
                }
            }
            srow += 1;
        }
        summary.autofit();
    }

    workbook.save_to_buffer()
}
