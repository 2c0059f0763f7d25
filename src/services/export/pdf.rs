//! PDF export
//!
//! Paginated tabular document. Pagination is two-phase: rows are chunked
//! into pages first so every footer can carry an accurate "Page i of n",
//! then each page is rendered independently with its own header, column
//! headers, and footer.

use std::io::BufWriter;

use printpdf::*;

use crate::models::{ExportConfig, ExportFormat, ReportData, ReportField, Row};
use crate::utils::error::{AppError, AppResult};

use super::Formatter;

const MARGIN_MM: f32 = 15.0;
const HEADER_MM: f32 = 25.0;
const FOOTER_MM: f32 = 12.0;
const LINE_MM: f32 = 7.0;

pub struct PdfFormatter;

impl Formatter for PdfFormatter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, report: &ReportData, config: &ExportConfig) -> AppResult<Vec<u8>> {
        let (width, height) = config.page_dimensions_mm();

        let header_mm = if config.show_header { HEADER_MM } else { 0.0 };
        let footer_mm = if config.show_footer { FOOTER_MM } else { 0.0 };
        // One line is reserved for the column header row
        let body_mm = height - 2.0 * MARGIN_MM - header_mm - footer_mm - LINE_MM;
        let rows_per_page = ((body_mm / LINE_MM) as usize).max(1);

        let pages: Vec<&[Row]> = if report.data.is_empty() {
            vec![&[]]
        } else {
            report.data.chunks(rows_per_page).collect()
        };
        let page_count = pages.len();

        let (doc, first_page, first_layer) = PdfDocument::new(
            &report.template.name,
            Mm(width),
            Mm(height),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Export(format!("PDF font: {}", e)))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Export(format!("PDF font: {}", e)))?;

        let columns = column_layout(&report.template.fields, width);

        for (page_idx, rows) in pages.iter().enumerate() {
            let layer = if page_idx == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(width), Mm(height), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };

            render_page(
                &layer, report, config, rows, &columns, &font, &font_bold, width, height,
                page_idx + 1, page_count,
            );
        }

        let mut buffer = Vec::new();
        {
            let mut writer = BufWriter::new(&mut buffer);
            doc.save(&mut writer)
                .map_err(|e| AppError::Export(format!("PDF save: {}", e)))?;
        }
        Ok(buffer)
    }
}

struct Column {
    key: String,
    label: String,
    x_mm: f32,
    max_chars: usize,
}

/// Distribute the usable width across fields, weighted by their layout hints.
fn column_layout(fields: &[ReportField], page_width: f32) -> Vec<Column> {
    let usable = page_width - 2.0 * MARGIN_MM;
    let total_weight: f32 = fields
        .iter()
        .map(|f| f.width.unwrap_or(100) as f32)
        .sum::<f32>()
        .max(1.0);

    let mut x = MARGIN_MM;
    fields
        .iter()
        .map(|f| {
            let col_width = usable * f.width.unwrap_or(100) as f32 / total_weight;
            let column = Column {
                key: f.key.clone(),
                label: f.label.clone(),
                x_mm: x,
                // Approximate glyph capacity for 9pt Helvetica
                max_chars: ((col_width / 1.9) as usize).max(4),
            };
            x += col_width;
            column
        })
        .collect()
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

#[allow(clippy::too_many_arguments)]
fn render_page(
    layer: &PdfLayerReference,
    report: &ReportData,
    config: &ExportConfig,
    rows: &[Row],
    columns: &[Column],
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    width: f32,
    height: f32,
    page_number: usize,
    page_count: usize,
) {
    if let Some(watermark) = &config.watermark {
        layer.set_fill_color(Color::Rgb(Rgb::new(0.85, 0.85, 0.85, None)));
        // Repeating diagonal band across the page
        for step in 0..3 {
            let x = width * 0.15;
            let y = height * (0.2 + 0.3 * step as f32);
            layer.begin_text_section();
            layer.set_font(font_bold, 40.0);
            layer.set_text_matrix(TextMatrix::TranslateRotate(
                Mm(x).into_pt(),
                Mm(y).into_pt(),
                45.0,
            ));
            layer.write_text(watermark.as_str(), font_bold);
            layer.end_text_section();
        }
        layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }

    let mut y = height - MARGIN_MM;

    if config.show_header {
        if config.show_logo {
            layer.use_text("TrainHub", 12.0, Mm(width - MARGIN_MM - 25.0), Mm(y - 5.0), font_bold);
        }
        layer.use_text(&report.template.name, 16.0, Mm(MARGIN_MM), Mm(y - 5.0), font_bold);
        if config.show_generation_date {
            layer.use_text(
                format!(
                    "Generated {} by {}",
                    report.generated_at.format("%Y-%m-%d %H:%M UTC"),
                    report.generated_by
                ),
                9.0,
                Mm(MARGIN_MM),
                Mm(y - 12.0),
                font,
            );
        }
        y -= HEADER_MM;
    }

    // Column header row
    for column in columns {
        layer.use_text(
            clip(&column.label, column.max_chars),
            9.0,
            Mm(column.x_mm),
            Mm(y),
            font_bold,
        );
    }
    y -= LINE_MM;

    if rows.is_empty() {
        layer.use_text("No records", 10.0, Mm(MARGIN_MM), Mm(y), font);
    }

    for row in rows {
        for column in columns {
            if let Some(cell) = row.get(&column.key) {
                layer.use_text(
                    clip(&cell.display(), column.max_chars),
                    9.0,
                    Mm(column.x_mm),
                    Mm(y),
                    font,
                );
            }
        }
        y -= LINE_MM;
    }

    if config.show_footer {
        let footer_y = MARGIN_MM;
        layer.use_text(
            format!("Report {}", report.id),
            8.0,
            Mm(MARGIN_MM),
            Mm(footer_y),
            font,
        );
        if config.show_page_numbers {
            layer.use_text(
                format!("Page {} of {}", page_number, page_count),
                8.0,
                Mm(width - MARGIN_MM - 25.0),
                Mm(footer_y),
                font,
            );
        }
    }
}
