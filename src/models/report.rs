//! Generated report data and export configuration

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ReportFilter, ReportTemplate};

/// A typed cell value inside a row record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
    Percentage(f64),
    Status(String),
    Badge(String),
}

impl CellValue {
    /// Render the value as display text, applying per-type formatting.
    ///
    /// Percentages carry a `%` suffix; dates use a locale-stable ISO-derived
    /// format. Text is returned unchanged so delimited exports round-trip.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) | CellValue::Status(s) | CellValue::Badge(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Percentage(p) => format!("{}%", format_number(*p)),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Numeric view of the value, when it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) | CellValue::Percentage(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) | CellValue::Status(s) | CellValue::Badge(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{:.1}", n)
    }
}

/// One generated data row, keyed by template field keys
pub type Row = HashMap<String, CellValue>;

/// Progress status of one assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Completed,
    InProgress,
    Overdue,
    NotStarted,
}

impl ProgressStatus {
    pub const ALL: [ProgressStatus; 4] = [
        ProgressStatus::Completed,
        ProgressStatus::InProgress,
        ProgressStatus::Overdue,
        ProgressStatus::NotStarted,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProgressStatus::Completed => "Completed",
            ProgressStatus::InProgress => "In Progress",
            ProgressStatus::Overdue => "Overdue",
            ProgressStatus::NotStarted => "Not Started",
        }
    }

    /// Classify an assignment from its progress and age.
    ///
    /// An untouched assignment becomes overdue once it is older than
    /// `overdue_after_days`.
    pub fn classify(progress_percent: f64, days_elapsed: i64, overdue_after_days: i64) -> Self {
        if progress_percent >= 100.0 {
            ProgressStatus::Completed
        } else if progress_percent > 0.0 {
            ProgressStatus::InProgress
        } else if days_elapsed > overdue_after_days {
            ProgressStatus::Overdue
        } else {
            ProgressStatus::NotStarted
        }
    }
}

/// Validity state of an issued certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Vigente,
    ProximoAVencer,
    Vencido,
}

impl CertificateStatus {
    pub const ALL: [CertificateStatus; 3] = [
        CertificateStatus::Vigente,
        CertificateStatus::ProximoAVencer,
        CertificateStatus::Vencido,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CertificateStatus::Vigente => "Vigente",
            CertificateStatus::ProximoAVencer => "Próximo a vencer",
            CertificateStatus::Vencido => "Vencido",
        }
    }

    /// Classify by remaining validity: more than `warning_days` out is
    /// current, 0 to `warning_days` is about to expire, past is expired.
    pub fn classify(valid_until: DateTime<Utc>, now: DateTime<Utc>, warning_days: i64) -> Self {
        let days_left = (valid_until - now).num_days();
        if valid_until < now {
            CertificateStatus::Vencido
        } else if days_left <= warning_days {
            CertificateStatus::ProximoAVencer
        } else {
            CertificateStatus::Vigente
        }
    }
}

/// Urgency of a pending assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critica,
    Alta,
    Media,
    Baja,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Critica,
        Priority::Alta,
        Priority::Media,
        Priority::Baja,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critica => "Crítica",
            Priority::Alta => "Alta",
            Priority::Media => "Media",
            Priority::Baja => "Baja",
        }
    }

    /// Classify urgency from the days remaining until the due date.
    pub fn classify(days_remaining: i64) -> Self {
        if days_remaining < 0 {
            Priority::Critica
        } else if days_remaining < 7 {
            Priority::Alta
        } else if days_remaining < 14 {
            Priority::Media
        } else {
            Priority::Baja
        }
    }
}

/// Chart kinds the summary can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Pie,
    Bar,
}

/// One labeled data point of a chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Chart-ready aggregate descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub title: String,
    pub data: Vec<ChartPoint>,
    #[serde(default)]
    pub x_key: Option<String>,
    #[serde(default)]
    pub y_key: Option<String>,
}

/// Summary statistics computed over the generated rows
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    /// Always equals the number of generated rows
    pub total_records: usize,
    /// Named metrics derived from the rows
    #[serde(default)]
    pub aggregations: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
}

/// The engine's primary output: one generated report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub id: Uuid,
    pub template: ReportTemplate,
    pub filter: ReportFilter,
    pub generated_at: DateTime<Utc>,
    pub generated_by: String,
    pub data: Vec<Row>,
    pub summary: ReportSummary,
}

/// Output formats for report exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Excel,
    Csv,
    /// Same paginated document as `Pdf`, delivered inline for print preview
    Print,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "excel",
            ExportFormat::Csv => "csv",
            ExportFormat::Print => "print",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pdf" => Some(ExportFormat::Pdf),
            "excel" => Some(ExportFormat::Excel),
            "csv" => Some(ExportFormat::Csv),
            "print" => Some(ExportFormat::Print),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf | ExportFormat::Print => "application/pdf",
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf | ExportFormat::Print => "pdf",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    /// Print preview is shown in the browser rather than downloaded.
    pub fn is_inline(&self) -> bool {
        matches!(self, ExportFormat::Print)
    }
}

/// Paper sizes for document exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
    Legal,
}

impl PageSize {
    /// Portrait dimensions in millimeters (width, height)
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (215.9, 279.4),
            PageSize::A4 => (210.0, 297.0),
            PageSize::Legal => (215.9, 355.6),
        }
    }
}

/// Page orientation for document exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Pure formatting input for export; carries no business data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default = "default_true")]
    pub show_header: bool,
    #[serde(default = "default_true")]
    pub show_footer: bool,
    #[serde(default = "default_true")]
    pub show_logo: bool,
    #[serde(default = "default_true")]
    pub show_page_numbers: bool,
    #[serde(default = "default_true")]
    pub show_generation_date: bool,
    #[serde(default)]
    pub watermark: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            show_header: true,
            show_footer: true,
            show_logo: true,
            show_page_numbers: true,
            show_generation_date: true,
            watermark: None,
        }
    }
}

impl ExportConfig {
    /// Effective page dimensions in millimeters, orientation applied.
    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        let (w, h) = self.page_size.dimensions_mm();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}
