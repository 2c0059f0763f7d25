//! Summary aggregation
//!
//! Derives the `ReportSummary` for a generated row set. Bucketed counts are
//! exhaustive partitions of the rows: every row lands in exactly one bucket,
//! so the bucket totals always sum to `total_records`.

use std::collections::BTreeMap;

use serde_json::json;

use crate::models::{
    CellValue, CertificateStatus, ChartPoint, ChartSpec, ChartType, Priority, ProgressStatus,
    ReportSummary, ReportType, Row,
};

/// Compute summary statistics and chart specs for a row set.
pub fn summarize(report_type: ReportType, rows: &[Row]) -> ReportSummary {
    let mut summary = ReportSummary {
        total_records: rows.len(),
        ..Default::default()
    };

    match report_type {
        ReportType::EmployeeProgress => summarize_employee_progress(rows, &mut summary),
        ReportType::DepartmentStatistics => summarize_department_statistics(rows, &mut summary),
        ReportType::Certifications => summarize_certifications(rows, &mut summary),
        ReportType::PendingAssignments => summarize_pending_assignments(rows, &mut summary),
        ReportType::SystemPerformance => summarize_system_performance(rows, &mut summary),
        ReportType::CompletionHistory => summarize_completion_history(rows, &mut summary),
        ReportType::Custom => {}
    }

    summary
}

fn count_by_label(rows: &[Row], key: &str, labels: &[&'static str]) -> Vec<(String, usize)> {
    labels
        .iter()
        .map(|label| {
            let n = rows
                .iter()
                .filter(|r| r.get(key).and_then(|c| c.as_text()) == Some(*label))
                .count();
            (label.to_string(), n)
        })
        .collect()
}

fn mean(rows: &[Row], key: &str) -> Option<f64> {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.get(key).and_then(|c| c.as_number()))
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn pie_chart(title: &str, buckets: &[(String, usize)]) -> ChartSpec {
    ChartSpec {
        chart_type: ChartType::Pie,
        title: title.to_string(),
        data: buckets
            .iter()
            .map(|(label, n)| ChartPoint {
                label: label.clone(),
                value: *n as f64,
            })
            .collect(),
        x_key: None,
        y_key: None,
    }
}

fn summarize_employee_progress(rows: &[Row], summary: &mut ReportSummary) {
    let labels: Vec<&'static str> = ProgressStatus::ALL.iter().map(|s| s.label()).collect();
    let buckets = count_by_label(rows, "status", &labels);
    for (label, n) in &buckets {
        summary
            .aggregations
            .insert(format!("status_{}", snake(label)), json!(n));
    }
    if let Some(avg) = mean(rows, "progress") {
        summary.aggregations.insert("avg_progress".to_string(), json!(avg));
    }
    summary.charts.push(pie_chart("Status Distribution", &buckets));
}

fn summarize_department_statistics(rows: &[Row], summary: &mut ReportSummary) {
    let total_employees: f64 = rows
        .iter()
        .filter_map(|r| r.get("total_employees").and_then(|c| c.as_number()))
        .sum();
    summary
        .aggregations
        .insert("total_employees".to_string(), json!(total_employees));
    if let Some(avg) = mean(rows, "completion_rate") {
        summary
            .aggregations
            .insert("avg_completion_rate".to_string(), json!(avg));
    }

    summary.charts.push(ChartSpec {
        chart_type: ChartType::Bar,
        title: "Completion Rate by Department".to_string(),
        data: rows
            .iter()
            .filter_map(|r| {
                let label = r.get("department")?.as_text()?.to_string();
                let value = r.get("completion_rate")?.as_number()?;
                Some(ChartPoint { label, value })
            })
            .collect(),
        x_key: Some("department".to_string()),
        y_key: Some("completion_rate".to_string()),
    });
}

fn summarize_certifications(rows: &[Row], summary: &mut ReportSummary) {
    let labels: Vec<&'static str> = CertificateStatus::ALL.iter().map(|s| s.label()).collect();
    let buckets = count_by_label(rows, "status", &labels);
    for (label, n) in &buckets {
        summary
            .aggregations
            .insert(format!("status_{}", snake(label)), json!(n));
    }
    if let Some(avg) = mean(rows, "score") {
        summary.aggregations.insert("avg_score".to_string(), json!(avg));
    }
    summary.charts.push(pie_chart("Certificate Validity", &buckets));
}

fn summarize_pending_assignments(rows: &[Row], summary: &mut ReportSummary) {
    let labels: Vec<&'static str> = Priority::ALL.iter().map(|p| p.label()).collect();
    let buckets = count_by_label(rows, "priority", &labels);
    for (label, n) in &buckets {
        summary
            .aggregations
            .insert(format!("priority_{}", snake(label)), json!(n));
    }
    summary.charts.push(pie_chart("Priority Distribution", &buckets));
}

fn summarize_system_performance(rows: &[Row], summary: &mut ReportSummary) {
    let on_target = rows
        .iter()
        .filter(|r| {
            r.get("achievement")
                .and_then(|c| c.as_number())
                .map(|a| a >= 100.0)
                .unwrap_or(false)
        })
        .count();
    summary
        .aggregations
        .insert("metrics_on_target".to_string(), json!(on_target));

    summary.charts.push(ChartSpec {
        chart_type: ChartType::Bar,
        title: "Target Achievement".to_string(),
        data: rows
            .iter()
            .filter_map(|r| {
                let label = r.get("metric")?.as_text()?.to_string();
                let value = r.get("achievement")?.as_number()?;
                Some(ChartPoint { label, value })
            })
            .collect(),
        x_key: Some("metric".to_string()),
        y_key: Some("achievement".to_string()),
    });
}

fn summarize_completion_history(rows: &[Row], summary: &mut ReportSummary) {
    if let Some(avg) = mean(rows, "duration_days") {
        summary
            .aggregations
            .insert("avg_duration_days".to_string(), json!(avg));
    }
    if let Some(avg) = mean(rows, "score") {
        summary.aggregations.insert("avg_score".to_string(), json!(avg));
    }
    let issued = rows
        .iter()
        .filter(|r| matches!(r.get("certificate_issued"), Some(CellValue::Badge(_))))
        .count();
    summary
        .aggregations
        .insert("certificates_issued".to_string(), json!(issued));

    // Monthly histogram, oldest month first
    let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
    for row in rows {
        if let Some(date) = row.get("completed_at").and_then(|c| c.as_date()) {
            *by_month.entry(date.format("%Y-%m").to_string()).or_default() += 1;
        }
    }
    summary.charts.push(ChartSpec {
        chart_type: ChartType::Bar,
        title: "Completions by Month".to_string(),
        data: by_month
            .into_iter()
            .map(|(label, n)| ChartPoint {
                label,
                value: n as f64,
            })
            .collect(),
        x_key: Some("month".to_string()),
        y_key: Some("completions".to_string()),
    });
}

fn snake(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            ' ' => '_',
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_row(status: &str, progress: f64) -> Row {
        let mut row = Row::new();
        row.insert(
            "status".to_string(),
            CellValue::Status(status.to_string()),
        );
        row.insert("progress".to_string(), CellValue::Percentage(progress));
        row
    }

    #[test]
    fn test_status_buckets_partition_rows() {
        let rows = vec![
            status_row("Completed", 100.0),
            status_row("Completed", 100.0),
            status_row("In Progress", 50.0),
            status_row("Overdue", 0.0),
            status_row("Not Started", 0.0),
        ];
        let summary = summarize(ReportType::EmployeeProgress, &rows);

        assert_eq!(summary.total_records, 5);
        let bucket_sum: u64 = ["completed", "in_progress", "overdue", "not_started"]
            .iter()
            .map(|k| {
                summary.aggregations[&format!("status_{}", k)]
                    .as_u64()
                    .unwrap()
            })
            .sum();
        assert_eq!(bucket_sum, 5);
        assert_eq!(summary.aggregations["avg_progress"], json!(50.0));
    }

    #[test]
    fn test_spanish_labels_become_ascii_keys() {
        let mut row = Row::new();
        row.insert(
            "priority".to_string(),
            CellValue::Status("Crítica".to_string()),
        );
        let summary = summarize(ReportType::PendingAssignments, &[row]);
        assert_eq!(summary.aggregations["priority_critica"], json!(1));
        assert_eq!(summary.aggregations["priority_baja"], json!(0));
    }

    #[test]
    fn test_empty_rows_produce_empty_buckets() {
        let summary = summarize(ReportType::Certifications, &[]);
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.aggregations["status_vigente"], json!(0));
        // No scores to average
        assert!(!summary.aggregations.contains_key("avg_score"));
        assert_eq!(summary.charts.len(), 1);
    }

    #[test]
    fn test_custom_type_gets_count_only() {
        let summary = summarize(ReportType::Custom, &[Row::new()]);
        assert_eq!(summary.total_records, 1);
        assert!(summary.aggregations.is_empty());
        assert!(summary.charts.is_empty());
    }

    #[test]
    fn test_completion_history_monthly_chart_sorted() {
        use chrono::TimeZone;
        let mk = |y, m, d| {
            let mut row = Row::new();
            row.insert(
                "completed_at".to_string(),
                CellValue::Date(chrono::Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
            );
            row.insert(
                "certificate_issued".to_string(),
                CellValue::Badge("CERT-X".to_string()),
            );
            row
        };
        let rows = vec![mk(2025, 3, 5), mk(2025, 1, 10), mk(2025, 3, 20)];
        let summary = summarize(ReportType::CompletionHistory, &rows);

        let chart = &summary.charts[0];
        let labels: Vec<&str> = chart.data.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2025-01", "2025-03"]);
        assert_eq!(chart.data[1].value, 2.0);
        assert_eq!(summary.aggregations["certificates_issued"], json!(3));
    }
}
