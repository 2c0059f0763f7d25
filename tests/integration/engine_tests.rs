//! Engine integration tests
//!
//! Exercises the engine end to end: generation across every report type,
//! summary invariants, export round trips, and latest-wins coordination.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::rstest;

use trainhub_reports::config::ReportingConfig;
use trainhub_reports::models::{
    Course, ExportConfig, ExportFormat, Person, Priority, ReportFilter, ReportType,
};
use trainhub_reports::ReportEngine;

use crate::common::org_snapshot;

fn snapshots() -> (Vec<Person>, Vec<Course>) {
    let (people, courses) = org_snapshot();
    (
        serde_json::from_value(people).expect("Failed to parse people"),
        serde_json::from_value(courses).expect("Failed to parse courses"),
    )
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 10, 0, 0).unwrap()
}

#[test]
fn test_every_report_type_generates() {
    let engine = ReportEngine::new(ReportingConfig::default());
    let (people, courses) = snapshots();

    for report_type in [
        ReportType::EmployeeProgress,
        ReportType::DepartmentStatistics,
        ReportType::Certifications,
        ReportType::PendingAssignments,
        ReportType::SystemPerformance,
        ReportType::CompletionHistory,
        ReportType::Custom,
    ] {
        let report = engine
            .generate(
                report_type,
                &people,
                &courses,
                &ReportFilter::default(),
                "tester",
                now(),
            )
            .unwrap();
        assert_eq!(
            report.summary.total_records,
            report.data.len(),
            "summary count mismatch for {:?}",
            report_type
        );
    }
}

#[test]
fn test_status_buckets_sum_to_total() {
    let engine = ReportEngine::new(ReportingConfig::default());
    let (people, courses) = snapshots();

    let report = engine
        .generate(
            ReportType::EmployeeProgress,
            &people,
            &courses,
            &ReportFilter::default(),
            "tester",
            now(),
        )
        .unwrap();

    let bucket_sum: u64 = ["completed", "in_progress", "overdue", "not_started"]
        .iter()
        .map(|k| {
            report.summary.aggregations[&format!("status_{}", k)]
                .as_u64()
                .unwrap()
        })
        .sum();
    assert_eq!(bucket_sum, report.summary.total_records as u64);
}

#[test]
fn test_completion_history_newest_first() {
    let engine = ReportEngine::new(ReportingConfig::default());
    let (people, courses) = snapshots();

    let report = engine
        .generate(
            ReportType::CompletionHistory,
            &people,
            &courses,
            &ReportFilter::default(),
            "tester",
            now(),
        )
        .unwrap();

    let dates: Vec<_> = report
        .data
        .iter()
        .map(|r| r["completed_at"].as_date().unwrap())
        .collect();
    assert!(!dates.is_empty());
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_pending_assignments_most_urgent_first() {
    let engine = ReportEngine::new(ReportingConfig::default());
    let (people, courses) = snapshots();

    let report = engine
        .generate(
            ReportType::PendingAssignments,
            &people,
            &courses,
            &ReportFilter::default(),
            "tester",
            now(),
        )
        .unwrap();

    let days: Vec<f64> = report
        .data
        .iter()
        .map(|r| r["days_remaining"].as_number().unwrap())
        .collect();
    assert!(days.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_repeated_generation_is_deterministic() {
    let engine = ReportEngine::new(ReportingConfig::default());
    let (people, courses) = snapshots();

    let a = engine
        .generate(
            ReportType::DepartmentStatistics,
            &people,
            &courses,
            &ReportFilter::default(),
            "tester",
            now(),
        )
        .unwrap();
    let b = engine
        .generate(
            ReportType::DepartmentStatistics,
            &people,
            &courses,
            &ReportFilter::default(),
            "tester",
            now(),
        )
        .unwrap();

    assert_eq!(a.data, b.data);
}

#[rstest]
#[case(-1, "Crítica")]
#[case(0, "Alta")]
#[case(6, "Alta")]
#[case(7, "Media")]
#[case(13, "Media")]
#[case(14, "Baja")]
fn test_priority_bands(#[case] days_remaining: i64, #[case] expected: &str) {
    assert_eq!(Priority::classify(days_remaining).label(), expected);
}

#[test]
fn test_export_formats_round_trip() {
    let engine = ReportEngine::new(ReportingConfig::default());
    let (people, courses) = snapshots();

    let report = engine
        .generate(
            ReportType::Certifications,
            &people,
            &courses,
            &ReportFilter::default(),
            "tester",
            now(),
        )
        .unwrap();

    let pdf = engine
        .export(&report, ExportFormat::Pdf, &ExportConfig::default())
        .unwrap();
    assert!(pdf.bytes.starts_with(b"%PDF"));

    let excel = engine
        .export(&report, ExportFormat::Excel, &ExportConfig::default())
        .unwrap();
    assert!(excel.bytes.starts_with(b"PK"));

    let csv = engine
        .export(&report, ExportFormat::Csv, &ExportConfig::default())
        .unwrap();
    let text = String::from_utf8(csv.bytes).unwrap();
    assert!(text.starts_with("\"Employee\""));
}

#[tokio::test]
async fn test_latest_generation_wins() {
    let engine = Arc::new(ReportEngine::new(ReportingConfig::default()));

    // An older request observes it was superseded before publishing
    let first = engine.tracker().begin("client-1");
    let slow = {
        let engine = engine.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            engine.tracker().is_current("client-1", first)
        })
    };

    let second = engine.tracker().begin("client-1");
    assert!(engine.tracker().is_current("client-1", second));
    assert!(!slow.await.unwrap());
}
