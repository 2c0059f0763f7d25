//! API integration tests
//!
//! Tests the API endpoints with real HTTP requests against the router.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{org_snapshot, TestApp};

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let app = TestApp::new();
    let response = app.get("/api/v1/health").await;

    response.assert_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_templates_for_admin() {
    let app = TestApp::new();
    let response = app.get("/api/v1/reports/templates?role=admin").await;

    response.assert_ok();

    let templates: Vec<serde_json::Value> = response.json();
    assert_eq!(templates.len(), 6);
    assert_eq!(templates[0]["report_type"], "employee_progress");
}

#[tokio::test]
async fn test_templates_for_hr_exclude_system_performance() {
    let app = TestApp::new();
    let response = app.get("/api/v1/reports/templates?role=hr").await;

    response.assert_ok();

    let templates: Vec<serde_json::Value> = response.json();
    assert_eq!(templates.len(), 5);
    assert!(templates
        .iter()
        .all(|t| t["report_type"] != "system_performance"));
}

#[tokio::test]
async fn test_templates_for_learner_role_empty() {
    let app = TestApp::new();
    let response = app.get("/api/v1/reports/templates?role=employee").await;

    response.assert_ok();
    let templates: Vec<serde_json::Value> = response.json();
    assert!(templates.is_empty());
}

#[tokio::test]
async fn test_templates_unknown_role_is_bad_request() {
    let app = TestApp::new();
    let response = app.get("/api/v1/reports/templates?role=wizard").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_generate_employee_progress() {
    let app = TestApp::new();
    let (people, courses) = org_snapshot();

    let response = app
        .post_json(
            "/api/v1/reports/generate",
            json!({
                "report_type": "employee_progress",
                "generated_by": "admin@example.com",
                "people": people,
                "courses": courses
            }),
        )
        .await;

    response.assert_ok();

    let report: serde_json::Value = response.json();
    // 3 learners with 5 assignments between them
    assert_eq!(report["summary"]["total_records"], 5);
    assert_eq!(report["data"].as_array().unwrap().len(), 5);
    assert_eq!(report["generated_by"], "admin@example.com");
    assert_eq!(report["template"]["report_type"], "employee_progress");
}

#[tokio::test]
async fn test_generate_with_department_filter() {
    let app = TestApp::new();
    let (people, courses) = org_snapshot();

    let response = app
        .post_json(
            "/api/v1/reports/generate",
            json!({
                "report_type": "employee_progress",
                "filter": {"departments": ["IT"]},
                "people": people,
                "courses": courses
            }),
        )
        .await;

    response.assert_ok();
    let report: serde_json::Value = response.json();
    assert_eq!(report["summary"]["total_records"], 2);
}

#[tokio::test]
async fn test_generate_rejects_out_of_range_progress_filter() {
    let app = TestApp::new();
    let (people, courses) = org_snapshot();

    let response = app
        .post_json(
            "/api/v1/reports/generate",
            json!({
                "report_type": "employee_progress",
                "filter": {"min_progress": 150.0},
                "people": people,
                "courses": courses
            }),
        )
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_generate_custom_type_yields_empty_report() {
    let app = TestApp::new();
    let (people, courses) = org_snapshot();

    let response = app
        .post_json(
            "/api/v1/reports/generate",
            json!({
                "report_type": "custom",
                "people": people,
                "courses": courses
            }),
        )
        .await;

    response.assert_ok();
    let report: serde_json::Value = response.json();
    assert_eq!(report["summary"]["total_records"], 0);
}

async fn generate_report(app: &TestApp) -> serde_json::Value {
    let (people, courses) = org_snapshot();
    let response = app
        .post_json(
            "/api/v1/reports/generate",
            json!({
                "report_type": "employee_progress",
                "people": people,
                "courses": courses
            }),
        )
        .await;
    response.assert_ok();
    response.json()
}

#[tokio::test]
async fn test_export_csv_download() {
    let app = TestApp::new();
    let report = generate_report(&app).await;

    let response = app
        .post_json(
            "/api/v1/reports/export",
            json!({"report": report, "format": "csv"}),
        )
        .await;

    response.assert_ok();
    assert_eq!(response.header("content-type"), "text/csv");
    let disposition = response.header("content-disposition").to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(".csv"));

    // Embedded commas and quotes survive CSV quoting
    let text = String::from_utf8(response.body.clone()).unwrap();
    assert!(text.contains("\"Smith, \"\"Jr.\"\"\""));
}

#[tokio::test]
async fn test_export_pdf_and_excel_magic_bytes() {
    let app = TestApp::new();
    let report = generate_report(&app).await;

    let pdf = app
        .post_json(
            "/api/v1/reports/export",
            json!({"report": report, "format": "pdf"}),
        )
        .await;
    pdf.assert_ok();
    assert_eq!(pdf.header("content-type"), "application/pdf");
    assert!(pdf.body.starts_with(b"%PDF"));

    let excel = app
        .post_json(
            "/api/v1/reports/export",
            json!({"report": report, "format": "excel"}),
        )
        .await;
    excel.assert_ok();
    assert!(excel.body.starts_with(b"PK"));
    assert!(excel
        .header("content-disposition")
        .contains(".xlsx"));
}

#[tokio::test]
async fn test_export_print_is_inline() {
    let app = TestApp::new();
    let report = generate_report(&app).await;

    let response = app
        .post_json(
            "/api/v1/reports/export",
            json!({"report": report, "format": "print"}),
        )
        .await;

    response.assert_ok();
    assert_eq!(response.header("content-type"), "application/pdf");
    assert!(response
        .header("content-disposition")
        .starts_with("inline"));
}
