//! Report API endpoints
//!
//! Template listing, report generation, and export. Generation and export
//! run on the blocking pool; row derivation and document rendering are
//! CPU-bound and must not stall the async runtime.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::{
    models::{
        Course, ExportConfig, ExportFormat, Person, ReportData, ReportFilter, ReportTemplate,
        ReportType, Role,
    },
    utils::error::{AppError, AppResult},
    AppState,
};

/// Create routes for report endpoints
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/templates", get(list_templates))
        .route("/generate", post(generate_report))
        .route("/export", post(export_report))
}

/// Query parameters for the template listing
#[derive(Debug, Deserialize)]
pub struct TemplatesQuery {
    /// Role the templates are listed for
    pub role: String,
}

/// List report templates available to a role
///
/// GET /api/v1/reports/templates?role=hr
async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplatesQuery>,
) -> AppResult<Json<Vec<ReportTemplate>>> {
    let role = Role::from_str(&query.role)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {}", query.role)))?;

    let templates = state
        .engine
        .templates_for_role(role)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(templates))
}

/// Request body for report generation
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub report_type: ReportType,
    #[serde(default)]
    pub filter: ReportFilter,
    /// Identity stamped into the report metadata
    #[serde(default = "default_generated_by")]
    pub generated_by: String,
    /// Client key for latest-wins coordination; omit to opt out
    #[serde(default)]
    pub client_id: Option<String>,
    /// Entity snapshots supplied by the data layer
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

fn default_generated_by() -> String {
    "system".to_string()
}

/// Generate a report
///
/// POST /api/v1/reports/generate
///
/// When `client_id` is set, a request superseded by a newer one from the
/// same client returns 409 instead of stale data.
async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> AppResult<Json<ReportData>> {
    request.filter.validate()?;

    let epoch = request
        .client_id
        .as_deref()
        .map(|client| state.engine.tracker().begin(client));

    let engine = state.engine.clone();
    let report = tokio::task::spawn_blocking(move || {
        engine.generate(
            request.report_type,
            &request.people,
            &request.courses,
            &request.filter,
            &request.generated_by,
            Utc::now(),
        )
        .map(|report| (report, request.client_id))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Generation task failed: {}", e)))??;

    let (report, client_id) = report;
    if let (Some(client), Some(epoch)) = (client_id, epoch) {
        if !state.engine.tracker().is_current(&client, epoch) {
            return Err(AppError::StaleGeneration);
        }
    }

    Ok(Json(report))
}

/// Request body for report export
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub report: ReportData,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub config: ExportConfig,
}

/// Export a generated report
///
/// POST /api/v1/reports/export
///
/// Returns the rendered document with download (or, for print preview,
/// inline) disposition.
async fn export_report(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> AppResult<Response> {
    let engine = state.engine.clone();
    let artifact = tokio::task::spawn_blocking(move || {
        engine.export(&request.report, request.format, &request.config)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Export task failed: {}", e)))??;

    let disposition = if artifact.inline {
        format!("inline; filename=\"{}\"", artifact.filename)
    } else {
        format!("attachment; filename=\"{}\"", artifact.filename)
    };

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}
