//! Report engine
//!
//! Orchestrates one generation: resolve the template, resolve the filter,
//! run the type's generator over the entity snapshots, summarize, and stamp
//! the result. Export is a separate call so one generated report can be
//! rendered into any number of formats.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::ReportingConfig;
use crate::models::{
    Course, ExportConfig, ExportFormat, Person, ReportData, ReportFilter, ReportTemplate,
    ReportType, Role,
};
use crate::services::aggregate::summarize;
use crate::services::catalog::TemplateCatalog;
use crate::services::export::{self, Artifact};
use crate::services::filters::ResolvedFilter;
use crate::services::generators::generator_for;
use crate::services::session::GenerationTracker;
use crate::utils::error::{AppError, AppResult};

/// Template-driven report generation and export engine
#[derive(Debug)]
pub struct ReportEngine {
    catalog: TemplateCatalog,
    tracker: GenerationTracker,
    config: ReportingConfig,
}

impl ReportEngine {
    pub fn new(config: ReportingConfig) -> Self {
        Self {
            catalog: TemplateCatalog::new(),
            tracker: GenerationTracker::new(),
            config,
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &GenerationTracker {
        &self.tracker
    }

    /// Templates visible to a role, in catalog order.
    pub fn templates_for_role(&self, role: Role) -> Vec<&ReportTemplate> {
        self.catalog.templates_for_role(role)
    }

    /// Generate a report of `report_type` over the given entity snapshots.
    ///
    /// A type without a generator yields an empty report rather than an
    /// error; the caller can always render what came back.
    #[instrument(skip(self, people, courses, filter), fields(report_type = ?report_type))]
    pub fn generate(
        &self,
        report_type: ReportType,
        people: &[Person],
        courses: &[Course],
        filter: &ReportFilter,
        generated_by: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ReportData> {
        let template = self
            .catalog
            .template_for_type(report_type)
            .ok_or_else(|| AppError::NotFound(format!("template for {:?}", report_type)))?;

        let resolved = ResolvedFilter::resolve(filter, now);
        debug!(
            people = people.len(),
            courses = courses.len(),
            "Resolving report data"
        );

        let started = std::time::Instant::now();
        let rows = match generator_for(report_type) {
            Some(generate) => generate(people, courses, &resolved, &self.config),
            None => {
                warn!(?report_type, "No generator registered; producing empty report");
                Vec::new()
            }
        };
        let summary = summarize(report_type, &rows);
        debug_assert_eq!(summary.total_records, rows.len());

        info!(
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Report generated"
        );

        Ok(ReportData {
            id: Uuid::new_v4(),
            template: template.clone(),
            filter: filter.clone(),
            generated_at: now,
            generated_by: generated_by.to_string(),
            data: rows,
            summary,
        })
    }

    /// Render a generated report into the requested format.
    #[instrument(skip(self, report, config), fields(report_id = %report.id, format = format.as_str()))]
    pub fn export(
        &self,
        report: &ReportData,
        format: ExportFormat,
        config: &ExportConfig,
    ) -> AppResult<Artifact> {
        let started = std::time::Instant::now();
        let artifact = export::export(report, format, config)?;
        info!(
            bytes = artifact.bytes.len(),
            filename = %artifact.filename,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Report exported"
        );
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::services::generators::fixtures::{course, dt, now, person, progress};

    fn engine() -> ReportEngine {
        ReportEngine::new(ReportingConfig::default())
    }

    fn snapshots() -> (Vec<Person>, Vec<Course>) {
        let people = vec![person(
            "u1",
            "Ana Ruiz",
            "Sales",
            Role::Employee,
            vec![
                progress("c1", 100.0, Some(dt(2025, 1, 10)), Some(dt(2025, 2, 1)), Some(92.0)),
                progress("c2", 30.0, Some(dt(2025, 2, 20)), None, None),
            ],
        )];
        let courses = vec![
            course("c1", "Rust Fundamentals", "Engineering"),
            course("c2", "Data Privacy", "Compliance"),
        ];
        (people, courses)
    }

    #[test]
    fn test_generate_stamps_metadata() {
        let engine = engine();
        let (people, courses) = snapshots();
        let report = engine
            .generate(
                ReportType::EmployeeProgress,
                &people,
                &courses,
                &ReportFilter::default(),
                "admin@example.com",
                now(),
            )
            .unwrap();

        assert_eq!(report.generated_at, now());
        assert_eq!(report.generated_by, "admin@example.com");
        assert_eq!(report.template.report_type, ReportType::EmployeeProgress);
        assert_eq!(report.summary.total_records, report.data.len());
    }

    #[test]
    fn test_custom_type_produces_empty_report() {
        let engine = engine();
        let (people, courses) = snapshots();
        let report = engine
            .generate(
                ReportType::Custom,
                &people,
                &courses,
                &ReportFilter::default(),
                "admin@example.com",
                now(),
            )
            .unwrap();

        assert!(report.data.is_empty());
        assert_eq!(report.summary.total_records, 0);
    }

    #[test]
    fn test_generate_then_export_all_formats() {
        let engine = engine();
        let (people, courses) = snapshots();
        let report = engine
            .generate(
                ReportType::CompletionHistory,
                &people,
                &courses,
                &ReportFilter::default(),
                "admin@example.com",
                now(),
            )
            .unwrap();

        for format in [
            ExportFormat::Pdf,
            ExportFormat::Excel,
            ExportFormat::Csv,
            ExportFormat::Print,
        ] {
            let artifact = engine
                .export(&report, format, &ExportConfig::default())
                .unwrap();
            assert!(!artifact.bytes.is_empty(), "{:?} produced no bytes", format);
        }
    }
}
