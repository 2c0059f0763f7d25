//! Report row generators
//!
//! One pure function per report type. Every generator takes the same inputs
//! (entity snapshots, a resolved filter, the reporting policy) and returns
//! typed rows keyed by the template's field keys. Generators never fail on
//! data problems: rows that cannot be derived are skipped, and an unknown
//! report type yields an empty row set.

mod certifications;
mod completion_history;
mod department_statistics;
mod employee_progress;
mod pending_assignments;
mod system_performance;

pub use certifications::generate_certifications;
pub use completion_history::generate_completion_history;
pub use department_statistics::generate_department_statistics;
pub use employee_progress::generate_employee_progress;
pub use pending_assignments::generate_pending_assignments;
pub use system_performance::generate_system_performance;

use std::collections::HashMap;

use crate::config::ReportingConfig;
use crate::models::{Course, Person, ReportType, Row};
use crate::services::filters::ResolvedFilter;

/// Signature shared by all row generators
pub type GeneratorFn =
    fn(&[Person], &[Course], &ResolvedFilter, &ReportingConfig) -> Vec<Row>;

/// Resolve the generator for a report type.
///
/// `Custom` (and any future type without a generator) resolves to `None`;
/// the caller produces an empty report rather than an error.
pub fn generator_for(report_type: ReportType) -> Option<GeneratorFn> {
    match report_type {
        ReportType::EmployeeProgress => Some(generate_employee_progress as GeneratorFn),
        ReportType::DepartmentStatistics => Some(generate_department_statistics as GeneratorFn),
        ReportType::Certifications => Some(generate_certifications as GeneratorFn),
        ReportType::PendingAssignments => Some(generate_pending_assignments as GeneratorFn),
        ReportType::SystemPerformance => Some(generate_system_performance as GeneratorFn),
        ReportType::CompletionHistory => Some(generate_completion_history as GeneratorFn),
        ReportType::Custom => None,
    }
}

/// Index courses by id for row assembly.
pub(crate) fn course_index(courses: &[Course]) -> HashMap<&str, &Course> {
    courses.iter().map(|c| (c.id.as_str(), c)).collect()
}

/// Deterministic certificate identifier.
///
/// Derived entirely from the completion facts so repeated generations agree.
pub(crate) fn certificate_id(
    course_id: &str,
    person_id: &str,
    completed_at: chrono::DateTime<chrono::Utc>,
) -> String {
    format!(
        "CERT-{}-{}-{}",
        course_id.to_uppercase(),
        person_id.to_uppercase(),
        completed_at.format("%Y%m%d")
    )
}
