//! Certifications report
//!
//! One row per completed course, with the recorded score alongside the
//! validity window. Completions without a completion timestamp cannot
//! anchor a validity window and are left out.

use chrono::Duration;

use crate::config::ReportingConfig;
use crate::models::{CellValue, CertificateStatus, Course, Person, Row};
use crate::services::filters::ResolvedFilter;

use super::{certificate_id, course_index};

pub fn generate_certifications(
    people: &[Person],
    courses: &[Course],
    filter: &ResolvedFilter,
    config: &ReportingConfig,
) -> Vec<Row> {
    let courses = course_index(courses);
    let mut rows = Vec::new();

    for person in people {
        if !person.role.is_learner()
            || !filter.matches_user(&person.id)
            || !filter.matches_department(&person.department)
        {
            continue;
        }

        for entry in &person.progress {
            if !entry.is_complete() || !filter.matches_course(&entry.course_id) {
                continue;
            }
            let completed_at = match entry.completed_at {
                Some(t) => t,
                None => continue,
            };
            if !filter.in_date_range(Some(completed_at)) {
                continue;
            }

            let valid_until = completed_at + Duration::days(config.certificate_valid_days);
            let status =
                CertificateStatus::classify(valid_until, filter.now, config.expiry_warning_days);
            if !filter.matches_status(status.label()) {
                continue;
            }

            let course_name = courses
                .get(entry.course_id.as_str())
                .map(|c| c.title.clone())
                .unwrap_or_else(|| entry.course_id.clone());

            let mut row = Row::new();
            row.insert(
                "employee_name".to_string(),
                CellValue::Text(person.name.clone()),
            );
            row.insert("course_name".to_string(), CellValue::Text(course_name));
            row.insert("completion_date".to_string(), CellValue::Date(completed_at));
            row.insert(
                "certificate_id".to_string(),
                CellValue::Badge(certificate_id(&entry.course_id, &person.id, completed_at)),
            );
            row.insert(
                "score".to_string(),
                match entry.score {
                    Some(s) => CellValue::Number(s),
                    None => CellValue::Text("—".to_string()),
                },
            );
            row.insert("valid_until".to_string(), CellValue::Date(valid_until));
            row.insert(
                "status".to_string(),
                CellValue::Status(status.label().to_string()),
            );
            rows.push(row);
        }
    }

    rows
}
