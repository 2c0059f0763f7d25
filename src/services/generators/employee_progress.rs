//! Employee progress report
//!
//! One row per (learner, assigned course) pair. Assignments without a
//! progress entry count as untouched; assignments without a known course
//! record keep the raw course id so the row is still actionable.

use crate::config::ReportingConfig;
use crate::models::{CellValue, Course, Person, ProgressStatus, Row};
use crate::services::filters::ResolvedFilter;

use super::course_index;

pub fn generate_employee_progress(
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

        for course_id in &person.assigned_course_ids {
            if !filter.matches_course(course_id) {
                continue;
            }

            let entry = person.progress_for(course_id);
            let progress = entry.map(|p| p.progress_percent).unwrap_or(0.0);
            let assigned_at = entry.and_then(|p| p.assigned_at);

            if !filter.matches_progress(progress) || !filter.in_date_range(assigned_at) {
                continue;
            }

            let days_elapsed = assigned_at
                .map(|t| (filter.now - t).num_days())
                .unwrap_or(0);
            let status = ProgressStatus::classify(progress, days_elapsed, config.overdue_after_days);
            if !filter.matches_status(status.label()) {
                continue;
            }

            let (course_name, category) = match courses.get(course_id.as_str()) {
                Some(c) => (c.title.clone(), c.category.clone()),
                None => (course_id.clone(), String::new()),
            };

            let mut row = Row::new();
            row.insert(
                "employee_name".to_string(),
                CellValue::Text(person.name.clone()),
            );
            row.insert(
                "department".to_string(),
                CellValue::Text(person.department.clone()),
            );
            row.insert("course_name".to_string(), CellValue::Text(course_name));
            row.insert("category".to_string(), CellValue::Text(category));
            row.insert("progress".to_string(), CellValue::Percentage(progress));
            row.insert(
                "status".to_string(),
                CellValue::Status(status.label().to_string()),
            );
            row.insert(
                "days_elapsed".to_string(),
                CellValue::Number(days_elapsed as f64),
            );
            rows.push(row);
        }
    }

    rows
}
