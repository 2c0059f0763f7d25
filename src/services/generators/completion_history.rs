//! Completion history report
//!
//! One row per completed course, newest first. Completions are anchored on
//! their completion timestamp; entries that never recorded one have no place
//! on a timeline and are skipped.

use chrono::{DateTime, Utc};

use crate::config::ReportingConfig;
use crate::models::{CellValue, Course, Person, Row};
use crate::services::filters::ResolvedFilter;

use super::{certificate_id, course_index};

pub fn generate_completion_history(
    people: &[Person],
    courses: &[Course],
    filter: &ResolvedFilter,
    config: &ReportingConfig,
) -> Vec<Row> {
    let courses = course_index(courses);
    let mut history: Vec<(DateTime<Utc>, Row)> = Vec::new();

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

            let course_name = courses
                .get(entry.course_id.as_str())
                .map(|c| c.title.clone())
                .unwrap_or_else(|| entry.course_id.clone());

            let certificate = match entry.score {
                Some(s) if s < config.score_pass_mark => CellValue::Text("—".to_string()),
                _ => CellValue::Badge(certificate_id(&entry.course_id, &person.id, completed_at)),
            };

            let mut row = Row::new();
            row.insert(
                "employee_name".to_string(),
                CellValue::Text(person.name.clone()),
            );
            row.insert("course_name".to_string(), CellValue::Text(course_name));
            row.insert("completed_at".to_string(), CellValue::Date(completed_at));
            row.insert(
                "duration_days".to_string(),
                match entry.assigned_at {
                    Some(assigned) => {
                        CellValue::Number((completed_at - assigned).num_days() as f64)
                    }
                    None => CellValue::Text("—".to_string()),
                },
            );
            row.insert(
                "score".to_string(),
                match entry.score {
                    Some(s) => CellValue::Number(s),
                    None => CellValue::Text("—".to_string()),
                },
            );
            row.insert(
                "attempts".to_string(),
                CellValue::Number(entry.attempts as f64),
            );
            row.insert("certificate_issued".to_string(), certificate);
            history.push((completed_at, row));
        }
    }

    history.sort_by(|(a, _), (b, _)| b.cmp(a));
    history.into_iter().map(|(_, row)| row).collect()
}
