//! Department statistics report
//!
//! One row per department, aggregated over everyone in it regardless of
//! role; headcount is a department property. Rates are computed from real
//! timestamps; completions lacking timestamps are excluded from the
//! on-time calculation rather than guessed at.

use std::collections::BTreeMap;

use crate::config::ReportingConfig;
use crate::models::{CellValue, Course, Person, Row};
use crate::services::filters::ResolvedFilter;

#[derive(Default)]
struct DeptAccumulator {
    total_employees: usize,
    active_employees: usize,
    courses_assigned: usize,
    courses_completed: usize,
    progress_sum: f64,
    on_time_completions: usize,
    timestamped_completions: usize,
}

pub fn generate_department_statistics(
    people: &[Person],
    _courses: &[Course],
    filter: &ResolvedFilter,
    config: &ReportingConfig,
) -> Vec<Row> {
    // BTreeMap keeps department output order stable
    let mut departments: BTreeMap<String, DeptAccumulator> = BTreeMap::new();

    for person in people {
        if !filter.matches_user(&person.id) || !filter.matches_department(&person.department) {
            continue;
        }

        let acc = departments.entry(person.department.clone()).or_default();
        acc.total_employees += 1;

        let mut has_assignment = false;
        for course_id in &person.assigned_course_ids {
            if !filter.matches_course(course_id) {
                continue;
            }
            let entry = person.progress_for(course_id);
            let progress = entry.map(|p| p.progress_percent).unwrap_or(0.0);
            let assigned_at = entry.and_then(|p| p.assigned_at);
            if !filter.in_date_range(assigned_at) {
                continue;
            }

            acc.courses_assigned += 1;
            acc.progress_sum += progress;
            has_assignment = true;
            if progress >= 100.0 {
                acc.courses_completed += 1;
                if let (Some(assigned), Some(completed)) =
                    (assigned_at, entry.and_then(|p| p.completed_at))
                {
                    acc.timestamped_completions += 1;
                    if (completed - assigned).num_days() <= config.due_days {
                        acc.on_time_completions += 1;
                    }
                }
            }
        }
        if has_assignment {
            acc.active_employees += 1;
        }
    }

    departments
        .into_iter()
        .map(|(name, acc)| {
            let avg_progress = if acc.courses_assigned > 0 {
                acc.progress_sum / acc.courses_assigned as f64
            } else {
                0.0
            };
            let completion_rate = if acc.courses_assigned > 0 {
                acc.courses_completed as f64 / acc.courses_assigned as f64 * 100.0
            } else {
                0.0
            };
            let on_time_rate = if acc.timestamped_completions > 0 {
                acc.on_time_completions as f64 / acc.timestamped_completions as f64 * 100.0
            } else {
                0.0
            };

            let mut row = Row::new();
            row.insert("department".to_string(), CellValue::Text(name));
            row.insert(
                "total_employees".to_string(),
                CellValue::Number(acc.total_employees as f64),
            );
            row.insert(
                "active_employees".to_string(),
                CellValue::Number(acc.active_employees as f64),
            );
            row.insert(
                "courses_assigned".to_string(),
                CellValue::Number(acc.courses_assigned as f64),
            );
            row.insert(
                "courses_completed".to_string(),
                CellValue::Number(acc.courses_completed as f64),
            );
            row.insert(
                "avg_progress".to_string(),
                CellValue::Percentage(avg_progress),
            );
            row.insert(
                "completion_rate".to_string(),
                CellValue::Percentage(completion_rate),
            );
            row.insert(
                "on_time_rate".to_string(),
                CellValue::Percentage(on_time_rate),
            );
            row
        })
        .collect()
}
