//! Pending assignments report
//!
//! One row per open assignment, ordered most urgent first. Due dates derive
//! from the assignment timestamp plus the configured due window; assignments
//! with no recorded timestamp are treated as assigned at generation time.

use chrono::Duration;

use crate::config::ReportingConfig;
use crate::models::{CellValue, Course, Person, Priority, Row};
use crate::services::filters::ResolvedFilter;

use super::course_index;

pub fn generate_pending_assignments(
    people: &[Person],
    courses: &[Course],
    filter: &ResolvedFilter,
    config: &ReportingConfig,
) -> Vec<Row> {
    let courses = course_index(courses);
    let mut pending: Vec<(i64, Row)> = Vec::new();

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
            if progress >= 100.0 {
                continue;
            }
            let assigned_at = entry.and_then(|p| p.assigned_at);
            if !filter.matches_progress(progress) || !filter.in_date_range(assigned_at) {
                continue;
            }

            let assigned_at = assigned_at.unwrap_or(filter.now);
            let due_date = assigned_at + Duration::days(config.due_days);
            // Remaining days count calendar-date boundaries, so a deadline
            // later today is day 0 and tomorrow's is day 1
            let days_remaining = (due_date.date_naive() - filter.now.date_naive()).num_days();
            let priority = Priority::classify(days_remaining);
            if !filter.matches_status(priority.label()) {
                continue;
            }

            let course_name = courses
                .get(course_id.as_str())
                .map(|c| c.title.clone())
                .unwrap_or_else(|| course_id.clone());

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
            row.insert("assigned_at".to_string(), CellValue::Date(assigned_at));
            row.insert("due_date".to_string(), CellValue::Date(due_date));
            row.insert(
                "days_remaining".to_string(),
                CellValue::Number(days_remaining as f64),
            );
            row.insert("progress".to_string(), CellValue::Percentage(progress));
            row.insert(
                "priority".to_string(),
                CellValue::Status(priority.label().to_string()),
            );
            pending.push((days_remaining, row));
        }
    }

    pending.sort_by_key(|(days, _)| *days);
    pending.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::services::generators::fixtures::{course, dt, now, person, progress};

    fn sample() -> (Vec<Person>, Vec<Course>) {
        let people = vec![
            person(
                "u1",
                "Ana Ruiz",
                "Sales",
                Role::Employee,
                vec![
                    // Assigned 64 days before "now": 34 days past due
                    progress("c1", 20.0, Some(dt(2025, 1, 10)), None, None),
                    // Assigned 23 days before "now": 7 days remain
                    progress("c2", 60.0, Some(dt(2025, 2, 20)), None, None),
                ],
            ),
            person(
                "u2",
                "Luis Mora",
                "IT",
                Role::Intern,
                vec![
                    // Completed: not pending
                    progress("c1", 100.0, Some(dt(2025, 1, 1)), Some(dt(2025, 1, 20)), Some(90.0)),
                    // Assigned 5 days before "now": 25 days remain
                    progress("c2", 0.0, Some(dt(2025, 3, 10)), None, None),
                ],
            ),
        ];
        let courses = vec![
            course("c1", "Rust Fundamentals", "Engineering"),
            course("c2", "Data Privacy", "Compliance"),
        ];
        (people, courses)
    }

    #[test]
    fn test_completed_assignments_excluded() {
        let (people, courses) = sample();
        let filter = ResolvedFilter::unrestricted(now());
        let rows =
            generate_pending_assignments(&people, &courses, &filter, &ReportingConfig::default());
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_sorted_most_urgent_first() {
        let (people, courses) = sample();
        let filter = ResolvedFilter::unrestricted(now());
        let rows =
            generate_pending_assignments(&people, &courses, &filter, &ReportingConfig::default());

        let days: Vec<f64> = rows
            .iter()
            .map(|r| r["days_remaining"].as_number().unwrap())
            .collect();
        let mut sorted = days.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(days, sorted);
        assert_eq!(days[0], -34.0);
    }

    #[test]
    fn test_priority_labels() {
        let (people, courses) = sample();
        let filter = ResolvedFilter::unrestricted(now());
        let rows =
            generate_pending_assignments(&people, &courses, &filter, &ReportingConfig::default());

        assert_eq!(rows[0]["priority"], CellValue::Status("Crítica".to_string()));
        // 7 days left falls in the Media band
        assert_eq!(rows[1]["priority"], CellValue::Status("Media".to_string()));
        assert_eq!(rows[2]["priority"], CellValue::Status("Baja".to_string()));
    }

    #[test]
    fn test_days_remaining_uses_calendar_dates() {
        // Due 2025-03-22 at midnight; generated mid-day on the 15th. Seven
        // calendar days remain even though the raw gap is 6 days 14 hours.
        let people = vec![person(
            "u1",
            "Ana Ruiz",
            "Sales",
            Role::Employee,
            vec![progress("c2", 60.0, Some(dt(2025, 2, 20)), None, None)],
        )];
        let filter = ResolvedFilter::unrestricted(now());
        let rows = generate_pending_assignments(&people, &[], &filter, &ReportingConfig::default());
        assert_eq!(rows[0]["days_remaining"], CellValue::Number(7.0));
    }

    #[test]
    fn test_missing_assignment_timestamp_uses_now() {
        let people = vec![person(
            "u1",
            "Ana Ruiz",
            "Sales",
            Role::Employee,
            vec![progress("c1", 0.0, None, None, None)],
        )];
        let filter = ResolvedFilter::unrestricted(now());
        let rows = generate_pending_assignments(&people, &[], &filter, &ReportingConfig::default());
        assert_eq!(rows[0]["days_remaining"], CellValue::Number(30.0));
        assert_eq!(rows[0]["priority"], CellValue::Status("Baja".to_string()));
    }
}
