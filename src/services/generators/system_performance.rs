//! System performance report
//!
//! Six platform KPIs, each compared against the preceding period of equal
//! length and against its configured target. The report is system-scoped:
//! every account with training activity counts, whatever its role. All
//! values derive from the snapshot timestamps, so repeated generations over
//! the same data agree.

use crate::config::ReportingConfig;
use crate::models::{CellValue, Course, DateRangeFilter, Person, Row};
use crate::services::filters::{resolve_date_range, DateRange, ResolvedFilter};

struct WindowMetrics {
    active_learners: f64,
    catalog_size: f64,
    total_assignments: f64,
    total_completions: f64,
    completion_rate: f64,
    avg_progress: f64,
}

fn measure(people: &[Person], courses: &[Course], window: &DateRange) -> WindowMetrics {
    let mut active_learners = 0usize;
    let mut assignments = 0usize;
    let mut completions = 0usize;
    let mut progress_sum = 0.0;
    let mut progress_count = 0usize;

    for person in people {
        let mut active = false;
        for entry in &person.progress {
            let assigned_in = entry.assigned_at.map(|t| window.contains(t)).unwrap_or(false);
            let completed_in = entry
                .completed_at
                .map(|t| window.contains(t))
                .unwrap_or(false);
            if assigned_in {
                assignments += 1;
            }
            if completed_in {
                completions += 1;
            }
            if assigned_in || completed_in {
                active = true;
            }
            // Progress average covers assignments that existed by window end
            if entry.assigned_at.map(|t| t < window.end).unwrap_or(false) {
                progress_sum += entry.progress_percent;
                progress_count += 1;
            }
        }
        if active {
            active_learners += 1;
        }
    }

    let catalog_size = courses
        .iter()
        .filter(|c| c.is_active && c.created_at < window.end)
        .count();

    WindowMetrics {
        active_learners: active_learners as f64,
        catalog_size: catalog_size as f64,
        total_assignments: assignments as f64,
        total_completions: completions as f64,
        completion_rate: if assignments > 0 {
            completions as f64 / assignments as f64 * 100.0
        } else {
            0.0
        },
        avg_progress: if progress_count > 0 {
            progress_sum / progress_count as f64
        } else {
            0.0
        },
    }
}

fn change_percent(current: f64, previous: f64) -> f64 {
    if previous != 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

fn metric_row(name: &str, current: f64, previous: f64, target: f64) -> Row {
    let mut row = Row::new();
    row.insert("metric".to_string(), CellValue::Text(name.to_string()));
    row.insert("current_value".to_string(), CellValue::Number(current));
    row.insert("previous_value".to_string(), CellValue::Number(previous));
    row.insert(
        "change_percent".to_string(),
        CellValue::Percentage(change_percent(current, previous)),
    );
    row.insert("target".to_string(), CellValue::Number(target));
    row.insert(
        "achievement".to_string(),
        CellValue::Percentage(if target > 0.0 {
            current / target * 100.0
        } else {
            0.0
        }),
    );
    row
}

pub fn generate_system_performance(
    people: &[Person],
    courses: &[Course],
    filter: &ResolvedFilter,
    config: &ReportingConfig,
) -> Vec<Row> {
    // Without an explicit range the report covers the default preset window
    let window = filter
        .date_range
        .unwrap_or_else(|| resolve_date_range(&DateRangeFilter::default(), filter.now));
    let previous = window.preceding();

    let cur = measure(people, courses, &window);
    let prev = measure(people, courses, &previous);
    let targets = &config.targets;

    vec![
        metric_row(
            "Active Learners",
            cur.active_learners,
            prev.active_learners,
            targets.active_learners,
        ),
        metric_row(
            "Catalog Size",
            cur.catalog_size,
            prev.catalog_size,
            targets.catalog_size,
        ),
        metric_row(
            "Total Assignments",
            cur.total_assignments,
            prev.total_assignments,
            targets.total_assignments,
        ),
        metric_row(
            "Total Completions",
            cur.total_completions,
            prev.total_completions,
            targets.total_completions,
        ),
        metric_row(
            "Completion Rate",
            cur.completion_rate,
            prev.completion_rate,
            targets.completion_rate,
        ),
        metric_row(
            "Average Progress",
            cur.avg_progress,
            prev.avg_progress,
            targets.avg_progress,
        ),
    ]
}
