//! Filter resolution
//!
//! Turns a user-supplied `ReportFilter` into concrete predicates. Date
//! presets are evaluated in UTC against an injected "now" so resolution is
//! deterministic under test. Membership predicates are tolerant: an id that
//! matches nothing simply produces no rows, never an error.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

use crate::models::{DateRangeFilter, DateRangePreset, ReportFilter};

/// A half-open timestamp interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t < self.end
    }

    /// Length of the interval; used to derive the preceding comparison window.
    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// The window of equal length immediately before this one.
    pub fn preceding(&self) -> DateRange {
        DateRange {
            start: self.start - self.length(),
            end: self.start,
        }
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Resolve a date-range selection into a concrete `[start, end)` interval.
///
/// Rolling presets end at `now`; `last_month` covers the full previous
/// calendar month; `custom` includes the whole end day by mapping the
/// inclusive end date to the following midnight.
pub fn resolve_date_range(filter: &DateRangeFilter, now: DateTime<Utc>) -> DateRange {
    let today = now.date_naive();

    match filter.preset {
        DateRangePreset::Today => DateRange {
            start: midnight(today),
            end: now,
        },
        DateRangePreset::ThisWeek => {
            let monday = today.week(Weekday::Mon).first_day();
            DateRange {
                start: midnight(monday),
                end: now,
            }
        }
        DateRangePreset::ThisMonth => DateRange {
            start: midnight(first_of_month(today)),
            end: now,
        },
        DateRangePreset::LastMonth => {
            let this_first = first_of_month(today);
            let prev_first = first_of_month(this_first - Duration::days(1));
            DateRange {
                start: midnight(prev_first),
                end: midnight(this_first),
            }
        }
        DateRangePreset::ThisQuarter => {
            let quarter_month = (today.month0() / 3) * 3 + 1;
            // Move to day 1 first; the quarter's opening month may be shorter
            // than the current one
            let start = today
                .with_day(1)
                .and_then(|d| d.with_month(quarter_month))
                .unwrap_or(today);
            DateRange {
                start: midnight(start),
                end: now,
            }
        }
        DateRangePreset::ThisYear => {
            let jan1 = today.with_ordinal(1).unwrap_or(today);
            DateRange {
                start: midnight(jan1),
                end: now,
            }
        }
        DateRangePreset::Custom => {
            let start = filter.start.unwrap_or(today);
            let end = filter.end.unwrap_or(today);
            // End date is inclusive of that day
            let end_exclusive = end.succ_opt().unwrap_or(end);
            DateRange {
                start: midnight(start),
                end: midnight(end_exclusive),
            }
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// A `ReportFilter` resolved against "now" into ready-to-apply predicates
#[derive(Debug, Clone)]
pub struct ResolvedFilter {
    pub date_range: Option<DateRange>,
    pub departments: Vec<String>,
    pub course_ids: Vec<String>,
    pub user_ids: Vec<String>,
    pub status: Vec<String>,
    pub min_progress: Option<f64>,
    pub max_progress: Option<f64>,
    /// The instant the filter was resolved at; generators compute ages and
    /// deadlines against this.
    pub now: DateTime<Utc>,
}

impl ResolvedFilter {
    pub fn resolve(filter: &ReportFilter, now: DateTime<Utc>) -> Self {
        Self {
            date_range: filter.date_range.as_ref().map(|d| resolve_date_range(d, now)),
            departments: filter.departments.clone(),
            course_ids: filter.course_ids.clone(),
            user_ids: filter.user_ids.clone(),
            status: filter.status.clone(),
            min_progress: filter.min_progress,
            max_progress: filter.max_progress,
            now,
        }
    }

    /// An unrestricted filter, resolved at `now`.
    pub fn unrestricted(now: DateTime<Utc>) -> Self {
        Self::resolve(&ReportFilter::default(), now)
    }

    pub fn matches_department(&self, department: &str) -> bool {
        self.departments.is_empty() || self.departments.iter().any(|d| d == department)
    }

    pub fn matches_course(&self, course_id: &str) -> bool {
        self.course_ids.is_empty() || self.course_ids.iter().any(|c| c == course_id)
    }

    pub fn matches_user(&self, user_id: &str) -> bool {
        self.user_ids.is_empty() || self.user_ids.iter().any(|u| u == user_id)
    }

    pub fn matches_status(&self, status: &str) -> bool {
        self.status.is_empty() || self.status.iter().any(|s| s == status)
    }

    pub fn matches_progress(&self, progress_percent: f64) -> bool {
        if let Some(min) = self.min_progress {
            if progress_percent < min {
                return false;
            }
        }
        if let Some(max) = self.max_progress {
            if progress_percent > max {
                return false;
            }
        }
        true
    }

    /// Date predicate; rows without a relevant date pass unrestricted.
    pub fn in_date_range(&self, t: Option<DateTime<Utc>>) -> bool {
        match (&self.date_range, t) {
            (Some(range), Some(t)) => range.contains(t),
            (Some(_), None) => true,
            (None, _) => true,
        }
    }
}
