//! Report filter input
//!
//! Filters are transient, per-request input. The resolver in
//! `services::filters` turns them into concrete predicates. The standing
//! rule on every membership dimension: an empty set means "no restriction",
//! never "exclude all".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Named shorthand for a concrete date interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateRangePreset {
    Today,
    ThisWeek,
    #[default]
    ThisMonth,
    LastMonth,
    ThisQuarter,
    ThisYear,
    Custom,
}

impl DateRangePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRangePreset::Today => "today",
            DateRangePreset::ThisWeek => "this_week",
            DateRangePreset::ThisMonth => "this_month",
            DateRangePreset::LastMonth => "last_month",
            DateRangePreset::ThisQuarter => "this_quarter",
            DateRangePreset::ThisYear => "this_year",
            DateRangePreset::Custom => "custom",
        }
    }
}

/// Date-range selection: a preset, or explicit bounds when `custom`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DateRangeFilter {
    pub preset: DateRangePreset,
    /// Explicit start date (custom preset only)
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Explicit end date, inclusive of that day (custom preset only)
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

/// User-supplied filter specification for one generation call
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct ReportFilter {
    #[serde(default)]
    pub date_range: Option<DateRangeFilter>,

    /// Department names; empty = no restriction
    #[serde(default)]
    pub departments: Vec<String>,

    /// Course ids; empty = no restriction
    #[serde(default)]
    pub course_ids: Vec<String>,

    /// Person ids; empty = no restriction
    #[serde(default)]
    pub user_ids: Vec<String>,

    /// Status labels; empty = no restriction
    #[serde(default)]
    pub status: Vec<String>,

    /// Minimum progress percentage, 0-100
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_progress: Option<f64>,

    /// Maximum progress percentage, 0-100
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub max_progress: Option<f64>,
}
