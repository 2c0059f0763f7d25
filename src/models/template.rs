//! Report template definitions
//!
//! Templates are immutable catalog entries: they fix which fields a report
//! carries, in what order, and which roles may see the template.

use serde::{Deserialize, Serialize};

use super::Role;

/// Report types supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Per-learner, per-course progress rows
    #[default]
    EmployeeProgress,
    /// Aggregated statistics per department
    DepartmentStatistics,
    /// Issued certificates with validity tracking
    Certifications,
    /// Open assignments ordered by urgency
    PendingAssignments,
    /// Global KPI rows with period comparison
    SystemPerformance,
    /// Historical record of completed courses
    CompletionHistory,
    /// Placeholder for user-defined reports
    Custom,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::EmployeeProgress => "employee_progress",
            ReportType::DepartmentStatistics => "department_statistics",
            ReportType::Certifications => "certifications",
            ReportType::PendingAssignments => "pending_assignments",
            ReportType::SystemPerformance => "system_performance",
            ReportType::CompletionHistory => "completion_history",
            ReportType::Custom => "custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "employee_progress" => Some(ReportType::EmployeeProgress),
            "department_statistics" => Some(ReportType::DepartmentStatistics),
            "certifications" => Some(ReportType::Certifications),
            "pending_assignments" => Some(ReportType::PendingAssignments),
            "system_performance" => Some(ReportType::SystemPerformance),
            "completion_history" => Some(ReportType::CompletionHistory),
            "custom" => Some(ReportType::Custom),
            _ => None,
        }
    }
}

/// Display/rendering type of a template field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Percentage,
    Status,
    Badge,
}

/// One column of a report template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportField {
    /// Row-record lookup key
    pub key: String,
    /// Display label
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
    /// Layout hint only; formatters may ignore it
    #[serde(default)]
    pub width: Option<u32>,
}

impl ReportField {
    pub fn new(key: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            field_type,
            sortable: true,
            filterable: false,
            width: None,
        }
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }
}

/// Immutable catalog entry describing one report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub id: String,
    pub report_type: ReportType,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Roles that may see this template in listings
    pub available_for: Vec<Role>,
    /// Ordered field schema; column order everywhere follows this list
    pub fields: Vec<ReportField>,
}

impl ReportTemplate {
    pub fn is_available_for(&self, role: Role) -> bool {
        self.available_for.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_round_trip() {
        for rt in [
            ReportType::EmployeeProgress,
            ReportType::DepartmentStatistics,
            ReportType::Certifications,
            ReportType::PendingAssignments,
            ReportType::SystemPerformance,
            ReportType::CompletionHistory,
            ReportType::Custom,
        ] {
            assert_eq!(ReportType::from_str(rt.as_str()), Some(rt));
        }
        assert_eq!(ReportType::from_str("bogus"), None);
    }

    #[test]
    fn test_field_type_serialization() {
        let json = serde_json::to_string(&FieldType::Percentage).unwrap();
        assert_eq!(json, "\"percentage\"");
    }

    #[test]
    fn test_field_serde_uses_type_key() {
        let field = ReportField::new("score", "Score", FieldType::Number);
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"type\":\"number\""));
    }

    #[test]
    fn test_template_role_gating() {
        let template = ReportTemplate {
            id: "tpl-1".to_string(),
            report_type: ReportType::Certifications,
            name: "Certificates".to_string(),
            description: String::new(),
            icon: "award".to_string(),
            available_for: vec![Role::Admin, Role::Hr],
            fields: vec![],
        };

        assert!(template.is_available_for(Role::Hr));
        assert!(!template.is_available_for(Role::Employee));
    }
}
