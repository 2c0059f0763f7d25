//! Template catalog
//!
//! The catalog is a declarative, built-once table of report definitions.
//! Adding a report type is a data addition here plus one generator function;
//! nothing else changes. Listing order is declaration order and is never
//! resorted.

use crate::models::{FieldType, ReportField, ReportTemplate, ReportType, Role};

/// Static registry of report templates
#[derive(Debug)]
pub struct TemplateCatalog {
    templates: Vec<ReportTemplate>,
}

impl TemplateCatalog {
    /// Build the catalog with the platform's standard templates.
    pub fn new() -> Self {
        Self {
            templates: vec![
                employee_progress(),
                department_statistics(),
                certifications(),
                pending_assignments(),
                system_performance(),
                completion_history(),
                custom_placeholder(),
            ],
        }
    }

    /// Templates visible to `role`, in declaration order.
    ///
    /// A role with no templates yields an empty list, not an error.
    pub fn templates_for_role(&self, role: Role) -> Vec<&ReportTemplate> {
        self.templates
            .iter()
            .filter(|t| t.is_available_for(role))
            .collect()
    }

    /// Look up the template for a report type.
    pub fn template_for_type(&self, report_type: ReportType) -> Option<&ReportTemplate> {
        self.templates.iter().find(|t| t.report_type == report_type)
    }

    pub fn all(&self) -> &[ReportTemplate] {
        &self.templates
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn admin_hr() -> Vec<Role> {
    vec![Role::Admin, Role::Hr]
}

fn employee_progress() -> ReportTemplate {
    ReportTemplate {
        id: "tpl-employee-progress".to_string(),
        report_type: ReportType::EmployeeProgress,
        name: "Employee Progress".to_string(),
        description: "Per-learner progress on every assigned course".to_string(),
        icon: "trending-up".to_string(),
        available_for: admin_hr(),
        fields: vec![
            ReportField::new("employee_name", "Employee", FieldType::Text)
                .filterable()
                .width(160),
            ReportField::new("department", "Department", FieldType::Text)
                .filterable()
                .width(120),
            ReportField::new("course_name", "Course", FieldType::Text)
                .filterable()
                .width(180),
            ReportField::new("category", "Category", FieldType::Text).width(110),
            ReportField::new("progress", "Progress", FieldType::Percentage).width(90),
            ReportField::new("status", "Status", FieldType::Status)
                .filterable()
                .width(100),
            ReportField::new("days_elapsed", "Days Elapsed", FieldType::Number).width(90),
        ],
    }
}

fn department_statistics() -> ReportTemplate {
    ReportTemplate {
        id: "tpl-department-statistics".to_string(),
        report_type: ReportType::DepartmentStatistics,
        name: "Department Statistics".to_string(),
        description: "Training metrics aggregated per department".to_string(),
        icon: "bar-chart".to_string(),
        available_for: admin_hr(),
        fields: vec![
            ReportField::new("department", "Department", FieldType::Text)
                .filterable()
                .width(140),
            ReportField::new("total_employees", "Employees", FieldType::Number).width(90),
            ReportField::new("active_employees", "Active", FieldType::Number).width(80),
            ReportField::new("courses_assigned", "Assigned", FieldType::Number).width(90),
            ReportField::new("courses_completed", "Completed", FieldType::Number).width(90),
            ReportField::new("avg_progress", "Avg Progress", FieldType::Percentage).width(100),
            ReportField::new("completion_rate", "Completion Rate", FieldType::Percentage)
                .width(110),
            ReportField::new("on_time_rate", "On-Time Rate", FieldType::Percentage).width(100),
        ],
    }
}

fn certifications() -> ReportTemplate {
    ReportTemplate {
        id: "tpl-certifications".to_string(),
        report_type: ReportType::Certifications,
        name: "Certifications".to_string(),
        description: "Issued certificates with validity tracking".to_string(),
        icon: "award".to_string(),
        available_for: admin_hr(),
        fields: vec![
            ReportField::new("employee_name", "Employee", FieldType::Text)
                .filterable()
                .width(160),
            ReportField::new("course_name", "Course", FieldType::Text)
                .filterable()
                .width(180),
            ReportField::new("completion_date", "Completed", FieldType::Date).width(100),
            ReportField::new("certificate_id", "Certificate", FieldType::Badge)
                .fixed()
                .width(170),
            ReportField::new("score", "Score", FieldType::Number).width(70),
            ReportField::new("valid_until", "Valid Until", FieldType::Date).width(100),
            ReportField::new("status", "Status", FieldType::Status)
                .filterable()
                .width(120),
        ],
    }
}

fn pending_assignments() -> ReportTemplate {
    ReportTemplate {
        id: "tpl-pending-assignments".to_string(),
        report_type: ReportType::PendingAssignments,
        name: "Pending Assignments".to_string(),
        description: "Open assignments ordered by urgency".to_string(),
        icon: "clock".to_string(),
        available_for: admin_hr(),
        fields: vec![
            ReportField::new("employee_name", "Employee", FieldType::Text)
                .filterable()
                .width(160),
            ReportField::new("department", "Department", FieldType::Text)
                .filterable()
                .width(120),
            ReportField::new("course_name", "Course", FieldType::Text)
                .filterable()
                .width(180),
            ReportField::new("assigned_at", "Assigned", FieldType::Date).width(100),
            ReportField::new("due_date", "Due", FieldType::Date).width(100),
            ReportField::new("days_remaining", "Days Left", FieldType::Number).width(80),
            ReportField::new("progress", "Progress", FieldType::Percentage).width(90),
            ReportField::new("priority", "Priority", FieldType::Status)
                .filterable()
                .width(90),
        ],
    }
}

fn system_performance() -> ReportTemplate {
    ReportTemplate {
        id: "tpl-system-performance".to_string(),
        report_type: ReportType::SystemPerformance,
        name: "System Performance".to_string(),
        description: "Global training KPIs with prior-period comparison".to_string(),
        icon: "activity".to_string(),
        // System-wide KPIs are an admin concern
        available_for: vec![Role::Admin],
        fields: vec![
            ReportField::new("metric", "Metric", FieldType::Text).fixed().width(180),
            ReportField::new("current_value", "Current", FieldType::Number).width(90),
            ReportField::new("previous_value", "Previous", FieldType::Number).width(90),
            ReportField::new("change_percent", "Change", FieldType::Percentage).width(90),
            ReportField::new("target", "Target", FieldType::Number).width(80),
            ReportField::new("achievement", "Achievement", FieldType::Percentage).width(100),
        ],
    }
}

fn completion_history() -> ReportTemplate {
    ReportTemplate {
        id: "tpl-completion-history".to_string(),
        report_type: ReportType::CompletionHistory,
        name: "Completion History".to_string(),
        description: "Historical record of completed courses".to_string(),
        icon: "check-circle".to_string(),
        available_for: admin_hr(),
        fields: vec![
            ReportField::new("employee_name", "Employee", FieldType::Text)
                .filterable()
                .width(160),
            ReportField::new("course_name", "Course", FieldType::Text)
                .filterable()
                .width(180),
            ReportField::new("completed_at", "Completed", FieldType::Date).width(100),
            ReportField::new("duration_days", "Duration (days)", FieldType::Number).width(100),
            ReportField::new("score", "Score", FieldType::Number).width(70),
            ReportField::new("attempts", "Attempts", FieldType::Number).width(80),
            ReportField::new("certificate_issued", "Certificate", FieldType::Badge).width(90),
        ],
    }
}

// Placeholder entry so every ReportType resolves to a template; generates
// no rows and is offered to no role.
fn custom_placeholder() -> ReportTemplate {
    ReportTemplate {
        id: "tpl-custom".to_string(),
        report_type: ReportType::Custom,
        name: "Custom Report".to_string(),
        description: "User-defined report".to_string(),
        icon: "file-text".to_string(),
        available_for: vec![],
        fields: vec![],
    }
}
