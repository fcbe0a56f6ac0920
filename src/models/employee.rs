use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employment status of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    Active,
    OnLeave,
}

impl EmployeeStatus {
    /// Wire value, also used as the form option value.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::OnLeave => "on-leave",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "active" => Some(EmployeeStatus::Active),
            "on-leave" => Some(EmployeeStatus::OnLeave),
            _ => None,
        }
    }

    /// Display label for badges and selects.
    pub fn label(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::OnLeave => "On Leave",
        }
    }
}

/// Employee record as stored in the `employees` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub join_date: NaiveDate,
    pub status: EmployeeStatus,
}

/// Writable employee fields for create/update calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub join_date: NaiveDate,
    pub status: EmployeeStatus,
}

/// Department choices offered by the employee form.
pub const DEPARTMENTS: &[&str] = &[
    "Human Resources",
    "Engineering",
    "Marketing",
    "Finance",
    "Sales",
    "Operations",
    "Customer Support",
    "Research & Development",
];
