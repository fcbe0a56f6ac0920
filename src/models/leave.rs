use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Vacation,
    Sick,
    Personal,
    Maternity,
    Bereavement,
}

impl LeaveType {
    pub const ALL: [LeaveType; 5] = [
        LeaveType::Vacation,
        LeaveType::Sick,
        LeaveType::Personal,
        LeaveType::Maternity,
        LeaveType::Bereavement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "vacation",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
            LeaveType::Maternity => "maternity",
            LeaveType::Bereavement => "bereavement",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "vacation" => Some(LeaveType::Vacation),
            "sick" => Some(LeaveType::Sick),
            "personal" => Some(LeaveType::Personal),
            "maternity" => Some(LeaveType::Maternity),
            "bereavement" => Some(LeaveType::Bereavement),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "Vacation Leave",
            LeaveType::Sick => "Sick Leave",
            LeaveType::Personal => "Personal Leave",
            LeaveType::Maternity => "Maternity/Paternity Leave",
            LeaveType::Bereavement => "Bereavement Leave",
        }
    }
}

/// Leave request record as stored in the `leave_requests` collection.
///
/// `end_date >= start_date` is enforced client-side before submission; the
/// store does not guarantee it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: String,
    /// Opaque employee identifier, resolved server-side.
    pub employee: String,
}

/// Writable leave-request fields for create calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestDraft {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: String,
    pub employee: String,
}
