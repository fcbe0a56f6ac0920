use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status badge attached to a feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Pending,
    Completed,
    Critical,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::Completed => "completed",
            ActivityStatus::Critical => "critical",
        }
    }

    /// Icon name shown next to a feed entry with this status.
    pub fn icon(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "clock",
            ActivityStatus::Completed => "trending-up",
            ActivityStatus::Critical => "alert-circle",
        }
    }
}

/// Log-like feed entry in the `activities` collection.
///
/// Activities are derived from task/leave creation, never updated, only
/// appended and re-listed newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    /// Name of the employee the entry is about.
    pub user: String,
    /// Human-readable description of what happened.
    pub action: String,
    pub time: DateTime<Utc>,
    pub status: ActivityStatus,
    pub activity_type: String,
}

/// Writable activity fields for create calls.
///
/// `time` may be left unset; the service stamps the current instant then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub user: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    pub status: ActivityStatus,
    pub activity_type: String,
}
