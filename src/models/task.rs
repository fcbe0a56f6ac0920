use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Priority of an assigned task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low Priority",
            TaskPriority::Medium => "Medium Priority",
            TaskPriority::High => "High Priority",
        }
    }
}

/// Task record as stored in the `tasks` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub status: String,
    /// Opaque employee identifier, resolved server-side.
    pub assigned_to: String,
}

/// Writable task fields for create/update calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub status: String,
    pub assigned_to: String,
}
