use serde::{Deserialize, Serialize};

/// Read-only dashboard statistic from the `department_stats` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentStat {
    pub id: String,
    pub title: String,
    pub value: i64,
    /// Symbolic icon name resolved by the icon resolver.
    pub icon: String,
    /// Accent color token used by the stat card.
    pub color: String,
    /// Trend caption, e.g. "+12%".
    pub increase: String,
}
