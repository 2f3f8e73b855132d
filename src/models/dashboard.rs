//! Dashboard view model: stat counts and pie-chart slices.

use serde::{Deserialize, Serialize};

use crate::models::profile::Role;

/// One pie-chart slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub count: u64,
    pub color: String,
}

impl BreakdownEntry {
    pub fn new(label: impl Into<String>, count: u64, color: &str) -> Self {
        Self {
            label: label.into(),
            count,
            color: color.to_string(),
        }
    }
}

/// Aggregated counts for one dashboard render. The default is the
/// all-zero state shown before the first successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_experiments: u64,
    pub completed_experiments: u64,
    pub viva_attempts: u64,
    pub section_breakdown: Vec<BreakdownEntry>,
    pub experiment_progress: Vec<BreakdownEntry>,
    pub viva_progress: Vec<BreakdownEntry>,
}

/// Numeric stat card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: u64,
    pub icon: &'static str,
}

/// Pie chart built from a breakdown list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieChart {
    pub title: &'static str,
    pub slices: Vec<BreakdownEntry>,
}

/// Entry in the static "recent activity" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub title: &'static str,
    pub detail: &'static str,
    pub when: &'static str,
}

/// Everything the frontend needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayout {
    pub role: Role,
    pub stats: DashboardStats,
    pub cards: Vec<StatCard>,
    pub charts: Vec<PieChart>,
    pub recent_activity: Vec<ActivityItem>,
}
