//! Card and chart selection for a computed dashboard.

use crate::models::dashboard::{ActivityItem, DashboardLayout, DashboardStats, PieChart, StatCard};
use crate::models::profile::Role;

/// Static activity feed. Not data-driven.
const RECENT_ACTIVITY: [ActivityItem; 3] = [
    ActivityItem {
        title: "Experiment submitted",
        detail: "A new experiment report is awaiting review",
        when: "2 hours ago",
    },
    ActivityItem {
        title: "Viva completed",
        detail: "A viva session was recorded",
        when: "5 hours ago",
    },
    ActivityItem {
        title: "New experiment published",
        detail: "An experiment was added to the lab schedule",
        when: "1 day ago",
    },
];

fn cards(role: Role, stats: &DashboardStats) -> Vec<StatCard> {
    match role {
        Role::Faculty => vec![
            StatCard {
                title: "Total Students",
                value: stats.total_students,
                icon: "users",
            },
            StatCard {
                title: "Total Experiments",
                value: stats.total_experiments,
                icon: "flask",
            },
            StatCard {
                title: "Completed Experiments",
                value: stats.completed_experiments,
                icon: "check-circle",
            },
            StatCard {
                title: "Viva Attempts",
                value: stats.viva_attempts,
                icon: "mic",
            },
        ],
        Role::Student => vec![
            StatCard {
                title: "Experiments Completed",
                value: stats.completed_experiments,
                icon: "check-circle",
            },
            StatCard {
                title: "Total Experiments",
                value: stats.total_experiments,
                icon: "flask",
            },
            StatCard {
                title: "Viva Attempts",
                value: stats.viva_attempts,
                icon: "mic",
            },
            StatCard {
                title: "Experiments Remaining",
                value: stats
                    .total_experiments
                    .saturating_sub(stats.completed_experiments),
                icon: "clock",
            },
        ],
    }
}

fn charts(role: Role, stats: &DashboardStats) -> Vec<PieChart> {
    let mut charts = Vec::with_capacity(3);
    if role == Role::Faculty && !stats.section_breakdown.is_empty() {
        charts.push(PieChart {
            title: "Section Distribution",
            slices: stats.section_breakdown.clone(),
        });
    }
    charts.push(PieChart {
        title: "Experiment Progress",
        slices: stats.experiment_progress.clone(),
    });
    charts.push(PieChart {
        title: "Viva Progress",
        slices: stats.viva_progress.clone(),
    });
    charts
}

/// Assemble the dashboard for a role.
pub fn build(role: Role, stats: DashboardStats) -> DashboardLayout {
    DashboardLayout {
        role,
        cards: cards(role, &stats),
        charts: charts(role, &stats),
        recent_activity: RECENT_ACTIVITY.to_vec(),
        stats,
    }
}
