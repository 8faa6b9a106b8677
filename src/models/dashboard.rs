//! Derived dashboard statistics. Never persisted; recomputed on every request.

use serde::{Deserialize, Serialize};

/// Revenue from successful payments bucketed into overlapping calendar
/// windows anchored at the request time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueWindows {
    pub today: f64,
    pub this_week: f64,
    pub this_month: f64,
    pub this_year: f64,
}

/// Aggregate counters and revenue sums shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_contacts: i64,
    pub total_enrollments: i64,
    pub total_revenue: f64,
    pub recent_contacts: i64,
    pub recent_enrollments: i64,
    pub recent_revenue: f64,
    pub revenue_windows: RevenueWindows,
}
