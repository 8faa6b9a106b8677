//! Dashboard API endpoint.

use axum::extract::State;
use chrono::Utc;

use super::{success, ApiResult};
use crate::models::DashboardStats;
use crate::stats;
use crate::AppState;

/// GET /api/dashboard - Aggregate counts, revenue totals, and revenue windows.
///
/// Everything is recomputed from the database on each request; the window
/// anchors move with the request time.
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let now = Utc::now();
    let cutoff = stats::recent_cutoff(now).to_rfc3339();

    let total_contacts = state.repo.count_contacts().await?;
    let total_enrollments = state.repo.count_enrollments().await?;
    let recent_contacts = state.repo.count_contacts_since(&cutoff).await?;
    let recent_enrollments = state.repo.count_enrollments_since(&cutoff).await?;

    let paid = state.repo.list_successful_enrollments().await?;

    success(DashboardStats {
        total_contacts,
        total_enrollments,
        total_revenue: stats::total_revenue(&paid),
        recent_contacts,
        recent_enrollments,
        recent_revenue: stats::recent_revenue(now, &paid),
        revenue_windows: stats::revenue_windows(now, &paid),
    })
}
