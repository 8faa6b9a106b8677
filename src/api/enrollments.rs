//! Enrollment API endpoints.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use super::{csv_attachment, success, ApiResult};
use crate::errors::AppError;
use crate::export;
use crate::models::Enrollment;
use crate::AppState;

/// Enrollment list query parameters.
#[derive(Debug, Deserialize)]
pub struct EnrollmentQuery {
    /// Substring to match against student name, email, course title, or id.
    #[serde(default)]
    pub search: String,
    /// Exact course title to keep. Empty or `all` disables the filter.
    #[serde(default)]
    pub course: String,
}

/// GET /api/enrollments - List enrollments, newest first.
pub async fn list_enrollments(
    State(state): State<AppState>,
    Query(params): Query<EnrollmentQuery>,
) -> ApiResult<Vec<Enrollment>> {
    let enrollments = state
        .repo
        .list_enrollments(&params.search, &params.course)
        .await?;
    success(enrollments)
}

/// GET /api/enrollments/courses - Distinct course titles for the filter dropdown.
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let courses = state.repo.list_course_titles().await?;
    success(courses)
}

/// GET /api/enrollments/export - Download the filtered enrollment list as CSV.
pub async fn export_enrollments(
    State(state): State<AppState>,
    Query(params): Query<EnrollmentQuery>,
) -> Result<Response, AppError> {
    let enrollments = state
        .repo
        .list_enrollments(&params.search, &params.course)
        .await?;
    let body = export::enrollments_csv(&enrollments)?;

    tracing::info!("Exporting {} enrollment rows", enrollments.len());
    Ok(csv_attachment("enrollments", body))
}
