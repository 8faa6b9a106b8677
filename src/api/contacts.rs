//! Contact API endpoints.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use super::{csv_attachment, success, ApiResult};
use crate::errors::AppError;
use crate::export;
use crate::models::Contact;
use crate::AppState;

/// Contact list query parameters.
#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    /// Substring to match against name, email, course, or contact id.
    #[serde(default)]
    pub search: String,
}

/// GET /api/contacts - List contact submissions, newest first.
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(params): Query<ContactQuery>,
) -> ApiResult<Vec<Contact>> {
    let contacts = state.repo.list_contacts(&params.search).await?;
    success(contacts)
}

/// GET /api/contacts/export - Download the filtered contact list as CSV.
pub async fn export_contacts(
    State(state): State<AppState>,
    Query(params): Query<ContactQuery>,
) -> Result<Response, AppError> {
    let contacts = state.repo.list_contacts(&params.search).await?;
    let body = export::contacts_csv(&contacts)?;

    tracing::info!("Exporting {} contact rows", contacts.len());
    Ok(csv_attachment("contacts", body))
}
