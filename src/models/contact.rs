//! Contact model for inquiry submissions shown in the admin console.

use serde::{Deserialize, Serialize};

/// A contact-form submission. Created by the public site, read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub contact_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub message: String,
    /// RFC 3339 submission timestamp; lists sort on this field.
    pub submitted_at: String,
}
