//! Enrollment model with nested student, course, payment, and invoice data.

use serde::{Deserialize, Serialize};

/// Payment outcome reported by the upstream payment pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Pending,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Success => "success",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "success" => Some(PaymentStatus::Success),
            "pending" => Some(PaymentStatus::Pending),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }

    /// Only successful payments count toward revenue.
    pub fn is_success(&self) -> bool {
        matches!(self, PaymentStatus::Success)
    }
}

/// Student contact details captured at enrollment time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Course attributes frozen into the enrollment at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInfo {
    pub title: String,
    pub level: String,
    /// Display fee as advertised (free text, e.g. "5000 INR").
    pub fee: String,
    pub duration: String,
    pub sessions: String,
    pub technique: String,
}

/// Payment details for the enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    /// Amount actually charged.
    pub amount: f64,
    pub transaction_id: String,
    pub payment_status: PaymentStatus,
    /// RFC 3339 timestamp of the payment.
    pub payment_date: String,
}

/// Invoice bookkeeping attached to the enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceInfo {
    pub invoice_number: String,
    pub invoice_date: String,
    /// RFC 3339 timestamp; lists sort on this field.
    pub enrollment_date: String,
}

/// A paid course registration. Created by the checkout flow, read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub enrollment_id: String,
    pub student_info: StudentInfo,
    pub course_info: CourseInfo,
    pub payment_info: PaymentInfo,
    pub invoice_info: InvoiceInfo,
}
