//! CSV export of the contact and enrollment lists.
//!
//! Columns carry the human-facing labels used in the admin spreadsheets.
//! Timestamps render in UTC; values that fail to parse pass through raw so
//! no row is ever dropped from an export.

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::{Contact, Enrollment};

const CONTACT_HEADERS: [&str; 7] = [
    "Contact ID",
    "Name",
    "Email",
    "Phone",
    "Course",
    "Message",
    "Submitted At",
];

const ENROLLMENT_HEADERS: [&str; 14] = [
    "Enrollment ID",
    "Student Name",
    "Student Email",
    "Student Phone",
    "Student Address",
    "Course Title",
    "Course Level",
    "Course Fee",
    "Course Duration",
    "Payment Amount",
    "Payment Status",
    "Payment Date",
    "Invoice Number",
    "Enrollment Date",
];

/// Attachment filename for an export generated on the given day.
pub fn export_filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}.csv", prefix, now.format("%Y-%m-%d"))
}

/// Serialize contacts into a CSV document, one row per contact.
pub fn contacts_csv(contacts: &[Contact]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CONTACT_HEADERS)?;

    for contact in contacts {
        let submitted = format_timestamp(&contact.submitted_at);
        writer.write_record([
            contact.contact_id.as_str(),
            contact.name.as_str(),
            contact.email.as_str(),
            contact.phone.as_str(),
            contact.course.as_str(),
            contact.message.as_str(),
            submitted.as_str(),
        ])?;
    }

    finish(writer)
}

/// Serialize enrollments into a CSV document, one row per enrollment.
pub fn enrollments_csv(enrollments: &[Enrollment]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(ENROLLMENT_HEADERS)?;

    for enrollment in enrollments {
        let amount = enrollment.payment_info.amount.to_string();
        let payment_date = format_date(&enrollment.payment_info.payment_date);
        let enrollment_date = format_date(&enrollment.invoice_info.enrollment_date);
        writer.write_record([
            enrollment.enrollment_id.as_str(),
            enrollment.student_info.name.as_str(),
            enrollment.student_info.email.as_str(),
            enrollment.student_info.phone.as_str(),
            enrollment.student_info.address.as_str(),
            enrollment.course_info.title.as_str(),
            enrollment.course_info.level.as_str(),
            enrollment.course_info.fee.as_str(),
            enrollment.course_info.duration.as_str(),
            amount.as_str(),
            enrollment.payment_info.payment_status.as_str(),
            payment_date.as_str(),
            enrollment.invoice_info.invoice_number.as_str(),
            enrollment_date.as_str(),
        ])?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, AppError> {
    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to finalize export: {}", e)))
}

/// Render an RFC 3339 timestamp as `YYYY-MM-DD HH:MM:SS` in UTC.
fn format_timestamp(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => ts
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => value.to_string(),
    }
}

/// Render an RFC 3339 timestamp as `YYYY-MM-DD` in UTC.
fn format_date(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => ts.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseInfo, InvoiceInfo, PaymentInfo, PaymentStatus, StudentInfo};

    fn sample_contact() -> Contact {
        Contact {
            contact_id: "CNT-001".to_string(),
            name: "Meera Nair".to_string(),
            email: "meera@example.com".to_string(),
            phone: "555-0199".to_string(),
            course: "Oil Painting".to_string(),
            message: "Do you offer weekend batches?".to_string(),
            submitted_at: "2024-03-08T09:30:00Z".to_string(),
        }
    }

    fn sample_enrollment() -> Enrollment {
        Enrollment {
            enrollment_id: "ENR-001".to_string(),
            student_info: StudentInfo {
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
                phone: "555-0100".to_string(),
                address: "12 Lake View".to_string(),
            },
            course_info: CourseInfo {
                title: "Watercolor Basics".to_string(),
                level: "Beginner".to_string(),
                fee: "4500".to_string(),
                duration: "6 weeks".to_string(),
                sessions: "12".to_string(),
                technique: "Wet on wet".to_string(),
            },
            payment_info: PaymentInfo {
                amount: 4500.0,
                transaction_id: "TXN-001".to_string(),
                payment_status: PaymentStatus::Success,
                payment_date: "2024-03-05T14:20:00Z".to_string(),
            },
            invoice_info: InvoiceInfo {
                invoice_number: "INV-001".to_string(),
                invoice_date: "2024-03-05T14:20:00Z".to_string(),
                enrollment_date: "2024-03-05T14:21:00Z".to_string(),
            },
        }
    }

    fn lines(bytes: Vec<u8>) -> Vec<String> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| line.to_string())
            .collect()
    }

    #[test]
    fn test_contact_export_uses_display_labels() {
        let rows = lines(contacts_csv(&[sample_contact()]).unwrap());
        assert_eq!(rows[0], "Contact ID,Name,Email,Phone,Course,Message,Submitted At");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_contact_timestamp_renders_in_utc() {
        let mut contact = sample_contact();
        contact.submitted_at = "2024-03-08T02:00:00+05:00".to_string();

        let rows = lines(contacts_csv(&[contact]).unwrap());
        assert!(rows[1].ends_with("2024-03-07 21:00:00"));
    }

    #[test]
    fn test_malformed_timestamp_passes_through_raw() {
        let mut contact = sample_contact();
        contact.submitted_at = "last tuesday".to_string();

        let rows = lines(contacts_csv(&[contact]).unwrap());
        assert!(rows[1].ends_with("last tuesday"));
    }

    #[test]
    fn test_enrollment_export_uses_display_labels() {
        let rows = lines(enrollments_csv(&[sample_enrollment()]).unwrap());
        assert_eq!(
            rows[0],
            "Enrollment ID,Student Name,Student Email,Student Phone,Student Address,\
             Course Title,Course Level,Course Fee,Course Duration,Payment Amount,\
             Payment Status,Payment Date,Invoice Number,Enrollment Date"
        );
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_enrollment_dates_render_day_only() {
        let rows = lines(enrollments_csv(&[sample_enrollment()]).unwrap());
        let row = &rows[1];
        assert!(row.contains(",2024-03-05,INV-001,2024-03-05"));
        assert!(row.contains(",4500,success,"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut contact = sample_contact();
        contact.message = "Weekends, please".to_string();

        let rows = lines(contacts_csv(&[contact]).unwrap());
        assert!(rows[1].contains("\"Weekends, please\""));
    }

    #[test]
    fn test_export_filename_carries_the_date() {
        let now = DateTime::parse_from_rfc3339("2024-03-08T23:59:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(export_filename("contacts", now), "contacts_2024-03-08.csv");
        assert_eq!(export_filename("enrollments", now), "enrollments_2024-03-08.csv");
    }
}
