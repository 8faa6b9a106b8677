//! Database repository for the read-only query surface.
//!
//! Uses prepared statements throughout. Timestamp comparisons and ordering go
//! through SQLite `datetime()` so RFC 3339 offsets normalize to UTC first.

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Contact, CourseInfo, Enrollment, InvoiceInfo, PaymentInfo, PaymentStatus, StudentInfo,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== CONTACT OPERATIONS ====================

    /// List contacts, newest submission first.
    ///
    /// A non-empty `search` keeps only records whose name, email, course, or
    /// contact id contains the term as a substring (ASCII case-insensitive,
    /// SQLite `LIKE` semantics). An empty `search` returns everything.
    pub async fn list_contacts(&self, search: &str) -> Result<Vec<Contact>, AppError> {
        let pattern = like_pattern(search);

        let rows = sqlx::query(
            r#"SELECT contact_id, name, email, phone, course, message, submitted_at
               FROM contacts
               WHERE (? = ''
                      OR name LIKE ? ESCAPE '\'
                      OR email LIKE ? ESCAPE '\'
                      OR course LIKE ? ESCAPE '\'
                      OR contact_id LIKE ? ESCAPE '\')
               ORDER BY datetime(submitted_at) DESC"#,
        )
        .bind(search)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(contact_from_row).collect())
    }

    /// Total number of contact submissions.
    pub async fn count_contacts(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    /// Number of contacts submitted at or after `cutoff` (RFC 3339).
    pub async fn count_contacts_since(&self, cutoff: &str) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM contacts WHERE datetime(submitted_at) >= datetime(?)",
        )
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("count"))
    }

    // ==================== ENROLLMENT OPERATIONS ====================

    /// List enrollments, newest enrollment date first.
    ///
    /// A non-empty `search` keeps only records whose student name, student
    /// email, course title, or enrollment id contains the term as a substring
    /// (ASCII case-insensitive). A `course` other than empty or `all` further
    /// requires an exact course-title match.
    pub async fn list_enrollments(
        &self,
        search: &str,
        course: &str,
    ) -> Result<Vec<Enrollment>, AppError> {
        let pattern = like_pattern(search);
        let course = if course == "all" { "" } else { course };

        let rows = sqlx::query(
            r#"SELECT enrollment_id,
                      student_name, student_email, student_phone, student_address,
                      course_title, course_level, course_fee, course_duration,
                      course_sessions, course_technique,
                      payment_amount, payment_transaction_id, payment_status, payment_date,
                      invoice_number, invoice_date, enrollment_date
               FROM enrollments
               WHERE (? = ''
                      OR student_name LIKE ? ESCAPE '\'
                      OR student_email LIKE ? ESCAPE '\'
                      OR course_title LIKE ? ESCAPE '\'
                      OR enrollment_id LIKE ? ESCAPE '\')
                 AND (? = '' OR course_title = ?)
               ORDER BY datetime(enrollment_date) DESC"#,
        )
        .bind(search)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(course)
        .bind(course)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(enrollment_from_row).collect())
    }

    /// Total number of enrollments.
    pub async fn count_enrollments(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM enrollments")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    /// Number of enrollments dated at or after `cutoff` (RFC 3339).
    pub async fn count_enrollments_since(&self, cutoff: &str) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM enrollments WHERE datetime(enrollment_date) >= datetime(?)",
        )
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("count"))
    }

    /// Distinct course titles across all enrollments, sorted.
    pub async fn list_course_titles(&self) -> Result<Vec<String>, AppError> {
        let rows =
            sqlx::query("SELECT DISTINCT course_title FROM enrollments ORDER BY course_title")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(|row| row.get("course_title")).collect())
    }

    /// All enrollments whose payment succeeded. Input set for revenue sums.
    pub async fn list_successful_enrollments(&self) -> Result<Vec<Enrollment>, AppError> {
        let rows = sqlx::query(
            r#"SELECT enrollment_id,
                      student_name, student_email, student_phone, student_address,
                      course_title, course_level, course_fee, course_duration,
                      course_sessions, course_technique,
                      payment_amount, payment_transaction_id, payment_status, payment_date,
                      invoice_number, invoice_date, enrollment_date
               FROM enrollments
               WHERE payment_status = ?"#,
        )
        .bind(PaymentStatus::Success.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(enrollment_from_row).collect())
    }
}

/// Build a `LIKE` pattern that matches the term as a literal substring.
///
/// `%`, `_`, and the escape character itself are escaped so user input can
/// never act as a wildcard.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

// Helper functions for row conversion

fn contact_from_row(row: &sqlx::sqlite::SqliteRow) -> Contact {
    Contact {
        contact_id: row.get("contact_id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        course: row.get("course"),
        message: row.get("message"),
        submitted_at: row.get("submitted_at"),
    }
}

fn enrollment_from_row(row: &sqlx::sqlite::SqliteRow) -> Enrollment {
    let status: String = row.get("payment_status");

    Enrollment {
        enrollment_id: row.get("enrollment_id"),
        student_info: StudentInfo {
            name: row.get("student_name"),
            email: row.get("student_email"),
            phone: row.get("student_phone"),
            address: row.get("student_address"),
        },
        course_info: CourseInfo {
            title: row.get("course_title"),
            level: row.get("course_level"),
            fee: row.get("course_fee"),
            duration: row.get("course_duration"),
            sessions: row.get("course_sessions"),
            technique: row.get("course_technique"),
        },
        payment_info: PaymentInfo {
            amount: row.get("payment_amount"),
            transaction_id: row.get("payment_transaction_id"),
            // Column is CHECK-constrained; failed is the conservative fallback.
            payment_status: PaymentStatus::from_str(&status).unwrap_or(PaymentStatus::Failed),
            payment_date: row.get("payment_date"),
        },
        invoice_info: InvoiceInfo {
            invoice_number: row.get("invoice_number"),
            invoice_date: row.get("invoice_date"),
            enrollment_date: row.get("enrollment_date"),
        },
    }
}
