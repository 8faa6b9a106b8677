//! Database module for SQLite persistence.
//!
//! SQLite holds the contact and enrollment records written by the upstream
//! submission pipeline. This service only ever reads them.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
///
/// Nested objects from the API shapes flatten into prefixed columns
/// (`studentInfo.name` -> `student_name`). All timestamps are RFC 3339 TEXT.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            contact_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            course TEXT NOT NULL,
            message TEXT NOT NULL DEFAULT '',
            submitted_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS enrollments (
            enrollment_id TEXT PRIMARY KEY,
            student_name TEXT NOT NULL,
            student_email TEXT NOT NULL,
            student_phone TEXT NOT NULL,
            student_address TEXT NOT NULL,
            course_title TEXT NOT NULL,
            course_level TEXT NOT NULL,
            course_fee TEXT NOT NULL,
            course_duration TEXT NOT NULL,
            course_sessions TEXT NOT NULL,
            course_technique TEXT NOT NULL,
            payment_amount REAL NOT NULL,
            payment_transaction_id TEXT NOT NULL,
            payment_status TEXT NOT NULL
                CHECK (payment_status IN ('success', 'pending', 'failed')),
            payment_date TEXT NOT NULL,
            invoice_number TEXT NOT NULL,
            invoice_date TEXT NOT NULL,
            enrollment_date TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_contacts_submitted_at ON contacts(submitted_at);
        CREATE INDEX IF NOT EXISTS idx_enrollments_enrollment_date ON enrollments(enrollment_date);
        CREATE INDEX IF NOT EXISTS idx_enrollments_course_title ON enrollments(course_title);
        CREATE INDEX IF NOT EXISTS idx_enrollments_payment_status ON enrollments(payment_status);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
