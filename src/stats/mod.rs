//! Revenue and activity aggregation for the dashboard.
//!
//! All window math runs in UTC. Callers pass `now` explicitly so the
//! aggregation stays deterministic under test.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

use crate::models::{Enrollment, RevenueWindows};

/// Days covered by the "recent activity" counters.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Cutoff timestamp for recent-activity counts.
pub fn recent_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(RECENT_WINDOW_DAYS)
}

/// Sum of successful payment amounts across the given enrollments.
///
/// No date parsing is involved, so successful records with malformed payment
/// dates still count here.
pub fn total_revenue(enrollments: &[Enrollment]) -> f64 {
    enrollments
        .iter()
        .filter(|enrollment| enrollment.payment_info.payment_status.is_success())
        .map(|enrollment| enrollment.payment_info.amount)
        .sum()
}

/// Sum of successful payment amounts dated within the recent window.
pub fn recent_revenue(now: DateTime<Utc>, enrollments: &[Enrollment]) -> f64 {
    let cutoff = recent_cutoff(now);

    enrollments
        .iter()
        .filter(|enrollment| enrollment.payment_info.payment_status.is_success())
        .filter_map(|enrollment| {
            parse_timestamp(&enrollment.payment_info.payment_date)
                .map(|paid_at| (paid_at, enrollment.payment_info.amount))
        })
        .filter(|(paid_at, _)| *paid_at >= cutoff)
        .map(|(_, amount)| amount)
        .sum()
}

/// Bucket successful payment amounts into the four calendar windows ending
/// at `now`.
///
/// A single payment lands in every window whose start it falls on or after,
/// so the buckets overlap by construction. Only `today` carries an upper
/// bound. Payments whose date fails to parse are skipped.
pub fn revenue_windows(now: DateTime<Utc>, enrollments: &[Enrollment]) -> RevenueWindows {
    let day = day_start(now);
    let day_end = day + Duration::days(1);
    let week = week_start(now);
    let month = month_start(now);
    let year = year_start(now);

    let mut windows = RevenueWindows::default();
    for enrollment in enrollments {
        if !enrollment.payment_info.payment_status.is_success() {
            continue;
        }
        let Some(paid_at) = parse_timestamp(&enrollment.payment_info.payment_date) else {
            continue;
        };
        let amount = enrollment.payment_info.amount;

        if paid_at >= day && paid_at < day_end {
            windows.today += amount;
        }
        if paid_at >= week {
            windows.this_week += amount;
        }
        if paid_at >= month {
            windows.this_month += amount;
        }
        if paid_at >= year {
            windows.this_year += amount;
        }
    }
    windows
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

fn day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Midnight of the most recent Sunday. When `now` is a Sunday this is the
/// start of the current day.
fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    day_start(now) - Duration::days(now.weekday().num_days_from_sunday() as i64)
}

fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    day_start(now) - Duration::days((now.day() - 1) as i64)
}

fn year_start(now: DateTime<Utc>) -> DateTime<Utc> {
    day_start(now) - Duration::days((now.ordinal() - 1) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseInfo, InvoiceInfo, PaymentInfo, PaymentStatus, StudentInfo};

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn paid_enrollment(amount: f64, payment_date: &str) -> Enrollment {
        Enrollment {
            enrollment_id: "ENR-TEST".to_string(),
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
                amount,
                transaction_id: "TXN-TEST".to_string(),
                payment_status: PaymentStatus::Success,
                payment_date: payment_date.to_string(),
            },
            invoice_info: InvoiceInfo {
                invoice_number: "INV-TEST".to_string(),
                invoice_date: payment_date.to_string(),
                enrollment_date: payment_date.to_string(),
            },
        }
    }

    fn enrollment_with_status(
        amount: f64,
        payment_date: &str,
        status: PaymentStatus,
    ) -> Enrollment {
        let mut enrollment = paid_enrollment(amount, payment_date);
        enrollment.payment_info.payment_status = status;
        enrollment
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-03-08 is a Friday; the week began on Sunday the 3rd.
        assert_eq!(week_start(at("2024-03-08T12:00:00Z")), at("2024-03-03T00:00:00Z"));
    }

    #[test]
    fn test_week_start_on_a_sunday_is_that_day() {
        assert_eq!(week_start(at("2024-03-03T10:30:00Z")), at("2024-03-03T00:00:00Z"));
    }

    #[test]
    fn test_month_and_year_starts() {
        let now = at("2024-03-08T12:00:00Z");
        assert_eq!(month_start(now), at("2024-03-01T00:00:00Z"));
        assert_eq!(year_start(now), at("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_windows_overlap_by_construction() {
        // One payment today, one 10 days back, one 40 days back.
        let now = at("2024-03-08T12:00:00Z");
        let enrollments = vec![
            paid_enrollment(100.0, "2024-03-08T09:00:00Z"),
            paid_enrollment(200.0, "2024-02-27T09:00:00Z"),
            paid_enrollment(300.0, "2024-01-28T09:00:00Z"),
        ];

        let windows = revenue_windows(now, &enrollments);
        assert_eq!(windows.today, 100.0);
        assert_eq!(windows.this_week, 100.0);
        assert_eq!(windows.this_month, 100.0);
        assert_eq!(windows.this_year, 600.0);
    }

    #[test]
    fn test_payment_at_window_start_is_included() {
        let now = at("2024-03-08T12:00:00Z");
        let enrollments = vec![paid_enrollment(50.0, "2024-03-03T00:00:00Z")];

        let windows = revenue_windows(now, &enrollments);
        assert_eq!(windows.today, 0.0);
        assert_eq!(windows.this_week, 50.0);
        assert_eq!(windows.this_month, 50.0);
        assert_eq!(windows.this_year, 50.0);
    }

    #[test]
    fn test_today_excludes_the_next_day() {
        let now = at("2024-03-08T12:00:00Z");
        let enrollments = vec![paid_enrollment(75.0, "2024-03-09T00:00:00Z")];

        let windows = revenue_windows(now, &enrollments);
        assert_eq!(windows.today, 0.0);
        assert_eq!(windows.this_week, 75.0);
    }

    #[test]
    fn test_previous_year_is_excluded() {
        let now = at("2024-03-08T12:00:00Z");
        let enrollments = vec![paid_enrollment(500.0, "2023-12-31T23:59:59Z")];

        let windows = revenue_windows(now, &enrollments);
        assert_eq!(windows.this_year, 0.0);
    }

    #[test]
    fn test_offsets_normalize_to_utc() {
        // 02:00 at +05:00 is 21:00 UTC the previous day.
        let now = at("2024-03-08T12:00:00Z");
        let enrollments = vec![paid_enrollment(80.0, "2024-03-08T02:00:00+05:00")];

        let windows = revenue_windows(now, &enrollments);
        assert_eq!(windows.today, 0.0);
        assert_eq!(windows.this_week, 80.0);
    }

    #[test]
    fn test_malformed_payment_date_is_skipped() {
        let now = at("2024-03-08T12:00:00Z");
        let enrollments = vec![
            paid_enrollment(100.0, "not a date"),
            paid_enrollment(40.0, "2024-03-08T09:00:00Z"),
        ];

        let windows = revenue_windows(now, &enrollments);
        assert_eq!(windows.today, 40.0);
        assert_eq!(windows.this_year, 40.0);

        // The plain total has no date dependency.
        assert_eq!(total_revenue(&enrollments), 140.0);
    }

    #[test]
    fn test_only_successful_payments_count() {
        let now = at("2024-03-08T12:00:00Z");
        let enrollments = vec![
            paid_enrollment(100.0, "2024-03-08T09:00:00Z"),
            enrollment_with_status(200.0, "2024-03-08T09:00:00Z", PaymentStatus::Pending),
            enrollment_with_status(300.0, "2024-03-08T09:00:00Z", PaymentStatus::Failed),
        ];

        assert_eq!(total_revenue(&enrollments), 100.0);
        assert_eq!(recent_revenue(now, &enrollments), 100.0);
        assert_eq!(revenue_windows(now, &enrollments).today, 100.0);
    }

    #[test]
    fn test_recent_revenue_respects_cutoff() {
        let now = at("2024-03-08T12:00:00Z");
        let enrollments = vec![
            paid_enrollment(100.0, "2024-03-05T12:00:00Z"),
            paid_enrollment(200.0, "2024-02-26T12:00:00Z"),
        ];

        assert_eq!(recent_revenue(now, &enrollments), 100.0);
    }

    #[test]
    fn test_recent_cutoff_is_seven_days_back() {
        let now = at("2024-03-08T12:00:00Z");
        assert_eq!(recent_cutoff(now), at("2024-03-01T12:00:00Z"));
    }
}
