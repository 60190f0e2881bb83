use chrono::NaiveDate;

// Threshold for the overdue flag. Strictly greater-than, so an invoice aged
// exactly 30 days is not flagged even though it already sits in the
// 31-60 bucket. This matches the behaviour of the original report.
const OVERDUE_AFTER_DAYS: i64 = 30;

/// Whole calendar days between `invoice_date` and `as_of`.
///
/// Day granularity only; time of day never enters the computation. Negative
/// when the invoice is dated in the future.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use aging_core::calculations::age_in_days;
///
/// let invoiced = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(age_in_days(invoiced, as_of), 60);
/// assert_eq!(age_in_days(as_of, invoiced), -60);
/// ```
pub fn age_in_days(invoice_date: NaiveDate, as_of: NaiveDate) -> i64 {
    (as_of - invoice_date).num_days()
}

/// Whether an invoice of the given age is flagged overdue.
///
/// # Examples
///
/// ```
/// use aging_core::calculations::is_overdue;
///
/// assert!(!is_overdue(30));
/// assert!(is_overdue(31));
/// ```
pub fn is_overdue(age_days: i64) -> bool {
    age_days > OVERDUE_AFTER_DAYS
}
