//! Display formatting for the presentation shell.
//!
//! The rendering contract is fixed: amounts carry a thousands separator and
//! two decimal places, dates render as `YYYY-MM-DD`, ages as plain day
//! counts. No locale handling.

use chrono::NaiveDate;

/// Format an amount with thousands separators and exactly two decimals.
///
/// # Examples
///
/// ```
/// use aging_core::formatting::format_amount;
///
/// assert_eq!(format_amount(1234.5), "1,234.50");
/// assert_eq!(format_amount(0.0), "0.00");
/// assert_eq!(format_amount(-9876.545), "-9,876.55");
/// ```
pub fn format_amount(value: f64) -> String {
    // Let the standard formatter do the rounding, then regroup the digits.
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed
        .split_once('.')
        .unwrap_or((fixed.as_str(), "00"));

    let grouped = group_thousands(int_part);
    let sign = if value < 0.0 && (value.abs() + 0.005) >= 0.01 {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// Format a monetary amount as a dollar string.
///
/// Negative amounts render as `$-1,234.56`, matching the original report.
///
/// # Examples
///
/// ```
/// use aging_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56), "$1,234.56");
/// assert_eq!(format_currency(-500.0), "$-500.00");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("${}", format_amount(amount))
}

/// Format a calendar date as `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use aging_core::formatting::format_date;
///
/// let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(format_date(d), "2024-03-01");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        if i != 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ── Tests ─────────────────────────────────────────────────────────────────────
