//! Plain-text rendering of a report snapshot.
//!
//! The shell owns presentation entirely: it takes one immutable [`ArReport`]
//! and builds the whole display from it, discarding anything shown before.
//! Overdue rows are marked with `*` in place of the original tool's row
//! colouring.

use aging_core::formatting::{format_currency, format_date};
use aging_data::report::ArReport;

const HEADERS: [&str; 6] = [
    "Invoice ID",
    "Customer Name",
    "Invoice Date",
    "Amount",
    "Age (Days)",
    "Aging Bucket",
];

/// Render the full report: header line, invoice table, aging-bucket summary
/// and the cash-inflow projection.
pub fn render_report(report: &ArReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "File: {}    As of: {}\n\n",
        report.source_file,
        format_date(report.as_of)
    ));

    render_table(report, &mut out);
    out.push('\n');
    render_summary(report, &mut out);

    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn render_table(report: &ArReport, out: &mut String) {
    let rows: Vec<[String; 6]> = report
        .records
        .iter()
        .map(|record| {
            let bucket = if record.overdue {
                format!("{} *", record.bucket)
            } else {
                record.bucket.to_string()
            };
            [
                record.invoice_id.clone(),
                record.customer_name.clone(),
                format_date(record.invoice_date),
                format_currency(record.amount),
                record.age_days.to_string(),
                bucket,
            ]
        })
        .collect();

    let widths = column_widths(&rows);

    push_row(out, &HEADERS.map(String::from), &widths);
    push_row(out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &rows {
        push_row(out, row, &widths);
    }

    if rows.is_empty() {
        out.push_str("(no invoices)\n");
    } else if report.records.iter().any(|r| r.overdue) {
        out.push_str("* overdue (age > 30 days)\n");
    }
}

fn render_summary(report: &ArReport, out: &mut String) {
    out.push_str("Aging Buckets:\n");
    for (bucket, total) in report.summary.iter() {
        out.push_str(&format!("  {}: {}\n", bucket, format_currency(total)));
    }

    out.push_str("Projected Cash Inflows (next 30 days):\n");
    out.push_str(&format!(
        "  Expected from '0-30 Days' bucket: {}\n",
        format_currency(report.projected_inflow)
    ));
}

/// Width of each column: the longest of its header and all its values.
fn column_widths(rows: &[[String; 6]]) -> [usize; 6] {
    let mut widths = HEADERS.map(str::len);
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(value.len());
        }
    }
    widths
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

// ── Tests ─────────────────────────────────────────────────────────────────────
