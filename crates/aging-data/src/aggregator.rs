//! Enrichment and aggregation over loaded invoice rows.
//!
//! Both operations are pure: the evaluation date is injected by the caller,
//! never read from the system clock, so a given `(rows, as_of)` pair always
//! produces the same output.

use aging_core::calculations::{age_in_days, is_overdue};
use aging_core::models::{AgingBucket, AgingSummary, InvoiceRecord, RawInvoiceRow};
use chrono::NaiveDate;

/// Stateless helper that derives aging fields and bucket totals.
pub struct InvoiceAggregator;

impl InvoiceAggregator {
    /// Enrich raw rows with `age_days`, `bucket` and `overdue`.
    ///
    /// Order-preserving; ages are whole calendar days relative to `as_of`
    /// and may be negative for future-dated invoices.
    pub fn enrich(rows: &[RawInvoiceRow], as_of: NaiveDate) -> Vec<InvoiceRecord> {
        rows.iter()
            .map(|row| {
                let age_days = age_in_days(row.invoice_date, as_of);
                InvoiceRecord {
                    invoice_id: row.invoice_id.clone(),
                    customer_name: row.customer_name.clone(),
                    invoice_date: row.invoice_date,
                    amount: row.amount,
                    age_days,
                    bucket: AgingBucket::classify(age_days),
                    overdue: is_overdue(age_days),
                }
            })
            .collect()
    }

    /// Sum amounts per bucket and compute the cash-inflow projection.
    ///
    /// The projection is the naive next-30-day collection forecast: the
    /// total of the `0-30 Days` bucket. Assumes all records are well-formed
    /// (the loader validated them); there are no error paths here.
    pub fn summarize(records: &[InvoiceRecord]) -> (AgingSummary, f64) {
        let mut summary = AgingSummary::new();
        for record in records {
            summary.add(record.bucket, record.amount);
        }
        let projected_inflow = summary.total_for(AgingBucket::Days0To30);
        (summary, projected_inflow)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
