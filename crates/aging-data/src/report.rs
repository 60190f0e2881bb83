//! Top-level report pipeline: load, enrich, summarize.
//!
//! One blocking call per user action. Each call is independent and returns
//! an immutable snapshot; the shell owns whatever it does with the previous
//! one.

use std::path::Path;

use aging_core::error::Result;
use aging_core::models::{AgingSummary, InvoiceRecord};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::aggregator::InvoiceAggregator;
use crate::loader::load_invoice_rows;

// ── Public types ──────────────────────────────────────────────────────────────

/// The complete output of [`build_report`]: everything the presentation
/// shell needs to render the table and both summary panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArReport {
    /// Evaluation date the ages were computed against.
    pub as_of: NaiveDate,
    /// File name of the source spreadsheet, for the shell's header label.
    pub source_file: String,
    /// Enriched invoice rows in source order.
    pub records: Vec<InvoiceRecord>,
    /// Outstanding amount per aging bucket, in fixed bucket order.
    pub summary: AgingSummary,
    /// Naive next-30-day collection forecast (the `0-30 Days` total).
    pub projected_inflow: f64,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline over the spreadsheet at `path`.
///
/// 1. Load and validate raw invoice rows.
/// 2. Enrich them with age, bucket and overdue flag relative to `as_of`.
/// 3. Sum amounts per bucket and derive the inflow projection.
///
/// Fails whole-file on any loader error; on failure no partial report is
/// produced.
pub fn build_report(path: &Path, as_of: NaiveDate) -> Result<ArReport> {
    let rows = load_invoice_rows(path)?;
    let records = InvoiceAggregator::enrich(&rows, as_of);
    let (summary, projected_inflow) = InvoiceAggregator::summarize(&records);

    debug!(
        "Report for {}: {} invoices, {:.2} outstanding, {:.2} projected inflow",
        path.display(),
        records.len(),
        summary.grand_total(),
        projected_inflow,
    );

    let source_file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(ArReport {
        as_of,
        source_file,
        records,
        summary,
        projected_inflow,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
