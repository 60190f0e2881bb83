use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── AgingBucket ───────────────────────────────────────────────────────────────

/// Fixed age-range classification used in receivables analysis.
///
/// Variant order is the presentation order, so a `BTreeMap` keyed by bucket
/// iterates least-overdue first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgingBucket {
    #[serde(rename = "0-30 Days")]
    Days0To30,
    #[serde(rename = "31-60 Days")]
    Days31To60,
    #[serde(rename = "61-90 Days")]
    Days61To90,
    #[serde(rename = "90+ Days")]
    Over90,
}

impl AgingBucket {
    /// All buckets in presentation order.
    pub const ALL: [AgingBucket; 4] = [
        AgingBucket::Days0To30,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Over90,
    ];

    /// Classify an invoice age into its bucket.
    ///
    /// Boundaries are half-open and left-inclusive: `[0,30)`, `[30,60)`,
    /// `[60,90)`, `[90,∞)`. Negative ages (future-dated invoices) clamp into
    /// the first bucket so every record lands in exactly one bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// use aging_core::models::AgingBucket;
    ///
    /// assert_eq!(AgingBucket::classify(0), AgingBucket::Days0To30);
    /// assert_eq!(AgingBucket::classify(29), AgingBucket::Days0To30);
    /// assert_eq!(AgingBucket::classify(30), AgingBucket::Days31To60);
    /// assert_eq!(AgingBucket::classify(90), AgingBucket::Over90);
    /// assert_eq!(AgingBucket::classify(-5), AgingBucket::Days0To30);
    /// ```
    pub fn classify(age_days: i64) -> AgingBucket {
        if age_days < 30 {
            AgingBucket::Days0To30
        } else if age_days < 60 {
            AgingBucket::Days31To60
        } else if age_days < 90 {
            AgingBucket::Days61To90
        } else {
            AgingBucket::Over90
        }
    }

    /// The display label, e.g. `"0-30 Days"`.
    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Days0To30 => "0-30 Days",
            AgingBucket::Days31To60 => "31-60 Days",
            AgingBucket::Days61To90 => "61-90 Days",
            AgingBucket::Over90 => "90+ Days",
        }
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Invoice rows ──────────────────────────────────────────────────────────────

/// One spreadsheet row as produced by the loader, before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInvoiceRow {
    /// Invoice identifier, kept as given in the sheet.
    pub invoice_id: String,
    /// Customer display name.
    pub customer_name: String,
    /// Calendar date of the invoice (day granularity).
    pub invoice_date: NaiveDate,
    /// Invoice amount. May be negative for credit memos.
    pub amount: f64,
}

/// A raw row enriched with the derived aging fields.
///
/// `age_days`, `bucket` and `overdue` are pure functions of `invoice_date`
/// and the evaluation date; they are only ever written by the aggregator and
/// must be recomputed in full whenever either input changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub invoice_id: String,
    pub customer_name: String,
    pub invoice_date: NaiveDate,
    pub amount: f64,
    /// Whole calendar days between `invoice_date` and the evaluation date.
    /// Negative when the invoice is future-dated.
    pub age_days: i64,
    /// Bucket assigned from `age_days` via [`AgingBucket::classify`].
    pub bucket: AgingBucket,
    /// Strict `age_days > 30` flag. Note the deliberate mismatch with the
    /// bucket boundary: age 30 sits in `Days31To60` but is not overdue.
    pub overdue: bool,
}

// ── AgingSummary ──────────────────────────────────────────────────────────────

/// Total outstanding amount per aging bucket.
///
/// Every bucket is always present; buckets with no records hold `0.0`.
/// Iteration order is the fixed presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgingSummary {
    totals: BTreeMap<AgingBucket, f64>,
}

impl AgingSummary {
    /// An empty summary with all four buckets zeroed.
    pub fn new() -> Self {
        let totals = AgingBucket::ALL.iter().map(|&b| (b, 0.0)).collect();
        Self { totals }
    }

    /// Add an amount to a bucket's running total.
    pub fn add(&mut self, bucket: AgingBucket, amount: f64) {
        *self.totals.entry(bucket).or_insert(0.0) += amount;
    }

    /// Total for one bucket.
    pub fn total_for(&self, bucket: AgingBucket) -> f64 {
        self.totals.get(&bucket).copied().unwrap_or(0.0)
    }

    /// Sum over all buckets. Equals the sum of all record amounts, since
    /// classification maps every record to exactly one bucket.
    pub fn grand_total(&self) -> f64 {
        self.totals.values().sum()
    }

    /// Iterate `(bucket, total)` pairs in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (AgingBucket, f64)> + '_ {
        self.totals.iter().map(|(&b, &t)| (b, t))
    }
}

impl Default for AgingSummary {
    fn default() -> Self {
        Self::new()
    }
}
