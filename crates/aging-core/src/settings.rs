use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ────────────────────────────────────────────────────────────

/// Accounts-receivable aging analysis for spreadsheet exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ar-aging",
    about = "Accounts-receivable aging analysis for spreadsheet exports",
    version
)]
pub struct Settings {
    /// Path to the receivables spreadsheet (.xlsx / .xls)
    pub file: PathBuf,

    /// Evaluation date for age computation (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub output: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
