//! Spreadsheet loading for the AR aging tool.
//!
//! Reads an xlsx/xls-class file into [`RawInvoiceRow`]s, coercing dates and
//! amounts at load time so the aggregation layer never sees malformed data.

use std::path::Path;

use aging_core::error::{AgingError, Result};
use aging_core::models::RawInvoiceRow;
use calamine::{open_workbook_auto, Data, DataType as _, Reader};
use chrono::NaiveDate;
use tracing::debug;

/// Required column headers, exact and case-sensitive.
const COL_INVOICE_ID: &str = "InvoiceID";
const COL_CUSTOMER_NAME: &str = "CustomerName";
const COL_INVOICE_DATE: &str = "InvoiceDate";
const COL_AMOUNT: &str = "Amount";

/// Text formats accepted for `InvoiceDate` cells, tried in order.
const TEXT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const TEXT_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the first worksheet of the spreadsheet at `path` into invoice rows.
///
/// The header row must contain the four required columns (`InvoiceID`,
/// `CustomerName`, `InvoiceDate`, `Amount`); extra columns are ignored and
/// column order does not matter. Fully blank rows are skipped. Output
/// preserves the source row order.
///
/// Fails whole-file: the first unreadable cell aborts the load and no rows
/// are returned.
pub fn load_invoice_rows(path: &Path) -> Result<Vec<RawInvoiceRow>> {
    // calamine buries missing-file I/O errors inside format-specific
    // variants; probe the path first so unreadable files always surface as
    // FileRead rather than a format error.
    std::fs::metadata(path).map_err(|source| AgingError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut workbook = open_workbook_auto(path).map_err(|e| open_error(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AgingError::EmptySheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| AgingError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut row_iter = range.rows();
    let header = row_iter.next().ok_or_else(|| AgingError::EmptySheet {
        path: path.to_path_buf(),
    })?;
    let columns = ColumnMap::resolve(header, path)?;

    let mut rows: Vec<RawInvoiceRow> = Vec::new();
    for (i, cells) in row_iter.enumerate() {
        // 1-based spreadsheet row number, accounting for the header row.
        let sheet_row = i as u32 + 2;

        if columns.is_blank(cells) {
            continue;
        }

        rows.push(columns.parse_row(cells, sheet_row)?);
    }

    debug!("Loaded {} invoice rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Map a workbook-open failure onto the error taxonomy: plain I/O problems
/// keep their source, everything else is an unsupported/corrupt workbook.
fn open_error(path: &Path, err: calamine::Error) -> AgingError {
    match err {
        calamine::Error::Io(source) => AgingError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        other => AgingError::Workbook {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

/// Resolved indices of the four required columns within the header row.
struct ColumnMap {
    invoice_id: usize,
    customer_name: usize,
    invoice_date: usize,
    amount: usize,
}

impl ColumnMap {
    fn resolve(header: &[Data], path: &Path) -> Result<ColumnMap> {
        let find = |name: &'static str| -> Result<usize> {
            header
                .iter()
                .position(|cell| cell.get_string() == Some(name))
                .ok_or_else(|| AgingError::MissingColumn {
                    column: name,
                    path: path.to_path_buf(),
                })
        };

        Ok(ColumnMap {
            invoice_id: find(COL_INVOICE_ID)?,
            customer_name: find(COL_CUSTOMER_NAME)?,
            invoice_date: find(COL_INVOICE_DATE)?,
            amount: find(COL_AMOUNT)?,
        })
    }

    /// A row is blank when all four required cells are empty.
    fn is_blank(&self, cells: &[Data]) -> bool {
        [
            self.invoice_id,
            self.customer_name,
            self.invoice_date,
            self.amount,
        ]
        .iter()
        .all(|&idx| matches!(self.cell(cells, idx), Data::Empty))
    }

    fn parse_row(&self, cells: &[Data], sheet_row: u32) -> Result<RawInvoiceRow> {
        let invoice_id = self
            .text_cell(cells, self.invoice_id)
            .ok_or_else(|| self.cell_error(cells, self.invoice_id, COL_INVOICE_ID, sheet_row))?;

        let customer_name = self
            .text_cell(cells, self.customer_name)
            .ok_or_else(|| {
                self.cell_error(cells, self.customer_name, COL_CUSTOMER_NAME, sheet_row)
            })?;

        let invoice_date = date_cell(self.cell(cells, self.invoice_date))
            .ok_or_else(|| self.cell_error(cells, self.invoice_date, COL_INVOICE_DATE, sheet_row))?;

        let amount = amount_cell(self.cell(cells, self.amount))
            .ok_or_else(|| self.cell_error(cells, self.amount, COL_AMOUNT, sheet_row))?;

        Ok(RawInvoiceRow {
            invoice_id,
            customer_name,
            invoice_date,
            amount,
        })
    }

    fn cell<'a>(&self, cells: &'a [Data], idx: usize) -> &'a Data {
        cells.get(idx).unwrap_or(&Data::Empty)
    }

    fn text_cell(&self, cells: &[Data], idx: usize) -> Option<String> {
        text_value(self.cell(cells, idx))
    }

    fn cell_error(
        &self,
        cells: &[Data],
        idx: usize,
        column: &'static str,
        sheet_row: u32,
    ) -> AgingError {
        AgingError::CellParse {
            row: sheet_row,
            column,
            value: self.cell(cells, idx).to_string(),
        }
    }
}

/// Render an identifier or name cell to text. Numeric IDs are common in
/// exported sheets; integers lose their artificial `.0` suffix.
fn text_value(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

/// Coerce an `InvoiceDate` cell to a calendar date.
///
/// Native date cells and raw Excel serial numbers go through calamine's date
/// conversion; text cells are parsed against a fixed format list. The
/// time-of-day component, if any, is dropped.
fn date_cell(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::Float(_) | Data::Int(_) => cell.as_date(),
        Data::String(s) => text_date(s.trim()),
        _ => None,
    }
}

fn text_date(s: &str) -> Option<NaiveDate> {
    for fmt in TEXT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in TEXT_DATETIME_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Coerce an `Amount` cell to a number. Numeric-looking text is accepted,
/// with thousands separators tolerated.
fn amount_cell(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADERS: [&str; 4] = ["InvoiceID", "CustomerName", "InvoiceDate", "Amount"];

    fn write_headers(sheet: &mut rust_xlsxwriter::Worksheet, headers: &[&str]) {
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
    }

    /// Write a sheet with the standard headers and string-dated rows.
    fn sample_book(dir: &TempDir, name: &str, rows: &[(&str, &str, &str, f64)]) -> PathBuf {
        let path = dir.path().join(name);
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_headers(sheet, &HEADERS);
        for (i, (id, customer, date, amount)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, *id).unwrap();
            sheet.write_string(row, 1, *customer).unwrap();
            sheet.write_string(row, 2, *date).unwrap();
            sheet.write_number(row, 3, *amount).unwrap();
        }
        workbook.save(&path).unwrap();
        path
    }

    // ── Happy path ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_basic_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let path = sample_book(
            &dir,
            "book.xlsx",
            &[
                ("INV1", "Acme", "2024-01-01", 1000.0),
                ("INV2", "Beta", "2024-02-15", 500.0),
            ],
        );

        let rows = load_invoice_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].invoice_id, "INV1");
        assert_eq!(rows[0].customer_name, "Acme");
        assert_eq!(
            rows[0].invoice_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(rows[0].amount, 1000.0);
        assert_eq!(rows[1].invoice_id, "INV2");
    }

    #[test]
    fn test_load_numeric_invoice_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_headers(sheet, &HEADERS);
        sheet.write_number(1, 0, 1001.0).unwrap();
        sheet.write_string(1, 1, "Acme").unwrap();
        sheet.write_string(1, 2, "2024-01-01").unwrap();
        sheet.write_number(1, 3, 99.5).unwrap();
        workbook.save(&path).unwrap();

        let rows = load_invoice_rows(&path).unwrap();
        assert_eq!(rows[0].invoice_id, "1001");
    }

    #[test]
    fn test_load_excel_serial_date() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_headers(sheet, &HEADERS);
        sheet.write_string(1, 0, "INV1").unwrap();
        sheet.write_string(1, 1, "Acme").unwrap();
        // 45292 is the Excel serial for 2024-01-01.
        sheet.write_number(1, 2, 45292.0).unwrap();
        sheet.write_number(1, 3, 10.0).unwrap();
        workbook.save(&path).unwrap();

        let rows = load_invoice_rows(&path).unwrap();
        assert_eq!(
            rows[0].invoice_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_load_amount_from_text_with_separators() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_headers(sheet, &HEADERS);
        sheet.write_string(1, 0, "INV1").unwrap();
        sheet.write_string(1, 1, "Acme").unwrap();
        sheet.write_string(1, 2, "2024-01-01").unwrap();
        sheet.write_string(1, 3, "1,234.50").unwrap();
        workbook.save(&path).unwrap();

        let rows = load_invoice_rows(&path).unwrap();
        assert!((rows[0].amount - 1234.5).abs() < 1e-9);
    }

    #[test]
    fn test_load_skips_blank_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_headers(sheet, &HEADERS);
        // Row 1 and row 3 carry data; row 2 is left untouched.
        for row in [1u32, 3u32] {
            sheet.write_string(row, 0, format!("INV{row}")).unwrap();
            sheet.write_string(row, 1, "Acme").unwrap();
            sheet.write_string(row, 2, "2024-01-01").unwrap();
            sheet.write_number(row, 3, 10.0).unwrap();
        }
        workbook.save(&path).unwrap();

        let rows = load_invoice_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].invoice_id, "INV1");
        assert_eq!(rows[1].invoice_id, "INV3");
    }

    #[test]
    fn test_load_ignores_extra_columns_and_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        // Shuffled headers plus an unrelated column.
        write_headers(
            sheet,
            &["Amount", "Notes", "InvoiceDate", "CustomerName", "InvoiceID"],
        );
        sheet.write_number(1, 0, 250.0).unwrap();
        sheet.write_string(1, 1, "rush order").unwrap();
        sheet.write_string(1, 2, "2024-02-15").unwrap();
        sheet.write_string(1, 3, "Beta").unwrap();
        sheet.write_string(1, 4, "INV2").unwrap();
        workbook.save(&path).unwrap();

        let rows = load_invoice_rows(&path).unwrap();
        assert_eq!(rows[0].invoice_id, "INV2");
        assert_eq!(rows[0].customer_name, "Beta");
        assert_eq!(rows[0].amount, 250.0);
    }

    // ── Failure modes ─────────────────────────────────────────────────────────

    #[test]
    fn test_load_missing_file_is_file_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_invoice_rows(&dir.path().join("absent.xlsx")).unwrap_err();
        assert!(matches!(err, AgingError::FileRead { .. }), "got {err:?}");
    }

    #[test]
    fn test_load_unsupported_format_is_workbook_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not a spreadsheet").unwrap();

        let err = load_invoice_rows(&path).unwrap_err();
        assert!(matches!(err, AgingError::Workbook { .. }), "got {err:?}");
    }

    #[test]
    fn test_load_missing_required_column_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        // No Amount column.
        write_headers(sheet, &["InvoiceID", "CustomerName", "InvoiceDate"]);
        sheet.write_string(1, 0, "INV1").unwrap();
        sheet.write_string(1, 1, "Acme").unwrap();
        sheet.write_string(1, 2, "2024-01-01").unwrap();
        workbook.save(&path).unwrap();

        let err = load_invoice_rows(&path).unwrap_err();
        match err {
            AgingError::MissingColumn { column, .. } => assert_eq!(column, "Amount"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_load_column_match_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_headers(sheet, &["invoiceid", "CustomerName", "InvoiceDate", "Amount"]);
        workbook.save(&path).unwrap();

        let err = load_invoice_rows(&path).unwrap_err();
        match err {
            AgingError::MissingColumn { column, .. } => assert_eq!(column, "InvoiceID"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_load_unparseable_date_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        let path = sample_book(
            &dir,
            "book.xlsx",
            &[
                ("INV1", "Acme", "2024-01-01", 10.0),
                ("INV2", "Beta", "sometime soon", 20.0),
            ],
        );

        let err = load_invoice_rows(&path).unwrap_err();
        match err {
            AgingError::CellParse { row, column, value } => {
                assert_eq!(row, 3);
                assert_eq!(column, "InvoiceDate");
                assert_eq!(value, "sometime soon");
            }
            other => panic!("expected CellParse, got {other:?}"),
        }
    }

    #[test]
    fn test_load_non_numeric_amount_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_headers(sheet, &HEADERS);
        sheet.write_string(1, 0, "INV1").unwrap();
        sheet.write_string(1, 1, "Acme").unwrap();
        sheet.write_string(1, 2, "2024-01-01").unwrap();
        sheet.write_string(1, 3, "call me").unwrap();
        workbook.save(&path).unwrap();

        let err = load_invoice_rows(&path).unwrap_err();
        assert!(
            matches!(err, AgingError::CellParse { column: "Amount", .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_load_blank_customer_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        write_headers(sheet, &HEADERS);
        sheet.write_string(1, 0, "INV1").unwrap();
        // CustomerName left empty.
        sheet.write_string(1, 2, "2024-01-01").unwrap();
        sheet.write_number(1, 3, 10.0).unwrap();
        workbook.save(&path).unwrap();

        let err = load_invoice_rows(&path).unwrap_err();
        assert!(
            matches!(err, AgingError::CellParse { column: "CustomerName", .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_load_empty_sheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.xlsx");
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path).unwrap();

        let err = load_invoice_rows(&path).unwrap_err();
        assert!(matches!(err, AgingError::EmptySheet { .. }), "got {err:?}");
    }

    // ── Text date parsing ─────────────────────────────────────────────────────

    #[test]
    fn test_text_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(text_date("2024-01-05"), Some(expected));
        assert_eq!(text_date("2024/01/05"), Some(expected));
        assert_eq!(text_date("01/05/2024"), Some(expected));
        assert_eq!(text_date("2024-01-05 13:45:00"), Some(expected));
        assert_eq!(text_date("2024-01-05T13:45:00"), Some(expected));
        assert_eq!(text_date("Jan 5"), None);
    }
}
