//! CSV reading for published spreadsheet exports.
//!
//! The sheet is human-edited, so the reader is flexible about row width and
//! never rejects malformed quoting: a quote that does not open a cell is kept
//! as a literal character, and an unterminated quoted cell runs to the end of
//! the input.

use ::csv::ReaderBuilder;

/// Splits CSV text into rows of raw cells.
///
/// Supports `"`-quoted cells, `""` escapes inside quotes, and `\n`, `\r\n`
/// or bare `\r` row terminators. A final row without a trailing newline is
/// kept and empty lines are skipped. Rows whose cells are all blank are
/// dropped, except the first row, which is always retained so header
/// detection can scan forward from it. Empty input yields one empty row.
#[must_use]
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(row = index, error = %error, "skipping unreadable CSV row");
                continue;
            }
        };
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if rows.is_empty() || cells.iter().any(|c| !c.trim().is_empty()) {
            rows.push(cells);
        }
    }

    if rows.is_empty() {
        rows.push(vec![String::new()]);
    }
    rows
}
