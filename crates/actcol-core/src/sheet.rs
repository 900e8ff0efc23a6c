//! Header detection and row-to-record association.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One sheet row keyed by its sanitized header text.
///
/// Headers keep their spreadsheet casing and order. Case-insensitive lookups
/// walk headers in sheet order, so the first matching column wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRecord {
    fields: Vec<(String, String)>,
}

impl SheetRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `header` to `value`. A repeated header keeps its original
    /// position and takes the newer value.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(h, _)| *h == header) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((header, value)),
        }
    }

    /// Exact header match.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Resolves a column the way sheet authors expect: the exact header when
    /// it holds a non-empty value, otherwise the first header that matches
    /// ignoring case (which may be empty).
    #[must_use]
    pub fn lookup(&self, header: &str) -> Option<&str> {
        if let Some(value) = self.get(header).filter(|v| !v.is_empty()) {
            return Some(value);
        }
        let wanted = header.to_lowercase();
        self.fields
            .iter()
            .find(|(h, _)| h.to_lowercase() == wanted)
            .map(|(_, v)| v.as_str())
    }

    /// First alias whose resolved value is non-empty after trimming.
    #[must_use]
    pub fn pick_first(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.lookup(alias))
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(h, _)| h.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<H: Into<String>, V: Into<String>> FromIterator<(H, V)> for SheetRecord {
    fn from_iter<I: IntoIterator<Item = (H, V)>>(iter: I) -> Self {
        let mut record = SheetRecord::new();
        for (header, value) in iter {
            record.insert(header, value);
        }
        record
    }
}

impl Serialize for SheetRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (header, value) in &self.fields {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

/// Strips one leading byte-order mark, then surrounding whitespace.
#[must_use]
pub fn sanitize(value: &str) -> &str {
    value.strip_prefix('\u{feff}').unwrap_or(value).trim()
}

/// Associates parsed rows with the first non-blank row as headers.
///
/// Columns whose header sanitizes to empty are dropped, short rows are
/// padded with empty values, and rows with no non-empty cell are skipped.
/// A sheet with no non-blank row yields no records.
#[must_use]
pub fn normalize_rows(rows: &[Vec<String>]) -> Vec<SheetRecord> {
    let Some(header_index) = rows
        .iter()
        .position(|row| row.iter().any(|cell| !sanitize(cell).is_empty()))
    else {
        tracing::debug!(rows = rows.len(), "no header row found in sheet");
        return Vec::new();
    };

    let headers: Vec<&str> = rows[header_index].iter().map(|h| sanitize(h)).collect();
    let data_rows = &rows[header_index + 1..];

    let records: Vec<SheetRecord> = data_rows
        .iter()
        .filter(|row| row.iter().any(|cell| !sanitize(cell).is_empty()))
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(index, header)| {
                    let value = row.get(index).map_or("", |cell| sanitize(cell));
                    (*header, value)
                })
                .collect()
        })
        .collect();

    tracing::debug!(
        header_row = header_index,
        data_rows = data_rows.len(),
        records = records.len(),
        "normalized sheet rows"
    );

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_csv;

    #[test]
    fn header_detection_skips_leading_blank_rows() {
        let rows = parse_csv(",\n,\nBrand Name,Slug\nTracksmith,tracksmith\n");
        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 1);
        let headers: Vec<&str> = records[0].headers().collect();
        assert_eq!(headers, vec!["Brand Name", "Slug"]);
        assert_eq!(records[0].get("Brand Name"), Some("Tracksmith"));
        assert_eq!(records[0].get("Slug"), Some("tracksmith"));
    }

    #[test]
    fn no_header_row_yields_no_records() {
        assert!(normalize_rows(&parse_csv(",,\n")).is_empty());
        assert!(normalize_rows(&[]).is_empty());
    }

    #[test]
    fn header_byte_order_mark_and_whitespace_are_stripped() {
        let rows = parse_csv("\u{feff}Brand Name , Region\nVuori,  California \n");
        let records = normalize_rows(&rows);
        assert_eq!(records[0].get("Brand Name"), Some("Vuori"));
        assert_eq!(records[0].get("Region"), Some("California"));
    }

    #[test]
    fn empty_header_columns_are_dropped() {
        let rows = parse_csv("Name,,Price\nSatisfy,ignored,$$$\n");
        let records = normalize_rows(&rows);
        let headers: Vec<&str> = records[0].headers().collect();
        assert_eq!(headers, vec!["Name", "Price"]);
    }

    #[test]
    fn short_rows_are_padded_with_empty_values() {
        let rows = parse_csv("Name,Region,Price\nJanji\n");
        let records = normalize_rows(&rows);
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[0].get("Region"), Some(""));
        assert_eq!(records[0].get("Price"), Some(""));
    }

    #[test]
    fn rows_blank_after_sanitizing_are_excluded() {
        let rows = vec![
            vec!["Name".to_string()],
            vec!["\u{feff}  ".to_string()],
            vec!["Ciele".to_string()],
        ];
        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Name"), Some("Ciele"));
    }

    #[test]
    fn lookup_prefers_exact_header_then_case_insensitive() {
        let record: SheetRecord = [("region", "EU"), ("Region", "")].into_iter().collect();
        assert_eq!(record.lookup("Region"), Some("EU"));
        assert_eq!(record.lookup("REGION"), Some("EU"));
        assert_eq!(record.lookup("Country"), None);
    }

    #[test]
    fn repeated_header_keeps_position_and_takes_later_value() {
        let record: SheetRecord = [("Name", "First"), ("Price", "$"), ("Name", "Second")]
            .into_iter()
            .collect();
        let headers: Vec<&str> = record.headers().collect();
        assert_eq!(headers, vec!["Name", "Price"]);
        assert_eq!(record.get("Name"), Some("Second"));
    }

    #[test]
    fn pick_first_skips_blank_aliases() {
        let record: SheetRecord = [("Brand Name", "   "), ("brand", " Bandit ")]
            .into_iter()
            .collect();
        assert_eq!(record.pick_first(&["Brand Name", "Brand", "Name"]), Some("Bandit"));
    }

    #[test]
    fn record_serializes_as_ordered_object() {
        let record: SheetRecord = [("Name", "Path Projects"), ("Price", "$$")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Name":"Path Projects","Price":"$$"}"#);
    }
}
