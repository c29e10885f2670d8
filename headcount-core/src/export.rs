//! CSV rendering for filtered site records.
//!
//! Output follows the common spreadsheet dialect: comma separated, fields
//! quoted only when they contain a separator, quote or line break, and every
//! line terminated by CRLF.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::SiteRecord;

/// Suggested attachment filename.
pub const CSV_FILENAME: &str = "associate_data_filtered.csv";

/// MIME type of the export.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

pub const CSV_HEADERS: [&str; 8] = [
    "Region",
    "Hub",
    "Country",
    "Site",
    "RSE Count",
    "DSE Count",
    "ITC Count",
    "Total Associates",
];

const LINE_END: &str = "\r\n";

/// A rendered export ready to be delivered as an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvExport {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Data rows, excluding the header.
    pub row_count: usize,
}

impl CsvExport {
    pub fn from_records(records: &[SiteRecord]) -> Self {
        Self {
            filename: CSV_FILENAME.to_string(),
            content_type: CSV_CONTENT_TYPE.to_string(),
            bytes: render_csv(records),
            row_count: records.len(),
        }
    }

    /// `Content-Disposition` header value for this export.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }
}

/// Render the header plus one line per record, with the per-record total
/// appended as the last column.
pub fn render_csv(records: &[SiteRecord]) -> Vec<u8> {
    let mut out = String::with_capacity(64 * (records.len() + 1));
    push_line(&mut out, CSV_HEADERS.iter().map(|h| Cow::Borrowed(*h)));

    for record in records {
        push_line(
            &mut out,
            [
                csv_escape(&record.region),
                csv_escape(&record.hub),
                csv_escape(&record.country),
                csv_escape(&record.site),
                Cow::Owned(record.rse_count.to_string()),
                Cow::Owned(record.dse_count.to_string()),
                Cow::Owned(record.itc_count.to_string()),
                Cow::Owned(record.total().to_string()),
            ]
            .into_iter(),
        );
    }

    out.into_bytes()
}

fn push_line<'a>(out: &mut String, fields: impl Iterator<Item = Cow<'a, str>>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&field);
    }
    out.push_str(LINE_END);
}

fn csv_escape(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CountValues, SiteLocation};

    fn record(id: i32, site: &str, counts: (i32, i32, i32)) -> SiteRecord {
        SiteRecord::new(
            id,
            SiteLocation::new("AMER", "Hub C", "USA", site),
            CountValues::new(counts.0, counts.1, counts.2),
        )
    }

    fn lines(bytes: &[u8]) -> Vec<String> {
        String::from_utf8(bytes.to_vec())
            .unwrap()
            .split("\r\n")
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_header_only_for_no_records() {
        let out = render_csv(&[]);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Region,Hub,Country,Site,RSE Count,DSE Count,ITC Count,Total Associates\r\n"
        );
    }

    #[test]
    fn test_rows_carry_per_record_total() {
        let out = render_csv(&[record(5, "Site 5", (200, 150, 100)), record(8, "Site 8", (50, 50, 50))]);
        let lines = lines(&out);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "AMER,Hub C,USA,Site 5,200,150,100,450");
        assert_eq!(lines[2], "AMER,Hub C,USA,Site 8,50,50,50,150");
    }

    #[test]
    fn test_special_characters_are_quoted() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_export_metadata() {
        let export = CsvExport::from_records(&[record(6, "Site 6", (10, 20, 20))]);
        assert_eq!(export.filename, "associate_data_filtered.csv");
        assert_eq!(export.content_type, "text/csv");
        assert_eq!(export.row_count, 1);
        assert!(!export.bytes.is_empty());
        assert_eq!(
            export.content_disposition(),
            "attachment; filename=associate_data_filtered.csv"
        );
    }
}
