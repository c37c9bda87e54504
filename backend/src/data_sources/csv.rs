//! Delimited text parsing for CSV sources.
//!
//! Sheets exported by spreadsheet tools come with commas, semicolons or tabs
//! depending on locale, so the delimiter is sniffed from the header line
//! before tokenizing. The tokenizer never fails: malformed quoting degrades
//! into odd cell contents instead of an error.

use crate::data_sources::Table;
use common::model::row::{Cell, Row};
use once_cell::sync::Lazy;
use regex::Regex;
use std::mem;

const CANDIDATE_DELIMITERS: [char; 3] = [',', ';', '\t'];

static LEADING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*<").expect("valid regex"));
static HTML_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<html|<head|<body").expect("valid regex"));

/// Guesses the delimiter from the first line by counting each candidate.
///
/// The highest count wins; ties and lines without any candidate resolve to a
/// comma.
pub fn detect_delimiter(text: &str) -> char {
    let first_line = text
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim_end_matches('\r');

    let mut best = (',', 0usize);
    for delimiter in CANDIDATE_DELIMITERS {
        let count = first_line.matches(delimiter).count();
        if count > best.1 {
            best = (delimiter, count);
        }
    }
    best.0
}

/// True when a download looks like an HTML page rather than CSV text.
pub fn looks_like_html(body: &str) -> bool {
    LEADING_TAG.is_match(body) && HTML_MARKER.is_match(body)
}

/// Splits text into records of raw fields.
///
/// Quoted fields may contain the delimiter, newlines and doubled quotes.
/// Outside quotes carriage returns are dropped. A last record without a
/// trailing newline is still emitted.
pub fn tokenize(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' {
            quoted = true;
        } else if c == '\r' {
            // dropped
        } else if c == '\n' {
            record.push(mem::take(&mut field));
            records.push(mem::take(&mut record));
        } else if c == delimiter {
            record.push(mem::take(&mut field));
        } else {
            field.push(c);
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

/// Parses delimited text into trimmed headers and rows keyed by header.
///
/// Rows where every cell is blank are skipped. Short rows read as empty
/// strings for their missing trailing columns.
pub fn parse_delimited(text: &str, delimiter: char) -> Table {
    let mut records = tokenize(text, delimiter).into_iter();
    let headers: Vec<String> = records
        .next()
        .unwrap_or_default()
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let rows = records
        .filter(|record| record.iter().any(|cell| !cell.trim().is_empty()))
        .map(|record| zip_record(&headers, record))
        .collect();

    Table { headers, rows }
}

fn zip_record(headers: &[String], mut record: Vec<String>) -> Row {
    record.resize(headers.len().max(record.len()), String::new());
    headers
        .iter()
        .zip(record)
        .map(|(header, value)| (header.clone(), Cell::Text(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(row: &Row, headers: &[String]) -> Vec<String> {
        headers.iter().map(|h| row.text(h)).collect()
    }

    #[test]
    fn sniffs_the_most_frequent_candidate() {
        assert_eq!(detect_delimiter("a;b;c\n1,2,3,4,5"), ';');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
        assert_eq!(detect_delimiter("a,b;c"), ',');
        assert_eq!(detect_delimiter("single column\nx;y;z"), ',');
        assert_eq!(detect_delimiter(""), ',');
        assert_eq!(detect_delimiter("a;b\r\nc"), ';');
    }

    #[test]
    fn sniffing_is_deterministic() {
        let line = "name;email,phone;zip\tcity";
        let first = detect_delimiter(line);
        for _ in 0..5 {
            assert_eq!(detect_delimiter(line), first);
        }
    }

    #[test]
    fn quoted_fields_keep_delimiters_newlines_and_quotes() {
        let text = "Name,Note\n\"Doe, Jane\",\"said \"\"hi\"\"\nthen left\"\n";
        let table = parse_delimited(text, ',');
        assert_eq!(table.headers, vec!["Name", "Note"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].text("Name"), "Doe, Jane");
        assert_eq!(table.rows[0].text("Note"), "said \"hi\"\nthen left");
    }

    #[test]
    fn crlf_and_missing_trailing_newline() {
        let table = parse_delimited("A,B\r\n1,2\r\n3,4", ',');
        assert_eq!(table.rows.len(), 2);
        assert_eq!(texts(&table.rows[1], &table.headers), vec!["3", "4"]);
    }

    #[test]
    fn headers_are_trimmed_cells_are_not() {
        let table = parse_delimited(" Email , Name \n a@x.com ,Al\n", ',');
        assert_eq!(table.headers, vec!["Email", "Name"]);
        assert_eq!(table.rows[0].text("Email"), " a@x.com ");
    }

    #[test]
    fn blank_rows_are_dropped_and_short_rows_padded() {
        let table = parse_delimited("a;b;c\n;;\n   ;\n1\n\n2;3;4;5\n", ';');
        assert_eq!(table.rows.len(), 2);
        assert_eq!(texts(&table.rows[0], &table.headers), vec!["1", "", ""]);
        assert_eq!(texts(&table.rows[1], &table.headers), vec!["2", "3", "4"]);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn unterminated_quote_degrades_without_error() {
        let table = parse_delimited("a,b\n\"open,1\n2,3", ',');
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].text("a"), "open,1\n2,3");
        assert_eq!(table.rows[0].text("b"), "");
    }

    #[test]
    fn empty_input_has_no_headers() {
        let table = parse_delimited("", detect_delimiter(""));
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn html_pages_are_detected() {
        assert!(looks_like_html("  \n<!DOCTYPE html><HTML><body>Sign in</body>"));
        assert!(looks_like_html("<head><title>x</title></head>"));
        assert!(!looks_like_html("Email,Name\n<html>,x"));
        assert!(!looks_like_html("<tag>,value"));
    }

    #[test]
    fn reserialized_rows_parse_back_to_the_same_values() {
        let records = vec![
            vec!["id", "note", "tags"],
            vec!["1", "plain", "a;b"],
            vec!["2", "has \"quotes\"", "x"],
            vec!["3", "multi\nline; with delimiter", ""],
            vec!["4", "", "z"],
        ];
        for delimiter in [b',', b';', b'\t'] {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(Vec::new());
            for record in &records {
                writer.write_record(record).unwrap();
            }
            let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

            let table = parse_delimited(&text, delimiter as char);
            assert_eq!(table.headers, records[0]);
            let parsed: Vec<Vec<String>> = table
                .rows
                .iter()
                .map(|row| texts(row, &table.headers))
                .collect();
            let expected: Vec<Vec<String>> = records[1..]
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect();
            assert_eq!(parsed, expected);
        }
    }
}
