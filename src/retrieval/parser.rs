//! Decodes the csv body of a single data API response.
//!
//! The body is a header line, then either one error line or the data rows,
//! then a terminating blank line. Cells are typed by trying a number, then a
//! `YYYY-MM-DD HH:MM` timestamp, and falling back to the trimmed text.

use crate::types::field_value::FieldValue;
use chrono::NaiveDateTime;
use log::debug;
use thiserror::Error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A positional row, aligned with the header of the response it came from.
pub type ParsedRow = Vec<FieldValue>;

/// The decoded body of one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkResponse {
    /// Header field names, trimmed, in response order.
    pub header: Vec<String>,
    pub rows: Vec<ParsedRow>,
    /// The service's error line, when it refused the chunk. `rows` is then empty.
    pub error: Option<String>,
}

impl ChunkResponse {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The body could not be aligned with its own header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Row {line} has {found} fields but the header has {expected}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Parses a raw response body.
///
/// # Errors
///
/// Returns [`ParseError::ShortRow`] if a data row has fewer fields than the
/// header. Fields past the header width are ignored.
pub fn parse_chunk_response(raw: &str) -> Result<ChunkResponse, ParseError> {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let header: Vec<String> = lines
        .first()
        .copied()
        .unwrap_or_default()
        .split(',')
        .map(|field| field.trim().to_string())
        .collect();

    if let Some(second) = lines.get(1) {
        if second.contains("Error") {
            return Ok(ChunkResponse {
                header,
                rows: Vec::new(),
                error: Some(second.to_string()),
            });
        }
    }

    // Everything between the header and the final terminator line.
    let body = if lines.len() > 2 {
        &lines[1..lines.len() - 1]
    } else {
        &[][..]
    };

    let mut rows = Vec::with_capacity(body.len());
    for (i, line) in body.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < header.len() {
            return Err(ParseError::ShortRow {
                line: i + 1,
                expected: header.len(),
                found: fields.len(),
            });
        }
        rows.push(
            fields
                .into_iter()
                .take(header.len())
                .map(parse_field)
                .collect(),
        );
    }
    debug!("Parsed {} rows of {} fields", rows.len(), header.len());

    Ok(ChunkResponse {
        header,
        rows,
        error: None,
    })
}

/// Types a single cell. The first interpretation that succeeds wins.
///
/// # Examples
///
/// ```
/// use coops::{parse_field, FieldValue};
///
/// assert_eq!(parse_field("12.34"), FieldValue::Number(12.34));
/// assert!(matches!(parse_field("2020-04-01 00:00"), FieldValue::Timestamp(_)));
/// assert_eq!(parse_field(" STND "), FieldValue::Text("STND".to_string()));
/// ```
pub fn parse_field(raw: &str) -> FieldValue {
    let trimmed = raw.trim();
    parse_number(trimmed)
        .or_else(|| parse_timestamp(trimmed))
        .unwrap_or_else(|| FieldValue::Text(trimmed.to_string()))
}

fn parse_number(s: &str) -> Option<FieldValue> {
    s.parse::<f64>().ok().map(FieldValue::Number)
}

fn parse_timestamp(s: &str) -> Option<FieldValue> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .map(FieldValue::Timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const WATER_LEVEL: &str = "Date Time, Water Level, Sigma, O or I (for verified), F, R, L, Quality \n\
2020-04-01 00:00,1.277,0.003,0,0,0,0,v\n\
2020-04-01 00:06,1.301,0.004,0,0,0,0,v\n";

    #[test]
    fn fields_are_typed_in_order() {
        assert_eq!(parse_field("12.34"), FieldValue::Number(12.34));
        assert_eq!(parse_field("-0.3"), FieldValue::Number(-0.3));
        assert_eq!(
            parse_field("2020-04-01 00:00"),
            FieldValue::Timestamp(
                NaiveDate::from_ymd_opt(2020, 4, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            )
        );
        assert_eq!(parse_field("STND"), FieldValue::Text("STND".to_string()));
        assert_eq!(parse_field(""), FieldValue::Text(String::new()));
        // Dates without a time are not timestamps.
        assert_eq!(
            parse_field("2020-04-01"),
            FieldValue::Text("2020-04-01".to_string())
        );
    }

    #[test]
    fn parses_header_and_rows() {
        let response = parse_chunk_response(WATER_LEVEL).unwrap();

        assert!(!response.is_error());
        assert_eq!(response.header.len(), 8);
        assert_eq!(response.header[0], "Date Time");
        assert_eq!(response.header[1], "Water Level");
        assert_eq!(response.header[7], "Quality");
        assert_eq!(response.rows.len(), 2);
        assert_eq!(response.rows[0][1], FieldValue::Number(1.277));
        assert!(matches!(response.rows[1][0], FieldValue::Timestamp(_)));
        assert_eq!(response.rows[1][7], FieldValue::Text("v".to_string()));
    }

    #[test]
    fn error_line_marks_the_chunk_failed() {
        let raw = "Date Time, Water Level\nError: No data was found. This product may not be offered at this station at the requested time.\n";
        let response = parse_chunk_response(raw).unwrap();

        assert_eq!(
            response.error.as_deref(),
            Some("Error: No data was found. This product may not be offered at this station at the requested time.")
        );
        assert!(response.rows.is_empty());
    }

    #[test]
    fn final_line_is_never_a_row() {
        let raw = "A,B\n1,2\n3,4";
        let response = parse_chunk_response(raw).unwrap();
        assert_eq!(
            response.rows,
            vec![vec![FieldValue::Number(1.0), FieldValue::Number(2.0)]]
        );
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let raw = "A,B\r\n1,x\r\n\r\n";
        let response = parse_chunk_response(raw).unwrap();
        assert_eq!(
            response.rows,
            vec![vec![FieldValue::Number(1.0), FieldValue::from("x")]]
        );
    }

    #[test]
    fn header_only_bodies_have_no_rows() {
        for raw in ["A,B", "A,B\n", ""] {
            let response = parse_chunk_response(raw).unwrap();
            assert!(response.rows.is_empty());
            assert!(!response.is_error());
        }
    }

    #[test]
    fn blank_lines_inside_the_body_are_skipped() {
        let raw = "A,B\n1,2\n\n3,4\n";
        let response = parse_chunk_response(raw).unwrap();
        assert_eq!(response.rows.len(), 2);
    }

    #[test]
    fn short_rows_are_rejected() {
        let raw = "A,B,C\n1,2,3\n4,5\n\n";
        assert_eq!(
            parse_chunk_response(raw),
            Err(ParseError::ShortRow {
                line: 2,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn extra_fields_are_dropped() {
        let raw = "A,B\n1,2,3\n";
        let response = parse_chunk_response(raw).unwrap();
        assert_eq!(response.rows[0].len(), 2);
    }

    #[test]
    fn parsing_is_deterministic() {
        assert_eq!(
            parse_chunk_response(WATER_LEVEL),
            parse_chunk_response(WATER_LEVEL)
        );
    }
}
