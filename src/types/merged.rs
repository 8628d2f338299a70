//! The combined output of a multi-request retrieval: merged columns (or a datum
//! lookup table) plus the log of requests the service refused.

use crate::types::field_value::FieldValue;
use chrono::NaiveDateTime;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// One named column of values, in chunk order then row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<FieldValue>,
}

/// Column-oriented rows of every successful chunk, keyed by header field name.
///
/// Columns keep the order of the header that established them. A table that
/// never saw a successful chunk has no columns at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    columns: Vec<Column>,
}

impl ColumnTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates one empty column per distinct header name.
    pub(crate) fn with_header(header: &[String]) -> Self {
        let mut table = Self::new();
        for name in header {
            if table.position(name).is_none() {
                table.columns.push(Column {
                    name: name.clone(),
                    values: Vec::new(),
                });
            }
        }
        table
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Appends a row positionally aligned with `header`.
    ///
    /// A header that names a field twice feeds both cells into the same column.
    pub(crate) fn push_row(&mut self, header: &[String], row: Vec<FieldValue>) {
        for (name, value) in header.iter().zip(row) {
            match self.position(name) {
                Some(i) => self.columns[i].values.push(value),
                None => self.columns.push(Column {
                    name: name.clone(),
                    values: vec![value],
                }),
            }
        }
    }

    /// The values of `name`, or `None` if no chunk produced that column.
    pub fn column(&self, name: &str) -> Option<&[FieldValue]> {
        self.position(name).map(|i| self.columns[i].values.as_slice())
    }

    /// Shorthand for a column read as numbers, with non-numeric cells as `None`.
    pub fn numbers(&self, name: &str) -> Option<Vec<Option<f64>>> {
        self.column(name)
            .map(|values| values.iter().map(FieldValue::as_number).collect())
    }

    pub fn timestamps(&self, name: &str) -> Option<Vec<Option<NaiveDateTime>>> {
        self.column(name)
            .map(|values| values.iter().map(FieldValue::as_timestamp).collect())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of values in the longest column.
    pub fn row_count(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.values.len())
            .max()
            .unwrap_or(0)
    }
}

impl Serialize for ColumnTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.name, &column.values)?;
        }
        map.end()
    }
}

/// Datum name to datum value, in the order the service listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatumTable {
    entries: Vec<(String, FieldValue)>,
}

impl DatumTable {
    /// Zips the generic `Datum` and `Value` columns of a datums response.
    ///
    /// A repeated datum name keeps its first position and its last value.
    pub fn from_columns(table: &ColumnTable) -> Self {
        let mut datums = DatumTable::default();
        let (Some(names), Some(values)) = (table.column("Datum"), table.column("Value")) else {
            return datums;
        };
        for (name, value) in names.iter().zip(values) {
            datums.insert(name.to_string(), value.clone());
        }
        datums
    }

    fn insert(&mut self, name: String, value: FieldValue) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// The value of datum `name`, e.g. `"MHHW"`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DatumTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Everything the service returned for one query, merged across chunks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MergedResult {
    Columns(ColumnTable),
    /// Only produced for [`crate::Product::Datums`].
    Datums(DatumTable),
}

impl MergedResult {
    pub fn as_columns(&self) -> Option<&ColumnTable> {
        match self {
            MergedResult::Columns(table) => Some(table),
            MergedResult::Datums(_) => None,
        }
    }

    pub fn as_datums(&self) -> Option<&DatumTable> {
        match self {
            MergedResult::Datums(datums) => Some(datums),
            MergedResult::Columns(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MergedResult::Columns(table) => table.is_empty(),
            MergedResult::Datums(datums) => datums.is_empty(),
        }
    }
}

/// A chunk the service answered with an error line instead of data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkError {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub message: String,
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

const NO_ERRORS: &str = "No errors were found";

/// Per-chunk failures, in request order. Failed chunks add no rows but never
/// stop the remaining chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    entries: Vec<ChunkError>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, error: ChunkError) {
        self.entries.push(error);
    }

    /// `true` when every chunk succeeded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failed chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Failed chunks with their windows, in request order.
    pub fn iter(&self) -> impl Iterator<Item = &ChunkError> {
        self.entries.iter()
    }

    /// Just the error text of each failed chunk.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }

    /// The messages as reported to users: the real errors, or a single
    /// "No errors were found" line when there were none.
    pub fn reported(&self) -> Vec<String> {
        if self.entries.is_empty() {
            vec![NO_ERRORS.to_string()]
        } else {
            self.messages().map(str::to_string).collect()
        }
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reported().join("; "))
    }
}

impl Serialize for ErrorLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.reported())
    }
}

/// The outcome of [`crate::Coops::get_data`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Retrieval {
    pub data: MergedResult,
    pub errors: ErrorLog,
}

impl Retrieval {
    /// Splits into the merged data and the error log.
    pub fn into_parts(self) -> (MergedResult, ErrorLog) {
        (self.data, self.errors)
    }

    /// `{"data": ..., "errors": [...]}` with timestamps as ISO 8601 strings.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
