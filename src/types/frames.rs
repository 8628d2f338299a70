//! Conversion of merged results into Polars `DataFrame`s.

use crate::types::field_value::FieldValue;
use crate::types::merged::{ColumnTable, DatumTable};
use chrono::NaiveDateTime;
use polars::prelude::{Column as PlColumn, DataFrame, NamedFrom, PolarsResult, Series};

/// Picks the narrowest Polars type that holds every value of a column.
///
/// Blank text counts as a missing value, so a numeric column with a few empty
/// samples still becomes `Float64`.
fn to_series(name: &str, values: &[FieldValue]) -> Series {
    let present = || values.iter().filter(|v| !v.is_blank());

    if present().all(|v| matches!(v, FieldValue::Number(_))) {
        let numbers: Vec<Option<f64>> = values.iter().map(FieldValue::as_number).collect();
        return Series::new(name.into(), numbers);
    }
    if present().all(|v| matches!(v, FieldValue::Timestamp(_))) {
        let stamps: Vec<Option<NaiveDateTime>> =
            values.iter().map(FieldValue::as_timestamp).collect();
        return Series::new(name.into(), stamps);
    }
    let text: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    Series::new(name.into(), text)
}

impl ColumnTable {
    /// Builds a `DataFrame` with one column per header field, in header order.
    ///
    /// # Errors
    ///
    /// Fails if the columns have different lengths, which only happens when a
    /// header repeats a field name.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use coops::{Coops, CoopsError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), CoopsError> {
    /// let client = Coops::new()?;
    /// let retrieval = client.get_data().station("9414290").call().await?;
    /// if let Some(table) = retrieval.data.as_columns() {
    ///     println!("{}", table.to_dataframe()?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns: Vec<PlColumn> = self
            .columns()
            .iter()
            .map(|c| to_series(&c.name, &c.values).into())
            .collect();
        DataFrame::new(columns)
    }
}

impl DatumTable {
    /// Two columns, `Datum` and `Value`, one row per datum.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let (names, values): (Vec<&str>, Vec<FieldValue>) =
            self.iter().map(|(n, v)| (n, v.clone())).unzip();
        DataFrame::new(vec![
            Series::new("Datum".into(), names).into(),
            to_series("Value", &values).into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use polars::prelude::DataType;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn column_types_are_inferred_per_column() {
        let h = header(&["Date Time", "Water Level", "Quality"]);
        let mut table = ColumnTable::with_header(&h);
        let t0 = NaiveDate::from_ymd_opt(2020, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        table.push_row(&h, vec![t0.into(), 1.25.into(), "p".into()]);
        table.push_row(&h, vec![t0.into(), "".into(), "v".into()]);

        let df = table.to_dataframe().unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("Water Level").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Water Level").unwrap().null_count(), 1);
        assert!(matches!(
            df.column("Date Time").unwrap().dtype(),
            DataType::Datetime(_, _)
        ));
        assert_eq!(df.column("Quality").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn datum_frame_has_two_columns() {
        let h = header(&["Datum", "Value"]);
        let mut table = ColumnTable::with_header(&h);
        table.push_row(&h, vec!["MHHW".into(), 1.2.into()]);
        table.push_row(&h, vec!["MLLW".into(), (-0.3).into()]);

        let df = DatumTable::from_columns(&table).to_dataframe().unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.column("Value").unwrap().dtype(), &DataType::Float64);
    }
}
