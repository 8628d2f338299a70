//! Folds chunk responses into one column table and one error log.

use crate::retrieval::parser::ChunkResponse;
use crate::retrieval::planner::Chunk;
use crate::types::merged::{ChunkError, ColumnTable, DatumTable, ErrorLog, MergedResult, Retrieval};
use crate::types::product::Product;
use log::warn;

/// Accumulates the chunks of one retrieval, in request order.
///
/// The first successful response with a non-blank header fixes the column set;
/// later chunks are read positionally against it.
#[derive(Debug, Default)]
pub struct Merger {
    header: Option<Vec<String>>,
    table: ColumnTable,
    errors: ErrorLog,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one parsed response into the result.
    ///
    /// # Arguments
    ///
    /// * `chunk` - The window the response answers, recorded with any error.
    /// * `response` - The parsed body.
    ///
    /// An error response, or rows whose width differs from the established
    /// header, are recorded in the error log and add no rows. A blank header
    /// is ignored until a real one arrives.
    pub fn merge(&mut self, chunk: &Chunk, response: ChunkResponse) {
        if let Some(message) = response.error {
            warn!(
                "Data API reported an error for {} to {}: {}",
                chunk.start, chunk.end, message
            );
            self.record_error(chunk, message);
            return;
        }

        if self.header.is_none() && response.header.iter().any(|h| !h.is_empty()) {
            self.table = ColumnTable::with_header(&response.header);
            self.header = Some(response.header.clone());
        }
        let Some(header) = &self.header else {
            return;
        };

        if !response.rows.is_empty() && response.header.len() != header.len() {
            let message = format!(
                "Response has {} fields but earlier responses had {}",
                response.header.len(),
                header.len()
            );
            warn!("Dropping chunk {} to {}: {}", chunk.start, chunk.end, message);
            self.record_error(chunk, message);
            return;
        }

        for row in response.rows {
            self.table.push_row(header, row);
        }
    }

    /// Logs a failure for `chunk` without touching the merged rows.
    pub fn record_error(&mut self, chunk: &Chunk, message: String) {
        self.errors.push(ChunkError {
            start: chunk.start,
            end: chunk.end,
            message,
        });
    }

    /// Closes the retrieval. Datums are reshaped into a name to value table.
    pub fn finish(self, product: Product) -> Retrieval {
        let data = match product {
            Product::Datums => MergedResult::Datums(DatumTable::from_columns(&self.table)),
            _ => MergedResult::Columns(self.table),
        };
        Retrieval {
            data,
            errors: self.errors,
        }
    }
}
