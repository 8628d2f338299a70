mod coops;
mod error;
mod retrieval;
mod types;

pub use coops::*;
pub use error::{ConfigurationError, CoopsError};

pub use retrieval::error::FetchError;
pub use retrieval::fetcher::{Fetch, HttpFetcher};
pub use retrieval::merger::Merger;
pub use retrieval::pacer::{FixedDelay, Pacer, REQUEST_SPACING};
pub use retrieval::parser::{parse_chunk_response, parse_field, ChunkResponse, ParseError, ParsedRow};
pub use retrieval::planner::{plan_chunks, Chunk};
pub use retrieval::request::{build_request, QueryParams, APPLICATION_TAG, DEFAULT_SERVER};

pub use types::date_range::DateRange;
pub use types::field_value::FieldValue;
pub use types::merged::{
    ChunkError, Column, ColumnTable, DatumTable, ErrorLog, MergedResult, Retrieval,
};
pub use types::options::{Datum, Interval, TimeZone, UnknownOption, Units};
pub use types::product::Product;
