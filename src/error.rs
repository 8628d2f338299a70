use crate::retrieval::error::FetchError;
use polars::error::PolarsError;
use thiserror::Error;

/// Query parameters that are rejected before any request is sent.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Station id must not be empty")]
    EmptyStationId,

    #[error("Invalid data API url '{0}'")]
    InvalidServerUrl(String, #[source] url::ParseError),
}

#[derive(Debug, Error)]
pub enum CoopsError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to build DataFrame: {0}")]
    DataFrame(#[from] PolarsError),
}
