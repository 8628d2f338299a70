//! Builds the data API url for one chunk of a query.

use crate::error::ConfigurationError;
use crate::retrieval::planner::Chunk;
use crate::types::date_range::DateRange;
use crate::types::options::{Datum, Interval, TimeZone, Units};
use crate::types::product::Product;
use url::Url;

/// The public CO-OPS data API endpoint.
pub const DEFAULT_SERVER: &str = "https://tidesandcurrents.noaa.gov/api/datagetter";

/// Sent as `application` so the service can attribute traffic to this client.
pub const APPLICATION_TAG: &str = "coops_rs";

const DATE_FORMAT: &str = "%Y%m%d %H:%M";

/// Everything that describes one logical data request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub station: String,
    pub range: DateRange,
    pub product: Product,
    pub datum: Datum,
    pub units: Units,
    pub time_zone: TimeZone,
    pub interval: Option<Interval>,
    /// Current meter bin; only sent for [`Product::Currents`].
    pub bin: Option<String>,
}

impl QueryParams {
    /// Checks the parameters before anything is planned or sent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyStationId`] if the station id is empty
    /// or only whitespace.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.station.trim().is_empty() {
            return Err(ConfigurationError::EmptyStationId);
        }
        Ok(())
    }

    fn bin(&self) -> Option<&str> {
        match (self.product, self.bin.as_deref()) {
            (Product::Currents, Some(bin)) if !bin.is_empty() => Some(bin),
            _ => None,
        }
    }
}

/// Builds the GET url for `chunk` against `server`.
///
/// A bin, when it applies, replaces the interval parameter.
///
/// # Arguments
///
/// * `server` - The data API endpoint.
/// * `chunk` - The window sent as `begin_date` and `end_date`.
/// * `params` - Station and query options shared by every chunk.
///
/// # Errors
///
/// Returns a [`ConfigurationError`] if `params` fails [`QueryParams::validate`].
pub fn build_request(
    server: &Url,
    chunk: &Chunk,
    params: &QueryParams,
) -> Result<Url, ConfigurationError> {
    params.validate()?;

    let mut url = server.clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("begin_date", &chunk.start.format(DATE_FORMAT).to_string())
            .append_pair("end_date", &chunk.end.format(DATE_FORMAT).to_string())
            .append_pair("station", &params.station)
            .append_pair("product", params.product.as_str())
            .append_pair("datum", params.datum.as_str())
            .append_pair("units", params.units.as_str())
            .append_pair("time_zone", params.time_zone.as_str())
            .append_pair("application", APPLICATION_TAG)
            .append_pair("format", "csv");

        if let Some(bin) = params.bin() {
            query.append_pair("bin", bin);
        } else if let Some(interval) = params.interval {
            query.append_pair("interval", interval.as_str());
        }
    }
    Ok(url)
}

/// Parses a data API endpoint, rejecting anything `Url` cannot represent.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidServerUrl`] with the rejected input.
pub fn parse_server(server: &str) -> Result<Url, ConfigurationError> {
    Url::parse(server).map_err(|e| ConfigurationError::InvalidServerUrl(server.to_string(), e))
}
