//! The main entry point: a client for the NOAA CO-OPS data API that fetches
//! arbitrarily long date ranges by splitting them into requests the service
//! accepts and merging the answers.

use crate::error::CoopsError;
use crate::retrieval::fetcher::{Fetch, HttpFetcher};
use crate::retrieval::merger::Merger;
use crate::retrieval::pacer::{FixedDelay, Pacer};
use crate::retrieval::parser::parse_chunk_response;
use crate::retrieval::planner::plan_chunks;
use crate::retrieval::request::{build_request, parse_server, QueryParams, DEFAULT_SERVER};
use crate::types::date_range::DateRange;
use crate::types::merged::Retrieval;
use crate::types::options::{Datum, Interval, TimeZone, Units};
use crate::types::product::Product;
use bon::bon;
use log::{info, warn};
use url::Url;

/// Span requested when no date range is given.
pub const DEFAULT_SPAN_DAYS: i64 = 31;

/// A client for the CO-OPS data API.
///
/// Requests are always sent one at a time with a pause after each one; the
/// service expects that courtesy from its clients.
///
/// # Examples
///
/// ```no_run
/// # use coops::{Coops, CoopsError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), CoopsError> {
/// let client = Coops::new()?;
/// let retrieval = client.get_data().station("9414290").call().await?;
/// println!("Errors: {}", retrieval.errors);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Coops<F = HttpFetcher, P = FixedDelay> {
    server: Url,
    fetcher: F,
    pacer: P,
}

impl Coops {
    /// A client for the public data API endpoint.
    ///
    /// # Returns
    ///
    /// A `Coops` client using [`HttpFetcher`] and a [`FixedDelay`] between requests.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in endpoint cannot be parsed, which does not happen
    /// in practice.
    pub fn new() -> Result<Self, CoopsError> {
        Self::with_server(DEFAULT_SERVER)
    }

    /// A client for a different endpoint, such as a mirror or a test server.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigurationError::InvalidServerUrl`] if `server` is not a url.
    pub fn with_server(server: &str) -> Result<Self, CoopsError> {
        Ok(Self::with_parts(
            parse_server(server)?,
            HttpFetcher::new(),
            FixedDelay,
        ))
    }
}

impl<F: Fetch, P: Pacer> Coops<F, P> {
    /// Assembles a client from its collaborators.
    ///
    /// # Arguments
    ///
    /// * `server` - The data API endpoint. Query parameters are appended to it.
    /// * `fetcher` - Transport used to retrieve each chunk's body.
    /// * `pacer` - Waits after every attempted chunk.
    pub fn with_parts(server: Url, fetcher: F, pacer: P) -> Self {
        Self {
            server,
            fetcher,
            pacer,
        }
    }

    /// The endpoint every request is sent to.
    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Runs a fully specified query.
    ///
    /// Every planned chunk is requested in order. A chunk the service refuses
    /// is logged in [`Retrieval::errors`] and skipped; a transport failure ends
    /// the whole retrieval.
    ///
    /// # Errors
    ///
    /// Returns [`CoopsError::Configuration`] before any request is sent if the
    /// parameters are invalid, and [`CoopsError::Fetch`] if a request fails.
    pub async fn retrieve(&self, params: &QueryParams) -> Result<Retrieval, CoopsError> {
        params.validate()?;

        let chunks = plan_chunks(&params.range, params.product);
        info!(
            "Retrieving {} for station {} ({}) in {} request(s)",
            params.product,
            params.station,
            params.range,
            chunks.len()
        );

        let mut merger = Merger::new();
        for chunk in &chunks {
            let url = build_request(&self.server, chunk, params)?;
            info!("Querying the data API via {}", url);

            let raw = self.fetcher.fetch(&url).await?;
            match parse_chunk_response(&raw) {
                Ok(response) => merger.merge(chunk, response),
                Err(e) => {
                    warn!("Unreadable response for {} to {}: {}", chunk.start, chunk.end, e);
                    merger.record_error(chunk, e.to_string());
                }
            }

            self.pacer.pause().await;
        }

        Ok(merger.finish(params.product))
    }
}

#[bon]
impl<F: Fetch, P: Pacer> Coops<F, P> {
    /// Fetches observations or product data for one station.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.station(&str)`: **Required.** Water level station id or current meter designation.
    /// * `.range(DateRange)`: Optional. Defaults to the 31 days before the call.
    /// * `.product(Product)`: Optional. Defaults to [`Product::WaterLevel`].
    /// * `.datum(Datum)`: Optional. Defaults to [`Datum::Stnd`].
    /// * `.units(Units)`: Optional. Defaults to [`Units::Metric`].
    /// * `.time_zone(TimeZone)`: Optional. Defaults to [`TimeZone::Gmt`].
    /// * `.interval(Interval)`: Optional. Only for hourly or high/low data.
    /// * `.bin(impl Into<String>)`: Optional. Current meter bin, used only with [`Product::Currents`].
    ///
    /// # Errors
    ///
    /// See [`Coops::retrieve`]. Errors reported by the service for individual
    /// chunks are returned in [`Retrieval::errors`], not as `Err`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use coops::{Coops, CoopsError, DateRange, Product};
    /// # use chrono::NaiveDate;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), CoopsError> {
    /// let client = Coops::new()?;
    /// let range = DateRange::from_dates(
    ///     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
    /// );
    /// let retrieval = client
    ///     .get_data()
    ///     .station("9414290")
    ///     .range(range)
    ///     .product(Product::HourlyHeight)
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn get_data(
        &self,
        station: &str,
        range: Option<DateRange>,
        #[builder(default)] product: Product,
        #[builder(default)] datum: Datum,
        #[builder(default)] units: Units,
        #[builder(default)] time_zone: TimeZone,
        interval: Option<Interval>,
        #[builder(into)] bin: Option<String>,
    ) -> Result<Retrieval, CoopsError> {
        let params = QueryParams {
            station: station.to_string(),
            range: range.unwrap_or_else(|| DateRange::last_days(DEFAULT_SPAN_DAYS)),
            product,
            datum,
            units,
            time_zone,
            interval,
            bin,
        };
        self.retrieve(&params).await
    }
}
