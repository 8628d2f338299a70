use crate::retrieval::error::FetchError;
use log::debug;
use reqwest::Client;
use std::future::Future;
use url::Url;

/// Retrieves the raw body behind a data API url.
pub trait Fetch {
    /// Returns the full response body.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request cannot be sent, the status is not
    /// a success, or the body cannot be read.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// [`Fetch`] over HTTP with `reqwest`. Non-success statuses are errors.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// A fetcher with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client, e.g. one with a request timeout or proxy.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::BodyRead(url.to_string(), e))?;
        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
