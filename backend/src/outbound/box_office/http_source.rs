//! Reqwest-backed box-office source.
//!
//! Owns transport details only: request building, the client-level timeout,
//! status mapping and JSON decoding into [`BoxOfficeRecord`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::{BoxOfficeResponseDto, RecordDefaults};
use crate::domain::BoxOfficeRecord;
use crate::domain::ports::{BoxOfficeSource, BoxOfficeSourceError};

/// Source name recorded on box-office data when none is configured.
pub const DEFAULT_SOURCE_NAME: &str = "ExampleBoxOfficeAPI";
/// Client-level request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

const LOOKUP_PATH: &str = "boxoffice";
const API_KEY_HEADER: &str = "X-API-Key";

/// Connection settings for the box-office API.
#[derive(Clone)]
pub struct BoxOfficeHttpConfig {
    /// Base URL; the lookup path is appended to it.
    pub base_url: Url,
    /// Value sent in the `X-API-Key` header.
    pub api_key: Zeroizing<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Name stored as the box-office `source`.
    pub source_name: String,
}

impl BoxOfficeHttpConfig {
    /// Settings with default timeout and source name.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: Zeroizing::new(api_key.into()),
            timeout: DEFAULT_TIMEOUT,
            source_name: DEFAULT_SOURCE_NAME.to_owned(),
        }
    }
}

impl std::fmt::Debug for BoxOfficeHttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxOfficeHttpConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("source_name", &self.source_name)
            .finish()
    }
}

/// [`BoxOfficeSource`] performing `GET {base}/boxoffice?title=...`.
pub struct BoxOfficeHttpSource {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
    source_name: String,
    clock: Arc<dyn Clock>,
}

impl BoxOfficeHttpSource {
    /// Build the adapter.
    ///
    /// `clock` stamps `lastUpdated` when the payload does not carry one.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: BoxOfficeHttpConfig, clock: Arc<dyn Clock>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: lookup_endpoint(config.base_url),
            api_key: config.api_key,
            source_name: config.source_name,
            clock,
        })
    }
}

#[async_trait]
impl BoxOfficeSource for BoxOfficeHttpSource {
    async fn fetch(&self, title: &str) -> Result<Option<BoxOfficeRecord>, BoxOfficeSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("title", title)])
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status != StatusCode::OK {
            return Err(BoxOfficeSourceError::status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let defaults = RecordDefaults {
            source: &self.source_name,
            fetched_at: self.clock.utc(),
        };
        parse_record(body.as_ref(), &defaults).map(Some)
    }
}

fn lookup_endpoint(mut base_url: Url) -> Url {
    if let Ok(mut segments) = base_url.path_segments_mut() {
        segments.pop_if_empty().push(LOOKUP_PATH);
    }
    base_url
}

fn parse_record(
    body: &[u8],
    defaults: &RecordDefaults<'_>,
) -> Result<BoxOfficeRecord, BoxOfficeSourceError> {
    let decoded: BoxOfficeResponseDto = serde_json::from_slice(body).map_err(|error| {
        BoxOfficeSourceError::decode(format!("invalid box office payload: {error}"))
    })?;
    Ok(decoded.into_record(defaults))
}

fn map_transport_error(error: reqwest::Error) -> BoxOfficeSourceError {
    if error.is_timeout() {
        BoxOfficeSourceError::timeout(error.to_string())
    } else if error.is_decode() {
        BoxOfficeSourceError::decode(error.to_string())
    } else {
        BoxOfficeSourceError::transport(error.to_string())
    }
}

#[cfg(test)]
#[path = "http_source_tests.rs"]
mod tests;
