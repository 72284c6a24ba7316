//! Driven port for the external box-office source.
//!
//! The source is slow and unreliable. Callers treat every error as "no
//! enrichment data"; nothing here retries.

use async_trait::async_trait;

use crate::domain::BoxOfficeRecord;

use super::define_port_error;

define_port_error! {
    /// Upstream failures raised while fetching box-office data.
    pub enum BoxOfficeSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "box office transport failed: {message}",
        /// The call exceeded its deadline.
        Timeout { message: String } =>
            "box office request timed out: {message}",
        /// Upstream answered with an unexpected status.
        Status { status: u16 } =>
            "box office returned unexpected status {status}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "box office response decode failed: {message}",
    }
}

/// Port for looking up box-office data by exact title.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoxOfficeSource: Send + Sync {
    /// Fetch the record for `title`.
    ///
    /// `Ok(None)` means the source does not know the title.
    ///
    /// # Examples
    ///
    /// ```
    /// use movie_catalogue::domain::ports::{BoxOfficeSource, FixtureBoxOfficeSource};
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let record = FixtureBoxOfficeSource.fetch("Inception").await.unwrap();
    /// assert!(record.is_none());
    /// # });
    /// ```
    async fn fetch(&self, title: &str) -> Result<Option<BoxOfficeRecord>, BoxOfficeSourceError>;
}

/// Fixture source that knows no titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureBoxOfficeSource;

#[async_trait]
impl BoxOfficeSource for FixtureBoxOfficeSource {
    async fn fetch(&self, _title: &str) -> Result<Option<BoxOfficeRecord>, BoxOfficeSourceError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BoxOfficeSourceError::timeout("3s elapsed"), "box office request timed out: 3s elapsed")]
    #[case(BoxOfficeSourceError::status(503_u16), "box office returned unexpected status 503")]
    #[case(BoxOfficeSourceError::decode("eof"), "box office response decode failed: eof")]
    fn errors_render_context(#[case] error: BoxOfficeSourceError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
