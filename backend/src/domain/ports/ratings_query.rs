//! Driving port for rating aggregates.

use async_trait::async_trait;

use crate::domain::{Error, RatingAggregate};

/// Driving port for rating reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingsQuery: Send + Sync {
    /// Average and count of a movie's ratings.
    ///
    /// Fails with `NOT_FOUND` when the movie does not exist.
    async fn rating_aggregate(&self, movie_title: &str) -> Result<RatingAggregate, Error>;
}

/// Fixture query reporting no ratings.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRatingsQuery;

#[async_trait]
impl RatingsQuery for FixtureRatingsQuery {
    async fn rating_aggregate(&self, _movie_title: &str) -> Result<RatingAggregate, Error> {
        Ok(RatingAggregate::from_totals(None, 0))
    }
}
