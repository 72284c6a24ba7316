//! Driven port for rating persistence.

use async_trait::async_trait;

use crate::domain::{Rating, RatingUpsertOutcome};

use super::define_port_error;

define_port_error! {
    /// Errors raised by rating repository adapters.
    pub enum RatingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "rating repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "rating repository query failed: {message}",
    }
}

/// Raw totals over one movie's ratings, before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingTotals {
    /// Mean rating, absent when there are no rows.
    pub average: Option<f64>,
    /// Number of ratings.
    pub count: i64,
}

/// Port for storing and summarising ratings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert or overwrite the rating keyed by `(movie_title, rater_id)`.
    ///
    /// The existence check and write happen atomically.
    async fn upsert(&self, rating: &Rating) -> Result<RatingUpsertOutcome, RatingRepositoryError>;

    /// Average and count of the ratings for `movie_title`.
    async fn totals(&self, movie_title: &str) -> Result<RatingTotals, RatingRepositoryError>;
}

/// Fixture repository that treats every rating as new.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRatingRepository;

#[async_trait]
impl RatingRepository for FixtureRatingRepository {
    async fn upsert(&self, _rating: &Rating) -> Result<RatingUpsertOutcome, RatingRepositoryError> {
        Ok(RatingUpsertOutcome::Created)
    }

    async fn totals(&self, _movie_title: &str) -> Result<RatingTotals, RatingRepositoryError> {
        Ok(RatingTotals::default())
    }
}
