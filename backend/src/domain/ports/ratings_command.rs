//! Driving port for rating submissions.

use async_trait::async_trait;

use crate::domain::{Error, Rating, RatingUpsertOutcome, RatingValue};

/// One rater's score for a movie.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRatingRequest {
    pub movie_title: String,
    pub rater_id: String,
    /// Unvalidated numeric score.
    pub rating: f64,
}

/// Stored rating and whether it was new.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRatingResponse {
    pub rating: Rating,
    pub outcome: RatingUpsertOutcome,
}

/// Driving port for rating writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingsCommand: Send + Sync {
    /// Validate and upsert a rating.
    ///
    /// # Errors
    ///
    /// - `INVALID_RATING` for values off the half-step scale.
    /// - `VALIDATION_ERROR` for a blank rater id.
    /// - `NOT_FOUND` when the movie does not exist.
    /// - `INTERNAL_ERROR` when persistence fails.
    async fn submit_rating(
        &self,
        request: SubmitRatingRequest,
    ) -> Result<SubmitRatingResponse, Error>;
}

/// Fixture command that records nothing and reports every rating as new.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRatingsCommand;

#[async_trait]
impl RatingsCommand for FixtureRatingsCommand {
    async fn submit_rating(
        &self,
        request: SubmitRatingRequest,
    ) -> Result<SubmitRatingResponse, Error> {
        let value = RatingValue::new(request.rating)
            .ok_or_else(|| Error::invalid_rating("rating must be a half step between 0.5 and 5.0"))?;
        Ok(SubmitRatingResponse {
            rating: Rating {
                movie_title: request.movie_title,
                rater_id: request.rater_id,
                value,
            },
            outcome: RatingUpsertOutcome::Created,
        })
    }
}
