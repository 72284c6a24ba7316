//! Rating submission and aggregation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::error;

use crate::domain::ports::{
    MovieRepository, MovieRepositoryError, RatingRepository, RatingRepositoryError,
    RatingsCommand, RatingsQuery, SubmitRatingRequest, SubmitRatingResponse,
};
use crate::domain::{Error, Rating, RatingAggregate, RatingValue};

fn map_movie_error(err: MovieRepositoryError) -> Error {
    error!(error = %err, "movie lookup failed");
    Error::internal(format!("movie repository error: {err}"))
}

fn map_rating_error(err: RatingRepositoryError) -> Error {
    error!(error = %err, "rating persistence failed");
    match err {
        RatingRepositoryError::Connection { message } => {
            Error::internal(format!("rating repository unavailable: {message}"))
        }
        RatingRepositoryError::Query { message } => {
            Error::internal(format!("rating repository error: {message}"))
        }
    }
}

/// Rating service implementing [`RatingsCommand`] and [`RatingsQuery`].
#[derive(Clone)]
pub struct RatingService<M, R> {
    movies: Arc<M>,
    ratings: Arc<R>,
}

impl<M, R> RatingService<M, R> {
    /// Create the service over movie and rating repositories.
    pub fn new(movies: Arc<M>, ratings: Arc<R>) -> Self {
        Self { movies, ratings }
    }
}

impl<M, R> RatingService<M, R>
where
    M: MovieRepository,
{
    async fn ensure_movie_exists(&self, title: &str) -> Result<(), Error> {
        let exists = self
            .movies
            .exists_by_title(title)
            .await
            .map_err(map_movie_error)?;
        if exists {
            Ok(())
        } else {
            Err(Error::not_found(format!("movie not found: {title}")))
        }
    }
}

#[async_trait]
impl<M, R> RatingsCommand for RatingService<M, R>
where
    M: MovieRepository,
    R: RatingRepository,
{
    async fn submit_rating(
        &self,
        request: SubmitRatingRequest,
    ) -> Result<SubmitRatingResponse, Error> {
        let value = RatingValue::new(request.rating).ok_or_else(|| {
            Error::invalid_rating("rating must be one of 0.5, 1.0, ..., 5.0")
                .with_details(json!({ "field": "rating", "value": request.rating }))
        })?;
        let rater_id = request.rater_id.trim();
        if rater_id.is_empty() {
            return Err(Error::validation("rater id must not be blank")
                .with_details(json!({ "field": "raterId", "code": "missing_field" })));
        }
        self.ensure_movie_exists(&request.movie_title).await?;

        let rating = Rating {
            movie_title: request.movie_title,
            rater_id: rater_id.to_owned(),
            value,
        };
        let outcome = self
            .ratings
            .upsert(&rating)
            .await
            .map_err(map_rating_error)?;
        Ok(SubmitRatingResponse { rating, outcome })
    }
}

#[async_trait]
impl<M, R> RatingsQuery for RatingService<M, R>
where
    M: MovieRepository,
    R: RatingRepository,
{
    async fn rating_aggregate(&self, movie_title: &str) -> Result<RatingAggregate, Error> {
        self.ensure_movie_exists(movie_title).await?;
        let totals = self
            .ratings
            .totals(movie_title)
            .await
            .map_err(map_rating_error)?;
        Ok(RatingAggregate::from_totals(totals.average, totals.count))
    }
}

#[cfg(test)]
#[path = "rating_service_tests.rs"]
mod tests;
