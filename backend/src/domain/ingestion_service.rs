//! Movie ingestion: validate, insert, enrich, merge, persist.
//!
//! The box-office lookup runs after the minimal insert and is allowed to fail.
//! Only persistence failures abort creation. When the enrichment update fails
//! the inserted row is deleted again so the title is not left blocked.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, warn};
use url::Url;

use crate::domain::ports::{
    BoxOfficeSource, CreateMovieRequest, CreateMovieResponse, MovieRepository,
    MovieRepositoryError, MoviesCommand,
};
use crate::domain::{
    BoxOfficeRecord, Error, Movie, MovieDraft, MovieEnrichment, MovieId, MovieValidationError,
};

/// Default bound on the box-office lookup.
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(3);

const LOCATION_BASE: &str = "http://catalogue.local/movies";

/// Path addressing a movie, with the title percent-encoded as one segment.
///
/// # Examples
/// ```
/// use movie_catalogue::domain::movie_location;
///
/// assert_eq!(movie_location("The Matrix"), "/movies/The%20Matrix");
/// assert_eq!(movie_location("AC/DC"), "/movies/AC%2FDC");
/// ```
pub fn movie_location(title: &str) -> String {
    let Ok(mut url) = Url::parse(LOCATION_BASE) else {
        return format!("/movies/{title}");
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(title);
    }
    url.path().to_owned()
}

fn map_validation_error(err: &MovieValidationError) -> Error {
    let code = match err {
        MovieValidationError::Missing { .. } => "missing_field",
        MovieValidationError::InvalidReleaseDate { .. } => "invalid_date",
        MovieValidationError::NegativeBudget => "negative_budget",
    };
    Error::validation(err.to_string()).with_details(json!({
        "field": err.field().as_str(),
        "code": code,
    }))
}

fn map_repository_error(err: MovieRepositoryError) -> Error {
    match err {
        MovieRepositoryError::DuplicateTitle { .. } => Error::validation("Movie already exists"),
        MovieRepositoryError::Connection { message } => {
            Error::internal(format!("movie repository unavailable: {message}"))
        }
        MovieRepositoryError::Query { message } => {
            Error::internal(format!("movie repository error: {message}"))
        }
    }
}

/// Ingestion service implementing [`MoviesCommand`].
#[derive(Clone)]
pub struct MovieIngestionService<M, S> {
    movies: Arc<M>,
    box_office: Arc<S>,
    enrichment_timeout: Duration,
}

impl<M, S> MovieIngestionService<M, S> {
    /// Create the service with [`DEFAULT_ENRICHMENT_TIMEOUT`].
    pub fn new(movies: Arc<M>, box_office: Arc<S>) -> Self {
        Self {
            movies,
            box_office,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    /// Override the box-office lookup bound.
    #[must_use]
    pub fn with_enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.enrichment_timeout = timeout;
        self
    }
}

impl<M, S> MovieIngestionService<M, S>
where
    M: MovieRepository,
    S: BoxOfficeSource,
{
    /// Look the title up upstream; every failure degrades to `None`.
    async fn lookup_box_office(&self, title: &str) -> Option<BoxOfficeRecord> {
        match tokio::time::timeout(self.enrichment_timeout, self.box_office.fetch(title)).await {
            Ok(Ok(Some(record))) => Some(record),
            Ok(Ok(None)) => {
                debug!(%title, "box office source has no record for title");
                None
            }
            Ok(Err(err)) => {
                warn!(%title, error = %err, "box office lookup failed; storing movie without it");
                None
            }
            Err(_) => {
                warn!(
                    %title,
                    timeout_ms = self.enrichment_timeout.as_millis(),
                    "box office lookup timed out; storing movie without it"
                );
                None
            }
        }
    }

    async fn discard_inserted(&self, id: MovieId, title: &str) {
        if let Err(err) = self.movies.delete(id).await {
            error!(
                %title,
                movie_id = %id,
                error = %err,
                "failed to delete partially created movie"
            );
        }
    }
}

#[async_trait]
impl<M, S> MoviesCommand for MovieIngestionService<M, S>
where
    M: MovieRepository,
    S: BoxOfficeSource,
{
    async fn create_movie(&self, request: CreateMovieRequest) -> Result<CreateMovieResponse, Error> {
        let draft = MovieDraft::parse(
            &request.title,
            &request.genre,
            &request.release_date,
            request.distributor.as_deref(),
            request.budget,
            request.mpa_rating.as_deref(),
        )
        .map_err(|err| map_validation_error(&err))?;

        let id = self.movies.insert(&draft).await.map_err(|err| {
            if matches!(err, MovieRepositoryError::DuplicateTitle { .. }) {
                debug!(title = %draft.title, "rejected duplicate movie title");
            } else {
                error!(title = %draft.title, error = %err, "movie insert failed");
            }
            map_repository_error(err)
        })?;

        let record = self.lookup_box_office(&draft.title).await;
        let enrichment = MovieEnrichment::merge(&draft, record);

        if let Err(err) = self.movies.apply_enrichment(id, &enrichment).await {
            error!(title = %draft.title, movie_id = %id, error = %err, "movie enrichment update failed");
            self.discard_inserted(id, &draft.title).await;
            return Err(map_repository_error(err));
        }

        let location = movie_location(&draft.title);
        Ok(CreateMovieResponse {
            movie: Movie::from_draft(id, draft, enrichment),
            location,
        })
    }
}

#[cfg(test)]
#[path = "ingestion_service_tests.rs"]
mod tests;
