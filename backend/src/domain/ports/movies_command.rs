//! Driving port for movie creation.
//!
//! Inbound adapters hand over raw create input; validation, enrichment and
//! persistence happen behind the port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Error, Movie, MovieId};

/// Raw movie creation input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateMovieRequest {
    pub title: String,
    pub genre: String,
    /// ISO `YYYY-MM-DD` date; validated by the service.
    pub release_date: String,
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
}

/// Created movie plus the path that addresses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMovieResponse {
    pub movie: Movie,
    /// `/movies/{percent-encoded title}`.
    pub location: String,
}

/// Driving port for movie writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoviesCommand: Send + Sync {
    /// Create, enrich and persist a movie.
    ///
    /// # Errors
    ///
    /// - `VALIDATION_ERROR` for missing or malformed fields and duplicate
    ///   titles.
    /// - `INTERNAL_ERROR` when persistence fails.
    async fn create_movie(&self, request: CreateMovieRequest) -> Result<CreateMovieResponse, Error>;
}

/// Fixture command echoing the request back without enrichment.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMoviesCommand;

#[async_trait]
impl MoviesCommand for FixtureMoviesCommand {
    async fn create_movie(&self, request: CreateMovieRequest) -> Result<CreateMovieResponse, Error> {
        let release_date = NaiveDate::parse_from_str(&request.release_date, "%Y-%m-%d")
            .map_err(|err| Error::validation(format!("invalid releaseDate: {err}")))?;
        let location = format!("/movies/{}", request.title);
        Ok(CreateMovieResponse {
            movie: Movie {
                id: MovieId::new(1),
                title: request.title,
                genre: request.genre,
                release_date,
                distributor: request.distributor,
                budget: request.budget,
                mpa_rating: request.mpa_rating,
                box_office: None,
            },
            location,
        })
    }
}
