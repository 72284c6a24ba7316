//! Driving port for catalogue listings.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Movie, MovieFilter};

/// Filtered, paged listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMoviesRequest {
    pub filter: MovieFilter,
    pub page: PageRequest,
}

/// Driving port for catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoviesQuery: Send + Sync {
    /// Return one page of movies matching every present filter, ordered by
    /// ascending id.
    async fn list_movies(&self, request: ListMoviesRequest) -> Result<Page<Movie>, Error>;
}

/// Fixture query returning an empty final page.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMoviesQuery;

#[async_trait]
impl MoviesQuery for FixtureMoviesQuery {
    async fn list_movies(&self, request: ListMoviesRequest) -> Result<Page<Movie>, Error> {
        Ok(Page::from_probe(request.page, Vec::new()))
    }
}
