//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` so they depend only on driving ports
//! and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureMoviesCommand, FixtureMoviesQuery, FixtureRatingsCommand, FixtureRatingsQuery,
    MoviesCommand, MoviesQuery, RatingsCommand, RatingsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub movies: Arc<dyn MoviesCommand>,
    pub movies_query: Arc<dyn MoviesQuery>,
    pub ratings: Arc<dyn RatingsCommand>,
    pub ratings_query: Arc<dyn RatingsQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        movies: Arc<dyn MoviesCommand>,
        movies_query: Arc<dyn MoviesQuery>,
        ratings: Arc<dyn RatingsCommand>,
        ratings_query: Arc<dyn RatingsQuery>,
    ) -> Self {
        Self {
            movies,
            movies_query,
            ratings,
            ratings_query,
        }
    }

    /// State backed entirely by fixture ports.
    ///
    /// # Examples
    /// ```
    /// use movie_catalogue::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixtures();
    /// let _movies = state.movies.clone();
    /// ```
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureMoviesCommand),
            Arc::new(FixtureMoviesQuery),
            Arc::new(FixtureRatingsCommand),
            Arc::new(FixtureRatingsQuery),
        )
    }
}
