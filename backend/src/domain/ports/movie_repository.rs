//! Driven port for movie persistence.

use async_trait::async_trait;

use crate::domain::{Movie, MovieDraft, MovieEnrichment, MovieId, MoviePredicate};

use super::define_port_error;

define_port_error! {
    /// Errors raised by movie repository adapters.
    pub enum MovieRepositoryError {
        /// A movie with this title already exists.
        DuplicateTitle { title: String } =>
            "movie already exists: {title}",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "movie repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "movie repository query failed: {message}",
    }
}

/// Predicate-filtered window over movies ordered by ascending id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieListQuery {
    /// Conjunctive conditions.
    pub predicates: Vec<MoviePredicate>,
    /// Maximum rows to return.
    pub limit: usize,
    /// Rows to skip.
    pub offset: u64,
}

/// Port for writing and scanning movies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Insert the required columns of a new movie and return its id.
    ///
    /// Fails with [`MovieRepositoryError::DuplicateTitle`] when the title is
    /// taken.
    async fn insert(&self, draft: &MovieDraft) -> Result<MovieId, MovieRepositoryError>;

    /// Overwrite the optional columns of an existing movie.
    async fn apply_enrichment(
        &self,
        id: MovieId,
        enrichment: &MovieEnrichment,
    ) -> Result<(), MovieRepositoryError>;

    /// Remove a movie. Deleting an unknown id is not an error.
    async fn delete(&self, id: MovieId) -> Result<(), MovieRepositoryError>;

    /// Return the rows selected by `query`.
    async fn list(&self, query: &MovieListQuery) -> Result<Vec<Movie>, MovieRepositoryError>;

    /// Report whether a movie with exactly this title exists.
    async fn exists_by_title(&self, title: &str) -> Result<bool, MovieRepositoryError>;
}

/// Fixture repository that accepts writes and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMovieRepository;

#[async_trait]
impl MovieRepository for FixtureMovieRepository {
    async fn insert(&self, _draft: &MovieDraft) -> Result<MovieId, MovieRepositoryError> {
        Ok(MovieId::new(1))
    }

    async fn apply_enrichment(
        &self,
        _id: MovieId,
        _enrichment: &MovieEnrichment,
    ) -> Result<(), MovieRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: MovieId) -> Result<(), MovieRepositoryError> {
        Ok(())
    }

    async fn list(&self, _query: &MovieListQuery) -> Result<Vec<Movie>, MovieRepositoryError> {
        Ok(Vec::new())
    }

    async fn exists_by_title(&self, _title: &str) -> Result<bool, MovieRepositoryError> {
        Ok(false)
    }
}
