//! Catalogue listing service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use tracing::error;

use crate::domain::ports::{
    ListMoviesRequest, MovieListQuery, MovieRepository, MovieRepositoryError, MoviesQuery,
};
use crate::domain::{Error, Movie};

fn map_repository_error(err: MovieRepositoryError) -> Error {
    error!(error = %err, "movie listing failed");
    match err {
        MovieRepositoryError::Connection { message } => {
            Error::internal(format!("movie repository unavailable: {message}"))
        }
        other => Error::internal(format!("movie repository error: {other}")),
    }
}

/// Catalogue service implementing [`MoviesQuery`].
#[derive(Clone)]
pub struct MovieCatalogueService<M> {
    movies: Arc<M>,
}

impl<M> MovieCatalogueService<M> {
    /// Create the service over a movie repository.
    pub fn new(movies: Arc<M>) -> Self {
        Self { movies }
    }
}

#[async_trait]
impl<M> MoviesQuery for MovieCatalogueService<M>
where
    M: MovieRepository,
{
    async fn list_movies(&self, request: ListMoviesRequest) -> Result<Page<Movie>, Error> {
        let query = MovieListQuery {
            predicates: request.filter.predicates(),
            limit: request.page.probe_size(),
            offset: request.page.offset(),
        };
        let rows = self
            .movies
            .list(&query)
            .await
            .map_err(map_repository_error)?;
        Ok(Page::from_probe(request.page, rows))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pagination::{Cursor, PageRequest};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockMovieRepository;
    use crate::domain::{ErrorCode, MovieColumn, MovieFilter, MovieId};

    fn movie(id: i64) -> Movie {
        Movie {
            id: MovieId::new(id),
            title: format!("Movie {id}"),
            genre: "Drama".to_owned(),
            release_date: NaiveDate::from_ymd_opt(2001, 1, 1).expect("valid date"),
            distributor: None,
            budget: None,
            mpa_rating: None,
            box_office: None,
        }
    }

    #[tokio::test]
    async fn requests_one_extra_row_and_emits_cursor() {
        let mut repo = MockMovieRepository::new();
        repo.expect_list()
            .withf(|query| {
                query.limit == 3
                    && query.offset == 0
                    && query.predicates.len() == 1
                    && query.predicates[0].column == MovieColumn::Genre
            })
            .times(1)
            .return_once(|_| Ok(vec![movie(1), movie(2), movie(3)]));
        let service = MovieCatalogueService::new(Arc::new(repo));

        let page = service
            .list_movies(ListMoviesRequest {
                filter: MovieFilter {
                    genre: Some("drama".to_owned()),
                    ..MovieFilter::default()
                },
                page: PageRequest::new(Some(2), None),
            })
            .await
            .expect("listing succeeds");

        assert_eq!(page.items().len(), 2);
        assert_eq!(page.next_cursor(), Some(Cursor::from_offset(2)));
    }

    #[tokio::test]
    async fn short_page_has_no_cursor() {
        let mut repo = MockMovieRepository::new();
        repo.expect_list()
            .withf(|query| query.offset == 2 && query.limit == 3)
            .times(1)
            .return_once(|_| Ok(vec![movie(3)]));
        let service = MovieCatalogueService::new(Arc::new(repo));

        let page = service
            .list_movies(ListMoviesRequest {
                filter: MovieFilter::default(),
                page: PageRequest::new(Some(2), Some(Cursor::from_offset(2))),
            })
            .await
            .expect("listing succeeds");

        assert_eq!(page.items(), &[movie(3)]);
        assert!(page.next_cursor().is_none());
    }

    #[rstest]
    #[case(MovieRepositoryError::connection("refused"))]
    #[case(MovieRepositoryError::query("syntax"))]
    #[tokio::test]
    async fn repository_failures_are_internal(#[case] failure: MovieRepositoryError) {
        let mut repo = MockMovieRepository::new();
        repo.expect_list().return_once(move |_| Err(failure));
        let service = MovieCatalogueService::new(Arc::new(repo));

        let err = service
            .list_movies(ListMoviesRequest {
                filter: MovieFilter::default(),
                page: PageRequest::new(None, None),
            })
            .await
            .expect_err("listing fails");

        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
