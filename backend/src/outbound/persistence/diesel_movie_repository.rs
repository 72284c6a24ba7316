//! PostgreSQL-backed movie repository.
//!
//! Listing predicates are rendered onto a boxed query once per call; every
//! operand is a bind parameter.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{MovieListQuery, MovieRepository, MovieRepositoryError};
use crate::domain::{
    Movie, MovieColumn, MovieDraft, MovieEnrichment, MovieId, MoviePredicate, PredicateOperator,
    PredicateValue, year_bounds,
};

use super::diesel_helpers::{
    contains_pattern, escape_like, is_unique_violation, map_diesel_error, map_pool_error,
};
use super::models::{MovieEnrichmentChangeset, MovieRow, NewMovieRow};
use super::pool::{DbPool, PoolError};
use super::schema::movies;

type MovieQuery = movies::BoxedQuery<'static, Pg>;

/// Diesel-backed implementation of [`MovieRepository`].
#[derive(Clone)]
pub struct DieselMovieRepository {
    pool: DbPool,
}

impl DieselMovieRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> MovieRepositoryError {
    map_pool_error(error, MovieRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error, operation: &str) -> MovieRepositoryError {
    map_diesel_error(
        error,
        operation,
        MovieRepositoryError::query,
        MovieRepositoryError::connection,
    )
}

fn unsupported(predicate: &MoviePredicate) -> MovieRepositoryError {
    MovieRepositoryError::query(format!(
        "unsupported predicate {:?} {:?} {:?}",
        predicate.column, predicate.operator, predicate.value
    ))
}

/// Render one predicate onto `query`.
///
/// Returns `Ok(None)` when the predicate can match no row at all.
fn apply_predicate(
    query: MovieQuery,
    predicate: &MoviePredicate,
) -> Result<Option<MovieQuery>, MovieRepositoryError> {
    let rendered = match (predicate.column, predicate.operator, &predicate.value) {
        (MovieColumn::Title, PredicateOperator::ContainsIgnoreCase, PredicateValue::Text(text)) => {
            query.filter(movies::title.ilike(contains_pattern(text)))
        }
        (MovieColumn::ReleaseDate, PredicateOperator::InYear, PredicateValue::Year(year)) => {
            let Some((start, end)) = year_bounds(*year) else {
                return Ok(None);
            };
            query.filter(
                movies::release_date
                    .ge(start)
                    .and(movies::release_date.lt(end)),
            )
        }
        (MovieColumn::Genre, PredicateOperator::EqualsIgnoreCase, PredicateValue::Text(text)) => {
            query.filter(movies::genre.ilike(escape_like(text)))
        }
        (
            MovieColumn::Distributor,
            PredicateOperator::EqualsIgnoreCase,
            PredicateValue::Text(text),
        ) => query.filter(movies::distributor.ilike(escape_like(text))),
        (MovieColumn::Budget, PredicateOperator::AtMost, PredicateValue::Integer(max)) => {
            query.filter(movies::budget.le(*max))
        }
        (MovieColumn::MpaRating, PredicateOperator::Equals, PredicateValue::Text(text)) => {
            query.filter(movies::mpa_rating.eq(text.clone()))
        }
        _ => return Err(unsupported(predicate)),
    };
    Ok(Some(rendered))
}

/// Build the boxed listing query, or `None` when no row can match.
fn build_list_query(request: &MovieListQuery) -> Result<Option<MovieQuery>, MovieRepositoryError> {
    // Windows past `i64::MAX` cannot hold more rows than that; clamp them.
    let limit = i64::try_from(request.limit).unwrap_or(i64::MAX);
    let offset = i64::try_from(request.offset).unwrap_or(i64::MAX);

    let mut query: MovieQuery = movies::table.into_boxed();
    for predicate in &request.predicates {
        match apply_predicate(query, predicate)? {
            Some(next) => query = next,
            None => return Ok(None),
        }
    }
    Ok(Some(
        query
            .order(movies::id.asc())
            .limit(limit)
            .offset(offset),
    ))
}

#[async_trait]
impl MovieRepository for DieselMovieRepository {
    async fn insert(&self, draft: &MovieDraft) -> Result<MovieId, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(movies::table)
            .values(NewMovieRow::from(draft))
            .returning(movies::id)
            .get_result::<i64>(&mut conn)
            .await
            .map(MovieId::new)
            .map_err(|error| {
                if is_unique_violation(&error) {
                    MovieRepositoryError::duplicate_title(draft.title.as_str())
                } else {
                    diesel_error(error, "insert movie")
                }
            })
    }

    async fn apply_enrichment(
        &self,
        id: MovieId,
        enrichment: &MovieEnrichment,
    ) -> Result<(), MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(movies::table.find(id.value()))
            .set(MovieEnrichmentChangeset::from(enrichment))
            .execute(&mut conn)
            .await
            .map_err(|error| diesel_error(error, "update movie enrichment"))?;
        if updated == 0 {
            return Err(MovieRepositoryError::query(format!("movie {id} vanished before update")));
        }
        Ok(())
    }

    async fn delete(&self, id: MovieId) -> Result<(), MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::delete(movies::table.find(id.value()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| diesel_error(error, "delete movie"))
    }

    async fn list(&self, request: &MovieListQuery) -> Result<Vec<Movie>, MovieRepositoryError> {
        let Some(query) = build_list_query(request)? else {
            debug!("listing predicates exclude every row");
            return Ok(Vec::new());
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = query
            .load::<MovieRow>(&mut conn)
            .await
            .map_err(|error| diesel_error(error, "list movies"))?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::select(diesel::dsl::exists(
            movies::table.filter(movies::title.eq(title)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|error| diesel_error(error, "check movie exists"))
    }
}

#[cfg(test)]
mod tests {
    //! SQL rendering checks; no database required.

    use diesel::debug_query;
    use rstest::rstest;

    use super::*;
    use crate::domain::MovieFilter;

    fn render(filter: &MovieFilter, limit: usize, offset: u64) -> String {
        let request = MovieListQuery {
            predicates: filter.predicates(),
            limit,
            offset,
        };
        let query = build_list_query(&request)
            .expect("query builds")
            .expect("query can match rows");
        debug_query::<Pg, _>(&query).to_string()
    }

    #[test]
    fn unfiltered_listing_orders_by_id_with_limit_and_offset() {
        let sql = render(&MovieFilter::default(), 21, 40);
        assert!(sql.contains("ORDER BY \"movies\".\"id\" ASC"), "{sql}");
        assert!(sql.contains("LIMIT $1 OFFSET $2"), "{sql}");
        assert!(sql.contains("binds: [21, 40]"), "{sql}");
    }

    #[test]
    fn oversized_window_is_clamped_to_i64_range() {
        let sql = render(&MovieFilter::default(), usize::MAX, u64::MAX);
        let max = i64::MAX;
        assert!(sql.contains(&format!("binds: [{max}, {max}]")), "{sql}");
    }

    #[test]
    fn title_search_uses_escaped_ilike_bind() {
        let filter = MovieFilter {
            title: Some("100%_".to_owned()),
            ..MovieFilter::default()
        };
        let sql = render(&filter, 3, 0);
        assert!(sql.contains("\"movies\".\"title\" ILIKE $1"), "{sql}");
        assert!(sql.contains(r#""%100\\%\\_%""#), "{sql}");
    }

    #[test]
    fn year_renders_half_open_date_range() {
        let filter = MovieFilter {
            year: Some(2010),
            ..MovieFilter::default()
        };
        let sql = render(&filter, 3, 0);
        assert!(sql.contains("\"movies\".\"release_date\" >= $1"), "{sql}");
        assert!(sql.contains("\"movies\".\"release_date\" < $2"), "{sql}");
        assert!(sql.contains("2010-01-01"), "{sql}");
        assert!(sql.contains("2011-01-01"), "{sql}");
    }

    #[rstest]
    #[case(MovieFilter { genre: Some("Drama".into()), ..MovieFilter::default() }, "\"movies\".\"genre\" ILIKE $1")]
    #[case(MovieFilter { distributor: Some("A24".into()), ..MovieFilter::default() }, "\"movies\".\"distributor\" ILIKE $1")]
    #[case(MovieFilter { max_budget: Some(5), ..MovieFilter::default() }, "\"movies\".\"budget\" <= $1")]
    #[case(MovieFilter { mpa_rating: Some("R".into()), ..MovieFilter::default() }, "\"movies\".\"mpa_rating\" = $1")]
    fn single_filters_render_expected_condition(
        #[case] filter: MovieFilter,
        #[case] fragment: &str,
    ) {
        let sql = render(&filter, 3, 0);
        assert!(sql.contains(fragment), "{sql}");
    }

    #[test]
    fn filters_are_conjunctive() {
        let filter = MovieFilter {
            genre: Some("Drama".to_owned()),
            max_budget: Some(1_000),
            ..MovieFilter::default()
        };
        let sql = render(&filter, 3, 0);
        assert!(sql.contains("\"movies\".\"genre\" ILIKE $1"), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
        assert!(sql.contains("\"movies\".\"budget\" <= $2"), "{sql}");
    }

    #[test]
    fn unrepresentable_year_matches_nothing() {
        let request = MovieListQuery {
            predicates: MovieFilter {
                year: Some(i32::MAX),
                ..MovieFilter::default()
            }
            .predicates(),
            limit: 3,
            offset: 0,
        };
        assert!(build_list_query(&request).expect("query builds").is_none());
    }

    #[test]
    fn mismatched_predicate_is_rejected() {
        let request = MovieListQuery {
            predicates: vec![MoviePredicate::new(
                MovieColumn::Budget,
                PredicateOperator::ContainsIgnoreCase,
                PredicateValue::Text("x".to_owned()),
            )],
            limit: 3,
            offset: 0,
        };
        let Err(err) = build_list_query(&request) else {
            panic!("mismatched predicate should be rejected");
        };
        assert!(matches!(err, MovieRepositoryError::Query { .. }));
    }
}
