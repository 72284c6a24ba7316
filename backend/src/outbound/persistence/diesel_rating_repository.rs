//! PostgreSQL-backed rating repository.

use async_trait::async_trait;
use diesel::dsl::{avg, count_star, now, sql};
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RatingRepository, RatingRepositoryError, RatingTotals};
use crate::domain::{Rating, RatingUpsertOutcome};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::NewRatingRow;
use super::pool::{DbPool, PoolError};
use super::schema::ratings;

/// `xmax` is zero only on a tuple created by this statement, so it tells an
/// insert apart from the conflict-update branch.
const INSERTED_FLAG: &str = "xmax = 0";

/// Diesel-backed implementation of [`RatingRepository`].
#[derive(Clone)]
pub struct DieselRatingRepository {
    pool: DbPool,
}

impl DieselRatingRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> RatingRepositoryError {
    map_pool_error(error, RatingRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error, operation: &str) -> RatingRepositoryError {
    map_diesel_error(
        error,
        operation,
        RatingRepositoryError::query,
        RatingRepositoryError::connection,
    )
}

/// Single-statement upsert returning whether the row was inserted.
macro_rules! rating_upsert {
    ($rating:expr) => {
        diesel::insert_into(ratings::table)
            .values(NewRatingRow {
                movie_title: $rating.movie_title.as_str(),
                rater_id: $rating.rater_id.as_str(),
                rating: $rating.value.value(),
            })
            .on_conflict((ratings::movie_title, ratings::rater_id))
            .do_update()
            .set((
                ratings::rating.eq(excluded(ratings::rating)),
                ratings::updated_at.eq(now),
            ))
            .returning(sql::<Bool>(INSERTED_FLAG))
    };
}

#[async_trait]
impl RatingRepository for DieselRatingRepository {
    async fn upsert(&self, rating: &Rating) -> Result<RatingUpsertOutcome, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        rating_upsert!(rating)
            .get_result::<bool>(&mut conn)
            .await
            .map(RatingUpsertOutcome::from_inserted)
            .map_err(|error| diesel_error(error, "upsert rating"))
    }

    async fn totals(&self, movie_title: &str) -> Result<RatingTotals, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let (average, count) = ratings::table
            .filter(ratings::movie_title.eq(movie_title))
            .select((avg(ratings::rating), count_star()))
            .get_result::<(Option<f64>, i64)>(&mut conn)
            .await
            .map_err(|error| diesel_error(error, "aggregate ratings"))?;
        Ok(RatingTotals { average, count })
    }
}

#[cfg(test)]
mod tests {
    //! SQL rendering checks; no database required.

    use diesel::debug_query;
    use diesel::pg::Pg;

    use super::*;
    use crate::domain::RatingValue;

    fn rating() -> Rating {
        Rating {
            movie_title: "Inception".to_owned(),
            rater_id: "user-1".to_owned(),
            value: RatingValue::new(4.5).expect("valid rating"),
        }
    }

    #[test]
    fn upsert_is_one_statement_reporting_insertion() {
        let rating = rating();
        let statement = rating_upsert!(rating);
        let sql = debug_query::<Pg, _>(&statement).to_string();

        assert!(sql.starts_with("INSERT INTO \"ratings\""), "{sql}");
        assert!(
            sql.contains("ON CONFLICT (\"movie_title\", \"rater_id\") DO UPDATE SET"),
            "{sql}"
        );
        assert!(sql.contains("\"rating\" = excluded.\"rating\""), "{sql}");
        assert!(sql.contains("RETURNING xmax = 0"), "{sql}");
        assert!(sql.contains("4.5"), "{sql}");
    }

    #[test]
    fn totals_query_averages_and_counts_one_title() {
        let query = ratings::table
            .filter(ratings::movie_title.eq("Inception"))
            .select((avg(ratings::rating), count_star()));
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains("avg(\"ratings\".\"rating\")"), "{sql}");
        assert!(sql.contains("COUNT(*)"), "{sql}");
        assert!(sql.contains("\"ratings\".\"movie_title\" = $1"), "{sql}");
    }
}
