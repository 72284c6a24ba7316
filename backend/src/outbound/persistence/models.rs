//! Internal Diesel row structs.
//!
//! Never exposed to the domain; repositories convert at the boundary.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::{BoxOffice, Movie, MovieDraft, MovieEnrichment, MovieId};

use super::schema::{movies, ratings};

/// Full `movies` row, in column order.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = movies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MovieRow {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
    pub box_office_worldwide: Option<i64>,
    pub box_office_opening_weekend_usa: Option<i64>,
    pub box_office_currency: Option<String>,
    pub box_office_source: Option<String>,
    pub box_office_last_updated: Option<DateTime<Utc>>,
    #[expect(dead_code, reason = "audit column not surfaced by the catalogue")]
    pub created_at: DateTime<Utc>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        let box_office = BoxOffice::from_parts(
            row.box_office_worldwide,
            row.box_office_opening_weekend_usa,
            row.box_office_currency,
            row.box_office_source,
            row.box_office_last_updated,
        );
        Self {
            id: MovieId::new(row.id),
            title: row.title,
            genre: row.genre,
            release_date: row.release_date,
            distributor: row.distributor,
            budget: row.budget,
            mpa_rating: row.mpa_rating,
            box_office,
        }
    }
}

/// Required columns written by the initial insert.
#[derive(Debug, Insertable)]
#[diesel(table_name = movies)]
pub(crate) struct NewMovieRow<'a> {
    pub title: &'a str,
    pub genre: &'a str,
    pub release_date: NaiveDate,
}

impl<'a> From<&'a MovieDraft> for NewMovieRow<'a> {
    fn from(draft: &'a MovieDraft) -> Self {
        Self {
            title: draft.title.as_str(),
            genre: draft.genre.as_str(),
            release_date: draft.release_date,
        }
    }
}

/// Optional columns written by the enrichment update.
///
/// `None` writes NULL so the box-office group is cleared as a whole.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = movies)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MovieEnrichmentChangeset<'a> {
    pub distributor: Option<&'a str>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<&'a str>,
    pub box_office_worldwide: Option<i64>,
    pub box_office_opening_weekend_usa: Option<i64>,
    pub box_office_currency: Option<&'a str>,
    pub box_office_source: Option<&'a str>,
    pub box_office_last_updated: Option<DateTime<Utc>>,
}

impl<'a> From<&'a MovieEnrichment> for MovieEnrichmentChangeset<'a> {
    fn from(enrichment: &'a MovieEnrichment) -> Self {
        let box_office = enrichment.box_office.as_ref();
        Self {
            distributor: enrichment.distributor.as_deref(),
            budget: enrichment.budget,
            mpa_rating: enrichment.mpa_rating.as_deref(),
            box_office_worldwide: box_office.map(|bo| bo.revenue.worldwide),
            box_office_opening_weekend_usa: box_office.map(|bo| bo.revenue.opening_weekend_usa),
            box_office_currency: box_office.map(|bo| bo.currency.as_str()),
            box_office_source: box_office.map(|bo| bo.source.as_str()),
            box_office_last_updated: box_office.map(|bo| bo.last_updated),
        }
    }
}

/// Rating insert row; `updated_at` falls back to the column default.
#[derive(Debug, Insertable)]
#[diesel(table_name = ratings)]
pub(crate) struct NewRatingRow<'a> {
    pub movie_title: &'a str,
    pub rater_id: &'a str,
    pub rating: f64,
}
