//! Movie HTTP handlers.
//!
//! ```text
//! POST /movies
//! GET  /movies
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, NaiveDate, Utc};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateMovieRequest, ListMoviesRequest};
use crate::domain::{BoxOffice, Movie, MovieFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerAuth;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, lenient, lenient_cursor, non_blank};

/// Request payload for creating a movie.
///
/// Every field is optional at the wire level so that missing values surface
/// as field-level validation errors rather than body decoding failures.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieBody {
    #[schema(example = "Inception")]
    pub title: Option<String>,
    #[schema(example = "Sci-Fi")]
    pub genre: Option<String>,
    #[schema(format = "date", example = "2010-07-16")]
    pub release_date: Option<String>,
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    #[schema(example = "PG-13")]
    pub mpa_rating: Option<String>,
}

impl From<CreateMovieBody> for CreateMovieRequest {
    fn from(body: CreateMovieBody) -> Self {
        Self {
            title: body.title.unwrap_or_default(),
            genre: body.genre.unwrap_or_default(),
            release_date: body.release_date.unwrap_or_default(),
            distributor: body.distributor,
            budget: body.budget,
            mpa_rating: body.mpa_rating,
        }
    }
}

/// Box-office revenue figures.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoxOfficeRevenueBody {
    pub worldwide: i64,
    #[serde(rename = "openingWeekendUSA")]
    pub opening_weekend_usa: i64,
}

/// Box-office sub-record, present only when fully known.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoxOfficeBody {
    pub revenue: BoxOfficeRevenueBody,
    #[schema(example = "USD")]
    pub currency: String,
    #[schema(example = "ExampleBoxOfficeAPI")]
    pub source: String,
    pub last_updated: DateTime<Utc>,
}

impl From<BoxOffice> for BoxOfficeBody {
    fn from(value: BoxOffice) -> Self {
        Self {
            revenue: BoxOfficeRevenueBody {
                worldwide: value.revenue.worldwide,
                opening_weekend_usa: value.revenue.opening_weekend_usa,
            },
            currency: value.currency,
            source: value.source,
            last_updated: value.last_updated,
        }
    }
}

/// Movie record. Optional attributes serialise as `null` when unknown.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieBody {
    #[schema(example = "42")]
    pub id: String,
    pub title: String,
    pub genre: String,
    #[schema(value_type = String, format = "date")]
    pub release_date: NaiveDate,
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
    pub box_office: Option<BoxOfficeBody>,
}

impl From<Movie> for MovieBody {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title,
            genre: movie.genre,
            release_date: movie.release_date,
            distributor: movie.distributor,
            budget: movie.budget,
            mpa_rating: movie.mpa_rating,
            box_office: movie.box_office.map(BoxOfficeBody::from),
        }
    }
}

/// One page of movies. `nextCursor` is `null` on the last page.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoviePageBody {
    pub items: Vec<MovieBody>,
    pub next_cursor: Option<String>,
}

impl From<Page<Movie>> for MoviePageBody {
    fn from(page: Page<Movie>) -> Self {
        let (items, next_cursor) = page.into_parts();
        Self {
            items: items.into_iter().map(MovieBody::from).collect(),
            next_cursor: next_cursor.map(|cursor| cursor.encode()),
        }
    }
}

/// Listing filters. Malformed numbers and cursors are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListMoviesParams {
    /// Case-insensitive title substring.
    pub q: Option<String>,
    /// Release year.
    pub year: Option<String>,
    /// Case-insensitive genre.
    pub genre: Option<String>,
    /// Case-insensitive distributor.
    pub distributor: Option<String>,
    /// Inclusive budget ceiling.
    pub budget: Option<String>,
    /// Exact MPA rating.
    pub mpa_rating: Option<String>,
    /// Page size; defaults to 20.
    pub limit: Option<String>,
    /// Continuation token from a previous page.
    pub cursor: Option<String>,
}

impl From<ListMoviesParams> for ListMoviesRequest {
    fn from(params: ListMoviesParams) -> Self {
        let filter = MovieFilter {
            title: non_blank(params.q),
            year: lenient(params.year.as_deref(), FieldName::new("year")),
            genre: non_blank(params.genre),
            distributor: non_blank(params.distributor),
            max_budget: lenient(params.budget.as_deref(), FieldName::new("budget")),
            mpa_rating: non_blank(params.mpa_rating),
        };
        let page = PageRequest::new(
            lenient(params.limit.as_deref(), FieldName::new("limit")),
            lenient_cursor(params.cursor.as_deref()),
        );
        Self { filter, page }
    }
}

/// Create a movie, enriching it from the box-office source when possible.
#[utoipa::path(
    post,
    path = "/movies",
    request_body = CreateMovieBody,
    responses(
        (status = 201, description = "Movie created", body = MovieBody,
            headers(("Location" = String, description = "Path of the new movie"))),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 422, description = "Invalid movie or duplicate title", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "createMovie",
    security(("BearerToken" = []))
)]
#[post("/movies")]
pub async fn create_movie(
    state: web::Data<HttpState>,
    _auth: BearerAuth,
    payload: web::Json<CreateMovieBody>,
) -> ApiResult<HttpResponse> {
    let response = state
        .movies
        .create_movie(CreateMovieRequest::from(payload.into_inner()))
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((LOCATION, response.location))
        .json(MovieBody::from(response.movie)))
}

/// List movies matching every supplied filter, ordered by id.
#[utoipa::path(
    get,
    path = "/movies",
    params(ListMoviesParams),
    responses(
        (status = 200, description = "One page of movies", body = MoviePageBody),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "listMovies",
    security([])
)]
#[get("/movies")]
pub async fn list_movies(
    state: web::Data<HttpState>,
    params: web::Query<ListMoviesParams>,
) -> ApiResult<web::Json<MoviePageBody>> {
    let page = state
        .movies_query
        .list_movies(ListMoviesRequest::from(params.into_inner()))
        .await?;
    Ok(web::Json(MoviePageBody::from(page)))
}

#[cfg(test)]
#[path = "movies_tests.rs"]
mod tests;
