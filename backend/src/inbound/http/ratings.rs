//! Rating HTTP handlers.
//!
//! ```text
//! POST /movies/{title}/ratings
//! GET  /movies/{title}/rating
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{SubmitRatingRequest, SubmitRatingResponse};
use crate::domain::{Rating, RatingAggregate, RatingUpsertOutcome, movie_location};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RaterId;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Request payload for submitting a rating.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RatingBody {
    /// One of 0.5, 1.0, ..., 5.0.
    #[schema(example = 4.5)]
    pub rating: Option<f64>,
}

/// Stored rating.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredRatingBody {
    pub movie_title: String,
    pub rater_id: String,
    pub rating: f64,
}

impl From<Rating> for StoredRatingBody {
    fn from(rating: Rating) -> Self {
        Self {
            movie_title: rating.movie_title,
            rater_id: rating.rater_id,
            rating: rating.value.value(),
        }
    }
}

/// Average and count of a movie's ratings.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RatingAggregateBody {
    #[schema(example = 4.5)]
    pub average: f64,
    #[schema(example = 2)]
    pub count: i64,
}

impl From<RatingAggregate> for RatingAggregateBody {
    fn from(aggregate: RatingAggregate) -> Self {
        Self {
            average: aggregate.average,
            count: aggregate.count,
        }
    }
}

fn rating_response(response: SubmitRatingResponse) -> HttpResponse {
    let SubmitRatingResponse { rating, outcome } = response;
    match outcome {
        RatingUpsertOutcome::Created => HttpResponse::Created()
            .insert_header((
                LOCATION,
                format!("{}/ratings", movie_location(&rating.movie_title)),
            ))
            .json(StoredRatingBody::from(rating)),
        RatingUpsertOutcome::Updated => HttpResponse::Ok().json(StoredRatingBody::from(rating)),
    }
}

/// Submit or replace the caller's rating for a movie.
#[utoipa::path(
    post,
    path = "/movies/{title}/ratings",
    params(("title" = String, Path, description = "Exact movie title")),
    request_body = RatingBody,
    responses(
        (status = 201, description = "First rating by this rater", body = StoredRatingBody,
            headers(("Location" = String, description = "Path of the movie's ratings"))),
        (status = 200, description = "Earlier rating replaced", body = StoredRatingBody),
        (status = 401, description = "Missing rater id", body = ErrorSchema),
        (status = 404, description = "Movie not found", body = ErrorSchema),
        (status = 422, description = "Invalid rating", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ratings"],
    operation_id = "submitRating",
    security(("RaterId" = []))
)]
#[post("/movies/{title}/ratings")]
pub async fn submit_rating(
    state: web::Data<HttpState>,
    rater: RaterId,
    title: web::Path<String>,
    payload: web::Json<RatingBody>,
) -> ApiResult<HttpResponse> {
    let rating = payload
        .into_inner()
        .rating
        .ok_or_else(|| missing_field_error(FieldName::new("rating")))?;
    let response = state
        .ratings
        .submit_rating(SubmitRatingRequest {
            movie_title: title.into_inner(),
            rater_id: rater.into_inner(),
            rating,
        })
        .await?;
    Ok(rating_response(response))
}

/// Aggregate rating for a movie.
#[utoipa::path(
    get,
    path = "/movies/{title}/rating",
    params(("title" = String, Path, description = "Exact movie title")),
    responses(
        (status = 200, description = "Average and count", body = RatingAggregateBody),
        (status = 404, description = "Movie not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ratings"],
    operation_id = "getRatingAggregate",
    security([])
)]
#[get("/movies/{title}/rating")]
pub async fn get_rating_aggregate(
    state: web::Data<HttpState>,
    title: web::Path<String>,
) -> ApiResult<web::Json<RatingAggregateBody>> {
    let aggregate = state.ratings_query.rating_aggregate(title.as_str()).await?;
    Ok(web::Json(RatingAggregateBody::from(aggregate)))
}
