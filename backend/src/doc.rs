//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every catalogue and health endpoint plus the bearer
//! token and rater id security schemes. Swagger UI serves it in debug builds.

use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::movies::{
    BoxOfficeBody, BoxOfficeRevenueBody, CreateMovieBody, MovieBody, MoviePageBody,
};
use crate::inbound::http::ratings::{RatingAggregateBody, RatingBody, StoredRatingBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the bearer token and rater id security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Static token configured for write access."))
                    .build(),
            ),
        );
        components.add_security_scheme(
            "RaterId",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Rater-Id",
                "Identifier of the user submitting a rating.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Movie catalogue API",
        description = "Movie ingestion with box-office enrichment, filtered listings and ratings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::movies::create_movie,
        crate::inbound::http::movies::list_movies,
        crate::inbound::http::ratings::submit_rating,
        crate::inbound::http::ratings::get_rating_aggregate,
        crate::inbound::http::health::healthz,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateMovieBody,
        MovieBody,
        MoviePageBody,
        BoxOfficeBody,
        BoxOfficeRevenueBody,
        RatingBody,
        StoredRatingBody,
        RatingAggregateBody,
        HealthStatus,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "movies", description = "Movie creation and listing"),
        (name = "ratings", description = "Per-rater scores and aggregates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn registers_catalogue_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/movies",
            "/movies/{title}/ratings",
            "/movies/{title}/rating",
            "/healthz",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn movie_schema_exposes_box_office() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let movie = schemas.get("MovieBody").expect("MovieBody schema");

        assert_object_schema_has_field(movie, "boxOffice");
        assert_object_schema_has_field(movie, "mpaRating");
    }

    #[test]
    fn security_schemes_are_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
        assert!(components.security_schemes.contains_key("RaterId"));
    }
}
