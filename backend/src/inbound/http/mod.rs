//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod error;
pub mod health;
pub mod movies;
pub mod ratings;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub(crate) mod validation;

pub use error::{ApiResult, json_error_handler};

/// Register the catalogue endpoints and the JSON body error handler.
///
/// Callers supply [`state::HttpState`] and [`auth::AuthConfig`] as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(movies::create_movie)
        .service(movies::list_movies)
        .service(ratings::submit_rating)
        .service(ratings::get_rating_aggregate);
}
