//! Builders for HTTP state ports and repository-backed services.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use tracing::warn;

use movie_catalogue::domain::ports::{FixtureBoxOfficeSource, MovieRepository, MoviesCommand};
use movie_catalogue::domain::{MovieCatalogueService, MovieIngestionService, RatingService};
use movie_catalogue::inbound::http::state::HttpState;
use movie_catalogue::outbound::box_office::{BoxOfficeHttpConfig, BoxOfficeHttpSource};
use movie_catalogue::outbound::persistence::{DbPool, DieselMovieRepository, DieselRatingRepository};

use super::ServerConfig;

/// Build the ingestion command, enriching only when a box-office client is
/// configured.
fn build_movies_command<M>(
    movies: Arc<M>,
    box_office: Option<&BoxOfficeHttpConfig>,
    enrichment_timeout: Duration,
) -> io::Result<Arc<dyn MoviesCommand>>
where
    M: MovieRepository + 'static,
{
    match box_office {
        Some(config) => {
            let source = BoxOfficeHttpSource::new(config.clone(), Arc::new(mockable::DefaultClock))
                .map_err(|err| io::Error::other(format!("box office client setup failed: {err}")))?;
            Ok(Arc::new(
                MovieIngestionService::new(movies, Arc::new(source))
                    .with_enrichment_timeout(enrichment_timeout),
            ))
        }
        None => {
            warn!("box office enrichment disabled; movies are stored without it");
            Ok(Arc::new(
                MovieIngestionService::new(movies, Arc::new(FixtureBoxOfficeSource))
                    .with_enrichment_timeout(enrichment_timeout),
            ))
        }
    }
}

fn build_db_state(pool: &DbPool, config: &ServerConfig) -> io::Result<HttpState> {
    let movies = Arc::new(DieselMovieRepository::new(pool.clone()));
    let ratings = Arc::new(DieselRatingRepository::new(pool.clone()));
    let command =
        build_movies_command(movies.clone(), config.box_office.as_ref(), config.enrichment_timeout)?;
    let rating_service = Arc::new(RatingService::new(movies.clone(), ratings));
    Ok(HttpState::new(
        command,
        Arc::new(MovieCatalogueService::new(movies)),
        rating_service.clone(),
        rating_service,
    ))
}

/// Build the shared HTTP state, using fixtures when no pool is configured.
///
/// # Errors
///
/// Fails when the box-office client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let state = match &config.db_pool {
        Some(pool) => build_db_state(pool, config)?,
        None => {
            warn!("no database pool configured; serving fixture ports");
            HttpState::fixtures()
        }
    };
    Ok(web::Data::new(state))
}
