//! Shared wiring for HTTP behaviour tests.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{TimeZone, Utc};
use movie_catalogue::Trace;
use movie_catalogue::domain::{
    BoxOffice, BoxOfficeRecord, BoxOfficeRevenue, MovieCatalogueService, MovieIngestionService,
    RatingService,
};
use movie_catalogue::inbound::http::auth::AuthConfig;
use movie_catalogue::inbound::http::configure;
use movie_catalogue::inbound::http::state::HttpState;
use movie_catalogue::test_support::{
    InMemoryMovieRepository, InMemoryRatingRepository, StubBoxOfficeSource,
};

pub const TOKEN: &str = "integration-token";

/// Adapters behind one test application.
pub struct Catalogue {
    pub movies: Arc<InMemoryMovieRepository>,
    pub ratings: Arc<InMemoryRatingRepository>,
    pub source: Arc<StubBoxOfficeSource>,
    pub enrichment_timeout: Duration,
}

impl Catalogue {
    pub fn new(source: StubBoxOfficeSource) -> Self {
        Self {
            movies: Arc::new(InMemoryMovieRepository::default()),
            ratings: Arc::new(InMemoryRatingRepository::default()),
            source: Arc::new(source),
            enrichment_timeout: Duration::from_millis(100),
        }
    }

    pub fn state(&self) -> HttpState {
        let ratings = Arc::new(RatingService::new(self.movies.clone(), self.ratings.clone()));
        HttpState::new(
            Arc::new(
                MovieIngestionService::new(self.movies.clone(), self.source.clone())
                    .with_enrichment_timeout(self.enrichment_timeout),
            ),
            Arc::new(MovieCatalogueService::new(self.movies.clone())),
            ratings.clone(),
            ratings,
        )
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state()))
            .app_data(web::Data::new(AuthConfig::new(TOKEN)))
            .configure(configure)
            .wrap(Trace)
    }
}

pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {TOKEN}"))
}

pub fn inception_record() -> BoxOfficeRecord {
    BoxOfficeRecord {
        distributor: Some("Warner Bros.".to_owned()),
        budget: Some(160_000_000),
        mpa_rating: Some("PG-13".to_owned()),
        box_office: BoxOffice {
            revenue: BoxOfficeRevenue {
                worldwide: 836_836_967,
                opening_weekend_usa: 62_785_337,
            },
            currency: "USD".to_owned(),
            source: "ExampleBoxOfficeAPI".to_owned(),
            last_updated: Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        },
    }
}
