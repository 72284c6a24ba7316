//! Domain entities, services and ports.
//!
//! Nothing in this module performs I/O directly. Services depend on the driven
//! ports in [`ports`] and implement the driving ones consumed by inbound
//! adapters.

pub mod catalogue_service;
pub mod error;
pub mod ingestion_service;
pub mod movie;
pub mod movie_filter;
pub mod ports;
pub mod rating;
pub mod rating_service;
pub mod trace_id;

pub use self::catalogue_service::MovieCatalogueService;
pub use self::error::{Error, ErrorCode};
pub use self::ingestion_service::{
    DEFAULT_ENRICHMENT_TIMEOUT, MovieIngestionService, movie_location,
};
pub use self::movie::{
    BoxOffice, BoxOfficeRecord, BoxOfficeRevenue, Movie, MovieDraft, MovieEnrichment, MovieField,
    MovieId, MovieValidationError,
};
pub use self::movie_filter::{
    MovieColumn, MovieFilter, MoviePredicate, PredicateOperator, PredicateValue, year_bounds,
};
pub use self::rating::{Rating, RatingAggregate, RatingUpsertOutcome, RatingValue};
pub use self::rating_service::RatingService;
pub use self::trace_id::TraceId;

/// Result alias for driving-port operations.
pub type ApiResult<T> = Result<T, Error>;
