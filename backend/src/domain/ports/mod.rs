//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`BoxOfficeSource`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`) are implemented by
//! domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod box_office_source;
mod movie_repository;
mod movies_command;
mod movies_query;
mod rating_repository;
mod ratings_command;
mod ratings_query;

#[cfg(test)]
pub use box_office_source::MockBoxOfficeSource;
pub use box_office_source::{BoxOfficeSource, BoxOfficeSourceError, FixtureBoxOfficeSource};
#[cfg(test)]
pub use movie_repository::MockMovieRepository;
pub use movie_repository::{
    FixtureMovieRepository, MovieListQuery, MovieRepository, MovieRepositoryError,
};
#[cfg(test)]
pub use movies_command::MockMoviesCommand;
pub use movies_command::{
    CreateMovieRequest, CreateMovieResponse, FixtureMoviesCommand, MoviesCommand,
};
#[cfg(test)]
pub use movies_query::MockMoviesQuery;
pub use movies_query::{FixtureMoviesQuery, ListMoviesRequest, MoviesQuery};
#[cfg(test)]
pub use rating_repository::MockRatingRepository;
pub use rating_repository::{
    FixtureRatingRepository, RatingRepository, RatingRepositoryError, RatingTotals,
};
#[cfg(test)]
pub use ratings_command::MockRatingsCommand;
pub use ratings_command::{
    FixtureRatingsCommand, RatingsCommand, SubmitRatingRequest, SubmitRatingResponse,
};
#[cfg(test)]
pub use ratings_query::MockRatingsQuery;
pub use ratings_query::{FixtureRatingsQuery, RatingsQuery};
