//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the movie and rating repository ports, backed
//! by `diesel-async` over a `bb8` pool. Row structs and table definitions are
//! internal; only domain types cross this boundary.
//!
//! ```ignore
//! use movie_catalogue::outbound::persistence::{DbPool, DieselMovieRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalogue")).await?;
//! let movies = DieselMovieRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_movie_repository;
mod diesel_rating_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_movie_repository::DieselMovieRepository;
pub use diesel_rating_repository::DieselRatingRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
