//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use movie_catalogue::domain::DEFAULT_ENRICHMENT_TIMEOUT;
use movie_catalogue::inbound::http::auth::AuthConfig;
use movie_catalogue::outbound::box_office::BoxOfficeHttpConfig;
use movie_catalogue::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) auth: AuthConfig,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) box_office: Option<BoxOfficeHttpConfig>,
    pub(crate) enrichment_timeout: Duration,
}

impl ServerConfig {
    /// Construct a configuration with no adapters attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, auth: AuthConfig) -> Self {
        Self {
            bind_addr,
            auth,
            db_pool: None,
            box_office: None,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool every port falls back to its fixture.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Enable box-office enrichment.
    ///
    /// The client timeout also bounds the lookup inside the ingestion
    /// service.
    #[must_use]
    pub fn with_box_office(mut self, config: BoxOfficeHttpConfig) -> Self {
        self.enrichment_timeout = config.timeout;
        self.box_office = Some(config);
        self
    }
}
