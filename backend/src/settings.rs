//! Application settings loaded via OrthoConfig.
//!
//! Values layer defaults, an optional config file and `CATALOG_*` environment
//! variables. [`AppSettings`] is read once at startup and converted into the
//! per-component configuration values that are injected into adapters.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::inbound::http::auth::AuthConfig;
use crate::outbound::box_office::BoxOfficeHttpConfig;
use crate::outbound::persistence::PoolConfig;

/// Errors raised while turning settings into component configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required value is absent or blank.
    #[error("missing required setting {name}")]
    Missing { name: &'static str },

    /// A URL setting does not parse.
    #[error("invalid URL in {name}: {message}")]
    InvalidUrl { name: &'static str, message: String },
}

/// Service configuration.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct AppSettings {
    /// TCP port the HTTP server listens on.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Bearer token accepted on `POST /movies`.
    pub auth_token: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Base URL of the box-office API. Enrichment is disabled when absent.
    pub box_office_url: Option<String>,
    /// Key sent as `X-API-Key` to the box-office API.
    pub box_office_api_key: Option<String>,
    /// Bound on each box-office lookup, in milliseconds.
    #[ortho_config(default = 3000)]
    pub box_office_timeout_ms: u64,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Skip applying embedded migrations before serving.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

fn required<'a>(value: Option<&'a String>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(|raw| raw.trim())
        .filter(|raw| !raw.is_empty())
        .ok_or(SettingsError::Missing { name })
}

impl AppSettings {
    /// Address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Whether embedded migrations run at startup. On unless skipped.
    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }

    /// Bound on each box-office lookup.
    pub fn box_office_timeout(&self) -> Duration {
        Duration::from_millis(self.box_office_timeout_ms)
    }

    /// Accepted bearer token.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Missing`] when no token is configured.
    pub fn auth_config(&self) -> Result<AuthConfig, SettingsError> {
        required(self.auth_token.as_ref(), "CATALOG_AUTH_TOKEN").map(AuthConfig::new)
    }

    /// Database pool configuration.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Missing`] when no database URL is configured.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let url = required(self.database_url.as_ref(), "CATALOG_DATABASE_URL")?;
        Ok(PoolConfig::new(url).with_max_size(self.db_max_connections.max(1)))
    }

    /// Box-office client configuration, or `None` when enrichment is off.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidUrl`] for an unparsable base URL and
    /// [`SettingsError::Missing`] when a URL is set without an API key.
    pub fn box_office_config(&self) -> Result<Option<BoxOfficeHttpConfig>, SettingsError> {
        let Ok(raw_url) = required(self.box_office_url.as_ref(), "CATALOG_BOX_OFFICE_URL") else {
            return Ok(None);
        };
        let base_url = Url::parse(raw_url).map_err(|err| SettingsError::InvalidUrl {
            name: "CATALOG_BOX_OFFICE_URL",
            message: err.to_string(),
        })?;
        let api_key = required(self.box_office_api_key.as_ref(), "CATALOG_BOX_OFFICE_API_KEY")?;
        let mut config = BoxOfficeHttpConfig::new(base_url, api_key);
        config.timeout = self.box_office_timeout();
        Ok(Some(config))
    }
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("AppSettings")
            .field("port", &self.port)
            .field("auth_token", &redact(&self.auth_token))
            .field("database_url", &redact(&self.database_url))
            .field("box_office_url", &self.box_office_url)
            .field("box_office_api_key", &redact(&self.box_office_api_key))
            .field("box_office_timeout_ms", &self.box_office_timeout_ms)
            .field("db_max_connections", &self.db_max_connections)
            .field("skip_migrations", &self.skip_migrations)
            .finish()
    }
}
