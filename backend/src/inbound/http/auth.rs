//! Credential extractors used by HTTP handlers.
//!
//! Handlers take [`BearerAuth`] or [`RaterId`] as arguments; a missing or
//! wrong credential short-circuits with `401 UNAUTHORIZED` before the handler
//! body runs.

use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, error};
use zeroize::Zeroizing;

use crate::domain::Error;

/// Header naming the rater on rating submissions.
pub const RATER_ID_HEADER: &str = "X-Rater-Id";

const UNAUTHORIZED_MESSAGE: &str = "Missing or invalid authentication information";

/// Accepted bearer token for write endpoints.
#[derive(Clone)]
pub struct AuthConfig {
    token: Zeroizing<String>,
}

impl AuthConfig {
    /// Accept `token` as the only valid bearer credential.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
        }
    }

    fn accepts(&self, presented: &str) -> bool {
        !self.token.is_empty() && self.token.as_str() == presented
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Proof that the request presented the configured bearer token.
#[derive(Debug, Clone, Copy)]
pub struct BearerAuth;

impl BearerAuth {
    fn authenticate(req: &HttpRequest) -> Result<Self, Error> {
        let Some(config) = req.app_data::<web::Data<AuthConfig>>() else {
            error!("bearer auth used without AuthConfig app data");
            return Err(Error::internal("authentication is not configured"));
        };
        match bearer_token(req.headers()) {
            Some(token) if config.accepts(token) => Ok(Self),
            Some(_) => {
                debug!("bearer token rejected");
                Err(Error::unauthorized(UNAUTHORIZED_MESSAGE))
            }
            None => Err(Error::unauthorized(UNAUTHORIZED_MESSAGE)),
        }
    }
}

impl FromRequest for BearerAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::authenticate(req))
    }
}

/// Identity of the caller submitting a rating, from [`RATER_ID_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaterId(String);

impl RaterId {
    /// Trimmed rater identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromRequest for RaterId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let rater = req
            .headers()
            .get(RATER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_owned()))
            .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE));
        ready(rater)
    }
}
