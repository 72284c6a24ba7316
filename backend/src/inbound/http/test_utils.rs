//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::auth::AuthConfig;
use super::state::HttpState;
use crate::Trace;

/// Bearer token accepted by [`test_app`].
pub(crate) const TEST_TOKEN: &str = "test-token";

/// `Authorization` header value carrying [`TEST_TOKEN`].
pub(crate) fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {TEST_TOKEN}"))
}

/// App with every catalogue route wired to `state`.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(AuthConfig::new(TEST_TOKEN)))
        .configure(super::configure)
        .wrap(Trace)
}
