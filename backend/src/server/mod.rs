//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use movie_catalogue::Trace;
#[cfg(debug_assertions)]
use movie_catalogue::doc::ApiDoc;
use movie_catalogue::inbound::http::auth::AuthConfig;
use movie_catalogue::inbound::http::health::{HealthState, healthz, live, ready};
use movie_catalogue::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    auth: web::Data<AuthConfig>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        auth,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(auth)
        .configure(movie_catalogue::inbound::http::configure)
        .service(healthz)
        .service(ready)
        .service(live)
        .wrap(Trace);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when building adapters, binding the socket
/// or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        bind_addr,
        auth,
        db_pool: _,
        box_office: _,
        enrichment_timeout: _,
    } = config;
    let auth = web::Data::new(auth);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            auth: auth.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    fn deps() -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::fixtures()),
            auth: web::Data::new(AuthConfig::new("token")),
        }
    }

    #[rstest]
    #[actix_rt::test]
    async fn fixture_app_serves_health_and_listing() {
        let app = test::init_service(build_app(deps())).await;

        let health = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request()).await;
        assert_eq!(health.status(), StatusCode::OK);

        let listing = test::call_service(&app, test::TestRequest::get().uri("/movies").to_request()).await;
        assert_eq!(listing.status(), StatusCode::OK);
        assert!(listing.headers().contains_key(movie_catalogue::middleware::TRACE_ID_HEADER));
    }

    #[rstest]
    #[actix_rt::test]
    async fn readiness_reflects_health_state() {
        let deps = deps();
        let health_state = deps.health_state.clone();
        let app = test::init_service(build_app(deps)).await;

        let before = test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        health_state.mark_ready();
        let after = test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
        assert_eq!(after.status(), StatusCode::OK);
    }
}
