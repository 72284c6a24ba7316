//! Service entry-point: loads settings, prepares storage and serves the
//! catalogue API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use movie_catalogue::inbound::http::health::HealthState;
use movie_catalogue::outbound::persistence::{DbPool, run_pending_migrations};
use movie_catalogue::settings::AppSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).wrap_err("failed to load settings")?;
    let auth = settings.auth_config()?;
    let pool_config = settings.pool_config()?;
    let box_office = settings.box_office_config()?;

    if settings.run_migrations() {
        run_pending_migrations(pool_config.database_url())
            .await
            .wrap_err("failed to apply migrations")?;
    }

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;

    let bind_addr = settings.bind_addr();
    let mut config = ServerConfig::new(bind_addr, auth).with_db_pool(pool);
    if let Some(box_office) = box_office {
        config = config.with_box_office(box_office);
    }
    drop(settings);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %bind_addr, "movie catalogue listening");
    server.await?;
    Ok(())
}
