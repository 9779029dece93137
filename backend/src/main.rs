//! Roster service entry-point: loads settings, prepares the identity store,
//! and serves the lecturer and student endpoints.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::inbound::http::health::HealthState;
use roster::outbound::persistence::{DbPool, apply_migrations};
use roster::settings::{AppSettings, DatabaseSettings};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let runtime = settings.validate().wrap_err("invalid settings")?;

    let mut config = ServerConfig::new(runtime.bind_addr, runtime.rate_limit);
    if let Some(database) = runtime.database {
        config = config.with_db_pool(connect(database).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(
        bind_addr = %config.bind_addr(),
        requests = runtime.rate_limit.requests,
        window_secs = runtime.rate_limit.window_secs,
        "starting roster service"
    );
    let server = create_server(health_state.clone(), config).wrap_err("failed to bind server")?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated with an error")
}

/// Run migrations if requested and open the connection pool.
async fn connect(database: DatabaseSettings) -> color_eyre::Result<DbPool> {
    if database.run_migrations {
        let url = database.url.clone();
        tokio::task::spawn_blocking(move || apply_migrations(&url))
            .await
            .wrap_err("migration task panicked")?
            .wrap_err("failed to migrate database")?;
    }

    DbPool::new(database.pool_config())
        .await
        .wrap_err("failed to build connection pool")
}
