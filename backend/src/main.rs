//! Backend entry-point: wires REST endpoints and OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use askbox_backend::inbound::http::health::HealthState;
use askbox_backend::outbound::identity::HttpIdentityProfileSource;
use askbox_backend::outbound::persistence::{DbPool, PoolConfig};
use askbox_backend::settings::{AskboxSettings, BuildMode};
use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AskboxSettings::load().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(settings.bind_addr());

    if let Some(identity) = settings
        .identity(BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?
    {
        info!(
            endpoint = %identity.lookup_url(),
            token_fingerprint = %identity.token_fingerprint(),
            "identity provider configured"
        );
        let source = HttpIdentityProfileSource::new(
            identity.lookup_url().clone(),
            identity.bearer_token(),
            identity.timeout(),
        )
        .map_err(std::io::Error::other)?;
        config = config.with_identity(Arc::new(source));
    }

    if let Some(database_url) = settings.database_url.clone() {
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; serving fixture data");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    server.await
}
