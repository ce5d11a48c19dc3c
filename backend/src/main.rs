//! Item catalogue entry-point: loads settings, seeds the store and serves
//! the HTML screens, the JSON API and OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use item_catalogue::domain::messages::{MessageBundles, MessageSource};
use item_catalogue::inbound::http::health::HealthState;
use item_catalogue::outbound::memory::InMemoryItemRepository;
use item_catalogue::settings::AppSettings;
use item_catalogue::startup::seed_catalogue_on_startup;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

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

    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let default_locale = settings.default_locale().map_err(std::io::Error::other)?;

    let bundles = MessageBundles::embedded().map_err(std::io::Error::other)?;
    let messages = Arc::new(MessageSource::new(Arc::new(bundles), default_locale));

    let repository = Arc::new(InMemoryItemRepository::new());
    seed_catalogue_on_startup(repository.as_ref(), settings.seed_items)
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(bind_addr, repository, messages),
    )?;
    info!(%bind_addr, "item catalogue listening");
    server.await
}
