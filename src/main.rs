use anyhow::{Context, Result};
use axum::{extract::FromRef, Router};
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::services::ServeDir;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{catalog::Catalog, config::Settings, engine::FilterMemo, showroom::Showroom};

// Declare modules
mod backend_api;
mod catalog;
mod config;
mod engine;
mod error;
mod export;
mod finance;
mod models;
mod routes;
mod showroom;

// Shared application state handed to every handler
#[derive(Clone, FromRef)]
pub(crate) struct AppState {
    pub(crate) settings: Arc<Settings>,
    pub(crate) http_client: Arc<Client>,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) filter_memo: Arc<FilterMemo>,
    pub(crate) showroom: Arc<Mutex<Showroom>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "ev_showroom=info,tower_http=info".into()))
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing EV Showroom server...");

    // Load configuration
    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully. Backend: {}", s.backend_api_url);
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    let shared_settings = Arc::new(settings);

    let http_client = Arc::new(backend_api::build_client(&shared_settings)?);
    tracing::info!("Shared HTTP client created.");

    let showroom = Showroom::new(&shared_settings).context("Failed to create showroom carousel")?;

    let app_state = AppState {
        settings: shared_settings.clone(),
        http_client: http_client.clone(),
        catalog: Arc::new(Catalog::new(http_client.clone(), shared_settings.clone())),
        filter_memo: Arc::new(FilterMemo::new(shared_settings.filter_cache_size)),
        showroom: Arc::new(Mutex::new(showroom)),
    };

    // Warm the catalog so the first visitor doesn't wait on the backend
    if let Err(e) = app_state.catalog.snapshot().await {
        tracing::warn!("Initial catalog load failed, will retry on first request: {:?}", e);
    }

    let router: Router = routes::create_router(app_state.clone());
    let app = router.nest_service("/static", ServeDir::new("static"));

    let addr: SocketAddr = shared_settings.server_address.parse().with_context(|| {
        format!("Invalid server address format: {}", shared_settings.server_address)
    })?;

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
