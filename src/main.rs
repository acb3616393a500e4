//! Pattern Quiz Back binary entrypoint wiring REST, SSE, and the shared
//! session store.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod config;
mod dto;
mod error;
mod routes;
mod services;
mod state;
mod store;

use catalog::ExampleCatalog;
use config::AppConfig;
use services::sync_service::{self, SyncListener};
use state::AppState;
use store::{SessionStore, memory::MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let catalog = ExampleCatalog::load(config.catalog_path());
    if catalog.is_empty() {
        warn!("example catalogue is empty; rounds cannot start");
    }

    let session_store = build_store(&config);
    let app_state = AppState::new(config, catalog, session_store);

    // Adopt whatever a previous run (or a sibling window) left in the shared
    // store before accepting traffic.
    sync_service::bootstrap(&app_state).await;
    let sync_listener = SyncListener::spawn(app_state.clone());

    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    sync_listener.stop().await;

    Ok(())
}

/// Choose the shared store backend: the configured session file when the
/// feature and the config provide one, the in-process map otherwise.
fn build_store(config: &AppConfig) -> Arc<dyn SessionStore> {
    #[cfg(feature = "file-store")]
    if let Some(path) = config.session_file() {
        info!(path = %path.display(), "using file-backed session store");
        return Arc::new(store::file::FileStore::new(path.to_path_buf()));
    }

    if config.session_file().is_some() {
        warn!("session file configured but the file-store feature is disabled");
    }
    info!("using in-memory session store");
    Arc::new(MemoryStore::new())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: state::SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
