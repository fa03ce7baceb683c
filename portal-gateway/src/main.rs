//! Entry point for the `portal-gateway` HTTP server.

use std::sync::Arc;

use packing_source::{HttpPackingSource, PackingSource, StaticPackingSource};
use portal_gateway::{
    config::PortalConfig,
    routes::{create_router, AppState},
    views::Views,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match PortalConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let source: Arc<dyn PackingSource> = match config.source {
        Some(source_config) => match HttpPackingSource::new(source_config) {
            Ok(s) => {
                info!(upstream = %s.url(), "packing source configured");
                Arc::new(s)
            }
            Err(e) => {
                tracing::error!(error = %e, "invalid packing source");
                std::process::exit(1);
            }
        },
        None => {
            warn!("PACKING_SOURCE_URL not set; serving an empty packing list");
            Arc::new(StaticPackingSource::empty())
        }
    };

    let views = match Views::new(config.auth) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "failed to compile templates");
            std::process::exit(1);
        }
    };

    let app = create_router(Arc::new(AppState::new(source, views)));
    let addr = config.listen_addr;

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "portal-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
