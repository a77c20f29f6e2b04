//! Provider server implementation

use axum::Router;
use kapi_auth::AuthProvider;
use kapi_core::{config::KapiConfig, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::info;

use crate::routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn AuthProvider>,
}

/// Provider server
pub struct ProviderServer {
    config: KapiConfig,
    provider: Arc<dyn AuthProvider>,
}

impl ProviderServer {
    pub fn new(config: KapiConfig, provider: Arc<dyn AuthProvider>) -> Self {
        Self { config, provider }
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            provider: self.provider.clone(),
        };

        routes::provider_routes(state)
            .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new()))
    }

    pub async fn run(self) -> Result<()> {
        let app = self.router();
        let addr = format!("{}:{}", self.config.server.bind_address, self.config.server.port);
        let listener = TcpListener::bind(&addr).await?;

        info!("Kapi provider listening on http://{}", addr);
        info!(
            "Directory server: {}",
            self.provider.config_info().current.server_name
        );

        axum::serve(listener, app).await?;
        Ok(())
    }
}
