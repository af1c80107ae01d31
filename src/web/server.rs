//! Web server for castfeed.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::Config;

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the feed.
pub struct WebServer {
    /// Host address to bind.
    host: String,
    /// Port to bind.
    port: u16,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
    /// Whether to gzip responses.
    compression: bool,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            app_state: Arc::new(AppState::new(config.feed.clone())),
            cors_origins: config.cors_origins(),
            compression: config.web.compression,
        }
    }

    /// Get the configured bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the router with all layers applied.
    pub fn router(&self) -> Router {
        let router = create_router(self.app_state.clone(), &self.cors_origins);

        if self.compression {
            router.layer(CompressionLayer::new())
        } else {
            router
        }
    }

    async fn bind(&self) -> Result<TcpListener, std::io::Error> {
        TcpListener::bind((self.host.as_str(), self.port)).await
    }

    /// Run the web server until Ctrl-C is received.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.router();
        let listener = self.bind().await?;
        let local_addr = listener.local_addr()?;

        tracing::info!(
            dataset = %self.app_state.feed.dataset,
            "Web server listening on http://{}",
            local_addr
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Web server stopped");
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = self.router();
        let listener = self.bind().await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
