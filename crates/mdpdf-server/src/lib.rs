//! HTTP server for mdpdf markdown to PDF conversion.
//!
//! This crate wraps [`mdpdf_renderer`] in a small axum service:
//! - `GET /health` reports liveness
//! - `POST /gerar-pdf` returns the rendered PDF as an attachment
//! - `POST /gerar-pdf-base64` returns the PDF base64-encoded in JSON
//!
//! Rendering is CPU-bound and runs on tokio's blocking pool, so slow
//! documents do not stall other connections.
//!
//! # Quick Start
//!
//! ```ignore
//! use mdpdf_renderer::PageLayout;
//! use mdpdf_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 3000,
//!         body_limit: 10 * 1024 * 1024,
//!         layout: PageLayout::default(),
//!         default_title: "documento".to_string(),
//!         version: "0.1.0".to_string(),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP/JSON──► axum router (mdpdf-server)
//!                           │
//!                           ├─► /health
//!                           │
//!                           └─► /gerar-pdf, /gerar-pdf-base64
//!                                   │
//!                                   └─► spawn_blocking ──► MarkdownRenderer::render_pdf
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use mdpdf_renderer::{MarkdownRenderer, PageLayout};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
    /// Page geometry and pagination policy.
    pub layout: PageLayout,
    /// Title used when a request omits `titulo`.
    pub default_title: String,
    /// Application version (reported by `/health`).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            body_limit: 10 * 1024 * 1024,
            layout: PageLayout::default(),
            default_title: "documento".to_string(),
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the page layout is invalid, the address cannot be
/// parsed, or the listener fails to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.layout.validate()?;

    let state = Arc::new(AppState {
        renderer: MarkdownRenderer::new().with_layout(config.layout),
        default_title: config.default_title.clone(),
        body_limit: config.body_limit,
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from mdpdf config.
///
/// # Arguments
///
/// * `config` - Loaded mdpdf configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(config: &mdpdf_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        body_limit: config.server.body_limit,
        layout: config.render.page_layout(),
        default_title: config.render.default_title.clone(),
        version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdpdf_config::Config;
    use mdpdf_renderer::{PageBreak, PageSize};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.body_limit, 10 * 1024 * 1024);
        assert_eq!(config.layout, PageLayout::default());
    }

    #[test]
    fn test_server_config_from_config() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8080;
        config.server.body_limit = 1024;
        config.render.page_size = PageSize::Letter;
        config.render.margin = 20.0;
        config.render.page_break = PageBreak::Measured;
        config.render.default_title = "doc".to_string();

        let server = server_config_from_config(&config, "1.2.3".to_string());

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 8080);
        assert_eq!(server.body_limit, 1024);
        assert_eq!(
            server.layout,
            PageLayout::new(PageSize::Letter, 20.0).with_page_break(PageBreak::Measured)
        );
        assert_eq!(server.default_title, "doc");
        assert_eq!(server.version, "1.2.3");
    }

    #[tokio::test]
    async fn test_run_server_rejects_invalid_layout() {
        let config = ServerConfig {
            layout: PageLayout::new(PageSize::A4, -1.0),
            ..ServerConfig::default()
        };

        assert!(run_server(config).await.is_err());
    }
}
