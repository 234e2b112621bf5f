//! Application state.
//!
//! Shared state for all request handlers.

use mdpdf_renderer::MarkdownRenderer;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Renderer configured with the page layout.
    pub(crate) renderer: MarkdownRenderer,
    /// Title used when a request does not provide one.
    pub(crate) default_title: String,
    /// Maximum request body size in bytes.
    pub(crate) body_limit: usize,
    /// Application version reported by the health endpoint.
    pub(crate) version: String,
}
