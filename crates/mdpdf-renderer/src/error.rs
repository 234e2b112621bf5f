//! Render error types.

/// Error produced while laying out or encoding a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Page geometry leaves no room for content.
    #[error("Invalid page layout: {0}")]
    Layout(String),

    /// The document has more pages than a PDF page tree can count.
    #[error("Too many pages to encode: {0}")]
    TooManyPages(usize),
}
