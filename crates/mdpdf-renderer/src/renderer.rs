//! Markdown to PDF rendering pipeline.

use crate::block::{Block, lex};
use crate::canvas::{Canvas, Document};
use crate::error::RenderError;
use crate::layout::{PageLayout, layout_blocks};
use crate::pdf;

/// Renders markdown into a paginated [`Document`] and encodes it as PDF.
///
/// The renderer holds only page geometry, so one instance can be shared
/// across threads and reused for any number of documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownRenderer {
    layout: PageLayout,
}

impl MarkdownRenderer {
    /// Create a renderer for A4 pages with 15 mm margins.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given page layout.
    #[must_use]
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Page layout used for rendering.
    #[must_use]
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Lay out markdown text into a document.
    #[must_use]
    pub fn render(&self, markdown: &str) -> Document {
        self.render_blocks(&lex(markdown))
    }

    /// Lay out pre-lexed blocks into a document.
    #[must_use]
    pub fn render_blocks(&self, blocks: &[Block]) -> Document {
        let mut document = Document::new(self.layout.width, self.layout.height);
        self.render_into(&mut document, blocks);
        tracing::debug!(
            blocks = blocks.len(),
            pages = document.page_count(),
            "Laid out document"
        );
        document
    }

    /// Lay out pre-lexed blocks onto any canvas.
    pub fn render_into<C: Canvas>(&self, canvas: &mut C, blocks: &[Block]) {
        layout_blocks(canvas, &self.layout, blocks);
    }

    /// Render markdown straight to PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the page layout is invalid or encoding fails.
    pub fn render_pdf(&self, markdown: &str, title: &str) -> Result<Vec<u8>, RenderError> {
        self.layout.validate()?;
        let document = self.render(markdown);
        pdf::encode(&document, title)
    }
}
