//! Markdown to paginated PDF renderer.
//!
//! The pipeline has three stages:
//!
//! 1. [`lex`] folds `pulldown-cmark` events into top-level [`Block`]s
//! 2. [`layout_blocks`] places blocks on a [`Canvas`], breaking pages as the
//!    cursor runs past the bottom margin, then numbers every page
//! 3. [`encode`] writes the recorded [`Document`] as PDF
//!
//! [`MarkdownRenderer`] runs all three.
//!
//! # Example
//!
//! ```
//! use mdpdf_renderer::MarkdownRenderer;
//!
//! let pdf = MarkdownRenderer::new()
//!     .render_pdf("# Hello\n\n**Bold** text", "Hello")
//!     .unwrap();
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

mod block;
mod canvas;
mod error;
mod layout;
mod metrics;
mod pdf;
mod renderer;
mod strip;
mod style;
mod util;

pub use block::{Block, lex, parser_options};
pub use canvas::{Canvas, Color, Document, DrawOp, Page, Rect, Stroke, TextStyle};
pub use error::RenderError;
pub use layout::{
    Cursor, PageBreak, PageLayout, PageSize, draw_page_numbers, layout_block, layout_blocks,
};
pub use metrics::{char_width, text_width, wrap_text};
pub use pdf::encode;
pub use renderer::MarkdownRenderer;
pub use strip::strip_inline_markup;
