//! Paginated drawing surface.
//!
//! The layout engine draws through the [`Canvas`] trait. [`Document`] is the
//! in-memory implementation: it records draw operations per page so the
//! result can be inspected or handed to the PDF encoder.
//!
//! Coordinates are millimetres from the top-left corner of the page. Text
//! positions name the baseline of the first glyph.

/// RGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }
}

/// Font size (points) and fill color for a run of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
}

/// Stroke color and width (millimetres) for lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A paginated surface with text, line and filled-rectangle primitives.
///
/// A canvas always has at least one page and a current page that drawing
/// goes to. Adding a page makes it current.
pub trait Canvas {
    /// Append a new page and make it current.
    fn add_page(&mut self);

    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Make the page at `index` (0-based) current.
    ///
    /// Out-of-range indices are ignored.
    fn set_page(&mut self, index: usize);

    /// Draw a single line of text with its baseline at `(x, y)`.
    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle);

    /// Draw a straight line.
    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke);

    /// Draw a filled rectangle without outline.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// A recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
}

/// A single page of recorded operations, in drawing order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text runs on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Recording canvas: the abstract document produced by layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    width: f32,
    height: f32,
    pages: Vec<Page>,
    current: usize,
}

impl Document {
    /// Create a document with a single empty page of the given size (mm).
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pages: vec![Page::default()],
            current: 0,
        }
    }

    /// Page width in millimetres.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Page height in millimetres.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// All pages in order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn push(&mut self, op: DrawOp) {
        self.pages[self.current].ops.push(op);
    }
}

impl Canvas for Document {
    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.current = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_page(&mut self, index: usize) {
        if index < self.pages.len() {
            self.current = index;
        }
    }

    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.to_owned(),
            style,
        });
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        self.push(DrawOp::Line { from, to, stroke });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawOp::FillRect { rect, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: TextStyle = TextStyle {
        size: 11.0,
        color: Color::BLACK,
    };

    #[test]
    fn test_new_document_has_one_page() {
        let doc = Document::new(210.0, 297.0);
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages()[0].ops.is_empty());
    }

    #[test]
    fn test_add_page_becomes_current() {
        let mut doc = Document::new(210.0, 297.0);
        doc.add_page();
        doc.text(10.0, 10.0, "second", STYLE);

        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages()[0].ops.is_empty());
        assert_eq!(doc.pages()[1].texts().collect::<Vec<_>>(), vec!["second"]);
    }

    #[test]
    fn test_set_page_redirects_drawing() {
        let mut doc = Document::new(210.0, 297.0);
        doc.add_page();
        doc.set_page(0);
        doc.text(10.0, 10.0, "first", STYLE);

        assert_eq!(doc.pages()[0].texts().collect::<Vec<_>>(), vec!["first"]);
        assert!(doc.pages()[1].ops.is_empty());
    }

    #[test]
    fn test_set_page_out_of_range_ignored() {
        let mut doc = Document::new(210.0, 297.0);
        doc.set_page(5);
        doc.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
            },
            Color::gray(240),
        );
        assert_eq!(doc.pages()[0].ops.len(), 1);
    }
}
