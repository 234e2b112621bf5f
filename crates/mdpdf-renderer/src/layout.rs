//! Page layout: places blocks on a paginated canvas.
//!
//! Layout is a single pass over the block list. A [`Cursor`] holding the
//! vertical write position is threaded through each step by value: every
//! step takes the cursor, may start a new page, draws, and returns the
//! advanced cursor.

use crate::block::Block;
use crate::canvas::{Canvas, Rect, TextStyle};
use crate::error::RenderError;
use crate::metrics::wrap_text;
use crate::strip::strip_inline_markup;
use crate::style;

/// Marker drawn before each list item.
///
/// Ordered lists use a bullet too; item numbers are not rendered.
const ORDERED_MARKER: &str = "• ";
const UNORDERED_MARKER: &str = "- ";

/// Indent of list item and blockquote text from the left margin (mm).
const INDENT: f32 = 8.0;
/// Vertical step between list item lines (mm).
const LIST_LINE_STEP: f32 = 5.0;

/// Page sizes, in millimetres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageSize {
    /// 210 × 297 mm.
    #[default]
    A4,
    /// 215.9 × 279.4 mm.
    Letter,
}

impl PageSize {
    /// Width and height in millimetres.
    #[must_use]
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
        }
    }
}

/// When to start a new page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageBreak {
    /// Break only when the cursor is already past the bottom margin.
    ///
    /// A tall block may run past the bottom margin of its page.
    #[default]
    Cursor,
    /// Also break when the next block would not fit on the current page,
    /// unless the cursor is already at the top of a page.
    Measured,
}

/// Page geometry and pagination policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageLayout {
    /// Page width (mm).
    pub width: f32,
    /// Page height (mm).
    pub height: f32,
    /// Margin on all four sides (mm).
    pub margin: f32,
    /// Page break policy.
    pub page_break: PageBreak,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(PageSize::A4, 15.0)
    }
}

impl PageLayout {
    #[must_use]
    pub fn new(size: PageSize, margin: f32) -> Self {
        let (width, height) = size.dimensions();
        Self {
            width,
            height,
            margin,
            page_break: PageBreak::default(),
        }
    }

    #[must_use]
    pub fn with_page_break(mut self, page_break: PageBreak) -> Self {
        self.page_break = page_break;
        self
    }

    /// Width available for text between the side margins.
    #[must_use]
    pub fn text_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest cursor position that does not trigger a page break.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Check that the margins leave room for content.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.margin.is_finite() || self.margin <= 0.0 {
            return Err(RenderError::Layout(format!(
                "margin must be positive, got {}",
                self.margin
            )));
        }
        // Indented blocks need INDENT mm more than the bare text width.
        if self.text_width() <= INDENT || self.bottom() <= self.margin {
            return Err(RenderError::Layout(format!(
                "margin {} leaves no room for content on a {}x{} mm page",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Vertical write position on the current page (mm from the top edge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub y: f32,
}

impl Cursor {
    /// Cursor at the top margin.
    #[must_use]
    pub fn top(layout: &PageLayout) -> Self {
        Self { y: layout.margin }
    }

    #[must_use]
    fn advance(self, dy: f32) -> Self {
        Self { y: self.y + dy }
    }
}

/// A block with its text wrapped and ready to draw.
#[derive(Debug)]
enum Placed {
    Heading { style: TextStyle, lines: Vec<String> },
    Paragraph { lines: Vec<String> },
    List { marker: &'static str, items: Vec<Vec<String>> },
    BlockQuote { lines: Vec<String> },
    Code { lines: Vec<String> },
}

impl Placed {
    /// Wrap a block's text for the page. Returns `None` for blocks that are
    /// not rendered.
    fn new(block: &Block, layout: &PageLayout) -> Option<Self> {
        let width = layout.text_width();
        let placed = match block {
            Block::Heading { depth, text } => {
                let style = style::heading(*depth);
                Self::Heading {
                    style,
                    lines: wrap_text(text, style.size, width),
                }
            }
            Block::Paragraph { text } => Self::Paragraph {
                lines: wrap_text(&strip_inline_markup(text), style::PARAGRAPH.size, width),
            },
            Block::List { ordered, items } => Self::List {
                marker: if *ordered {
                    ORDERED_MARKER
                } else {
                    UNORDERED_MARKER
                },
                items: items
                    .iter()
                    .map(|item| {
                        wrap_text(&strip_inline_markup(item), style::LIST.size, width - INDENT)
                    })
                    .collect(),
            },
            Block::BlockQuote { text } => Self::BlockQuote {
                lines: wrap_text(&strip_inline_markup(text), style::BLOCKQUOTE.size, width - INDENT),
            },
            Block::Code { text } => Self::Code {
                lines: wrap_text(text, style::CODE.size, width - 4.0),
            },
            Block::Other => return None,
        };
        Some(placed)
    }

    /// Total cursor advance for this block (mm).
    fn advance(&self) -> f32 {
        match self {
            Self::Heading { lines, .. } => lines.len() as f32 * 7.0 + 3.0,
            Self::Paragraph { lines } => lines.len() as f32 * 6.0 + 5.0,
            Self::List { items, .. } => {
                items
                    .iter()
                    .map(|lines| lines.len() as f32 * LIST_LINE_STEP + 2.0)
                    .sum::<f32>()
                    + 3.0
            }
            Self::BlockQuote { lines } => lines.len() as f32 * 5.0 + 5.0,
            Self::Code { lines } => lines.len() as f32 * 4.0 + 6.0,
        }
    }

    fn draw<C: Canvas>(&self, canvas: &mut C, layout: &PageLayout, cursor: Cursor) -> Cursor {
        let margin = layout.margin;
        let y = cursor.y;

        match self {
            Self::Heading { style, lines } => draw_lines(canvas, margin, y, lines, *style),
            Self::Paragraph { lines } => draw_lines(canvas, margin, y, lines, style::PARAGRAPH),
            Self::List { marker, items } => {
                let mut item_y = y;
                for lines in items {
                    canvas.text(margin + 2.0, item_y, marker, style::LIST);
                    for (i, line) in lines.iter().enumerate() {
                        if !line.is_empty() {
                            canvas.text(
                                margin + INDENT,
                                item_y + i as f32 * LIST_LINE_STEP,
                                line,
                                style::LIST,
                            );
                        }
                    }
                    item_y += lines.len() as f32 * LIST_LINE_STEP + 2.0;
                }
            }
            Self::BlockQuote { lines } => {
                let x = margin + 2.0;
                let rule_end = y + lines.len() as f32 * 5.0 + 2.0;
                canvas.line((x, y - 2.0), (x, rule_end), style::BLOCKQUOTE_RULE);
                draw_lines(canvas, margin + INDENT, y, lines, style::BLOCKQUOTE);
            }
            Self::Code { lines } => {
                canvas.fill_rect(
                    Rect {
                        x: margin + 1.0,
                        y: y - 3.0,
                        width: layout.text_width() - 2.0,
                        height: lines.len() as f32 * 4.0 + 4.0,
                    },
                    style::CODE_BACKGROUND,
                );
                draw_lines(canvas, margin + 3.0, y, lines, style::CODE);
            }
        }

        cursor.advance(self.advance())
    }
}

/// Draw consecutive lines at the font's natural line height.
fn draw_lines<C: Canvas>(canvas: &mut C, x: f32, y: f32, lines: &[String], style: TextStyle) {
    let step = style::line_height(style.size);
    for (i, line) in lines.iter().enumerate() {
        if !line.is_empty() {
            canvas.text(x, y + i as f32 * step, line, style);
        }
    }
}

/// Start a new page if the layout's break policy says so.
fn break_page<C: Canvas>(canvas: &mut C, layout: &PageLayout, cursor: Cursor, advance: f32) -> Cursor {
    let past_bottom = cursor.y > layout.bottom();
    let overflow = match layout.page_break {
        PageBreak::Cursor => past_bottom,
        PageBreak::Measured => {
            past_bottom || (cursor.y + advance > layout.bottom() && cursor.y > layout.margin)
        }
    };

    if overflow {
        canvas.add_page();
        Cursor::top(layout)
    } else {
        cursor
    }
}

/// Lay out one block and return the cursor after it.
///
/// [`Block::Other`] is skipped without touching the canvas.
pub fn layout_block<C: Canvas>(
    canvas: &mut C,
    layout: &PageLayout,
    cursor: Cursor,
    block: &Block,
) -> Cursor {
    let Some(placed) = Placed::new(block, layout) else {
        return cursor;
    };
    let cursor = break_page(canvas, layout, cursor, placed.advance());
    placed.draw(canvas, layout, cursor)
}

/// Lay out all blocks from the top of the current page, then number pages.
pub fn layout_blocks<C: Canvas>(canvas: &mut C, layout: &PageLayout, blocks: &[Block]) {
    let cursor = blocks
        .iter()
        .fold(Cursor::top(layout), |cursor, block| {
            layout_block(canvas, layout, cursor, block)
        });
    tracing::trace!(cursor_y = cursor.y, "Layout finished");
    draw_page_numbers(canvas, layout);
}

/// Draw an `"i / total"` label in the bottom-right corner of every page.
pub fn draw_page_numbers<C: Canvas>(canvas: &mut C, layout: &PageLayout) {
    let total = canvas.page_count();
    for index in 0..total {
        canvas.set_page(index);
        canvas.text(
            layout.width - 20.0,
            layout.height - 8.0,
            &format!("{} / {total}", index + 1),
            style::FOOTER,
        );
    }
}
