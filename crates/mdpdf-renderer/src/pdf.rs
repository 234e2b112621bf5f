//! PDF encoding of a laid-out [`Document`].
//!
//! Every page shares one standard Type1 Helvetica font with
//! `WinAnsiEncoding`, so no font data is embedded. Output is deterministic:
//! the same document always encodes to the same bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::canvas::{Color, Document, DrawOp, Page};
use crate::error::RenderError;
use crate::util::mm_to_pt;

/// Resource name of the text font on every page.
const FONT_NAME: Name<'static> = Name(b"F1");

/// Value of the document info `Producer` entry.
const PRODUCER: &str = concat!("mdpdf ", env!("CARGO_PKG_VERSION"));

/// Encode a document as PDF bytes.
///
/// `title` is written to the document info dictionary.
pub fn encode(document: &Document, title: &str) -> Result<Vec<u8>, RenderError> {
    let page_count = document.pages().len();
    let count = i32::try_from(page_count).map_err(|_| RenderError::TooManyPages(page_count))?;

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let font_id = alloc.bump();
    let info_id = alloc.bump();
    let page_ids: Vec<(Ref, Ref)> = document
        .pages()
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(count);
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(PRODUCER));

    let media_box = Rect::new(
        0.0,
        0.0,
        mm_to_pt(document.width()),
        mm_to_pt(document.height()),
    );

    for (page, (page_id, content_id)) in document.pages().iter().zip(&page_ids) {
        let mut writer = pdf.page(*page_id);
        writer
            .media_box(media_box)
            .parent(page_tree_id)
            .contents(*content_id);
        writer.resources().fonts().pair(FONT_NAME, font_id);
        writer.finish();

        pdf.stream(*content_id, &page_content(page, document.height()));
    }

    Ok(pdf.finish())
}

/// Build the content stream for one page.
///
/// Draw ops use millimetres from the top-left corner; PDF user space is
/// points from the bottom-left corner.
fn page_content(page: &Page, page_height: f32) -> Vec<u8> {
    let flip = |y: f32| mm_to_pt(page_height - y);
    let mut content = Content::new();

    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, text, style } => {
                let (r, g, b) = unit_rgb(style.color);
                content.set_fill_rgb(r, g, b);
                content.begin_text();
                content.set_font(FONT_NAME, style.size);
                content.next_line(mm_to_pt(*x), flip(*y));
                content.show(Str(&win_ansi(text)));
                content.end_text();
            }
            DrawOp::Line { from, to, stroke } => {
                let (r, g, b) = unit_rgb(stroke.color);
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(mm_to_pt(stroke.width));
                content.move_to(mm_to_pt(from.0), flip(from.1));
                content.line_to(mm_to_pt(to.0), flip(to.1));
                content.stroke();
            }
            DrawOp::FillRect { rect, color } => {
                let (r, g, b) = unit_rgb(*color);
                content.set_fill_rgb(r, g, b);
                content.rect(
                    mm_to_pt(rect.x),
                    flip(rect.y + rect.height),
                    mm_to_pt(rect.width),
                    mm_to_pt(rect.height),
                );
                content.fill_nonzero();
            }
        }
    }

    content.finish()
}

fn unit_rgb(color: Color) -> (f32, f32, f32) {
    (
        f32::from(color.r) / 255.0,
        f32::from(color.g) / 255.0,
        f32::from(color.b) / 255.0,
    )
}

/// Encode text as `WinAnsiEncoding` bytes, replacing unmappable characters
/// with `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\t' => b' ',
        ' '..='~' | '\u{a0}'..='\u{ff}' => u8::try_from(u32::from(c)).unwrap_or(b'?'),
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}
