//! Presentation rules per block kind.

use crate::canvas::{Color, Stroke, TextStyle};
use crate::util::MM_PER_PT;

/// Baseline-to-baseline distance as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.15;

pub(crate) const PARAGRAPH: TextStyle = TextStyle {
    size: 11.0,
    color: Color::BLACK,
};

pub(crate) const LIST: TextStyle = TextStyle {
    size: 10.0,
    color: Color::BLACK,
};

pub(crate) const BLOCKQUOTE: TextStyle = TextStyle {
    size: 10.0,
    color: Color::gray(100),
};

pub(crate) const BLOCKQUOTE_RULE: Stroke = Stroke {
    width: 1.0,
    color: Color::rgb(0, 0, 180),
};

pub(crate) const CODE: TextStyle = TextStyle {
    size: 9.0,
    color: Color::gray(50),
};

pub(crate) const CODE_BACKGROUND: Color = Color::gray(240);

pub(crate) const FOOTER: TextStyle = TextStyle {
    size: 8.0,
    color: Color::gray(150),
};

/// Text style for a heading of the given depth.
pub(crate) fn heading(depth: u8) -> TextStyle {
    let size = match depth {
        1 => 20.0,
        2 => 16.0,
        3 => 13.0,
        5 => 10.0,
        6 => 9.0,
        _ => 11.0,
    };
    let color = match depth {
        2 => Color::rgb(30, 70, 180),
        3 => Color::rgb(60, 100, 200),
        _ => Color::BLACK,
    };
    TextStyle { size, color }
}

/// Natural line height in millimetres for a font size in points.
pub(crate) fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT_FACTOR * MM_PER_PT
}
