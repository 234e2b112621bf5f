//! Shared utility functions for markdown rendering.

use pulldown_cmark::HeadingLevel;

/// Millimetres per PostScript point.
pub(crate) const MM_PER_PT: f32 = 25.4 / 72.0;

/// Convert a length in millimetres to PostScript points.
#[must_use]
pub(crate) fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
