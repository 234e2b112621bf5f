//! Helvetica text metrics and line wrapping.
//!
//! Widths come from the Adobe Helvetica AFM (units of 1/1000 em). Only
//! characters representable in `WinAnsiEncoding` are measured exactly;
//! anything else is measured as the replacement glyph `?`.

use crate::util::MM_PER_PT;

/// Advance widths for ASCII `0x20..=0x7E`.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Advance widths for Latin-1 `0xA0..=0xFF`.
const LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..'¯'
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // '°'..'¿'
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 'À'..'Ï'
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 'Ð'..'ß'
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 'à'..'ï'
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 'ð'..'ÿ'
];

/// Width of the `?` glyph, used for unmappable characters.
const REPLACEMENT_WIDTH: u16 = 556;

/// Advance width of a single character in 1/1000 em.
#[must_use]
pub fn char_width(c: char) -> u16 {
    match c {
        ' '..='~' => ASCII_WIDTHS[c as usize - 0x20],
        '\t' => ASCII_WIDTHS[0],
        '\u{a0}'..='\u{ff}' => LATIN1_WIDTHS[c as usize - 0xa0],
        // WinAnsi 0x80..=0x9F
        '•' => 350,
        '€' | 'ƒ' | '†' | '‡' | '–' => 556,
        '…' | '‰' | '—' | '™' | 'Œ' => 1000,
        '‚' | '‘' | '’' => 222,
        '„' | '“' | '”' | 'ˆ' | '˜' | '‹' | '›' => 333,
        'Š' | 'Ÿ' => 667,
        'Ž' => 611,
        'š' | 'ž' => 500,
        'œ' => 944,
        _ => REPLACEMENT_WIDTH,
    }
}

/// Width of `text` in millimetres when set at `font_size` points.
#[must_use]
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u64 = text.chars().map(|c| u64::from(char_width(c))).sum();
    units_to_mm(units, font_size)
}

fn units_to_mm(units: u64, font_size: f32) -> f32 {
    units as f32 * font_size / 1000.0 * MM_PER_PT
}

/// Split `text` into lines no wider than `max_width` millimetres.
///
/// Newlines always start a new line. Within a line, words are packed
/// greedily; a single word wider than `max_width` is broken between
/// characters. The result always holds at least one (possibly empty) line.
#[must_use]
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph.trim_end_matches('\r'), font_size, max_width, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, font_size: f32, max_width: f32, lines: &mut Vec<String>) {
    if text_width(paragraph, font_size) <= max_width {
        lines.push(paragraph.to_owned());
        return;
    }

    let space = text_width(" ", font_size);
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
        let word_width = text_width(word, font_size);

        if !current.is_empty() && current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
        } else {
            for c in word.chars() {
                let w = units_to_mm(u64::from(char_width(c)), font_size);
                if !current.is_empty() && current_width + w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += w;
            }
        }
    }

    lines.push(current);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_char_width_ascii() {
        assert_eq!(char_width(' '), 278);
        assert_eq!(char_width('W'), 944);
        assert_eq!(char_width('i'), 222);
        assert_eq!(char_width('~'), 584);
    }

    #[test]
    fn test_char_width_accented_and_unknown() {
        assert_eq!(char_width('ç'), 500);
        assert_eq!(char_width('Ó'), 778);
        assert_eq!(char_width('•'), 350);
        assert_eq!(char_width('漢'), REPLACEMENT_WIDTH);
    }

    #[test]
    fn test_char_width_latin1_symbols() {
        assert_eq!(char_width('¼'), 834);
        assert_eq!(char_width('²'), 333);
        assert_eq!(char_width('·'), 278);
        assert_eq!(char_width('ª'), 370);
        assert_eq!(char_width('¬'), 584);
        assert_eq!(char_width('ø'), 611);
    }

    #[test]
    fn test_char_width_win_ansi_extras() {
        assert_eq!(char_width('™'), 1000);
        assert_eq!(char_width('Š'), 667);
        assert_eq!(char_width('œ'), 944);
        assert_eq!(char_width('ƒ'), 556);
    }

    #[test]
    fn test_text_width_scales_with_font_size() {
        let small = text_width("Hello", 10.0);
        let large = text_width("Hello", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_text_width_known_value() {
        // "0" is 556 units; ten of them at 10pt = 55.6pt
        let width = text_width("0000000000", 10.0);
        assert!((width - 55.6 * MM_PER_PT).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap_text("short text", 11.0, 180.0), vec!["short text"]);
    }

    #[test]
    fn test_wrap_empty_text_yields_one_line() {
        assert_eq!(wrap_text("", 11.0, 180.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_respects_newlines() {
        assert_eq!(wrap_text("one\ntwo", 11.0, 180.0), vec!["one", "two"]);
    }

    #[test]
    fn test_wrap_long_text_fits_width() {
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let lines = wrap_text(text.trim(), 11.0, 180.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 11.0) <= 180.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.trim());
    }

    #[test]
    fn test_wrap_breaks_overlong_word() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, 10.0, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, 10.0) <= 20.0);
        }
    }

    #[test]
    fn test_wrap_very_long_line() {
        // Wider in total than u32::MAX font units.
        let text = "@".repeat(4_300_000);
        assert!(text_width(&text, 11.0) > 180.0);

        let lines = wrap_text(&text, 11.0, 180.0);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| text_width(line, 11.0) <= 180.0));
        assert_eq!(lines.iter().map(String::len).sum::<usize>(), text.len());
    }

    #[test]
    fn test_wrap_preserves_indentation_when_fitting() {
        assert_eq!(wrap_text("    let x = 1;", 9.0, 176.0), vec!["    let x = 1;"]);
    }
}
