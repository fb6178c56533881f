//! Built-in font metrics.
//!
//! The document uses the two standard PDF base-14 Helvetica faces, so no
//! font files ship with the crate. Widths below are the AFM advance widths
//! (per 1000 units of font size) for the printable ASCII range; everything
//! the layout measures is sanitized to that range first.

/// Document font face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PDF BaseFont name
    pub fn base_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource key inside the page font dictionary
    pub fn resource_key(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            Font::Helvetica => &HELVETICA_WIDTHS,
            Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of one character at `size` points. Characters outside
    /// printable ASCII measure as '?', matching how they are drawn.
    pub fn char_width(&self, ch: char, size: f64) -> f64 {
        let ch = if (' '..='~').contains(&ch) { ch } else { '?' };
        let index = ch as usize - ' ' as usize;
        f64::from(self.widths()[index]) * size / 1000.0
    }

    /// Total advance width of a string at `size` points.
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, size)).sum()
    }
}

/// AFM widths for Helvetica, chars 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722, 722,
    667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222,
    500, 222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334,
    584,
];

/// AFM widths for Helvetica-Bold, chars 0x20..=0x7E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722, 722, 667,
    611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556,
    278, 889, 611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width() {
        // 278/1000 at 10pt
        assert!((Font::Helvetica.char_width(' ', 10.0) - 2.78).abs() < 1e-9);
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let regular = Font::Helvetica.text_width("Grand Total", 12.0);
        let bold = Font::HelveticaBold.text_width("Grand Total", 12.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_non_ascii_measures_as_question_mark() {
        let q = Font::Helvetica.char_width('?', 12.0);
        assert_eq!(Font::Helvetica.char_width('\u{20b9}', 12.0), q);
    }

    #[test]
    fn test_width_scales_linearly() {
        let at_10 = Font::Helvetica.text_width("abc", 10.0);
        let at_20 = Font::Helvetica.text_width("abc", 20.0);
        assert!((at_20 - at_10 * 2.0).abs() < 1e-9);
    }
}
