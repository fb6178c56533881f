//! Section renderers for the quotation document.
//!
//! Fixed order: cover, trip overview, accommodations, itinerary, terms,
//! closing. Cover and closing are single self-contained pages; the middle
//! sections flow through one shared cursor. Every section breaks at whole-
//! card granularity except terms, which flows individual lines.

pub mod accommodations;
pub mod closing;
pub mod cover;
pub mod itinerary;
pub mod overview;
pub mod terms;

use chrono::NaiveDate;

use crate::document::font::Font;
use crate::document::layout::{LayoutPage, PageCursor, Rgb, MARGIN};

pub(crate) const HEADING_SIZE: f64 = 16.0;
pub(crate) const BODY_SIZE: f64 = 10.0;
pub(crate) const BODY_LINE: f64 = 14.0;

/// ASCII date rendering used everywhere in the document
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Section heading with the brand accent bar. Reserves enough space that a
/// heading is never orphaned at the very bottom of a page.
pub(crate) fn heading(cursor: &mut PageCursor, pages: &mut Vec<LayoutPage>, title: &str) {
    cursor.ensure_space(pages, 70.0);
    cursor.advance(8.0);
    cursor.fill_rect(MARGIN, cursor.abs_y(), 3.0, HEADING_SIZE + 4.0, Rgb::TEAL);
    cursor.text_line(
        MARGIN + 10.0,
        title,
        Font::HelveticaBold,
        HEADING_SIZE,
        HEADING_SIZE + 10.0,
        Rgb::TEAL,
    );
    cursor.advance(4.0);
}
