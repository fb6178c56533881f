//! Trip overview: optional traveler-info block plus the included-services
//! grid. Two fixed columns, one "- " bullet per inclusion.

use crate::document::font::Font;
use crate::document::layout::{LayoutPage, PageCursor, Rgb, CONTENT_WIDTH, MARGIN};
use crate::document::sections::{format_date, heading, BODY_LINE, BODY_SIZE};
use crate::document::text::truncate;
use crate::quote::models::Quotation;

const LABEL_WIDTH: f64 = 110.0;

pub fn render(
    quote: &Quotation,
    include_traveler_info: bool,
    cursor: &mut PageCursor,
    pages: &mut Vec<LayoutPage>,
) {
    heading(cursor, pages, "Trip Overview");

    if include_traveler_info {
        traveler_block(quote, cursor, pages);
    }

    if !quote.inclusions.is_empty() {
        cursor.ensure_space(pages, BODY_LINE * 2.0);
        cursor.text_line(
            MARGIN,
            "Inclusions",
            Font::HelveticaBold,
            12.0,
            18.0,
            Rgb::BLACK,
        );
        inclusion_grid(quote, cursor, pages);
    }
    cursor.advance(10.0);
}

fn traveler_block(quote: &Quotation, cursor: &mut PageCursor, pages: &mut Vec<LayoutPage>) {
    let mut rows: Vec<(&str, String)> = Vec::new();
    rows.push(("Guest", quote.traveler_name.clone()));
    if !quote.phone.is_empty() {
        rows.push(("Phone", format!("{} {}", quote.country_code, quote.phone)));
    }
    rows.push(("Destination", quote.destination.clone()));
    if let (Some(arrival), Some(departure)) = (quote.arrival_date, quote.departure_date) {
        rows.push((
            "Travel dates",
            format!("{} - {}", format_date(arrival), format_date(departure)),
        ));
    }
    rows.push(("Travelers", traveler_line(quote.adults, quote.children)));

    let block_height = rows.len() as f64 * BODY_LINE + 16.0;
    cursor.ensure_space(pages, block_height);
    cursor.fill_rect(MARGIN, cursor.abs_y(), CONTENT_WIDTH, block_height, Rgb::CARD);
    cursor.advance(8.0);

    for (label, value) in rows {
        let value = truncate(&value, Font::Helvetica, BODY_SIZE, CONTENT_WIDTH - LABEL_WIDTH - 24.0);
        cursor.text_at(
            MARGIN + 12.0,
            cursor.abs_y() + BODY_SIZE,
            label,
            Font::HelveticaBold,
            BODY_SIZE,
            Rgb::GREY,
        );
        cursor.text_line(
            MARGIN + 12.0 + LABEL_WIDTH,
            &value,
            Font::Helvetica,
            BODY_SIZE,
            BODY_LINE,
            Rgb::BLACK,
        );
    }
    cursor.advance(16.0);
}

fn traveler_line(adults: i64, children: i64) -> String {
    let adult_word = if adults == 1 { "Adult" } else { "Adults" };
    if children == 0 {
        return format!("{adults} {adult_word}");
    }
    let child_word = if children == 1 { "Child" } else { "Children" };
    format!("{adults} {adult_word}, {children} {child_word}")
}

/// Fixed two-column bullet grid, filled row-major.
fn inclusion_grid(quote: &Quotation, cursor: &mut PageCursor, pages: &mut Vec<LayoutPage>) {
    let column_width = CONTENT_WIDTH / 2.0;
    for pair in quote.inclusions.chunks(2) {
        cursor.ensure_space(pages, BODY_LINE);
        let baseline = cursor.abs_y() + BODY_SIZE;
        for (column, item) in pair.iter().enumerate() {
            let x = MARGIN + column as f64 * column_width;
            let bullet = format!("- {item}");
            let bullet = truncate(&bullet, Font::Helvetica, BODY_SIZE, column_width - 12.0);
            cursor.text_at(x, baseline, &bullet, Font::Helvetica, BODY_SIZE, Rgb::BLACK);
        }
        cursor.advance(BODY_LINE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::layout::DrawCommand;
    use crate::session::{RateType, SessionContext};

    fn quote() -> Quotation {
        let session = SessionContext {
            branch: "DXB".to_string(),
            username: "alice".to_string(),
            rate_type: RateType::B2c,
            is_admin: false,
        };
        let mut q = Quotation::draft(&session);
        q.traveler_name = "Jordan Lee".to_string();
        q.destination = "Dubai".to_string();
        q
    }

    fn texts(cursor: PageCursor) -> Vec<String> {
        let mut pages = Vec::new();
        cursor.finish(&mut pages);
        pages
            .iter()
            .flat_map(|p| &p.commands)
            .filter_map(|c| match c {
                DrawCommand::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_traveler_info_toggle() {
        let q = quote();
        let mut pages = Vec::new();

        let mut with = PageCursor::new();
        render(&q, true, &mut with, &mut pages);
        assert!(texts(with).iter().any(|t| t == "Jordan Lee"));

        let mut without = PageCursor::new();
        render(&q, false, &mut without, &mut pages);
        assert!(!texts(without).iter().any(|t| t == "Jordan Lee"));
    }

    #[test]
    fn test_inclusions_bulleted_two_per_row() {
        let mut q = quote();
        q.inclusions = vec![
            "Breakfast".to_string(),
            "Airport transfer".to_string(),
            "City tour".to_string(),
        ];
        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();
        render(&q, false, &mut cursor, &mut pages);

        let texts = texts(cursor);
        assert!(texts.iter().any(|t| t == "- Breakfast"));
        assert!(texts.iter().any(|t| t == "- City tour"));
    }

    #[test]
    fn test_traveler_line_wording() {
        assert_eq!(traveler_line(1, 0), "1 Adult");
        assert_eq!(traveler_line(2, 1), "2 Adults, 1 Child");
        assert_eq!(traveler_line(2, 3), "2 Adults, 3 Children");
    }
}
