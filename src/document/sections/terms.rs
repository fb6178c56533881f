//! Terms & conditions: a fixed sequence of numbered clauses, word-wrapped
//! to content width. The only section that flows line-by-line across page
//! breaks instead of moving whole blocks.

use crate::document::font::Font;
use crate::document::layout::{LayoutPage, PageCursor, Rgb, CONTENT_WIDTH, MARGIN};
use crate::document::sections::{heading, BODY_LINE, BODY_SIZE};
use crate::document::text::wrap;

const CLAUSES: [&str; 8] = [
    "Prices are quoted per the selected services and head counts and are \
     subject to availability at the time of confirmation. Rates are not \
     guaranteed until the booking is confirmed in writing.",
    "A quotation does not constitute a reservation. Rooms, vehicles and \
     activity slots are only held once the booking deposit has been received.",
    "Hotel check-in and check-out follow each property's own policy. Early \
     check-in and late check-out are on request and may carry additional \
     charges payable directly to the property.",
    "Itinerary timings are indicative. Operational, weather or traffic \
     conditions may require re-sequencing of activities on the day; any \
     replacement will be of equivalent value where possible.",
    "Visa processing times are estimates and approval remains at the sole \
     discretion of the issuing authority. Fees for rejected applications \
     are not refundable.",
    "Cancellation charges apply as per the cancellation policy shared at \
     the time of booking, and unused services are non-refundable.",
    "Travel insurance is not included unless expressly listed in the \
     inclusions. Guests are advised to carry adequate cover for medical \
     and baggage contingencies.",
    "Any dispute arising from this quotation is subject to the jurisdiction \
     of the courts at the issuing branch's location.",
];

const CLAUSE_GAP: f64 = 8.0;

pub fn render(cursor: &mut PageCursor, pages: &mut Vec<LayoutPage>) {
    heading(cursor, pages, "Terms & Conditions");

    for (index, clause) in CLAUSES.iter().enumerate() {
        let numbered = format!("{}. {}", index + 1, clause);
        for line in wrap(&numbered, Font::Helvetica, BODY_SIZE, CONTENT_WIDTH) {
            cursor.ensure_space(pages, BODY_LINE);
            cursor.text_line(MARGIN, &line, Font::Helvetica, BODY_SIZE, BODY_LINE, Rgb::BLACK);
        }
        cursor.advance(CLAUSE_GAP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::layout::{DrawCommand, CONTENT_HEIGHT};

    fn rendered() -> Vec<LayoutPage> {
        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();
        render(&mut cursor, &mut pages);
        cursor.finish(&mut pages);
        pages
    }

    #[test]
    fn test_all_clauses_present_and_numbered() {
        let texts: Vec<String> = rendered()
            .iter()
            .flat_map(|p| &p.commands)
            .filter_map(|c| match c {
                DrawCommand::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect();
        for n in 1..=CLAUSES.len() {
            assert!(
                texts.iter().any(|t| t.starts_with(&format!("{n}. "))),
                "clause {n} missing"
            );
        }
    }

    #[test]
    fn test_lines_fit_content_width() {
        for page in rendered() {
            for command in page.commands {
                if let DrawCommand::Text { content, font, size, .. } = command {
                    assert!(font.text_width(&content, size) <= CONTENT_WIDTH + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_line_flow_survives_page_break() {
        // Start near the bottom so the first clause must flow across pages
        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();
        cursor.advance(CONTENT_HEIGHT - 120.0);
        render(&mut cursor, &mut pages);
        cursor.finish(&mut pages);
        assert!(pages.len() >= 2);

        // Text appears on both sides of the break
        assert!(pages.iter().all(|p| p
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { .. }))));
    }

    #[test]
    fn test_clause_text_is_ascii() {
        for clause in CLAUSES {
            assert!(clause.is_ascii());
        }
    }
}
