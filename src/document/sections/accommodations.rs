//! Accommodation cards, one per hotel entry, check-in date ascending.
//! Each card breaks as a whole; a card never straddles two pages.

use crate::document::font::Font;
use crate::document::images::ImageSet;
use crate::document::layout::{LayoutPage, PageCursor, Rgb, CONTENT_WIDTH, MARGIN};
use crate::document::sections::{format_date, heading, BODY_SIZE};
use crate::document::text::truncate;
use crate::pricing::format_amount;
use crate::quote::models::{HotelEntry, Quotation};

const CARD_HEIGHT: f64 = 110.0;
const CARD_GAP: f64 = 10.0;
const IMAGE_WIDTH: f64 = 130.0;
const IMAGE_HEIGHT: f64 = 90.0;

pub fn render(
    quote: &Quotation,
    images: &ImageSet,
    cursor: &mut PageCursor,
    pages: &mut Vec<LayoutPage>,
) {
    if quote.hotels.is_empty() {
        return;
    }
    heading(cursor, pages, "Accommodations");

    for hotel in quote.hotels_by_check_in() {
        cursor.ensure_space(pages, CARD_HEIGHT + CARD_GAP);
        card(quote, hotel, images, cursor);
        cursor.advance(CARD_HEIGHT + CARD_GAP);
    }
    cursor.advance(6.0);
}

fn card(quote: &Quotation, hotel: &HotelEntry, images: &ImageSet, cursor: &mut PageCursor) {
    let top = cursor.abs_y();
    cursor.fill_rect(MARGIN, top, CONTENT_WIDTH, CARD_HEIGHT, Rgb::CARD);
    cursor.image_or_placeholder(
        MARGIN + 10.0,
        top + 10.0,
        IMAGE_WIDTH,
        IMAGE_HEIGHT,
        images.get(&hotel.image_url),
    );

    let text_x = MARGIN + IMAGE_WIDTH + 24.0;
    let text_width = CONTENT_WIDTH - IMAGE_WIDTH - 34.0;

    let name = truncate(&hotel.name, Font::HelveticaBold, 13.0, text_width);
    cursor.text_at(text_x, top + 24.0, &name, Font::HelveticaBold, 13.0, Rgb::BLACK);
    cursor.text_at(text_x, top + 38.0, &stars(hotel.rating), Font::Helvetica, BODY_SIZE, Rgb::TEAL);

    if !hotel.place.is_empty() {
        let place = truncate(&hotel.place, Font::Helvetica, BODY_SIZE, text_width);
        cursor.text_at(text_x, top + 52.0, &place, Font::Helvetica, BODY_SIZE, Rgb::GREY);
    }

    let dates = format!(
        "{} - {}",
        format_date(hotel.check_in),
        format_date(hotel.check_out)
    );
    cursor.text_at(text_x, top + 68.0, &dates, Font::Helvetica, BODY_SIZE, Rgb::BLACK);

    cursor.text_at(
        text_x,
        top + 82.0,
        &stay_line(hotel),
        Font::Helvetica,
        BODY_SIZE,
        Rgb::BLACK,
    );

    let price = format_amount(hotel.total_price, quote.currency);
    cursor.text_at(text_x, top + 99.0, &price, Font::HelveticaBold, 11.0, Rgb::TEAL);
}

/// Star rating as ASCII asterisks, clamped to 0..=5.
fn stars(rating: i16) -> String {
    "*".repeat(rating.clamp(0, 5) as usize)
}

fn stay_line(hotel: &HotelEntry) -> String {
    let night_word = if hotel.nights == 1 { "night" } else { "nights" };
    let room_word = if hotel.rooms == 1 { "room" } else { "rooms" };
    let mut line = format!(
        "{} {}, {} {}",
        hotel.nights, night_word, hotel.rooms, room_word
    );
    if hotel.extra_beds > 0 {
        let bed_word = if hotel.extra_beds == 1 {
            "extra bed"
        } else {
            "extra beds"
        };
        line.push_str(&format!(", {} {}", hotel.extra_beds, bed_word));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::layout::{DrawCommand, CONTENT_HEIGHT};
    use crate::session::{RateType, SessionContext};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn hotel(entry_id: i64, day: u32) -> HotelEntry {
        let check_in = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        HotelEntry {
            entry_id,
            hotel_id: Uuid::nil(),
            name: format!("Hotel {entry_id}"),
            place: "Marina".to_string(),
            rating: 4,
            image_url: None,
            check_in,
            check_out: check_in + chrono::Duration::days(3),
            nights: 3,
            rooms: 1,
            extra_beds: 1,
            price_per_night: Some(dec!(100)),
            extra_bed_price: Some(dec!(40)),
            b2b_price_per_night: None,
            b2b_extra_bed_price: None,
            total_price: dec!(420),
        }
    }

    fn quote_with(hotels: Vec<HotelEntry>) -> Quotation {
        let session = SessionContext {
            branch: "DXB".to_string(),
            username: "alice".to_string(),
            rate_type: RateType::B2c,
            is_admin: false,
        };
        let mut q = Quotation::draft(&session);
        q.hotels = hotels;
        q
    }

    #[test]
    fn test_stars_clamped() {
        assert_eq!(stars(4), "****");
        assert_eq!(stars(9), "*****");
        assert_eq!(stars(-1), "");
    }

    #[test]
    fn test_stay_line() {
        let mut h = hotel(1, 5);
        assert_eq!(stay_line(&h), "3 nights, 1 room, 1 extra bed");
        h.nights = 1;
        h.extra_beds = 0;
        assert_eq!(stay_line(&h), "1 night, 1 room");
    }

    #[test]
    fn test_cards_render_sorted_without_images() {
        let q = quote_with(vec![hotel(1, 10), hotel(2, 3)]);
        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();
        render(&q, &ImageSet::default(), &mut cursor, &mut pages);
        cursor.finish(&mut pages);

        let texts: Vec<String> = pages
            .iter()
            .flat_map(|p| &p.commands)
            .filter_map(|c| match c {
                DrawCommand::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect();
        let first = texts.iter().position(|t| t == "Hotel 2").unwrap();
        let second = texts.iter().position(|t| t == "Hotel 1").unwrap();
        assert!(first < second);

        // Placeholder stands in for both missing images
        let placeholders = pages
            .iter()
            .flat_map(|p| &p.commands)
            .filter(|c| matches!(c, DrawCommand::Placeholder { .. }))
            .count();
        assert_eq!(placeholders, 2);
    }

    #[test]
    fn test_whole_card_page_break() {
        let count = (CONTENT_HEIGHT / (CARD_HEIGHT + CARD_GAP)) as i64 + 3;
        let hotels: Vec<HotelEntry> = (0..count).map(|i| hotel(i, 1)).collect();
        let q = quote_with(hotels);

        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();
        render(&q, &ImageSet::default(), &mut cursor, &mut pages);
        cursor.finish(&mut pages);
        assert!(pages.len() >= 2);

        // No card background crosses the content bottom
        for page in &pages {
            for command in &page.commands {
                if let DrawCommand::Rect { y, height, fill, .. } = command {
                    if *fill == Some(Rgb::CARD) && *height == CARD_HEIGHT {
                        assert!(y + height <= MARGIN + CONTENT_HEIGHT + 1e-9);
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_section_renders_nothing() {
        let q = quote_with(Vec::new());
        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();
        render(&q, &ImageSet::default(), &mut cursor, &mut pages);
        assert!(pages.is_empty());
        assert_eq!(cursor.y, 0.0);
    }
}
