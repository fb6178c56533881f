//! Day-by-day itinerary. Activities are grouped by calendar date with the
//! undated bucket last; each group opens with a date band and renders one
//! card per activity. Bands and cards break at whole-block granularity.

use chrono::NaiveDate;

use crate::document::font::Font;
use crate::document::images::ImageSet;
use crate::document::layout::{LayoutPage, PageCursor, Rgb, CONTENT_WIDTH, MARGIN};
use crate::document::sections::{format_date, heading, BODY_SIZE};
use crate::document::text::truncate;
use crate::pricing::format_amount;
use crate::quote::models::{ActivityEntry, Quotation};

const BAND_HEIGHT: f64 = 22.0;
const CARD_HEIGHT: f64 = 92.0;
const CARD_GAP: f64 = 8.0;
const IMAGE_WIDTH: f64 = 110.0;
const IMAGE_HEIGHT: f64 = 74.0;

pub fn render(
    quote: &Quotation,
    images: &ImageSet,
    cursor: &mut PageCursor,
    pages: &mut Vec<LayoutPage>,
) {
    if quote.activities.is_empty() {
        return;
    }
    heading(cursor, pages, "Itinerary");

    for (date, entries) in quote.itinerary_groups() {
        // Keep the band attached to at least its first card
        cursor.ensure_space(pages, BAND_HEIGHT + 6.0 + CARD_HEIGHT + CARD_GAP);
        date_band(date, cursor);

        for entry in entries {
            cursor.ensure_space(pages, CARD_HEIGHT + CARD_GAP);
            card(quote, entry, images, cursor);
            cursor.advance(CARD_HEIGHT + CARD_GAP);
        }
        cursor.advance(6.0);
    }
}

fn date_band(date: Option<NaiveDate>, cursor: &mut PageCursor) {
    let label = match date {
        Some(date) => format_date(date),
        None => "Flexible / To be scheduled".to_string(),
    };
    cursor.fill_rect(MARGIN, cursor.abs_y(), CONTENT_WIDTH, BAND_HEIGHT, Rgb::TEAL);
    cursor.text_at(
        MARGIN + 10.0,
        cursor.abs_y() + 15.0,
        &label,
        Font::HelveticaBold,
        11.0,
        Rgb::WHITE,
    );
    cursor.advance(BAND_HEIGHT + 6.0);
}

fn card(quote: &Quotation, entry: &ActivityEntry, images: &ImageSet, cursor: &mut PageCursor) {
    let top = cursor.abs_y();
    cursor.fill_rect(MARGIN, top, CONTENT_WIDTH, CARD_HEIGHT, Rgb::CARD);
    cursor.image_or_placeholder(
        MARGIN + 9.0,
        top + 9.0,
        IMAGE_WIDTH,
        IMAGE_HEIGHT,
        images.get(&entry.image_url),
    );

    let text_x = MARGIN + IMAGE_WIDTH + 22.0;
    let text_width = CONTENT_WIDTH - IMAGE_WIDTH - 32.0;

    let name = truncate(&entry.name, Font::HelveticaBold, 12.0, text_width - 80.0);
    cursor.text_at(text_x, top + 22.0, &name, Font::HelveticaBold, 12.0, Rgb::BLACK);
    time_badge(entry, top, cursor);

    if !entry.place.is_empty() {
        let place = truncate(&entry.place, Font::Helvetica, BODY_SIZE, text_width);
        cursor.text_at(text_x, top + 40.0, &place, Font::Helvetica, BODY_SIZE, Rgb::GREY);
    }

    cursor.text_at(
        text_x,
        top + 58.0,
        &traveler_line(quote, entry),
        Font::Helvetica,
        BODY_SIZE,
        Rgb::BLACK,
    );

    let price = format_amount(entry.total_price, quote.currency);
    cursor.text_at(text_x, top + 78.0, &price, Font::HelveticaBold, 11.0, Rgb::TEAL);
}

/// Small right-aligned chip with the time-slot label.
fn time_badge(entry: &ActivityEntry, card_top: f64, cursor: &mut PageCursor) {
    let label = entry.time_slot.label();
    let size = 8.0;
    let text_width = Font::HelveticaBold.text_width(label, size);
    let badge_width = text_width + 12.0;
    let x = MARGIN + CONTENT_WIDTH - badge_width - 10.0;

    cursor.fill_rect(x, card_top + 10.0, badge_width, 14.0, Rgb::TEAL);
    cursor.text_at(
        x + 6.0,
        card_top + 20.0,
        label,
        Font::HelveticaBold,
        size,
        Rgb::WHITE,
    );
}

/// Headcount the entry was priced for: per-entry overrides, else the
/// quotation-level counts.
fn traveler_line(quote: &Quotation, entry: &ActivityEntry) -> String {
    let adults = entry.custom_adults.unwrap_or(quote.adults);
    let children = entry.custom_children.unwrap_or(quote.children);
    if children == 0 {
        format!("For {adults} adult(s)")
    } else {
        format!("For {adults} adult(s), {children} child(ren)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::layout::DrawCommand;
    use crate::quote::models::{PerHeadPrices, TimeSlot};
    use crate::session::{RateType, SessionContext};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn activity(entry_id: i64, date: Option<NaiveDate>, slot: TimeSlot) -> ActivityEntry {
        ActivityEntry {
            entry_id,
            activity_id: Uuid::nil(),
            name: format!("Activity {entry_id}"),
            place: "Old Town".to_string(),
            image_url: None,
            date,
            time_slot: slot,
            custom_adults: None,
            custom_children: None,
            prices: PerHeadPrices::default(),
            total_price: Decimal::ZERO,
        }
    }

    fn quote_with(activities: Vec<ActivityEntry>) -> Quotation {
        let session = SessionContext {
            branch: "DXB".to_string(),
            username: "alice".to_string(),
            rate_type: RateType::B2c,
            is_admin: false,
        };
        let mut q = Quotation::draft(&session);
        q.adults = 2;
        q.activities = activities;
        q
    }

    fn texts(pages: &[LayoutPage]) -> Vec<String> {
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
    fn test_bands_in_date_order_with_undated_last() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let q = quote_with(vec![
            activity(1, Some(d(9)), TimeSlot::Morning),
            activity(2, None, TimeSlot::Morning),
            activity(3, Some(d(2)), TimeSlot::Evening),
        ]);

        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();
        render(&q, &ImageSet::default(), &mut cursor, &mut pages);
        cursor.finish(&mut pages);

        let texts = texts(&pages);
        let first = texts.iter().position(|t| t == "02 Jan 2024").unwrap();
        let second = texts.iter().position(|t| t == "09 Jan 2024").unwrap();
        let last = texts
            .iter()
            .position(|t| t == "Flexible / To be scheduled")
            .unwrap();
        assert!(first < second && second < last);
    }

    #[test]
    fn test_card_shows_slot_badge() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let q = quote_with(vec![activity(1, Some(d), TimeSlot::Evening)]);

        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();
        render(&q, &ImageSet::default(), &mut cursor, &mut pages);
        cursor.finish(&mut pages);

        assert!(texts(&pages).iter().any(|t| t == "Evening"));
    }

    #[test]
    fn test_custom_headcount_overrides_global() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let mut entry = activity(1, Some(d), TimeSlot::Morning);
        entry.custom_adults = Some(4);
        entry.custom_children = Some(1);
        let q = quote_with(vec![entry]);

        assert_eq!(
            traveler_line(&q, &q.activities[0]),
            "For 4 adult(s), 1 child(ren)"
        );
        assert_eq!(
            traveler_line(&q, &activity(2, None, TimeSlot::Morning)),
            "For 2 adult(s)"
        );
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
