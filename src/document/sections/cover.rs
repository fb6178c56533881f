//! Cover page: full-bleed brand background, traveler name, destination and
//! the per-person price. Always exactly one page.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::document::font::Font;
use crate::document::layout::{DrawCommand, LayoutPage, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use crate::document::sections::format_date;
use crate::document::text::truncate;
use crate::pricing::format_amount;
use crate::quote::models::Quotation;

pub fn render(quote: &Quotation, generated_on: Option<NaiveDate>) -> LayoutPage {
    let mut commands = Vec::new();

    commands.push(DrawCommand::Rect {
        x: 0.0,
        y: 0.0,
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
        fill: Some(Rgb::TEAL),
        stroke: None,
    });
    // Lighter panel behind the headline block
    commands.push(DrawCommand::Rect {
        x: 60.0,
        y: 240.0,
        width: PAGE_WIDTH - 120.0,
        height: 300.0,
        fill: Some(Rgb::new(0.0, 0.36, 0.39)),
        stroke: None,
    });

    centered(&mut commands, 300.0, "TRAVEL QUOTATION", Font::HelveticaBold, 26.0, Rgb::WHITE);

    let name = if quote.traveler_name.trim().is_empty() {
        "Valued Guest".to_string()
    } else {
        truncate(&quote.traveler_name, Font::HelveticaBold, 20.0, PAGE_WIDTH - 160.0)
    };
    centered(&mut commands, 360.0, "Prepared for", Font::Helvetica, 11.0, Rgb::new(0.8, 0.9, 0.9));
    centered(&mut commands, 386.0, &name, Font::HelveticaBold, 20.0, Rgb::WHITE);

    if !quote.destination.trim().is_empty() {
        let destination =
            truncate(&quote.destination, Font::Helvetica, 14.0, PAGE_WIDTH - 160.0);
        centered(&mut commands, 414.0, &destination, Font::Helvetica, 14.0, Rgb::WHITE);
    }

    commands.push(DrawCommand::Rect {
        x: PAGE_WIDTH / 2.0 - 60.0,
        y: 440.0,
        width: 120.0,
        height: 1.0,
        fill: Some(Rgb::WHITE),
        stroke: None,
    });

    let per_person = quote.totals.grand_total / Decimal::from(quote.traveler_count());
    let price = format_amount(per_person, quote.currency);
    centered(&mut commands, 476.0, "Price per person", Font::Helvetica, 11.0, Rgb::new(0.8, 0.9, 0.9));
    centered(&mut commands, 504.0, &price, Font::HelveticaBold, 22.0, Rgb::WHITE);

    if let Some(date) = generated_on {
        let line = format!("Generated on {}", format_date(date));
        centered(&mut commands, PAGE_HEIGHT - 50.0, &line, Font::Helvetica, 9.0, Rgb::new(0.8, 0.9, 0.9));
    }

    LayoutPage { commands }
}

fn centered(
    commands: &mut Vec<DrawCommand>,
    baseline: f64,
    content: &str,
    font: Font,
    size: f64,
    color: Rgb,
) {
    let width = font.text_width(content, size);
    commands.push(DrawCommand::Text {
        x: (PAGE_WIDTH - width) / 2.0,
        baseline,
        content: content.to_string(),
        font,
        size,
        color,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{RateType, SessionContext};
    use rust_decimal_macros::dec;

    fn quote() -> Quotation {
        let session = SessionContext {
            branch: "DXB".to_string(),
            username: "alice".to_string(),
            rate_type: RateType::B2c,
            is_admin: false,
        };
        Quotation::draft(&session)
    }

    #[test]
    fn test_cover_shows_per_person_price() {
        let mut q = quote();
        q.adults = 2;
        q.children = 0;
        q.totals.grand_total = dec!(1000);

        let page = render(&q, None);
        let found = page.commands.iter().any(|c| {
            matches!(c, DrawCommand::Text { content, .. } if content == "AED 500")
        });
        assert!(found);
    }

    #[test]
    fn test_empty_name_falls_back() {
        let page = render(&quote(), None);
        let found = page.commands.iter().any(|c| {
            matches!(c, DrawCommand::Text { content, .. } if content == "Valued Guest")
        });
        assert!(found);
    }

    #[test]
    fn test_generated_on_stamp() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let page = render(&quote(), Some(date));
        let found = page.commands.iter().any(|c| {
            matches!(c, DrawCommand::Text { content, .. } if content == "Generated on 15 Mar 2024")
        });
        assert!(found);
        assert!(!render(&quote(), None).commands.iter().any(|c| {
            matches!(c, DrawCommand::Text { content, .. } if content.starts_with("Generated on"))
        }));
    }
}
