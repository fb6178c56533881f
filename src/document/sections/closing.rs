//! Closing page: thank-you note and booking instructions. Always exactly
//! one page.

use crate::document::font::Font;
use crate::document::layout::{DrawCommand, LayoutPage, Rgb, PAGE_HEIGHT, PAGE_WIDTH};

const NOTE_LINES: [&str; 4] = [
    "Thank you for considering us for your journey.",
    "This quotation is valid for 7 days from the date of issue.",
    "To confirm your booking, please reply to your travel consultant",
    "with the quotation reference.",
];

pub fn render() -> LayoutPage {
    let mut commands = Vec::new();

    commands.push(DrawCommand::Rect {
        x: 0.0,
        y: 0.0,
        width: PAGE_WIDTH,
        height: 160.0,
        fill: Some(Rgb::TEAL),
        stroke: None,
    });
    centered(&mut commands, 100.0, "Thank You", Font::HelveticaBold, 28.0, Rgb::WHITE);

    let mut baseline = 320.0;
    for line in NOTE_LINES {
        centered(&mut commands, baseline, line, Font::Helvetica, 12.0, Rgb::BLACK);
        baseline += 20.0;
    }

    commands.push(DrawCommand::Rect {
        x: PAGE_WIDTH / 2.0 - 60.0,
        y: baseline + 10.0,
        width: 120.0,
        height: 1.0,
        fill: Some(Rgb::TEAL),
        stroke: None,
    });
    centered(
        &mut commands,
        baseline + 48.0,
        "We look forward to traveling with you.",
        Font::Helvetica,
        11.0,
        Rgb::GREY,
    );

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

    #[test]
    fn test_closing_has_thank_you() {
        let page = render();
        let found = page.commands.iter().any(|c| {
            matches!(c, DrawCommand::Text { content, .. } if content == "Thank You")
        });
        assert!(found);
    }

    #[test]
    fn test_closing_is_ascii() {
        for command in render().commands {
            if let DrawCommand::Text { content, .. } = command {
                assert!(content.is_ascii());
            }
        }
    }
}
