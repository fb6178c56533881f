//! Page-aware layout primitives.
//!
//! The engine never lays content on an infinite canvas and slices it
//! afterwards. A single cursor tracks the next free y-coordinate on the
//! current page; before placing a block the caller asks whether it fits,
//! and if not the cursor finalizes the page and opens a fresh one. That
//! check-and-break is the only control-flow primitive the layout uses -
//! there is no backward pass and no reflow once a page has started.

use std::sync::Arc;

use crate::document::font::Font;
use crate::document::images::EncodedImage;

/// A4 in points
pub const PAGE_WIDTH: f64 = 595.0;
pub const PAGE_HEIGHT: f64 = 842.0;
/// Uniform page margin
pub const MARGIN: f64 = 40.0;

pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
pub const CONTENT_HEIGHT: f64 = PAGE_HEIGHT - 2.0 * MARGIN;

/// RGB fill/stroke color, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    /// Brand teal used for bands and headings
    pub const TEAL: Rgb = Rgb::new(0.0, 0.42, 0.45);
    /// Light card background
    pub const CARD: Rgb = Rgb::new(0.95, 0.96, 0.97);
    /// Placeholder fill
    pub const PLACEHOLDER: Rgb = Rgb::new(0.85, 0.85, 0.85);
    /// Secondary text
    pub const GREY: Rgb = Rgb::new(0.4, 0.4, 0.4);
}

/// One positioned drawing operation. Coordinates are absolute page points
/// with the origin at the top-left; the PDF writer flips them.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Rgb>,
        stroke: Option<(Rgb, f64)>,
    },
    Text {
        x: f64,
        /// Baseline y, top-down
        baseline: f64,
        content: String,
        font: Font,
        size: f64,
        color: Rgb,
    },
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image: Arc<EncodedImage>,
    },
    /// Neutral block drawn when an image could not be loaded
    Placeholder {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// A finished page
#[derive(Debug, Clone, Default)]
pub struct LayoutPage {
    pub commands: Vec<DrawCommand>,
}

/// Tracks where we are on the current page during layout.
#[derive(Debug, Default)]
pub struct PageCursor {
    /// Next free y, relative to the content-area top
    pub y: f64,
    commands: Vec<DrawCommand>,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertical space left on the current page.
    pub fn remaining(&self) -> f64 {
        (CONTENT_HEIGHT - self.y).max(0.0)
    }

    /// Absolute y of the cursor on the page.
    pub fn abs_y(&self) -> f64 {
        MARGIN + self.y
    }

    /// Close the current page onto `pages` and reset to the top margin.
    pub fn break_page(&mut self, pages: &mut Vec<LayoutPage>) {
        pages.push(LayoutPage {
            commands: std::mem::take(&mut self.commands),
        });
        self.y = 0.0;
    }

    /// The check-and-break primitive: start a new page unless `needed`
    /// points still fit below the cursor.
    pub fn ensure_space(&mut self, pages: &mut Vec<LayoutPage>, needed: f64) {
        if needed > self.remaining() {
            self.break_page(pages);
        }
    }

    /// Flush whatever is on the cursor as the final page. A page is emitted
    /// even when nothing was drawn, so an empty quotation still exports.
    pub fn finish(mut self, pages: &mut Vec<LayoutPage>) {
        if !self.commands.is_empty() || self.y > 0.0 {
            self.break_page(pages);
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Advance the cursor without drawing.
    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Draw one text line at the cursor and advance by `line_height`.
    pub fn text_line(
        &mut self,
        x: f64,
        content: &str,
        font: Font,
        size: f64,
        line_height: f64,
        color: Rgb,
    ) {
        self.commands.push(DrawCommand::Text {
            x,
            baseline: self.abs_y() + size,
            content: content.to_string(),
            font,
            size,
            color,
        });
        self.y += line_height;
    }

    /// Draw a text line at an absolute position without moving the cursor.
    pub fn text_at(
        &mut self,
        x: f64,
        baseline: f64,
        content: &str,
        font: Font,
        size: f64,
        color: Rgb,
    ) {
        self.commands.push(DrawCommand::Text {
            x,
            baseline,
            content: content.to_string(),
            font,
            size,
            color,
        });
    }

    /// Filled rectangle at an absolute position.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Rgb) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
        });
    }

    /// Stroked rectangle at an absolute position.
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb, w: f64) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: Some((color, w)),
        });
    }

    /// Place a fetched image, or the neutral "No Image" placeholder when
    /// the fetch failed. Never errors; asset failure must not abort the
    /// document.
    pub fn image_or_placeholder(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image: Option<&Arc<EncodedImage>>,
    ) {
        match image {
            Some(img) => self.commands.push(DrawCommand::Image {
                x,
                y,
                width,
                height,
                image: Arc::clone(img),
            }),
            None => {
                self.commands.push(DrawCommand::Placeholder {
                    x,
                    y,
                    width,
                    height,
                });
                let label = "No Image";
                let size = 8.0;
                let label_w = Font::Helvetica.text_width(label, size);
                self.commands.push(DrawCommand::Text {
                    x: x + (width - label_w) / 2.0,
                    baseline: y + height / 2.0 + size / 2.0,
                    content: label.to_string(),
                    font: Font::Helvetica,
                    size,
                    color: Rgb::GREY,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_shrinks_with_cursor() {
        let mut cursor = PageCursor::new();
        assert!((cursor.remaining() - CONTENT_HEIGHT).abs() < 1e-9);
        cursor.advance(100.0);
        assert!((cursor.remaining() - (CONTENT_HEIGHT - 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_ensure_space_breaks_when_needed() {
        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();

        cursor.text_line(MARGIN, "top", Font::Helvetica, 10.0, 14.0, Rgb::BLACK);
        cursor.advance(CONTENT_HEIGHT); // exhaust the page

        cursor.ensure_space(&mut pages, 50.0);
        assert_eq!(pages.len(), 1);
        assert_eq!(cursor.y, 0.0);
        assert_eq!(pages[0].commands.len(), 1);
    }

    #[test]
    fn test_ensure_space_no_break_when_fits() {
        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();
        cursor.advance(100.0);
        cursor.ensure_space(&mut pages, 50.0);
        assert!(pages.is_empty());
        assert!((cursor.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_finish_flushes_trailing_page() {
        let mut cursor = PageCursor::new();
        let mut pages = Vec::new();
        cursor.text_line(MARGIN, "only", Font::Helvetica, 10.0, 14.0, Rgb::BLACK);
        cursor.finish(&mut pages);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_finish_skips_untouched_cursor() {
        let cursor = PageCursor::new();
        let mut pages = Vec::new();
        cursor.finish(&mut pages);
        assert!(pages.is_empty());
    }

    #[test]
    fn test_placeholder_emits_label() {
        let mut cursor = PageCursor::new();
        cursor.image_or_placeholder(MARGIN, MARGIN, 120.0, 90.0, None);
        cursor.advance(90.0);

        let mut pages = Vec::new();
        cursor.finish(&mut pages);
        let has_label = pages[0].commands.iter().any(|c| {
            matches!(c, DrawCommand::Text { content, .. } if content == "No Image")
        });
        assert!(has_label);
        let has_block = pages[0]
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Placeholder { .. }));
        assert!(has_block);
    }
}
