//! Minimal PDF serializer for laid-out pages.
//!
//! Pages arrive as flat lists of positioned draw commands in top-down page
//! coordinates; this module flips them into PDF space and emits a plain
//! PDF 1.4 file: base-14 Helvetica fonts (nothing embedded), uncompressed
//! content streams, images as DCTDecode XObjects. Output is byte-for-byte
//! deterministic for identical input pages.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::document::font::Font;
use crate::document::images::EncodedImage;
use crate::document::layout::{DrawCommand, LayoutPage, Rgb, PAGE_HEIGHT, PAGE_WIDTH};

/// Serialize finished pages into a complete PDF file.
pub fn render(pages: &[LayoutPage]) -> Vec<u8> {
    let images = collect_images(pages);

    // Fixed id plan: 1 catalog, 2 pages, 3-4 fonts, then images, then a
    // (content, page) object pair per page.
    let image_base = 5u32;
    let page_base = image_base + images.list.len() as u32;

    let mut writer = Writer::new();
    writer.buf.extend_from_slice(b"%PDF-1.4\n");
    // Binary-detection comment line, as the format recommends
    writer.buf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    // 1: document catalog
    writer.begin_obj(1);
    writer.text("<< /Type /Catalog /Pages 2 0 R >>\n");
    writer.end_obj();

    // 2: page tree
    let kids: Vec<String> = (0..pages.len())
        .map(|k| format!("{} 0 R", page_base + 2 * k as u32 + 1))
        .collect();
    writer.begin_obj(2);
    writer.text(&format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>\n",
        kids.join(" "),
        pages.len()
    ));
    writer.end_obj();

    // 3-4: the two standard fonts
    for (id, font) in [(3u32, Font::Helvetica), (4u32, Font::HelveticaBold)] {
        writer.begin_obj(id);
        writer.text(&format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\n",
            font.base_name()
        ));
        writer.end_obj();
    }

    // Image XObjects
    for (index, image) in images.list.iter().enumerate() {
        writer.begin_obj(image_base + index as u32);
        writer.text(&format!(
            "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
             /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>\n",
            image.width_px,
            image.height_px,
            image.jpeg.len()
        ));
        writer.text("stream\n");
        writer.buf.extend_from_slice(&image.jpeg);
        writer.text("\nendstream\n");
        writer.end_obj();
    }

    // Shared resource dictionary: both fonts plus every image
    let mut resources = String::from("/Font << /F1 3 0 R /F2 4 0 R >>");
    if !images.list.is_empty() {
        resources.push_str(" /XObject << ");
        for index in 0..images.list.len() {
            let _ = write!(
                resources,
                "/Im{} {} 0 R ",
                index + 1,
                image_base + index as u32
            );
        }
        resources.push_str(">>");
    }

    // Content stream + page object per page
    for (k, page) in pages.iter().enumerate() {
        let content_id = page_base + 2 * k as u32;
        let stream = content_stream(page, &images);

        writer.begin_obj(content_id);
        writer.text(&format!("<< /Length {} >>\n", stream.len()));
        writer.text("stream\n");
        writer.buf.extend_from_slice(stream.as_bytes());
        writer.text("endstream\n");
        writer.end_obj();

        writer.begin_obj(content_id + 1);
        writer.text(&format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << {resources} >> /Contents {content_id} 0 R >>\n"
        ));
        writer.end_obj();
    }

    writer.finish()
}

/// Distinct images in first-placement order, with an index per pointer.
struct ImageTable {
    list: Vec<Arc<EncodedImage>>,
    index: HashMap<*const EncodedImage, usize>,
}

impl ImageTable {
    fn index_of(&self, image: &Arc<EncodedImage>) -> usize {
        self.index[&Arc::as_ptr(image)]
    }
}

fn collect_images(pages: &[LayoutPage]) -> ImageTable {
    let mut table = ImageTable {
        list: Vec::new(),
        index: HashMap::new(),
    };
    for page in pages {
        for command in &page.commands {
            if let DrawCommand::Image { image, .. } = command {
                let key = Arc::as_ptr(image);
                if !table.index.contains_key(&key) {
                    table.index.insert(key, table.list.len());
                    table.list.push(Arc::clone(image));
                }
            }
        }
    }
    table
}

fn content_stream(page: &LayoutPage, images: &ImageTable) -> String {
    let mut out = String::new();
    for command in &page.commands {
        match command {
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                let py = PAGE_HEIGHT - y - height;
                if let Some(color) = fill {
                    let _ = writeln!(out, "{} rg", rgb(color));
                }
                if let Some((color, line_width)) = stroke {
                    let _ = writeln!(out, "{} RG", rgb(color));
                    let _ = writeln!(out, "{} w", num(*line_width));
                }
                let _ = writeln!(
                    out,
                    "{} {} {} {} re",
                    num(*x),
                    num(py),
                    num(*width),
                    num(*height)
                );
                let op = match (fill, stroke) {
                    (Some(_), Some(_)) => "B",
                    (Some(_), None) => "f",
                    _ => "S",
                };
                let _ = writeln!(out, "{op}");
            }
            DrawCommand::Text {
                x,
                baseline,
                content,
                font,
                size,
                color,
            } => {
                let py = PAGE_HEIGHT - baseline;
                let _ = writeln!(out, "BT");
                let _ = writeln!(out, "/{} {} Tf", font.resource_key(), num(*size));
                let _ = writeln!(out, "{} rg", rgb(color));
                let _ = writeln!(out, "{} {} Td", num(*x), num(py));
                let _ = writeln!(out, "({}) Tj", escape_text(content));
                let _ = writeln!(out, "ET");
            }
            DrawCommand::Image {
                x,
                y,
                width,
                height,
                image,
            } => {
                let py = PAGE_HEIGHT - y - height;
                let _ = writeln!(out, "q");
                let _ = writeln!(
                    out,
                    "{} 0 0 {} {} {} cm",
                    num(*width),
                    num(*height),
                    num(*x),
                    num(py)
                );
                let _ = writeln!(out, "/Im{} Do", images.index_of(image) + 1);
                let _ = writeln!(out, "Q");
            }
            DrawCommand::Placeholder {
                x,
                y,
                width,
                height,
            } => {
                let py = PAGE_HEIGHT - y - height;
                let _ = writeln!(out, "{} rg", rgb(&Rgb::PLACEHOLDER));
                let _ = writeln!(out, "{} RG", rgb(&Rgb::GREY));
                let _ = writeln!(out, "0.5 w");
                let _ = writeln!(
                    out,
                    "{} {} {} {} re",
                    num(*x),
                    num(py),
                    num(*width),
                    num(*height)
                );
                let _ = writeln!(out, "B");
            }
        }
    }
    out
}

/// Fixed two-decimal formatting keeps streams deterministic.
fn num(value: f64) -> String {
    format!("{value:.2}")
}

fn rgb(color: &Rgb) -> String {
    format!("{} {} {}", num(color.r), num(color.g), num(color.b))
}

/// Escape a PDF string literal; anything outside printable ASCII becomes
/// '?' (matching what the measurement side did).
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            ' '..='~' => out.push(ch),
            _ => out.push('?'),
        }
    }
    out
}

/// Byte buffer plus the xref bookkeeping.
struct Writer {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl Writer {
    fn new() -> Self {
        Self {
            buf: Vec::new(),
            offsets: Vec::new(),
        }
    }

    fn begin_obj(&mut self, id: u32) {
        debug_assert_eq!(id as usize, self.offsets.len() + 1, "objects out of order");
        self.offsets.push(self.buf.len());
        self.text(&format!("{id} 0 obj\n"));
    }

    fn end_obj(&mut self) {
        self.text("endobj\n");
    }

    fn text(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let count = self.offsets.len() + 1;
        self.text(&format!("xref\n0 {count}\n"));
        self.text("0000000000 65535 f \n");
        for offset in self.offsets.clone() {
            self.text(&format!("{offset:010} 00000 n \n"));
        }
        self.text(&format!(
            "trailer\n<< /Size {count} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        ));
        self.buf
    }
}
