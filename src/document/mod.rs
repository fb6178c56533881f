//! Document composition engine.
//!
//! Turns a quotation snapshot into a finished multi-page PDF: images are
//! prefetched (failures degrade to placeholders), the six sections are laid
//! out in fixed order through the page cursor, page-number footers are
//! stamped after pagination, and the pages are serialized. Given the same
//! snapshot and options the output bytes are identical.

pub mod font;
pub mod images;
pub mod layout;
pub mod pdf;
pub mod sections;
pub mod text;

use chrono::NaiveDate;
use tracing::info;

use crate::document::font::Font;
use crate::document::images::{ImageFetcher, ImageSet};
use crate::document::layout::{DrawCommand, LayoutPage, PageCursor, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use crate::error::Result;
use crate::quote::models::Quotation;

/// Caller-facing composition toggles.
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Render the traveler-info block on the overview page
    pub include_traveler_info: bool,
    /// Cover metadata date; today when unset. Pin it for reproducible
    /// output across runs.
    pub generated_on: Option<NaiveDate>,
}

/// A finished export: suggested file name plus the PDF bytes.
#[derive(Debug, Clone)]
pub struct DocumentArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Compose the full quotation document.
pub async fn compose<F: ImageFetcher>(
    quote: &Quotation,
    options: &ComposeOptions,
    fetcher: &F,
) -> Result<DocumentArtifact> {
    info!("Composing document for quotation {}", quote.id);

    let images = images::prefetch(quote, fetcher).await;
    let pages = layout_pages(quote, options, &images);
    let bytes = pdf::render(&pages);

    info!(
        "Composed {} pages ({} bytes) for quotation {}",
        pages.len(),
        bytes.len(),
        quote.id
    );
    Ok(DocumentArtifact {
        file_name: file_name(&quote.traveler_name),
        bytes,
    })
}

/// Pure layout pass: sections in fixed order, then footers. Synchronous so
/// nothing time-dependent can leak into page content.
fn layout_pages(quote: &Quotation, options: &ComposeOptions, images: &ImageSet) -> Vec<LayoutPage> {
    let generated_on = options
        .generated_on
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let mut pages = vec![sections::cover::render(quote, Some(generated_on))];

    let mut cursor = PageCursor::new();
    sections::overview::render(quote, options.include_traveler_info, &mut cursor, &mut pages);
    sections::accommodations::render(quote, images, &mut cursor, &mut pages);
    sections::itinerary::render(quote, images, &mut cursor, &mut pages);
    sections::terms::render(&mut cursor, &mut pages);
    cursor.finish(&mut pages);

    pages.push(sections::closing::render());
    stamp_footers(&mut pages);
    pages
}

/// "Page N of M" centered under the content area, applied once pagination
/// is final.
fn stamp_footers(pages: &mut [LayoutPage]) {
    let total = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        let label = format!("Page {} of {}", index + 1, total);
        let size = 8.0;
        let width = Font::Helvetica.text_width(&label, size);
        page.commands.push(DrawCommand::Text {
            x: (PAGE_WIDTH - width) / 2.0,
            baseline: PAGE_HEIGHT - 18.0,
            content: label,
            font: Font::Helvetica,
            size,
            color: Rgb::GREY,
        });
    }
}

/// `quotation_<slug>.pdf`, slug from the traveler name.
fn file_name(traveler_name: &str) -> String {
    let mut slug = String::new();
    for ch in traveler_name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    if slug.is_empty() {
        "quotation.pdf".to_string()
    } else {
        format!("quotation_{slug}.pdf")
    }
}
