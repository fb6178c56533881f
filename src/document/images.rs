//! Image fetching and normalization for document embedding.
//!
//! Every referenced image is fetched ahead of layout, awaited one at a time
//! in document order, and normalized to a baseline RGB JPEG the PDF writer
//! can embed directly. A failed fetch or undecodable payload is logged and
//! recorded as absent; the owning card renders a placeholder instead.
//! Nothing here can abort document generation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use moka::future::Cache;
use tracing::warn;

use crate::quote::models::Quotation;

/// A decoded image re-encoded as baseline RGB JPEG.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub width_px: u32,
    pub height_px: u32,
    pub jpeg: Vec<u8>,
}

/// Source of raw image bytes. The HTTP implementation is used in
/// production; tests substitute a canned fetcher for determinism.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = anyhow::Result<Vec<u8>>> + Send;
}

/// reqwest-backed fetcher with a bounded byte cache, so re-exporting the
/// same quotation does not refetch unchanged images.
#[derive(Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
    cache: Cache<String, Arc<Vec<u8>>>,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            // 200 entries, 30 min TTL
            cache: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(30 * 60))
                .build(),
        }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        // Inline data URIs carry their own payload
        if let Some(rest) = url.strip_prefix("data:") {
            let payload = rest
                .split_once("base64,")
                .map(|(_, data)| data)
                .ok_or_else(|| anyhow::anyhow!("unsupported data URI"))?;
            return Ok(base64::engine::general_purpose::STANDARD.decode(payload)?);
        }

        if let Some(cached) = self.cache.get(url).await {
            return Ok((*cached).clone());
        }

        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?.to_vec();
        self.cache
            .insert(url.to_string(), Arc::new(bytes.clone()))
            .await;
        Ok(bytes)
    }
}

/// Decode arbitrary fetched bytes and re-encode as RGB JPEG.
pub fn normalize(bytes: &[u8]) -> anyhow::Result<EncodedImage> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = decoded.to_rgb8();
    let (width_px, height_px) = (rgb.width(), rgb.height());

    let mut jpeg = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 80);
    encoder.encode(rgb.as_raw(), width_px, height_px, image::ExtendedColorType::Rgb8)?;

    Ok(EncodedImage {
        width_px,
        height_px,
        jpeg,
    })
}

/// Images resolved for one composition run, keyed by source URL.
#[derive(Debug, Default)]
pub struct ImageSet {
    images: HashMap<String, Arc<EncodedImage>>,
}

impl ImageSet {
    pub fn get(&self, url: &Option<String>) -> Option<&Arc<EncodedImage>> {
        url.as_deref().and_then(|u| self.images.get(u))
    }

    pub fn insert(&mut self, url: String, image: EncodedImage) {
        self.images.insert(url, Arc::new(image));
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Fetch-or-placeholder pass over every image the document will place,
/// awaited sequentially in document order. Failures degrade to absence.
pub async fn prefetch<F: ImageFetcher>(quote: &Quotation, fetcher: &F) -> ImageSet {
    let mut urls: Vec<&str> = Vec::new();
    for hotel in quote.hotels_by_check_in() {
        if let Some(url) = hotel.image_url.as_deref() {
            urls.push(url);
        }
    }
    for (_, entries) in quote.itinerary_groups() {
        for entry in entries {
            if let Some(url) = entry.image_url.as_deref() {
                urls.push(url);
            }
        }
    }

    let mut set = ImageSet::default();
    for url in urls {
        if set.get(&Some(url.to_string())).is_some() {
            continue;
        }
        match fetcher.fetch(url).await {
            Ok(bytes) => match normalize(&bytes) {
                Ok(image) => set.insert(url.to_string(), image),
                Err(e) => warn!("Undecodable image {}: {}", url, e),
            },
            Err(e) => warn!("Image fetch failed for {}: {}", url, e),
        }
    }
    set
}

/// Canned test doubles shared by the composition tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Fetcher returning canned bytes per URL; unknown URLs fail.
    pub struct MockFetcher {
        pub responses: HashMap<String, Vec<u8>>,
    }

    impl ImageFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no such image"))
        }
    }

    pub fn tiny_png() -> Vec<u8> {
        // 2x2 white PNG built through the image crate itself
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([255, 255, 255]));
        let mut out = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut out),
            image::ImageFormat::Png,
        )
        .unwrap();
        out
    }
}
