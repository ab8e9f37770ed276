//! Portrait thumbnails, the in-memory portrait cache and the placeholder image.

use image::imageops::FilterType;
use image::DynamicImage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

const THUMB_W: u32 = 48;
const THUMB_H: u32 = 48;

/// Gray used for the placeholder silhouette.
pub const PLACEHOLDER_FG: (u8, u8, u8) = (142, 142, 147);
pub const BACKGROUND: (u8, u8, u8) = (0, 0, 0);

pub type Pixels = Vec<Vec<(u8, u8, u8)>>;

/// Compact RGB thumbnail stored in the in-memory cache.
#[derive(Debug, Clone)]
pub struct SpriteThumb {
    pub w: u32,
    pub h: u32,
    /// RGB pixels in row-major order (len = w*h*3)
    pub pixels: Vec<u8>,
}

impl SpriteThumb {
    pub fn from_image(img: &DynamicImage) -> Self {
        let small = image::imageops::resize(&img.to_rgba8(), THUMB_W, THUMB_H, FilterType::Lanczos3);
        let mut pixels = Vec::with_capacity((THUMB_W * THUMB_H * 3) as usize);
        for p in small.pixels() {
            pixels.extend_from_slice(&[p[0], p[1], p[2]]);
        }
        Self {
            w: THUMB_W,
            h: THUMB_H,
            pixels,
        }
    }

    /// Pixel rows sized `w` x `h`, resized from the thumbnail when needed.
    pub fn rows(&self, w: u32, h: u32) -> Pixels {
        if self.w == w && self.h == h {
            return self
                .pixels
                .chunks(self.w as usize * 3)
                .map(|row| row.chunks(3).map(|p| (p[0], p[1], p[2])).collect())
                .collect();
        }

        let mut buf = image::RgbaImage::new(self.w, self.h);
        for (x, y, px) in buf.enumerate_pixels_mut() {
            let idx = ((y * self.w + x) * 3) as usize;
            *px = image::Rgba([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2], 255]);
        }
        let resized = image::imageops::resize(&buf, w.max(1), h.max(1), FilterType::Lanczos3);
        resized
            .rows()
            .map(|row| row.map(|p| (p[0], p[1], p[2])).collect())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum PortraitSlot {
    Loading,
    Ready(SpriteThumb),
    Failed,
}

/// Portraits keyed by URL. A URL is only requested again after a failed load.
#[derive(Clone, Default)]
pub struct PortraitCache {
    inner: Arc<Mutex<HashMap<String, PortraitSlot>>>,
}

impl PortraitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `url` as loading. Returns false if it is loading or loaded;
    /// unknown and failed URLs are (re)started.
    pub fn begin(&self, url: &str) -> bool {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(map.get(url), Some(PortraitSlot::Loading | PortraitSlot::Ready(_))) {
            return false;
        }
        map.insert(url.to_string(), PortraitSlot::Loading);
        true
    }

    pub fn finish(&self, url: &str, thumb: Option<SpriteThumb>) {
        let slot = match thumb {
            Some(t) => PortraitSlot::Ready(t),
            None => PortraitSlot::Failed,
        };
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), slot);
    }

    pub fn get(&self, url: &str) -> Option<PortraitSlot> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Pixels for a ready portrait, `None` while loading, failed or unknown.
    pub fn pixels(&self, url: &str, w: u32, h: u32) -> Option<Pixels> {
        match self.get(url)? {
            PortraitSlot::Ready(thumb) => Some(thumb.rows(w, h)),
            PortraitSlot::Loading | PortraitSlot::Failed => None,
        }
    }
}

/// A gray head-and-shoulders silhouette on the background color.
pub fn placeholder_pixels(w: u32, h: u32) -> Pixels {
    let (w, h) = (w.max(1), h.max(1));
    (0..h)
        .map(|y| {
            (0..w)
                .map(|x| {
                    let nx = (x as f32 + 0.5) / w as f32;
                    let ny = (y as f32 + 0.5) / h as f32;
                    let head = (nx - 0.5).powi(2) + (ny - 0.33).powi(2) <= 0.18f32.powi(2);
                    let body = ny >= 0.58
                        && ((nx - 0.5) / 0.38).powi(2) + ((ny - 1.0) / 0.42).powi(2) <= 1.0;
                    if head || body {
                        PLACEHOLDER_FG
                    } else {
                        BACKGROUND
                    }
                })
                .collect()
        })
        .collect()
}
