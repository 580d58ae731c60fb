// Raster buffer behind a scratch card: straight-alpha RGBA pixels.

use crate::brush::Disc;
use image::{Rgba, RgbaImage};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Anything text and shapes can be blended onto.
pub trait PixelSink {
    fn dimensions(&self) -> (u32, u32);
    /// Source-over `color` at (x, y); out-of-bounds writes are dropped.
    fn blend(&mut self, x: i32, y: i32, color: Rgba<u8>);
}

pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Fully transparent `width`x`height` buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, px: Rgba<u8>) {
        self.image.put_pixel(x, y, px);
    }

    /// Punch `disc` out of the buffer (destination-out with an opaque fill).
    /// Returns how many pixels went from visible (alpha >= `cutoff`) to erased.
    pub fn erase_disc(&mut self, disc: &Disc, cutoff: u8) -> u64 {
        let (w, h) = self.image.dimensions();
        let mut newly_erased = 0;
        for (y, span) in disc.spans(w, h) {
            for x in span {
                let px = self.image.get_pixel_mut(x, y);
                if px[3] >= cutoff {
                    newly_erased += 1;
                }
                *px = TRANSPARENT;
            }
        }
        newly_erased
    }

    /// Full scan: pixels whose alpha is below `cutoff`.
    pub fn erased_count(&self, cutoff: u8) -> u64 {
        self.image.pixels().filter(|p| p[3] < cutoff).count() as u64
    }

    pub fn is_fully_transparent(&self) -> bool {
        self.image.pixels().all(|p| p[3] == 0)
    }

    pub fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = TRANSPARENT;
        }
    }
}

impl PixelSink for Surface {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn blend(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width() || y >= self.height() {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        *dst = source_over(color, *dst);
    }
}

/// Straight-alpha source-over.
pub fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return TRANSPARENT;
    }
    let mix = |s: u8, d: u8| {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
