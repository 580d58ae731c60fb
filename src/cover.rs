// Cover layer: the opaque coat painted onto a fresh scratch surface.
// A diagonal two-stop gradient (top-left -> bottom-right) with a centered,
// translucent label on top.

use crate::config::ScratchConfig;
use crate::font::draw_text_centered;
use crate::surface::Surface;
use image::Rgba;

/// Gradient parameter of pixel (x, y): projection of the pixel center onto
/// the (0,0)->(w,h) axis, clamped to [0, 1].
fn gradient_t(x: u32, y: u32, w: u32, h: u32) -> f32 {
    let (w, h) = (w as f32, h as f32);
    let len2 = w * w + h * h;
    if len2 <= 0.0 {
        return 0.0;
    }
    (((x as f32 + 0.5) * w + (y as f32 + 0.5) * h) / len2).clamp(0.0, 1.0)
}

fn lerp_rgba(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let mix = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t).round() as u8;
    Rgba([mix(0), mix(1), mix(2), mix(3)])
}

pub fn paint_gradient(surface: &mut Surface, start: Rgba<u8>, end: Rgba<u8>) {
    let (w, h) = (surface.width(), surface.height());
    for y in 0..h {
        for x in 0..w {
            surface.put_pixel(x, y, lerp_rgba(start, end, gradient_t(x, y, w, h)));
        }
    }
}

/// Paint the whole cover: gradient first, then `label` centered.
pub fn paint_cover(surface: &mut Surface, cfg: &ScratchConfig, label: &str) {
    paint_gradient(surface, cfg.cover_start, cfg.cover_end);
    let cx = (surface.width() / 2) as i32;
    let cy = (surface.height() / 2) as i32;
    draw_text_centered(surface, cx, cy, label, cfg.label_color, cfg.label_scale);
}
