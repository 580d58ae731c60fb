// Window + software drawing for the demo page.
// The window shows the page shell; the scratch card raster is composited on
// top of the hidden message with the card's current opacity.

use crate::error::Error;
use crate::font::{draw_text_centered, draw_text_shadowed};
use crate::scratch::ScratchSurface;
use crate::shell::{Envelope, Page, Screen};
use crate::surface::PixelSink;
use crate::types::{Container, FrameBuffer, pack_rgb, unpack_rgb};
use image::Rgba;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

const PAGE_BG: u32 = 0x00_FF_F0_F5;
const ENVELOPE: u32 = 0x00_FF_9B_CB;
const ENVELOPE_FLAP: u32 = 0x00_FF_B3_D9;
const LETTER: u32 = 0x00_FF_FF_FF;
const BUTTON: u32 = 0x00_E0_5A_9B;
const CARD_BG: u32 = 0x00_FF_FA_FC;
const INK: Rgba<u8> = Rgba([0x8a, 0x2b, 0x5c, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately shows the new page frame.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    pub fn quit_pressed(&self) -> bool {
        self.window.is_key_down(Key::Q)
    }

    /// Mouse position in window pixels, None while the cursor is outside.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }
}

/* ---------- Page layout ---------- */

/// Where things sit in the window. All boxes are in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub envelope: Container,
    pub letter: Container,
    pub tap_button: Container,
    pub panel: Container,
    pub close_button: Container,
    pub card: Container,
}

/// Box of `w`x`h` centered on (cx, cy), snapped to whole pixels so pointer
/// translation and compositing agree on the card origin.
fn centered(cx: f32, cy: f32, w: u32, h: u32) -> Container {
    Container::new((cx - w as f32 / 2.0).round(), (cy - h as f32 / 2.0).round(), w, h)
}

impl Layout {
    pub fn new(width: usize, height: usize, card_w: u32, card_h: u32) -> Self {
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let envelope = centered(cx, cy, 240, 150);
        let letter = centered(cx, cy, (width as u32).saturating_sub(80).max(120), (height as u32).saturating_sub(80).max(120));
        let tap_button = centered(cx, letter.y + letter.height as f32 - 50.0, 140, 36);
        let panel = centered(cx, cy, card_w + 40, card_h + 70);
        let close_button = Container::new(panel.x + panel.width as f32 - 28.0, panel.y + 6.0, 22, 22);
        let card = Container::new(panel.x + 20.0, panel.y + 40.0, card_w, card_h);
        Self { width, height, envelope, letter, tap_button, panel, close_button, card }
    }
}

/* ---------- Software drawing ---------- */

impl PixelSink for FrameBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    /// The frame is opaque; only the source alpha matters.
    fn blend(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        blend_pixel(self, x, y, color, 1.0);
    }
}

/// Mix `color` into the pixel at (x,y) by its alpha times `opacity`.
/// Visual: the pixel shifts toward `color`; at opacity 0 nothing changes.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Rgba<u8>, opacity: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let a = color[3] as f32 / 255.0 * opacity;
    if a <= 0.0 {
        return;
    }
    let idx = y * fb.width + x;
    let (dr, dg, db) = unpack_rgb(fb.pixels[idx]);
    let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
    fb.pixels[idx] = pack_rgb(mix(color[0], dr), mix(color[1], dg), mix(color[2], db));
}

/// Fill an axis-aligned box, clipped to the frame.
/// Visual: a flat-colored rectangle (envelope, letter, buttons, panel).
pub fn fill_rect(fb: &mut FrameBuffer, rect: Container, color: u32) {
    let x0 = rect.x.max(0.0) as usize;
    let y0 = rect.y.max(0.0) as usize;
    let x1 = ((rect.x + rect.width as f32).max(0.0) as usize).min(fb.width);
    let y1 = ((rect.y + rect.height as f32).max(0.0) as usize).min(fb.height);
    for y in y0..y1 {
        for x in x0..x1 {
            fb.pixels[y * fb.width + x] = color;
        }
    }
}

/// Darken everything already drawn (modal overlay).
/// Visual: the page behind the modal turns dim so the card stands out.
pub fn dim(fb: &mut FrameBuffer, amount: f32) {
    let k = (1.0 - amount).clamp(0.0, 1.0);
    for p in &mut fb.pixels {
        let (r, g, b) = unpack_rgb(*p);
        let s = |c: u8| (c as f32 * k) as u8;
        *p = pack_rgb(s(r), s(g), s(b));
    }
}

/// Composite the card raster at its origin, scaled by the card's opacity.
/// Visual: the pink cover sits over the message; scratched holes show the
/// message through, and after the reveal the cover fades away.
pub fn composite_card(fb: &mut FrameBuffer, card: &ScratchSurface) {
    let (Some(img), Some((ox, oy))) = (card.pixels(), card.origin()) else { return };
    let opacity = card.opacity();
    if opacity <= 0.0 {
        return;
    }
    let (ox, oy) = (ox.round() as i32, oy.round() as i32);
    for (x, y, px) in img.enumerate_pixels() {
        if px[3] != 0 {
            blend_pixel(fb, ox + x as i32, oy + y as i32, *px, opacity);
        }
    }
}

fn center_of(rect: Container) -> (i32, i32) {
    ((rect.x + rect.width as f32 / 2.0) as i32, (rect.y + rect.height as f32 / 2.0) as i32)
}

/// Paint the whole page for this frame.
/// Visual: envelope or letter screen, plus the modal and card when open.
pub fn render_page(fb: &mut FrameBuffer, page: &Page, layout: &Layout, message: &str) {
    fb.fill(PAGE_BG);

    match page.screen() {
        Screen::Opening => {
            fill_rect(fb, layout.envelope, ENVELOPE);
            let mut flap = layout.envelope;
            flap.height /= 2;
            if let Envelope::Opening { .. } = page.envelope() {
                // flap swings up out of the envelope
                flap.y -= flap.height as f32;
            }
            fill_rect(fb, flap, ENVELOPE_FLAP);
            let (cx, cy) = center_of(layout.envelope);
            let prompt = match page.envelope() {
                Envelope::Closed => "CLICK ME ♥",
                _ => "OPENING...",
            };
            draw_text_centered(fb, cx, cy + 30, prompt, WHITE, 2);
        }
        Screen::Letter => {
            fill_rect(fb, layout.letter, LETTER);
            let (cx, _) = center_of(layout.letter);
            let top = layout.letter.y as i32;
            draw_text_centered(fb, cx, top + 40, "A LETTER FOR YOU", INK, 2);
            draw_text_centered(fb, cx, top + 80, "THERE IS A SECRET INSIDE.", INK, 1);
            fill_rect(fb, layout.tap_button, BUTTON);
            let (bx, by) = center_of(layout.tap_button);
            draw_text_centered(fb, bx, by, "TAP ME", WHITE, 2);
        }
    }

    if page.modal().is_visible() {
        dim(fb, 0.5);
        fill_rect(fb, layout.panel, CARD_BG);
        fill_rect(fb, layout.close_button, BUTTON);
        let (bx, by) = center_of(layout.close_button);
        draw_text_centered(fb, bx, by, "X", WHITE, 2);
        let (mx, my) = center_of(layout.card);
        draw_text_centered(fb, mx, my, message, INK, 2);
        composite_card(fb, page.card());
    }
}

/// One-line HUD: phase and scratched percentage.
/// Visual: small white text in the top-left corner with a black shadow.
pub fn draw_hud(fb: &mut FrameBuffer, page: &Page) {
    let card = page.card();
    let hud = format!(
        "{:?} | {:.1}% | ESC: CLOSE  Q: QUIT",
        card.phase(),
        card.erased_fraction() * 100.0
    );
    draw_text_shadowed(fb, 8, 8, &hud, WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Container;

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = FrameBuffer::new(10, 10);
        fill_rect(&mut fb, Container::new(-5.0, 8.0, 8, 8), 0xFF);
        let lit = fb.pixels.iter().filter(|p| **p == 0xFF).count();
        assert_eq!(lit, 3 * 2);
    }

    #[test]
    fn test_composite_respects_opacity() {
        let mut card = ScratchSurface::default();
        card.initialize(Container::new(2.0, 2.0, 4, 4), "").unwrap();
        let mut fb = FrameBuffer::new(8, 8);
        composite_card(&mut fb, &card);
        assert_eq!(fb.pixels[0], 0);
        assert_ne!(fb.pixels[2 * 8 + 2], 0);

        card.reveal();
        let mut fb = FrameBuffer::new(8, 8);
        composite_card(&mut fb, &card);
        assert!(fb.pixels.iter().all(|p| *p == 0));
    }

    #[test]
    fn test_hole_lands_under_cursor_with_odd_sizes() {
        let layout = Layout::new(640, 480, 301, 201);
        assert_eq!(layout.card.x.fract(), 0.0);
        assert_eq!(layout.card.y.fract(), 0.0);

        let mut card = ScratchSurface::default();
        card.initialize(layout.card, "").unwrap();
        let (cx, cy) = (layout.card.x + 50.5, layout.card.y + 50.5);
        card.handle_event(&crate::input::InputEvent::MouseDown { x: cx, y: cy });

        let mut fb = FrameBuffer::new(640, 480);
        composite_card(&mut fb, &card);
        let row = cy as usize * fb.width;
        let hole: Vec<usize> = (0..fb.width)
            .filter(|&x| fb.pixels[row + x] == 0 && layout.card.contains(x as f32, cy))
            .collect();
        let cursor = cx as usize;
        assert_eq!(hole.first(), Some(&(cursor - 20)));
        assert_eq!(hole.last(), Some(&(cursor + 20)));
    }

    #[test]
    fn test_layout_card_inside_panel() {
        let l = Layout::new(640, 480, 300, 200);
        assert!(l.panel.contains(l.card.x, l.card.y));
        assert!(l.panel.contains(l.card.x + 299.0, l.card.y + 199.0));
        assert!(l.panel.contains(l.close_button.x, l.close_button.y));
    }
}
