// Core value types shared by the surface, the shell and the window host.

use image::Rgba;

/// Screen buffer handed to minifb.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is on screen (pixels)
    pub height: usize,    // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn fill(&mut self, color: u32) {
        for p in &mut self.pixels {
            *p = color;
        }
    }
}

/// Rendered box of the element that hosts a scratch surface.
/// `x`/`y` is the on-screen origin; absolute pointer coordinates are
/// translated by subtracting it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    pub x: f32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
}

impl Container {
    pub fn new(x: f32, y: f32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Container sitting at the screen origin.
    pub fn sized(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x + self.width as f32
            && y < self.y + self.height as f32
    }
}

/// Parse `#rrggbb` into an opaque pixel.
pub const fn rgb_hex(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

/// Pack an RGB triplet as 0x00RRGGBB.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub fn unpack_rgb(px: u32) -> (u8, u8, u8) {
    ((px >> 16) as u8, (px >> 8) as u8, px as u8)
}
