// Hard-edged disc used by the erase stroke.
// A pixel belongs to the disc when its center lies within `radius` of the
// disc center. The disc is walked row by row as clipped horizontal spans, so
// an erase only touches its bounding box.

use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disc {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

impl Disc {
    pub fn new(cx: f32, cy: f32, radius: f32) -> Self {
        Self { cx, cy, radius }
    }

    /// Horizontal span of row `py`, clipped to `0..width`. None when the row
    /// misses the disc or the clipped span is empty.
    pub fn row_span(&self, py: u32, width: u32) -> Option<Range<u32>> {
        let dy = py as f32 + 0.5 - self.cy;
        let r2 = self.radius * self.radius;
        let rem = r2 - dy * dy;
        if rem < 0.0 {
            return None;
        }
        let half = rem.sqrt();
        // px + 0.5 in [cx - half, cx + half]
        let x0 = (self.cx - half - 0.5).ceil().max(0.0);
        let x1 = (self.cx + half - 0.5).floor() + 1.0; // exclusive
        let x1 = x1.min(width as f32);
        if x1 <= x0 {
            return None;
        }
        Some(x0 as u32..x1 as u32)
    }

    /// Clipped spans for a `width`x`height` raster, top to bottom.
    pub fn spans(&self, width: u32, height: u32) -> impl Iterator<Item = (u32, Range<u32>)> + '_ {
        let y0 = (self.cy - self.radius - 0.5).ceil().max(0.0) as u32;
        let y1 = ((self.cy + self.radius - 0.5).floor() + 1.0).clamp(0.0, height as f32) as u32;
        (y0..y1).filter_map(move |py| self.row_span(py, width).map(|span| (py, span)))
    }

    /// Number of in-bounds pixels the disc covers.
    pub fn pixel_count(&self, width: u32, height: u32) -> u32 {
        self.spans(width, height).map(|(_, s)| s.end - s.start).sum()
    }
}
