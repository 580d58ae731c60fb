// Tunables for a scratch card. Defaults are the card's literal constants.

use crate::error::Error;
use crate::types::rgb_hex;
use image::Rgba;

pub const ERASE_RADIUS: f32 = 20.0; // raster units
pub const REVEAL_THRESHOLD: f64 = 0.30; // fraction of erased pixels, strictly exceeded
pub const ERASED_ALPHA_CUTOFF: u8 = 128; // alpha below this counts as erased
pub const FADE_SECS: f32 = 0.5;

pub const COVER_START: Rgba<u8> = rgb_hex(0xffb3d9); // top-left
pub const COVER_END: Rgba<u8> = rgb_hex(0xff9bcb); // bottom-right
pub const LABEL_COLOR: Rgba<u8> = Rgba([255, 255, 255, 153]); // rgba(255,255,255,0.6)
pub const LABEL_SCALE: u32 = 2; // 5x7 glyphs drawn 10x14, close to a 16px face

/// How the erased fraction is estimated after every erase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoverageMode {
    /// Rescan the alpha channel of the whole buffer.
    #[default]
    FullScan,
    /// Keep a running count of erased pixels, updated per erase circle.
    Incremental,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScratchConfig {
    pub radius: f32,
    pub threshold: f64,
    pub alpha_cutoff: u8,
    pub cover_start: Rgba<u8>,
    pub cover_end: Rgba<u8>,
    pub label_color: Rgba<u8>,
    pub label_scale: u32,
    pub fade_secs: f32,
    pub coverage: CoverageMode,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            radius: ERASE_RADIUS,
            threshold: REVEAL_THRESHOLD,
            alpha_cutoff: ERASED_ALPHA_CUTOFF,
            cover_start: COVER_START,
            cover_end: COVER_END,
            label_color: LABEL_COLOR,
            label_scale: LABEL_SCALE,
            fade_secs: FADE_SECS,
            coverage: CoverageMode::FullScan,
        }
    }
}

impl ScratchConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(Error::InvalidConfig(format!("radius must be > 0, got {}", self.radius)));
        }
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "threshold must be in [0, 1), got {}",
                self.threshold
            )));
        }
        if self.alpha_cutoff == 0 {
            return Err(Error::InvalidConfig("alpha cutoff must be > 0".into()));
        }
        if self.label_scale == 0 {
            return Err(Error::InvalidConfig("label scale must be > 0".into()));
        }
        if self.fade_secs < 0.0 || !self.fade_secs.is_finite() {
            return Err(Error::InvalidConfig(format!("fade must be >= 0s, got {}", self.fade_secs)));
        }
        Ok(())
    }
}
