// cli.rs - Command-line options for the demo window
use crate::config::{CoverageMode, ScratchConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "scratch-card")]
#[command(about = "Envelope, letter and a scratch card to reveal a message", long_about = None)]
pub struct Cli {
    /// Window width in pixels
    #[arg(long, default_value_t = 640)]
    pub window_width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 480)]
    pub window_height: usize,

    /// Scratch card width in pixels
    #[arg(long, default_value_t = 320)]
    pub width: u32,

    /// Scratch card height in pixels
    #[arg(long, default_value_t = 200)]
    pub height: u32,

    /// Prompt painted on the cover
    #[arg(long, default_value = "Scratch Here!")]
    pub label: String,

    /// Message hidden under the cover
    #[arg(long, default_value = "I LOVE YOU ♥")]
    pub message: String,

    /// Erase radius in pixels
    #[arg(long, default_value_t = crate::config::ERASE_RADIUS)]
    pub radius: f32,

    /// Fraction of the card to scratch before it reveals
    #[arg(long, default_value_t = crate::config::REVEAL_THRESHOLD)]
    pub threshold: f64,

    /// Keep a running erased-pixel count instead of rescanning the card
    #[arg(long)]
    pub incremental: bool,

    /// Write the card raster to this PNG when the window closes
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl Cli {
    pub fn scratch_config(&self) -> ScratchConfig {
        ScratchConfig {
            radius: self.radius,
            threshold: self.threshold,
            coverage: if self.incremental { CoverageMode::Incremental } else { CoverageMode::FullScan },
            ..ScratchConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_card_constants() {
        let cli = Cli::parse_from(["scratch-card"]);
        assert_eq!(cli.scratch_config(), ScratchConfig::default());
        assert!(cli.snapshot.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["scratch-card", "--radius", "12", "--threshold", "0.5", "--incremental"]);
        let cfg = cli.scratch_config();
        assert_eq!(cfg.radius, 12.0);
        assert_eq!(cfg.threshold, 0.5);
        assert_eq!(cfg.coverage, CoverageMode::Incremental);
    }
}
