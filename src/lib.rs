//! Scratch-card reveal: an opaque cover on an RGBA raster that pointer
//! strokes erase, with a one-shot reveal once enough of it is gone.
//!
//! [`scratch::ScratchSurface`] is the card itself. [`shell::Page`] wires it
//! into the envelope/letter/modal page, and [`draw`] hosts that page in a
//! minifb window.

pub mod brush;
pub mod cli;
pub mod config;
pub mod cover;
pub mod draw;
pub mod error;
pub mod fade;
pub mod font;
pub mod input;
pub mod scratch;
pub mod shell;
pub mod surface;
pub mod types;

pub use config::{CoverageMode, ScratchConfig};
pub use error::Error;
pub use input::{InputEvent, Touch};
pub use scratch::{Phase, ScratchState, ScratchSurface};
pub use types::Container;
