// Scratch card: an opaque cover that pointer strokes erase until enough of
// it is gone, at which point the whole cover is dropped and faded out.
//
// Lifecycle: uninitialized -> ready <-> drawing -> revealed. Once revealed
// the raster is never touched again and input is ignored until the session
// is discarded with `dispose` or replaced with `initialize`.

use crate::brush::Disc;
use crate::config::{CoverageMode, ScratchConfig};
use crate::cover::paint_cover;
use crate::error::Error;
use crate::fade::Fade;
use crate::input::{InputEvent, PointerAction};
use crate::surface::Surface;
use crate::types::Container;
use image::RgbaImage;
use log::{debug, info};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Ready,
    Drawing,
    Revealed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScratchState {
    pub is_drawing: bool,
    pub revealed: bool,
}

/// Everything that only exists between `initialize` and `dispose`.
struct Session {
    surface: Surface,
    origin: (f32, f32),
    listening: bool,
    erased: u64, // running count, read in CoverageMode::Incremental
    fade: Option<Fade>,
}

pub struct ScratchSurface {
    config: ScratchConfig,
    state: ScratchState,
    session: Option<Session>,
}

impl Default for ScratchSurface {
    fn default() -> Self {
        // the literal defaults always validate
        Self::from_valid(ScratchConfig::default())
    }
}

impl ScratchSurface {
    /// Uninitialized surface; rejects an invalid config up front.
    pub fn new(config: ScratchConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: ScratchConfig) -> Self {
        Self { config, state: ScratchState::default(), session: None }
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    /// Start a fresh session sized to `container` and paint the cover.
    /// Any previous session is disposed first.
    pub fn initialize(&mut self, container: Container, label: &str) -> Result<(), Error> {
        if container.width == 0 || container.height == 0 {
            return Err(Error::EmptyContainer { width: container.width, height: container.height });
        }
        if self.session.is_some() {
            self.dispose();
        }

        let mut surface = Surface::new(container.width, container.height);
        paint_cover(&mut surface, &self.config, label);
        let erased = surface.erased_count(self.config.alpha_cutoff);

        self.state = ScratchState::default();
        self.session = Some(Session {
            surface,
            origin: (container.x, container.y),
            listening: true,
            erased,
            fade: None,
        });
        info!("scratch surface initialized: {}x{} {label:?}", container.width, container.height);
        Ok(())
    }

    /// Detach input and drop the raster. Safe to call at any time.
    pub fn dispose(&mut self) {
        if self.session.take().is_some() {
            debug!("scratch surface disposed");
        }
        self.state = ScratchState::default();
    }

    /// Dispatch a host event. Ignored unless listeners are attached.
    pub fn handle_event(&mut self, event: &InputEvent) {
        let Some(session) = self.session.as_ref() else { return };
        if !session.listening {
            return;
        }
        match event.to_local(session.origin) {
            Some(PointerAction::Down { x, y }) => self.pointer_down(x, y),
            Some(PointerAction::Move { x, y }) => self.pointer_move(x, y),
            Some(PointerAction::Up) => self.pointer_up(),
            None => {}
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if !self.accepts_input() {
            return;
        }
        self.state.is_drawing = true;
        self.erase(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.state.is_drawing {
            self.erase(x, y);
        }
    }

    pub fn pointer_up(&mut self) {
        self.state.is_drawing = false;
    }

    /// Punch a hole of the configured radius at (x, y), then re-check coverage.
    /// Visual: a round see-through spot appears in the cover under the pointer.
    pub fn erase(&mut self, x: f32, y: f32) {
        if self.state.revealed {
            return;
        }
        let Some(session) = self.session.as_mut() else { return };
        let disc = Disc::new(x, y, self.config.radius);
        let newly_erased = session.surface.erase_disc(&disc, self.config.alpha_cutoff);
        session.erased += newly_erased;
        self.evaluate_coverage();
    }

    /// Reveal once more than `threshold` of the surface is erased.
    pub fn evaluate_coverage(&mut self) {
        if self.state.revealed {
            return;
        }
        if self.erased_fraction() > self.config.threshold {
            self.reveal();
        }
    }

    /// Drop the whole cover, detach input and start fading out. One-shot.
    /// Visual: the rest of the cover vanishes and the card fades to nothing.
    pub fn reveal(&mut self) {
        if self.state.revealed {
            return;
        }
        let Some(session) = self.session.as_mut() else { return };
        session.surface.clear();
        session.erased = session.surface.area();
        session.listening = false;
        session.fade = Some(Fade::out(Duration::from_secs_f32(self.config.fade_secs)));
        self.state = ScratchState { is_drawing: false, revealed: true };
        info!("scratch surface revealed");
    }

    /// Advance the reveal fade.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(fade) = self.session.as_mut().and_then(|s| s.fade.as_mut()) {
            fade.advance(dt);
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.session, self.state) {
            (None, _) => Phase::Uninitialized,
            (Some(_), ScratchState { revealed: true, .. }) => Phase::Revealed,
            (Some(_), ScratchState { is_drawing: true, .. }) => Phase::Drawing,
            (Some(_), _) => Phase::Ready,
        }
    }

    pub fn state(&self) -> ScratchState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state.is_drawing
    }

    pub fn is_revealed(&self) -> bool {
        self.state.revealed
    }

    pub fn is_listening(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.listening)
    }

    fn accepts_input(&self) -> bool {
        !self.state.revealed && self.session.is_some()
    }

    /// Pixels currently counted as erased.
    pub fn erased_pixels(&self) -> u64 {
        let Some(session) = self.session.as_ref() else { return 0 };
        match self.config.coverage {
            CoverageMode::FullScan => session.surface.erased_count(self.config.alpha_cutoff),
            CoverageMode::Incremental => session.erased,
        }
    }

    pub fn erased_fraction(&self) -> f64 {
        let Some(session) = self.session.as_ref() else { return 0.0 };
        let area = session.surface.area();
        if area == 0 {
            return 0.0;
        }
        self.erased_pixels() as f64 / area as f64
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.session.as_ref().map(|s| (s.surface.width(), s.surface.height()))
    }

    pub fn origin(&self) -> Option<(f32, f32)> {
        self.session.as_ref().map(|s| s.origin)
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.session.as_ref().map(|s| &s.surface)
    }

    pub fn pixels(&self) -> Option<&RgbaImage> {
        self.surface().map(Surface::image)
    }

    /// Opacity of the surface element: 1 until revealed, then the fade value.
    pub fn opacity(&self) -> f32 {
        self.session
            .as_ref()
            .and_then(|s| s.fade.as_ref())
            .map_or(1.0, Fade::value)
    }

    pub fn is_faded_out(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.fade.as_ref())
            .is_some_and(Fade::is_done)
    }

    /// Write the current raster to `path` (format from the extension).
    pub fn save_snapshot(&self, path: &std::path::Path) -> Result<(), Error> {
        if let Some(img) = self.pixels() {
            img.save(path)?;
            info!("snapshot written to {}", path.display());
        }
        Ok(())
    }
}
