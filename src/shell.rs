// Page shell around the scratch card: envelope -> letter -> modal with the card.
// Scroll lock listens to the modal's open/close events instead of watching
// its visibility.

use crate::error::Error;
use crate::input::InputEvent;
use crate::scratch::ScratchSurface;
use crate::types::Container;
use log::debug;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Delay between the envelope click and the letter screen.
pub const ENVELOPE_DELAY: Duration = Duration::from_millis(600);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Envelope {
    Closed,
    Opening { remaining: Duration },
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Opening,
    Letter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    Opened,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    Overlay,
    Escape,
}

type ModalListener = Box<dyn FnMut(ModalEvent)>;

#[derive(Default)]
pub struct Modal {
    visible: bool,
    listeners: Vec<ModalListener>,
}

impl Modal {
    pub fn subscribe(&mut self, listener: impl FnMut(ModalEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the modal. Returns false if it already was visible.
    pub fn open(&mut self) -> bool {
        self.set_visible(true)
    }

    /// Hide the modal. Returns false if it already was hidden.
    pub fn close(&mut self) -> bool {
        self.set_visible(false)
    }

    fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        let event = if visible { ModalEvent::Opened } else { ModalEvent::Closed };
        for listener in &mut self.listeners {
            listener(event);
        }
        true
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

/// Page scroll state, shared with the modal listener that drives it.
#[derive(Clone, Debug, Default)]
pub struct ScrollLock {
    overflow: Rc<Cell<Overflow>>,
}

impl ScrollLock {
    pub fn overflow(&self) -> Overflow {
        self.overflow.get()
    }

    pub fn is_locked(&self) -> bool {
        self.overflow() == Overflow::Hidden
    }

    pub fn listener(&self) -> impl FnMut(ModalEvent) + 'static {
        let overflow = Rc::clone(&self.overflow);
        move |event| {
            overflow.set(match event {
                ModalEvent::Opened => Overflow::Hidden,
                ModalEvent::Closed => Overflow::Auto,
            })
        }
    }
}

pub struct Page {
    envelope: Envelope,
    screen: Screen,
    modal: Modal,
    scroll: ScrollLock,
    card: ScratchSurface,
    card_container: Container,
    label: String,
}

impl Page {
    pub fn new(card: ScratchSurface, card_container: Container, label: impl Into<String>) -> Self {
        let scroll = ScrollLock::default();
        let mut modal = Modal::default();
        modal.subscribe(scroll.listener());
        Self {
            envelope: Envelope::Closed,
            screen: Screen::Opening,
            modal,
            scroll,
            card,
            card_container,
            label: label.into(),
        }
    }

    pub fn envelope(&self) -> Envelope {
        self.envelope
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut Modal {
        &mut self.modal
    }

    pub fn scroll(&self) -> &ScrollLock {
        &self.scroll
    }

    pub fn card(&self) -> &ScratchSurface {
        &self.card
    }

    pub fn card_container(&self) -> Container {
        self.card_container
    }

    /// Start opening the envelope; the letter shows after `ENVELOPE_DELAY`.
    pub fn click_envelope(&mut self) {
        if self.envelope == Envelope::Closed {
            self.envelope = Envelope::Opening { remaining: ENVELOPE_DELAY };
            debug!("envelope opening");
        }
    }

    /// The letter's "tap" button: show the modal with a fresh card.
    /// The modal stays hidden if the card cannot be laid out.
    pub fn tap(&mut self) -> Result<(), Error> {
        if self.screen != Screen::Letter {
            return Ok(());
        }
        self.card.initialize(self.card_container, &self.label)?;
        self.modal.open();
        Ok(())
    }

    pub fn close_modal(&mut self, reason: CloseReason) {
        if self.modal.close() {
            debug!("modal closed ({reason:?})");
        }
    }

    /// Card input only flows while the modal is on screen.
    pub fn handle_card_event(&mut self, event: &InputEvent) {
        if self.modal.is_visible() {
            self.card.handle_event(event);
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        if let Envelope::Opening { remaining } = self.envelope {
            if dt >= remaining {
                self.envelope = Envelope::Open;
                self.screen = Screen::Letter;
                debug!("letter shown");
            } else {
                self.envelope = Envelope::Opening { remaining: remaining - dt };
            }
        }
        self.card.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::Phase;
    use std::cell::RefCell;

    fn page() -> Page {
        Page::new(ScratchSurface::default(), Container::new(20.0, 30.0, 100, 100), "Scratch Here!")
    }

    #[test]
    fn test_envelope_opens_after_delay() {
        let mut p = page();
        p.tick(Duration::from_secs(5));
        assert_eq!(p.screen(), Screen::Opening);

        p.click_envelope();
        p.tick(Duration::from_millis(599));
        assert_eq!(p.screen(), Screen::Opening);
        p.click_envelope();
        assert_eq!(p.envelope(), Envelope::Opening { remaining: Duration::from_millis(1) });

        p.tick(Duration::from_millis(1));
        assert_eq!(p.envelope(), Envelope::Open);
        assert_eq!(p.screen(), Screen::Letter);
    }

    #[test]
    fn test_modal_events_fire_on_change_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut modal = Modal::default();
        let sink = Rc::clone(&seen);
        modal.subscribe(move |e| sink.borrow_mut().push(e));

        assert!(modal.open());
        assert!(!modal.open());
        assert!(modal.close());
        assert!(!modal.close());
        assert_eq!(*seen.borrow(), vec![ModalEvent::Opened, ModalEvent::Closed]);
    }

    #[test]
    fn test_scroll_lock_follows_modal() {
        let mut p = page();
        assert!(!p.scroll().is_locked());
        p.click_envelope();
        p.tick(ENVELOPE_DELAY);
        p.tap().unwrap();
        assert!(p.modal().is_visible());
        assert!(p.scroll().is_locked());
        p.close_modal(CloseReason::Escape);
        assert_eq!(p.scroll().overflow(), Overflow::Auto);
    }

    #[test]
    fn test_tap_with_empty_card_keeps_modal_hidden() {
        let mut p = Page::new(ScratchSurface::default(), Container::new(0.0, 0.0, 0, 120), "x");
        p.click_envelope();
        p.tick(ENVELOPE_DELAY);
        assert!(matches!(p.tap(), Err(Error::EmptyContainer { width: 0, height: 120 })));
        assert!(!p.modal().is_visible());
        assert!(!p.scroll().is_locked());
        assert_eq!(p.card().phase(), Phase::Uninitialized);
    }

    #[test]
    fn test_tap_needs_letter_screen() {
        let mut p = page();
        p.tap().unwrap();
        assert!(!p.modal().is_visible());
        assert_eq!(p.card().phase(), Phase::Uninitialized);
    }

    #[test]
    fn test_card_events_gated_by_modal() {
        let mut p = page();
        p.click_envelope();
        p.tick(ENVELOPE_DELAY);
        p.tap().unwrap();
        assert_eq!(p.card().phase(), Phase::Ready);

        p.handle_card_event(&InputEvent::MouseDown { x: 70.0, y: 80.0 });
        assert_eq!(p.card().phase(), Phase::Drawing);
        p.handle_card_event(&InputEvent::MouseUp);

        p.close_modal(CloseReason::Overlay);
        let erased = p.card().erased_pixels();
        p.handle_card_event(&InputEvent::MouseDown { x: 30.0, y: 40.0 });
        assert_eq!(p.card().erased_pixels(), erased);
        assert!(!p.card().is_drawing());
    }

    #[test]
    fn test_reopen_gives_fresh_card() {
        let mut p = page();
        p.click_envelope();
        p.tick(ENVELOPE_DELAY);
        p.tap().unwrap();
        p.handle_card_event(&InputEvent::MouseDown { x: 70.0, y: 80.0 });
        p.handle_card_event(&InputEvent::MouseUp);
        assert!(p.card().erased_pixels() > 0);
        p.close_modal(CloseReason::Button);
        p.tap().unwrap();
        assert_eq!(p.card().erased_pixels(), 0);
    }
}
