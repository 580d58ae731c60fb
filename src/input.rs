// Host input events in absolute (screen) coordinates.

use crate::types::Container;

/// One touch contact point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    MouseDown { x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    MouseUp,
    MouseLeave,
    TouchStart { touches: Vec<Touch> },
    TouchMove { touches: Vec<Touch> },
    TouchEnd,
}

/// What a surface does with an event once it is in local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerAction {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
}

impl InputEvent {
    /// Map to a pointer action relative to `origin`. Touch events only use
    /// their first contact; a touch event without contacts maps to nothing.
    pub fn to_local(&self, origin: (f32, f32)) -> Option<PointerAction> {
        let local = |x: f32, y: f32| (x - origin.0, y - origin.1);
        let first = |touches: &[Touch]| touches.first().map(|t| local(t.x, t.y));
        match self {
            InputEvent::MouseDown { x, y } => {
                let (x, y) = local(*x, *y);
                Some(PointerAction::Down { x, y })
            }
            InputEvent::MouseMove { x, y } => {
                let (x, y) = local(*x, *y);
                Some(PointerAction::Move { x, y })
            }
            InputEvent::TouchStart { touches } => first(touches).map(|(x, y)| PointerAction::Down { x, y }),
            InputEvent::TouchMove { touches } => first(touches).map(|(x, y)| PointerAction::Move { x, y }),
            InputEvent::MouseUp | InputEvent::MouseLeave | InputEvent::TouchEnd => Some(PointerAction::Up),
        }
    }
}

/// Turns polled mouse state (position + left button) into the events an
/// element covering `region` would receive: down/move/up while the cursor is
/// over it, leave when the cursor exits.
#[derive(Clone, Debug, Default)]
pub struct MouseTracker {
    was_down: bool,
    was_inside: bool,
    last_pos: Option<(f32, f32)>,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, pos: Option<(f32, f32)>, down: bool, region: Container) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let inside = pos.is_some_and(|(x, y)| region.contains(x, y));

        if self.was_inside && !inside {
            events.push(InputEvent::MouseLeave);
        }
        if let (true, Some((x, y))) = (inside, pos) {
            if down && !self.was_down {
                events.push(InputEvent::MouseDown { x, y });
            } else if self.last_pos != pos {
                events.push(InputEvent::MouseMove { x, y });
            }
            if !down && self.was_down {
                events.push(InputEvent::MouseUp);
            }
        }

        self.was_down = down;
        self.was_inside = inside;
        self.last_pos = pos;
        events
    }
}

/// One left-button click: where the button went down and where it came up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Click {
    pub press: (f32, f32),
    pub release: (f32, f32),
}

impl Click {
    /// Press and release both landed on `rect`, like an element's click.
    pub fn on(&self, rect: Container) -> bool {
        rect.contains(self.press.0, self.press.1) && rect.contains(self.release.0, self.release.1)
    }

    /// Press and release both landed outside `rect`.
    pub fn outside(&self, rect: Container) -> bool {
        !rect.contains(self.press.0, self.press.1) && !rect.contains(self.release.0, self.release.1)
    }
}

/// Pairs each release with its press. A press or release outside the window
/// yields no click.
#[derive(Clone, Debug, Default)]
pub struct ClickTracker {
    was_down: bool,
    press: Option<(f32, f32)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, pos: Option<(f32, f32)>, down: bool) -> Option<Click> {
        let mut click = None;
        if down && !self.was_down {
            self.press = pos;
        } else if !down && self.was_down {
            if let (Some(press), Some(release)) = (self.press.take(), pos) {
                click = Some(Click { press, release });
            }
        }
        self.was_down = down;
        click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_is_translated() {
        let ev = InputEvent::MouseDown { x: 110.0, y: 55.0 };
        assert_eq!(ev.to_local((100.0, 50.0)), Some(PointerAction::Down { x: 10.0, y: 5.0 }));
    }

    #[test]
    fn test_touch_uses_first_contact() {
        let ev = InputEvent::TouchMove {
            touches: vec![Touch { x: 30.0, y: 40.0 }, Touch { x: 300.0, y: 400.0 }],
        };
        assert_eq!(ev.to_local((10.0, 10.0)), Some(PointerAction::Move { x: 20.0, y: 30.0 }));
        assert_eq!(InputEvent::TouchStart { touches: vec![] }.to_local((0.0, 0.0)), None);
    }

    #[test]
    fn test_release_events_map_to_up() {
        for ev in [InputEvent::MouseUp, InputEvent::MouseLeave, InputEvent::TouchEnd] {
            assert_eq!(ev.to_local((5.0, 5.0)), Some(PointerAction::Up));
        }
    }

    #[test]
    fn test_tracker_press_drag_release() {
        let region = Container::new(10.0, 10.0, 100, 100);
        let mut t = MouseTracker::new();
        assert!(t.update(Some((50.0, 50.0)), false, region).contains(&InputEvent::MouseMove { x: 50.0, y: 50.0 }));
        assert_eq!(t.update(Some((50.0, 50.0)), true, region), vec![InputEvent::MouseDown { x: 50.0, y: 50.0 }]);
        assert_eq!(t.update(Some((60.0, 50.0)), true, region), vec![InputEvent::MouseMove { x: 60.0, y: 50.0 }]);
        assert_eq!(t.update(Some((60.0, 50.0)), true, region), vec![]);
        assert_eq!(t.update(Some((60.0, 50.0)), false, region), vec![InputEvent::MouseUp]);
    }

    #[test]
    fn test_tracker_leave() {
        let region = Container::new(0.0, 0.0, 20, 20);
        let mut t = MouseTracker::new();
        t.update(Some((5.0, 5.0)), true, region);
        assert_eq!(t.update(Some((50.0, 5.0)), true, region), vec![InputEvent::MouseLeave]);
        assert_eq!(t.update(None, true, region), vec![]);
    }

    #[test]
    fn test_click_pairs_press_and_release() {
        let mut c = ClickTracker::new();
        assert_eq!(c.update(Some((1.0, 1.0)), false), None);
        assert_eq!(c.update(Some((1.0, 1.0)), true), None);
        assert_eq!(c.update(Some((9.0, 9.0)), true), None);
        let click = c.update(Some((9.0, 9.0)), false).unwrap();
        assert_eq!(click, Click { press: (1.0, 1.0), release: (9.0, 9.0) });
        assert_eq!(c.update(Some((9.0, 9.0)), false), None);
    }

    #[test]
    fn test_drag_out_of_panel_is_not_an_overlay_click() {
        let panel = Container::new(100.0, 100.0, 200, 200);
        let mut c = ClickTracker::new();
        c.update(Some((200.0, 200.0)), true);
        let click = c.update(Some((5.0, 5.0)), false).unwrap();
        assert!(!click.outside(panel));
        assert!(!click.on(panel));

        c.update(Some((5.0, 5.0)), true);
        let click = c.update(Some((20.0, 5.0)), false).unwrap();
        assert!(click.outside(panel));
    }

    #[test]
    fn test_release_onto_button_is_not_a_click_on_it() {
        let button = Container::new(10.0, 10.0, 50, 20);
        let mut c = ClickTracker::new();
        c.update(Some((300.0, 300.0)), true);
        let click = c.update(Some((20.0, 15.0)), false).unwrap();
        assert!(!click.on(button));
    }

    #[test]
    fn test_press_outside_window_yields_no_click() {
        let mut c = ClickTracker::new();
        c.update(None, true);
        assert_eq!(c.update(Some((3.0, 3.0)), false), None);
    }
}
