// What you SEE:
// • A pink envelope. Click it: the flap opens and the letter slides in.
// • Click "TAP ME" on the letter: a modal shows the scratch card.
// • Hold Left Mouse and drag over the card to scratch the cover away.
//   Past 30% scratched, the cover drops and fades out over the message.
// • ESC (or X / clicking outside the card panel) closes the modal. Q quits.

use clap::Parser;
use log::debug;
use scratch_card::cli::Cli;
use scratch_card::draw::{Drawer, Layout, draw_hud, render_page};
use scratch_card::input::{ClickTracker, MouseTracker};
use scratch_card::shell::{CloseReason, Page, Screen};
use scratch_card::types::FrameBuffer;
use scratch_card::{Error, ScratchSurface};
use std::time::{Duration, Instant};

fn main() -> Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();

    /* --- Card + page setup ---
       Nothing on screen yet; the card is only painted when the modal opens. */
    let card = ScratchSurface::new(cli.scratch_config())?;
    let layout = Layout::new(cli.window_width, cli.window_height, cli.width, cli.height);
    let mut page = Page::new(card, layout.card, cli.label.clone());

    /* --- Window + reusable screen buffer --- */
    let mut drawer = Drawer::new("Scratch Card", layout.width, layout.height)?;
    let mut screen = FrameBuffer::new(layout.width, layout.height);

    let mut card_mouse = MouseTracker::new();
    let mut clicks = ClickTracker::new();
    let mut last_frame_time = Instant::now();
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.quit_pressed() {
        let now = Instant::now();
        let dt = now - last_frame_time;
        last_frame_time = now;

        /* 1) Inputs */
        let pos = drawer.mouse_pos();
        let down = drawer.left_mouse_down();
        let click = clicks.update(pos, down);

        // Card events first, so a release over the card still ends the stroke.
        for event in card_mouse.update(pos, down, layout.card) {
            page.handle_card_event(&event);
        }

        if drawer.esc_pressed_once() {
            page.close_modal(CloseReason::Escape);
        }

        // A click needs press and release on the same element; a scratch
        // stroke dragged off the panel is not an overlay click.
        if let Some(click) = click {
            if page.modal().is_visible() {
                if click.on(layout.close_button) {
                    page.close_modal(CloseReason::Button);
                } else if click.outside(layout.panel) {
                    page.close_modal(CloseReason::Overlay);
                }
            } else {
                match page.screen() {
                    Screen::Opening if click.on(layout.envelope) => page.click_envelope(),
                    Screen::Letter if click.on(layout.tap_button) => page.tap()?,
                    _ => {}
                }
            }
        }

        /* 2) Timers: envelope delay, reveal fade */
        page.tick(dt);

        /* 3) Draw the page, the card on top, then the HUD */
        render_page(&mut screen, &page, &layout, &cli.message);
        draw_hud(&mut screen, &page);

        /* 4) Present to the window */
        drawer.present(&screen)?;

        /* 5) FPS counter (log only) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    if let Some(path) = &cli.snapshot {
        page.card().save_snapshot(path)?;
    }

    Ok(())
}
