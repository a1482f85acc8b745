// What you SEE:
// • A dark window. Hold Left Mouse and draw a circle (or a square with --mode square).
// • The stroke turns green (>= 90), yellow (>= 80) or red while you draw; the big
//   number on top is the live score and the backdrop goes black while it's below 90.
// • Release to finish: best score shows under the number, the bell rings once for
//   an open loop and twice when you closed it.
// • Square mode: G toggles the grid, Q toggles the reference square. ESC quits.

use clap::Parser;
use minifb::Key;
use perfect_shape::config::Config;
use perfect_shape::draw::{Canvas, Drawer};
use perfect_shape::error::Error;
use perfect_shape::feedback::Sinks;
use perfect_shape::hud::{Backdrop, Chime, Hud};
use perfect_shape::input::PointerTracker;
use perfect_shape::session::{Session, Signal};
use perfect_shape::types::FrameBuffer;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let cfg = Config::parse();
    cfg.validate()?;
    tracing::info!(mode = cfg.mode.name(), width = cfg.width, height = cfg.height, "starting");

    /* --- Window + buffers ---
       `canvas` holds stroke + guides, `screen` is what actually gets presented. */
    let title = format!("Perfect {}", cfg.mode.name());
    let mut drawer = Drawer::new(&title, cfg.width, cfg.height)?;
    let mut canvas = Canvas::new(cfg.width, cfg.height);
    let mut screen = FrameBuffer::filled(cfg.width, cfg.height, 0);

    /* --- Sinks the session talks to --- */
    let mut hud = Hud::new(cfg.mode);
    let mut backdrop = Backdrop::default();
    let mut chime = Chime::new(!cfg.no_bell);

    let mut session = Session::new(cfg.mode, cfg.guides());
    let mut pointer = PointerTracker::new();

    // Guides are visible before the first gesture.
    session.redraw(&mut canvas);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs → signals */
        let mut signals = pointer.poll(drawer.left_mouse_down(), drawer.mouse_pos());
        if drawer.key_pressed_once(Key::G) { signals.push(Signal::ToggleGrid); }
        if drawer.key_pressed_once(Key::Q) { signals.push(Signal::ToggleGuideSquare); }

        /* 2) Run each signal through capture → score → feedback */
        for signal in signals {
            let mut sinks = Sinks {
                surface: &mut canvas,
                captions: &mut hud,
                ambience: &mut backdrop,
                cues: &mut chime,
            };
            session.handle(signal, &mut sinks);
        }

        /* 3) Compose: backdrop, canvas layer, HUD text */
        canvas.composite_onto(&mut screen, backdrop.color());
        hud.render(&mut screen);

        /* 4) Present */
        drawer.present(&screen)?;
    }

    tracing::info!(best = session.best_score(), "bye");
    Ok(())
}
