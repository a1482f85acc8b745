// Window-side sinks: the score HUD, the backdrop and the completion chime.
// Visual: big live score at the top, best/tagline caption under it, key
// hints at the bottom; the backdrop turns black while the stroke is poor.

use std::io::{self, Write};

use tracing::info;

use crate::draw::{draw_text_5x7, text_width_5x7};
use crate::feedback::{Ambience, Captions, Cue, CueSink, Tier};
use crate::types::{FrameBuffer, ShapeMode};

pub const TEXT_COLOR: u32 = 0x00_FF_FF_FF;
pub const GOOD_TEXT_COLOR: u32 = 0x00_00_80_00;
pub const BAD_TEXT_COLOR: u32 = 0x00_FF_00_00;

pub const NORMAL_BACKGROUND: u32 = 0x00_1E_1E_2E;
pub const DEGRADED_BACKGROUND: u32 = 0x00_00_00_00;

const SCORE_SCALE: i32 = 6;
const CAPTION_SCALE: i32 = 3;

pub struct Hud {
    live_text: String,
    live_color: u32,
    caption: String,
    caption_visible: bool,
    hint: String,
}

impl Hud {
    /// Starts with an empty score and the mode's tagline as caption.
    pub fn new(mode: ShapeMode) -> Self {
        let hint = match mode {
            ShapeMode::Circle => "HOLD LEFT MOUSE AND DRAW | ESC: QUIT".to_owned(),
            ShapeMode::Square => "HOLD LEFT MOUSE AND DRAW | G: GRID  Q: GUIDE | ESC: QUIT".to_owned(),
        };
        Self {
            live_text: String::new(),
            live_color: TEXT_COLOR,
            caption: format!("DRAW A PERFECT {}", mode.name().to_ascii_uppercase()),
            caption_visible: true,
            hint,
        }
    }

    pub fn live_text(&self) -> &str {
        &self.live_text
    }

    pub fn live_color(&self) -> u32 {
        self.live_color
    }

    /// Caption text if currently shown.
    pub fn caption(&self) -> Option<&str> {
        self.caption_visible.then_some(self.caption.as_str())
    }

    /// Draw all labels onto `screen`.
    pub fn render(&self, screen: &mut FrameBuffer) {
        let w = screen.width as i32;
        let centered = |text: &str, scale: i32| (w - text_width_5x7(text, scale)) / 2;

        if !self.live_text.is_empty() {
            let x = centered(&self.live_text, SCORE_SCALE);
            draw_text_5x7(screen, x, 24, &self.live_text, self.live_color, SCORE_SCALE);
        }
        if let Some(caption) = self.caption() {
            let x = centered(caption, CAPTION_SCALE);
            draw_text_5x7(screen, x, 24 + 9 * SCORE_SCALE, caption, TEXT_COLOR, CAPTION_SCALE);
        }
        draw_text_5x7(screen, 8, screen.height as i32 - 16, &self.hint, TEXT_COLOR, 1);
    }
}

impl Captions for Hud {
    fn set_live_score_text(&mut self, text: &str) {
        text.clone_into(&mut self.live_text);
    }

    fn set_best_score_caption(&mut self, text: &str) {
        text.clone_into(&mut self.caption);
        self.caption_visible = true;
    }

    fn hide_best_score_caption(&mut self) {
        self.caption_visible = false;
    }

    fn set_live_score_tier(&mut self, tier: Tier) {
        self.live_color = if tier == Tier::Good { GOOD_TEXT_COLOR } else { BAD_TEXT_COLOR };
    }
}

#[derive(Default)]
pub struct Backdrop {
    degraded: bool,
}

impl Backdrop {
    pub fn color(&self) -> u32 {
        if self.degraded { DEGRADED_BACKGROUND } else { NORMAL_BACKGROUND }
    }
}

impl Ambience for Backdrop {
    fn set_degraded_ambience(&mut self, degraded: bool) {
        self.degraded = degraded;
    }
}

/// Stand-in for audio: logs the cue and rings the terminal bell
/// (twice for success).
pub struct Chime {
    bell: bool,
    last: Option<Cue>,
}

impl Chime {
    pub fn new(bell: bool) -> Self {
        Self { bell, last: None }
    }

    pub fn last(&self) -> Option<Cue> {
        self.last
    }
}

impl CueSink for Chime {
    fn play_cue(&mut self, cue: Cue) {
        info!(cue = cue.name(), "completion cue");
        self.last = Some(cue);
        if self.bell {
            let rings: &[u8] = match cue {
                Cue::NearMiss => b"\x07",
                Cue::Success => b"\x07\x07",
            };
            let mut err = io::stderr();
            let _ = err.write_all(rings).and_then(|()| err.flush());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagline_shows_until_first_gesture() {
        let mut hud = Hud::new(ShapeMode::Circle);
        assert_eq!(hud.caption(), Some("DRAW A PERFECT CIRCLE"));

        hud.hide_best_score_caption();
        assert_eq!(hud.caption(), None);

        hud.set_best_score_caption("Best: 91.2%");
        assert_eq!(hud.caption(), Some("Best: 91.2%"));
    }

    #[test]
    fn tier_colours_live_score() {
        let mut hud = Hud::new(ShapeMode::Square);
        assert_eq!(hud.live_color(), TEXT_COLOR);
        hud.set_live_score_tier(Tier::Good);
        assert_eq!(hud.live_color(), GOOD_TEXT_COLOR);
        hud.set_live_score_tier(Tier::Warn);
        assert_eq!(hud.live_color(), BAD_TEXT_COLOR);
    }

    #[test]
    fn backdrop_darkens_when_degraded() {
        let mut backdrop = Backdrop::default();
        assert_eq!(backdrop.color(), NORMAL_BACKGROUND);
        backdrop.set_degraded_ambience(true);
        assert_eq!(backdrop.color(), DEGRADED_BACKGROUND);
        backdrop.set_degraded_ambience(false);
        assert_eq!(backdrop.color(), NORMAL_BACKGROUND);
    }

    #[test]
    fn chime_remembers_last_cue() {
        let mut chime = Chime::new(false);
        assert_eq!(chime.last(), None);
        chime.play_cue(Cue::NearMiss);
        chime.play_cue(Cue::Success);
        assert_eq!(chime.last(), Some(Cue::Success));
    }

    #[test]
    fn render_draws_score_text() {
        let mut hud = Hud::new(ShapeMode::Circle);
        hud.set_live_score_text("88.0%");
        let mut screen = FrameBuffer::filled(400, 200, NORMAL_BACKGROUND);
        hud.render(&mut screen);
        assert!(screen.pixels.iter().any(|&p| p == TEXT_COLOR));
    }
}
