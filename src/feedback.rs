// Feedback: turn a stroke and its score into things the player sees and hears.
//
// The renderer owns no drawing state. Every call clears the surface and
// redraws guides + stroke from scratch. The sinks below are the only way out
// of the core; the window shell implements them, tests record them.

use tracing::{debug, info};

use crate::score;
use crate::types::{Point, ShapeMode, Stroke};

/// Score at or above which a stroke is "good".
pub const GOOD_THRESHOLD: f64 = 90.0;
/// Score at or above which a stroke is at least "warn".
pub const WARN_THRESHOLD: f64 = 80.0;
/// Start/end gap (pixels) above which the loop counts as not closed.
pub const CLOSURE_THRESHOLD: f64 = 20.0;

pub const STROKE_WIDTH: f32 = 5.0;
pub const GRID_SPACING: usize = 50;
pub const GUIDE_SQUARE_SIZE: f32 = 200.0;

// ----------------------------- sinks ------------------------------------------------------

/// Pixel surface the stroke and guides are drawn on.
pub trait Surface {
    fn clear(&mut self);
    fn draw_polyline(&mut self, points: &[Point], color: u32, width: f32);
    fn draw_grid(&mut self, spacing: usize);
    fn draw_centered_square(&mut self, size: f32);
}

/// Text labels around the drawing.
pub trait Captions {
    fn set_live_score_text(&mut self, text: &str);
    fn set_best_score_caption(&mut self, text: &str);
    fn hide_best_score_caption(&mut self);
    /// Optional colouring of the live score.
    fn set_live_score_tier(&mut self, _tier: Tier) {}
}

/// Surrounding chrome that darkens while the stroke is not good enough.
pub trait Ambience {
    fn set_degraded_ambience(&mut self, degraded: bool);
}

/// Completion sound.
pub trait CueSink {
    fn play_cue(&mut self, cue: Cue);
}

/// Everything a signal may touch, borrowed for the duration of one handler.
pub struct Sinks<'a> {
    pub surface: &'a mut dyn Surface,
    pub captions: &'a mut dyn Captions,
    pub ambience: &'a mut dyn Ambience,
    pub cues: &'a mut dyn CueSink,
}

// ----------------------------- decisions --------------------------------------------------

/// Discrete colour band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Good,
    Warn,
    Bad,
}

impl Tier {
    /// Lower bounds are inclusive: exactly 90 is Good, exactly 80 is Warn.
    pub fn from_score(score: f64) -> Self {
        if score >= GOOD_THRESHOLD {
            Tier::Good
        } else if score >= WARN_THRESHOLD {
            Tier::Warn
        } else {
            Tier::Bad
        }
    }
}

/// Which completion sound to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    NearMiss,
    Success,
}

impl Cue {
    /// Loop-closure check only; the fidelity score plays no part.
    pub fn from_closure(distance: f64) -> Self {
        if distance > CLOSURE_THRESHOLD { Cue::NearMiss } else { Cue::Success }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cue::NearMiss => "nearMiss",
            Cue::Success => "success",
        }
    }
}

/// Guide overlay visibility. Only read in square mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guides {
    pub grid: bool,
    pub square: bool,
}

impl Default for Guides {
    fn default() -> Self {
        Self { grid: true, square: true }
    }
}

/// Stroke colour per tier, 0x00RRGGBB.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub good: u32,
    pub warn: u32,
    pub bad: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self { good: 0x00_00_80_00, warn: 0x00_FF_FF_00, bad: 0x00_FF_00_00 }
    }
}

impl Palette {
    pub fn color(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Good => self.good,
            Tier::Warn => self.warn,
            Tier::Bad => self.bad,
        }
    }
}

/// Result of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    pub score: f64,
    pub tier: Tier,
    pub closure: f64,
    pub cue: Cue,
    pub new_best: bool,
}

pub fn format_score(score: f64) -> String {
    format!("{score:.1}%")
}

// ----------------------------- renderer ---------------------------------------------------

pub struct FeedbackRenderer {
    mode: ShapeMode,
    palette: Palette,
}

impl FeedbackRenderer {
    pub fn new(mode: ShapeMode) -> Self {
        Self { mode, palette: Palette::default() }
    }

    pub fn mode(&self) -> ShapeMode {
        self.mode
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Clear and repaint guides + stroke. Returns the stroke's score.
    pub fn redraw(&self, surface: &mut dyn Surface, stroke: &Stroke, guides: Guides) -> f64 {
        let s = score::score(stroke.points(), self.mode);
        self.paint(surface, stroke, s, guides);
        s
    }

    /// Per-sample feedback while the gesture is in progress.
    pub fn live(&self, sinks: &mut Sinks<'_>, stroke: &Stroke, guides: Guides) -> f64 {
        let s = self.redraw(sinks.surface, stroke, guides);
        let tier = Tier::from_score(s);

        sinks.captions.set_live_score_text(&format_score(s));
        if self.mode.has_guides() {
            sinks.captions.set_live_score_tier(tier);
        }
        sinks.ambience.set_degraded_ambience(s < GOOD_THRESHOLD);
        s
    }

    /// Final feedback for a finished stroke with at least two points:
    /// score text, best-score caption, completion cue.
    pub fn finish(
        &self,
        sinks: &mut Sinks<'_>,
        stroke: &Stroke,
        guides: Guides,
        best: &mut f64,
    ) -> Option<Completion> {
        if stroke.len() < 2 {
            debug!(points = stroke.len(), "stroke too short to evaluate");
            return None;
        }
        let closure = stroke.closure_distance()?;

        let s = self.redraw(sinks.surface, stroke, guides);
        let tier = Tier::from_score(s);
        sinks.captions.set_live_score_text(&format_score(s));

        let new_best = s > *best;
        if new_best {
            *best = s;
            sinks.captions.set_best_score_caption(&format!("Best: {}", format_score(s)));
            info!(best = s, "new best score");
        }

        let cue = Cue::from_closure(closure);
        sinks.cues.play_cue(cue);

        Some(Completion { score: s, tier, closure, cue, new_best })
    }

    fn paint(&self, surface: &mut dyn Surface, stroke: &Stroke, score: f64, guides: Guides) {
        surface.clear();

        if self.mode.has_guides() {
            if guides.grid {
                surface.draw_grid(GRID_SPACING);
            }
            if guides.square {
                surface.draw_centered_square(GUIDE_SQUARE_SIZE);
            }
        }

        if stroke.len() > 1 {
            let color = self.palette.color(Tier::from_score(score));
            surface.draw_polyline(stroke.points(), color, STROKE_WIDTH);
        }
    }
}

// ----------------------------- recording fakes (tests) ------------------------------------

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Clear,
        Polyline { len: usize, color: u32, width: f32 },
        Grid(usize),
        Square(f32),
        LiveText(String),
        LiveTier(Tier),
        BestCaption(String),
        HideBest,
        Degraded(bool),
        Cue(Cue),
    }

    /// Records every sink call in order.
    #[derive(Default)]
    pub struct Recorder {
        pub calls: Vec<Call>,
    }

    impl Recorder {
        pub fn cues(&self) -> Vec<Cue> {
            self.calls
                .iter()
                .filter_map(|c| if let Call::Cue(cue) = c { Some(*cue) } else { None })
                .collect()
        }

        pub fn last_polyline_color(&self) -> Option<u32> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::Polyline { color, .. } => Some(*color),
                _ => None,
            })
        }
    }

    impl Surface for Recorder {
        fn clear(&mut self) { self.calls.push(Call::Clear); }
        fn draw_polyline(&mut self, points: &[Point], color: u32, width: f32) {
            self.calls.push(Call::Polyline { len: points.len(), color, width });
        }
        fn draw_grid(&mut self, spacing: usize) { self.calls.push(Call::Grid(spacing)); }
        fn draw_centered_square(&mut self, size: f32) { self.calls.push(Call::Square(size)); }
    }

    impl Captions for Recorder {
        fn set_live_score_text(&mut self, text: &str) { self.calls.push(Call::LiveText(text.to_owned())); }
        fn set_best_score_caption(&mut self, text: &str) { self.calls.push(Call::BestCaption(text.to_owned())); }
        fn hide_best_score_caption(&mut self) { self.calls.push(Call::HideBest); }
        fn set_live_score_tier(&mut self, tier: Tier) { self.calls.push(Call::LiveTier(tier)); }
    }

    impl Ambience for Recorder {
        fn set_degraded_ambience(&mut self, degraded: bool) { self.calls.push(Call::Degraded(degraded)); }
    }

    impl CueSink for Recorder {
        fn play_cue(&mut self, cue: Cue) { self.calls.push(Call::Cue(cue)); }
    }

    /// Four separate recorders so they can be borrowed at once.
    #[derive(Default)]
    pub struct Rig {
        pub surface: Recorder,
        pub captions: Recorder,
        pub ambience: Recorder,
        pub cues: Recorder,
    }

    impl Rig {
        pub fn sinks(&mut self) -> Sinks<'_> {
            Sinks {
                surface: &mut self.surface,
                captions: &mut self.captions,
                ambience: &mut self.ambience,
                cues: &mut self.cues,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Call, Rig};
    use super::*;

    fn ring(r: f64, n: usize) -> Stroke {
        (0..n)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / n as f64;
                Point::new(200.0 + r * a.cos(), 200.0 + r * a.sin())
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn tier_boundaries_are_inclusive_on_lower_bound() {
        assert_eq!(Tier::from_score(100.0), Tier::Good);
        assert_eq!(Tier::from_score(90.0), Tier::Good);
        assert_eq!(Tier::from_score(89.999), Tier::Warn);
        assert_eq!(Tier::from_score(80.0), Tier::Warn);
        assert_eq!(Tier::from_score(79.999), Tier::Bad);
        assert_eq!(Tier::from_score(0.0), Tier::Bad);
    }

    #[test]
    fn closure_threshold() {
        assert_eq!(Cue::from_closure(0.0), Cue::Success);
        assert_eq!(Cue::from_closure(20.0), Cue::Success);
        assert_eq!(Cue::from_closure(20.01), Cue::NearMiss);
    }

    #[test]
    fn score_text_has_one_decimal() {
        assert_eq!(format_score(100.0), "100.0%");
        assert_eq!(format_score(87.46), "87.5%");
    }

    #[test]
    fn circle_redraw_skips_guides() {
        let r = FeedbackRenderer::new(ShapeMode::Circle);
        let mut rig = Rig::default();
        let s = r.redraw(&mut rig.surface, &ring(50.0, 36), Guides::default());

        assert!((s - 100.0).abs() < 1e-9);
        assert_eq!(
            rig.surface.calls,
            vec![Call::Clear, Call::Polyline { len: 36, color: Palette::default().good, width: STROKE_WIDTH }]
        );
    }

    #[test]
    fn square_redraw_draws_enabled_guides_first() {
        let r = FeedbackRenderer::new(ShapeMode::Square);
        let mut rig = Rig::default();
        r.redraw(&mut rig.surface, &Stroke::new(), Guides { grid: true, square: false });
        assert_eq!(rig.surface.calls, vec![Call::Clear, Call::Grid(GRID_SPACING)]);

        let mut rig = Rig::default();
        r.redraw(&mut rig.surface, &Stroke::new(), Guides::default());
        assert_eq!(
            rig.surface.calls,
            vec![Call::Clear, Call::Grid(GRID_SPACING), Call::Square(GUIDE_SQUARE_SIZE)]
        );
    }

    #[test]
    fn single_point_is_not_drawn() {
        let r = FeedbackRenderer::new(ShapeMode::Circle);
        let mut rig = Rig::default();
        r.redraw(&mut rig.surface, &Stroke::from(vec![Point::new(1.0, 1.0)]), Guides::default());
        assert_eq!(rig.surface.calls, vec![Call::Clear]);
    }

    #[test]
    fn live_feedback_degrades_ambience_below_good() {
        let r = FeedbackRenderer::new(ShapeMode::Circle);

        let mut rig = Rig::default();
        r.live(&mut rig.sinks(), &ring(50.0, 36), Guides::default());
        assert_eq!(rig.ambience.calls, vec![Call::Degraded(false)]);
        assert_eq!(rig.captions.calls, vec![Call::LiveText("100.0%".into())]);

        // A straight line scores poorly around its bbox midpoint.
        let line: Stroke = (0..10).map(|i| Point::new(i as f64 * 10.0, 0.0)).collect::<Vec<_>>().into();
        let mut rig = Rig::default();
        let s = r.live(&mut rig.sinks(), &line, Guides::default());
        assert!(s < GOOD_THRESHOLD);
        assert_eq!(rig.ambience.calls, vec![Call::Degraded(true)]);
        assert_eq!(rig.surface.last_polyline_color(), Some(Palette::default().bad));
    }

    #[test]
    fn square_live_feedback_colours_caption() {
        let r = FeedbackRenderer::new(ShapeMode::Square);
        let diamond: Stroke = vec![
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(-100.0, 0.0),
            Point::new(0.0, -100.0),
        ]
        .into();
        let mut rig = Rig::default();
        r.live(&mut rig.sinks(), &diamond, Guides::default());
        assert_eq!(
            rig.captions.calls,
            vec![Call::LiveText("100.0%".into()), Call::LiveTier(Tier::Good)]
        );
    }

    #[test]
    fn finish_updates_best_only_when_beaten() {
        let r = FeedbackRenderer::new(ShapeMode::Circle);
        let stroke = ring(50.0, 36);

        let mut best = 0.0;
        let mut rig = Rig::default();
        let done = r.finish(&mut rig.sinks(), &stroke, Guides::default(), &mut best).expect("scored");
        assert!(done.new_best);
        assert_eq!(best, done.score);
        assert!(rig.captions.calls.contains(&Call::BestCaption("Best: 100.0%".into())));

        let mut rig = Rig::default();
        let again = r.finish(&mut rig.sinks(), &stroke, Guides::default(), &mut best).expect("scored");
        assert!(!again.new_best);
        assert!(!rig.captions.calls.iter().any(|c| matches!(c, Call::BestCaption(_))));
    }

    #[test]
    fn finish_ignores_too_short_strokes() {
        let r = FeedbackRenderer::new(ShapeMode::Circle);
        let mut best = 0.0;
        for stroke in [Stroke::new(), Stroke::from(vec![Point::new(3.0, 3.0)])] {
            let mut rig = Rig::default();
            assert!(r.finish(&mut rig.sinks(), &stroke, Guides::default(), &mut best).is_none());
            assert!(rig.surface.calls.is_empty());
            assert!(rig.cues.calls.is_empty());
        }
        assert_eq!(best, 0.0);
    }

    #[test]
    fn same_score_different_closure_picks_different_cue() {
        let r = FeedbackRenderer::new(ShapeMode::Circle);

        // Full ring and a three-quarter arc of the same circle: both score 100.
        let closed = ring(50.0, 36);
        let open: Stroke = (0..28)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / 36.0;
                Point::new(200.0 + 50.0 * a.cos(), 200.0 + 50.0 * a.sin())
            })
            .collect::<Vec<_>>()
            .into();

        let mut best = 0.0;
        let mut rig = Rig::default();
        let a = r.finish(&mut rig.sinks(), &closed, Guides::default(), &mut best).expect("scored");
        let b = r.finish(&mut rig.sinks(), &open, Guides::default(), &mut best).expect("scored");

        assert!((a.score - b.score).abs() < 1e-9, "{} vs {}", a.score, b.score);
        assert!(a.closure <= CLOSURE_THRESHOLD);
        assert!(b.closure > CLOSURE_THRESHOLD);
        assert_eq!(rig.cues.cues(), vec![Cue::Success, Cue::NearMiss]);
    }
}
