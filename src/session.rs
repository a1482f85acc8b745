// Session: the one owner of mutable game state.
// Input signals go in; capture, scoring and feedback run synchronously.

use tracing::{debug, info, trace};

use crate::capture::StrokeCapture;
use crate::feedback::{Completion, FeedbackRenderer, Guides, Sinks, Surface};
use crate::types::{Point, ShapeMode, Stroke};

/// Closed set of things the input side can say.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    GestureStart,
    PointSample(Point),
    GestureEnd,
    ToggleGrid,
    ToggleGuideSquare,
}

pub struct Session {
    capture: StrokeCapture,
    best_score: f64,
    guides: Guides,
    renderer: FeedbackRenderer,
}

impl Session {
    pub fn new(mode: ShapeMode, guides: Guides) -> Self {
        Self {
            capture: StrokeCapture::new(),
            best_score: 0.0,
            guides,
            renderer: FeedbackRenderer::new(mode),
        }
    }

    pub fn mode(&self) -> ShapeMode {
        self.renderer.mode()
    }

    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn guides(&self) -> Guides {
        self.guides
    }

    pub fn capture(&self) -> &StrokeCapture {
        &self.capture
    }

    pub fn stroke(&self) -> &Stroke {
        self.capture.stroke()
    }

    /// Repaint the current picture (startup, resize).
    pub fn redraw(&self, surface: &mut dyn Surface) {
        self.renderer.redraw(surface, self.capture.stroke(), self.guides);
    }

    /// Dispatch one signal. Returns the completion record when a gesture
    /// ends with a stroke long enough to evaluate.
    pub fn handle(&mut self, signal: Signal, sinks: &mut Sinks<'_>) -> Option<Completion> {
        match signal {
            Signal::GestureStart => {
                self.capture.begin();
                sinks.captions.hide_best_score_caption();
                debug!("gesture started");
                None
            }
            Signal::PointSample(p) => {
                if !self.capture.sample(p) {
                    return None;
                }
                let stroke = self.capture.stroke();
                let s = self.renderer.live(sinks, stroke, self.guides);
                trace!(x = p.x, y = p.y, points = stroke.len(), score = s, "sample");
                None
            }
            Signal::GestureEnd => {
                let stroke = self.capture.end()?;
                let done = self.renderer.finish(sinks, stroke, self.guides, &mut self.best_score)?;
                info!(
                    mode = self.renderer.mode().name(),
                    points = stroke.len(),
                    score = done.score,
                    best = self.best_score,
                    closure = done.closure,
                    cue = done.cue.name(),
                    "gesture finished"
                );
                Some(done)
            }
            Signal::ToggleGrid => {
                self.toggle(sinks.surface, |g| g.grid = !g.grid);
                None
            }
            Signal::ToggleGuideSquare => {
                self.toggle(sinks.surface, |g| g.square = !g.square);
                None
            }
        }
    }

    fn toggle(&mut self, surface: &mut dyn Surface, flip: impl FnOnce(&mut Guides)) {
        if !self.mode().has_guides() {
            debug!("guide toggle ignored outside square mode");
            return;
        }
        flip(&mut self.guides);
        info!(grid = self.guides.grid, square = self.guides.square, "guides toggled");
        self.redraw(surface);
    }
}
