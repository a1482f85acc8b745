// Turns polled mouse state into session signals.
// The window is polled once per frame; press/release edges become gesture
// start/end, and movement while held becomes a point sample.

use crate::session::Signal;
use crate::types::Point;

#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
    last: Option<(f32, f32)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's mouse state; returns the signals it implies, in order.
    /// `pos` is None while the pointer is outside the window.
    pub fn poll(&mut self, down: bool, pos: Option<(f32, f32)>) -> Vec<Signal> {
        let mut out = Vec::new();

        if down && !self.was_down {
            out.push(Signal::GestureStart);
            // The press position itself is not a sample; the first move is.
            self.last = pos;
        } else if down {
            if let Some((x, y)) = pos {
                if self.last != pos {
                    out.push(Signal::PointSample(Point::new(x as f64, y as f64)));
                    self.last = pos;
                }
            }
        } else if self.was_down {
            out.push(Signal::GestureEnd);
            self.last = None;
        }

        self.was_down = down;
        out
    }
}
