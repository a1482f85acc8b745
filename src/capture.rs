// Stroke capture: Idle <-> Capturing.
// Only an active gesture accumulates points; the finished stroke stays around
// (still drawn) until the next gesture starts.

use crate::types::{Point, Stroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

#[derive(Debug, Default)]
pub struct StrokeCapture {
    state: CaptureState,
    stroke: Stroke,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    /// Gesture start: drop the old stroke and start collecting.
    /// A second start while capturing also restarts from empty.
    pub fn begin(&mut self) {
        self.stroke.clear();
        self.state = CaptureState::Capturing;
    }

    /// Append `p` if a gesture is active. Returns false when ignored.
    pub fn sample(&mut self, p: Point) -> bool {
        if self.state != CaptureState::Capturing {
            return false;
        }
        self.stroke.push(p);
        true
    }

    /// Gesture end: back to Idle. Returns the finished stroke, or None if
    /// there was no gesture to end.
    pub fn end(&mut self) -> Option<&Stroke> {
        if self.state != CaptureState::Capturing {
            return None;
        }
        self.state = CaptureState::Idle;
        Some(&self.stroke)
    }
}
