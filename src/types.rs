// Core types shared by capture, scoring and feedback.

/// Software pixel buffer presented by the window.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Allocate a buffer filled with `color`.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    pub fn fill(&mut self, color: u32) {
        for px in &mut self.pixels { *px = color; }
    }
}

/// One sampled pointer position in surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Points captured during one continuous gesture, in sampling order.
/// Append-only; cleared only when a new gesture starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Straight-line gap between the first and last sample.
    /// Visual: small when the user closed the loop.
    pub fn closure_distance(&self) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some(first.distance(*last))
    }
}

impl From<Vec<Point>> for Stroke {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

/// Which ideal shape the player is aiming for. Fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ShapeMode {
    #[default]
    Circle,
    Square,
}

impl ShapeMode {
    /// Fewest points a stroke needs before it can be scored.
    pub fn min_points(self) -> usize {
        match self {
            ShapeMode::Circle => 2,
            ShapeMode::Square => 4,
        }
    }

    /// Penalty multiplier applied to MAD / mean radius.
    /// Squares get half the penalty: corners sit further out than edge midpoints.
    pub fn tolerance(self) -> f64 {
        match self {
            ShapeMode::Circle => 100.0,
            ShapeMode::Square => 50.0,
        }
    }

    /// Grid and reference square only exist in the square variant.
    pub fn has_guides(self) -> bool {
        matches!(self, ShapeMode::Square)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeMode::Circle => "circle",
            ShapeMode::Square => "square",
        }
    }
}
