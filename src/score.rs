// Gesture fidelity: how close a stroke is to a uniform-radius shape.
//
// Every point's distance from a reference centre is its "radius". A perfect
// circle has one radius everywhere, so the mean absolute deviation (MAD) of
// the radii, relative to the mean radius, measures how far off the stroke is.
// The same statistic with a softer multiplier scores squares.

use crate::types::{Point, ShapeMode};

pub const MAX_SCORE: f64 = 100.0;

/// Score `points` against `mode`, in [0, 100].
/// Too few points or a zero mean radius score 0.
pub fn score(points: &[Point], mode: ShapeMode) -> f64 {
    if points.len() < mode.min_points() {
        return 0.0;
    }

    let c = center(points, mode);
    let n = points.len() as f64;

    let radii: Vec<f64> = points.iter().map(|p| p.distance(c)).collect();
    let mean_radius = radii.iter().sum::<f64>() / n;
    if !(mean_radius.is_finite() && mean_radius > 0.0) {
        return 0.0;
    }

    let mad = radii.iter().map(|r| (r - mean_radius).abs()).sum::<f64>() / n;
    let penalty = (mad / mean_radius) * mode.tolerance();

    (MAX_SCORE - penalty).clamp(0.0, MAX_SCORE)
}

/// Reference centre for `mode`.
/// Circle: bounding-box midpoint, forgiving of lopsided strokes.
/// Square: centroid, steadier for a polygon.
pub fn center(points: &[Point], mode: ShapeMode) -> Point {
    match mode {
        ShapeMode::Circle => bbox_midpoint(points),
        ShapeMode::Square => centroid(points),
    }
}

fn bbox_midpoint(points: &[Point]) -> Point {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
}

fn centroid(points: &[Point]) -> Point {
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}
