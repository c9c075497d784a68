//! Planar geometry helpers for the slice engine.
//!
//! Pure functions over `NVec2`: distances, outer-point bounding boxes,
//! centroids, and the segment/rectangle overlap test used as the slice
//! broad phase before a per-point split is attempted.

use crate::simulation::states::{NVec2, Point};

/// Axis-aligned bounding box in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn contains(&self, p: NVec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Euclidean distance between two points.
pub fn distance(a: NVec2, b: NVec2) -> f64 {
    (b - a).norm()
}

/// Min/max box over a point slice. Callers pass the outer ring only;
/// an empty slice gives a degenerate zero box at the origin.
pub fn bounding_box(points: &[Point]) -> Rect {
    if points.is_empty() {
        return Rect {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        };
    }
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x.x);
        min_y = min_y.min(p.x.y);
        max_x = max_x.max(p.x.x);
        max_y = max_y.max(p.x.y);
    }
    Rect {
        min_x,
        min_y,
        max_x,
        max_y,
    }
}

/// Mean position of a point set. Empty input gives the origin.
pub fn centroid(points: &[NVec2]) -> NVec2 {
    if points.is_empty() {
        return NVec2::zeros();
    }
    let sum = points.iter().fold(NVec2::zeros(), |acc, p| acc + p);
    sum / points.len() as f64
}

/// Average distance from `center` to each point.
pub fn mean_radius(points: &[NVec2], center: NVec2) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let total: f64 = points.iter().map(|p| (p - center).norm()).sum();
    total / points.len() as f64
}

/// Parametric segment/segment crossing test. Parallel or degenerate
/// segments report no crossing.
fn segments_cross(a1: NVec2, a2: NVec2, b1: NVec2, b2: NVec2) -> bool {
    let den = (a1.x - a2.x) * (b1.y - b2.y) - (a1.y - a2.y) * (b1.x - b2.x);
    if den == 0.0 {
        return false;
    }
    let t = ((a1.x - b1.x) * (b1.y - b2.y) - (a1.y - b1.y) * (b1.x - b2.x)) / den;
    let u = -((a1.x - a2.x) * (a1.y - b1.y) - (a1.y - a2.y) * (a1.x - b1.x)) / den;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// True if the segment `p1..p2` touches `rect`: either endpoint inside,
/// a crossing of any of the four edges, or both endpoints inside.
pub fn segment_intersects_rect(p1: NVec2, p2: NVec2, rect: &Rect) -> bool {
    if rect.contains(p1) || rect.contains(p2) {
        return true;
    }

    let tl = NVec2::new(rect.min_x, rect.min_y);
    let tr = NVec2::new(rect.max_x, rect.min_y);
    let br = NVec2::new(rect.max_x, rect.max_y);
    let bl = NVec2::new(rect.min_x, rect.max_y);

    if segments_cross(p1, p2, tl, tr)
        || segments_cross(p1, p2, tr, br)
        || segments_cross(p1, p2, br, bl)
        || segments_cross(p1, p2, bl, tl)
    {
        return true;
    }

    rect.contains(p1) && rect.contains(p2)
}
