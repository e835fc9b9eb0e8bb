//! 2D point type, epsilon-aware comparisons, and the small amount of
//! circle/bisector arithmetic the sweep and finalizer share.

use cgmath::Point2;
use std::f64;

/// A point in the plane. An alias rather than a newtype so call sites can
/// keep using `cgmath`'s vector arithmetic on sites, vertices and edge
/// endpoints interchangeably.
pub type Point = Point2<f64>;

/// General-purpose coordinate tolerance used throughout the sweep.
pub const EPSILON: f64 = 1e-9;

/// Tighter tolerance for the circle-event orientation test (see
/// [`compute_circumcenter`]). Must stay tighter than [`EPSILON`]:
/// loosening it produces spurious vertices, tightening it risks missing
/// cascading circle events.
pub const CIRCLE_EVENT_EPSILON: f64 = -2e-12;

/// Sentinel for "vertex not yet determined". Both coordinates are +infinity,
/// which is never a valid edge endpoint or input site.
pub fn no_vertex() -> Point {
    Point::new(f64::INFINITY, f64::INFINITY)
}

pub fn is_no_vertex(p: Point) -> bool {
    p.x.is_infinite() && p.x.is_sign_positive() && p.y.is_infinite() && p.y.is_sign_positive()
}

pub fn equal_eps(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

pub fn less_eps(a: f64, b: f64) -> bool {
    b - a > EPSILON
}

pub fn greater_eps(a: f64, b: f64) -> bool {
    a - b > EPSILON
}

/// Computes the circumcenter of three sites (`left`, `mid`, `right`
/// arranged left-to-right on the beachline), returning `None` when the
/// orientation determinant shows the triple is collinear or turns the
/// wrong way to ever collapse to a single Voronoi vertex.
pub fn compute_circumcenter(left: Point, mid: Point, right: Point) -> Option<Point> {
    let bx = mid.x;
    let by = mid.y;
    let ax = left.x - bx;
    let ay = left.y - by;
    let cx = right.x - bx;
    let cy = right.y - by;

    let d = 2.0 * (ax * cy - ay * cx);
    if d >= CIRCLE_EVENT_EPSILON {
        return None;
    }

    let ha = ax * ax + ay * ay;
    let hc = cx * cx + cy * cy;
    let x = (cy * ha - ay * hc) / d;
    let y = (ax * hc - cx * ha) / d;

    Some(Point::new(x + bx, y + by))
}

/// Euclidean distance, used to turn a circumcenter into the sweep-y at
/// which its circle event fires.
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}
