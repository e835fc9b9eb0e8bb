#![warn(clippy::all)]
#![forbid(unsafe_code)]
//! # voronoi_fortune
//!
//! A planar [Voronoi diagram](https://en.wikipedia.org/wiki/Voronoi_diagram)
//! builder using [Fortune's sweep-line algorithm](https://en.wikipedia.org/wiki/Fortune%27s_algorithm).
//!
//! ## Implementation details
//! The sweep line moves top-to-bottom over a set of sites, maintaining a
//! beachline of parabolic arcs (an intrusive red-black tree, [`tree`]) and a
//! queue of pending circle events (the same tree structure, keyed
//! differently). Each site or circle event mutates the beachline and grows
//! the output diagram's edges; once every event drains, the half-built
//! edges are clipped to the caller's bounding box and, if requested, every
//! cell is closed into a simple polygon by walking border edges across any
//! remaining gaps.
//!
//! The returned [`diagram::Diagram`] is a self-contained, read-only value:
//! cells and edges live in flat arenas addressed by index, with no borrowed
//! lifetimes, so it may be shared across threads once built.
//!
//! ## Example
//! ```rust
//! use voronoi_fortune::{boundingbox::BoundingBox, create_diagram, geometry::Point};
//!
//! let sites = vec![
//!     Point::new(25.0, 50.0),
//!     Point::new(75.0, 50.0),
//! ];
//! let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
//! let diagram = create_diagram(&sites, bbox, true);
//! assert_eq!(diagram.cells().count(), 2);
//! ```
mod beachline;
pub mod boundingbox;
pub mod diagram;
mod event;
mod finalizer;
pub mod geometry;
mod sweep;
mod tree;
pub mod typedvector;

use boundingbox::BoundingBox;
use diagram::Diagram;
use geometry::Point;

/// Builds the Voronoi diagram of `sites` clipped to `bbox`.
///
/// Duplicate sites (identical coordinates) are silently collapsed to a
/// single cell. When `close_cells` is `true`, every cell's boundary is
/// completed into a simple polygon by walking border edges across any gap
/// left by clipping; otherwise cells only carry the internal bisector edges
/// they were given during the sweep, angle-sorted for a consistent
/// traversal order.
///
/// # Panics
/// If `bbox` is degenerate — see [`BoundingBox::new`]. Construction is
/// otherwise infallible: there is no invalid configuration of finite,
/// non-NaN sites that can fail to produce a diagram.
pub fn create_diagram(sites: &[Point], bbox: BoundingBox, close_cells: bool) -> Diagram {
    sweep::build_diagram(sites, bbox, close_cells)
}

/// Performs [Lloyd's algorithm](https://en.wikipedia.org/wiki/Lloyd%27s_algorithm)
/// on `sites`: repeatedly replaces each site with its cell's centroid to
/// spread the points more evenly over `bbox`.
///
/// # Arguments
/// * `sites` — the initial points.
/// * `bbox` — the region the diagram (and thus the returned points) is
///   bounded to.
/// * `iterations` — how many relaxation passes to run.
pub fn lloyds_relaxation(sites: &[Point], bbox: BoundingBox, iterations: usize) -> Vec<Point> {
    let mut points = sites.to_vec();
    for _ in 0..iterations {
        let diagram = create_diagram(&points, bbox, true);
        points = (0..diagram.cells().count())
            .map(|i| cell_centroid(&diagram, diagram::CellIndex::new(i)))
            .collect();
    }
    points
}

/// The centroid of a cell's closed polygon, computed as the mean of its
/// half-edges' start points. A cell with no half-edges keeps its original
/// site — unreachable in practice since [`create_diagram`] with
/// `close_cells = true` seeds every edgeless cell with the full bounding
/// box, but a harmless fallback rather than a division by zero.
fn cell_centroid(diagram: &Diagram, cell: diagram::CellIndex) -> Point {
    let half_edges = diagram.cell_half_edges(cell);
    if half_edges.is_empty() {
        return diagram.cell_site(cell);
    }
    let (sx, sy) = half_edges.iter().fold((0.0, 0.0), |(sx, sy), he| {
        let p = diagram.half_edge_start_point(*he);
        (sx + p.x, sy + p.y)
    });
    let n = half_edges.len() as f64;
    Point::new(sx / n, sy / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_sites_produce_two_cells_and_one_edge() {
        let sites = vec![Point::new(25.0, 50.0), Point::new(75.0, 50.0)];
        let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
        let diagram = create_diagram(&sites, bbox, true);
        assert_eq!(diagram.cells().count(), 2);
        assert_eq!(diagram.edges().count(), 4);
    }

    #[test]
    fn lloyds_relaxation_keeps_point_count_stable() {
        let sites = vec![
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(50.0, 90.0),
        ];
        let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
        let relaxed = lloyds_relaxation(&sites, bbox, 3);
        assert_eq!(relaxed.len(), sites.len());
        for p in &relaxed {
            assert!(bbox.contains(*p));
        }
    }
}
