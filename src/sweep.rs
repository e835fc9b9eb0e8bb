//! The sweep driver: the main loop of Fortune's algorithm. Consumes sites
//! top-to-bottom, dispatching each event to either a site insertion or a
//! circle-event arc removal, then hands the half-built diagram to
//! [`crate::finalizer`] to clip against the bounding box and, optionally,
//! close each cell into a simple polygon.
//!
//! The direct analogue of `original_source/pkg/voronoi/run_fortune.go`'s
//! `CreateDiagram` and `v_fortune.go`'s `addBeachSection` / `removeBeachSection`,
//! split into named functions the way the teacher's own `voronoi_builder.rs`
//! decomposes its driver into `handle_site_event` / `handle_circle_event`
//! (though that file targets a different data model and an external
//! `priority_queue` crate, so only its shape is borrowed here).

use crate::beachline::{ArcKey, Beachline};
use crate::boundingbox::BoundingBox;
use crate::diagram::{CellIndex, Diagram};
use crate::event::{CircleEvent, EventQueue};
use crate::finalizer;
use crate::geometry::{compute_circumcenter, distance, no_vertex, Point, CIRCLE_EVENT_EPSILON, EPSILON};

/// Owns the three structures that only exist while the sweep is running.
/// Nothing here outlives [`build_diagram`].
struct Sweep {
    diagram: Diagram,
    beachline: Beachline,
    events: EventQueue,
}

/// Runs Fortune's algorithm over `sites` and returns the finished diagram.
///
/// Sites are sorted by `(y, x)` ascending before the sweep starts so the
/// directrix only ever moves downward; duplicate sites (identical
/// coordinates) are skipped, matching `original_source`'s
/// `prevSiteX`/`prevSiteY` guard. When `close_cells` is `false` every cell's
/// half-edges are still angle-sorted ([`Diagram::prepare_all_cells`]) so
/// callers get a consistent traversal order either way.
pub fn build_diagram(sites: &[Point], bbox: BoundingBox, close_cells: bool) -> Diagram {
    let mut ordered: Vec<Point> = sites.to_vec();
    ordered.sort_by(|a, b| (a.y, a.x).partial_cmp(&(b.y, b.x)).expect("sites must be finite"));

    let mut sweep = Sweep {
        diagram: Diagram::empty(),
        beachline: Beachline::new(),
        events: EventQueue::new(),
    };

    let mut cursor = 0;
    let mut prev_site: Option<Point> = None;

    loop {
        let next_site = ordered.get(cursor).copied();
        let next_circle = sweep.events.first().map(|k| *sweep.events.get(k));

        let site_is_next = match (&next_site, &next_circle) {
            (Some(s), Some(c)) => s.y < c.y || (s.y == c.y && s.x < c.x),
            (Some(_), None) => true,
            (None, _) => false,
        };

        if site_is_next {
            let site = next_site.expect("site_is_next implies Some");
            cursor += 1;
            if prev_site.map_or(false, |p| p.x == site.x && p.y == site.y) {
                log::debug!("skipping duplicate site at ({}, {})", site.x, site.y);
                continue;
            }
            log::trace!("site event at ({}, {})", site.x, site.y);
            let cell = sweep.diagram.create_cell(site);
            handle_site_event(&mut sweep, site, cell);
            prev_site = Some(site);
        } else if let Some(circle) = next_circle {
            log::trace!("circle event at ({}, {})", circle.x, circle.y);
            handle_circle_event(&mut sweep, circle);
        } else {
            break;
        }
    }

    finalizer::clip_edges(&mut sweep.diagram, &bbox);
    if close_cells {
        finalizer::close_cells(&mut sweep.diagram, &bbox);
    } else {
        sweep.diagram.prepare_all_cells();
    }

    sweep.diagram
}

/// Inserts a new arc for `site`, splitting whichever arc (if any) currently
/// covers its x-position. Mirrors `addBeachSection`'s four post-insertion
/// cases.
fn handle_site_event(sweep: &mut Sweep, site: Point, cell: CellIndex) {
    let (left, right) = sweep.beachline.locate(site.x, site.y);

    let new_arc = sweep.beachline.insert_after(left, site, cell);

    match (left, right) {
        (None, None) => {
            // First site on the beachline: nothing to split or connect yet.
        }
        (Some(l), Some(r)) if l == r => {
            // Splitting a single arc in two.
            detach_circle_event(sweep, l);

            let l_site = sweep.beachline.get(l).site;
            let l_cell = sweep.beachline.get(l).cell;
            let right_arc = sweep.beachline.insert_after(Some(new_arc), l_site, l_cell);

            let new_cell = sweep.beachline.get(new_arc).cell;
            let edge = sweep.diagram.create_edge(l_cell, new_cell, no_vertex(), no_vertex());
            sweep.beachline.get_mut(new_arc).edge = Some(edge);
            sweep.beachline.get_mut(right_arc).edge = Some(edge);

            attach_circle_event(sweep, l);
            attach_circle_event(sweep, right_arc);
        }
        (Some(l), None) => {
            // Inserting strictly to the right of every existing arc.
            let l_cell = sweep.beachline.get(l).cell;
            let new_cell = sweep.beachline.get(new_arc).cell;
            let edge = sweep.diagram.create_edge(l_cell, new_cell, no_vertex(), no_vertex());
            sweep.beachline.get_mut(new_arc).edge = Some(edge);
        }
        (Some(l), Some(r)) => {
            // Landing exactly on a breakpoint between two distinct arcs.
            detach_circle_event(sweep, l);
            detach_circle_event(sweep, r);

            let left_site = sweep.beachline.get(l).site;
            let right_site = sweep.beachline.get(r).site;
            let vertex = two_site_bisector_vertex(left_site, site, right_site);

            let l_cell = sweep.beachline.get(l).cell;
            let r_cell = sweep.beachline.get(r).cell;
            let new_cell = sweep.beachline.get(new_arc).cell;

            let r_edge = sweep.beachline.get(r).edge.expect("a right neighbor always has an edge");
            sweep.diagram.set_edge_startpoint(r_edge, l_cell, r_cell, vertex);

            let new_edge = sweep.diagram.create_edge(l_cell, new_cell, no_vertex(), vertex);
            let r_new_edge = sweep.diagram.create_edge(new_cell, r_cell, no_vertex(), vertex);
            sweep.beachline.get_mut(new_arc).edge = Some(new_edge);
            sweep.beachline.get_mut(r).edge = Some(r_new_edge);

            attach_circle_event(sweep, l);
            attach_circle_event(sweep, r);
        }
        (None, Some(_)) => unreachable!("locate never returns (None, Some(_))"),
    }
}

/// The vertex at which the bisectors of `(left, mid)` and `(mid, right)`
/// meet, used when a new site lands exactly between two existing arcs (no
/// circumcircle computation needed — the point is equidistant from all
/// three sites by construction). Ported from `addBeachSection`'s final
/// branch in `original_source`.
fn two_site_bisector_vertex(left: Point, mid: Point, right: Point) -> Point {
    let ax = mid.x - left.x;
    let ay = mid.y - left.y;
    let cx = right.x - left.x;
    let cy = right.y - left.y;
    let d = 2.0 * (ax * cy - ay * cx);
    let hb = ax * ax + ay * ay;
    let hc = cx * cx + cy * cy;
    Point::new((cy * hb - ay * hc) / d + left.x, (ax * hc - cx * hb) / d + left.y)
}

/// Retires `circle.arc`, cascading through any coincident circle events on
/// either side exactly as `removeBeachSection` does, then reconnects the
/// surviving neighbors with one new edge through the shared vertex.
fn handle_circle_event(sweep: &mut Sweep, circle: CircleEvent) {
    let vertex = Point::new(circle.x, circle.ycenter);
    let arc = circle.arc;

    let previous = sweep.beachline.prev(arc);
    let next = sweep.beachline.next(arc);

    let mut disappearing = vec![arc];
    detach_beach_section(sweep, arc);

    let mut left_cursor = previous.expect("a circle event's arc always has a left neighbor");
    loop {
        let event = sweep.beachline.get(left_cursor).circle_event;
        let coincident = event.map_or(false, |k| {
            let e = sweep.events.get(k);
            (circle.x - e.x).abs() < EPSILON && (circle.ycenter - e.ycenter).abs() < EPSILON
        });
        if !coincident {
            break;
        }
        let before = sweep.beachline.prev(left_cursor);
        disappearing.insert(0, left_cursor);
        detach_beach_section(sweep, left_cursor);
        left_cursor = before.expect("cascading removal always has a further left neighbor");
    }
    disappearing.insert(0, left_cursor);
    detach_circle_event(sweep, left_cursor);

    let mut right_cursor = next.expect("a circle event's arc always has a right neighbor");
    loop {
        let event = sweep.beachline.get(right_cursor).circle_event;
        let coincident = event.map_or(false, |k| {
            let e = sweep.events.get(k);
            (circle.x - e.x).abs() < EPSILON && (circle.ycenter - e.ycenter).abs() < EPSILON
        });
        if !coincident {
            break;
        }
        let after = sweep.beachline.next(right_cursor);
        disappearing.push(right_cursor);
        detach_beach_section(sweep, right_cursor);
        right_cursor = after.expect("cascading removal always has a further right neighbor");
    }
    disappearing.push(right_cursor);
    detach_circle_event(sweep, right_cursor);

    for i in 1..disappearing.len() {
        let l_arc = disappearing[i - 1];
        let r_arc = disappearing[i];
        let l_cell = sweep.beachline.get(l_arc).cell;
        let r_cell = sweep.beachline.get(r_arc).cell;
        let r_edge = sweep.beachline.get(r_arc).edge.expect("an interior disappearing arc always has an edge");
        sweep.diagram.set_edge_startpoint(r_edge, l_cell, r_cell, vertex);
    }

    let l_arc = disappearing[0];
    let r_arc = *disappearing.last().expect("at least one arc always disappears");
    let l_cell = sweep.beachline.get(l_arc).cell;
    let r_cell = sweep.beachline.get(r_arc).cell;
    let edge = sweep.diagram.create_edge(l_cell, r_cell, no_vertex(), vertex);
    sweep.beachline.get_mut(r_arc).edge = Some(edge);

    attach_circle_event(sweep, l_arc);
    attach_circle_event(sweep, r_arc);
}

/// Detaches `arc`'s circle event (if any) and removes it from the
/// beachline. Mirrors `detachBeachSection`.
fn detach_beach_section(sweep: &mut Sweep, arc: ArcKey) {
    detach_circle_event(sweep, arc);
    sweep.beachline.remove(arc);
}

/// Computes the circumcircle of `arc` and its two neighbors and schedules a
/// circle event for it, provided the circumcenter determinant shows the
/// triple actually converges (mirrors `attachCircleEvent`'s early returns).
fn attach_circle_event(sweep: &mut Sweep, arc: ArcKey) {
    let left = match sweep.beachline.prev(arc) {
        Some(l) => l,
        None => return,
    };
    let right = match sweep.beachline.next(arc) {
        Some(r) => r,
        None => return,
    };

    let left_site = sweep.beachline.get(left).site;
    let mid_site = sweep.beachline.get(arc).site;
    let right_site = sweep.beachline.get(right).site;

    if left_site == right_site {
        return;
    }

    let center = match compute_circumcenter(left_site, mid_site, right_site) {
        Some(c) => c,
        None => return,
    };
    let radius = distance(center, mid_site);

    let event_key = sweep.events.insert(CircleEvent {
        arc,
        site: mid_site,
        x: center.x,
        y: center.y + radius,
        ycenter: center.y,
    });
    log::trace!("circle event scheduled at y={}", center.y + radius);
    sweep.beachline.get_mut(arc).circle_event = Some(event_key);
}

/// Removes `arc`'s scheduled circle event, if any, from both the queue and
/// the arc itself. Mirrors `detachCircleEvent`.
fn detach_circle_event(sweep: &mut Sweep, arc: ArcKey) {
    if let Some(event_key) = sweep.beachline.get(arc).circle_event {
        log::trace!("circle event invalidated");
        sweep.events.remove(event_key);
        sweep.beachline.get_mut(arc).circle_event = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::equal_eps;

    fn bbox() -> BoundingBox {
        BoundingBox::new(0.0, 100.0, 0.0, 100.0)
    }

    #[test]
    fn single_site_produces_one_cell_and_no_edges() {
        let sites = vec![Point::new(50.0, 50.0)];
        let diagram = build_diagram(&sites, bbox(), false);
        assert_eq!(diagram.cells().count(), 1);
        assert_eq!(diagram.edges().count(), 0);
    }

    #[test]
    fn two_sites_produce_one_shared_edge() {
        let sites = vec![Point::new(25.0, 50.0), Point::new(75.0, 50.0)];
        let diagram = build_diagram(&sites, bbox(), false);
        assert_eq!(diagram.cells().count(), 2);
        assert_eq!(diagram.edges().count(), 1);
        let edge = diagram.edges().next().unwrap();
        assert!(equal_eps(edge.va.x, 50.0));
        assert!(equal_eps(edge.vb.x, 50.0));
    }

    #[test]
    fn duplicate_sites_collapse_to_one_cell() {
        let sites = vec![Point::new(50.0, 50.0), Point::new(50.0, 50.0)];
        let diagram = build_diagram(&sites, bbox(), false);
        assert_eq!(diagram.cells().count(), 1);
    }

    #[test]
    fn three_sites_meet_at_expected_circumcenter() {
        let sites = vec![
            Point::new(30.0, 30.0),
            Point::new(70.0, 30.0),
            Point::new(50.0, 70.0),
        ];
        let diagram = build_diagram(&sites, bbox(), true);
        let found = diagram.edges().any(|e| {
            (equal_eps(e.va.x, 50.0) && equal_eps(e.va.y, 40.0))
                || (equal_eps(e.vb.x, 50.0) && equal_eps(e.vb.y, 40.0))
        });
        assert!(found, "expected a vertex at the circumcenter (50, 40)");
    }

    #[test]
    fn close_cells_gives_single_site_the_full_rectangle_perimeter() {
        let sites = vec![Point::new(50.0, 50.0)];
        let diagram = build_diagram(&sites, bbox(), true);
        assert_eq!(diagram.cells().count(), 1);
        assert_eq!(diagram.edges().count(), 4);
        let cell = diagram.cells().next().unwrap();
        assert_eq!(cell.half_edges().len(), 4);
        // The four border half-edges form one closed loop around the
        // rectangle: each one's end matches the next one's start.
        for i in 0..4 {
            let a = cell.half_edges()[i];
            let b = cell.half_edges()[(i + 1) % 4];
            let end = diagram.half_edge_end_point(a);
            let start = diagram.half_edge_start_point(b);
            assert!(equal_eps(end.x, start.x) && equal_eps(end.y, start.y));
        }
    }
}
