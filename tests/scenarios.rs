//! One test per named scenario: small, hand-checkable site configurations
//! whose expected geometry is known exactly, rather than only statistically
//! (see `tests/properties.rs` for the randomized property tests).

use voronoi_fortune::boundingbox::BoundingBox;
use voronoi_fortune::geometry::{equal_eps, Point};

fn bbox() -> BoundingBox {
    BoundingBox::new(0.0, 100.0, 0.0, 100.0)
}

#[test]
fn empty_input_yields_empty_diagram() {
    let diagram = voronoi_fortune::create_diagram(&[], bbox(), true);
    assert_eq!(diagram.cells().count(), 0);
    assert_eq!(diagram.edges().count(), 0);
}

#[test]
fn single_site_fills_the_rectangle() {
    let sites = vec![Point::new(50.0, 50.0)];
    let diagram = voronoi_fortune::create_diagram(&sites, bbox(), true);
    assert_eq!(diagram.cells().count(), 1);
    assert_eq!(diagram.edges().count(), 4);
    let cell = diagram.cells().next().unwrap();
    assert_eq!(cell.half_edges().len(), 4);
}

#[test]
fn two_sites_split_the_rectangle_vertically() {
    let sites = vec![Point::new(25.0, 50.0), Point::new(75.0, 50.0)];
    let diagram = voronoi_fortune::create_diagram(&sites, bbox(), true);
    assert_eq!(diagram.cells().count(), 2);

    let shared = diagram
        .edges()
        .find(|e| equal_eps(e.va.x, 50.0) && equal_eps(e.vb.x, 50.0))
        .expect("expected a vertical shared edge at x=50");
    let (lo, hi) = if shared.va.y < shared.vb.y {
        (shared.va.y, shared.vb.y)
    } else {
        (shared.vb.y, shared.va.y)
    };
    assert!(equal_eps(lo, 0.0) && equal_eps(hi, 100.0));

    for cell in diagram.cells() {
        assert_eq!(cell.half_edges().len(), 4);
    }
}

#[test]
fn two_sites_split_the_rectangle_horizontally() {
    let sites = vec![Point::new(50.0, 25.0), Point::new(50.0, 75.0)];
    let diagram = voronoi_fortune::create_diagram(&sites, bbox(), true);
    assert_eq!(diagram.cells().count(), 2);

    let shared = diagram
        .edges()
        .find(|e| equal_eps(e.va.y, 50.0) && equal_eps(e.vb.y, 50.0))
        .expect("expected a horizontal shared edge at y=50");
    let (lo, hi) = if shared.va.x < shared.vb.x {
        (shared.va.x, shared.vb.x)
    } else {
        (shared.vb.x, shared.va.x)
    };
    assert!(equal_eps(lo, 0.0) && equal_eps(hi, 100.0));

    for cell in diagram.cells() {
        assert_eq!(cell.half_edges().len(), 4);
    }
}

#[test]
fn three_sites_meet_at_their_circumcenter() {
    let sites = vec![
        Point::new(30.0, 30.0),
        Point::new(70.0, 30.0),
        Point::new(50.0, 70.0),
    ];
    let diagram = voronoi_fortune::create_diagram(&sites, bbox(), true);
    assert_eq!(diagram.cells().count(), 3);

    let at_circumcenter = |p: Point| equal_eps(p.x, 50.0) && equal_eps(p.y, 40.0);
    let touching = diagram
        .edges()
        .filter(|e| at_circumcenter(e.va) || at_circumcenter(e.vb))
        .count();
    assert_eq!(touching, 3, "exactly 3 edges should meet at the circumcenter");

    for cell in diagram.cells() {
        assert!(!cell.half_edges().is_empty());
    }
}

#[test]
fn four_cocircular_sites_meet_at_their_shared_center() {
    let sites = vec![
        Point::new(40.0, 40.0),
        Point::new(60.0, 40.0),
        Point::new(60.0, 60.0),
        Point::new(40.0, 60.0),
    ];
    let diagram = voronoi_fortune::create_diagram(&sites, bbox(), true);
    assert_eq!(diagram.cells().count(), 4);

    let at_center = |p: Point| equal_eps(p.x, 50.0) && equal_eps(p.y, 50.0);
    let touching = diagram
        .edges()
        .filter(|e| at_center(e.va) || at_center(e.vb))
        .count();
    assert_eq!(touching, 4, "all 4 interior edges should meet at (50, 50)");

    for cell in diagram.cells() {
        // 2 interior bisector edges meeting at the center, plus 2 border
        // edges tracing the corner back to this cell's own side of the box.
        assert_eq!(cell.half_edges().len(), 4);
    }
}
