//! Post-sweep cleanup: extend dangling partial edges out to the bounding
//! box, clip every edge against it, and (optionally) close each cell into a
//! simple polygon by walking border edges across any gaps. Ported from
//! `original_source/pkg/voronoi/v_fortune.go`'s `clipEdges` and
//! `closeCells`.

use crate::boundingbox::BoundingBox;
use crate::diagram::{CellIndex, Diagram, EdgeIndex, HalfEdge};
use crate::geometry::{equal_eps, greater_eps, less_eps, no_vertex, Point};

/// Extends and clips every edge in place; edges that fall entirely outside
/// the rectangle, or collapse to a point under clipping, are tombstoned
/// (both endpoints reset to [`crate::geometry::no_vertex`]) rather than
/// removed, so earlier `EdgeIndex`es stay valid.
pub(crate) fn clip_edges(diagram: &mut Diagram, bbox: &BoundingBox) {
    for i in 0..diagram.edge_count() {
        let edge_index = EdgeIndex::new(i);
        let keep = connect_edge(diagram, bbox, edge_index) && clip_edge(diagram, bbox, edge_index);
        if !keep {
            let edge = diagram.edge_mut(edge_index);
            edge.va = no_vertex();
            edge.vb = no_vertex();
        }
    }
}

fn connect_edge(diagram: &mut Diagram, bbox: &BoundingBox, edge_index: EdgeIndex) -> bool {
    let edge = *diagram.edge(edge_index);
    if !crate::geometry::is_no_vertex(edge.vb) {
        return true;
    }
    let right_cell = edge
        .right_cell
        .expect("clip_edges only ever sees internal edges; border edges are created afterwards");
    let left_site = diagram.cell_site(edge.left_cell);
    let right_site = diagram.cell_site(right_cell);

    match bbox.connect_edge(left_site, right_site, edge.va) {
        Some((va, vb)) => {
            let edge = diagram.edge_mut(edge_index);
            edge.va = va;
            edge.vb = vb;
            true
        }
        None => false,
    }
}

fn clip_edge(diagram: &mut Diagram, bbox: &BoundingBox, edge_index: EdgeIndex) -> bool {
    let edge = *diagram.edge(edge_index);
    match bbox.clip_segment(edge.va, edge.vb) {
        Some((a, b)) => {
            let edge = diagram.edge_mut(edge_index);
            edge.va = a;
            edge.vb = b;
            true
        }
        None => false,
    }
}

/// Closes every cell into a simple polygon by angle-sorting its half-edges
/// ([`Diagram::prepare_cell`]) and inserting border edges wherever
/// consecutive half-edges leave a gap, walking along whichever rectangle
/// side the gap's endpoint sits on. Mirrors `closeCells`.
pub(crate) fn close_cells(diagram: &mut Diagram, bbox: &BoundingBox) {
    let left = bbox.left();
    let right = bbox.right();
    let top = bbox.top();
    let bottom = bbox.bottom();

    for i in 0..diagram.cell_count() {
        let cell = CellIndex::new(i);
        if diagram.prepare_cell(cell) == 0 {
            // A cell with no surviving internal edges at all (the lone site
            // in an otherwise empty diagram, or one whose bisectors all
            // clipped away) has no gap for the walk below to find. Seed it
            // directly with the rectangle's own perimeter instead of
            // leaving it unbounded.
            seed_unbounded_cell(diagram, cell, bbox);
            continue;
        }

        let mut num_half_edges = diagram.cell_half_edges(cell).len();
        let mut current = 0;
        while current < num_half_edges {
            let next = (current + 1) % num_half_edges;
            let end_point = half_edge_at(diagram, cell, current, Diagram::half_edge_end_point);
            let start_point = half_edge_at(diagram, cell, next, Diagram::half_edge_start_point);

            if !(equal_eps(end_point.x, start_point.x) && equal_eps(end_point.y, start_point.y)) {
                let end_vertex = if equal_eps(end_point.x, left) && less_eps(end_point.y, bottom) {
                    // walking down the left side
                    if equal_eps(start_point.x, left) {
                        Point::new(left, start_point.y)
                    } else {
                        Point::new(left, bottom)
                    }
                } else if equal_eps(end_point.y, bottom) && less_eps(end_point.x, right) {
                    // walking right along the bottom
                    if equal_eps(start_point.y, bottom) {
                        Point::new(start_point.x, bottom)
                    } else {
                        Point::new(right, bottom)
                    }
                } else if equal_eps(end_point.x, right) && greater_eps(end_point.y, top) {
                    // walking up the right side
                    if equal_eps(start_point.x, right) {
                        Point::new(right, start_point.y)
                    } else {
                        Point::new(right, top)
                    }
                } else if equal_eps(end_point.y, top) && greater_eps(end_point.x, left) {
                    // walking left along the top
                    if equal_eps(start_point.y, top) {
                        Point::new(start_point.x, top)
                    } else {
                        Point::new(left, top)
                    }
                } else {
                    end_point
                };

                let edge_index = diagram.create_border_edge(cell, end_point, end_vertex);
                let angle = diagram.border_half_edge_angle(edge_index, cell);
                diagram.insert_half_edge(
                    cell,
                    current + 1,
                    HalfEdge {
                        cell,
                        edge: edge_index,
                        angle,
                    },
                );
                num_half_edges = diagram.cell_half_edges(cell).len();
            }
            current += 1;
        }
        log::trace!(
            "cell {} closed with {} half-edges",
            i,
            diagram.cell_half_edges(cell).len()
        );
    }
}

/// Gives a cell with no surviving bisectors the whole bounding box as its
/// polygon, tracing the four corners so each border edge's start matches
/// the previous one's end with no further gap-walking needed.
fn seed_unbounded_cell(diagram: &mut Diagram, cell: CellIndex, bbox: &BoundingBox) {
    let corners = [
        crate::geometry::Point::new(bbox.left(), bbox.top()),
        crate::geometry::Point::new(bbox.right(), bbox.top()),
        crate::geometry::Point::new(bbox.right(), bbox.bottom()),
        crate::geometry::Point::new(bbox.left(), bbox.bottom()),
    ];
    for i in 0..4 {
        let va = corners[i];
        let vb = corners[(i + 1) % 4];
        let edge_index = diagram.create_border_edge(cell, va, vb);
        let angle = diagram.border_half_edge_angle(edge_index, cell);
        let index = diagram.cell_half_edges(cell).len();
        diagram.insert_half_edge(cell, index, HalfEdge { cell, edge: edge_index, angle });
    }
}

fn half_edge_at(
    diagram: &Diagram,
    cell: CellIndex,
    index: usize,
    accessor: fn(&Diagram, HalfEdge) -> Point,
) -> Point {
    let half_edge = diagram.cell_half_edges(cell)[index];
    accessor(diagram, half_edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::no_vertex;

    #[test]
    fn clip_edges_tombstones_edge_entirely_outside_bbox() {
        let mut diagram = Diagram::empty();
        let left = diagram.create_cell(Point::new(-20.0, 0.0));
        let right = diagram.create_cell(Point::new(-10.0, 0.0));
        diagram.create_edge(left, right, Point::new(-15.0, -5.0), Point::new(-15.0, 5.0));

        let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
        clip_edges(&mut diagram, &bbox);

        assert_eq!(diagram.edges().count(), 0);
    }

    #[test]
    fn close_cells_gives_single_site_the_full_rectangle() {
        let mut diagram = Diagram::empty();
        let cell = diagram.create_cell(Point::new(50.0, 50.0));
        let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
        close_cells(&mut diagram, &bbox);
        assert_eq!(diagram.cell_half_edges(cell).len(), 4);
        let _ = no_vertex();
    }
}
