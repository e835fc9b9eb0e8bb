//! The beachline: a tree of parabolic arcs ordered left-to-right by the
//! x-position of their left breakpoint at the current sweep position.
//!
//! Keyed implicitly — there is no stored breakpoint x to compare against,
//! only the focus (the arc's site) and the current directrix, from which
//! both neighboring breakpoints are recomputed on every descent step. This
//! mirrors `original_source/pkg/voronoi/v_fortune.go`'s `leftBreakPoint` /
//! `rightBreakPoint` / `addBeachSection`.

use crate::diagram::{CellIndex, EdgeIndex};
use crate::event::EventKey;
use crate::geometry::{Point, EPSILON};
use crate::tree::{NodeKey, Tree};

/// A key identifying one arc's node in the beachline tree.
pub type ArcKey = NodeKey;

#[derive(Debug, Clone, Copy)]
pub struct BeachArc {
    pub site: Point,
    pub cell: CellIndex,
    /// The partial edge whose left breakpoint this arc currently traces,
    /// if any. Set once the arc has a left neighbor.
    pub edge: Option<EdgeIndex>,
    /// The circle event that would retire this arc, if one is scheduled.
    pub circle_event: Option<EventKey>,
}

impl BeachArc {
    fn new(site: Point, cell: CellIndex) -> Self {
        BeachArc {
            site,
            cell,
            edge: None,
            circle_event: None,
        }
    }
}

#[derive(Default)]
pub struct Beachline {
    tree: Tree<BeachArc>,
}

impl Beachline {
    pub fn new() -> Self {
        Beachline { tree: Tree::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn get(&self, key: ArcKey) -> &BeachArc {
        self.tree.get(key)
    }

    pub fn get_mut(&mut self, key: ArcKey) -> &mut BeachArc {
        self.tree.get_mut(key)
    }

    pub fn prev(&self, key: ArcKey) -> Option<ArcKey> {
        self.tree.prev(key)
    }

    pub fn next(&self, key: ArcKey) -> Option<ArcKey> {
        self.tree.next(key)
    }

    pub fn first(&self) -> Option<ArcKey> {
        self.tree.first()
    }

    pub fn insert_after(&mut self, pred: Option<ArcKey>, site: Point, cell: CellIndex) -> ArcKey {
        self.tree.insert_successor(pred, BeachArc::new(site, cell))
    }

    pub fn remove(&mut self, key: ArcKey) -> BeachArc {
        self.tree.remove_node(key)
    }

    /// The x-coordinate at which `key`'s arc meets its left neighbor's arc
    /// on the current directrix, per spec: on-directrix focus short-circuits,
    /// an absent left neighbor is -infinity, an on-directrix left focus
    /// short-circuits to its x, and otherwise the two parabolas' intersection
    /// is found by solving the quadratic (degenerating to the midpoint when
    /// the two foci share a y, i.e. the quadratic's `a` term vanishes).
    fn left_break_point(&self, key: ArcKey, directrix: f64) -> f64 {
        let arc = self.tree.get(key);
        let focus_x = arc.site.x;
        let focus_y = arc.site.y;
        let pby2 = focus_y - directrix;
        if pby2 == 0.0 {
            return focus_x;
        }

        let left = match self.tree.prev(key) {
            Some(l) => l,
            None => return f64::NEG_INFINITY,
        };
        let left_site = self.tree.get(left).site;
        let plby2 = left_site.y - directrix;
        if plby2 == 0.0 {
            return left_site.x;
        }

        let hl = left_site.x - focus_x;
        let aby2 = 1.0 / pby2 - 1.0 / plby2;
        let b = hl / plby2;
        if aby2 != 0.0 {
            return (-b
                + (b * b
                    - 2.0
                        * aby2
                        * (hl * hl / (-2.0 * plby2) - left_site.y + plby2 / 2.0 + focus_y
                            - pby2 / 2.0))
                    .sqrt())
                / aby2
                + focus_x;
        }
        (focus_x + left_site.x) / 2.0
    }

    fn right_break_point(&self, key: ArcKey, directrix: f64) -> f64 {
        match self.tree.next(key) {
            Some(right) => self.left_break_point(right, directrix),
            None => {
                let arc = self.tree.get(key);
                if arc.site.y == directrix {
                    arc.site.x
                } else {
                    f64::INFINITY
                }
            }
        }
    }

    /// Descends the tree to find the arc(s) straddling `x` on `directrix`.
    /// Returns `(left, right)` exactly as spec.md §4.3 describes the three
    /// micro-cases once an arc's interval is reached:
    /// - empty beachline: `(None, None)`
    /// - new site strictly right of every arc (insert-after, no split):
    ///   `(Some(last), None)`
    /// - new site exactly on a left break: `(previous_of(arc), Some(arc))`
    /// - new site exactly on a right break: `(Some(arc), next_of(arc))`
    /// - new site strictly inside an arc (split): `(Some(arc), Some(arc))`
    pub fn locate(&self, x: f64, directrix: f64) -> (Option<ArcKey>, Option<ArcKey>) {
        if self.tree.is_empty() {
            return (None, None);
        }
        let mut node = self.tree.root().expect("checked non-empty above");
        loop {
            let dxl = self.left_break_point(node, directrix) - x;
            if dxl > EPSILON {
                node = self
                    .tree
                    .left(node)
                    .expect("an arc whose left break exceeds x always has a left child");
                continue;
            }
            let dxr = x - self.right_break_point(node, directrix);
            if dxr > EPSILON {
                match self.tree.right(node) {
                    Some(r) => {
                        node = r;
                        continue;
                    }
                    None => return (Some(node), None),
                }
            }
            if dxl > -EPSILON {
                return (self.tree.prev(node), Some(node));
            } else if dxr > -EPSILON {
                return (Some(node), self.tree.next(node));
            }
            return (Some(node), Some(node));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typedvector::TypedIndex;

    fn cell(i: usize) -> CellIndex {
        TypedIndex::new(i)
    }

    #[test]
    fn locate_on_empty_beachline_returns_none_none() {
        let beachline = Beachline::new();
        assert_eq!(beachline.locate(0.5, 0.0), (None, None));
    }

    #[test]
    fn locate_inside_single_arc_splits() {
        let mut beachline = Beachline::new();
        let arc = beachline.insert_after(None, Point::new(0.5, 0.0), cell(0));
        let (left, right) = beachline.locate(0.5, 1.0);
        assert_eq!(left, Some(arc));
        assert_eq!(right, Some(arc));
    }

    #[test]
    fn locate_between_two_distinct_foci_finds_breakpoint() {
        let mut beachline = Beachline::new();
        let left_arc = beachline.insert_after(None, Point::new(0.0, 0.0), cell(0));
        let right_arc = beachline.insert_after(Some(left_arc), Point::new(10.0, 0.0), cell(1));
        let (left, right) = beachline.locate(5.0, 1.0);
        assert_eq!(left, Some(left_arc));
        assert_eq!(right, Some(right_arc));
    }
}
