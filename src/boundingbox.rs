//! The axis-aligned clipping rectangle and the two geometric operations the
//! edge finalizer needs against it: extending a half-built edge out to the
//! rectangle along its bisector, and clipping a finished segment to it with
//! Liang-Barsky.

use crate::geometry::{equal_eps, no_vertex, Point};

/// An axis-aligned rectangle in the algorithm's own convention: `yt` is the
/// top (smaller y, processed first by the sweep) and `yb` is the bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub xl: f64,
    pub xr: f64,
    pub yt: f64,
    pub yb: f64,
}

impl BoundingBox {
    /// # Panics
    /// If `xl >= xr` or `yt >= yb`. An inverted or degenerate rectangle is a
    /// programming error, not a recoverable condition (spec §7).
    pub fn new(xl: f64, xr: f64, yt: f64, yb: f64) -> Self {
        assert!(xl < xr, "bounding box requires xl < xr, got {} >= {}", xl, xr);
        assert!(yt < yb, "bounding box requires yt < yb, got {} >= {}", yt, yb);
        BoundingBox { xl, xr, yt, yb }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.xl && p.x <= self.xr && p.y >= self.yt && p.y <= self.yb
    }

    /// Extends a partial edge (`va` set, `vb` possibly unset) between
    /// `left_site` and `right_site` out to the rectangle boundary along
    /// their perpendicular bisector. Returns the two endpoints to use, or
    /// `None` if the edge falls entirely outside the rectangle and should
    /// be dropped.
    ///
    /// Ported from `original_source/pkg/voronoi/v_fortune.go`'s
    /// `connectEdge`: the slope of the bisector decides whether to walk the
    /// vertical, steep (`|slope| > 1`) or shallow regime, and the sites'
    /// relative order decides which side of the rectangle the edge should
    /// reach.
    pub fn connect_edge(
        &self,
        left_site: Point,
        right_site: Point,
        va: Point,
    ) -> Option<(Point, Point)> {
        let (xl, xr, yt, yb) = (self.xl, self.xr, self.yt, self.yb);
        let (lx, ly) = (left_site.x, left_site.y);
        let (rx, ry) = (right_site.x, right_site.y);
        let fx = (lx + rx) / 2.0;
        let fy = (ly + ry) / 2.0;

        let mut va_set = !va.x.is_infinite();
        let mut va = va;

        if equal_eps(ry, ly) {
            if fx < xl || fx >= xr {
                return None;
            }
            let vb;
            if lx > rx {
                if !va_set {
                    va = Point::new(fx, yt);
                    va_set = true;
                } else if va.y >= yb {
                    return None;
                }
                vb = Point::new(fx, yb);
            } else {
                if !va_set {
                    va = Point::new(fx, yb);
                } else if va.y < yt {
                    return None;
                }
                vb = Point::new(fx, yt);
            }
            let _ = va_set;
            return Some((va, vb));
        }

        let fm = (lx - rx) / (ry - ly);
        let fb = fy - fm * fx;

        if !(-1.0..=1.0).contains(&fm) {
            let vb;
            if lx > rx {
                if !va_set {
                    va = Point::new((yt - fb) / fm, yt);
                    va_set = true;
                } else if va.y >= yb {
                    return None;
                }
                vb = Point::new((yb - fb) / fm, yb);
            } else {
                if !va_set {
                    va = Point::new((yb - fb) / fm, yb);
                } else if va.y < yt {
                    return None;
                }
                vb = Point::new((yt - fb) / fm, yt);
            }
            let _ = va_set;
            return Some((va, vb));
        }

        let vb;
        if ly < ry {
            if !va_set {
                va = Point::new(xl, fm * xl + fb);
            } else if va.x >= xr {
                return None;
            }
            vb = Point::new(xr, fm * xr + fb);
        } else {
            if !va_set {
                va = Point::new(xr, fm * xr + fb);
            } else if va.x < xl {
                return None;
            }
            vb = Point::new(xl, fm * xl + fb);
        }
        Some((va, vb))
    }

    /// Liang-Barsky clip of the segment `(a, b)` against the rectangle,
    /// ported from `original_source`'s `clipEdge`. Returns the clipped
    /// endpoints, or `None` if the segment lies entirely outside the
    /// rectangle or collapses below [`crate::geometry::EPSILON`].
    pub fn clip_segment(&self, a: Point, b: Point) -> Option<(Point, Point)> {
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        let dx = b.x - a.x;
        let dy = b.y - a.y;

        // left
        let q = a.x - self.xl;
        if dx == 0.0 && q < 0.0 {
            return None;
        }
        let r = -q / dx;
        if dx < 0.0 {
            if r < t0 {
                return None;
            } else if r < t1 {
                t1 = r;
            }
        } else if dx > 0.0 {
            if r > t1 {
                return None;
            } else if r > t0 {
                t0 = r;
            }
        }

        // right
        let q = self.xr - a.x;
        if dx == 0.0 && q < 0.0 {
            return None;
        }
        let r = q / dx;
        if dx < 0.0 {
            if r > t1 {
                return None;
            } else if r > t0 {
                t0 = r;
            }
        } else if dx > 0.0 {
            if r < t0 {
                return None;
            } else if r < t1 {
                t1 = r;
            }
        }

        // top
        let q = a.y - self.yt;
        if dy == 0.0 && q < 0.0 {
            return None;
        }
        let r = -q / dy;
        if dy < 0.0 {
            if r < t0 {
                return None;
            } else if r < t1 {
                t1 = r;
            }
        } else if dy > 0.0 {
            if r > t1 {
                return None;
            } else if r > t0 {
                t0 = r;
            }
        }

        // bottom
        let q = self.yb - a.y;
        if dy == 0.0 && q < 0.0 {
            return None;
        }
        let r = q / dy;
        if dy < 0.0 {
            if r > t1 {
                return None;
            } else if r > t0 {
                t0 = r;
            }
        } else if dy > 0.0 {
            if r < t0 {
                return None;
            } else if r < t1 {
                t1 = r;
            }
        }

        let pa = if t0 > 0.0 {
            Point::new(a.x + t0 * dx, a.y + t0 * dy)
        } else {
            a
        };
        let pb = if t1 < 1.0 {
            Point::new(a.x + t1 * dx, a.y + t1 * dy)
        } else {
            b
        };

        if equal_eps(pa.x, pb.x) && equal_eps(pa.y, pb.y) {
            return None;
        }
        Some((pa, pb))
    }

    pub fn unset_vertex() -> Point {
        no_vertex()
    }

    pub fn left(&self) -> f64 {
        self.xl
    }
    pub fn right(&self) -> f64 {
        self.xr
    }
    pub fn top(&self) -> f64 {
        self.yt
    }
    pub fn bottom(&self) -> f64 {
        self.yb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "xl < xr")]
    fn rejects_inverted_x_range() {
        BoundingBox::new(10.0, 0.0, 0.0, 10.0);
    }

    #[test]
    #[should_panic(expected = "yt < yb")]
    fn rejects_inverted_y_range() {
        BoundingBox::new(0.0, 10.0, 10.0, 0.0);
    }

    #[test]
    fn clip_drops_segment_entirely_outside() {
        let bbox = BoundingBox::new(0.0, 10.0, 0.0, 10.0);
        assert!(bbox
            .clip_segment(Point::new(-5.0, -5.0), Point::new(-1.0, -1.0))
            .is_none());
    }

    #[test]
    fn clip_trims_segment_crossing_boundary() {
        let bbox = BoundingBox::new(0.0, 10.0, 0.0, 10.0);
        let (a, b) = bbox
            .clip_segment(Point::new(-5.0, 5.0), Point::new(5.0, 5.0))
            .unwrap();
        assert!(equal_eps(a.x, 0.0));
        assert!(equal_eps(b.x, 5.0));
    }

    #[test]
    fn connect_edge_vertical_bisector() {
        let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
        let (va, vb) = bbox
            .connect_edge(Point::new(25.0, 50.0), Point::new(75.0, 50.0), no_vertex())
            .unwrap();
        assert!(equal_eps(va.x, 50.0));
        assert!(equal_eps(vb.x, 50.0));
        assert!((va.y - vb.y).abs() > 99.0);
    }
}
