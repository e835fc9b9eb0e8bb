//! The circle-event queue: a tree of pending circle events ordered by
//! `(y, x)` ascending, caching the in-order-first event so the sweep driver
//! can peek it in O(1). Grounded in
//! `original_source/pkg/voronoi/v_fortune.go`'s `attachCircleEvent` /
//! `detachCircleEvent` and `firstCircleEvent`.

use crate::beachline::ArcKey;
use crate::geometry::Point;
use crate::tree::{NodeKey, Tree};

/// A key identifying one circle event's node in the event queue tree.
pub type EventKey = NodeKey;

#[derive(Debug, Clone, Copy)]
pub struct CircleEvent {
    /// The beachline arc that would be retired when this event fires.
    pub arc: ArcKey,
    /// The site of that arc, kept for diagnostics.
    pub site: Point,
    pub x: f64,
    pub y: f64,
    pub ycenter: f64,
}

#[derive(Default)]
pub struct EventQueue {
    tree: Tree<CircleEvent>,
    first: Option<EventKey>,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue {
            tree: Tree::new(),
            first: None,
        }
    }

    /// The event with the smallest `(y, x)`, or `None` if the queue is empty.
    pub fn first(&self) -> Option<EventKey> {
        self.first
    }

    pub fn get(&self, key: EventKey) -> &CircleEvent {
        self.tree.get(key)
    }

    /// Inserts `event`, descending the tree by `(y, x)` to find its in-order
    /// position (ties broken by `x <=`, matching the original's `<=` so
    /// equally-timed events drain in insertion order relative to each
    /// other rather than re-ordering).
    pub fn insert(&mut self, event: CircleEvent) -> EventKey {
        let mut predecessor = None;
        let mut node = self.tree.root();
        while let Some(n) = node {
            let candidate = self.tree.get(n);
            let goes_left = event.y < candidate.y || (event.y == candidate.y && event.x <= candidate.x);
            if goes_left {
                match self.tree.left(n) {
                    Some(l) => node = Some(l),
                    None => {
                        predecessor = self.tree.prev(n);
                        break;
                    }
                }
            } else {
                match self.tree.right(n) {
                    Some(r) => node = Some(r),
                    None => {
                        predecessor = Some(n);
                        break;
                    }
                }
            }
        }
        let key = self.tree.insert_successor(predecessor, event);
        if predecessor.is_none() {
            self.first = Some(key);
        }
        key
    }

    /// Removes `key`, updating the cached first pointer if it was the
    /// removed event.
    pub fn remove(&mut self, key: EventKey) {
        if self.tree.prev(key).is_none() {
            self.first = self.tree.next(key);
        }
        self.tree.remove_node(key);
    }
}
