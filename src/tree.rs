//! A generic intrusive red-black tree with O(1) in-order neighbor links.
//!
//! Both the beachline ([`crate::beachline`]) and the circle-event queue
//! ([`crate::event`]) need the same access pattern: locate a position by
//! structural descent, walk to the predecessor/successor in O(1), and
//! insert/remove in O(log n). This module provides that structure once,
//! generic over the payload `T`, rather than duplicating it.
//!
//! Nodes live in a [`slotmap::SlotMap`] rather than behind raw pointers or
//! `Rc`/`RefCell`: a [`NodeKey`] is a generation-checked handle, so a
//! dangling cross-reference (an arc's stale circle event, say) is simply a
//! key whose generation no longer matches rather than a pointer that must
//! never be dereferenced. Every operation below is a direct translation of
//! the classic insertion/deletion fixups (grounded on
//! `original_source/pkg/voronoi/rbt.go`), with raw-pointer mutation replaced
//! by keyed slotmap indexing.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct NodeKey;
}

struct Node<T> {
    parent: Option<NodeKey>,
    left: Option<NodeKey>,
    right: Option<NodeKey>,
    previous: Option<NodeKey>,
    next: Option<NodeKey>,
    red: bool,
    value: T,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node {
            parent: None,
            left: None,
            right: None,
            previous: None,
            next: None,
            red: true,
            value,
        }
    }
}

pub struct Tree<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    root: Option<NodeKey>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Tree {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    pub fn get(&self, key: NodeKey) -> &T {
        &self.nodes[key].value
    }

    pub fn get_mut(&mut self, key: NodeKey) -> &mut T {
        &mut self.nodes[key].value
    }

    pub fn prev(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes[key].previous
    }

    pub fn next(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes[key].next
    }

    pub fn left(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes[key].left
    }

    pub fn right(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes[key].right
    }

    /// Leftmost node of the subtree rooted at `key`.
    fn leftmost(&self, mut key: NodeKey) -> NodeKey {
        while let Some(l) = self.nodes[key].left {
            key = l;
        }
        key
    }

    /// Leftmost node of the whole tree, i.e. the in-order first element.
    pub fn first(&self) -> Option<NodeKey> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Inserts `value` as the in-order successor of `pred` (or as the
    /// first element if `pred` is `None`).
    pub fn insert_successor(&mut self, pred: Option<NodeKey>, value: T) -> NodeKey {
        let successor = self.nodes.insert(Node::new(value));
        let mut parent;

        if let Some(pred) = pred {
            let mut node = pred;
            self.nodes[successor].previous = Some(node);
            self.nodes[successor].next = self.nodes[node].next;
            if let Some(n) = self.nodes[node].next {
                self.nodes[n].previous = Some(successor);
            }
            self.nodes[node].next = Some(successor);
            if let Some(r) = self.nodes[node].right {
                node = self.leftmost(r);
                self.nodes[node].left = Some(successor);
            } else {
                self.nodes[node].right = Some(successor);
            }
            parent = Some(node);
        } else if let Some(root) = self.root {
            let node = self.leftmost(root);
            self.nodes[successor].previous = None;
            self.nodes[successor].next = Some(node);
            self.nodes[node].previous = Some(successor);
            self.nodes[node].left = Some(successor);
            parent = Some(node);
        } else {
            self.nodes[successor].previous = None;
            self.nodes[successor].next = None;
            self.root = Some(successor);
            parent = None;
        }

        self.nodes[successor].left = None;
        self.nodes[successor].right = None;
        self.nodes[successor].parent = parent;
        self.nodes[successor].red = true;

        let mut node = successor;
        while let Some(p) = parent {
            if !self.nodes[p].red {
                break;
            }
            let grandpa = self.nodes[p]
                .parent
                .expect("a red node always has a black (non-root) grandparent");
            if Some(p) == self.nodes[grandpa].left {
                let uncle = self.nodes[grandpa].right;
                if uncle.map_or(false, |u| self.nodes[u].red) {
                    let uncle = uncle.unwrap();
                    self.nodes[p].red = false;
                    self.nodes[uncle].red = false;
                    self.nodes[grandpa].red = true;
                    node = grandpa;
                } else {
                    let mut p = p;
                    if Some(node) == self.nodes[p].right {
                        self.rotate_left(p);
                        node = p;
                        p = self.nodes[node].parent.unwrap();
                    }
                    self.nodes[p].red = false;
                    self.nodes[grandpa].red = true;
                    self.rotate_right(grandpa);
                }
            } else {
                let uncle = self.nodes[grandpa].left;
                if uncle.map_or(false, |u| self.nodes[u].red) {
                    let uncle = uncle.unwrap();
                    self.nodes[p].red = false;
                    self.nodes[uncle].red = false;
                    self.nodes[grandpa].red = true;
                    node = grandpa;
                } else {
                    let mut p = p;
                    if Some(node) == self.nodes[p].left {
                        self.rotate_right(p);
                        node = p;
                        p = self.nodes[node].parent.unwrap();
                    }
                    self.nodes[p].red = false;
                    self.nodes[grandpa].red = true;
                    self.rotate_left(grandpa);
                }
            }
            parent = self.nodes[node].parent;
        }
        if let Some(root) = self.root {
            self.nodes[root].red = false;
        }
        successor
    }

    /// Removes `key` from the tree, relinking `previous`/`next` and
    /// rebalancing the red-black structure. Returns the removed value.
    pub fn remove_node(&mut self, key: NodeKey) -> T {
        if let Some(n) = self.nodes[key].next {
            self.nodes[n].previous = self.nodes[key].previous;
        }
        if let Some(p) = self.nodes[key].previous {
            self.nodes[p].next = self.nodes[key].next;
        }
        self.nodes[key].next = None;
        self.nodes[key].previous = None;

        let mut parent = self.nodes[key].parent;
        let left = self.nodes[key].left;
        let right = self.nodes[key].right;
        let mut next = if left.is_none() {
            right
        } else if right.is_none() {
            left
        } else {
            Some(self.leftmost(right.unwrap()))
        };

        if let Some(p) = parent {
            if self.nodes[p].left == Some(key) {
                self.nodes[p].left = next;
            } else {
                self.nodes[p].right = next;
            }
        } else {
            self.root = next;
        }

        let is_red;
        // `node` tracks the node whose color/position replaces `key`'s, in
        // the same sense the original algorithm reassigns its local
        // `node` variable during the splice.
        let mut node;
        if left.is_some() && right.is_some() {
            let next_key = next.unwrap();
            is_red = self.nodes[next_key].red;
            self.nodes[next_key].red = self.nodes[key].red;
            self.nodes[next_key].left = left;
            self.nodes[left.unwrap()].parent = Some(next_key);
            if Some(next_key) != right {
                parent = self.nodes[next_key].parent;
                self.nodes[next_key].parent = self.nodes[key].parent;
                node = self.nodes[next_key].right;
                self.nodes[parent.unwrap()].left = node;
                self.nodes[next_key].right = right;
                self.nodes[right.unwrap()].parent = Some(next_key);
            } else {
                self.nodes[next_key].parent = parent;
                parent = Some(next_key);
                node = self.nodes[next_key].right;
            }
        } else {
            is_red = self.nodes[key].red;
            node = next;
        }

        if let Some(n) = node {
            self.nodes[n].parent = parent;
        }

        if !is_red {
            if node.map_or(false, |n| self.nodes[n].red) {
                self.nodes[node.unwrap()].red = false;
            } else {
                self.fixup_after_remove(node, parent);
            }
        }

        self.nodes.remove(key).expect("key was live on entry").value
    }

    fn fixup_after_remove(&mut self, mut node: Option<NodeKey>, mut parent: Option<NodeKey>) {
        loop {
            if node == self.root {
                break;
            }
            let p = parent.expect("non-root node always has a parent during deletion fixup");
            if node == self.nodes[p].left {
                let mut sibling = self.nodes[p]
                    .right
                    .expect("sibling of a black-height-deficient node is never null");
                if self.nodes[sibling].red {
                    self.nodes[sibling].red = false;
                    self.nodes[p].red = true;
                    self.rotate_left(p);
                    sibling = self.nodes[p].right.unwrap();
                }
                let sibling_left_red = self.nodes[sibling].left.map_or(false, |l| self.nodes[l].red);
                let sibling_right_red =
                    self.nodes[sibling].right.map_or(false, |r| self.nodes[r].red);
                if sibling_left_red || sibling_right_red {
                    if !self.nodes[sibling].right.map_or(false, |r| self.nodes[r].red) {
                        let sl = self.nodes[sibling].left.unwrap();
                        self.nodes[sl].red = false;
                        self.nodes[sibling].red = true;
                        self.rotate_right(sibling);
                        sibling = self.nodes[p].right.unwrap();
                    }
                    self.nodes[sibling].red = self.nodes[p].red;
                    self.nodes[p].red = false;
                    let sr = self.nodes[sibling].right.unwrap();
                    self.nodes[sr].red = false;
                    self.rotate_left(p);
                    node = self.root;
                    break;
                }
                self.nodes[sibling].red = true;
            } else {
                let mut sibling = self.nodes[p]
                    .left
                    .expect("sibling of a black-height-deficient node is never null");
                if self.nodes[sibling].red {
                    self.nodes[sibling].red = false;
                    self.nodes[p].red = true;
                    self.rotate_right(p);
                    sibling = self.nodes[p].left.unwrap();
                }
                let sibling_left_red = self.nodes[sibling].left.map_or(false, |l| self.nodes[l].red);
                let sibling_right_red =
                    self.nodes[sibling].right.map_or(false, |r| self.nodes[r].red);
                if sibling_left_red || sibling_right_red {
                    if !self.nodes[sibling].left.map_or(false, |l| self.nodes[l].red) {
                        let sr = self.nodes[sibling].right.unwrap();
                        self.nodes[sr].red = false;
                        self.nodes[sibling].red = true;
                        self.rotate_left(sibling);
                        sibling = self.nodes[p].left.unwrap();
                    }
                    self.nodes[sibling].red = self.nodes[p].red;
                    self.nodes[p].red = false;
                    let sl = self.nodes[sibling].left.unwrap();
                    self.nodes[sl].red = false;
                    self.rotate_right(p);
                    node = self.root;
                    break;
                }
                self.nodes[sibling].red = true;
            }
            node = Some(p);
            parent = self.nodes[p].parent;
            if node.map_or(false, |n| self.nodes[n].red) {
                break;
            }
        }
        if let Some(n) = node {
            self.nodes[n].red = false;
        }
    }

    fn rotate_left(&mut self, node: NodeKey) {
        let q = self.nodes[node].right.expect("rotate_left requires a right child");
        let parent = self.nodes[node].parent;
        if let Some(p) = parent {
            if self.nodes[p].left == Some(node) {
                self.nodes[p].left = Some(q);
            } else {
                self.nodes[p].right = Some(q);
            }
        } else {
            self.root = Some(q);
        }
        self.nodes[q].parent = parent;
        self.nodes[node].parent = Some(q);
        self.nodes[node].right = self.nodes[q].left;
        if let Some(r) = self.nodes[node].right {
            self.nodes[r].parent = Some(node);
        }
        self.nodes[q].left = Some(node);
    }

    fn rotate_right(&mut self, node: NodeKey) {
        let q = self.nodes[node].left.expect("rotate_right requires a left child");
        let parent = self.nodes[node].parent;
        if let Some(p) = parent {
            if self.nodes[p].left == Some(node) {
                self.nodes[p].left = Some(q);
            } else {
                self.nodes[p].right = Some(q);
            }
        } else {
            self.root = Some(q);
        }
        self.nodes[q].parent = parent;
        self.nodes[node].parent = Some(q);
        self.nodes[node].left = self.nodes[q].right;
        if let Some(l) = self.nodes[node].left {
            self.nodes[l].parent = Some(node);
        }
        self.nodes[q].right = Some(node);
    }
}
