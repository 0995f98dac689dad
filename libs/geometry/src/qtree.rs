//! Quad-trees over axis-aligned boxes.
//!
//! Each entry is stored once, in the deepest node whose box holds it within one quadrant.
//! Entries straddling a split line stay in the node that split.

use std::collections::HashSet;
use std::hash::Hash;

use crate::config::KernelConfig;
use crate::rect::Rect;

/// Nodes this far below the root never split, so boxes stacked on one spot stay bounded.
const MAX_DEPTH: usize = 24;

/// Bit set of the quadrants of `node` that `target` touches.
///
/// Bit 0 is low-x/low-y, bit 1 high-x/low-y, bit 2 low-x/high-y and bit 3 high-x/high-y.
/// Boxes touching a split line select the quadrants on both sides of it.
pub(crate) fn touched_quadrants(node: &Rect, target: &Rect) -> u8 {
    let c = node.center();
    let (cx, cy) = (c.grid_x(), c.grid_y());
    let low_x = target.grid_min_x() <= cx;
    let high_x = target.grid_max_x() >= cx;
    let mut loc = 0;
    if target.grid_min_y() <= cy {
        if low_x {
            loc |= 1 << 0;
        }
        if high_x {
            loc |= 1 << 1;
        }
    }
    if target.grid_max_y() >= cy {
        if low_x {
            loc |= 1 << 2;
        }
        if high_x {
            loc |= 1 << 3;
        }
    }
    loc
}

/// The box of quadrant `i` of `node`, numbered as in [`touched_quadrants`].
pub(crate) fn quadrant_box(node: &Rect, i: usize) -> Rect {
    let c = node.center();
    let (lx, hx) = if i & 1 == 0 {
        (node.grid_min_x(), c.grid_x())
    } else {
        (c.grid_x(), node.grid_max_x())
    };
    let (ly, hy) = if i & 2 == 0 {
        (node.grid_min_y(), c.grid_y())
    } else {
        (c.grid_y(), node.grid_max_y())
    };
    Rect::new(
        crate::point::Point::new(lx, ly),
        crate::point::Point::new(hx, hy),
    )
}

/// A node of a quad-tree holding entries of type `E`, each with its box.
///
/// A node is a leaf holding up to `capacity` entries, or has exactly four children
/// partitioned at the center of its box. Adding an entry to a full leaf splits it and pushes
/// every entry lying in a single quadrant down into that child. Leaves too small to halve, or
/// [`MAX_DEPTH`] below the root, grow instead.
#[derive(Debug, Clone)]
pub(crate) struct QuadNode<E> {
    /// Entries held here: everything, for a leaf, or those straddling a split line.
    entries: Vec<(E, Rect)>,
    children: Option<Box<[QuadNode<E>; 4]>>,
}

impl<E> Default for QuadNode<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            children: None,
        }
    }
}

impl<E> QuadNode<E> {
    /// Adds `entry` with bounds `rect` below this node, whose box is `bounds`.
    ///
    /// Returns `false` if `rect` does not touch `bounds`.
    pub(crate) fn insert(&mut self, bounds: &Rect, entry: E, rect: Rect, capacity: usize) -> bool {
        self.insert_at(bounds, entry, rect, capacity, 0)
    }

    fn insert_at(
        &mut self,
        bounds: &Rect,
        entry: E,
        rect: Rect,
        capacity: usize,
        depth: usize,
    ) -> bool {
        if !bounds.intersects(&rect) {
            return false;
        }
        if self.children.is_none() {
            if self.entries.len() < capacity || !can_split(bounds, depth) {
                self.entries.push((entry, rect));
                return true;
            }
            tracing::trace!(%bounds, depth, entries = self.entries.len(), "splitting quad node");
            let mut children: Box<[QuadNode<E>; 4]> = Box::default();
            let mut kept = Vec::new();
            for (e, r) in self.entries.drain(..) {
                match single_quadrant(bounds, &r) {
                    Some(i) => {
                        children[i].insert_at(&quadrant_box(bounds, i), e, r, capacity, depth + 1);
                    }
                    None => kept.push((e, r)),
                }
            }
            self.entries = kept;
            self.children = Some(children);
        }
        match (single_quadrant(bounds, &rect), self.children.as_mut()) {
            (Some(i), Some(children)) => {
                children[i].insert_at(&quadrant_box(bounds, i), entry, rect, capacity, depth + 1)
            }
            _ => {
                self.entries.push((entry, rect));
                true
            }
        }
    }

    /// Calls `f` on every stored entry whose box touches `query`.
    pub(crate) fn visit(&self, bounds: &Rect, query: &Rect, f: &mut impl FnMut(&E, &Rect)) {
        if !bounds.intersects(query) {
            return;
        }
        for (e, r) in &self.entries {
            if r.intersects(query) {
                f(e, r);
            }
        }
        if let Some(children) = &self.children {
            let loc = touched_quadrants(bounds, query);
            for (i, child) in children.iter().enumerate() {
                if loc >> i & 1 == 1 {
                    child.visit(&quadrant_box(bounds, i), query, f);
                }
            }
        }
    }

    /// Calls `f` on every stored entry.
    pub(crate) fn for_each(&self, f: &mut impl FnMut(&E, &Rect)) {
        for (e, r) in &self.entries {
            f(e, r);
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.for_each(f);
            }
        }
    }

    /// Removes every entry for which `keep` returns `false`, collapsing emptied subtrees.
    pub(crate) fn retain(&mut self, keep: &mut impl FnMut(&E) -> bool) {
        self.entries.retain(|(e, _)| keep(e));
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                child.retain(keep);
            }
            if children.iter().all(QuadNode::is_empty) {
                self.children = None;
            }
        }
    }

    /// Returns `true` if nothing is stored at or below this node.
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.children.is_none()
    }
}

fn can_split(bounds: &Rect, depth: usize) -> bool {
    depth < MAX_DEPTH && bounds.grid_width() >= 2 && bounds.grid_height() >= 2
}

/// The only quadrant of `node` that `target` touches, if there is just one.
fn single_quadrant(node: &Rect, target: &Rect) -> Option<usize> {
    let loc = touched_quadrants(node, target);
    (loc.count_ones() == 1).then(|| loc.trailing_zeros() as usize)
}

/// A quad-tree mapping keys to the boxes they occupy.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// let root = Rect::from_grid(0, 0, 1000, 1000).unwrap();
/// let mut tree = ObjectQTree::new(root, &KernelConfig::default());
/// assert!(tree.insert("a", Rect::from_grid(10, 10, 20, 20).unwrap()));
/// assert!(tree.insert("b", Rect::from_grid(400, 400, 600, 600).unwrap()));
/// assert!(!tree.insert("far", Rect::from_grid(2000, 2000, 2100, 2100).unwrap()));
///
/// let found = tree.find(&Rect::from_grid(0, 0, 500, 500).unwrap());
/// assert_eq!(found.len(), 2);
/// assert!(tree.find(&Rect::from_grid(30, 30, 40, 40).unwrap()).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ObjectQTree<T> {
    bounds: Rect,
    capacity: usize,
    root: QuadNode<T>,
    len: usize,
}

impl<T: Clone + Eq + Hash> ObjectQTree<T> {
    /// Creates an empty tree covering `bounds`.
    ///
    /// Leaves split once they hold more than [`KernelConfig::object_tree_capacity`] entries.
    pub fn new(bounds: Rect, config: &KernelConfig) -> Self {
        Self {
            bounds,
            capacity: config.sanitized().object_tree_capacity,
            root: QuadNode::default(),
            len: 0,
        }
    }

    /// The box covered by the tree.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Adds `key` occupying `rect`.
    ///
    /// Returns `false`, storing nothing, if `rect` does not touch the tree's box.
    pub fn insert(&mut self, key: T, rect: Rect) -> bool {
        let inserted = self.root.insert(&self.bounds, key, rect, self.capacity);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// The keys whose boxes touch `query`, boundary contact included.
    pub fn find(&self, query: &Rect) -> HashSet<T> {
        let mut found = HashSet::new();
        self.root.visit(&self.bounds, query, &mut |key, _| {
            found.insert(key.clone());
        });
        found
    }

    /// The number of successful insertions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use test_log::test;

    use super::*;

    fn random_rect(rng: &mut StdRng, extent: i64, max_size: i64) -> Rect {
        let x = rng.gen_range(-extent..extent);
        let y = rng.gen_range(-extent..extent);
        let w = rng.gen_range(0..=max_size);
        let h = rng.gen_range(0..=max_size);
        Rect::from_grid(x, y, x + w, y + h).unwrap()
    }

    #[test]
    fn quadrants_are_inclusive_at_split_lines() {
        let node = Rect::from_grid(0, 0, 100, 100).unwrap();
        assert_eq!(
            touched_quadrants(&node, &Rect::from_grid(10, 10, 20, 20).unwrap()),
            0b0001
        );
        assert_eq!(
            touched_quadrants(&node, &Rect::from_grid(50, 10, 60, 20).unwrap()),
            0b0011
        );
        assert_eq!(
            touched_quadrants(&node, &Rect::from_grid(50, 50, 50, 50).unwrap()),
            0b1111
        );
        assert_eq!(quadrant_box(&node, 2), Rect::from_grid(0, 50, 50, 100).unwrap());
    }

    #[test]
    fn find_matches_brute_force() {
        let root = Rect::from_grid(-100_000, -100_000, 100_000, 100_000).unwrap();
        for (capacity, count) in [(1, 500), (4, 2_000), (10, 10_000)] {
            let mut rng = StdRng::seed_from_u64(capacity as u64);
            let config = KernelConfig {
                object_tree_capacity: capacity,
                ..KernelConfig::default()
            };
            let mut tree = ObjectQTree::new(root, &config);
            let mut all = Vec::new();
            for key in 0..count {
                let rect = random_rect(&mut rng, 100_000, 4_000);
                assert!(tree.insert(key, rect));
                all.push((key, rect));
            }
            assert_eq!(tree.len(), count);

            for _ in 0..200 {
                let query = random_rect(&mut rng, 100_000, 20_000);
                let expected: HashSet<usize> = all
                    .iter()
                    .filter(|(_, r)| r.intersects(&query))
                    .map(|(k, _)| *k)
                    .collect();
                assert_eq!(tree.find(&query), expected, "capacity {capacity}");
            }
        }
    }

    #[test]
    fn identical_boxes_do_not_split_forever() {
        let root = Rect::from_grid(0, 0, 1 << 40, 1 << 40).unwrap();
        let mut tree = ObjectQTree::new(root, &KernelConfig::default());
        let rect = Rect::from_grid(0, 0, 1 << 40, 1 << 40).unwrap();
        for key in 0..100 {
            assert!(tree.insert(key, rect));
        }
        assert_eq!(tree.find(&Rect::from_grid(5, 5, 5, 5).unwrap()).len(), 100);
    }

    #[test]
    fn clustered_boxes_split_the_root() {
        let root = Rect::from_grid(-100_000, -100_000, 100_000, 100_000).unwrap();
        let config = KernelConfig {
            object_tree_capacity: 4,
            ..KernelConfig::default()
        };
        let mut tree = ObjectQTree::new(root, &config);
        let mut rng = StdRng::seed_from_u64(7);
        let mut all = Vec::new();
        for key in 0..1_000 {
            let x = rng.gen_range(1_000..90_000);
            let y = rng.gen_range(1_000..90_000);
            let rect = Rect::from_grid(x, y, x + 500, y + 500).unwrap();
            assert!(tree.insert(key, rect));
            all.push((key, rect));
        }
        assert!(tree.root.children.is_some());
        assert!(tree.root.entries.is_empty());

        for _ in 0..100 {
            let query = random_rect(&mut rng, 100_000, 20_000);
            let expected: HashSet<usize> = all
                .iter()
                .filter(|(_, r)| r.intersects(&query))
                .map(|(k, _)| *k)
                .collect();
            assert_eq!(tree.find(&query), expected);
        }
    }

    #[test]
    fn retain_collapses_empty_children() {
        let bounds = Rect::from_grid(0, 0, 100, 100).unwrap();
        let mut node = QuadNode::default();
        for i in 0..10 {
            node.insert(&bounds, i, Rect::from_grid(i * 10, 0, i * 10 + 5, 5).unwrap(), 2);
        }
        assert!(node.children.is_some());
        node.retain(&mut |_| false);
        assert!(node.is_empty());
    }
}
