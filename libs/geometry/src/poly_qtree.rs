//! A quad-tree of polygons that merges touching geometry on insertion.

use indexmap::IndexMap;
use itertools::Itertools;

use crate::config::KernelConfig;
use crate::error::{Error, Result};
use crate::merge::GeometryHandler;
use crate::qtree::QuadNode;
use crate::rect::Rect;
use crate::region::Region;
use crate::shape::{Layer, Shape};
use crate::transform::{Transform, Transformation};

#[derive(Debug, Clone)]
struct Entry {
    region: Region,
    /// The shape as added, kept until the entry is merged with another.
    source: Option<Shape>,
}

/// A per-layer quad-tree of disjoint regions.
///
/// Every added shape is unioned with the stored regions it touches, so the regions of a layer
/// never touch one another. Entries that were never merged remember the shape they came from.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// let root = Rect::from_lambda(-100., -100., 100., 100.).unwrap();
/// let mut tree = PolyQTree::new(root, &KernelConfig::default());
/// let layer = Layer::new("metal1");
/// let a = Shape::from_rect(&Rect::from_lambda(0., 0., 10., 10.).unwrap(), AreaFill::Filled);
/// let b = Shape::from_rect(&Rect::from_lambda(5., 5., 15., 15.).unwrap(), AreaFill::Filled);
/// tree.add(&layer, &a).unwrap();
/// tree.add(&layer, &b).unwrap();
///
/// let merged = tree.get_objects(&layer, true, false);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].area(), 175.);
/// ```
#[derive(Debug, Clone)]
pub struct PolyQTree {
    bounds: Rect,
    config: KernelConfig,
    entries: Vec<Option<Entry>>,
    /// Ids of emptied `entries` slots, reused before the vector grows.
    free: Vec<usize>,
    layers: IndexMap<Layer, QuadNode<usize>>,
}

impl PolyQTree {
    /// Creates an empty tree covering `bounds`.
    ///
    /// Leaves split once they hold more than [`KernelConfig::poly_tree_capacity`] entries.
    pub fn new(bounds: Rect, config: &KernelConfig) -> Self {
        Self {
            bounds,
            config: config.sanitized(),
            entries: Vec::new(),
            free: Vec::new(),
            layers: IndexMap::new(),
        }
    }

    /// The box covered by the tree.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The stored regions of `layer`.
    pub fn regions(&self, layer: &Layer) -> Vec<&Region> {
        self.ids(layer)
            .into_iter()
            .filter_map(|id| self.entries[id].as_ref())
            .map(|e| &e.region)
            .collect()
    }

    /// The ids stored under `layer`, each once, in ascending order.
    fn ids(&self, layer: &Layer) -> Vec<usize> {
        let mut ids = Vec::new();
        if let Some(root) = self.layers.get(layer) {
            root.for_each(&mut |&id, _| ids.push(id));
        }
        ids.into_iter().sorted_unstable().dedup().collect()
    }

    fn insert(&mut self, layer: &Layer, mut entry: Entry) -> Result<()> {
        let Some(mut rect) = entry.region.bounds() else {
            return Ok(());
        };
        if !self.bounds.intersects(&rect) {
            return Err(Error::OutsideIndex { bounds: rect });
        }
        let Self {
            bounds,
            config,
            entries,
            free,
            layers,
        } = self;
        let root = layers.entry(layer.clone()).or_default();

        let mut candidates = Vec::new();
        root.visit(bounds, &rect, &mut |&id, _| candidates.push(id));
        let touching: Vec<usize> = candidates
            .into_iter()
            .sorted_unstable()
            .dedup()
            .filter(|&id| {
                entries[id]
                    .as_ref()
                    .is_some_and(|e| e.region.intersects(&entry.region))
            })
            .collect();

        if touching
            .iter()
            .any(|&id| entries[id].as_ref().is_some_and(|e| e.region == entry.region))
        {
            tracing::debug!(%layer, %rect, "repeated polygon");
            return Ok(());
        }

        // Stored regions never touch each other, so one pass collects everything the union
        // can reach.
        if !touching.is_empty() {
            root.retain(&mut |id| !touching.contains(id));
            for id in touching {
                if let Some(old) = entries[id].take() {
                    entry.region.add(&old.region);
                    free.push(id);
                }
            }
            entry.source = None;
            if let Some(merged) = entry.region.bounds() {
                rect = merged;
            }
        }

        let id = match free.pop() {
            Some(id) => {
                entries[id] = Some(entry);
                id
            }
            None => {
                entries.push(Some(entry));
                entries.len() - 1
            }
        };
        root.insert(bounds, id, rect, config.poly_tree_capacity);
        Ok(())
    }
}

impl GeometryHandler for PolyQTree {
    /// Merges the area of `shape` into `layer`.
    ///
    /// Fails with [`Error::OutsideIndex`] if the shape lies entirely outside the tree's box,
    /// and with [`Error::Unsupported`] for shapes without area.
    fn add(&mut self, layer: &Layer, shape: &Shape) -> Result<()> {
        let region = Region::from_shape(shape, &self.config)?;
        self.insert(
            layer,
            Entry {
                region,
                source: Some(shape.clone()),
            },
        )
    }

    /// Merges every region of `other`, transformed, into this tree.
    fn add_all(&mut self, other: &Self, trans: Transformation) -> Result<()> {
        for layer in other.layers.keys() {
            for id in other.ids(layer) {
                let Some(entry) = &other.entries[id] else {
                    continue;
                };
                let entry = Entry {
                    region: entry.region.clone().transform(trans),
                    source: entry.source.clone().map(|s| s.transform(trans)),
                };
                self.insert(layer, entry)?;
            }
        }
        Ok(())
    }

    /// Does nothing: regions are merged as they are added.
    fn post_process(&mut self) {}

    fn layers(&self) -> Vec<Layer> {
        self.layers.keys().cloned().collect()
    }

    /// The regions of `layer`.
    ///
    /// Unmerged entries come back as the shape that was added. With `modified` set, those are
    /// skipped and only merged regions are returned.
    fn get_objects(&self, layer: &Layer, modified: bool, simple: bool) -> Vec<Shape> {
        self.ids(layer)
            .into_iter()
            .filter_map(|id| self.entries[id].as_ref())
            .flat_map(|e| match &e.source {
                Some(_) if modified => Vec::new(),
                Some(shape) => vec![shape.clone()],
                None => e.region.to_shapes(simple),
            })
            .unique()
            .map(|s| s.with_layer(layer.clone()))
            .collect()
    }
}
