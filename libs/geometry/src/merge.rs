//! Merging shapes into disjoint regions per layer.

use indexmap::IndexMap;
use itertools::Itertools;

use crate::config::{KernelConfig, SweepMode};
use crate::error::Result;
use crate::rect::Rect;
use crate::region::Region;
use crate::shape::{Layer, Shape};
use crate::transform::{Transform, Transformation};

/// A sink that accumulates shapes per layer and hands back merged geometry.
pub trait GeometryHandler {
    /// Adds `shape` to `layer`.
    fn add(&mut self, layer: &Layer, shape: &Shape) -> Result<()>;

    /// Adds every region of `other`, moved by `trans`.
    fn add_all(&mut self, other: &Self, trans: Transformation) -> Result<()>
    where
        Self: Sized;

    /// Finishes any merging deferred by [`GeometryHandler::add`].
    fn post_process(&mut self);

    /// The layers holding geometry, in first-insertion order.
    fn layers(&self) -> Vec<Layer>;

    /// The merged geometry of `layer` as filled shapes tagged with the layer.
    ///
    /// With `modified` set, handlers that track it return only geometry that differs from what
    /// was added. With `simple` set, holes come back as separate loops rather than being
    /// nested into their outlines.
    fn get_objects(&self, layer: &Layer, modified: bool, simple: bool) -> Vec<Shape>;
}

/// Unions shapes with a sweep along X and, optionally, Y.
///
/// Shapes are queued by [`GeometryHandler::add`] and merged by
/// [`GeometryHandler::post_process`]. Each resulting region is a group of geometry whose
/// extents overlap or touch along the sweep axes; in [`SweepMode::OneFrontier`] a region may
/// hold several polygons separated in Y.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// let mut merge = RegionMerge::new(&KernelConfig::default());
/// let layer = Layer::new("metal1");
/// for (lx, hx) in [(0., 10.), (10., 20.)] {
///     let rect = Rect::from_lambda(lx, 0., hx, 10.).unwrap();
///     merge.add(&layer, &Shape::from_rect(&rect, AreaFill::Filled)).unwrap();
/// }
/// merge.post_process();
///
/// let regions = merge.regions(&layer);
/// assert_eq!(regions.len(), 1);
/// assert_eq!(regions[0].area(), 200.);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegionMerge {
    config: KernelConfig,
    pending: IndexMap<Layer, Vec<Region>>,
    merged: IndexMap<Layer, Vec<Region>>,
}

/// Groups regions whose spans along one axis overlap or touch, unioning each group.
///
/// `span` gives the extent of a bounding box along the sweep axis.
fn sweep(regions: Vec<Region>, span: impl Fn(&Rect) -> (i64, i64)) -> Vec<Region> {
    let mut keyed: Vec<((i64, i64), Region)> = regions
        .into_iter()
        .filter_map(|r| Some((span(&r.bounds()?), r)))
        .collect();
    keyed.sort_by_key(|((min, _), _)| *min);

    let mut closed = Vec::new();
    let mut frontier: Option<(Region, i64)> = None;
    for ((min, max), region) in keyed {
        if let Some((open, end)) = frontier.as_mut() {
            if min <= *end {
                open.add(&region);
                *end = (*end).max(max);
                continue;
            }
        }
        if let Some((done, end)) = frontier.replace((region, max)) {
            tracing::debug!(end, polygons = done.polygon_count(), "closing frontier");
            closed.push(done);
        }
    }
    closed.extend(frontier.map(|(done, _)| done));
    closed
}

/// Splits a merged group into maximal groups that are disjoint along Y.
fn sweep_y_frontier(group: Region) -> Vec<Region> {
    if group.polygon_count() < 2 {
        return vec![group];
    }
    sweep(group.split(), |b| (b.grid_min_y(), b.grid_max_y()))
}

impl RegionMerge {
    /// Creates an empty merger.
    pub fn new(config: &KernelConfig) -> Self {
        Self {
            config: config.sanitized(),
            ..Default::default()
        }
    }

    /// The merged regions of `layer` as of the last [`GeometryHandler::post_process`].
    pub fn regions(&self, layer: &Layer) -> &[Region] {
        self.merged.get(layer).map(Vec::as_slice).unwrap_or_default()
    }

    /// Unions `region` with every merged region of `layer` it touches.
    fn absorb(&mut self, layer: &Layer, mut region: Region) {
        let regions = self.merged.entry(layer.clone()).or_default();
        let (colliding, rest): (Vec<Region>, Vec<Region>) = std::mem::take(regions)
            .into_iter()
            .partition(|r| r.intersects(&region));
        for r in &colliding {
            region.add(r);
        }
        *regions = rest;
        regions.push(region);
    }
}

impl GeometryHandler for RegionMerge {
    /// Queues the area of `shape`.
    ///
    /// Shapes without area are rejected with [`Error::Unsupported`](crate::error::Error::Unsupported).
    fn add(&mut self, layer: &Layer, shape: &Shape) -> Result<()> {
        let region = Region::from_shape(shape, &self.config)?;
        if !region.is_empty() {
            self.pending.entry(layer.clone()).or_default().push(region);
        }
        Ok(())
    }

    /// Adds the merged regions of `other`, transformed, and queues its pending shapes.
    ///
    /// Each incoming region is unioned with the regions it touches. The layer is not swept
    /// again, so regions that a sweep would group (for example geometry nested in a notch of
    /// another polygon without touching it) stay apart until the next
    /// [`GeometryHandler::post_process`].
    fn add_all(&mut self, other: &Self, trans: Transformation) -> Result<()> {
        for (layer, regions) in &other.merged {
            for region in regions {
                self.absorb(layer, region.clone().transform(trans));
            }
        }
        for (layer, regions) in &other.pending {
            self.pending
                .entry(layer.clone())
                .or_default()
                .extend(regions.iter().map(|r| r.clone().transform(trans)));
        }
        Ok(())
    }

    /// Sweeps every layer, including regions merged earlier, into disjoint regions.
    fn post_process(&mut self) {
        let mut merged = IndexMap::new();
        for layer in self.layers() {
            let mut regions = self.merged.swap_remove(&layer).unwrap_or_default();
            regions.extend(self.pending.swap_remove(&layer).unwrap_or_default());
            let input = regions.len();

            let mut out = sweep(regions, |b| (b.grid_min_x(), b.grid_max_x()));
            if self.config.sweep_mode == SweepMode::TwoFrontier {
                out = out.into_iter().flat_map(sweep_y_frontier).collect();
            }
            tracing::debug!(%layer, input, output = out.len(), "merged layer");
            merged.insert(layer, out);
        }
        self.merged = merged;
    }

    fn layers(&self) -> Vec<Layer> {
        self.merged
            .keys()
            .chain(self.pending.keys())
            .unique()
            .cloned()
            .collect()
    }

    /// Every boundary of the merged regions of `layer`.
    ///
    /// All merged geometry is new, so `modified` has no effect.
    fn get_objects(&self, layer: &Layer, _modified: bool, simple: bool) -> Vec<Shape> {
        self.regions(layer)
            .iter()
            .flat_map(|r| r.to_shapes(simple))
            .unique()
            .map(|s| s.with_layer(layer.clone()))
            .collect()
    }
}
