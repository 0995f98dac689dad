//! Tuning knobs for the spatial indices and the region merger.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How [`RegionMerge`](crate::merge::RegionMerge) splits merged geometry into regions.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// Sweep along X only.
    ///
    /// Produces coarser regions that may group geometry separated in Y.
    OneFrontier,
    /// Sweep along X, then re-sweep every closed X group along Y.
    #[default]
    TwoFrontier,
}

/// Kernel configuration.
///
/// # Examples
///
/// ```
/// # use geometry_kernel::prelude::*;
/// let config = KernelConfig::from_toml_str("sweep_mode = \"one_frontier\"").unwrap();
/// assert_eq!(config.sweep_mode, SweepMode::OneFrontier);
/// assert_eq!(config.poly_tree_capacity, 4);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// The region sweep mode.
    pub sweep_mode: SweepMode,
    /// Leaf capacity of an [`ObjectQTree`](crate::qtree::ObjectQTree) node before it splits.
    pub object_tree_capacity: usize,
    /// Leaf capacity of a [`PolyQTree`](crate::poly_qtree::PolyQTree) node before it splits.
    pub poly_tree_capacity: usize,
    /// Number of straight segments used when a circle enters a boolean region.
    pub circle_segments: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            sweep_mode: SweepMode::default(),
            object_tree_capacity: 10,
            poly_tree_capacity: 4,
            circle_segments: 32,
        }
    }
}

impl KernelConfig {
    /// Parses a configuration from TOML text.
    ///
    /// Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        Ok(config.sanitized())
    }

    /// Returns a copy with zero capacities and segment counts raised to their minimums.
    pub(crate) fn sanitized(mut self) -> Self {
        self.object_tree_capacity = self.object_tree_capacity.max(1);
        self.poly_tree_capacity = self.poly_tree_capacity.max(1);
        self.circle_segments = self.circle_segments.max(3);
        self
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = KernelConfig::from_toml_str("").unwrap();
        assert_eq!(config, KernelConfig::default());
        assert_eq!(config.sweep_mode, SweepMode::TwoFrontier);
        assert_eq!(config.object_tree_capacity, 10);
    }

    #[test]
    fn toml_overrides_individual_keys() {
        let config = KernelConfig::from_toml_str(
            "object_tree_capacity = 3\ncircle_segments = 0\nsweep_mode = \"one_frontier\"",
        )
        .unwrap();
        assert_eq!(config.object_tree_capacity, 3);
        assert_eq!(config.circle_segments, 3);
        assert_eq!(config.sweep_mode, SweepMode::OneFrontier);
        assert_eq!(config.poly_tree_capacity, 4);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = KernelConfig::from_toml_str("sweep_mode = \"sideways\"").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }
}
