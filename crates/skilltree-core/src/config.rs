//! Configuration for resolution thresholds and layout geometry.
//!
//! Load order: `skilltree.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub resolver: ResolverConfig,
    pub layout: LayoutConfig,
}

/// Fuzzy-matching thresholds for the prerequisite resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Absolute edit-distance cap: a fuzzy match within this distance is
    /// always accepted.
    pub max_distance: usize,
    /// Relative acceptance bound: accept when
    /// `distance / (len(raw) + 1) < relative_threshold`. Lets longer
    /// references tolerate proportionally more typos.
    pub relative_threshold: f64,
}

/// Geometry and pass counts for the layered layout engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between consecutive ranks along the primary axis.
    pub rank_separation: f64,
    /// Distance between consecutive nodes within a rank.
    pub node_separation: f64,
    /// Nominal drawn node size. Separations must comfortably exceed this.
    pub node_size: f64,
    /// Number of barycenter sweeps for crossing reduction.
    pub ordering_passes: usize,
    /// Skip crossing reduction entirely above this many nodes.
    pub ordering_node_cap: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_distance: 2,
            relative_threshold: 0.2,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rank_separation: 140.0,
            node_separation: 90.0,
            node_size: 56.0,
            ordering_passes: 4,
            ordering_node_cap: 2000,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl TreeConfig {
    /// Load config from `skilltree.toml` in the project root, with env var
    /// overrides. Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join("skilltree.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("SKILLTREE_MAX_DISTANCE", &mut config.resolver.max_distance);
        env_override(
            "SKILLTREE_RELATIVE_THRESHOLD",
            &mut config.resolver.relative_threshold,
        );
        env_override(
            "SKILLTREE_RANK_SEPARATION",
            &mut config.layout.rank_separation,
        );
        env_override(
            "SKILLTREE_NODE_SEPARATION",
            &mut config.layout.node_separation,
        );
        env_override(
            "SKILLTREE_ORDERING_PASSES",
            &mut config.layout.ordering_passes,
        );
        env_override(
            "SKILLTREE_ORDERING_NODE_CAP",
            &mut config.layout.ordering_node_cap,
        );

        config.validate()?;
        Ok(config)
    }

    /// Reject inconsistent thresholds and geometry.
    pub fn validate(&self) -> Result<()> {
        if self.resolver.relative_threshold <= 0.0 || self.resolver.relative_threshold >= 1.0 {
            anyhow::bail!(
                "relative_threshold ({}) must lie strictly between 0 and 1",
                self.resolver.relative_threshold,
            );
        }
        if self.layout.rank_separation <= self.layout.node_size {
            anyhow::bail!(
                "rank_separation ({}) must exceed node_size ({})",
                self.layout.rank_separation,
                self.layout.node_size,
            );
        }
        if self.layout.node_separation <= self.layout.node_size {
            anyhow::bail!(
                "node_separation ({}) must exceed node_size ({})",
                self.layout.node_separation,
                self.layout.node_size,
            );
        }
        Ok(())
    }
}
