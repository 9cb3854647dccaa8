// Data-driven path builder configuration.
//
// Every distance, weight and capacity the builder uses lives in `NavConfig`,
// loadable from JSON. The algorithm modules never hard-code magic numbers;
// they read from the config passed into the build. Defaults reproduce the
// tuning the game's runtime navigator was written against.
//
// Capacities (`max_nodes`, `max_edges`, `max_edges_per_node`) must match what
// the consumer of the graph can hold. They are read once when a build starts
// and never change while it runs.
//
// See also: `builder.rs` which validates the config before building,
// `oracle.rs` for `SlopeLimit`, the default walkability predicate built from
// `walkable_min_normal_y`.

use crate::error::{NavError, Result};
use crate::oracle::SlopeLimit;
use serde::{Deserialize, Serialize};

/// All tunable path building parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Height of a pin above the surface it stands on. Also the inset of
    /// edge pins from the surface corners.
    pub pin_base: f32,
    /// Distance along the surface tangent, past a pin, where the fall probe
    /// starts.
    pub pin_fall_offset: f32,
    /// Length of the downward fall probe.
    pub fall_max_len: f32,
    /// Pins closer than this are merged into one.
    pub pin_same: f32,
    /// Length of the downward ground probe used while testing walk links.
    pub walk_height: f32,
    /// Maximum spacing of ground probes along a walk link.
    pub walk_step: f32,
    /// Maximum horizontal reach of a jump.
    pub max_jump_x: f32,
    /// Multiplier applied to the Manhattan length of a jump to get its cost.
    pub jump_weight: f32,
    /// Clearance ceiling reported for walk edges with nothing overhead.
    pub max_hull_height: f32,
    /// Surfaces whose outward normal has at least this Y component are
    /// walkable under the default predicate.
    pub walkable_min_normal_y: f32,
    /// Node capacity of the committed graph.
    pub max_nodes: usize,
    /// Edge capacity of the committed graph.
    pub max_edges: usize,
    /// Outgoing edge slots per node.
    pub max_edges_per_node: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            pin_base: 0.6,
            pin_fall_offset: 3.0,
            fall_max_len: 64.0,
            pin_same: 1.5,
            walk_height: 1.2,
            walk_step: 2.0,
            max_jump_x: 16.0,
            jump_weight: 1.6,
            max_hull_height: 64.0,
            walkable_min_normal_y: 0.7,
            max_nodes: 4096,
            max_edges: 8192,
            max_edges_per_node: 4,
        }
    }
}

impl NavConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the builder cannot run with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("pin_base", self.pin_base),
            ("walk_step", self.walk_step),
            ("walk_height", self.walk_height),
            ("fall_max_len", self.fall_max_len),
            ("max_hull_height", self.max_hull_height),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(NavError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let non_negative = [
            ("pin_same", self.pin_same),
            ("pin_fall_offset", self.pin_fall_offset),
            ("max_jump_x", self.max_jump_x),
            ("jump_weight", self.jump_weight),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(NavError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        if self.walkable_min_normal_y.is_nan() {
            return Err(NavError::InvalidConfig(
                "walkable_min_normal_y must be a number".into(),
            ));
        }
        if self.max_edges_per_node == 0 {
            return Err(NavError::InvalidConfig(
                "max_edges_per_node must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The walkability predicate implied by `walkable_min_normal_y`.
    pub fn slope_limit(&self) -> SlopeLimit {
        SlopeLimit {
            min_normal_y: self.walkable_min_normal_y,
        }
    }
}
