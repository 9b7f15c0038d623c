// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partitioning configuration.
//!
//! One [`PartitionConfig`] value carries every switch the grouping calls
//! recognise. Fields a call does not use are ignored. The value can be
//! built with struct-update syntax or loaded from JSON, where missing
//! fields take their defaults.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::arena::Mesh;
use crate::error::{Error, Result};
use crate::keys::UvLayer;

/// Default per-axis tolerance for UV coincidence.
pub const DEFAULT_UV_TOLERANCE: f64 = 1e-5;

/// Angle value meaning "no angle limit". Any value at or above it disables
/// the dihedral-angle check.
pub const ANGLE_DISABLED: f64 = PI;

/// Switches for region growing and UV island detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Grow into elements outside the input set.
    pub element: bool,
    /// Do not cross seam edges.
    pub use_seam: bool,
    /// Only join faces with the same material index.
    pub use_material: bool,
    /// Do not cross sharp (non-smooth) edges.
    pub use_sharp: bool,
    /// Maximum angle in radians between adjacent face normals.
    pub use_angle: f64,
    /// Named UV channel; `None` selects the active layer.
    pub uv_layer: Option<String>,
    /// Per-axis UV coincidence tolerance.
    pub uv_tolerance: f64,
    /// Skip hidden elements when building sets from the whole mesh.
    pub filter_hidden: bool,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            element: false,
            use_seam: false,
            use_material: false,
            use_sharp: false,
            use_angle: ANGLE_DISABLED,
            uv_layer: None,
            uv_tolerance: DEFAULT_UV_TOLERANCE,
            filter_hidden: true,
        }
    }
}

impl PartitionConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Returns `true` if the dihedral-angle check is active.
    pub fn angle_enabled(&self) -> bool {
        self.use_angle < ANGLE_DISABLED
    }

    /// Returns `true` if faces must be checked across guarded vertices.
    pub fn uses_edge_flags(&self) -> bool {
        self.use_seam || self.use_sharp
    }

    /// Resolves the configured UV layer against a mesh.
    pub fn resolve_uv_layer(&self, mesh: &Mesh) -> Result<UvLayer> {
        mesh.resolve_uv_layer(self.uv_layer.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_everything() {
        let config = PartitionConfig::default();
        assert!(!config.element);
        assert!(!config.angle_enabled());
        assert!(!config.uses_edge_flags());
        assert!(config.filter_hidden);
        assert_eq!(config.uv_tolerance, DEFAULT_UV_TOLERANCE);
    }

    #[test]
    fn angle_at_or_above_pi_is_disabled() {
        let mut config = PartitionConfig {
            use_angle: 4.0,
            ..Default::default()
        };
        assert!(!config.angle_enabled());
        config.use_angle = 0.5;
        assert!(config.angle_enabled());
    }

    #[test]
    fn json_missing_fields_take_defaults() {
        let config = PartitionConfig::from_json(r#"{ "use_seam": true, "uv_layer": "map" }"#)
            .unwrap();
        assert!(config.use_seam);
        assert_eq!(config.uv_layer.as_deref(), Some("map"));
        assert!(!config.angle_enabled());

        let back = PartitionConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn bad_json_is_a_serialization_error() {
        assert!(matches!(
            PartitionConfig::from_json("{ element: yes }"),
            Err(Error::Serialization(_))
        ));
    }
}
