// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! UV island partitioner.
//!
//! Same flood fill as [`crate::partition`], but neighbours are discovered
//! corner by corner: from each loop `l` of a face, every loop `nl` on the
//! same vertex proposes its face, which is admitted only if the face-level
//! checks pass and `l` and `nl` carry the same UV coordinate. Faces that
//! touch in 3D but not in UV space land in different islands.

use crate::arena::Mesh;
use crate::config::PartitionConfig;
use crate::element_set::ElementSet;
use crate::error::Result;
use crate::keys::*;
use crate::partition::grow_regions;
use crate::predicates::{loops_uv_coincident, FaceAdjacency};

impl ElementSet<FaceKey> {
    /// Splits the set into UV islands on the configured layer.
    ///
    /// Fails only when the configured UV layer cannot be resolved.
    pub fn island(&self, mesh: &Mesh, config: &PartitionConfig) -> Result<Vec<ElementSet<FaceKey>>> {
        let layer = config.resolve_uv_layer(mesh)?;
        Ok(self.island_on(mesh, layer, config))
    }

    /// Splits the set into UV islands on an explicit layer, ignoring
    /// `config.uv_layer`.
    pub fn island_on(
        &self,
        mesh: &Mesh,
        layer: UvLayer,
        config: &PartitionConfig,
    ) -> Vec<ElementSet<FaceKey>> {
        let adjacency = FaceAdjacency::new(mesh, self, config);
        let tolerance = config.uv_tolerance;

        let islands = grow_regions(self.as_slice(), |p, visited, out| {
            for &l in mesh.face_loops(p) {
                let Some(v) = mesh.loop_vert(l) else {
                    continue;
                };
                for &nl in mesh.vertex_loops(v) {
                    let Some(np) = mesh.loop_face(nl) else {
                        continue;
                    };
                    if np == p || visited.is_marked(np) || !adjacency.in_scope(np) {
                        continue;
                    }
                    if !loops_uv_coincident(mesh, layer, l, nl, tolerance) {
                        continue;
                    }
                    if adjacency.admits(p, np, v) {
                        out.push(np);
                    }
                }
            }
        });

        tracing::debug!(
            input = self.len(),
            islands = islands.len(),
            layer = mesh.uv_layer_name(layer).unwrap_or_default(),
            "Grouped uv islands"
        );
        islands
    }
}
