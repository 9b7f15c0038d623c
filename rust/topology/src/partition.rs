// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Region-growing partitioner.
//!
//! One worklist flood fill serves vertex, edge and face sets (and the UV
//! island variant in [`crate::island`]). Seeds are taken in input order;
//! each unvisited seed opens a new group which grows through every admitted
//! neighbour until the worklist is empty. Groups therefore come out in
//! first-encounter order, and with `element = false` they are a disjoint
//! cover of the input set.
//!
//! The expansion order inside a group is an implementation detail; only
//! membership is meaningful.

use std::hash::Hash;

use crate::arena::Mesh;
use crate::config::PartitionConfig;
use crate::element_set::ElementSet;
use crate::keys::*;
use crate::marks::Marks;
use crate::predicates::FaceAdjacency;

/// Flood-fills from every seed in order and returns the groups found.
///
/// `neighbours(current, visited, out)` pushes the admissible neighbours of
/// `current` into `out`; it may consult `visited` to skip work early.
/// Already visited candidates are dropped here regardless.
pub(crate) fn grow_regions<K, F>(seeds: &[K], mut neighbours: F) -> Vec<ElementSet<K>>
where
    K: Copy + Eq + Hash,
    F: FnMut(K, &Marks<K>, &mut Vec<K>),
{
    let mut visited = Marks::new();
    let mut groups = Vec::new();
    let mut candidates = Vec::new();

    for &seed in seeds {
        if !visited.mark(seed) {
            continue;
        }

        let mut group = ElementSet::new();
        let mut stack = vec![seed];

        while let Some(current) = stack.pop() {
            group.insert(current);

            candidates.clear();
            neighbours(current, &visited, &mut candidates);
            for &next in &candidates {
                if visited.mark(next) {
                    stack.push(next);
                }
            }
        }

        tracing::trace!(size = group.len(), "Closed region");
        groups.push(group);
    }

    groups
}

impl ElementSet<VertexKey> {
    /// Splits the set into groups of vertices connected by edges.
    ///
    /// With `config.element` set, growth follows edges into vertices outside
    /// the set. No other switch applies at vertex granularity.
    pub fn group(&self, mesh: &Mesh, config: &PartitionConfig) -> Vec<ElementSet<VertexKey>> {
        let groups = grow_regions(self.as_slice(), |v, visited, out| {
            for &ek in mesh.vertex_edges(v) {
                let Some(nv) = mesh.other_vertex(ek, v) else {
                    continue;
                };
                if visited.is_marked(nv) {
                    continue;
                }
                if config.element || self.contains(nv) {
                    out.push(nv);
                }
            }
        });

        tracing::debug!(input = self.len(), groups = groups.len(), "Grouped vertices");
        groups
    }
}

impl ElementSet<EdgeKey> {
    /// Splits the set into groups of edges connected through shared vertices.
    pub fn group(&self, mesh: &Mesh, config: &PartitionConfig) -> Vec<ElementSet<EdgeKey>> {
        let groups = grow_regions(self.as_slice(), |e, visited, out| {
            let Some((a, b)) = mesh.edge_vertices(e) else {
                return;
            };
            for v in [a, b] {
                for &ne in mesh.vertex_edges(v) {
                    if ne == e || visited.is_marked(ne) {
                        continue;
                    }
                    if config.element || self.contains(ne) {
                        out.push(ne);
                    }
                }
            }
        });

        tracing::debug!(input = self.len(), groups = groups.len(), "Grouped edges");
        groups
    }
}

impl ElementSet<FaceKey> {
    /// Splits the set into connected face regions.
    ///
    /// Faces are neighbours when they share a vertex and pass the material,
    /// seam, sharp and angle checks enabled in `config`. With every check off
    /// this is plain shared-vertex connectivity.
    pub fn group(&self, mesh: &Mesh, config: &PartitionConfig) -> Vec<ElementSet<FaceKey>> {
        let adjacency = FaceAdjacency::new(mesh, self, config);

        let groups = grow_regions(self.as_slice(), |p, visited, out| {
            for v in mesh.face_vertices(p) {
                for np in mesh.vertex_faces(v) {
                    if np == p || visited.is_marked(np) || !adjacency.in_scope(np) {
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
            groups = groups.len(),
            use_seam = config.use_seam,
            use_sharp = config.use_sharp,
            use_material = config.use_material,
            use_angle = config.use_angle,
            "Grouped faces"
        );
        groups
    }
}
