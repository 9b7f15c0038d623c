// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adjacency predicates.
//!
//! Pure answers to "may region growth step from face `p` to face `np`
//! through vertex `v`" under a [`PartitionConfig`], plus UV coincidence.
//! Every check fails closed: a missing shared edge or an undefined normal
//! means "not adjacent", never an error.

use nalgebra::Point2;

use crate::arena::Mesh;
use crate::config::PartitionConfig;
use crate::element_set::ElementSet;
use crate::keys::*;
use crate::marks::Marks;

/// Returns `true` if two UV coordinates match within `tolerance` on both axes.
///
/// Symmetric in its arguments and reflexive for finite coordinates.
pub fn uv_coincident(a: Point2<f64>, b: Point2<f64>, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}

/// Compares the UVs of two loops on a layer. Missing data never matches.
pub fn loops_uv_coincident(
    mesh: &Mesh,
    layer: UvLayer,
    a: LoopKey,
    b: LoopKey,
    tolerance: f64,
) -> bool {
    match (mesh.loop_uv(layer, a), mesh.loop_uv(layer, b)) {
        (Some(ua), Some(ub)) => uv_coincident(ua, ub, tolerance),
        _ => false,
    }
}

/// Collects the vertices of `faces` that touch a blocking edge: a seam edge
/// when `use_seam` is set, a non-smooth edge when `use_sharp` is set.
///
/// Faces meeting at a guarded vertex are only adjacent through a shared
/// edge that passes the edge checks.
pub fn guarded_vertices(
    mesh: &Mesh,
    faces: &ElementSet<FaceKey>,
    config: &PartitionConfig,
) -> Marks<VertexKey> {
    let mut guarded = Marks::new();
    if !config.uses_edge_flags() {
        return guarded;
    }

    for face in faces {
        for ek in mesh.face_edges(face) {
            let Some(edge) = mesh.edge(ek) else {
                continue;
            };
            let blocking = (config.use_seam && edge.seam) || (config.use_sharp && !edge.smooth);
            if blocking {
                guarded.mark(edge.verts[0]);
                guarded.mark(edge.verts[1]);
            }
        }
    }
    guarded
}

/// Face-to-face adjacency under one configuration.
pub struct FaceAdjacency<'a> {
    mesh: &'a Mesh,
    config: &'a PartitionConfig,
    members: &'a ElementSet<FaceKey>,
    guarded: Marks<VertexKey>,
}

impl<'a> FaceAdjacency<'a> {
    /// Prepares the predicate for growing regions inside `members`.
    pub fn new(mesh: &'a Mesh, members: &'a ElementSet<FaceKey>, config: &'a PartitionConfig) -> Self {
        Self {
            mesh,
            config,
            members,
            guarded: guarded_vertices(mesh, members, config),
        }
    }

    /// Returns `true` if `v` touches a blocking edge of the input faces.
    pub fn is_guarded(&self, v: VertexKey) -> bool {
        self.guarded.is_marked(v)
    }

    /// Scope rule: outside faces are only candidates when `element` is set.
    pub fn in_scope(&self, face: FaceKey) -> bool {
        self.config.element || self.members.contains(face)
    }

    /// Checks material, seam, sharp and angle constraints between `p` and
    /// `np`, which meet at vertex `via`.
    pub fn admits(&self, p: FaceKey, np: FaceKey, via: VertexKey) -> bool {
        let config = self.config;

        if config.use_material {
            let material = |f: FaceKey| self.mesh.face(f).map(|d| d.material_index);
            if material(p) != material(np) {
                return false;
            }
        }

        if config.uses_edge_flags() && self.is_guarded(via) {
            let Some(edge) = self.mesh.shared_edge(p, np).and_then(|ek| self.mesh.edge(ek)) else {
                return false;
            };
            if config.use_seam && edge.seam {
                return false;
            }
            if config.use_sharp && !edge.smooth {
                return false;
            }
        }

        if config.angle_enabled() {
            match self.mesh.face_normal_angle(p, np) {
                Some(angle) if angle < config.use_angle => {}
                _ => return false,
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::make_grid;

    #[test]
    fn uv_coincidence_is_symmetric_and_reflexive() {
        let a = Point2::new(0.25, 0.5);
        let b = Point2::new(0.25 + 5e-6, 0.5 - 5e-6);
        let c = Point2::new(0.25, 0.6);

        assert!(uv_coincident(a, a, 1e-5));
        assert!(uv_coincident(a, b, 1e-5));
        assert_eq!(uv_coincident(a, b, 1e-5), uv_coincident(b, a, 1e-5));
        assert!(!uv_coincident(a, c, 1e-5));
        assert_eq!(uv_coincident(a, c, 1e-5), uv_coincident(c, a, 1e-5));
    }

    #[test]
    fn uv_axes_are_checked_independently() {
        let a = Point2::new(0.0, 0.0);
        assert!(!uv_coincident(a, Point2::new(0.0, 1e-3), 1e-5));
        assert!(!uv_coincident(a, Point2::new(1e-3, 0.0), 1e-5));
    }

    #[test]
    fn seam_blocks_shared_edge() {
        let mut mesh = Mesh::new();
        let (_, faces) = make_grid(&mut mesh, 2, 1).unwrap();
        let edge = mesh.shared_edge(faces[0], faces[1]).unwrap();
        mesh.set_seam(edge, true).unwrap();
        let (v, _) = mesh.edge_vertices(edge).unwrap();

        let members = ElementSet::from_keys(faces.iter().copied());
        let config = PartitionConfig {
            use_seam: true,
            ..Default::default()
        };
        let adjacency = FaceAdjacency::new(&mesh, &members, &config);
        assert!(adjacency.is_guarded(v));
        assert!(!adjacency.admits(faces[0], faces[1], v));

        let plain = PartitionConfig::default();
        let adjacency = FaceAdjacency::new(&mesh, &members, &plain);
        assert!(adjacency.admits(faces[0], faces[1], v));
    }

    #[test]
    fn guarded_vertex_needs_a_shared_edge() {
        let mut mesh = Mesh::new();
        let (verts, faces) = make_grid(&mut mesh, 2, 2).unwrap();
        let center = verts[4];
        let seam = mesh.edge_from_endpoints(verts[1], center).unwrap();
        mesh.set_seam(seam, true).unwrap();

        let members = ElementSet::from_keys(faces.iter().copied());
        let config = PartitionConfig {
            use_seam: true,
            ..Default::default()
        };
        let adjacency = FaceAdjacency::new(&mesh, &members, &config);
        // Diagonal faces meet only at the guarded center vertex.
        assert!(!adjacency.admits(faces[0], faces[3], center));
        // Faces across a plain edge stay adjacent.
        assert!(adjacency.admits(faces[0], faces[2], center));
    }

    #[test]
    fn sharp_uses_smooth_flag() {
        let mut mesh = Mesh::new();
        let (_, faces) = make_grid(&mut mesh, 2, 1).unwrap();
        let edge = mesh.shared_edge(faces[0], faces[1]).unwrap();
        mesh.set_smooth(edge, false).unwrap();
        let (v, _) = mesh.edge_vertices(edge).unwrap();

        let members = ElementSet::from_keys(faces.iter().copied());
        let config = PartitionConfig {
            use_sharp: true,
            ..Default::default()
        };
        assert!(!FaceAdjacency::new(&mesh, &members, &config).admits(faces[0], faces[1], v));
    }

    #[test]
    fn material_must_match() {
        let mut mesh = Mesh::new();
        let (verts, faces) = make_grid(&mut mesh, 2, 1).unwrap();
        mesh.set_material(faces[1], 2).unwrap();

        let members = ElementSet::from_keys(faces.iter().copied());
        let config = PartitionConfig {
            use_material: true,
            ..Default::default()
        };
        let adjacency = FaceAdjacency::new(&mesh, &members, &config);
        assert!(!adjacency.admits(faces[0], faces[1], verts[1]));
    }

    #[test]
    fn degenerate_normal_fails_angle_check() {
        let mut mesh = Mesh::new();
        let (verts, faces) = make_grid(&mut mesh, 1, 1).unwrap();
        let far = mesh.add_vertex(2.0, 0.0, 0.0);
        let mid = mesh.add_vertex(1.5, 0.0, 0.0);
        let sliver = mesh.add_face(&[verts[1], mid, far]).unwrap();

        let members = ElementSet::from_keys([faces[0], sliver]);
        let config = PartitionConfig {
            use_angle: 0.5,
            ..Default::default()
        };
        let adjacency = FaceAdjacency::new(&mesh, &members, &config);
        assert!(!adjacency.admits(faces[0], sliver, verts[1]));
    }

    #[test]
    fn scope_follows_element_flag() {
        let mut mesh = Mesh::new();
        let (_, faces) = make_grid(&mut mesh, 2, 1).unwrap();
        let members = ElementSet::from_keys([faces[0]]);

        let local = PartitionConfig::default();
        assert!(!FaceAdjacency::new(&mesh, &members, &local).in_scope(faces[1]));

        let grow = PartitionConfig {
            element: true,
            ..Default::default()
        };
        assert!(FaceAdjacency::new(&mesh, &members, &grow).in_scope(faces[1]));
    }
}
