// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometric queries on mesh elements.
//!
//! Only what the adjacency predicates need: positions, face normals and the
//! angle between two face normals. Degenerate geometry
//! yields `None` instead of NaN.

use nalgebra::{Point3, Vector3};

use crate::arena::Mesh;
use crate::keys::*;

/// Normals shorter than this are treated as degenerate.
const NORMAL_EPSILON: f64 = 1e-15;

impl Mesh {
    /// Returns the 3D position of a vertex.
    pub fn vertex_point(&self, key: VertexKey) -> Option<Point3<f64>> {
        self.vertices.get(key).map(|v| v.position)
    }

    /// Computes the face normal using Newell's method.
    ///
    /// Works for any planar polygon (convex or concave) and is robust for
    /// slightly non-planar quads. The direction follows the right-hand rule
    /// relative to the winding order. Returns `None` for degenerate faces.
    pub fn face_normal(&self, key: FaceKey) -> Option<Vector3<f64>> {
        let verts = self.face_vertices(key);
        if verts.len() < 3 {
            return None;
        }

        let mut normal = Vector3::new(0.0, 0.0, 0.0);
        let n = verts.len();

        for i in 0..n {
            let curr = self.vertex_point(verts[i])?;
            let next = self.vertex_point(verts[(i + 1) % n])?;

            normal.x += (curr.y - next.y) * (curr.z + next.z);
            normal.y += (curr.z - next.z) * (curr.x + next.x);
            normal.z += (curr.x - next.x) * (curr.y + next.y);
        }

        let len = normal.norm();
        if len < NORMAL_EPSILON {
            return None;
        }

        Some(normal / len)
    }

    /// Returns the angle in radians between the normals of two faces.
    ///
    /// `None` when either normal is undefined.
    pub fn face_normal_angle(&self, a: FaceKey, b: FaceKey) -> Option<f64> {
        let na = self.face_normal(a)?;
        let nb = self.face_normal(b)?;
        let angle = na.angle(&nb);
        angle.is_finite().then_some(angle)
    }
}
