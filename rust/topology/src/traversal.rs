// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traversal methods for navigating mesh adjacency.
//!
//! Supports both downward traversal (face → loops → vertices/edges) and
//! upward traversal (vertex → edges/loops → faces) via the adjacency index.
//! Missing keys yield empty results rather than errors; only
//! [`Mesh::edge_from_endpoints`] reports a failed lookup.

use crate::arena::Mesh;
use crate::error::{Error, Result};
use crate::keys::*;

// =============================================================================
// Downward traversal
// =============================================================================

impl Mesh {
    /// Returns the two endpoint vertex keys of an edge.
    pub fn edge_vertices(&self, key: EdgeKey) -> Option<(VertexKey, VertexKey)> {
        self.edges.get(key).map(|e| (e.verts[0], e.verts[1]))
    }

    /// Returns the endpoint of `edge` opposite to `vertex`.
    pub fn other_vertex(&self, edge: EdgeKey, vertex: VertexKey) -> Option<VertexKey> {
        let [a, b] = self.edges.get(edge)?.verts;
        if a == vertex {
            Some(b)
        } else if b == vertex {
            Some(a)
        } else {
            None
        }
    }

    /// Returns the corner loops of a face in winding order.
    pub fn face_loops(&self, key: FaceKey) -> &[LoopKey] {
        self.faces
            .get(key)
            .map(|f| f.loops.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the vertices of a face in winding order.
    pub fn face_vertices(&self, key: FaceKey) -> Vec<VertexKey> {
        self.face_loops(key)
            .iter()
            .filter_map(|&lk| self.loops.get(lk).map(|l| l.vert))
            .collect()
    }

    /// Returns the edges of a face in winding order.
    pub fn face_edges(&self, key: FaceKey) -> Vec<EdgeKey> {
        self.face_loops(key)
            .iter()
            .filter_map(|&lk| self.loops.get(lk).map(|l| l.edge))
            .collect()
    }

    /// Returns the vertex a loop sits on.
    pub fn loop_vert(&self, key: LoopKey) -> Option<VertexKey> {
        self.loops.get(key).map(|l| l.vert)
    }

    /// Returns the edge running from a loop to the next corner.
    pub fn loop_edge(&self, key: LoopKey) -> Option<EdgeKey> {
        self.loops.get(key).map(|l| l.edge)
    }

    /// Returns the face owning a loop.
    pub fn loop_face(&self, key: LoopKey) -> Option<FaceKey> {
        self.loops.get(key).map(|l| l.face)
    }

    /// Returns the next corner in the owning face.
    pub fn loop_next(&self, key: LoopKey) -> Option<LoopKey> {
        self.loops.get(key).map(|l| l.next)
    }

    /// Returns the previous corner in the owning face.
    pub fn loop_prev(&self, key: LoopKey) -> Option<LoopKey> {
        self.loops.get(key).map(|l| l.prev)
    }

    // =========================================================================
    // Upward traversal: linked elements via adjacency index
    // =========================================================================

    /// Returns edges that use a given vertex, in creation order.
    pub fn vertex_edges(&self, key: VertexKey) -> &[EdgeKey] {
        self.vertex_to_edges
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns loops sitting on a given vertex, in creation order.
    pub fn vertex_loops(&self, key: VertexKey) -> &[LoopKey] {
        self.vertex_to_loops
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns faces touching a given vertex.
    pub fn vertex_faces(&self, key: VertexKey) -> Vec<FaceKey> {
        let mut faces = Vec::new();
        for &lk in self.vertex_loops(key) {
            if let Some(l) = self.loops.get(lk) {
                if !faces.contains(&l.face) {
                    faces.push(l.face);
                }
            }
        }
        faces
    }

    /// Returns loops running along a given edge (one per incident face side).
    pub fn edge_loops(&self, key: EdgeKey) -> &[LoopKey] {
        self.edge_to_loops
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns faces incident to an edge. Non-manifold edges return 3+.
    pub fn edge_faces(&self, key: EdgeKey) -> Vec<FaceKey> {
        let mut faces = Vec::new();
        for &lk in self.edge_loops(key) {
            if let Some(l) = self.loops.get(lk) {
                if !faces.contains(&l.face) {
                    faces.push(l.face);
                }
            }
        }
        faces
    }

    /// Checks if an edge borders fewer than two faces.
    pub fn is_boundary_edge(&self, key: EdgeKey) -> bool {
        self.edge_faces(key).len() < 2
    }

    // =========================================================================
    // Adjacency queries
    // =========================================================================

    /// Returns the first edge of `a` that also borders `b`.
    pub fn shared_edge(&self, a: FaceKey, b: FaceKey) -> Option<EdgeKey> {
        self.face_edges(a)
            .into_iter()
            .find(|&ek| self.edge_loops(ek).iter().any(|&lk| self.loop_face(lk) == Some(b)))
    }

    /// Looks up the edge joining two vertices.
    ///
    /// Returns [`Error::EdgeLookup`] when the vertices are not joined; callers
    /// probing opportunistically should treat that as a plain negative.
    pub fn edge_from_endpoints(&self, a: VertexKey, b: VertexKey) -> Result<EdgeKey> {
        self.vertex_edges(a)
            .iter()
            .copied()
            .find(|&ek| self.other_vertex(ek, a) == Some(b))
            .ok_or(Error::EdgeLookup(a, b))
    }
}
