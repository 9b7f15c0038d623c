// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction methods and attribute setters for mesh elements.
//!
//! Every element is created through the mesh, which ensures referential
//! integrity (all referenced vertices must exist) and maintains the upward
//! adjacency index. Faces share edges: adding a face whose side joins two
//! already-connected vertices reuses the existing edge.

use nalgebra::Point2;
use slotmap::Key;

use crate::arena::*;
use crate::error::{Error, Result};
use crate::keys::*;

impl Mesh {
    /// Returns the edge joining two vertices, creating it if needed.
    ///
    /// Returns an error if either vertex does not exist or both are the same.
    pub fn add_edge(&mut self, a: VertexKey, b: VertexKey) -> Result<EdgeKey> {
        if !self.vertices.contains_key(a) {
            return Err(Error::VertexNotFound(a));
        }
        if !self.vertices.contains_key(b) {
            return Err(Error::VertexNotFound(b));
        }
        if a == b {
            return Err(Error::DegenerateEdge(a));
        }
        if let Ok(existing) = self.edge_from_endpoints(a, b) {
            return Ok(existing);
        }

        let key = self.edges.insert(EdgeData {
            verts: [a, b],
            seam: false,
            smooth: true,
            flags: ElementFlags::default(),
        });
        self.link_vertex_edge(a, key);
        self.link_vertex_edge(b, key);
        Ok(key)
    }

    /// Creates a face from an ordered cycle of vertices.
    ///
    /// Creates one loop per corner and one edge per side (reusing existing
    /// edges). The vertices must exist and be pairwise distinct.
    pub fn add_face(&mut self, vertices: &[VertexKey]) -> Result<FaceKey> {
        let n = vertices.len();
        if n < 3 {
            return Err(Error::DegenerateFace(n));
        }
        for (i, &vk) in vertices.iter().enumerate() {
            if !self.vertices.contains_key(vk) {
                return Err(Error::VertexNotFound(vk));
            }
            if vertices[..i].contains(&vk) {
                return Err(Error::DegenerateFace(n));
            }
        }

        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            edges.push(self.add_edge(vertices[i], vertices[(i + 1) % n])?);
        }

        let face = self.faces.insert(FaceData {
            loops: Vec::with_capacity(n),
            material_index: 0,
            flags: ElementFlags::default(),
        });

        // Loops are inserted first and stitched into a cycle afterwards.
        let mut loops = Vec::with_capacity(n);
        for i in 0..n {
            let lk = self.loops.insert(LoopData {
                vert: vertices[i],
                edge: edges[i],
                face,
                next: LoopKey::null(),
                prev: LoopKey::null(),
            });
            self.link_loop(lk, vertices[i], edges[i]);
            loops.push(lk);
        }
        for i in 0..n {
            let l = &mut self.loops[loops[i]];
            l.next = loops[(i + 1) % n];
            l.prev = loops[(i + n - 1) % n];
        }

        self.faces[face].loops = loops;
        Ok(face)
    }

    /// Sets the material index of a face.
    pub fn set_material(&mut self, face: FaceKey, material_index: u16) -> Result<()> {
        let data = self.faces.get_mut(face).ok_or(Error::FaceNotFound(face))?;
        data.material_index = material_index;
        Ok(())
    }

    /// Marks or clears an edge as a seam.
    pub fn set_seam(&mut self, edge: EdgeKey, seam: bool) -> Result<()> {
        let data = self.edges.get_mut(edge).ok_or(Error::EdgeNotFound(edge))?;
        data.seam = seam;
        Ok(())
    }

    /// Marks an edge smooth (`true`) or sharp (`false`).
    pub fn set_smooth(&mut self, edge: EdgeKey, smooth: bool) -> Result<()> {
        let data = self.edges.get_mut(edge).ok_or(Error::EdgeNotFound(edge))?;
        data.smooth = smooth;
        Ok(())
    }

    /// Sets the UV coordinate of one loop.
    pub fn set_loop_uv(&mut self, layer: UvLayer, lk: LoopKey, u: f64, v: f64) -> Result<()> {
        if !self.loops.contains_key(lk) {
            return Err(Error::LoopNotFound(lk));
        }
        let data = self
            .loop_uv_data_mut(layer, lk)
            .ok_or_else(|| Error::UvLayerNotFound(format!("#{}", layer.0)))?;
        data.uv = Point2::new(u, v);
        Ok(())
    }

    /// Sets the UV coordinates of every corner of a face, in winding order.
    pub fn set_face_uvs(&mut self, layer: UvLayer, face: FaceKey, uvs: &[[f64; 2]]) -> Result<()> {
        let loops = self
            .faces
            .get(face)
            .ok_or(Error::FaceNotFound(face))?
            .loops
            .clone();
        if loops.len() != uvs.len() {
            return Err(Error::UvCountMismatch {
                expected: loops.len(),
                got: uvs.len(),
            });
        }
        for (lk, uv) in loops.into_iter().zip(uvs) {
            self.set_loop_uv(layer, lk, uv[0], uv[1])?;
        }
        Ok(())
    }
}

/// Builds a planar grid of `cols × rows` unit quads in the XY plane.
///
/// Returns the vertex keys (row-major, `(cols + 1) × (rows + 1)`) and the
/// face keys (row-major, `cols × rows`). Handy for fixtures and demos.
pub fn make_grid(
    mesh: &mut Mesh,
    cols: usize,
    rows: usize,
) -> Result<(Vec<VertexKey>, Vec<FaceKey>)> {
    let mut verts = Vec::with_capacity((cols + 1) * (rows + 1));
    for j in 0..=rows {
        for i in 0..=cols {
            verts.push(mesh.add_vertex(i as f64, j as f64, 0.0));
        }
    }

    let stride = cols + 1;
    let mut faces = Vec::with_capacity(cols * rows);
    for j in 0..rows {
        for i in 0..cols {
            let v0 = verts[j * stride + i];
            let v1 = verts[j * stride + i + 1];
            let v2 = verts[(j + 1) * stride + i + 1];
            let v3 = verts[(j + 1) * stride + i];
            faces.push(mesh.add_face(&[v0, v1, v2, v3])?);
        }
    }

    Ok((verts, faces))
}
