// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for polygon mesh elements.
//!
//! The [`Mesh`] owns every vertex, edge, face and loop (face corner) in slot
//! maps with stable, generational keys. Upward adjacency indices (vertex →
//! edges, vertex → loops, edge → loops) give the "linked" relations that the
//! partitioning algorithms walk. Incident faces of a vertex or an edge are
//! derived from those loops.
//!
//! Adjacency lists are kept as `Vec`s in insertion order rather than sets so
//! that every traversal, and therefore every grouping result, is
//! deterministic for a given construction order.

use nalgebra::{Point2, Point3};
use rustc_hash::FxHashMap;
use slotmap::{SecondaryMap, SlotMap};

use crate::error::{Error, Result};
use crate::keys::*;

/// Host-visible state flags shared by every element kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementFlags {
    pub select: bool,
    pub hide: bool,
}

/// Data stored for a vertex: a point in 3D space.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub position: Point3<f64>,
    pub flags: ElementFlags,
}

/// Data stored for an edge between two distinct vertices.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub verts: [VertexKey; 2],
    /// UV/material domain boundary.
    pub seam: bool,
    /// Shading continuity; `false` means the edge is sharp.
    pub smooth: bool,
    pub flags: ElementFlags,
}

/// Data stored for a face: its corner loops in winding order.
#[derive(Debug, Clone)]
pub struct FaceData {
    pub loops: Vec<LoopKey>,
    pub material_index: u16,
    pub flags: ElementFlags,
}

/// Data stored for a loop: one corner of one face.
#[derive(Debug, Clone)]
pub struct LoopData {
    pub vert: VertexKey,
    /// Edge from this corner's vertex to the next corner's vertex.
    pub edge: EdgeKey,
    pub face: FaceKey,
    pub next: LoopKey,
    pub prev: LoopKey,
}

/// Per-layer UV data of one loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopUv {
    pub uv: Point2<f64>,
    pub select: bool,
    /// Selection of the UV edge starting at this corner.
    pub select_edge: bool,
    pub hide: bool,
}

impl Default for LoopUv {
    fn default() -> Self {
        Self {
            uv: Point2::origin(),
            select: false,
            select_edge: false,
            hide: false,
        }
    }
}

/// A named UV channel.
#[derive(Debug, Clone)]
pub struct UvLayerData {
    pub name: String,
    pub(crate) data: SecondaryMap<LoopKey, LoopUv>,
}

/// The central arena that owns all mesh elements and their adjacency indices.
///
/// # Example
///
/// ```
/// use polygroup_topology::Mesh;
///
/// let mut mesh = Mesh::new();
/// let v0 = mesh.add_vertex(0.0, 0.0, 0.0);
/// let v1 = mesh.add_vertex(1.0, 0.0, 0.0);
/// let v2 = mesh.add_vertex(0.0, 1.0, 0.0);
/// let face = mesh.add_face(&[v0, v1, v2]).unwrap();
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.edge_count(), 3);
/// assert_eq!(mesh.face_loops(face).len(), 3);
/// ```
#[derive(Debug)]
pub struct Mesh {
    // Element storage
    pub(crate) vertices: SlotMap<VertexKey, VertexData>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeData>,
    pub(crate) faces: SlotMap<FaceKey, FaceData>,
    pub(crate) loops: SlotMap<LoopKey, LoopData>,

    // Upward adjacency: element → linked elements
    pub(crate) vertex_to_edges: FxHashMap<VertexKey, Vec<EdgeKey>>,
    pub(crate) vertex_to_loops: FxHashMap<VertexKey, Vec<LoopKey>>,
    pub(crate) edge_to_loops: FxHashMap<EdgeKey, Vec<LoopKey>>,

    // UV channels
    pub(crate) uv_layers: Vec<UvLayerData>,
    pub(crate) active_uv: Option<UvLayer>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            loops: SlotMap::with_key(),

            vertex_to_edges: FxHashMap::default(),
            vertex_to_loops: FxHashMap::default(),
            edge_to_loops: FxHashMap::default(),

            uv_layers: Vec::new(),
            active_uv: None,
        }
    }

    // --- Vertex operations ---

    /// Adds a vertex at the given 3D coordinates.
    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) -> VertexKey {
        self.vertices.insert(VertexData {
            position: Point3::new(x, y, z),
            flags: ElementFlags::default(),
        })
    }

    /// Returns the vertex data for the given key, or `None` if not found.
    pub fn vertex(&self, key: VertexKey) -> Option<&VertexData> {
        self.vertices.get(key)
    }

    /// Returns the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates vertex keys in storage order.
    pub fn vertex_keys(&self) -> impl Iterator<Item = VertexKey> + '_ {
        self.vertices.keys()
    }

    // --- Edge operations ---

    /// Returns the edge data for the given key, or `None` if not found.
    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeData> {
        self.edges.get(key)
    }

    /// Returns the number of edges in the mesh.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates edge keys in storage order.
    pub fn edge_keys(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges.keys()
    }

    // --- Face operations ---

    /// Returns the face data for the given key, or `None` if not found.
    pub fn face(&self, key: FaceKey) -> Option<&FaceData> {
        self.faces.get(key)
    }

    /// Returns the number of faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Iterates face keys in storage order.
    pub fn face_keys(&self) -> impl Iterator<Item = FaceKey> + '_ {
        self.faces.keys()
    }

    // --- Loop operations ---

    /// Returns the loop data for the given key, or `None` if not found.
    pub fn loop_data(&self, key: LoopKey) -> Option<&LoopData> {
        self.loops.get(key)
    }

    /// Returns the number of loops in the mesh.
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    // --- UV layer operations ---

    /// Creates a named UV layer. Every existing loop gets a `(0, 0)` entry.
    ///
    /// The first layer created becomes the active layer.
    pub fn add_uv_layer(&mut self, name: &str) -> Result<UvLayer> {
        if self.uv_layers.iter().any(|l| l.name == name) {
            return Err(Error::DuplicateUvLayer(name.to_string()));
        }

        let mut data = SecondaryMap::with_capacity(self.loops.len());
        for lk in self.loops.keys() {
            data.insert(lk, LoopUv::default());
        }

        let layer = UvLayer(self.uv_layers.len());
        self.uv_layers.push(UvLayerData {
            name: name.to_string(),
            data,
        });
        if self.active_uv.is_none() {
            self.active_uv = Some(layer);
        }
        Ok(layer)
    }

    /// Looks up a UV layer by name.
    pub fn uv_layer(&self, name: &str) -> Result<UvLayer> {
        self.uv_layers
            .iter()
            .position(|l| l.name == name)
            .map(UvLayer)
            .ok_or_else(|| Error::UvLayerNotFound(name.to_string()))
    }

    /// Returns the name of a UV layer.
    pub fn uv_layer_name(&self, layer: UvLayer) -> Option<&str> {
        self.uv_layers.get(layer.0).map(|l| l.name.as_str())
    }

    /// Returns the number of UV layers.
    pub fn uv_layer_count(&self) -> usize {
        self.uv_layers.len()
    }

    /// Returns the active UV layer, if the mesh has any.
    pub fn active_uv_layer(&self) -> Option<UvLayer> {
        self.active_uv
    }

    /// Makes `layer` the active UV layer.
    pub fn set_active_uv_layer(&mut self, layer: UvLayer) -> Result<()> {
        let name = self
            .uv_layer_name(layer)
            .ok_or_else(|| Error::UvLayerNotFound(format!("#{}", layer.0)))?;
        tracing::trace!(layer = name, "Activated uv layer");
        self.active_uv = Some(layer);
        Ok(())
    }

    /// Resolves an optional layer name, falling back to the active layer.
    pub fn resolve_uv_layer(&self, name: Option<&str>) -> Result<UvLayer> {
        match name {
            Some(name) => self.uv_layer(name),
            None => self.active_uv.ok_or(Error::NoUvLayer),
        }
    }

    /// Returns the per-layer data of a loop.
    pub fn loop_uv_data(&self, layer: UvLayer, key: LoopKey) -> Option<&LoopUv> {
        self.uv_layers.get(layer.0)?.data.get(key)
    }

    pub(crate) fn loop_uv_data_mut(&mut self, layer: UvLayer, key: LoopKey) -> Option<&mut LoopUv> {
        self.uv_layers.get_mut(layer.0)?.data.get_mut(key)
    }

    /// Returns the UV coordinate of a loop on a layer.
    pub fn loop_uv(&self, layer: UvLayer, key: LoopKey) -> Option<Point2<f64>> {
        self.loop_uv_data(layer, key).map(|d| d.uv)
    }

    // --- Adjacency index helpers ---

    /// Register that an edge uses a vertex (upward adjacency).
    pub(crate) fn link_vertex_edge(&mut self, vertex: VertexKey, edge: EdgeKey) {
        let edges = self.vertex_to_edges.entry(vertex).or_default();
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    /// Register that a loop sits on a vertex and runs along an edge.
    pub(crate) fn link_loop(&mut self, lk: LoopKey, vertex: VertexKey, edge: EdgeKey) {
        self.vertex_to_loops.entry(vertex).or_default().push(lk);
        self.edge_to_loops.entry(edge).or_default().push(lk);
        for layer in &mut self.uv_layers {
            layer.data.insert(lk, LoopUv::default());
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
