// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for meshes.
//!
//! Round-trips vertices, edges (with seam and smooth flags), faces (with
//! material index) and UV layers. Edges are written before faces so a
//! restored mesh keeps the same incidence order, which keeps chain building
//! and region ordering stable across a round trip.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::arena::*;
use crate::error::{Error, Result};
use crate::keys::*;

/// Serializable representation of a whole mesh.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub vertices: Vec<VertexSnapshot>,
    #[serde(default)]
    pub edges: Vec<EdgeSnapshot>,
    pub faces: Vec<FaceSnapshot>,
    #[serde(default)]
    pub uv_layers: Vec<UvLayerSnapshot>,
    /// Index into `uv_layers`; the first layer when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_uv_layer: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VertexSnapshot {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub seam: bool,
    #[serde(default = "default_smooth")]
    pub smooth: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FaceSnapshot {
    pub vertices: Vec<usize>,
    #[serde(default)]
    pub material: u16,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub hidden: bool,
}

/// One UV layer; `faces[i]` holds one coordinate per corner of face `i`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UvLayerSnapshot {
    pub name: String,
    pub faces: Vec<Vec<[f64; 2]>>,
}

fn default_smooth() -> bool {
    true
}

fn lookup<K: Copy>(keys: &[K], index: usize, what: &str) -> Result<K> {
    keys.get(index).copied().ok_or_else(|| {
        Error::Serialization(format!("{what} index {index} out of range ({})", keys.len()))
    })
}

impl Mesh {
    /// Serializes the mesh to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Creates a serializable snapshot of the mesh.
    ///
    /// SlotMap keys are mapped to sequential indices.
    pub fn to_snapshot(&self) -> MeshSnapshot {
        let mut vertex_ids = FxHashMap::default();

        let vertices: Vec<VertexSnapshot> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, (k, v))| {
                vertex_ids.insert(k, i);
                VertexSnapshot {
                    x: v.position.x,
                    y: v.position.y,
                    z: v.position.z,
                    selected: v.flags.select,
                    hidden: v.flags.hide,
                }
            })
            .collect();

        let edges = self
            .edges
            .values()
            .map(|e| EdgeSnapshot {
                start: vertex_ids[&e.verts[0]],
                end: vertex_ids[&e.verts[1]],
                seam: e.seam,
                smooth: e.smooth,
                selected: e.flags.select,
                hidden: e.flags.hide,
            })
            .collect();

        let faces = self
            .faces
            .iter()
            .map(|(k, f)| FaceSnapshot {
                vertices: self.face_vertices(k).iter().map(|v| vertex_ids[v]).collect(),
                material: f.material_index,
                selected: f.flags.select,
                hidden: f.flags.hide,
            })
            .collect();

        let uv_layers = self
            .uv_layers
            .iter()
            .map(|layer| UvLayerSnapshot {
                name: layer.name.clone(),
                faces: self
                    .faces
                    .values()
                    .map(|f| {
                        f.loops
                            .iter()
                            .map(|&lk| {
                                layer.data.get(lk).map_or([0.0, 0.0], |d| [d.uv.x, d.uv.y])
                            })
                            .collect()
                    })
                    .collect(),
            })
            .collect();

        MeshSnapshot {
            vertices,
            edges,
            faces,
            uv_layers,
            active_uv_layer: self.active_uv.map(|layer| layer.index()),
        }
    }

    /// Deserializes a mesh from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: MeshSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    /// Rebuilds a mesh from a snapshot.
    pub fn from_snapshot(snap: &MeshSnapshot) -> Result<Self> {
        let mut mesh = Mesh::new();

        let mut vertex_keys: Vec<VertexKey> = Vec::with_capacity(snap.vertices.len());
        for vs in &snap.vertices {
            let vk = mesh.add_vertex(vs.x, vs.y, vs.z);
            mesh.set_selected(vk, vs.selected)?;
            mesh.set_hidden(vk, vs.hidden)?;
            vertex_keys.push(vk);
        }

        for es in &snap.edges {
            let a = lookup(&vertex_keys, es.start, "vertex")?;
            let b = lookup(&vertex_keys, es.end, "vertex")?;
            let ek = mesh.add_edge(a, b)?;
            mesh.set_seam(ek, es.seam)?;
            mesh.set_smooth(ek, es.smooth)?;
            mesh.set_selected(ek, es.selected)?;
            mesh.set_hidden(ek, es.hidden)?;
        }

        let mut face_keys: Vec<FaceKey> = Vec::with_capacity(snap.faces.len());
        for fs in &snap.faces {
            let verts = fs
                .vertices
                .iter()
                .map(|&i| lookup(&vertex_keys, i, "vertex"))
                .collect::<Result<Vec<_>>>()?;
            let fk = mesh.add_face(&verts)?;
            mesh.set_material(fk, fs.material)?;
            mesh.set_selected(fk, fs.selected)?;
            mesh.set_hidden(fk, fs.hidden)?;
            face_keys.push(fk);
        }

        let mut layers = Vec::with_capacity(snap.uv_layers.len());
        for ls in &snap.uv_layers {
            let layer = mesh.add_uv_layer(&ls.name)?;
            if ls.faces.len() != face_keys.len() {
                return Err(Error::UvCountMismatch {
                    expected: face_keys.len(),
                    got: ls.faces.len(),
                });
            }
            for (&fk, uvs) in face_keys.iter().zip(&ls.faces) {
                mesh.set_face_uvs(layer, fk, uvs)?;
            }
            layers.push(layer);
        }
        if let Some(active) = snap.active_uv_layer {
            mesh.set_active_uv_layer(lookup(&layers, active, "uv layer")?)?;
        }

        tracing::debug!(
            vertices = mesh.vertex_count(),
            edges = mesh.edge_count(),
            faces = mesh.face_count(),
            uv_layers = mesh.uv_layer_count(),
            "Restored mesh"
        );
        Ok(mesh)
    }
}
