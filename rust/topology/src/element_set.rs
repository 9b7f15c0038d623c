// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed, order-preserving element sets.
//!
//! An [`ElementSet`] is the unit every partitioning call consumes and
//! produces. It holds keys of one element kind, never twice, in insertion
//! order. Derivation views (`vertices`, `edges`, `polygons`, `loops`) read
//! mesh adjacency and return new sets in first-seen order.

use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::arena::{ElementFlags, Mesh};
use crate::error::{Error, Result};
use crate::keys::*;
use crate::marks::Marks;

/// An element kind whose keys can live in an [`ElementSet`].
pub trait MeshElement: slotmap::Key + Hash {
    const KIND: ElementKind;

    /// All keys of this kind in mesh storage order.
    fn all(mesh: &Mesh) -> Vec<Self>;

    fn flags(mesh: &Mesh, key: Self) -> Option<ElementFlags>;

    fn flags_mut(mesh: &mut Mesh, key: Self) -> Option<&mut ElementFlags>;

    /// The "not found" error for this kind.
    fn not_found(key: Self) -> Error;
}

impl MeshElement for VertexKey {
    const KIND: ElementKind = ElementKind::Vertex;

    fn all(mesh: &Mesh) -> Vec<Self> {
        mesh.vertices.keys().collect()
    }

    fn flags(mesh: &Mesh, key: Self) -> Option<ElementFlags> {
        mesh.vertices.get(key).map(|v| v.flags)
    }

    fn flags_mut(mesh: &mut Mesh, key: Self) -> Option<&mut ElementFlags> {
        mesh.vertices.get_mut(key).map(|v| &mut v.flags)
    }

    fn not_found(key: Self) -> Error {
        Error::VertexNotFound(key)
    }
}

impl MeshElement for EdgeKey {
    const KIND: ElementKind = ElementKind::Edge;

    fn all(mesh: &Mesh) -> Vec<Self> {
        mesh.edges.keys().collect()
    }

    fn flags(mesh: &Mesh, key: Self) -> Option<ElementFlags> {
        mesh.edges.get(key).map(|e| e.flags)
    }

    fn flags_mut(mesh: &mut Mesh, key: Self) -> Option<&mut ElementFlags> {
        mesh.edges.get_mut(key).map(|e| &mut e.flags)
    }

    fn not_found(key: Self) -> Error {
        Error::EdgeNotFound(key)
    }
}

impl MeshElement for FaceKey {
    const KIND: ElementKind = ElementKind::Face;

    fn all(mesh: &Mesh) -> Vec<Self> {
        mesh.faces.keys().collect()
    }

    fn flags(mesh: &Mesh, key: Self) -> Option<ElementFlags> {
        mesh.faces.get(key).map(|f| f.flags)
    }

    fn flags_mut(mesh: &mut Mesh, key: Self) -> Option<&mut ElementFlags> {
        mesh.faces.get_mut(key).map(|f| &mut f.flags)
    }

    fn not_found(key: Self) -> Error {
        Error::FaceNotFound(key)
    }
}

// =============================================================================
// Selection and visibility flags
// =============================================================================

impl Mesh {
    /// Sets the selection flag of one element.
    pub fn set_selected<K: MeshElement>(&mut self, key: K, select: bool) -> Result<()> {
        let flags = K::flags_mut(self, key).ok_or_else(|| K::not_found(key))?;
        flags.select = select;
        Ok(())
    }

    /// Sets the hidden flag of one element.
    pub fn set_hidden<K: MeshElement>(&mut self, key: K, hide: bool) -> Result<()> {
        let flags = K::flags_mut(self, key).ok_or_else(|| K::not_found(key))?;
        flags.hide = hide;
        Ok(())
    }

    pub fn is_selected<K: MeshElement>(&self, key: K) -> bool {
        K::flags(self, key).is_some_and(|f| f.select)
    }

    pub fn is_hidden<K: MeshElement>(&self, key: K) -> bool {
        K::flags(self, key).is_some_and(|f| f.hide)
    }

    /// Clears the selection flag on every element of kind `K`.
    pub fn deselect_all<K: MeshElement>(&mut self) {
        for key in K::all(self) {
            if let Some(flags) = K::flags_mut(self, key) {
                flags.select = false;
            }
        }
    }

    /// Clears vertex, edge and face selection.
    pub fn clear_selection(&mut self) {
        self.deselect_all::<VertexKey>();
        self.deselect_all::<EdgeKey>();
        self.deselect_all::<FaceKey>();
    }
}

// =============================================================================
// ElementSet
// =============================================================================

/// An ordered, duplicate-free set of element keys of one kind.
#[derive(Debug, Clone)]
pub struct ElementSet<K> {
    items: Vec<K>,
    members: FxHashSet<K>,
}

impl<K: Copy + Eq + Hash> ElementSet<K> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            members: FxHashSet::default(),
        }
    }

    /// Builds a set from externally supplied keys (e.g. a picking result).
    /// Repeated keys are kept once, at their first position.
    pub fn from_keys(keys: impl IntoIterator<Item = K>) -> Self {
        keys.into_iter().collect()
    }

    /// Appends `key` unless already present. Returns `true` if added.
    pub fn insert(&mut self, key: K) -> bool {
        if self.members.insert(key) {
            self.items.push(key);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, key: K) -> bool {
        self.members.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[K] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<K> {
        self.items
    }

    /// Sets the transient mark of every member to `value`.
    pub fn tag(&self, marks: &mut Marks<K>, value: bool) {
        for &key in &self.items {
            marks.set(key, value);
        }
    }
}

impl<K: MeshElement> ElementSet<K> {
    /// Collects the selected elements of kind `K`.
    pub fn from_selection(mesh: &Mesh) -> Self {
        K::all(mesh)
            .into_iter()
            .filter(|&k| mesh.is_selected(k))
            .collect()
    }

    /// Collects every element of kind `K`, optionally skipping hidden ones.
    pub fn from_mesh(mesh: &Mesh, filter_hidden: bool) -> Self {
        K::all(mesh)
            .into_iter()
            .filter(|&k| !filter_hidden || !mesh.is_hidden(k))
            .collect()
    }

    /// Marks every member selected; `replace` first clears all vertex, edge
    /// and face selection.
    pub fn select(&self, mesh: &mut Mesh, replace: bool) {
        if replace {
            mesh.clear_selection();
        }
        for &key in &self.items {
            if let Some(flags) = K::flags_mut(mesh, key) {
                flags.select = true;
            }
        }
        let kind = K::KIND;
        tracing::trace!(%kind, count = self.items.len(), replace, "Selected elements");
    }
}

impl<K: Copy + Eq + Hash> Default for ElementSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> FromIterator<K> for ElementSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Copy + Eq + Hash> Extend<K> for ElementSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Copy + Eq + Hash> PartialEq for ElementSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<K: Copy + Eq + Hash> Eq for ElementSet<K> {}

impl<'a, K: Copy + Eq + Hash> IntoIterator for &'a ElementSet<K> {
    type Item = K;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().copied()
    }
}

impl<K: Copy + Eq + Hash> IntoIterator for ElementSet<K> {
    type Item = K;
    type IntoIter = std::vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// =============================================================================
// Derivation views
// =============================================================================

impl ElementSet<FaceKey> {
    /// Vertices of the member faces.
    pub fn vertices(&self, mesh: &Mesh) -> ElementSet<VertexKey> {
        self.iter().flat_map(|f| mesh.face_vertices(f)).collect()
    }

    /// Edges of the member faces.
    pub fn edges(&self, mesh: &Mesh) -> ElementSet<EdgeKey> {
        self.iter().flat_map(|f| mesh.face_edges(f)).collect()
    }

    /// Corner loops of the member faces.
    pub fn loops(&self, mesh: &Mesh) -> ElementSet<LoopKey> {
        self.iter()
            .flat_map(|f| mesh.face_loops(f).iter().copied())
            .collect()
    }
}

impl ElementSet<EdgeKey> {
    /// Endpoints of the member edges.
    pub fn vertices(&self, mesh: &Mesh) -> ElementSet<VertexKey> {
        self.iter()
            .filter_map(|e| mesh.edge_vertices(e))
            .flat_map(|(a, b)| [a, b])
            .collect()
    }

    /// Faces incident to the member edges.
    pub fn polygons(&self, mesh: &Mesh) -> ElementSet<FaceKey> {
        self.iter().flat_map(|e| mesh.edge_faces(e)).collect()
    }
}

impl ElementSet<VertexKey> {
    /// Edges incident to the member vertices.
    pub fn edges(&self, mesh: &Mesh) -> ElementSet<EdgeKey> {
        self.iter()
            .flat_map(|v| mesh.vertex_edges(v).iter().copied())
            .collect()
    }

    /// Faces touching the member vertices.
    pub fn polygons(&self, mesh: &Mesh) -> ElementSet<FaceKey> {
        self.iter().flat_map(|v| mesh.vertex_faces(v)).collect()
    }

    /// Loops sitting on the member vertices.
    pub fn loops(&self, mesh: &Mesh) -> ElementSet<LoopKey> {
        self.iter()
            .flat_map(|v| mesh.vertex_loops(v).iter().copied())
            .collect()
    }
}

impl ElementSet<LoopKey> {
    /// Vertices the member loops sit on.
    pub fn vertices(&self, mesh: &Mesh) -> ElementSet<VertexKey> {
        self.iter().filter_map(|l| mesh.loop_vert(l)).collect()
    }

    /// Edges the member loops run along.
    pub fn edges(&self, mesh: &Mesh) -> ElementSet<EdgeKey> {
        self.iter().filter_map(|l| mesh.loop_edge(l)).collect()
    }

    /// Faces owning the member loops.
    pub fn polygons(&self, mesh: &Mesh) -> ElementSet<FaceKey> {
        self.iter().filter_map(|l| mesh.loop_face(l)).collect()
    }
}
