// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh element key types for arena-based storage.
//!
//! Each mesh element gets a unique, type-safe key for O(1) lookup in the
//! mesh arena. Keys are created by `slotmap::SlotMap` and remain valid even
//! after other elements are removed (generational indices).

use slotmap::new_key_type;

new_key_type! {
    /// Key for a vertex (point in 3D space).
    pub struct VertexKey;

    /// Key for an edge (unordered pair of distinct vertices).
    pub struct EdgeKey;

    /// Key for a face (polygon bounded by a cycle of loops).
    pub struct FaceKey;

    /// Key for a loop (one corner of one face).
    pub struct LoopKey;
}

/// Handle to a named UV layer of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UvLayer(pub(crate) usize);

impl UvLayer {
    /// Returns the position of this layer in the mesh's layer list.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Discriminant for mesh element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Vertex = 0,
    Edge = 1,
    Face = 2,
    Loop = 3,
}

impl ElementKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Vertex => "Vertex",
            ElementKind::Edge => "Edge",
            ElementKind::Face => "Face",
            ElementKind::Loop => "Loop",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
