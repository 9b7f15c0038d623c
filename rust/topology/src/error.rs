// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for mesh construction and lookups.
//!
//! Partitioning itself never fails: degenerate input degrades to smaller or
//! empty groups. Only building a mesh and explicit lookups report errors.

use crate::keys::{EdgeKey, FaceKey, LoopKey, VertexKey};

/// Result type alias for mesh operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a mesh.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Vertex key not found in the mesh.
    #[error("vertex not found: {0:?}")]
    VertexNotFound(VertexKey),

    /// Edge key not found in the mesh.
    #[error("edge not found: {0:?}")]
    EdgeNotFound(EdgeKey),

    /// Face key not found in the mesh.
    #[error("face not found: {0:?}")]
    FaceNotFound(FaceKey),

    /// Loop key not found in the mesh.
    #[error("loop not found: {0:?}")]
    LoopNotFound(LoopKey),

    /// An edge must join two distinct vertices.
    #[error("edge endpoints must be distinct: {0:?}")]
    DegenerateEdge(VertexKey),

    /// A face needs at least 3 pairwise distinct vertices.
    #[error("face needs at least 3 pairwise distinct vertices, got {0} corners")]
    DegenerateFace(usize),

    /// No edge joins the two vertices.
    #[error("no edge joins vertices {0:?} and {1:?}")]
    EdgeLookup(VertexKey, VertexKey),

    /// No UV layer with the given name.
    #[error("uv layer not found: {0}")]
    UvLayerNotFound(String),

    /// A UV layer with this name already exists.
    #[error("uv layer already exists: {0}")]
    DuplicateUvLayer(String),

    /// The mesh has no UV layer to fall back to.
    #[error("mesh has no uv layer")]
    NoUvLayer,

    /// A UV list does not match the number of corners (or faces) it covers.
    #[error("expected {expected} uv entries, got {got}")]
    UvCountMismatch { expected: usize, got: usize },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
