// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Polygroup Topology
//!
//! Topology partitioning for polygon meshes.
//!
//! The crate stores a polygon mesh in an arena of slot maps (vertices, edges,
//! faces and loops, where a loop is one corner of one face) with adjacency
//! indices, and splits element sets into connected regions:
//!
//! - [`ElementSet::group`] grows vertex, edge and face regions, optionally
//!   stopping at seams, sharp edges, material changes and fold angles
//!   (see [`PartitionConfig`]).
//! - [`ElementSet::island`] splits faces into UV islands.
//! - [`UvLoopSet`] groups loops in UV space and finds UV borders.
//! - [`ElementSet::chain`] orders an edge set into vertex chains.
//!
//! All algorithms borrow the mesh immutably. Traversal marks live in a
//! per-call [`Marks`] value, never on the mesh.
//!
//! ```
//! use polygroup_topology::{make_grid, ElementSet, Mesh, PartitionConfig};
//!
//! let mut mesh = Mesh::new();
//! let (_, faces) = make_grid(&mut mesh, 4, 1).unwrap();
//! mesh.set_material(faces[3], 1).unwrap();
//!
//! let config = PartitionConfig { use_material: true, ..Default::default() };
//! let groups = ElementSet::from_keys(faces).group(&mesh, &config);
//! assert_eq!(groups.len(), 2);
//! ```

pub mod arena;
pub mod chain;
pub mod config;
pub mod construction;
pub mod element_set;
pub mod error;
pub mod geometry;
pub mod island;
pub mod keys;
pub mod marks;
pub mod partition;
pub mod predicates;
pub mod serialization;
pub mod traversal;
pub mod uv_loops;

pub use arena::{ElementFlags, LoopUv, Mesh};
pub use config::{PartitionConfig, ANGLE_DISABLED, DEFAULT_UV_TOLERANCE};
pub use construction::make_grid;
pub use element_set::{ElementSet, MeshElement};
pub use error::{Error, Result};
pub use keys::{EdgeKey, ElementKind, FaceKey, LoopKey, UvLayer, VertexKey};
pub use marks::Marks;
pub use predicates::{uv_coincident, FaceAdjacency};
pub use serialization::MeshSnapshot;
pub use uv_loops::UvLoopSet;
