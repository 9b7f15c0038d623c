// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![allow(dead_code)]

use polygroup_topology::{ElementSet, FaceKey, Mesh, VertexKey};

/// Routes library logs to the test harness; set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Three quads in a row; the seam sits between faces 0 and 1, face 2 has
/// material 1 and is cut off in UV space.
pub fn strip_fixture() -> Mesh {
    Mesh::from_json(include_str!("../fixtures/strip.json")).unwrap()
}

pub fn all_faces(mesh: &Mesh) -> ElementSet<FaceKey> {
    mesh.face_keys().collect()
}

/// Quad strip along x whose last quad folds up by `fold` radians.
pub fn folded_strip(quads: usize, fold: f64) -> (Mesh, Vec<FaceKey>) {
    let mut mesh = Mesh::new();
    let mut bottom: Vec<VertexKey> = Vec::new();
    let mut top: Vec<VertexKey> = Vec::new();

    for i in 0..quads {
        let x = i as f64;
        bottom.push(mesh.add_vertex(x, 0.0, 0.0));
        top.push(mesh.add_vertex(x, 1.0, 0.0));
    }
    let hinge = (quads - 1) as f64;
    bottom.push(mesh.add_vertex(hinge + fold.cos(), 0.0, fold.sin()));
    top.push(mesh.add_vertex(hinge + fold.cos(), 1.0, fold.sin()));

    let faces = (0..quads)
        .map(|i| {
            mesh.add_face(&[bottom[i], bottom[i + 1], top[i + 1], top[i]])
                .unwrap()
        })
        .collect();
    (mesh, faces)
}
