// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Region-growing behaviour on whole meshes.

mod common;

use std::f64::consts::{FRAC_PI_2, PI};

use polygroup_topology::{make_grid, ElementSet, FaceKey, Mesh, PartitionConfig};

fn assert_disjoint_cover(input: &ElementSet<FaceKey>, groups: &[ElementSet<FaceKey>]) {
    assert_eq!(groups.iter().map(ElementSet::len).sum::<usize>(), input.len());
    for face in input {
        assert_eq!(groups.iter().filter(|g| g.contains(face)).count(), 1);
    }
}

#[test]
fn disconnected_quads() {
    common::init_tracing();
    let mut mesh = Mesh::new();
    let a: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        .iter()
        .map(|&(x, y)| mesh.add_vertex(x, y, 0.0))
        .collect();
    let b: Vec<_> = [(5.0, 0.0), (6.0, 0.0), (6.0, 1.0), (5.0, 1.0)]
        .iter()
        .map(|&(x, y)| mesh.add_vertex(x, y, 0.0))
        .collect();
    let fa = mesh.add_face(&a).unwrap();
    let fb = mesh.add_face(&b).unwrap();

    let set = ElementSet::from_keys([fa, fb]);
    let groups = set.group(&mesh, &PartitionConfig::default());
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].as_slice(), &[fa]);
    assert_eq!(groups[1].as_slice(), &[fb]);
}

#[test]
fn seam_splits_patch_along_edge() {
    common::init_tracing();
    let mut mesh = Mesh::new();
    let (verts, faces) = make_grid(&mut mesh, 2, 1).unwrap();
    let seam = mesh.edge_from_endpoints(verts[1], verts[4]).unwrap();
    mesh.set_seam(seam, true).unwrap();

    let set: ElementSet<FaceKey> = faces.iter().copied().collect();
    let config = PartitionConfig {
        use_seam: true,
        ..Default::default()
    };
    let groups = set.group(&mesh, &config);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].as_slice(), &[faces[0]]);
    assert_eq!(groups[1].as_slice(), &[faces[1]]);

    assert_eq!(set.group(&mesh, &PartitionConfig::default()).len(), 1);
}

#[test]
fn seam_column_splits_larger_grid() {
    let mut mesh = Mesh::new();
    let (verts, faces) = make_grid(&mut mesh, 4, 3).unwrap();
    // Cut the grid between columns 1 and 2, top to bottom.
    for j in 0..3 {
        let edge = mesh
            .edge_from_endpoints(verts[j * 5 + 2], verts[(j + 1) * 5 + 2])
            .unwrap();
        mesh.set_seam(edge, true).unwrap();
    }

    let set: ElementSet<FaceKey> = faces.iter().copied().collect();
    let config = PartitionConfig {
        use_seam: true,
        ..Default::default()
    };
    let groups = set.group(&mesh, &config);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 6);
    assert_eq!(groups[1].len(), 6);
    assert_disjoint_cover(&set, &groups);
}

#[test]
fn groups_cover_every_configuration() {
    let mesh = common::strip_fixture();
    let set = common::all_faces(&mesh);

    for use_seam in [false, true] {
        for use_material in [false, true] {
            for use_sharp in [false, true] {
                let config = PartitionConfig {
                    use_seam,
                    use_material,
                    use_sharp,
                    use_angle: 0.3,
                    ..Default::default()
                };
                assert_disjoint_cover(&set, &set.group(&mesh, &config));
            }
        }
    }
}

#[test]
fn fixture_switches_combine() {
    let mesh = common::strip_fixture();
    let set = common::all_faces(&mesh);
    let count = |config: PartitionConfig| set.group(&mesh, &config).len();

    assert_eq!(count(PartitionConfig::default()), 1);
    assert_eq!(
        count(PartitionConfig {
            use_material: true,
            ..Default::default()
        }),
        2
    );
    assert_eq!(
        count(PartitionConfig {
            use_seam: true,
            ..Default::default()
        }),
        2
    );
    assert_eq!(
        count(PartitionConfig {
            use_seam: true,
            use_material: true,
            ..Default::default()
        }),
        3
    );
}

#[test]
fn angle_threshold_is_monotonic() {
    common::init_tracing();
    let (mesh, faces) = common::folded_strip(3, FRAC_PI_2);
    let set: ElementSet<FaceKey> = faces.iter().copied().collect();

    let thresholds = [0.1, 1.0, 1.6, 2.5, PI, 4.0];
    let counts: Vec<usize> = thresholds
        .iter()
        .map(|&use_angle| {
            let config = PartitionConfig {
                use_angle,
                ..Default::default()
            };
            set.group(&mesh, &config).len()
        })
        .collect();

    assert_eq!(counts, vec![2, 2, 1, 1, 1, 1]);
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn element_growth_reaches_whole_mesh() {
    let mesh = common::strip_fixture();
    let first = mesh.face_keys().next().unwrap();
    let seed = ElementSet::from_keys([first]);

    let config = PartitionConfig {
        element: true,
        ..Default::default()
    };
    let groups = seed.group(&mesh, &config);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);

    let stop_at_material = PartitionConfig {
        element: true,
        use_material: true,
        ..Default::default()
    };
    assert_eq!(seed.group(&mesh, &stop_at_material)[0].len(), 2);
}

#[test]
fn grouping_leaves_selection_untouched() {
    let mut mesh = common::strip_fixture();
    let first = mesh.face_keys().next().unwrap();
    mesh.set_selected(first, true).unwrap();

    let set = ElementSet::<FaceKey>::from_selection(&mesh);
    let groups = set.group(&mesh, &PartitionConfig::default());
    assert_eq!(groups.len(), 1);
    assert_eq!(ElementSet::<FaceKey>::from_selection(&mesh), set);

    // Selecting a group writes flags only through `select`.
    let all = common::all_faces(&mesh);
    all.group(&mesh, &PartitionConfig::default())[0].select(&mut mesh, true);
    assert_eq!(ElementSet::<FaceKey>::from_selection(&mesh).len(), 3);
}

#[test]
fn partition_config_from_json() {
    let config = PartitionConfig::from_json(r#"{"use_seam": true, "use_angle": 0.5}"#).unwrap();
    assert!(config.use_seam);
    assert!(config.angle_enabled());
    assert!(!config.element);

    let mesh = common::strip_fixture();
    let set = common::all_faces(&mesh);
    assert_eq!(set.group(&mesh, &config).len(), 2);
}
