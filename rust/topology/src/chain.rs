// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge-chain builder.
//!
//! Orders an edge set into vertex chains. Every member edge starts pending;
//! each still-pending edge opens a chain that grows backward from its first
//! endpoint and forward from its second, consuming pending edges as it goes.
//! At a branching vertex the first pending edge in the vertex's incidence
//! order wins.

use std::collections::VecDeque;

use crate::arena::Mesh;
use crate::element_set::ElementSet;
use crate::keys::*;
use crate::marks::Marks;

impl ElementSet<EdgeKey> {
    /// Splits the set into chains of vertices.
    ///
    /// Consecutive vertices of a chain are joined by a member edge. A closed
    /// loop comes back as an open chain; [`ElementSet::chain`] restores the
    /// closing pair.
    pub fn vert_chain(&self, mesh: &Mesh) -> Vec<Vec<VertexKey>> {
        let mut pending = Marks::new();
        for e in self {
            pending.mark(e);
        }

        let mut chains = Vec::new();
        for e in self {
            if !pending.is_marked(e) {
                continue;
            }
            let Some((a, b)) = mesh.edge_vertices(e) else {
                pending.unmark(e);
                continue;
            };

            let mut chain: VecDeque<VertexKey> = VecDeque::new();
            for (forward, start) in [(false, a), (true, b)] {
                if chain.contains(&start) {
                    break;
                }
                pending.mark(e);
                extend_chain(mesh, &mut pending, &mut chain, e, start, forward);
            }
            pending.unmark(e);

            tracing::trace!(len = chain.len(), "Closed chain");
            chains.push(Vec::from(chain));
        }

        tracing::debug!(edges = self.len(), chains = chains.len(), "Built vertex chains");
        chains
    }

    /// Splits the set into chains of vertex pairs, one pair per edge.
    ///
    /// When a chain has more than two vertices and its ends are joined by a
    /// member edge, the closing pair `(last, first)` is appended.
    pub fn chain(&self, mesh: &Mesh) -> Vec<Vec<(VertexKey, VertexKey)>> {
        self.vert_chain(mesh)
            .into_iter()
            .map(|verts| {
                let mut pairs: Vec<_> = verts.windows(2).map(|w| (w[0], w[1])).collect();
                if let &[first, .., last] = verts.as_slice() {
                    if verts.len() > 2 && self.closes(mesh, first, last) {
                        pairs.push((last, first));
                    }
                }
                pairs
            })
            .collect()
    }

    fn closes(&self, mesh: &Mesh, first: VertexKey, last: VertexKey) -> bool {
        mesh.edge_from_endpoints(first, last)
            .is_ok_and(|ek| self.contains(ek))
    }
}

/// Walks from `start` along pending edges, beginning with `edge`, pushing
/// each reached vertex onto the front or back of `chain`.
fn extend_chain(
    mesh: &Mesh,
    pending: &mut Marks<EdgeKey>,
    chain: &mut VecDeque<VertexKey>,
    edge: EdgeKey,
    start: VertexKey,
    forward: bool,
) {
    let mut current = edge;
    let mut vertex = start;

    while pending.unmark(current) {
        if forward {
            chain.push_back(vertex);
        } else {
            chain.push_front(vertex);
        }

        let Some(&next) = mesh
            .vertex_edges(vertex)
            .iter()
            .find(|&&ne| pending.is_marked(ne))
        else {
            break;
        };
        let Some(nv) = mesh.other_vertex(next, vertex) else {
            break;
        };
        current = next;
        vertex = nv;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::make_grid;

    fn edges(mesh: &Mesh, pairs: &[(VertexKey, VertexKey)]) -> ElementSet<EdgeKey> {
        pairs
            .iter()
            .map(|&(a, b)| mesh.edge_from_endpoints(a, b).unwrap())
            .collect()
    }

    #[test]
    fn open_polyline_in_any_order() {
        let mut mesh = Mesh::new();
        let (v, _) = make_grid(&mut mesh, 3, 1).unwrap();
        let set = edges(&mesh, &[(v[1], v[2]), (v[0], v[1]), (v[2], v[3])]);

        let chains = set.vert_chain(&mesh);
        assert_eq!(chains, vec![vec![v[0], v[1], v[2], v[3]]]);

        let pairs = set.chain(&mesh);
        assert_eq!(pairs, vec![vec![(v[0], v[1]), (v[1], v[2]), (v[2], v[3])]]);
    }

    #[test]
    fn closed_triangle_gets_wrap_pair() {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(0.0, 0.0, 0.0);
        let b = mesh.add_vertex(1.0, 0.0, 0.0);
        let c = mesh.add_vertex(0.0, 1.0, 0.0);
        mesh.add_face(&[a, b, c]).unwrap();
        let set = edges(&mesh, &[(a, b), (b, c), (c, a)]);

        let chains = set.vert_chain(&mesh);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].len(), 3);

        let pairs = &set.chain(&mesh)[0];
        assert_eq!(pairs.len(), 3);
        for (x, y) in pairs {
            assert!(set.contains(mesh.edge_from_endpoints(*x, *y).unwrap()));
        }
        // Consecutive pairs share a vertex, and the last wraps to the first.
        for w in pairs.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
        assert_eq!(pairs[2].1, pairs[0].0);
    }

    #[test]
    fn quad_boundary_closes() {
        let mut mesh = Mesh::new();
        let (v, faces) = make_grid(&mut mesh, 1, 1).unwrap();
        let set: ElementSet<EdgeKey> = mesh.face_edges(faces[0]).into_iter().collect();

        let pairs = set.chain(&mesh);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].len(), 4);
        assert_eq!(set.vert_chain(&mesh)[0].len(), v.len());
    }

    #[test]
    fn open_path_does_not_wrap() {
        let mut mesh = Mesh::new();
        let (v, _) = make_grid(&mut mesh, 1, 1).unwrap();
        // Three sides of the quad; the fourth joins the ends but is not a member.
        let set = edges(&mesh, &[(v[0], v[1]), (v[1], v[3]), (v[3], v[2])]);

        let pairs = set.chain(&mesh);
        assert_eq!(pairs, vec![vec![(v[0], v[1]), (v[1], v[3]), (v[3], v[2])]]);
    }

    #[test]
    fn branching_vertex_splits_chains() {
        let mut mesh = Mesh::new();
        let (v, _) = make_grid(&mut mesh, 2, 1).unwrap();
        // T junction at v1: bottom row plus the middle upright.
        let set = edges(&mesh, &[(v[0], v[1]), (v[1], v[2]), (v[1], v[4])]);

        let chains = set.vert_chain(&mesh);
        assert_eq!(chains.len(), 2);
        assert_eq!(chains.iter().map(Vec::len).sum::<usize>(), 5);
        for chain in &chains {
            assert!(chain.windows(2).all(|w| mesh.edge_from_endpoints(w[0], w[1]).is_ok()));
        }
    }

    #[test]
    fn disjoint_segments() {
        let mut mesh = Mesh::new();
        let (v, _) = make_grid(&mut mesh, 3, 1).unwrap();
        let set = edges(&mesh, &[(v[0], v[1]), (v[2], v[3])]);
        assert_eq!(set.chain(&mesh).len(), 2);
        assert!(ElementSet::<EdgeKey>::new().chain(&mesh).is_empty());
    }
}
