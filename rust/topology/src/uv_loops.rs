// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loop sets bound to a UV layer, and the loop-level region utilities.
//!
//! A [`UvLoopSet`] is an [`ElementSet<LoopKey>`] plus the UV layer and
//! tolerance its comparisons use. Its grouping calls work in UV space: two
//! corners on the same vertex are the "same UV vertex" only if their
//! coordinates coincide, which is how UV seams show up at loop level.

use std::collections::VecDeque;

use crate::arena::Mesh;
use crate::config::{PartitionConfig, DEFAULT_UV_TOLERANCE};
use crate::element_set::ElementSet;
use crate::error::{Error, Result};
use crate::keys::*;
use crate::marks::Marks;
use crate::predicates::loops_uv_coincident;

/// An ordered, duplicate-free set of loops compared on one UV layer.
#[derive(Debug, Clone, PartialEq)]
pub struct UvLoopSet {
    loops: ElementSet<LoopKey>,
    layer: UvLayer,
    tolerance: f64,
}

impl UvLoopSet {
    /// Creates an empty set on `layer` with the default tolerance.
    pub fn new(layer: UvLayer) -> Self {
        Self::from_loops(ElementSet::new(), layer)
    }

    /// Binds an existing loop set to `layer`.
    pub fn from_loops(loops: ElementSet<LoopKey>, layer: UvLayer) -> Self {
        Self {
            loops,
            layer,
            tolerance: DEFAULT_UV_TOLERANCE,
        }
    }

    /// Builds a set from `loops`, taking layer and tolerance from `config`.
    pub fn with_config(
        mesh: &Mesh,
        loops: ElementSet<LoopKey>,
        config: &PartitionConfig,
    ) -> Result<Self> {
        let layer = config.resolve_uv_layer(mesh)?;
        Ok(Self::from_loops(loops, layer).with_tolerance(config.uv_tolerance))
    }

    /// Replaces the per-axis UV tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Loops whose UV is selected on `layer` (active layer when `None`).
    pub fn from_selection(mesh: &Mesh, layer: Option<UvLayer>) -> Result<Self> {
        Self::collect(mesh, layer, |mesh, layer, lk| {
            mesh.loop_uv_data(layer, lk).is_some_and(|d| d.select)
        })
    }

    /// Loops whose UV edge is selected on `layer` (active layer when `None`).
    pub fn from_edge_selection(mesh: &Mesh, layer: Option<UvLayer>) -> Result<Self> {
        Self::collect(mesh, layer, |mesh, layer, lk| {
            mesh.loop_uv_data(layer, lk).is_some_and(|d| d.select_edge)
        })
    }

    /// Every loop of the mesh, optionally skipping hidden faces and hidden
    /// UVs.
    pub fn from_mesh(mesh: &Mesh, layer: Option<UvLayer>, filter_hidden: bool) -> Result<Self> {
        let mut set = Self::collect(mesh, layer, |mesh, layer, lk| {
            !filter_hidden || !mesh.loop_uv_data(layer, lk).is_some_and(|d| d.hide)
        })?;
        if filter_hidden {
            let loops = set
                .loops
                .iter()
                .filter(|&lk| mesh.loop_face(lk).is_some_and(|f| !mesh.is_hidden(f)))
                .collect();
            set.loops = loops;
        }
        Ok(set)
    }

    fn collect(
        mesh: &Mesh,
        layer: Option<UvLayer>,
        keep: impl Fn(&Mesh, UvLayer, LoopKey) -> bool,
    ) -> Result<Self> {
        let layer = match layer {
            Some(layer) if mesh.uv_layer_name(layer).is_some() => layer,
            Some(layer) => return Err(Error::UvLayerNotFound(format!("#{}", layer.index()))),
            None => mesh.resolve_uv_layer(None)?,
        };
        let loops = mesh
            .face_keys()
            .flat_map(|f| mesh.face_loops(f).iter().copied())
            .filter(|&lk| keep(mesh, layer, lk))
            .collect();
        Ok(Self::from_loops(loops, layer))
    }

    pub fn layer(&self) -> UvLayer {
        self.layer
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn loops(&self) -> &ElementSet<LoopKey> {
        &self.loops
    }

    pub fn into_loops(self) -> ElementSet<LoopKey> {
        self.loops
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    pub fn contains(&self, lk: LoopKey) -> bool {
        self.loops.contains(lk)
    }

    pub fn iter(&self) -> impl Iterator<Item = LoopKey> + '_ {
        self.loops.iter()
    }

    /// Appends a loop unless already present.
    pub fn insert(&mut self, lk: LoopKey) -> bool {
        self.loops.insert(lk)
    }

    pub fn vertices(&self, mesh: &Mesh) -> ElementSet<VertexKey> {
        self.loops.vertices(mesh)
    }

    pub fn edges(&self, mesh: &Mesh) -> ElementSet<EdgeKey> {
        self.loops.edges(mesh)
    }

    pub fn polygons(&self, mesh: &Mesh) -> ElementSet<FaceKey> {
        self.loops.polygons(mesh)
    }

    /// Sets the transient mark of every member to `value`.
    pub fn tag(&self, marks: &mut Marks<LoopKey>, value: bool) {
        self.loops.tag(marks, value);
    }

    /// Marks every member's UV selected; `replace` clears the layer's UV
    /// selection first.
    pub fn select(&self, mesh: &mut Mesh, replace: bool) {
        let layer = self.layer;
        if replace {
            if let Some(data) = mesh.uv_layers.get_mut(layer.0) {
                for (_, uv) in data.data.iter_mut() {
                    uv.select = false;
                }
            }
        }
        for lk in self.loops.iter() {
            if let Some(uv) = mesh.loop_uv_data_mut(layer, lk) {
                uv.select = true;
            }
        }
    }

    fn coincident(&self, mesh: &Mesh, a: LoopKey, b: LoopKey) -> bool {
        loops_uv_coincident(mesh, self.layer, a, b, self.tolerance)
    }

    fn derive(&self, loops: ElementSet<LoopKey>) -> Self {
        Self {
            loops,
            layer: self.layer,
            tolerance: self.tolerance,
        }
    }

    /// Loops at the same vertex as `l` whose UV coincides with it.
    fn coincident_at_vertex<'m>(
        &'m self,
        mesh: &'m Mesh,
        l: LoopKey,
    ) -> impl Iterator<Item = LoopKey> + 'm {
        let links = mesh.loop_vert(l).map(|v| mesh.vertex_loops(v)).unwrap_or(&[]);
        links
            .iter()
            .copied()
            .filter(move |&nl| self.coincident(mesh, l, nl))
    }

    /// Walks one UV-connected region of corners.
    ///
    /// From each popped loop, the UV-coincident loops on its vertex form a
    /// "UV vertex"; every loop of that UV vertex joins the region, and the
    /// face-cycle neighbours (next/prev corner) of each become new work.
    /// `admit` decides which loops may take part.
    fn flood_uv_vertices(
        &self,
        mesh: &Mesh,
        start: LoopKey,
        visited: &mut Marks<LoopKey>,
        admit: impl Fn(LoopKey) -> bool,
    ) -> ElementSet<LoopKey> {
        let mut region = ElementSet::new();
        let mut stack = vec![start];

        while let Some(l) = stack.pop() {
            let mut uv_vertex = vec![l];
            for nl in self.coincident_at_vertex(mesh, l) {
                if nl != l && !visited.is_marked(nl) && admit(nl) {
                    uv_vertex.push(nl);
                }
            }

            for nl in uv_vertex {
                if !visited.mark(nl) {
                    continue;
                }
                region.insert(nl);
                for side in [mesh.loop_next(nl), mesh.loop_prev(nl)].into_iter().flatten() {
                    if !visited.is_marked(side) && admit(side) {
                        stack.push(side);
                    }
                }
            }
        }
        region
    }

    /// Groups whole faces into UV-connected regions.
    ///
    /// Only faces whose every corner is a member seed the grouping. Members
    /// on partially covered faces are added back to a group when their UV
    /// coincides with one of the group's loops at the same vertex.
    pub fn group_faces(&self, mesh: &Mesh) -> Vec<UvLoopSet> {
        let mut whole_faces = ElementSet::<FaceKey>::new();
        for lk in self.loops.iter() {
            let Some(face) = mesh.loop_face(lk) else {
                continue;
            };
            if !whole_faces.contains(face)
                && mesh.face_loops(face).iter().all(|&fl| self.contains(fl))
            {
                whole_faces.insert(face);
            }
        }
        let mode_loops = whole_faces.loops(mesh);

        let mut visited = Marks::new();
        let mut groups = Vec::new();
        for start in mode_loops.iter() {
            if visited.is_marked(start) {
                continue;
            }
            let mut region =
                self.flood_uv_vertices(mesh, start, &mut visited, |lk| mode_loops.contains(lk));

            let readmitted: Vec<LoopKey> = region
                .iter()
                .flat_map(|l| self.coincident_at_vertex(mesh, l))
                .filter(|&nl| self.contains(nl))
                .collect();
            region.extend(readmitted);
            groups.push(self.derive(region));
        }

        tracing::debug!(input = self.len(), groups = groups.len(), "Grouped uv faces");
        groups
    }

    /// Groups loops into UV-welded vertices.
    ///
    /// With `element` set, loops outside the set that are UV-connected to a
    /// member are pulled into its group.
    pub fn group_vertices(&self, mesh: &Mesh, element: bool) -> Vec<UvLoopSet> {
        let mut visited = Marks::new();
        let mut groups = Vec::new();
        for start in self.loops.iter() {
            if visited.is_marked(start) {
                continue;
            }
            let region =
                self.flood_uv_vertices(mesh, start, &mut visited, |lk| element || self.contains(lk));
            groups.push(self.derive(region));
        }

        tracing::debug!(input = self.len(), groups = groups.len(), element, "Grouped uv vertices");
        groups
    }

    /// Groups loops whose edges form continuous UV edge runs.
    ///
    /// Loops are linked when, at either end of a member's edge, another
    /// member sits on the same UV vertex, or that loop's previous corner is
    /// a member whose edge ends there.
    pub fn group_edges(&self, mesh: &Mesh) -> Vec<UvLoopSet> {
        let mut tagged_edges = Marks::new();
        for lk in self.loops.iter() {
            if let Some(ek) = mesh.loop_edge(lk) {
                tagged_edges.mark(ek);
            }
        }
        let on_run = |lk: LoopKey| {
            self.contains(lk) && mesh.loop_edge(lk).is_some_and(|ek| tagged_edges.is_marked(ek))
        };

        let mut visited = Marks::new();
        let mut groups = Vec::new();
        for start in self.loops.iter() {
            if visited.is_marked(start) {
                continue;
            }

            let mut region = ElementSet::new();
            let mut queue = VecDeque::from([start]);
            visited.mark(start);

            while let Some(l) = queue.pop_front() {
                region.insert(l);

                let ends = [Some(l), mesh.loop_next(l)];
                for el in ends.into_iter().flatten() {
                    for nl in self.coincident_at_vertex(mesh, el) {
                        if !visited.is_marked(nl) && on_run(nl) {
                            visited.mark(nl);
                            queue.push_back(nl);
                        }
                        if let Some(prev) = mesh.loop_prev(nl) {
                            if !visited.is_marked(prev) && on_run(prev) {
                                visited.mark(prev);
                                queue.push_back(prev);
                            }
                        }
                    }
                }
            }
            groups.push(self.derive(region));
        }

        tracing::debug!(input = self.len(), groups = groups.len(), "Grouped uv edges");
        groups
    }

    /// Splits the set into UV border loops and interior loops.
    ///
    /// A loop is on the border when its edge has fewer than two faces, when
    /// no loop of another face runs along its edge, or when the UVs at the
    /// two ends of the edge differ from those of that opposite loop.
    /// Returns the border loops, or the interior loops when `invert` is set.
    pub fn border_loops(&self, mesh: &Mesh, invert: bool) -> UvLoopSet {
        let mut border = ElementSet::new();
        let mut interior = ElementSet::new();

        for l in self.loops.iter() {
            if self.is_uv_continuous(mesh, l) {
                interior.insert(l);
            } else {
                border.insert(l);
            }
        }

        tracing::debug!(border = border.len(), interior = interior.len(), "Classified uv borders");
        self.derive(if invert { interior } else { border })
    }

    fn is_uv_continuous(&self, mesh: &Mesh, l: LoopKey) -> bool {
        let (Some(data), Some(next_l)) = (mesh.loop_data(l), mesh.loop_next(l)) else {
            return false;
        };
        if mesh.is_boundary_edge(data.edge) {
            return false;
        }

        let opposite = mesh.edge_loops(data.edge).iter().copied().find(|&nl| {
            mesh.loop_face(nl).is_some_and(|f| f != data.face)
        });
        let (Some(nl), Some(next_nl)) = (opposite, opposite.and_then(|nl| mesh.loop_next(nl)))
        else {
            return false;
        };

        if mesh.loop_vert(nl) == mesh.loop_vert(next_l) {
            // Opposite winding: the neighbour walks the edge backwards.
            self.coincident(mesh, nl, next_l) && self.coincident(mesh, next_nl, l)
        } else {
            // Same winding (flipped neighbour).
            self.coincident(mesh, nl, l) && self.coincident(mesh, next_nl, next_l)
        }
    }

    /// Adds, in place, every loop that shares a vertex and UV with a member.
    ///
    /// With `include_edge_endpoint`, each member's next corner and the loops
    /// welded to it are added as well. Only the members present when the call
    /// starts are scanned.
    pub fn add_overlapping_loops(&mut self, mesh: &Mesh, include_edge_endpoint: bool) {
        let members: Vec<LoopKey> = self.loops.iter().collect();
        let before = members.len();

        for l in members {
            let welded: Vec<LoopKey> = self.coincident_at_vertex(mesh, l).collect();
            self.loops.extend(welded);

            if include_edge_endpoint {
                let Some(el) = mesh.loop_next(l) else {
                    continue;
                };
                self.loops.insert(el);
                let welded: Vec<LoopKey> = self.coincident_at_vertex(mesh, el).collect();
                self.loops.extend(welded);
            }
        }

        tracing::debug!(before, after = self.len(), include_edge_endpoint, "Added overlapping loops");
    }
}

impl<'a> IntoIterator for &'a UvLoopSet {
    type Item = LoopKey;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, LoopKey>>;

    fn into_iter(self) -> Self::IntoIter {
        self.loops.as_slice().iter().copied()
    }
}
