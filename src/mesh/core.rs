// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::{
    geometry::point::Point,
    impl_mesh,
    mesh::{error::MeshError, face::Face, half_edge::HalfEdge, vertex::Vertex},
};

impl_mesh! {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            half_edges: Vec::new(),
            faces: Vec::new(),
            edge_map: HashMap::new(),
        }
    }

    /// Builds a mesh from a polygon soup and wires its boundary loops.
    ///
    /// Vertices are taken as given: two entries of `points` with equal
    /// coordinates stay two distinct vertices, which is exactly what
    /// stitching later merges.
    pub fn from_polygons(
        points: impl IntoIterator<Item = Point<T, N>>,
        polygons: &[Vec<usize>],
    ) -> Result<Self, MeshError> {
        let mut mesh = Self::new();
        for p in points {
            mesh.add_vertex(p);
        }
        for poly in polygons {
            mesh.add_face(poly)?;
        }
        mesh.build_boundary_loops();
        Ok(mesh)
    }

    pub fn add_vertex(&mut self, position: Point<T, N>) -> usize {
        let idx = self.vertices.len();
        self.vertices.push(Vertex::new(position));
        idx
    }

    pub fn add_triangle(&mut self, v0: usize, v1: usize, v2: usize) -> Result<usize, MeshError> {
        self.add_face(&[v0, v1, v2])
    }

    /// Adds a polygon given its vertex indices in CCW order.
    ///
    /// Border (outside) half-edges have `face = None`. Their next/prev are
    /// left as self-loops until [`Mesh::build_boundary_loops`] runs. The mesh
    /// is left untouched when an error is returned.
    pub fn add_face(&mut self, vs: &[usize]) -> Result<usize, MeshError> {
        let n = vs.len();
        if n < 3 {
            return Err(MeshError::DegenerateFace(format!(
                "a face needs at least 3 vertices, got {}",
                n
            )));
        }
        for (i, &v) in vs.iter().enumerate() {
            if v >= self.vertices.len() || self.vertices[v].removed {
                return Err(MeshError::InvalidVertex(v));
            }
            if vs[..i].contains(&v) {
                return Err(MeshError::DegenerateFace(format!(
                    "vertex {} appears twice",
                    v
                )));
            }
        }
        for i in 0..n {
            let (from, to) = (vs[i], vs[(i + 1) % n]);
            if let Some(&he) = self.edge_map.get(&(from, to)) {
                if self.half_edges[he].face.is_some() {
                    return Err(MeshError::NonManifoldEdge { from, to });
                }
            }
        }

        let face_idx = self.faces.len();
        // Placeholder; the representative half-edge is set once edges are wired
        self.faces.push(Face::new(usize::MAX));

        let mut ring: SmallVec<[usize; 4]> = SmallVec::with_capacity(n);
        for i in 0..n {
            let (from, to) = (vs[i], vs[(i + 1) % n]);
            if let Some(&he_idx) = self.edge_map.get(&(from, to)) {
                // Border half-edge created by a neighbour: claim it
                self.half_edges[he_idx].face = Some(face_idx);
                ring.push(he_idx);
            } else {
                let he_idx = self.half_edges.len();
                let border_idx = he_idx + 1;

                let mut he = HalfEdge::new(to);
                he.face = Some(face_idx);
                he.twin = border_idx;
                self.half_edges.push(he);

                let mut bhe = HalfEdge::new(from);
                bhe.twin = he_idx;
                bhe.next = border_idx;
                bhe.prev = border_idx;
                self.half_edges.push(bhe);

                self.edge_map.insert((from, to), he_idx);
                self.edge_map.insert((to, from), border_idx);
                ring.push(he_idx);
            }
        }

        for i in 0..n {
            let cur = ring[i];
            let nxt = ring[(i + 1) % n];
            self.half_edges[cur].next = nxt;
            self.half_edges[nxt].prev = cur;
        }

        for i in 0..n {
            self.vertices[vs[i]].half_edge.get_or_insert(ring[i]);
        }
        self.faces[face_idx].half_edge = ring[0];

        Ok(face_idx)
    }

    /// Wires next/prev of every live border half-edge.
    ///
    /// For a border `b = u->v`, `b.next` is the next border spoke leaving `v`,
    /// found by rotating around `v` through interior faces. `prev` is derived
    /// from `next` so both directions always agree.
    pub fn build_boundary_loops(&mut self) {
        let m = self.half_edges.len();

        let borders: Vec<usize> = (0..m)
            .filter(|&i| !self.half_edges[i].removed && self.half_edges[i].face.is_none())
            .collect();

        let mut next_of = Vec::with_capacity(borders.len());
        for &b in &borders {
            let mut h = self.half_edges[b].twin;
            let mut steps = 0usize;
            let b_next = loop {
                if self.half_edges[h].face.is_none() {
                    break h;
                }
                // twin(prev(h)) leaves the same vertex as h
                h = self.half_edges[self.half_edges[h].prev].twin;
                steps += 1;
                if steps > m {
                    log::warn!("build_boundary_loops: no border spoke after half-edge {}", b);
                    break b;
                }
            };
            next_of.push(b_next);
        }

        for (&b, &nb) in borders.iter().zip(next_of.iter()) {
            self.half_edges[b].next = nb;
            self.half_edges[nb].prev = b;
        }
    }

    #[inline]
    pub fn set_target(&mut self, h: usize, v: usize) {
        self.half_edges[h].vertex = v;
    }

    /// Sets `h.next = n` and the reciprocal `n.prev = h`.
    #[inline]
    pub fn set_next(&mut self, h: usize, n: usize) {
        self.half_edges[h].next = n;
        self.half_edges[n].prev = h;
    }

    #[inline]
    pub fn set_face(&mut self, h: usize, f: Option<usize>) {
        self.half_edges[h].face = f;
    }

    #[inline]
    pub fn set_vertex_half_edge(&mut self, v: usize, outgoing: usize) {
        self.vertices[v].half_edge = Some(outgoing);
    }

    #[inline]
    pub fn set_face_half_edge(&mut self, f: usize, h: usize) {
        self.faces[f].half_edge = h;
    }

    /// Tombstones `h` and its twin. Callers must have relinked every
    /// reference to them beforehand.
    pub fn remove_edge(&mut self, h: usize) {
        let t = self.half_edges[h].twin;
        for x in [h, t] {
            self.drop_edge_key(x);
            let he = &mut self.half_edges[x];
            he.removed = true;
            he.face = None;
        }
    }

    pub fn remove_vertex(&mut self, v: usize) {
        let vertex = &mut self.vertices[v];
        vertex.removed = true;
        vertex.half_edge = None;
    }

    /// Removes the edge-map entry of `h` if it still points at `h`.
    pub(crate) fn drop_edge_key(&mut self, h: usize) {
        let key = (self.source(h), self.target(h));
        if self.edge_map.get(&key) == Some(&h) {
            self.edge_map.remove(&key);
        }
    }

    pub(crate) fn insert_edge_key(&mut self, h: usize) {
        let key = (self.source(h), self.target(h));
        self.edge_map.insert(key, h);
    }

    /// Compacts the arenas, dropping tombstoned elements and remapping every
    /// index. Returns the number of (vertices, half-edges, faces) dropped.
    pub fn remove_garbage(&mut self) -> (usize, usize, usize) {
        fn remap<E>(items: &[E], removed: impl Fn(&E) -> bool) -> (Vec<usize>, usize) {
            let mut map = vec![usize::MAX; items.len()];
            let mut next = 0;
            for (i, item) in items.iter().enumerate() {
                if !removed(item) {
                    map[i] = next;
                    next += 1;
                }
            }
            (map, next)
        }

        // Unwired links stay usize::MAX
        fn at(map: &[usize], i: usize) -> usize {
            map.get(i).copied().unwrap_or(usize::MAX)
        }

        let (v_map, v_live) = remap(&self.vertices, |v| v.removed);
        let (h_map, h_live) = remap(&self.half_edges, |h| h.removed);
        let (f_map, f_live) = remap(&self.faces, |f| f.removed);

        let dropped = (
            self.vertices.len() - v_live,
            self.half_edges.len() - h_live,
            self.faces.len() - f_live,
        );
        if dropped == (0, 0, 0) {
            return dropped;
        }

        let vertices = std::mem::take(&mut self.vertices);
        self.vertices = vertices
            .into_iter()
            .filter(|v| !v.removed)
            .map(|mut v| {
                v.half_edge = v.half_edge.map(|h| at(&h_map, h));
                v
            })
            .collect();

        let half_edges = std::mem::take(&mut self.half_edges);
        self.half_edges = half_edges
            .into_iter()
            .filter(|h| !h.removed)
            .map(|mut h| {
                h.vertex = at(&v_map, h.vertex);
                h.face = h.face.map(|f| at(&f_map, f));
                h.next = at(&h_map, h.next);
                h.prev = at(&h_map, h.prev);
                h.twin = at(&h_map, h.twin);
                h
            })
            .collect();

        let faces = std::mem::take(&mut self.faces);
        self.faces = faces
            .into_iter()
            .filter(|f| !f.removed)
            .map(|mut f| {
                f.half_edge = at(&h_map, f.half_edge);
                f
            })
            .collect();

        self.edge_map.clear();
        for h in 0..self.half_edges.len() {
            self.insert_edge_key(h);
        }

        log::debug!(
            "remove_garbage: dropped {} vertices, {} half-edges, {} faces",
            dropped.0,
            dropped.1,
            dropped.2
        );
        dropped
    }
}
