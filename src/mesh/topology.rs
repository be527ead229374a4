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

use ahash::{AHashMap, AHashSet};

use crate::{
    geometry::point::Point,
    impl_mesh,
    mesh::{basic_types::Mesh, error::MeshError},
    numeric::scalar::Scalar,
};

/// Incoming half-edges of a vertex, visited by stepping `opposite(next(h))`.
///
/// The iterator is `Clone`, so a sequence can be restarted from any copy.
/// It stops after one full turn, or after as many steps as there are
/// half-edges if the fan is not closed (broken connectivity).
#[derive(Clone)]
pub struct HalfEdgesAroundTarget<'a, T: Scalar, const N: usize> {
    mesh: &'a Mesh<T, N>,
    start: usize,
    current: Option<usize>,
    budget: usize,
}

impl<'a, T: Scalar, const N: usize> Iterator for HalfEdgesAroundTarget<'a, T, N> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let h = self.current?;
        if self.budget == 0 {
            self.current = None;
            return None;
        }
        self.budget -= 1;

        let he = &self.mesh.half_edges[h];
        let nxt = self.mesh.half_edges[he.next].twin;
        self.current = if nxt == self.start { None } else { Some(nxt) };
        Some(h)
    }
}

impl_mesh! {
    #[inline]
    pub fn source(&self, he: usize) -> usize {
        self.half_edges[self.half_edges[he].twin].vertex
    }

    #[inline]
    pub fn target(&self, he: usize) -> usize {
        self.half_edges[he].vertex
    }

    #[inline]
    pub fn opposite(&self, he: usize) -> usize {
        self.half_edges[he].twin
    }

    #[inline]
    pub fn next(&self, he: usize) -> usize {
        self.half_edges[he].next
    }

    #[inline]
    pub fn prev(&self, he: usize) -> usize {
        self.half_edges[he].prev
    }

    #[inline]
    pub fn face(&self, he: usize) -> Option<usize> {
        self.half_edges[he].face
    }

    #[inline]
    pub fn point(&self, v: usize) -> &Point<T, N> {
        &self.vertices[v].position
    }

    /// True if `he` has no incident face.
    #[inline]
    pub fn is_border(&self, he: usize) -> bool {
        self.half_edges[he].is_border()
    }

    /// True if `he` or its twin has no incident face.
    #[inline]
    pub fn is_border_edge(&self, he: usize) -> bool {
        self.is_border(he) || self.is_border(self.half_edges[he].twin)
    }

    pub fn half_edge_between(&self, from: usize, to: usize) -> Option<usize> {
        self.edge_map
            .get(&(from, to))
            .copied()
            .filter(|&h| !self.half_edges[h].removed)
    }

    /// Live half-edges, in index order.
    pub fn halfedges(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.half_edges.len()).filter(move |&h| !self.half_edges[h].removed)
    }

    /// Live faces, in index order.
    pub fn faces_iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.faces.len()).filter(move |&f| !self.faces[f].removed)
    }

    /// Live vertices, in index order.
    pub fn vertices_iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.vertices.len()).filter(move |&v| !self.vertices[v].removed)
    }

    pub fn halfedges_around_target(&self, v: usize) -> HalfEdgesAroundTarget<'_, T, N> {
        let start = self.vertices[v]
            .half_edge
            .map(|out| self.half_edges[out].twin);
        HalfEdgesAroundTarget {
            mesh: self,
            start: start.unwrap_or(usize::MAX),
            current: start,
            budget: self.half_edges.len(),
        }
    }

    /// Half-edges of the border cycle through `h`, starting at `h`.
    pub fn boundary_cycle(&self, h: usize) -> Vec<usize> {
        let mut cycle = vec![h];
        let mut cur = self.half_edges[h].next;
        while cur != h && cycle.len() <= self.half_edges.len() {
            cycle.push(cur);
            cur = self.half_edges[cur].next;
        }
        cycle
    }

    /// One border half-edge per boundary cycle, lowest index first.
    pub fn boundary_cycles(&self) -> Vec<usize> {
        let mut visited = AHashSet::new();
        let mut cycles = Vec::new();
        for h in self.halfedges() {
            if !self.is_border(h) || visited.contains(&h) {
                continue;
            }
            cycles.push(h);
            visited.extend(self.boundary_cycle(h));
        }
        cycles
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices_iter().count()
    }

    pub fn num_half_edges(&self) -> usize {
        self.halfedges().count()
    }

    pub fn num_edges(&self) -> usize {
        self.num_half_edges() / 2
    }

    pub fn num_faces(&self) -> usize {
        self.faces_iter().count()
    }

    pub fn num_boundary_cycles(&self) -> usize {
        self.boundary_cycles().len()
    }

    /// Checks every halfedge-structure invariant the mesh relies on.
    pub fn validate_connectivity(&self) -> Result<(), MeshError> {
        let m = self.half_edges.len();
        let live_he = |h: usize| h < m && !self.half_edges[h].removed;

        for i in self.halfedges() {
            let he = &self.half_edges[i];
            if !live_he(he.next) || !live_he(he.prev) || !live_he(he.twin) {
                return Err(MeshError::BrokenLink(format!(
                    "he {} links to a missing half-edge (next {}, prev {}, twin {})",
                    i, he.next, he.prev, he.twin
                )));
            }
            if self.half_edges[he.next].prev != i {
                return Err(MeshError::BrokenLink(format!("he {} next -> prev mismatch", i)));
            }
            if self.half_edges[he.prev].next != i {
                return Err(MeshError::BrokenLink(format!("he {} prev -> next mismatch", i)));
            }
            if he.twin == i || self.half_edges[he.twin].twin != i {
                return Err(MeshError::BrokenLink(format!("he {} twin -> twin mismatch", i)));
            }
            if he.vertex >= self.vertices.len() || self.vertices[he.vertex].removed {
                return Err(MeshError::BrokenLink(format!(
                    "he {} points at removed vertex {}",
                    i, he.vertex
                )));
            }
            if self.half_edges[he.next].face != he.face {
                return Err(MeshError::BrokenLink(format!(
                    "he {} and its next disagree on the face",
                    i
                )));
            }
            if self.source(he.next) != he.vertex {
                return Err(MeshError::BrokenLink(format!(
                    "he {} next does not leave its target",
                    i
                )));
            }
            if let Some(f) = he.face {
                if f >= self.faces.len() || self.faces[f].removed {
                    return Err(MeshError::BrokenLink(format!(
                        "he {} bounds removed face {}",
                        i, f
                    )));
                }
            }
        }

        for f in self.faces_iter() {
            let start = self.faces[f].half_edge;
            if !live_he(start) || self.half_edges[start].face != Some(f) {
                return Err(MeshError::BrokenLink(format!(
                    "face {} half-edge {} points at wrong face",
                    f, start
                )));
            }
        }

        for v in self.vertices_iter() {
            if let Some(h) = self.vertices[v].half_edge {
                if !live_he(h) || self.source(h) != v {
                    return Err(MeshError::BrokenLink(format!(
                        "vertex {}: half-edge {} is not outgoing from this vertex",
                        v, h
                    )));
                }
            }
        }

        // An edge may bound at most two faces
        let mut per_edge: AHashMap<(usize, usize), usize> = AHashMap::new();
        for h in self.halfedges().filter(|&h| !self.is_border(h)) {
            let (a, b) = (self.source(h), self.target(h));
            *per_edge.entry((a.min(b), a.max(b))).or_default() += 1;
        }
        if let Some((&(a, b), &count)) = per_edge.iter().find(|&(_, &c)| c > 2) {
            return Err(MeshError::NonManifoldOutput { a, b, count });
        }

        Ok(())
    }
}
