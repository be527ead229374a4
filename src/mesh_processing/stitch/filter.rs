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
use smallvec::SmallVec;

use crate::{
    impl_mesh,
    mesh_processing::stitch::{HalfEdgePair, union_find::VertexUnionFind},
};

fn sorted(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

impl_mesh! {
    /// Union-find joining target(h1) ~ source(h2) and source(h1) ~ target(h2)
    /// for every pair.
    pub(crate) fn merge_classes(&self, pairs: &[HalfEdgePair]) -> VertexUnionFind {
        let mut uf = VertexUnionFind::new();
        for pair in pairs {
            let (h1, h2) = (pair.first, pair.second);
            uf.union(self.target(h1), self.source(h2));
            uf.union(self.source(h1), self.target(h2));
        }
        uf
    }

    /// Vertices whose merge would leave an edge bounding more than two faces.
    ///
    /// Every edge around a merged vertex is keyed by the representatives of
    /// its endpoints after merging. Two edges on one key are fine when both
    /// are border edges (they are the pair being stitched, or close a
    /// two-edge hole); any other collision poisons all endpoints involved.
    fn unstitchable_vertices(&self, uf: &mut VertexUnionFind) -> AHashSet<usize> {
        let mut after_stitching: AHashMap<(usize, usize), SmallVec<[usize; 2]>> = AHashMap::new();

        let tracked = uf.vertices().to_vec();
        for vd in tracked {
            let tgt_rep = uf.find(vd);
            for hd in self.halfedges_around_target(vd) {
                let other = self.source(hd);
                let key = if uf.contains(other) {
                    // Reported from the other endpoint
                    if other < vd {
                        continue;
                    }
                    sorted(tgt_rep, uf.find(other))
                } else {
                    sorted(tgt_rep, other)
                };
                after_stitching.entry(key).or_default().push(hd);
            }
        }

        let mut unstitchable = AHashSet::new();
        for group in after_stitching.values() {
            let ok = match group.len() {
                1 => true,
                2 => self.is_border_edge(group[0]) && self.is_border_edge(group[1]),
                _ => false,
            };
            if !ok {
                for &hd in group {
                    unstitchable.insert(self.source(hd));
                    unstitchable.insert(self.target(hd));
                }
            }
        }
        unstitchable
    }

    /// Drops every pair that would produce a non-manifold edge.
    ///
    /// Returns the surviving pairs, in input order, together with the
    /// union-find built from those survivors only.
    pub(crate) fn filter_stitchable_pairs(
        &self,
        pairs: &[HalfEdgePair],
    ) -> (Vec<HalfEdgePair>, VertexUnionFind) {
        let mut uf = self.merge_classes(pairs);
        let unstitchable = self.unstitchable_vertices(&mut uf);
        if unstitchable.is_empty() {
            return (pairs.to_vec(), uf);
        }

        let filtered: Vec<HalfEdgePair> = pairs
            .iter()
            .copied()
            .filter(|p| {
                // Both half-edges are tested: a conflict may involve only one
                [p.first, p.second].iter().all(|&h| {
                    !unstitchable.contains(&self.source(h)) && !unstitchable.contains(&self.target(h))
                })
            })
            .collect();

        log::debug!(
            "filter: {} of {} pairs dropped, {} vertices cannot be merged",
            pairs.len() - filtered.len(),
            pairs.len(),
            unstitchable.len()
        );

        // A dropped pair may have been what tied two classes together
        let uf = self.merge_classes(&filtered);
        (filtered, uf)
    }
}
