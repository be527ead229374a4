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

use crate::{
    impl_mesh,
    mesh_processing::stitch::{HalfEdgePair, union_find::VertexUnionFind},
};

impl_mesh! {
    /// Retargets every half-edge of the fan ending where `h` ends.
    fn update_target_vertex(&mut self, h: usize, v_kept: usize) {
        let start = h;
        let mut h = h;
        let mut steps = 0usize;
        loop {
            self.set_target(h, v_kept);
            h = self.opposite(self.next(h));
            if h == start {
                break;
            }
            steps += 1;
            if steps > self.half_edges.len() {
                log::warn!("update_target_vertex: open fan around half-edge {}", start);
                break;
            }
        }
    }

    /// Applies pairs that already went through the manifold filter.
    ///
    /// For each pair `(h1, h2)`, `h2` and its twin are removed and `h1`
    /// becomes the interior half-edge of the face that bordered `h2`.
    /// Feeding unfiltered pairs corrupts the mesh.
    pub(crate) fn run_stitch_borders(&mut self, pairs: &[HalfEdgePair], uf: &mut VertexUnionFind) {
        // Edge-map keys of every half-edge whose endpoints may move
        let mut touched = Vec::new();
        for &v in uf.vertices() {
            for h in self.halfedges_around_target(v) {
                touched.push(h);
                touched.push(self.opposite(h));
            }
        }
        for &h in &touched {
            self.drop_edge_key(h);
        }

        let mut vertices_to_delete = Vec::new();
        for pair in pairs {
            let (h1, h2) = (pair.first, pair.second);

            // target of h1 vs source of h2
            let h1_tgt = self.target(h1);
            let h2_src = self.source(h2);
            let v_to_keep = uf.find(h1_tgt);
            if v_to_keep != h1_tgt {
                vertices_to_delete.push(h1_tgt);
                self.update_target_vertex(h1, v_to_keep);
            }
            if v_to_keep != h2_src && h1_tgt != h2_src {
                vertices_to_delete.push(h2_src);
                self.update_target_vertex(self.opposite(h2), v_to_keep);
            }
            self.set_vertex_half_edge(v_to_keep, self.opposite(h1));

            // source of h1 vs target of h2
            let h1_src = self.source(h1);
            let h2_tgt = self.target(h2);
            let v_to_keep = uf.find(h2_tgt);
            if v_to_keep != h2_tgt {
                vertices_to_delete.push(h2_tgt);
                self.update_target_vertex(h2, v_to_keep);
            }
            if v_to_keep != h1_src && h1_src != h2_tgt {
                vertices_to_delete.push(h1_src);
                self.update_target_vertex(self.opposite(h1), v_to_keep);
            }
            self.set_vertex_half_edge(v_to_keep, h1);
        }

        // Flanking half-edges bypass the seam. Some of these links are
        // overwritten below; that is cheaper than tracking which ones.
        for pair in pairs {
            let (h1, h2) = (pair.first, pair.second);
            self.set_next(self.prev(h2), self.next(h1));
            self.set_next(self.prev(h1), self.next(h2));
        }

        for pair in pairs {
            let (h1, h2) = (pair.first, pair.second);
            let h2_opp = self.opposite(h2);

            let f = self.face(h2_opp);
            self.set_face(h1, f);
            if let Some(f) = f {
                self.set_face_half_edge(f, h1);
            }
            self.set_next(self.prev(h2_opp), h1);
            self.set_next(h1, self.next(h2_opp));

            self.remove_edge(h2);
        }

        let mut deleted = 0usize;
        for v in vertices_to_delete {
            if !self.vertices[v].removed {
                self.remove_vertex(v);
                deleted += 1;
            }
        }

        for h in touched {
            if !self.half_edges[h].removed {
                self.insert_edge_key(h);
            }
        }

        log::debug!("surgery: {} pairs stitched, {} vertices deleted", pairs.len(), deleted);
    }
}
