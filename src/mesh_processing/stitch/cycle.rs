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

use ahash::AHashSet;

use crate::{impl_mesh, mesh_processing::stitch::HalfEdgePair};

impl_mesh! {
    /// `hn` is where its border cycle folds back onto itself: the cycle
    /// returns to the point it left from two half-edges later. Zero-length
    /// edges never count as folds.
    fn is_fold_point(&self, hn: usize) -> bool {
        let src = self.point(self.source(hn));
        src == self.point(self.target(self.next(hn))) && src != self.point(self.target(hn))
    }

    /// Pairs collected by walking outwards from the fold at `start`: one side
    /// moves backwards with `prev`, the mirrored side forwards with `next`.
    fn fold_walk(&self, start: usize, visited: &mut AHashSet<usize>) -> Vec<HalfEdgePair> {
        let mut pairs = Vec::new();
        let mut h = start;
        let mut hn = self.next(h);
        loop {
            let (fa, fb) = (self.face(self.opposite(h)), self.face(self.opposite(hn)));
            // Gluing two sides of one face would collapse it
            if fa.is_none() || fb.is_none() || fa == fb {
                break;
            }

            pairs.push(HalfEdgePair::new(h, hn));
            visited.insert(h);
            visited.insert(hn);

            if self.next(hn) == h {
                break;
            }

            h = self.prev(h);
            hn = self.next(hn);
            if h == hn || visited.contains(&h) || visited.contains(&hn) {
                break;
            }
            if self.point(self.source(h)) != self.point(self.target(hn))
                || self.point(self.source(hn)) == self.point(self.target(hn))
            {
                break;
            }
        }
        pairs
    }

    /// Stitches the border cycle through `h` onto itself wherever it folds.
    ///
    /// A cycle may fold at several places, e.g. a hole whose rim touches
    /// itself at two pinch points:
    ///
    /// ```text
    ///                        v11 ------ v10
    ///                         |          |
    ///   v0 --- v1(v13) === v2(v12)     v5(v9) === v6(v8) --- v7
    ///                         |          |
    ///                        v3 ------- v4
    /// ```
    ///
    /// Each fold is walked and stitched before the next one is looked at,
    /// since the stitch rewires the cycle. Returns the number of pairs
    /// stitched.
    pub fn stitch_boundary_cycle(&mut self, h: usize) -> usize {
        debug_assert!(self.is_border(h), "stitch_boundary_cycle: {} is not a border half-edge", h);

        let starts: Vec<usize> = self
            .boundary_cycle(h)
            .into_iter()
            .filter(|&hn| self.is_fold_point(hn))
            .collect();

        let mut visited = AHashSet::new();
        let mut stitched = 0;
        for start in starts {
            if visited.contains(&start) || self.half_edges[start].removed || !self.is_border(start) {
                continue;
            }
            // Earlier stitches may have rewired the cycle around `start`
            if !self.is_fold_point(start) {
                continue;
            }

            let pairs = self.fold_walk(start, &mut visited);
            if !pairs.is_empty() {
                stitched += self.stitch_pairs(&pairs);
            }
        }

        if stitched > 0 {
            log::debug!("stitch_boundary_cycle: {} pairs stitched on cycle of {}", stitched, h);
        }
        stitched
    }

    /// Runs [`Mesh::stitch_boundary_cycle`] once on every boundary cycle.
    pub fn stitch_boundary_cycles(&mut self) -> usize {
        let mut stitched = 0;
        for h in self.boundary_cycles() {
            if self.half_edges[h].removed || !self.is_border(h) {
                continue;
            }
            stitched += self.stitch_boundary_cycle(h);
        }
        stitched
    }
}
