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

use crate::impl_mesh;

impl_mesh! {
    /// Labels live faces by edge-connected component.
    ///
    /// Returns the label of every face (indexed by face, `usize::MAX` for
    /// removed faces) and the number of components. Labels are assigned in
    /// order of the lowest face index of each component.
    pub fn face_components(&self) -> (Vec<usize>, usize) {
        let mut labels = vec![usize::MAX; self.faces.len()];
        let mut count = 0;
        let mut stack = Vec::new();

        for seed in self.faces_iter() {
            if labels[seed] != usize::MAX {
                continue;
            }
            labels[seed] = count;
            stack.push(seed);

            while let Some(f) = stack.pop() {
                let start = self.faces[f].half_edge;
                let mut h = start;
                loop {
                    if let Some(g) = self.half_edges[self.half_edges[h].twin].face {
                        if labels[g] == usize::MAX {
                            labels[g] = count;
                            stack.push(g);
                        }
                    }
                    h = self.half_edges[h].next;
                    if h == start {
                        break;
                    }
                }
            }
            count += 1;
        }

        (labels, count)
    }
}
