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

use ahash::AHashMap;

/// Disjoint sets over vertex indices, created lazily on first touch.
///
/// Path halving + union by rank. Only vertices involved in a merge get a
/// slot, so the structure stays proportional to the border being stitched
/// rather than to the whole mesh. Representatives are stable between unions.
#[derive(Debug, Default, Clone)]
pub struct VertexUnionFind {
    slots: AHashMap<usize, usize>,
    /// Slot to vertex; also the first-touch order used for iteration.
    order: Vec<usize>,
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl VertexUnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, v: usize) -> bool {
        self.slots.contains_key(&v)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every vertex that took part in a union, in first-touch order.
    pub fn vertices(&self) -> &[usize] {
        &self.order
    }

    fn slot(&mut self, v: usize) -> usize {
        if let Some(&s) = self.slots.get(&v) {
            return s;
        }
        let s = self.order.len();
        self.slots.insert(v, s);
        self.order.push(v);
        self.parent.push(s);
        self.rank.push(0);
        s
    }

    fn root(&mut self, mut s: usize) -> usize {
        while self.parent[s] != s {
            self.parent[s] = self.parent[self.parent[s]]; // Path halving
            s = self.parent[s];
        }
        s
    }

    /// Representative of `v`'s set. Untracked vertices become singletons.
    pub fn find(&mut self, v: usize) -> usize {
        let s = self.slot(v);
        let r = self.root(s);
        self.order[r]
    }

    pub fn union(&mut self, a: usize, b: usize) {
        let sa = self.slot(a);
        let sb = self.slot(b);
        let ra = self.root(sa);
        let rb = self.root(sb);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
        self.parent.clear();
        self.rank.clear();
    }
}
