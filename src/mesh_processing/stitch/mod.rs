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

//! Border stitching: welds coincident boundary edges into shared interior
//! edges.
//!
//! Two border half-edges `h1`, `h2` can be stitched when the point of
//! `source(h1)` equals the point of `target(h2)` and the point of
//! `target(h1)` equals the point of `source(h2)`. Points are compared
//! exactly; there is no snapping tolerance.
//!
//! Every entry point runs the same pipeline: candidates are found (by the
//! global border collector or by walking a single boundary cycle), pairs that
//! would create a non-manifold edge are dropped, and the survivors are
//! welded in place. Nothing here reports an error: whatever cannot be
//! stitched safely is left open.

pub mod collect;
pub mod cycle;
pub mod filter;
pub mod surgery;
pub mod union_find;

use crate::impl_mesh;

/// Two border half-edges to weld. `second` and its twin are removed,
/// `first` survives as an interior half-edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfEdgePair {
    pub first: usize,
    pub second: usize,
}

impl HalfEdgePair {
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}

impl From<(usize, usize)> for HalfEdgePair {
    fn from((first, second): (usize, usize)) -> Self {
        Self::new(first, second)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StitchOpts {
    /// If true, only border edges of the same connected component are
    /// matched with each other.
    pub per_connected_component: bool,
    /// Component label of every face, indexed by face. When `None` the labels
    /// come from [`Mesh::face_components`](crate::mesh::basic_types::Mesh::face_components).
    pub face_components: Option<Vec<usize>>,
}

impl StitchOpts {
    pub fn per_component() -> Self {
        Self {
            per_connected_component: true,
            face_components: None,
        }
    }

    /// Confines stitching to caller supplied face labels.
    pub fn with_face_components(mut self, labels: Vec<usize>) -> Self {
        self.per_connected_component = true;
        self.face_components = Some(labels);
        self
    }
}

impl_mesh! {
    /// Filters and welds `pairs`; returns how many were welded.
    pub(crate) fn stitch_pairs(&mut self, pairs: &[HalfEdgePair]) -> usize {
        for p in pairs {
            debug_assert!(
                self.is_border(p.first) && self.is_border(p.second),
                "stitch: pair ({}, {}) is not made of border half-edges",
                p.first,
                p.second
            );
            debug_assert!(
                !self.is_border(self.opposite(p.first)) && !self.is_border(self.opposite(p.second)),
                "stitch: pair ({}, {}) has a border opposite",
                p.first,
                p.second
            );
        }

        let (filtered, mut uf) = self.filter_stitchable_pairs(pairs);
        if log::log_enabled!(log::Level::Trace) {
            for p in &filtered {
                log::trace!(
                    "stitch half-edges {} ({:?} -> {:?}) and {} ({:?} -> {:?})",
                    p.first,
                    self.point(self.source(p.first)).to_f64_array(),
                    self.point(self.target(p.first)).to_f64_array(),
                    p.second,
                    self.point(self.source(p.second)).to_f64_array(),
                    self.point(self.target(p.second)).to_f64_array(),
                );
            }
        }
        self.run_stitch_borders(&filtered, &mut uf);
        filtered.len()
    }

    /// Stitches exactly the given pairs, without looking for others.
    ///
    /// Each pair must be made of two border half-edges whose twins carry a
    /// face and whose endpoints coincide in opposite directions. Pairs that
    /// would make an edge non-manifold are skipped. For each stitched pair,
    /// `second` and its twin are removed from the mesh.
    pub fn stitch_border_pairs(&mut self, pairs: &[HalfEdgePair]) {
        self.stitch_pairs(pairs);
    }

    /// Finds and stitches every pair of coincident border edges.
    ///
    /// Boundary cycles are first stitched onto themselves, then duplicated
    /// border edges are matched across the mesh (or within each component,
    /// see [`StitchOpts`]), then cycles are stitched once more since the
    /// global pass can expose new folds. Returns the total number of pairs
    /// stitched.
    pub fn stitch_borders(&mut self, opts: &StitchOpts) -> usize {
        let mut stitched = self.stitch_boundary_cycles();

        let pairs = self.collect_stitchable_pairs(opts);
        stitched += self.stitch_pairs(&pairs);

        stitched += self.stitch_boundary_cycles();
        log::debug!("stitch_borders: {} pairs stitched", stitched);
        stitched
    }
}
