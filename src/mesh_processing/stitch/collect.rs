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

use std::collections::{BTreeMap, hash_map::Entry};

use ahash::AHashMap;

use crate::{
    geometry::point::Point,
    impl_mesh,
    mesh::basic_types::Mesh,
    mesh_processing::stitch::{HalfEdgePair, StitchOpts},
    numeric::scalar::Scalar,
};

#[derive(Debug, Clone, Copy)]
struct Slot {
    first: usize,
    multiplicity: u32,
    pair: usize,
}

/// Border half-edges bucketed by their unordered endpoint coordinates.
///
/// A key only proves the two endpoint *sets* coincide; the direction is
/// checked again when the second half-edge arrives. A third arrival on the
/// same key makes the whole group ambiguous.
struct BorderBuckets<'m, T: Scalar, const N: usize> {
    mesh: &'m Mesh<T, N>,
    slots: AHashMap<(&'m Point<T, N>, &'m Point<T, N>), Slot>,
    pairs: Vec<HalfEdgePair>,
    safe: Vec<bool>,
}

impl<'m, T: Scalar, const N: usize> BorderBuckets<'m, T, N> {
    fn new(mesh: &'m Mesh<T, N>) -> Self {
        Self {
            mesh,
            slots: AHashMap::new(),
            pairs: Vec::new(),
            safe: Vec::new(),
        }
    }

    fn insert(&mut self, h: usize) {
        let mesh = self.mesh;
        let p = mesh.point(mesh.source(h));
        let q = mesh.point(mesh.target(h));
        let key = if p < q { (p, q) } else { (q, p) };

        match self.slots.entry(key) {
            Entry::Vacant(e) => {
                e.insert(Slot {
                    first: h,
                    multiplicity: 1,
                    pair: usize::MAX,
                });
            }
            Entry::Occupied(mut e) => {
                let slot = e.get_mut();
                slot.multiplicity += 1;
                if slot.multiplicity == 2 {
                    let first = slot.first;
                    slot.pair = self.pairs.len();
                    self.pairs.push(HalfEdgePair::new(first, h));
                    let consistent = mesh.point(mesh.source(h)) == mesh.point(mesh.target(first))
                        && mesh.point(mesh.target(h)) == mesh.point(mesh.source(first));
                    self.safe.push(consistent);
                } else {
                    self.safe[slot.pair] = false;
                }
            }
        }
    }

    /// Drains the accepted pairs into `out` and resets the buckets.
    fn flush(&mut self, out: &mut Vec<HalfEdgePair>) {
        let rejected = self.safe.iter().filter(|&&ok| !ok).count();
        if rejected > 0 {
            log::debug!(
                "collect: {} of {} candidate pairs rejected as ambiguous or misoriented",
                rejected,
                self.pairs.len()
            );
        }
        out.extend(
            self.pairs
                .drain(..)
                .zip(self.safe.drain(..))
                .filter_map(|(pair, ok)| ok.then_some(pair)),
        );
        self.slots.clear();
    }
}

impl_mesh! {
    /// Border half-edges that may take part in a stitch: their twin must
    /// carry a face, otherwise there is nothing to glue.
    fn stitch_candidates(&self) -> impl Iterator<Item = usize> + '_ {
        self.halfedges()
            .filter(move |&h| self.is_border(h) && !self.is_border(self.opposite(h)))
    }

    /// Finds border half-edge pairs whose endpoints coincide exactly, in
    /// opposite directions.
    ///
    /// A pair is only reported if its key is matched by exactly two
    /// half-edges; three or more coincident border edges are left alone.
    /// With `per_connected_component`, matching happens separately inside
    /// each component (by the face of the twin half-edge).
    pub fn collect_stitchable_pairs(&self, opts: &StitchOpts) -> Vec<HalfEdgePair> {
        let mut out = Vec::new();
        let mut buckets = BorderBuckets::new(self);

        if !opts.per_connected_component {
            for h in self.stitch_candidates() {
                buckets.insert(h);
            }
            buckets.flush(&mut out);
            log::debug!("collect: {} stitchable pairs", out.len());
            return out;
        }

        let computed;
        let labels: &[usize] = match &opts.face_components {
            Some(labels) => labels.as_slice(),
            None => {
                computed = self.face_components().0;
                computed.as_slice()
            }
        };

        let mut per_component: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for h in self.stitch_candidates() {
            let Some(f) = self.face(self.opposite(h)) else { continue };
            let Some(&cc) = labels.get(f) else {
                log::warn!("collect: face {} has no component label, skipped", f);
                continue;
            };
            per_component.entry(cc).or_default().push(h);
        }

        for border in per_component.values() {
            for &h in border {
                buckets.insert(h);
            }
            buckets.flush(&mut out);
        }
        log::debug!(
            "collect: {} stitchable pairs over {} components",
            out.len(),
            per_component.len()
        );
        out
    }
}
