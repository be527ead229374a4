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

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use seamweld::geometry::Point2;
use seamweld::mesh::basic_types::Mesh;
use seamweld::mesh_processing::stitch::StitchOpts;
use seamweld::numeric::exact_f64::ExactF64;

/// One slot per entry of `copies`: that many triangles, each with its own
/// vertices, all sharing the segment (x,0)-(x,1). Copies alternate between
/// the left and the right of the segment.
fn fan_of_sheets(copies: &[usize]) -> Mesh<ExactF64, 2> {
    let mut mesh = Mesh::new();
    for (slot, &m) in copies.iter().enumerate() {
        let x = 10.0 * slot as f64;
        for j in 0..m {
            let d = (j + 1) as f64;
            let bottom = mesh.add_vertex(Point2::from_vals([x, 0.0]));
            let top = mesh.add_vertex(Point2::from_vals([x, 1.0]));
            if j % 2 == 0 {
                let apex = mesh.add_vertex(Point2::from_vals([x - d, 0.5]));
                mesh.add_triangle(bottom, top, apex).unwrap();
            } else {
                let apex = mesh.add_vertex(Point2::from_vals([x + d, 0.5]));
                mesh.add_triangle(bottom, apex, top).unwrap();
            }
        }
    }
    mesh.build_boundary_loops();
    mesh
}

#[test]
fn test_random_multiplicities_only_stitch_unique_matches() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        let slots = rng.random_range(1..12);
        let copies: Vec<usize> = (0..slots).map(|_| rng.random_range(1..=4)).collect();
        let mut mesh = fan_of_sheets(&copies);

        let half_edges = mesh.num_half_edges();
        let faces = mesh.num_faces();
        let expected = copies.iter().filter(|&&m| m == 2).count();

        let stitched = mesh.stitch_borders(&StitchOpts::default());
        assert_eq!(stitched, expected, "copies {:?}", copies);
        assert_eq!(half_edges - mesh.num_half_edges(), 2 * stitched);
        assert_eq!(mesh.num_faces(), faces);
        assert!(mesh.validate_connectivity().is_ok());
    }
}

#[test]
fn test_random_per_component_never_stitches_sheets() {
    // Every triangle is its own component
    let mut rng = StdRng::seed_from_u64(42);
    let copies: Vec<usize> = (0..16).map(|_| rng.random_range(1..=4)).collect();
    let mut mesh = fan_of_sheets(&copies);
    assert_eq!(mesh.stitch_borders(&StitchOpts::per_component()), 0);
}

proptest! {
    #[test]
    fn prop_stitch_borders_is_idempotent(copies in prop::collection::vec(1usize..=4, 1..8)) {
        let mut mesh = fan_of_sheets(&copies);
        mesh.stitch_borders(&StitchOpts::default());
        prop_assert!(mesh.validate_connectivity().is_ok());

        let half_edges = mesh.num_half_edges();
        let vertices = mesh.num_vertices();
        prop_assert_eq!(mesh.stitch_borders(&StitchOpts::default()), 0);
        prop_assert_eq!(mesh.num_half_edges(), half_edges);
        prop_assert_eq!(mesh.num_vertices(), vertices);
    }
}
