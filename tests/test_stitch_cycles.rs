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

use seamweld::geometry::Point2;
use seamweld::mesh::basic_types::Mesh;
use seamweld::mesh_processing::stitch::StitchOpts;
use seamweld::numeric::exact_f64::ExactF64;

/// A 3x2 grid of quads cut along y = 0 from x = 0 to x = 2. The cut ends at
/// vertex 2, so the outer border runs into the slit and back out:
///
/// ```text
///   4 ---- 5 ---- 6 ---- 7
///   |      |      |      |
///   0 ---- 1 ---- 2 ---- 3      upper copies 0, 1
///   8 ---- 9 ---/ |      |      lower copies 8, 9
///   |      |      |      |
///   10 --- 11 --- 12 --- 13
/// ```
fn slit_grid() -> Mesh<ExactF64, 2> {
    stacked_slit_grids(1)
}

/// `layers` copies of the slit grid at the same coordinates, copy `k` using
/// vertices `14 * k ..`. The copies share no vertex, so each one is its own
/// component.
fn stacked_slit_grids(layers: usize) -> Mesh<ExactF64, 2> {
    let coords = [
        [0.0, 0.0],
        [1.0, 0.0],
        [2.0, 0.0],
        [3.0, 0.0],
        [0.0, 1.0],
        [1.0, 1.0],
        [2.0, 1.0],
        [3.0, 1.0],
        [0.0, 0.0],
        [1.0, 0.0],
        [0.0, -1.0],
        [1.0, -1.0],
        [2.0, -1.0],
        [3.0, -1.0],
    ];
    let quads: [[usize; 4]; 6] = [
        [0, 1, 5, 4],
        [1, 2, 6, 5],
        [2, 3, 7, 6],
        [10, 11, 9, 8],
        [11, 12, 2, 9],
        [12, 13, 3, 2],
    ];

    let points = (0..layers).flat_map(|_| coords.iter().map(|&c| Point2::from_vals(c)));
    let polygons: Vec<Vec<usize>> = (0..layers)
        .flat_map(|k| {
            quads
                .iter()
                .map(move |q| q.iter().map(|&v| v + 14 * k).collect::<Vec<usize>>())
        })
        .collect();
    Mesh::from_polygons(points, &polygons).unwrap()
}

#[test]
fn test_slit_boundary() {
    let mesh = slit_grid();
    assert!(mesh.validate_connectivity().is_ok());
    assert_eq!(mesh.num_boundary_cycles(), 1);
    assert_eq!(mesh.boundary_cycle(mesh.boundary_cycles()[0]).len(), 14);
    assert_eq!(mesh.num_edges(), 19);
}

#[test]
fn test_stitch_slit_zig_zag() {
    let mut mesh = slit_grid();
    let h = mesh.half_edge_between(9, 2).unwrap();
    assert!(mesh.is_border(h));

    assert_eq!(mesh.stitch_boundary_cycle(h), 2);

    assert!(mesh.validate_connectivity().is_ok());
    assert_eq!(mesh.num_vertices(), 12);
    assert_eq!(mesh.num_faces(), 6);
    assert_eq!(mesh.num_edges(), 17);
    assert_eq!(mesh.num_boundary_cycles(), 1);
    assert_eq!(mesh.boundary_cycle(mesh.boundary_cycles()[0]).len(), 10);

    // What is left is the outer rim, linked both ways
    let start = mesh.half_edge_between(8, 4).unwrap();
    let mut backwards = Vec::new();
    let mut h = start;
    loop {
        assert!(mesh.is_border(h));
        assert_eq!(mesh.next(mesh.prev(h)), h);
        assert_eq!(mesh.prev(mesh.next(h)), h);
        backwards.push(mesh.target(h));
        h = mesh.prev(h);
        if h == start {
            break;
        }
    }
    assert_eq!(backwards, vec![4, 8, 10, 11, 12, 13, 3, 7, 6, 5]);

    let forwards: Vec<usize> = mesh
        .boundary_cycle(start)
        .into_iter()
        .map(|h| mesh.target(h))
        .collect();
    assert_eq!(forwards, vec![4, 5, 6, 7, 3, 13, 12, 11, 10, 8]);

    // The lower copies are kept, the slit is now interior
    assert!(mesh.vertices[0].removed);
    assert!(mesh.vertices[1].removed);
    for (a, b) in [(8, 9), (9, 2)] {
        let seam = mesh.half_edge_between(a, b).unwrap();
        assert!(!mesh.is_border_edge(seam));
    }
    assert!(mesh.half_edge_between(9, 5).is_some());
    assert!(mesh.half_edge_between(4, 8).is_some());

    // Nothing left to fold
    let h = mesh.boundary_cycles()[0];
    assert_eq!(mesh.stitch_boundary_cycle(h), 0);
}

#[test]
fn test_stitch_slit_from_any_border_edge() {
    // Starting away from the fold still finds it
    let mut mesh = slit_grid();
    let h = mesh.half_edge_between(13, 12).unwrap();
    assert_eq!(mesh.stitch_boundary_cycle(h), 2);
    assert!(mesh.validate_connectivity().is_ok());
}

#[test]
fn test_stitch_slit_through_stitch_borders() {
    let mut mesh = slit_grid();
    assert_eq!(mesh.stitch_boundary_cycles(), 2);
    assert_eq!(mesh.stitch_borders(&StitchOpts::default()), 0);

    let mut fresh = slit_grid();
    assert_eq!(fresh.stitch_borders(&StitchOpts::default()), 2);
    assert_eq!(fresh.num_vertices(), 12);

    let (_, components) = fresh.face_components();
    assert_eq!(components, 1);
}

#[test]
fn test_stacked_slits_stitch_within_their_own_copy() {
    let mut mesh = stacked_slit_grids(2);
    assert_eq!(mesh.num_vertices(), 28);

    // Every slit edge appears four times and every rim edge twice in the
    // same direction, so nothing matches across the whole mesh
    assert!(mesh.collect_stitchable_pairs(&StitchOpts::default()).is_empty());

    let (labels, components) = mesh.face_components();
    assert_eq!(components, 2);

    let pairs = mesh.collect_stitchable_pairs(&StitchOpts::per_component());
    assert_eq!(pairs.len(), 4);
    for p in &pairs {
        let fa = mesh.face(mesh.opposite(p.first)).unwrap();
        let fb = mesh.face(mesh.opposite(p.second)).unwrap();
        assert_eq!(labels[fa], labels[fb]);
    }
    for layer in 0..2 {
        let in_layer = pairs
            .iter()
            .filter(|p| labels[mesh.face(mesh.opposite(p.first)).unwrap()] == layer)
            .count();
        assert_eq!(in_layer, 2);
    }

    mesh.stitch_border_pairs(&pairs);
    assert_eq!(mesh.num_vertices(), 24);
    assert_eq!(mesh.num_boundary_cycles(), 2);
    assert!(mesh.validate_connectivity().is_ok());
}

#[test]
fn test_face_pair_is_not_folded() {
    // A lone triangle whose border is too short to fold onto anything
    let mut mesh = Mesh::<ExactF64, 2>::from_polygons(
        [
            Point2::from_vals([0.0, 0.0]),
            Point2::from_vals([1.0, 0.0]),
            Point2::from_vals([0.0, 1.0]),
        ],
        &[vec![0, 1, 2]],
    )
    .unwrap();
    assert_eq!(mesh.stitch_boundary_cycles(), 0);
    assert_eq!(mesh.num_half_edges(), 6);
}
