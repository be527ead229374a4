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

use seamweld::geometry::Point3;
use seamweld::mesh::basic_types::Mesh;
use seamweld::mesh::error::MeshError;
use seamweld::numeric::exact_f64::ExactF64;

type TestPoint = Point3<ExactF64>;

fn create_test_tetrahedron() -> Mesh<ExactF64, 3> {
    let mut mesh = Mesh::new();
    let v0 = mesh.add_vertex(TestPoint::from_vals([0.0, 0.0, 0.0]));
    let v1 = mesh.add_vertex(TestPoint::from_vals([1.0, 0.0, 0.0]));
    let v2 = mesh.add_vertex(TestPoint::from_vals([0.0, 1.0, 0.0]));
    let v3 = mesh.add_vertex(TestPoint::from_vals([0.0, 0.0, 1.0]));

    mesh.add_triangle(v0, v2, v1).unwrap();
    mesh.add_triangle(v0, v1, v3).unwrap();
    mesh.add_triangle(v1, v2, v3).unwrap();
    mesh.add_triangle(v0, v3, v2).unwrap();
    mesh.build_boundary_loops();
    mesh
}

fn unit_square() -> Mesh<ExactF64, 3> {
    Mesh::from_polygons(
        [
            TestPoint::from_vals([0.0, 0.0, 0.0]),
            TestPoint::from_vals([1.0, 0.0, 0.0]),
            TestPoint::from_vals([1.0, 1.0, 0.0]),
            TestPoint::from_vals([0.0, 1.0, 0.0]),
        ],
        &[vec![0, 1, 2], vec![0, 2, 3]],
    )
    .unwrap()
}

#[test]
fn test_tetrahedron_is_closed() {
    let mesh = create_test_tetrahedron();
    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_faces(), 4);
    assert_eq!(mesh.num_edges(), 6);
    assert_eq!(mesh.num_boundary_cycles(), 0);
    assert!(mesh.validate_connectivity().is_ok());

    for v in 0..4 {
        assert_eq!(mesh.halfedges_around_target(v).count(), 3);
        for h in mesh.halfedges_around_target(v) {
            assert_eq!(mesh.target(h), v);
        }
    }
}

#[test]
fn test_single_triangle_boundary() {
    let mut mesh = Mesh::<ExactF64, 3>::new();
    let v0 = mesh.add_vertex(TestPoint::from_vals([0.0, 0.0, 0.0]));
    let v1 = mesh.add_vertex(TestPoint::from_vals([1.0, 0.0, 0.0]));
    let v2 = mesh.add_vertex(TestPoint::from_vals([0.0, 1.0, 0.0]));
    let f = mesh.add_triangle(v0, v1, v2).unwrap();
    mesh.build_boundary_loops();

    assert_eq!(f, 0);
    assert_eq!(mesh.num_half_edges(), 6);
    assert_eq!(mesh.num_boundary_cycles(), 1);

    let h = mesh.boundary_cycles()[0];
    let cycle = mesh.boundary_cycle(h);
    assert_eq!(cycle.len(), 3);
    for &b in &cycle {
        assert!(mesh.is_border(b));
        assert!(mesh.is_border_edge(b));
        assert!(!mesh.is_border(mesh.opposite(b)));
        assert_eq!(mesh.target(b), mesh.source(mesh.next(b)));
    }

    // Border runs against the face orientation
    let b01 = mesh.half_edge_between(v1, v0).unwrap();
    assert!(mesh.is_border(b01));
    assert_eq!(mesh.target(mesh.next(b01)), v2);
    assert!(mesh.validate_connectivity().is_ok());
}

#[test]
fn test_square_boundary_and_interior_edge() {
    let mesh = unit_square();
    assert_eq!(mesh.num_faces(), 2);
    assert_eq!(mesh.num_edges(), 5);
    assert_eq!(mesh.num_boundary_cycles(), 1);
    assert_eq!(mesh.boundary_cycle(mesh.boundary_cycles()[0]).len(), 4);

    let diag = mesh.half_edge_between(0, 2).unwrap();
    assert!(!mesh.is_border_edge(diag));
    assert_eq!(mesh.face(diag), Some(1));
    assert_eq!(mesh.face(mesh.opposite(diag)), Some(0));
    assert!(mesh.validate_connectivity().is_ok());
}

#[test]
fn test_polygon_faces() {
    let mesh = Mesh::<ExactF64, 3>::from_polygons(
        [
            TestPoint::from_vals([0.0, 0.0, 0.0]),
            TestPoint::from_vals([1.0, 0.0, 0.0]),
            TestPoint::from_vals([2.0, 0.0, 0.0]),
            TestPoint::from_vals([2.0, 1.0, 0.0]),
            TestPoint::from_vals([1.0, 1.0, 0.0]),
            TestPoint::from_vals([0.0, 1.0, 0.0]),
        ],
        &[vec![0, 1, 4, 5], vec![1, 2, 3, 4]],
    )
    .unwrap();

    assert_eq!(mesh.num_faces(), 2);
    assert_eq!(mesh.num_edges(), 7);
    assert_eq!(mesh.boundary_cycle(mesh.boundary_cycles()[0]).len(), 6);
    assert!(mesh.validate_connectivity().is_ok());
}

#[test]
fn test_add_face_errors() {
    let mut mesh = Mesh::<ExactF64, 3>::new();
    let v0 = mesh.add_vertex(TestPoint::from_vals([0.0, 0.0, 0.0]));
    let v1 = mesh.add_vertex(TestPoint::from_vals([1.0, 0.0, 0.0]));
    let v2 = mesh.add_vertex(TestPoint::from_vals([0.0, 1.0, 0.0]));

    assert_eq!(mesh.add_triangle(v0, v1, 9), Err(MeshError::InvalidVertex(9)));
    assert!(matches!(
        mesh.add_face(&[v0, v1]),
        Err(MeshError::DegenerateFace(_))
    ));
    assert!(matches!(
        mesh.add_triangle(v0, v1, v1),
        Err(MeshError::DegenerateFace(_))
    ));

    mesh.add_triangle(v0, v1, v2).unwrap();
    assert_eq!(
        mesh.add_triangle(v0, v1, v2),
        Err(MeshError::NonManifoldEdge { from: v0, to: v1 })
    );

    // Failed insertions leave nothing behind
    assert_eq!(mesh.faces.len(), 1);
    assert_eq!(mesh.half_edges.len(), 6);
}

#[test]
fn test_error_messages() {
    assert_eq!(MeshError::InvalidVertex(7).to_string(), "vertex 7 does not exist");
    assert_eq!(
        MeshError::NonManifoldOutput { a: 1, b: 2, count: 3 }.to_string(),
        "edge (1,2) bounds 3 faces"
    );
}

#[test]
fn test_validate_detects_broken_links() {
    let mut mesh = unit_square();
    let h = mesh.half_edge_between(0, 1).unwrap();
    let n = mesh.next(h);
    mesh.half_edges[n].prev = n;
    assert!(matches!(
        mesh.validate_connectivity(),
        Err(MeshError::BrokenLink(_))
    ));
}

#[test]
fn test_face_components() {
    let mesh = Mesh::<ExactF64, 3>::from_polygons(
        [
            TestPoint::from_vals([0.0, 0.0, 0.0]),
            TestPoint::from_vals([1.0, 0.0, 0.0]),
            TestPoint::from_vals([0.0, 1.0, 0.0]),
            TestPoint::from_vals([1.0, 1.0, 0.0]),
            TestPoint::from_vals([5.0, 0.0, 0.0]),
            TestPoint::from_vals([6.0, 0.0, 0.0]),
            TestPoint::from_vals([5.0, 1.0, 0.0]),
        ],
        &[vec![0, 1, 2], vec![1, 3, 2], vec![4, 5, 6]],
    )
    .unwrap();

    let (labels, count) = mesh.face_components();
    assert_eq!(count, 2);
    assert_eq!(labels, vec![0, 0, 1]);
}

#[test]
fn test_remove_garbage_is_noop_on_clean_mesh() {
    let mut mesh = create_test_tetrahedron();
    assert_eq!(mesh.remove_garbage(), (0, 0, 0));
    assert_eq!(mesh.half_edges.len(), 12);
    assert!(mesh.validate_connectivity().is_ok());
}

#[test]
fn test_exact_scalars() {
    use seamweld::numeric::exact_rational::ExactRational;
    use seamweld::numeric::scalar::Scalar;

    assert_eq!(ExactF64::new(-0.0), ExactF64::new(0.0));
    assert_ne!(ExactF64::new(0.1 + 0.2), ExactF64::new(0.3));
    assert!(ExactF64::new(-1.0) < ExactF64::new(0.5));

    assert_eq!(ExactRational::from_num_den(2, 6), ExactRational::from_num_den(1, 3));
    assert_eq!(
        ExactRational::from(ExactF64::new(0.5)),
        ExactRational::from_num_den(1, 2)
    );
    assert_eq!(
        ExactF64::from(ExactRational::from_num_den(1, 4)),
        ExactF64::new(0.25)
    );
    assert_eq!(ExactRational::from_num_den(1, 4).to_f64_lossy(), 0.25);
}

#[test]
fn test_exact_f64_zero_is_one_coordinate() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let hash = |x: ExactF64| {
        let mut h = DefaultHasher::new();
        x.hash(&mut h);
        h.finish()
    };

    // Every way of building a value goes through the zero folding
    let neg = ExactF64::from(-0.0);
    let pos = ExactF64::from(0.0);
    assert_eq!(neg, pos);
    assert_eq!(neg.cmp(&pos), std::cmp::Ordering::Equal);
    assert_eq!(hash(neg), hash(pos));
    assert_eq!(f64::from(neg).to_bits(), 0.0f64.to_bits());
    assert_eq!(TestPoint::from_vals([-0.0, 1.0, -0.0]), TestPoint::from_vals([0.0, 1.0, 0.0]));
}
