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

//! Errors raised while building or validating a mesh.
//!
//! Stitching itself never fails: candidates it cannot merge safely are
//! skipped. These errors only come out of construction and of
//! [`Mesh::validate_connectivity`](crate::mesh::basic_types::Mesh::validate_connectivity).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face referenced a vertex index that does not exist or was removed.
    #[error("vertex {0} does not exist")]
    InvalidVertex(usize),
    /// Fewer than three vertices, or a vertex repeated within one face.
    #[error("degenerate face: {0}")]
    DegenerateFace(String),
    /// Both sides of the directed edge are already bound to faces.
    #[error("edge ({from},{to}) is already bound to a face in that direction")]
    NonManifoldEdge { from: usize, to: usize },
    /// A next/prev/twin/face/vertex reference is inconsistent.
    #[error("broken connectivity: {0}")]
    BrokenLink(String),
    /// More than two faces meet along the same two vertices.
    #[error("edge ({a},{b}) bounds {count} faces")]
    NonManifoldOutput { a: usize, b: usize, count: usize },
}
