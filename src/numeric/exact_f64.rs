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

use num_traits::ToPrimitive;

use crate::numeric::{exact_rational::ExactRational, scalar::Scalar};

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// `f64` coordinate compared bit for bit.
///
/// `-0.0` is folded into `0.0` on construction, after that two values are
/// equal iff their bit patterns are.
#[derive(Clone, Copy, Debug)]
pub struct ExactF64(f64);

impl ExactF64 {
    #[inline(always)]
    pub fn new(value: f64) -> Self {
        if value == 0.0 { ExactF64(0.0) } else { ExactF64(value) }
    }
}

impl Scalar for ExactF64 {
    fn from_num_den(num: i32, den: i32) -> Self {
        ExactF64::new(num as f64 / den as f64)
    }
}

impl From<i32> for ExactF64 {
    fn from(value: i32) -> Self {
        ExactF64::new(value as f64)
    }
}

impl From<f64> for ExactF64 {
    fn from(value: f64) -> Self {
        ExactF64::new(value)
    }
}

impl From<ExactF64> for f64 {
    fn from(value: ExactF64) -> Self {
        value.0
    }
}

impl From<ExactRational> for ExactF64 {
    fn from(value: ExactRational) -> Self {
        ExactF64::new(value.0.to_f64())
    }
}

impl PartialEq for ExactF64 {
    fn eq(&self, other: &ExactF64) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for ExactF64 {}

impl PartialOrd for ExactF64 {
    fn partial_cmp(&self, other: &ExactF64) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExactF64 {
    #[inline(always)]
    fn cmp(&self, other: &ExactF64) -> Ordering {
        // total_cmp is consistent with bitwise equality
        self.0.total_cmp(&other.0)
    }
}

impl Hash for ExactF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl ToPrimitive for ExactF64 {
    fn to_i64(&self) -> Option<i64> {
        Some(self.0 as i64)
    }
    fn to_u64(&self) -> Option<u64> {
        Some(self.0 as u64)
    }
    fn to_f32(&self) -> Option<f32> {
        Some(self.0 as f32)
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.0)
    }
}
