// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Whether `a` and `b` lie within `tolerance` of each other.
#[inline]
pub(crate) fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

/// `a >= b`, allowing `a` to fall short of `b` by less than `tolerance`.
#[inline]
pub(crate) fn approx_ge(a: f64, b: f64, tolerance: f64) -> bool {
    a > b - tolerance
}
