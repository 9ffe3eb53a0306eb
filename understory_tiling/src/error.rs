// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by structural edits and partition checks.

use core::fmt;

use crate::cell::CellId;

/// Failure of a structural edit. The grid is left untouched when one is returned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TilingError {
    /// No side of the cell has neighbors that can be extended to cover it.
    GapCannotBeFilled {
        /// The cell that was asked to be deleted.
        cell: CellId,
    },
    /// A split ratio outside the open interval `(0, 1)`.
    InvalidRatio {
        /// The rejected ratio.
        ratio: f64,
    },
    /// The id does not name a live cell.
    StaleCell {
        /// The stale id.
        cell: CellId,
    },
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GapCannotBeFilled { cell } => {
                write!(f, "gap left by {cell:?} cannot be filled by any aligned neighbors")
            }
            Self::InvalidRatio { ratio } => {
                write!(f, "split ratio {ratio} is outside the open interval (0, 1)")
            }
            Self::StaleCell { cell } => write!(f, "{cell:?} does not name a live cell"),
        }
    }
}

impl core::error::Error for TilingError {}

/// A broken tiling found by [`Grid::check_partition`](crate::Grid::check_partition).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PartitionViolation {
    /// The cell has zero or negative extent on some axis.
    Degenerate {
        /// Offending cell.
        cell: CellId,
    },
    /// The cell reaches outside the container.
    OutOfBounds {
        /// Offending cell.
        cell: CellId,
    },
    /// Two cells share a region of positive area.
    Overlap {
        /// First cell, in insertion order.
        a: CellId,
        /// Second cell.
        b: CellId,
    },
    /// The cell areas do not add up to the container.
    Coverage {
        /// Sum of all cell areas, as a fraction of the container.
        area: f64,
    },
}

impl fmt::Display for PartitionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degenerate { cell } => write!(f, "{cell:?} has no extent"),
            Self::OutOfBounds { cell } => write!(f, "{cell:?} extends outside the container"),
            Self::Overlap { a, b } => write!(f, "{a:?} overlaps {b:?}"),
            Self::Coverage { area } => {
                write!(f, "cells cover {area} of the container instead of 1")
            }
        }
    }
}

impl core::error::Error for PartitionViolation {}
