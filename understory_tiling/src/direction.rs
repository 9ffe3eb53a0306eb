// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The four sides of a cell and their rotations.

use core::fmt;

/// One side of a rectangle, and the container edge an offset is measured from.
///
/// The discriminants are fixed: `Top = 0`, `Left = 1`, `Bottom = 2`, `Right = 3`.
/// Rotations are arithmetic on these values modulo 4, so
/// [`Direction::ccw`] walks `Top → Left → Bottom → Right`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    /// Distance from the top edge of the container.
    Top = 0,
    /// Distance from the left edge of the container.
    Left = 1,
    /// Distance from the bottom edge of the container.
    Bottom = 2,
    /// Distance from the right edge of the container.
    Right = 3,
}

impl Direction {
    /// All directions in index order.
    ///
    /// This is also the preference order used when a deleted cell could be
    /// merged into more than one side.
    pub const ALL: [Self; 4] = [Self::Top, Self::Left, Self::Bottom, Self::Right];

    /// Numeric index of this direction (`0..4`).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index, taken modulo 4.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Top,
            1 => Self::Left,
            2 => Self::Bottom,
            _ => Self::Right,
        }
    }

    /// The facing side.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Rotate counterclockwise.
    #[inline]
    pub const fn ccw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate clockwise.
    #[inline]
    pub const fn cw(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Whether offsets in this direction are measured along the x axis.
    ///
    /// True for [`Direction::Left`] and [`Direction::Right`].
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        self.index() % 2 == 1
    }

    /// The side at the low-coordinate end of this direction's axis.
    #[inline]
    pub const fn lower(self) -> Self {
        if self.is_horizontal() {
            Self::Left
        } else {
            Self::Top
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Bottom => "bottom",
            Self::Right => "right",
        })
    }
}
