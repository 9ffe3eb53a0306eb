// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell identifiers and the fractional rectangle stored for each cell.

use alloc::string::String;
use core::fmt::Write as _;

use kurbo::{Point, Rect, Size};

use crate::direction::Direction;

/// Identifier for a cell in a [`Grid`](crate::Grid) (generational).
///
/// Ids stay valid until the cell is removed. A removed slot may be reused, but
/// the generation changes, so an old id never resolves to the new cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) u32, pub(crate) u32);

impl CellId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// A rectangle inside the unit square of its container.
///
/// Each field is the distance from the corresponding container edge to the
/// near edge of the cell, as a fraction of the container's extent on that
/// axis. A cell with all four offsets at `0.0` fills the container.
///
/// No validation happens here; [`Grid`](crate::Grid) and [`Edge`](crate::Edge)
/// operations keep `top + bottom < 1` and `left + right < 1`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cell {
    /// Distance from the container's top edge.
    pub top: f64,
    /// Distance from the container's left edge.
    pub left: f64,
    /// Distance from the container's bottom edge.
    pub bottom: f64,
    /// Distance from the container's right edge.
    pub right: f64,
}

impl Cell {
    /// A cell covering the whole container.
    pub const FULL: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a cell from its four offsets.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Offset from the container edge in `direction`.
    #[inline]
    pub const fn offset(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Top => self.top,
            Direction::Left => self.left,
            Direction::Bottom => self.bottom,
            Direction::Right => self.right,
        }
    }

    /// Set the offset from the container edge in `direction`.
    #[inline]
    pub fn set_offset(&mut self, direction: Direction, value: f64) {
        match direction {
            Direction::Top => self.top = value,
            Direction::Left => self.left = value,
            Direction::Bottom => self.bottom = value,
            Direction::Right => self.right = value,
        }
    }

    /// Fractional extent along `direction`'s axis: `1 - offset(d) - offset(opposite(d))`.
    #[inline]
    pub const fn extent(&self, direction: Direction) -> f64 {
        1.0 - self.offset(direction) - self.offset(direction.opposite())
    }

    /// Fractional width.
    pub const fn width(&self) -> f64 {
        self.extent(Direction::Left)
    }

    /// Fractional height.
    pub const fn height(&self) -> f64 {
        self.extent(Direction::Top)
    }

    /// Fraction of the container covered by this cell.
    pub const fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// The cell in unit-square coordinates (origin at the container's top left).
    pub fn unit_rect(&self) -> Rect {
        Rect::new(self.left, self.top, 1.0 - self.right, 1.0 - self.bottom)
    }

    /// Offset in `direction`, in pixels of a container of `size`.
    pub fn distance_px(&self, direction: Direction, size: Size) -> f64 {
        self.offset(direction) * axis_len(direction, size)
    }

    /// Set the offset in `direction` from a pixel distance.
    ///
    /// The value is stored as a fraction, so the cell keeps its relative
    /// placement when the container is later resized.
    pub fn set_distance_px(&mut self, direction: Direction, value: f64, size: Size) {
        self.set_offset(direction, value / axis_len(direction, size));
    }

    /// Move the edge in `direction` by `delta` pixels (positive grows the offset).
    pub fn change_distance_px(&mut self, direction: Direction, delta: f64, size: Size) {
        self.set_distance_px(direction, self.distance_px(direction, size) + delta, size);
    }

    /// Pixel extent along `direction`'s axis.
    pub fn extent_px(&self, direction: Direction, size: Size) -> f64 {
        self.extent(direction) * axis_len(direction, size)
    }

    /// Offset in `direction` as a percentage (`0..=100`).
    pub fn distance_percent(&self, direction: Direction) -> f64 {
        self.offset(direction) * 100.0
    }

    /// Set the offset in `direction` from a percentage.
    pub fn set_distance_percent(&mut self, direction: Direction, value: f64) {
        self.set_offset(direction, value / 100.0);
    }

    /// Top-left and bottom-right corners in container pixels.
    pub fn corners(&self, size: Size) -> (Point, Point) {
        (
            Point::new(
                self.distance_px(Direction::Left, size),
                self.distance_px(Direction::Top, size),
            ),
            Point::new(
                size.width - self.distance_px(Direction::Right, size),
                size.height - self.distance_px(Direction::Bottom, size),
            ),
        )
    }

    /// Pixel rectangle of this cell in a container of `size`.
    pub fn rect(&self, size: Size) -> Rect {
        let (p0, p1) = self.corners(size);
        Rect::from_points(p0, p1)
    }

    /// Debug string of the offsets in index order, `"top;left;bottom;right"`.
    ///
    /// Not unique: two cells may have identical offsets.
    pub fn id_string(&self) -> String {
        let mut s = String::new();
        for (i, d) in Direction::ALL.into_iter().enumerate() {
            if i > 0 {
                s.push(';');
            }
            let _ = write!(s, "{}", self.offset(d));
        }
        s
    }
}

/// Container length along the axis that offsets in `direction` are measured on.
#[inline]
pub(crate) fn axis_len(direction: Direction, size: Size) -> f64 {
    if direction.is_horizontal() {
        size.width
    } else {
        size.height
    }
}
