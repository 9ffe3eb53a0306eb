// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Tiling: gapless rectangular tiling of a container.
//!
//! A tiling layout editor (think of the panel layout of an IDE) divides a
//! rectangular container into non-overlapping cells that always cover it
//! completely. This crate is the model behind such an editor:
//!
//! - A [`Cell`] stores four fractional offsets, each measured inward from the
//!   matching container edge, so the layout survives container resizes.
//! - A [`Grid`] owns the cells, hands out generational [`CellId`]s, and
//!   records which cells changed so a renderer can re-project them.
//! - An [`Edge`] (one side of one cell) splits its cell, finds the full
//!   [`Line`] it lies on, and merges a deleted cell's area into its neighbors.
//! - [`resize_dimension`] moves a whole line at once while refusing steps that
//!   would squash a cell below a minimum pixel size.
//! - [`ResizeSession`] turns pointer presses, moves, and releases into line
//!   moves.
//!
//! Lines are never stored. They are recovered on demand by comparing offsets
//! within [`GridConfig::tolerance`], which absorbs the drift that repeated
//! splits and drags leave behind.
//!
//! ## Not a renderer
//!
//! This crate does not create views, draw separators, or handle platform
//! events. The host maps pointer positions into container-local pixels, feeds
//! them to a [`ResizeSession`], and after each edit drains
//! [`Grid::take_changes`] to update whatever presents the cells.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_tiling::{Direction, Grid};
//!
//! let mut grid = Grid::new(Size::new(400.0, 300.0));
//! let main = grid.add_cell(0.0, 0.0, 0.0, 0.0);
//!
//! // A sidebar taking the left quarter.
//! let sidebar = grid.split(main, Direction::Left, 0.25).unwrap();
//! assert_eq!(grid.cell_rect(sidebar), Some(Rect::new(0.0, 0.0, 100.0, 300.0)));
//! assert_eq!(grid.cell_rect(main), Some(Rect::new(100.0, 0.0, 400.0, 300.0)));
//!
//! // A log panel under the main area.
//! let log = grid.split(main, Direction::Bottom, 0.5).unwrap();
//! assert_eq!(grid.cell_rect(log), Some(Rect::new(100.0, 150.0, 400.0, 300.0)));
//!
//! // Deleting the sidebar hands its area to the cells across its right edge.
//! grid.delete(sidebar).unwrap();
//! assert_eq!(grid.cell_rect(main), Some(Rect::new(0.0, 0.0, 400.0, 150.0)));
//! assert_eq!(grid.cell_rect(log), Some(Rect::new(0.0, 150.0, 400.0, 300.0)));
//! assert!(grid.check_partition().is_ok());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `tracing`: emits `tracing` events for splits, deletes, and drag sessions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cell;
mod direction;
mod edge;
mod error;
mod geometry;
mod grid;
mod resize;
pub mod session;
mod util;

pub use cell::{Cell, CellId};
pub use direction::Direction;
pub use edge::{Edge, Line};
pub use error::{PartitionViolation, TilingError};
pub use geometry::{closest_side, is_point_in_rect};
pub use grid::{CellGroup, Changes, DEFAULT_MIN_CELL_SIZE, DEFAULT_TOLERANCE, Grid, GridConfig};
pub use resize::{ResizeOutcome, resize_dimension};
pub use session::{DragContext, MoveOutcome, PressOutcome, ResizeSession};
