// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving a shared line while keeping both sides tiled.

use crate::cell::{Cell, CellId};
use crate::direction::Direction;
use crate::error::TilingError;
use crate::grid::Grid;

/// Whether a resize step moved the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Every cell on both sides was updated.
    Applied,
    /// A cell on the shrinking side would have dropped below the minimum
    /// size; nothing was changed.
    Blocked,
}

/// Move the line between two groups of cells by `delta` pixels.
///
/// - `negative_side`: cells on the low-coordinate side of the line (left of
///   a vertical line, above a horizontal one).
/// - `lower_direction`: the offset measured from the low-coordinate container
///   edge on the relevant axis, [`Direction::Left`] or [`Direction::Top`].
/// - `positive_side`: cells on the high-coordinate side.
/// - `size_of`: current extent of a cell along the relevant axis, in pixels.
/// - `min_size`: smallest extent, in pixels, any cell may be left with.
///
/// The side that shrinks is `negative_side` for a negative `delta` and
/// `positive_side` otherwise. The step only happens if every shrinking cell is
/// currently strictly larger than `|delta| + min_size`; otherwise it returns
/// [`ResizeOutcome::Blocked`] and nothing changes. On success the positive
/// side's `lower_direction` offsets grow by `delta` and the negative side's
/// opposite offsets shrink by `delta`, so the line moves as a whole.
///
/// All ids must be live; a stale id fails with [`TilingError::StaleCell`]
/// before anything is changed.
pub fn resize_dimension(
    grid: &mut Grid,
    negative_side: &[CellId],
    lower_direction: Direction,
    positive_side: &[CellId],
    size_of: impl Fn(&Cell) -> f64,
    min_size: f64,
    delta: f64,
) -> Result<ResizeOutcome, TilingError> {
    if let Some(&cell) = negative_side
        .iter()
        .chain(positive_side)
        .find(|&&id| !grid.is_alive(id))
    {
        return Err(TilingError::StaleCell { cell });
    }

    let higher_direction = lower_direction.opposite();
    let squashed_side = if delta < 0.0 {
        negative_side
    } else {
        positive_side
    };
    let squashable_size = delta.abs() + min_size;
    let fits = squashed_side
        .iter()
        .filter_map(|&id| grid.cell(id))
        .all(|cell| size_of(cell) > squashable_size);
    if !fits {
        #[cfg(feature = "tracing")]
        tracing::trace!(delta, min_size, "resize blocked by minimum cell size");
        return Ok(ResizeOutcome::Blocked);
    }

    for &id in positive_side {
        grid.change_distance_px(id, lower_direction, delta)?;
    }
    for &id in negative_side {
        grid.change_distance_px(id, higher_direction, -delta)?;
    }
    Ok(ResizeOutcome::Applied)
}
